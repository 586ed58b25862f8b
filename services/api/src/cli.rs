use crate::ask::{run_ask, run_companies, AskArgs, CompaniesArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use finbot::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Financial Chatbot",
    about = "Answer questions about company financials over HTTP or from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Ask one or more questions without starting the server
    Ask(AskArgs),
    /// List the companies present in the dataset
    Companies(CompaniesArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the configured dataset CSV
    #[arg(long)]
    pub(crate) dataset: Option<PathBuf>,
    /// Override the directory charts are written to and served from
    #[arg(long)]
    pub(crate) plots_dir: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Ask(args) => run_ask(args),
        Command::Companies(args) => run_companies(args),
    }
}
