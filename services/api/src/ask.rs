use crate::infra::{build_chat_service, load_dataset};
use clap::Args;
use finbot::chat::{ChatRequest, SessionId};
use finbot::config::AppConfig;
use finbot::error::AppError;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct AskArgs {
    /// One or more questions, answered in order within a single session
    #[arg(required = true, num_args = 1..)]
    pub(crate) questions: Vec<String>,
    /// Override the configured dataset CSV
    #[arg(long)]
    pub(crate) dataset: Option<PathBuf>,
    /// Override the directory charts are written to
    #[arg(long)]
    pub(crate) plots_dir: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct CompaniesArgs {
    /// Override the configured dataset CSV
    #[arg(long)]
    pub(crate) dataset: Option<PathBuf>,
}

pub(crate) fn run_ask(args: AskArgs) -> Result<(), AppError> {
    let AskArgs {
        questions,
        dataset,
        plots_dir,
    } = args;

    let config = AppConfig::load()?;
    let dataset_path = dataset.unwrap_or(config.data.dataset_path);
    let plots_dir = plots_dir.unwrap_or(config.data.plots_dir);

    let service = build_chat_service(load_dataset(&dataset_path)?, &plots_dir);

    let mut session_id: Option<SessionId> = None;
    for question in questions {
        let response = service
            .respond(ChatRequest {
                message: question.clone(),
                session_id: session_id.clone(),
            })?;

        println!("> {question}");
        println!("{}", response.reply);
        if let Some(image) = &response.image {
            let file = image.rsplit('/').next().unwrap_or(image.as_str());
            println!("  chart: {}", plots_dir.join(file).display());
        }
        session_id = Some(response.session_id);
    }

    Ok(())
}

pub(crate) fn run_companies(args: CompaniesArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let dataset_path = args.dataset.unwrap_or(config.data.dataset_path);
    let dataset = load_dataset(&dataset_path)?;

    println!(
        "{} companies across {} rows in {}",
        dataset.companies().len(),
        dataset.len(),
        dataset_path.display()
    );
    for company in dataset.companies() {
        println!("  {company}");
    }

    Ok(())
}
