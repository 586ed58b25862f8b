mod ask;
mod chart;
mod cli;
mod infra;
mod routes;
mod server;

use finbot::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
