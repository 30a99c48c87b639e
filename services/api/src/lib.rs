mod apply;
mod catalog;
mod cli;
mod infra;
mod routes;
mod server;

use course_enroll::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
