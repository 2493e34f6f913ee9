use clap::Parser;
use feed_verifier::{Cli, Runner};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Cli::parse().into_config();
    info!("Checking sources from {}", config.sources_path.display());

    let runner = match Runner::new(config) {
        Ok(runner) => runner,
        Err(e) => return critical(format!("{e:#}")),
    };

    // A panic inside the run comes back as a JoinError.
    match tokio::spawn(async move { runner.run().await }).await {
        Ok(outcome) => {
            println!("{}", outcome.summary_line());
            if outcome.passed {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => critical(e.to_string()),
    }
}

fn critical(detail: String) -> ExitCode {
    error!("Critical error during validation: {}", detail);
    println!("Critical error during validation: {}", detail);
    ExitCode::FAILURE
}
