//! Translation Master - command line entry point

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use translation_master::cli::Args;
use translation_master::config::Config;
use translation_master::logging::setup_logging;
use translation_master::translate::OllamaClient;
use translation_master::workflow;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Held until exit so the log file is flushed
    let (_guard, log_path) = setup_logging(&args.log_dir(), args.verbose)?;

    let config = Config::load(args.config.as_deref())?;
    let ollama = OllamaClient::new(&config.ollama)?;
    info!("Using ollama at {}", ollama.endpoint());

    let settings = args.run_settings(&config);
    let report = match workflow::execute(&settings, &ollama, &ollama).await {
        Ok(report) => report,
        Err(e) if e.is_fatal() => {
            error!("Aborting before any file was processed: {}", e);
            return Err(e.into());
        }
        Err(e) => {
            error!("Run failed: {}", e);
            return Err(e.into());
        }
    };

    println!(
        "Processing complete: {} translated, {} failed. Output: {}, log: {}",
        report.succeeded.len(),
        report.failed.len(),
        report.run_dir.display(),
        log_path.display()
    );

    Ok(())
}
