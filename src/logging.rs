use chrono::{Local, NaiveDate};
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{Result, TranslationError};

/// Default log directory, relative to the working directory.
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Install the console + file subscriber. The returned guard flushes the file
/// writer when dropped and must be held until the process exits.
pub fn setup_logging(log_dir: &Path, verbose: bool) -> Result<(WorkerGuard, PathBuf)> {
    std::fs::create_dir_all(log_dir)?;

    let file_name = log_file_name(log_dir, Local::now().date_naive())?;
    let log_path = log_dir.join(&file_name);

    let file_appender = rolling::never(log_dir, &file_name);
    let (non_blocking_file, guard) = non_blocking(file_appender);

    let log_level = if verbose { Level::DEBUG } else { Level::INFO };

    let console_layer = fmt::layer().with_target(false);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| TranslationError::Config(format!("Failed to initialize logging: {}", e)))?;

    info!("Logging initialized - level: {}, file: {}", log_level, log_path.display());

    Ok((guard, log_path))
}

/// `translation_run_<date>.log` for the first run of a day, then
/// `translation_run_<date>_<n>.log` where `n` counts that day's existing logs.
pub fn log_file_name(log_dir: &Path, date: NaiveDate) -> Result<String> {
    let date_str = date.format("%Y-%m-%d").to_string();

    let mut count = 0usize;
    for entry in std::fs::read_dir(log_dir)? {
        let name = entry?.file_name();
        let name = name.to_string_lossy();
        if name.ends_with(".log") && name.contains(&date_str) {
            count += 1;
        }
    }

    Ok(if count > 0 {
        format!("translation_run_{}_{}.log", date_str, count)
    } else {
        format!("translation_run_{}.log", date_str)
    })
}
