use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;
use crate::logging::DEFAULT_LOG_DIR;
use crate::workflow::RunSettings;

/// Translate technical text and code files while preserving their formatting.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// The input directory to translate
    #[arg(long = "input_dir", value_name = "DIR")]
    pub input_dir: PathBuf,

    /// The base output directory to save translations
    #[arg(long = "output_dir", value_name = "DIR")]
    pub output_dir: PathBuf,

    /// The ollama model name to use for translation (e.g. gemma3:1b)
    #[arg(long)]
    pub model: String,

    /// The target language, as an ISO code or a language name
    #[arg(long)]
    pub language: String,

    /// Custom name for the output run directory
    #[arg(long = "output_dir_name", value_name = "NAME")]
    pub output_dir_name: Option<String>,

    /// The directory to save log files
    #[arg(long = "logging_path", value_name = "DIR")]
    pub logging_path: Option<PathBuf>,

    /// Automatically pull the model if not installed
    #[arg(long)]
    pub pull: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl Args {
    pub fn log_dir(&self) -> PathBuf {
        self.logging_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR))
    }

    pub fn run_settings(&self, config: &Config) -> RunSettings {
        RunSettings {
            input_dir: self.input_dir.clone(),
            output_dir: self.output_dir.clone(),
            output_dir_name: self.output_dir_name.clone(),
            model: self.model.clone(),
            language: self.language.clone(),
            pull: self.pull,
            strip_reasoning: config.translate.strip_reasoning,
            log_dir: Some(self.log_dir()),
        }
    }
}
