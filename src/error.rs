use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranslationError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Path not found: {0}")]
    PathNotFound(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Invalid target language '{0}': expected an ISO code or a language name")]
    InvalidLanguage(String),

    #[error("Model '{model}' is not installed (available: {}). Run 'ollama pull {model}' or pass --pull", .available.join(", "))]
    ModelUnavailable { model: String, available: Vec<String> },

    #[error("Failed to pull model '{model}': {reason}. Does the model exist? Available: {}", .available.join(", "))]
    ProvisionFailed {
        model: String,
        reason: String,
        available: Vec<String>,
    },

    #[error("Translation provider error: {0}")]
    Provider(String),

    #[error("Empty translation received for {0}")]
    EmptyResponse(String),

    #[error("Invalid output path: {0}")]
    InvalidOutputPath(String),
}

impl TranslationError {
    /// Errors that stop the run before any file is processed.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Config(_)
                | Self::Toml(_)
                | Self::PathNotFound(_)
                | Self::NotADirectory(_)
                | Self::InvalidLanguage(_)
                | Self::ModelUnavailable { .. }
                | Self::ProvisionFailed { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, TranslationError>;
