use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::{info, warn};

use crate::error::{Result, TranslationError};

/// Where models are listed and installed from.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModelStore: Send + Sync {
    /// Names of the models currently installed (e.g. `gemma3:1b`)
    async fn installed_models(&self) -> Result<Vec<String>>;

    /// Install a model, blocking until it is complete
    async fn pull_model(&self, model: &str) -> Result<()>;
}

/// Makes sure the requested model is available before any file is touched.
pub struct ModelProvisioner<'a, S: ModelStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: ModelStore + ?Sized> ModelProvisioner<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Check `model` is installed; pull it when `pull` is set, otherwise fail
    /// with [`TranslationError::ModelUnavailable`].
    pub async fn ensure_model(&self, model: &str, pull: bool) -> Result<()> {
        let installed = self.store.installed_models().await?;

        if is_installed(&installed, model) {
            info!("Model '{}' is available", model);
            return Ok(());
        }

        if !pull {
            return Err(TranslationError::ModelUnavailable {
                model: model.to_string(),
                available: installed,
            });
        }

        info!("Model '{}' not found. Pulling the model...", model);
        let spinner = pull_spinner(model);
        let outcome = self.store.pull_model(model).await;
        spinner.finish_and_clear();

        match outcome {
            Ok(()) => {
                info!("Model '{}' pulled successfully", model);
                Ok(())
            }
            Err(e) => {
                warn!("Failed to pull model '{}': {}", model, e);
                let available = self.store.installed_models().await.unwrap_or(installed);
                Err(TranslationError::ProvisionFailed {
                    model: model.to_string(),
                    reason: e.to_string(),
                    available,
                })
            }
        }
    }
}

/// Ollama resolves an untagged name to `:latest`, so `llama3.2` is installed
/// when `llama3.2:latest` is listed.
pub fn is_installed(installed: &[String], model: &str) -> bool {
    installed.iter().any(|name| {
        name == model || (!model.contains(':') && name.strip_suffix(":latest") == Some(model))
    })
}

fn pull_spinner(model: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(format!("Pulling {}", model));
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}
