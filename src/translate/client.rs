use std::path::Path;
use tracing::debug;

use super::{build_prompt, TargetLanguage, TranslationProvider, TranslationRequest};
use crate::error::{Result, TranslationError};

const THINK_OPEN: &str = "<think>";
const THINK_CLOSE: &str = "</think>";

/// Translates whole files through a [`TranslationProvider`].
pub struct TranslationClient<P> {
    provider: P,
    model: String,
    language: TargetLanguage,
    strip_reasoning: bool,
}

impl<P: TranslationProvider> TranslationClient<P> {
    pub fn new(provider: P, model: impl Into<String>, language: TargetLanguage) -> Self {
        Self {
            provider,
            model: model.into(),
            language,
            strip_reasoning: false,
        }
    }

    pub fn with_strip_reasoning(mut self, strip: bool) -> Self {
        self.strip_reasoning = strip;
        self
    }

    /// Translate one file's content. `path` is only used for diagnostics.
    pub async fn translate_file(&self, path: &Path, content: &str) -> Result<String> {
        if content.trim().is_empty() {
            debug!("Skipping model call for blank file {}", path.display());
            return Ok(content.to_string());
        }

        let request = TranslationRequest {
            model: self.model.clone(),
            language: self.language.clone(),
            prompt: build_prompt(content, &self.language),
            content: content.to_string(),
        };

        debug!(
            "Requesting translation of {} ({} bytes) into {}",
            path.display(),
            content.len(),
            self.language
        );

        let mut reply = self.provider.translate(&request).await?;
        if self.strip_reasoning {
            reply = strip_reasoning_blocks(&reply);
        }

        if reply.trim().is_empty() {
            return Err(TranslationError::EmptyResponse(path.display().to_string()));
        }

        Ok(reply)
    }
}

/// Remove `<think>...</think>` sections and the whitespace that follows them.
/// An unterminated block removes everything after its opening tag.
pub fn strip_reasoning_blocks(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find(THINK_OPEN) {
        result.push_str(&rest[..start]);
        let after_open = &rest[start + THINK_OPEN.len()..];
        match after_open.find(THINK_CLOSE) {
            Some(end) => {
                rest = after_open[end + THINK_CLOSE.len()..].trim_start();
            }
            None => {
                rest = "";
            }
        }
    }
    result.push_str(rest);
    result
}
