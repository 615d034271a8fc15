// Translation layer
//
// - language: target language designator normalization
// - prompt: instruction text sent alongside each file
// - client: per-file translation on top of a provider
// - ollama: the ollama HTTP adapter (provider + model store)

pub mod client;
pub mod language;
pub mod ollama;
pub mod prompt;

use async_trait::async_trait;

pub use client::TranslationClient;
pub use language::TargetLanguage;
pub use ollama::OllamaClient;
pub use prompt::build_prompt;

use crate::error::Result;

/// One translation call: everything a provider needs to produce the
/// translated file.
#[derive(Debug, Clone)]
pub struct TranslationRequest {
    /// Model identifier as known to the provider
    pub model: String,
    pub language: TargetLanguage,
    /// Full prompt (content + instruction)
    pub prompt: String,
    /// Raw file content, without the instruction
    pub content: String,
}

/// Capability interface for the external model.
///
/// Implementations return the model reply as-is. Any failure (connection,
/// timeout, malformed reply) is reported as an error for that single request.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    async fn translate(&self, request: &TranslationRequest) -> Result<String>;
}

#[async_trait]
impl<P: TranslationProvider + ?Sized> TranslationProvider for &P {
    async fn translate(&self, request: &TranslationRequest) -> Result<String> {
        (**self).translate(request).await
    }
}
