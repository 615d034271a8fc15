use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::error::{Result, TranslationError};

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "translation-master.toml";

/// Environment variable the ollama tooling uses for its server address.
pub const OLLAMA_HOST_ENV: &str = "OLLAMA_HOST";

fn default_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_timeout_secs() -> u64 {
    300
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ollama: OllamaConfig,
    #[serde(default)]
    pub translate: TranslateConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Ollama endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Per-request timeout; pulls are not bounded by it
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranslateConfig {
    /// Remove `<think>...</think>` blocks emitted by reasoning models.
    /// Off by default: the reply is written as received.
    #[serde(default)]
    pub strip_reasoning: bool,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| TranslationError::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| TranslationError::Config(format!("Failed to parse config file: {}", e)))
    }

    /// Resolve the configuration: explicit path, then the default file in the
    /// working directory, then built-in defaults. `OLLAMA_HOST` wins over the
    /// endpoint from any of them.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Config::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                info!("Found {} in current directory, loading...", DEFAULT_CONFIG_FILE);
                Config::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => Config::default(),
        };

        if let Ok(host) = std::env::var(OLLAMA_HOST_ENV) {
            if !host.trim().is_empty() {
                config.ollama.endpoint = normalize_endpoint(&host);
            }
        }

        Ok(config)
    }
}

/// `OLLAMA_HOST` is commonly given as `host:port`; add the scheme and drop a
/// trailing slash so request URLs can be joined with `/api/...`.
pub fn normalize_endpoint(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("http://{}", host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.ollama.endpoint, "http://localhost:11434");
        assert_eq!(config.ollama.timeout_secs, 300);
        assert!(!config.translate.strip_reasoning);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[translate]\nstrip_reasoning = true\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert!(config.translate.strip_reasoning);
        assert_eq!(config.ollama.endpoint, "http://localhost:11434");
    }

    #[test]
    fn test_full_file_overrides_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[ollama]\nendpoint = \"http://gpu-box:11434\"\ntimeout_secs = 30\n\n[translate]\nstrip_reasoning = false\n",
        )
        .unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.ollama.endpoint, "http://gpu-box:11434");
        assert_eq!(loaded.ollama.timeout_secs, 30);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[ollama\nendpoint = ").unwrap();

        let err = Config::from_file(&path).unwrap_err();
        assert!(matches!(err, TranslationError::Config(_)));
    }

    #[test]
    fn test_normalize_endpoint() {
        assert_eq!(normalize_endpoint("127.0.0.1:11434"), "http://127.0.0.1:11434");
        assert_eq!(normalize_endpoint("http://host:11434/"), "http://host:11434");
        assert_eq!(normalize_endpoint("https://ollama.lan"), "https://ollama.lan");
    }
}
