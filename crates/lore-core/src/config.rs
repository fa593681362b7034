//! Configuration for the splitter, retriever, and external providers.

use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Env var key for the OpenAI API key.
pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";

/// Complete pipeline configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoreConfig {
    /// Document splitter configuration.
    pub splitter: SplitterConfig,
    /// Retrieval configuration.
    pub retriever: RetrieverConfig,
    /// External provider configuration.
    pub providers: ProviderConfig,
}

impl LoreConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// parsed configuration fails validation.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration, failing fast before any pipeline work.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for invalid splitter or retriever
    /// parameters.
    pub fn validate(&self) -> Result<()> {
        self.splitter.validate()?;
        self.retriever.validate()
    }
}

/// Parameters for splitting documents into overlapping chunks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitterConfig {
    /// Maximum chunk length in characters.
    pub chunk_size: usize,
    /// Characters shared between adjacent chunks.
    pub chunk_overlap: usize,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
        }
    }
}

impl SplitterConfig {
    /// Validates splitter parameters.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `chunk_size` is zero or the overlap
    /// is not strictly smaller than the chunk size.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(Error::Config("chunk_size must be non-zero".to_owned()));
        }
        if self.chunk_overlap >= self.chunk_size {
            return Err(Error::Config(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }
        Ok(())
    }
}

/// Parameters for similarity retrieval.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrieverConfig {
    /// Number of chunks returned per query.
    pub top_k: usize,
}

impl Default for RetrieverConfig {
    fn default() -> Self {
        Self { top_k: 4 }
    }
}

impl RetrieverConfig {
    /// Validates retrieval parameters.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `top_k` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(Error::Config("top_k must be non-zero".to_owned()));
        }
        Ok(())
    }
}

/// Configuration for the embedding and language-model providers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// API key; falls back to `OPENAI_API_KEY` when absent.
    pub api_key: Option<String>,
    /// Base URL of the OpenAI-compatible API.
    pub base_url: String,
    /// Embedding model identifier.
    pub embedding_model: String,
    /// Chat model identifier.
    pub chat_model: String,
    /// Base URL of the hosted prompt-template source.
    pub prompt_hub: Option<String>,
    /// Name of the hosted prompt template; `None` uses the built-in default.
    pub prompt_template: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com/v1".to_owned(),
            embedding_model: "text-embedding-3-large".to_owned(),
            chat_model: "gpt-4o-mini".to_owned(),
            prompt_hub: None,
            prompt_template: None,
        }
    }
}

impl ProviderConfig {
    /// Resolves the API key from config or the environment.
    ///
    /// # Errors
    ///
    /// Returns a [`Error::MissingApiKey`] error if neither source provides a
    /// non-empty key.
    pub fn resolve_api_key(&self) -> Result<String> {
        self.api_key
            .clone()
            .filter(|key| !key.is_empty())
            .or_else(|| env::var(ENV_OPENAI_API_KEY).ok().filter(|key| !key.is_empty()))
            .ok_or_else(|| Error::MissingApiKey(ENV_OPENAI_API_KEY.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    #[test]
    fn default_config_is_valid() {
        let config = LoreConfig::default();
        assert_eq!(config.splitter.chunk_size, 1000);
        assert_eq!(config.splitter.chunk_overlap, 200);
        assert_eq!(config.retriever.top_k, 4);
        config.validate().unwrap();
    }

    #[test]
    fn overlap_not_smaller_than_chunk_size_is_rejected() {
        let splitter = SplitterConfig {
            chunk_size: 100,
            chunk_overlap: 100,
        };
        assert!(matches!(splitter.validate(), Err(Error::Config(_))));

        let splitter = SplitterConfig {
            chunk_size: 100,
            chunk_overlap: 250,
        };
        assert!(matches!(splitter.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn zero_top_k_is_rejected() {
        let retriever = RetrieverConfig { top_k: 0 };
        assert!(matches!(retriever.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn config_key_takes_precedence() {
        let providers = ProviderConfig {
            api_key: Some("sk-from-config".to_owned()),
            ..ProviderConfig::default()
        };
        assert_eq!(providers.resolve_api_key().unwrap(), "sk-from-config");
    }

    #[test]
    fn load_from_toml_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[splitter]\nchunk_size = 500\nchunk_overlap = 50\n\n[retriever]\ntop_k = 2"
        )
        .unwrap();

        let config = LoreConfig::load_from(file.path()).unwrap();
        assert_eq!(config.splitter.chunk_size, 500);
        assert_eq!(config.splitter.chunk_overlap, 50);
        assert_eq!(config.retriever.top_k, 2);
        // Unspecified sections keep their defaults.
        assert_eq!(config.providers.chat_model, "gpt-4o-mini");
    }

    #[test]
    fn load_rejects_invalid_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[splitter]\nchunk_size = 100\nchunk_overlap = 100").unwrap();
        assert!(matches!(
            LoreConfig::load_from(file.path()),
            Err(Error::Config(_))
        ));
    }
}
