use core::result::Result as CoreResult;
use std::io::Error as IoError;

use reqwest::Error as ReqwestError;
use serde_json::Error as SerdeJsonError;
use thiserror::Error as ThisError;
use toml::de::Error as TomlError;

/// Result type for lore operations.
pub type Result<T> = CoreResult<T, Error>;

/// Errors that can occur in the retrieval pipeline.
#[derive(Debug, ThisError)]
pub enum Error {
    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// An HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] ReqwestError),

    /// JSON serialization or deserialization failed.
    #[error("JSON serialization error: {0}")]
    Json(#[from] SerdeJsonError),

    /// TOML deserialization failed.
    #[error("TOML deserialization error: {0}")]
    Toml(#[from] TomlError),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Required API key was not found.
    #[error("API key not found: {0}")]
    MissingApiKey(String),

    /// An embedding or language-model provider encountered an error.
    #[error("Provider error: {0}")]
    Provider(String),

    /// A provider returned a response the pipeline cannot use.
    #[error("Invalid response from provider: {0}")]
    InvalidResponse(String),
}

impl Error {
    /// Determines whether this error may succeed if retried.
    ///
    /// Returns `true` for transient errors like network failures or provider
    /// errors. The pipeline itself never retries; callers may.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Provider(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value as JsonValue, from_str};
    use std::io;

    #[test]
    fn error_display() {
        let error1 = Error::Config("chunk_overlap must be smaller than chunk_size".to_owned());
        assert_eq!(
            error1.to_string(),
            "Configuration error: chunk_overlap must be smaller than chunk_size"
        );

        let error2 = Error::Provider("model unavailable".to_owned());
        assert_eq!(error2.to_string(), "Provider error: model unavailable");

        let error3 = Error::MissingApiKey("OPENAI_API_KEY".to_owned());
        assert_eq!(error3.to_string(), "API key not found: OPENAI_API_KEY");
    }

    #[test]
    fn error_is_retryable() {
        let error1 = Error::Provider("timeout".to_owned());
        assert!(error1.is_retryable());

        let error2 = Error::Config("bad config".to_owned());
        assert!(!error2.is_retryable());

        let error3 = Error::MissingApiKey("KEY".to_owned());
        assert!(!error3.is_retryable());

        let error4 = Error::InvalidResponse("no embeddings".to_owned());
        assert!(!error4.is_retryable());
    }

    #[test]
    fn error_from_io() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let error: Error = io_error.into();
        assert!(matches!(error, Error::Io(_)));
    }

    #[test]
    fn error_from_json() {
        let json_error = from_str::<JsonValue>("invalid json").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
    }
}
