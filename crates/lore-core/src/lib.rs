//! Core types and traits for the lore retrieval pipeline.
//!
//! This crate provides the error type, configuration, core data types, and
//! the capability traits implemented by embedding and language-model
//! providers.

/// Configuration types for the splitter, retriever, and providers.
pub mod config;
/// Error types and result definitions.
pub mod error;
/// Trait definitions for embedding and language-model providers.
pub mod traits;
/// Core data types for documents, chunks, and answers.
pub mod types;

pub use config::{LoreConfig, ProviderConfig, RetrieverConfig, SplitterConfig};
pub use error::{Error, Result};
pub use traits::{Embedder, LanguageModel};
pub use types::{Answer, Chunk, Document, Embedding, Scored};
