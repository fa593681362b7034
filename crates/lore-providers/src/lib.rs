//! Provider adapters for external embedding and language-model services.

/// OpenAI-compatible chat-completion provider.
pub mod chat;
/// OpenAI-compatible embedding provider.
pub mod embeddings;
/// Deterministic mock providers for tests.
pub mod mock;
/// Prompt templates and the hosted template source.
pub mod prompt;

pub use chat::OpenAiChatModel;
pub use embeddings::OpenAiEmbedder;
pub use prompt::{PromptHub, PromptTemplate};
