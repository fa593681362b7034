use async_trait::async_trait;

use crate::{Answer, Embedding, Result};

/// Trait for services that turn text into fixed-dimensionality vectors.
///
/// Both ingestion and query embedding go through this seam so tests can
/// substitute a deterministic implementation.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Returns the identifier of the embedding model in use.
    fn model(&self) -> &str;

    /// Embeds a single text.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedding call fails or returns no vector.
    async fn embed(&self, text: &str) -> Result<Embedding>;

    /// Embeds a batch of texts, returning one vector per input in order.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedding call fails or the provider returns
    /// a different number of vectors than inputs.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>>;
}

/// Trait for hosted language models that answer a rendered prompt.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Returns the unique identifier for this provider.
    fn name(&self) -> &'static str;

    /// Checks whether this provider is configured and ready to serve.
    async fn is_available(&self) -> bool;

    /// Generates an answer for the given rendered prompt.
    ///
    /// The prompt already contains the question and retrieved context; the
    /// response text is passed back verbatim with no parsing or retry.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider is unavailable, the request fails,
    /// or the response cannot be parsed.
    async fn complete(&self, prompt: &str) -> Result<Answer>;
}
