use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use lore_core::{Embedder, Embedding, Error, ProviderConfig, Result};

/// Embedding client for OpenAI-compatible `/embeddings` endpoints.
pub struct OpenAiEmbedder {
    /// HTTP client for API requests.
    client: Client,
    /// API key sent as a bearer token.
    api_key: String,
    /// Base URL of the API.
    base_url: String,
    /// Embedding model identifier.
    model: String,
}

impl OpenAiEmbedder {
    /// Creates an embedder from provider configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is available from config or the
    /// environment.
    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        let api_key = config.resolve_api_key()?;
        Ok(Self {
            client: Client::default(),
            api_key,
            base_url: config.base_url.clone(),
            model: config.embedding_model.clone(),
        })
    }

    /// Sets the model to use for embedding.
    #[must_use]
    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    /// Sends one embeddings request for the given inputs.
    async fn request(&self, inputs: &[String]) -> Result<Vec<Embedding>> {
        let request = EmbeddingsRequest {
            model: self.model.clone(),
            input: inputs,
        };

        let response = self
            .client
            .post(format!("{}/embeddings", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_owned());
            return Err(Error::Provider(format!(
                "embeddings API error {status}: {error_text}"
            )));
        }

        let payload: EmbeddingsResponse = response.json().await?;

        if payload.data.len() != inputs.len() {
            return Err(Error::InvalidResponse(format!(
                "expected {} embeddings, got {}",
                inputs.len(),
                payload.data.len()
            )));
        }

        // Rows are index-annotated; order by annotation, not arrival order.
        let mut rows = payload.data;
        rows.sort_by_key(|row| row.index);
        Ok(rows.into_iter().map(|row| row.embedding).collect())
    }
}

#[async_trait]
impl Embedder for OpenAiEmbedder {
    fn model(&self) -> &str {
        &self.model
    }

    async fn embed(&self, text: &str) -> Result<Embedding> {
        let mut embeddings = self.request(&[text.to_owned()]).await?;
        embeddings
            .pop()
            .ok_or_else(|| Error::InvalidResponse("no embeddings returned".to_owned()))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.request(texts).await
    }
}

/// Request payload for the embeddings endpoint.
#[derive(Debug, Serialize)]
struct EmbeddingsRequest<'texts> {
    /// Embedding model identifier.
    model: String,
    /// Texts to embed.
    input: &'texts [String],
}

/// Response payload from the embeddings endpoint.
#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    /// One row per input text.
    data: Vec<EmbeddingRow>,
}

/// A single embedding row.
#[derive(Debug, Deserialize)]
struct EmbeddingRow {
    /// Position of the corresponding input.
    index: usize,
    /// The embedding vector.
    embedding: Embedding,
}
