//! Deterministic mock providers for tests.
//!
//! [`MockLanguageModel`] returns canned responses for prompt patterns,
//! enabling end-to-end pipeline tests without real API calls.
//! [`BagEmbedder`] is a hashed bag-of-words embedder whose cosine
//! similarity tracks token overlap, deterministic across runs.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash as _, Hasher as _};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use lore_core::{Answer, Embedder, Embedding, Error, LanguageModel, Result};

/// Locks a mutex, recovering the data from a poisoned lock.
fn lock_ignoring_poison<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Language model that returns pre-defined responses based on prompt
/// patterns.
#[derive(Clone, Default)]
pub struct MockLanguageModel {
    /// Predefined responses as (pattern, response) pairs in registration
    /// order.
    responses: Arc<Mutex<Vec<(String, String)>>>,
    /// Default response when no pattern matches.
    default_response: Arc<Mutex<Option<String>>>,
    /// Prompts received, for verification.
    call_history: Arc<Mutex<Vec<String>>>,
}

impl MockLanguageModel {
    /// Creates a mock with no canned responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a pattern-based response. Earlier registrations take precedence
    /// when several patterns occur in the same prompt.
    #[must_use]
    pub fn with_response(self, pattern: impl Into<String>, response: impl Into<String>) -> Self {
        {
            let mut responses = lock_ignoring_poison(&self.responses);
            responses.push((pattern.into(), response.into()));
        }
        self
    }

    /// Sets a default response for prompts that match no pattern.
    #[must_use]
    pub fn with_default_response(self, response: impl Into<String>) -> Self {
        {
            let mut default = lock_ignoring_poison(&self.default_response);
            *default = Some(response.into());
        }
        self
    }

    /// Returns all prompts this mock has received.
    pub fn call_history(&self) -> Vec<String> {
        lock_ignoring_poison(&self.call_history).clone()
    }

    /// Returns the number of generation calls made.
    pub fn call_count(&self) -> usize {
        lock_ignoring_poison(&self.call_history).len()
    }

    /// Finds a canned response for the prompt: an exactly matching pattern
    /// wins, then the first registered pattern occurring in the prompt.
    fn find_response(&self, prompt: &str) -> Option<String> {
        let responses = lock_ignoring_poison(&self.responses);
        responses
            .iter()
            .find(|(pattern, _)| pattern.as_str() == prompt)
            .or_else(|| {
                responses
                    .iter()
                    .find(|(pattern, _)| prompt.contains(pattern.as_str()))
            })
            .map(|(_, response)| response.clone())
    }
}

#[async_trait]
impl LanguageModel for MockLanguageModel {
    fn name(&self) -> &'static str {
        "Mock"
    }

    async fn is_available(&self) -> bool {
        true
    }

    async fn complete(&self, prompt: &str) -> Result<Answer> {
        {
            let mut history = lock_ignoring_poison(&self.call_history);
            history.push(prompt.to_owned());
        }

        let text = self
            .find_response(prompt)
            .or_else(|| lock_ignoring_poison(&self.default_response).clone())
            .ok_or_else(|| {
                Error::Provider("mock has no response for this prompt".to_owned())
            })?;

        Ok(Answer {
            text,
            model: "mock".to_owned(),
            latency_ms: 0,
        })
    }
}

/// Deterministic hashed bag-of-words embedder.
///
/// Each lowercase alphanumeric token is hashed into one of `dimensions`
/// buckets; the embedding counts tokens per bucket. Identical texts embed
/// identically and cosine similarity grows with shared vocabulary.
#[derive(Clone)]
pub struct BagEmbedder {
    /// Number of hash buckets.
    dimensions: usize,
}

impl Default for BagEmbedder {
    fn default() -> Self {
        Self { dimensions: 64 }
    }
}

impl BagEmbedder {
    /// Creates an embedder with the given number of buckets.
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    /// Embeds one text into token-count buckets.
    fn bag(&self, text: &str) -> Embedding {
        let mut vector = vec![0.0; self.dimensions];
        for token in text
            .to_lowercase()
            .split(|character: char| !character.is_alphanumeric())
            .filter(|token| !token.is_empty())
        {
            let mut hasher = DefaultHasher::new();
            token.hash(&mut hasher);
            let bucket = (hasher.finish() % self.dimensions as u64) as usize;
            vector[bucket] += 1.0;
        }
        vector
    }
}

#[async_trait]
impl Embedder for BagEmbedder {
    fn model(&self) -> &str {
        "bag-of-words"
    }

    async fn embed(&self, text: &str) -> Result<Embedding> {
        Ok(self.bag(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        Ok(texts.iter().map(|text| self.bag(text)).collect())
    }
}
