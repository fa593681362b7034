//! In-memory vector index with cosine similarity search.
//!
//! The index is populated once at startup and only read afterwards: entries
//! are appended in insertion order, never updated or removed, and every
//! entry carries an embedding of identical dimensionality.

use std::cmp::Ordering;

use lore_core::{Chunk, Embedder, Embedding, Error, Result, Scored};

/// A stored chunk together with its embedding.
struct IndexEntry {
    /// The chunk owned by the index.
    chunk: Chunk,
    /// Embedding computed once at ingestion time.
    embedding: Embedding,
}

/// Append-only in-memory vector index.
///
/// `add` embeds chunks through the provided [`Embedder`]; `search` embeds
/// the query text and returns the best-scoring chunks under cosine
/// similarity, ties broken by insertion order.
pub struct VectorIndex<E: Embedder> {
    /// Embedding provider used for both ingestion and queries.
    embedder: E,
    /// Stored entries in insertion order.
    entries: Vec<IndexEntry>,
}

impl<E: Embedder> VectorIndex<E> {
    /// Creates an empty index around an embedding provider.
    pub fn new(embedder: E) -> Self {
        Self {
            embedder,
            entries: Vec::new(),
        }
    }

    /// Embeds the given chunks and appends them to the index.
    ///
    /// Chunks are embedded in one batch; the index grows monotonically and
    /// performs no deduplication. Returns the number of entries added.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedding call fails, returns a different
    /// number of vectors than chunks, or returns vectors whose
    /// dimensionality differs from entries already stored. A failed add
    /// leaves the index unchanged.
    pub async fn add(&mut self, chunks: Vec<Chunk>) -> Result<usize> {
        if chunks.is_empty() {
            return Ok(0);
        }

        let texts: Vec<String> = chunks.iter().map(|chunk| chunk.text.clone()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;

        if embeddings.len() != chunks.len() {
            return Err(Error::InvalidResponse(format!(
                "embedding count mismatch: {} texts, {} vectors",
                chunks.len(),
                embeddings.len()
            )));
        }

        // Validate the whole batch before touching the index so a failed
        // add leaves it unchanged.
        let expected_dimensions = self
            .entries
            .first()
            .map(|entry| entry.embedding.len())
            .or_else(|| embeddings.first().map(Vec::len));
        for embedding in &embeddings {
            if Some(embedding.len()) != expected_dimensions {
                return Err(Error::InvalidResponse(format!(
                    "embedding dimensionality mismatch: expected {}, got {}",
                    expected_dimensions.unwrap_or_default(),
                    embedding.len()
                )));
            }
        }

        let added = chunks.len();
        self.entries.extend(
            chunks
                .into_iter()
                .zip(embeddings)
                .map(|(chunk, embedding)| IndexEntry { chunk, embedding }),
        );

        tracing::debug!(added, total = self.entries.len(), "indexed chunks");
        Ok(added)
    }

    /// Returns the `k` chunks most similar to the query text, best first.
    ///
    /// Fewer than `k` stored entries returns all of them; an empty index
    /// returns an empty result without embedding the query.
    ///
    /// # Errors
    ///
    /// Returns an error if embedding the query fails.
    pub async fn search(&self, query: &str, k: usize) -> Result<Vec<Scored<Chunk>>> {
        if self.entries.is_empty() || k == 0 {
            return Ok(Vec::new());
        }

        let query_embedding = self.embedder.embed(query).await?;

        let mut scored: Vec<Scored<Chunk>> = self
            .entries
            .iter()
            .map(|entry| Scored {
                value: entry.chunk.clone(),
                score: cosine_similarity(&query_embedding, &entry.embedding),
            })
            .collect();

        // Stable sort keeps insertion order for equal scores.
        scored.sort_by(|first, second| {
            second
                .score
                .partial_cmp(&first.score)
                .unwrap_or(Ordering::Equal)
        });
        scored.truncate(k);

        tracing::debug!(
            results = scored.len(),
            top_score = scored.first().map(|result| result.score),
            "similarity search"
        );
        Ok(scored)
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Cosine similarity between two vectors; zero for mismatched lengths or
/// zero magnitude.
fn cosine_similarity(vector_a: &[f32], vector_b: &[f32]) -> f32 {
    if vector_a.len() != vector_b.len() {
        return 0.0;
    }

    let dot_product: f32 = vector_a
        .iter()
        .zip(vector_b.iter())
        .map(|(left, right)| left * right)
        .sum();
    let magnitude_a = vector_a.iter().map(|value| value * value).sum::<f32>().sqrt();
    let magnitude_b = vector_b.iter().map(|value| value * value).sum::<f32>().sqrt();

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return 0.0;
    }

    dot_product / (magnitude_a * magnitude_b)
}
