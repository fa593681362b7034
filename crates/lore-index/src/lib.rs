//! Document splitting and in-memory vector retrieval.
//!
//! This crate turns raw documents into overlapping chunks and stores their
//! embeddings in an append-only, in-memory index that supports cosine
//! similarity search.

/// Recursive character splitting of documents into overlapping chunks.
pub mod splitter;
/// In-memory vector index with cosine similarity search.
pub mod store;

pub use splitter::DocumentSplitter;
pub use store::VectorIndex;
