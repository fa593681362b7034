use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A single embedding vector.
pub type Embedding = Vec<f32>;

/// A source document to be ingested into the index.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Raw text content of the document.
    pub text: String,
    /// Arbitrary metadata carried through to every chunk.
    pub metadata: HashMap<String, JsonValue>,
}

impl Document {
    /// Creates a document from text with empty metadata.
    pub fn new<T: Into<String>>(text: T) -> Self {
        Self {
            text: text.into(),
            metadata: HashMap::new(),
        }
    }

    /// Attaches metadata to the document.
    #[must_use]
    pub fn with_metadata(mut self, metadata: HashMap<String, JsonValue>) -> Self {
        self.metadata = metadata;
        self
    }
}

/// A bounded-length slice of a source document, the unit of retrieval.
///
/// Chunks are immutable once created and owned by the vector index after
/// ingestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// Text content of the chunk.
    pub text: String,
    /// Metadata inherited from the source document plus the chunk ordinal.
    pub metadata: HashMap<String, JsonValue>,
}

impl Chunk {
    /// Metadata key under which the chunk ordinal is stored.
    pub const ORDINAL_KEY: &'static str = "chunk_index";

    /// Creates a chunk from text with empty metadata.
    pub fn new<T: Into<String>>(text: T) -> Self {
        Self {
            text: text.into(),
            metadata: HashMap::new(),
        }
    }

    /// Creates a chunk inheriting document metadata, recording its ordinal.
    pub fn from_document<T: Into<String>>(text: T, document: &Document, ordinal: usize) -> Self {
        let mut metadata = document.metadata.clone();
        metadata.insert(Self::ORDINAL_KEY.to_owned(), JsonValue::from(ordinal));
        Self {
            text: text.into(),
            metadata,
        }
    }

    /// Returns the chunk ordinal recorded at split time, if present.
    pub fn ordinal(&self) -> Option<usize> {
        self.metadata
            .get(Self::ORDINAL_KEY)
            .and_then(JsonValue::as_u64)
            .map(|value| value as usize)
    }
}

/// A value paired with the similarity score that retrieved it.
#[derive(Debug, Clone)]
pub struct Scored<T> {
    /// The retrieved value.
    pub value: T,
    /// Cosine similarity against the query embedding.
    pub score: f32,
}

/// The final answer produced by the generation stage.
///
/// The text is the model's response verbatim; the remaining fields record
/// provenance for logging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    /// Verbatim text returned by the language model.
    pub text: String,
    /// Identifier of the model that produced the answer.
    pub model: String,
    /// Wall-clock latency of the generation call in milliseconds.
    pub latency_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_inherits_document_metadata() {
        let mut metadata = HashMap::new();
        metadata.insert("source".to_owned(), JsonValue::from("journal"));
        let document = Document::new("some text").with_metadata(metadata);

        let chunk = Chunk::from_document("some", &document, 3);
        assert_eq!(
            chunk.metadata.get("source"),
            Some(&JsonValue::from("journal"))
        );
        assert_eq!(chunk.ordinal(), Some(3));
    }

    #[test]
    fn chunk_without_ordinal() {
        let chunk = Chunk::new("bare");
        assert_eq!(chunk.ordinal(), None);
    }
}
