//! Recursive character splitting with overlap.
//!
//! Documents are broken on the most natural boundary available (paragraph,
//! then line, then sentence, then word, then character) into windows of at
//! most `chunk_size` characters, with `chunk_overlap` characters shared
//! between adjacent windows. Splitting is deterministic: identical input
//! always yields an identical chunk sequence.

use std::collections::VecDeque;

use lore_core::{Chunk, Document, Result, SplitterConfig};

/// Boundary separators in decreasing order of preference. The character
/// level is the implicit fallback when none of these occur.
const SEPARATORS: [&str; 4] = ["\n\n", "\n", ". ", " "];

/// Splits documents into overlapping chunks on natural boundaries.
pub struct DocumentSplitter {
    /// Chunk size and overlap parameters.
    config: SplitterConfig,
}

impl DocumentSplitter {
    /// Creates a splitter, validating the configuration up front.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `chunk_overlap` is not strictly
    /// smaller than `chunk_size` or `chunk_size` is zero.
    pub fn new(config: SplitterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Splits a document into chunks carrying the document's metadata plus
    /// their ordinal.
    ///
    /// Any non-empty document produces at least one chunk; an empty document
    /// produces none.
    pub fn split(&self, document: &Document) -> Vec<Chunk> {
        if document.text.is_empty() {
            return Vec::new();
        }

        let pieces = self.atomic_pieces(&document.text, &SEPARATORS);
        let windows = self.pack(pieces);
        tracing::debug!(
            chunks = windows.len(),
            chunk_size = self.config.chunk_size,
            chunk_overlap = self.config.chunk_overlap,
            "split document"
        );

        windows
            .into_iter()
            .enumerate()
            .map(|(ordinal, text)| Chunk::from_document(text, document, ordinal))
            .collect()
    }

    /// Recursively splits text into pieces no longer than `chunk_size`,
    /// preferring the earliest separator that occurs in the text. Separators
    /// stay attached to the preceding piece so that pieces concatenate back
    /// to the original text.
    fn atomic_pieces(&self, text: &str, separators: &[&str]) -> Vec<String> {
        if text.chars().count() <= self.config.chunk_size {
            return vec![text.to_owned()];
        }

        let Some((separator, rest)) = separators.split_first() else {
            return self.char_windows(text);
        };
        if !text.contains(separator) {
            return self.atomic_pieces(text, rest);
        }

        let mut pieces = Vec::new();
        for fragment in text.split_inclusive(separator) {
            if fragment.chars().count() > self.config.chunk_size {
                pieces.extend(self.atomic_pieces(fragment, rest));
            } else {
                pieces.push(fragment.to_owned());
            }
        }
        pieces
    }

    /// Character-level fallback: fixed windows of `chunk_size` characters
    /// advancing by `chunk_size - chunk_overlap`.
    fn char_windows(&self, text: &str) -> Vec<String> {
        let characters: Vec<char> = text.chars().collect();
        let step = self.config.chunk_size - self.config.chunk_overlap;

        let mut windows = Vec::new();
        let mut start = 0;
        while start < characters.len() {
            let end = (start + self.config.chunk_size).min(characters.len());
            windows.push(characters[start..end].iter().collect());
            if end == characters.len() {
                break;
            }
            start += step;
        }
        windows
    }

    /// Packs pieces into chunks of at most `chunk_size` characters, retaining
    /// a tail of at most `chunk_overlap` characters between adjacent chunks.
    fn pack(&self, pieces: Vec<String>) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut window: VecDeque<(String, usize)> = VecDeque::new();
        let mut window_len = 0;

        for piece in pieces {
            let piece_len = piece.chars().count();

            if window_len + piece_len > self.config.chunk_size && !window.is_empty() {
                chunks.push(Self::join(&window));

                // Drop leading pieces until what remains fits both the
                // overlap budget and the incoming piece.
                while window_len > self.config.chunk_overlap
                    || (window_len + piece_len > self.config.chunk_size && window_len > 0)
                {
                    match window.pop_front() {
                        Some((_, dropped_len)) => window_len -= dropped_len,
                        None => break,
                    }
                }
            }

            window_len += piece_len;
            window.push_back((piece, piece_len));
        }

        if !window.is_empty() {
            chunks.push(Self::join(&window));
        }
        chunks
    }

    /// Concatenates the pieces currently in the window.
    fn join(window: &VecDeque<(String, usize)>) -> String {
        window.iter().map(|(text, _)| text.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lore_core::Error;

    fn splitter(chunk_size: usize, chunk_overlap: usize) -> DocumentSplitter {
        DocumentSplitter::new(SplitterConfig {
            chunk_size,
            chunk_overlap,
        })
        .unwrap()
    }

    #[test]
    fn empty_document_produces_no_chunks() {
        let chunks = splitter(100, 20).split(&Document::new(""));
        assert!(chunks.is_empty());
    }

    #[test]
    fn whitespace_only_document_still_produces_a_chunk() {
        let chunks = splitter(100, 20).split(&Document::new("   \n\n  "));
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "   \n\n  ");
    }

    #[test]
    fn short_document_produces_single_chunk() {
        let document = Document::new("Today, I went to the park and saw a dog.");
        let chunks = splitter(1000, 200).split(&document);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, document.text);
        assert_eq!(chunks[0].ordinal(), Some(0));
    }

    #[test]
    fn invalid_overlap_fails_fast() {
        let result = DocumentSplitter::new(SplitterConfig {
            chunk_size: 10,
            chunk_overlap: 10,
        });
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn chunks_respect_size_limit() {
        let text = "one two three four five six seven eight nine ten ".repeat(20);
        let chunks = splitter(80, 16).split(&Document::new(text));
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.text.chars().count() <= 80);
        }
    }

    #[test]
    fn prefers_paragraph_boundaries() {
        let text = format!("{}\n\n{}", "alpha ".repeat(10).trim_end(), "beta ".repeat(10));
        let chunks = splitter(70, 0).split(&Document::new(text));
        assert_eq!(chunks.len(), 2);
        assert!(chunks[0].text.starts_with("alpha"));
        assert!(chunks[1].text.starts_with("beta"));
    }

    #[test]
    fn no_overlap_chunks_concatenate_to_document() {
        let text = "The quick brown fox jumps over the lazy dog. ".repeat(30);
        let chunks = splitter(100, 0).split(&Document::new(text.clone()));
        let reassembled: String = chunks.iter().map(|chunk| chunk.text.as_str()).collect();
        assert_eq!(reassembled, text);
    }

    #[test]
    fn overlap_chunks_reassemble_to_document() {
        let text = "A stitch in time saves nine. Better late than never. \
                    Practice makes perfect. Look before you leap. \
                    Actions speak louder than words. Honesty is the best policy. "
            .repeat(8);
        let chunks = splitter(120, 40).split(&Document::new(text.clone()));
        assert!(chunks.len() > 2);

        // Each chunk after the first starts with a suffix of its predecessor;
        // removing that shared prefix reassembles the document.
        let mut reassembled = chunks[0].text.clone();
        for pair in chunks.windows(2) {
            let previous = &pair[0].text;
            let current = &pair[1].text;
            let shared = (0..=current.len())
                .rev()
                .filter(|&len| current.is_char_boundary(len))
                .find(|&len| previous.ends_with(&current[..len]))
                .unwrap();
            assert!(shared > 0, "adjacent chunks share no overlap");
            reassembled.push_str(&current[shared..]);
        }
        assert_eq!(reassembled, text);
    }

    #[test]
    fn unbroken_text_falls_back_to_character_windows() {
        let text = "x".repeat(250);
        let chunks = splitter(100, 20).split(&Document::new(text));
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.text.chars().count() <= 100);
        }
        // Windows advance by chunk_size - chunk_overlap characters.
        assert_eq!(chunks[0].text.len(), 100);
        assert_eq!(chunks[1].text.len(), 100);
    }

    #[test]
    fn splitting_is_deterministic() {
        let text = "Seasons change. Rivers run. Mountains stand still. ".repeat(12);
        let document = Document::new(text);
        let first: Vec<String> = splitter(90, 30)
            .split(&document)
            .into_iter()
            .map(|chunk| chunk.text)
            .collect();
        let second: Vec<String> = splitter(90, 30)
            .split(&document)
            .into_iter()
            .map(|chunk| chunk.text)
            .collect();
        assert_eq!(first, second);
    }
}
