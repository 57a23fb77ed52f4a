//! Document chunking.
//!
//! This module provides the [`Chunker`] trait and its production
//! implementation, [`FixedSizeChunker`], which splits text by character
//! count with a configurable overlap between consecutive chunks.

use crate::document::Chunk;
use crate::error::{DocdexError, Result};

/// A strategy for splitting document text into indexable chunks.
///
/// Implementations return [`Chunk`]s carrying text and a zero-based index;
/// embeddings are attached later by the indexing pipeline.
pub trait Chunker: Send + Sync {
    /// Split text into chunks.
    ///
    /// Returns an empty `Vec` for empty or whitespace-only input.
    fn chunk(&self, text: &str) -> Vec<Chunk>;
}

/// Splits text into fixed-size chunks by character count with overlap.
///
/// The window advances by `chunk_size - overlap` characters per step.
/// Windows whose trimmed content is empty are dropped, but the window
/// still advances past them, and indices are assigned to the retained
/// chunks sequentially starting at 0.
///
/// Counting is in characters, not bytes, so multi-byte text never splits
/// inside a UTF-8 sequence.
///
/// # Example
///
/// ```rust,ignore
/// use docdex::FixedSizeChunker;
///
/// let chunker = FixedSizeChunker::new(1000, 200)?;
/// let chunks = chunker.chunk(&text);
/// ```
#[derive(Debug, Clone)]
pub struct FixedSizeChunker {
    chunk_size: usize,
    overlap: usize,
}

impl FixedSizeChunker {
    /// Create a new `FixedSizeChunker`.
    ///
    /// # Errors
    ///
    /// Returns [`DocdexError::InvalidConfiguration`] unless
    /// `chunk_size > overlap`. With `overlap >= chunk_size` the window
    /// step would be zero or negative and chunking would never terminate,
    /// so the geometry is refused up front.
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self> {
        if chunk_size <= overlap {
            return Err(DocdexError::InvalidConfiguration(format!(
                "chunk_size ({chunk_size}) must be greater than overlap ({overlap})"
            )));
        }
        Ok(Self { chunk_size, overlap })
    }
}

impl Chunker for FixedSizeChunker {
    fn chunk(&self, text: &str) -> Vec<Chunk> {
        if text.is_empty() {
            return Vec::new();
        }

        let chars: Vec<char> = text.chars().collect();
        // Positive by construction, see `new`.
        let step = self.chunk_size - self.overlap;

        let mut chunks: Vec<Chunk> = Vec::new();
        let mut start = 0;
        while start < chars.len() {
            let end = (start + self.chunk_size).min(chars.len());
            let window: String = chars[start..end].iter().collect();
            if !window.trim().is_empty() {
                chunks.push(Chunk { index: chunks.len(), text: window });
            }
            start += step;
        }

        chunks
    }
}
