//! Embedder trait for generating vector embeddings from text.

use async_trait::async_trait;

use crate::error::Result;

/// Maximum number of characters submitted to an embedding backend.
///
/// Upstream services enforce token limits; adapters truncate their input
/// to this many characters before submission. Truncation is silent and
/// lossy: the resulting embedding reflects only the retained prefix.
pub const EMBED_CHAR_BUDGET: usize = 8000;

/// A capability that turns text into a fixed-length embedding vector.
///
/// Implementations wrap a specific backend behind a unified async
/// interface and are expected to enforce [`EMBED_CHAR_BUDGET`] on their
/// input. Failures surface as [`DocdexError::Embedding`] without internal
/// retries; retry policy belongs to the caller.
///
/// [`DocdexError::Embedding`]: crate::error::DocdexError::Embedding
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Generate an embedding vector for a single text input.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Return the dimensionality of vectors produced by this embedder.
    fn dimensions(&self) -> usize;
}

/// Truncate `text` to at most [`EMBED_CHAR_BUDGET`] characters, on a
/// character boundary.
pub fn clamp_to_budget(text: &str) -> &str {
    match text.char_indices().nth(EMBED_CHAR_BUDGET) {
        Some((byte_pos, _)) => &text[..byte_pos],
        None => text,
    }
}
