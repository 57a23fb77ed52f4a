//! Data types for documents, chunks, and indexed records.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A source document: a named origin plus its raw text.
///
/// Documents are read once per indexing run and are not persisted beyond
/// the records derived from them.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Path of the document relative to the corpus root.
    pub source: String,
    /// The raw text content.
    pub text: String,
}

/// A contiguous segment of a document's text.
///
/// The index is zero-based within the document and assigned after
/// whitespace-only segments have been filtered out, so retained chunks
/// are always numbered `0, 1, 2, ..` with no gaps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Position of this chunk among the document's retained chunks.
    pub index: usize,
    /// The chunk text, at most `chunk_size` characters.
    pub text: String,
}

/// The payload stored alongside each vector in the index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecordPayload {
    /// Path of the originating document relative to the corpus root.
    pub source: String,
    /// The chunk text.
    pub content: String,
    /// Zero-based chunk index within the document.
    pub chunk_index: usize,
}

/// The persisted unit: a deterministic identifier, an embedding vector,
/// and the payload describing where the text came from.
///
/// Records for the same `(source, chunk_index)` pair always carry the same
/// id, so re-indexing an unchanged document overwrites in place.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexRecord {
    /// Deterministic id derived from `(source, chunk_index)`.
    pub id: Uuid,
    /// The embedding vector for the chunk content.
    pub vector: Vec<f32>,
    /// Source, content, and chunk position.
    pub payload: RecordPayload,
}

/// A retrieved record payload paired with its similarity score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    /// The payload of the matching record.
    pub payload: RecordPayload,
    /// Similarity score, higher is more relevant.
    pub score: f32,
}
