//! Vector index trait for storing and searching embedded chunks.

use async_trait::async_trait;

use crate::document::{IndexRecord, SearchHit};
use crate::error::Result;

/// A storage backend holding named collections of vector records with
/// nearest-neighbor search.
///
/// Collections are keyed by record id; `upsert` replaces-or-inserts, so
/// writing a record under an existing id overwrites it. Similarity is
/// cosine for all provided backends.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Create a named collection with the given vector dimensionality.
    ///
    /// Idempotent: a no-op if the collection already exists.
    async fn ensure_collection(&self, name: &str, dimensions: usize) -> Result<()>;

    /// Insert-or-replace records by id.
    async fn upsert(&self, collection: &str, records: &[IndexRecord]) -> Result<()>;

    /// Return the `limit` records nearest to `vector`, ordered by
    /// descending similarity score.
    async fn search(
        &self,
        collection: &str,
        vector: &[f32],
        limit: usize,
    ) -> Result<Vec<SearchHit>>;
}
