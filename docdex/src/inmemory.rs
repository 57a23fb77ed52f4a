//! In-memory vector index using cosine similarity.
//!
//! [`InMemoryIndex`] keeps collections in a `HashMap` behind a
//! `tokio::sync::RwLock`. It exists for tests, demos, and small corpora;
//! persistent deployments use the Qdrant backend.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::document::{IndexRecord, SearchHit};
use crate::error::{DocdexError, Result};
use crate::vectorstore::VectorIndex;

/// An in-memory [`VectorIndex`] scanning all records with cosine similarity.
///
/// Collections are nested maps: collection name to record id to record.
#[derive(Debug, Default)]
pub struct InMemoryIndex {
    collections: RwLock<HashMap<String, HashMap<Uuid, IndexRecord>>>,
}

impl InMemoryIndex {
    /// Create a new empty in-memory index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently stored in a collection.
    ///
    /// Returns `None` if the collection does not exist.
    pub async fn record_count(&self, collection: &str) -> Option<usize> {
        self.collections.read().await.get(collection).map(HashMap::len)
    }

    fn missing(collection: &str) -> DocdexError {
        DocdexError::Store {
            backend: "inmemory".to_string(),
            message: format!("collection '{collection}' does not exist"),
        }
    }
}

/// Compute cosine similarity between two vectors.
///
/// Returns 0.0 if either vector has zero magnitude.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[async_trait]
impl VectorIndex for InMemoryIndex {
    async fn ensure_collection(&self, name: &str, _dimensions: usize) -> Result<()> {
        let mut collections = self.collections.write().await;
        collections.entry(name.to_string()).or_default();
        Ok(())
    }

    async fn upsert(&self, collection: &str, records: &[IndexRecord]) -> Result<()> {
        let mut collections = self.collections.write().await;
        let store = collections.get_mut(collection).ok_or_else(|| Self::missing(collection))?;
        for record in records {
            store.insert(record.id, record.clone());
        }
        Ok(())
    }

    async fn search(
        &self,
        collection: &str,
        vector: &[f32],
        limit: usize,
    ) -> Result<Vec<SearchHit>> {
        let collections = self.collections.read().await;
        let store = collections.get(collection).ok_or_else(|| Self::missing(collection))?;

        let mut hits: Vec<SearchHit> = store
            .values()
            .map(|record| SearchHit {
                payload: record.payload.clone(),
                score: cosine_similarity(&record.vector, vector),
            })
            .collect();

        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        hits.truncate(limit);
        Ok(hits)
    }
}
