//! Qdrant vector index backend.
//!
//! Provides [`QdrantIndex`], a [`VectorIndex`] over the
//! [qdrant-client](https://docs.rs/qdrant-client) gRPC API. Collections are
//! created with cosine distance; each record's payload carries `source`,
//! `content`, and `chunk_index`.
//!
//! This module is only available when the `qdrant` feature is enabled.

use async_trait::async_trait;
use qdrant_client::qdrant::value::Kind;
use qdrant_client::qdrant::{
    CreateCollectionBuilder, Distance, PointStruct, SearchPointsBuilder, UpsertPointsBuilder,
    Value as QdrantValue, VectorParamsBuilder,
};
use qdrant_client::{Payload, Qdrant};
use tracing::debug;

use crate::document::{IndexRecord, RecordPayload, SearchHit};
use crate::error::{DocdexError, Result};
use crate::vectorstore::VectorIndex;

/// A [`VectorIndex`] backed by [Qdrant](https://qdrant.tech/).
///
/// Wraps a [`qdrant_client::Qdrant`] client. Record ids become UUID point
/// ids, payload fields are stored as native Qdrant payload values.
///
/// # Example
///
/// ```rust,ignore
/// use docdex::qdrant::QdrantIndex;
///
/// let index = QdrantIndex::new("http://localhost:6334")?;
/// index.ensure_collection("docs", 1536).await?;
/// ```
pub struct QdrantIndex {
    client: Qdrant,
}

impl QdrantIndex {
    /// Connect to a Qdrant instance at the given URL.
    ///
    /// # Errors
    ///
    /// Returns [`DocdexError::Store`] if the client cannot be constructed.
    pub fn new(url: &str) -> Result<Self> {
        let client = Qdrant::from_url(url).build().map_err(Self::map_err)?;
        Ok(Self { client })
    }

    /// Connect to the default local Qdrant URL (`http://localhost:6334`).
    ///
    /// # Errors
    ///
    /// Returns [`DocdexError::Store`] if the client cannot be constructed.
    pub fn default_url() -> Result<Self> {
        Self::new("http://localhost:6334")
    }

    /// Wrap an existing client.
    pub fn from_client(client: Qdrant) -> Self {
        Self { client }
    }

    fn map_err(e: qdrant_client::QdrantError) -> DocdexError {
        DocdexError::Store { backend: "qdrant".to_string(), message: e.to_string() }
    }

    fn extract_string(value: &QdrantValue) -> Option<String> {
        match &value.kind {
            Some(Kind::StringValue(s)) => Some(s.clone()),
            _ => None,
        }
    }

    fn extract_integer(value: &QdrantValue) -> Option<i64> {
        match &value.kind {
            Some(Kind::IntegerValue(i)) => Some(*i),
            _ => None,
        }
    }
}

#[async_trait]
impl VectorIndex for QdrantIndex {
    async fn ensure_collection(&self, name: &str, dimensions: usize) -> Result<()> {
        let collections = self.client.list_collections().await.map_err(Self::map_err)?;
        let exists = collections.collections.iter().any(|c| c.name == name);
        if exists {
            debug!(collection = name, "qdrant collection already exists, skipping creation");
            return Ok(());
        }

        self.client
            .create_collection(
                CreateCollectionBuilder::new(name)
                    .vectors_config(VectorParamsBuilder::new(dimensions as u64, Distance::Cosine)),
            )
            .await
            .map_err(Self::map_err)?;

        debug!(collection = name, dimensions, "created qdrant collection");
        Ok(())
    }

    async fn upsert(&self, collection: &str, records: &[IndexRecord]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        let points: Vec<PointStruct> = records
            .iter()
            .map(|record| {
                let mut payload_map = serde_json::Map::new();
                payload_map.insert(
                    "source".to_string(),
                    serde_json::Value::String(record.payload.source.clone()),
                );
                payload_map.insert(
                    "content".to_string(),
                    serde_json::Value::String(record.payload.content.clone()),
                );
                payload_map.insert(
                    "chunk_index".to_string(),
                    serde_json::Value::from(record.payload.chunk_index as u64),
                );

                let payload =
                    Payload::try_from(serde_json::Value::Object(payload_map)).unwrap_or_default();

                PointStruct::new(record.id.to_string(), record.vector.clone(), payload)
            })
            .collect();

        self.client
            .upsert_points(UpsertPointsBuilder::new(collection, points).wait(true))
            .await
            .map_err(Self::map_err)?;

        debug!(collection, count = records.len(), "upserted records to qdrant");
        Ok(())
    }

    async fn search(
        &self,
        collection: &str,
        vector: &[f32],
        limit: usize,
    ) -> Result<Vec<SearchHit>> {
        let response = self
            .client
            .search_points(
                SearchPointsBuilder::new(collection, vector.to_vec(), limit as u64)
                    .with_payload(true),
            )
            .await
            .map_err(Self::map_err)?;

        let hits = response
            .result
            .into_iter()
            .map(|scored| {
                let source = scored
                    .payload
                    .get("source")
                    .and_then(Self::extract_string)
                    .unwrap_or_default();
                let content = scored
                    .payload
                    .get("content")
                    .and_then(Self::extract_string)
                    .unwrap_or_default();
                let chunk_index = scored
                    .payload
                    .get("chunk_index")
                    .and_then(Self::extract_integer)
                    .and_then(|i| usize::try_from(i).ok())
                    .unwrap_or_default();

                SearchHit {
                    payload: RecordPayload { source, content, chunk_index },
                    score: scored.score,
                }
            })
            .collect();

        Ok(hits)
    }
}
