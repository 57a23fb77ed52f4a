//! Query pipeline: embed, search, format.
//!
//! [`QueryPipeline`] answers natural-language queries against an indexed
//! collection. Its [`search`](QueryPipeline::search) entry point always
//! returns displayable text: ranked results, a fixed no-results message,
//! or an error string. It never propagates a failure to the caller.

use std::sync::Arc;

use tracing::{error, info};

use crate::config::DocdexConfig;
use crate::document::SearchHit;
use crate::embedding::Embedder;
use crate::error::{DocdexError, Result};
use crate::vectorstore::VectorIndex;

/// Message returned when a query matches nothing.
pub const NO_RESULTS_MESSAGE: &str = "No relevant documentation found.";

/// Characters of chunk content shown per result before truncation.
const CONTENT_PREVIEW_CHARS: usize = 500;

/// Separator line between formatted results.
const RESULT_SEPARATOR: &str = "\n\n---\n\n";

/// The query pipeline.
///
/// Embeds the query through the same adapter the indexer uses (the same
/// input budget applies) and runs a nearest-neighbor search against the
/// configured collection.
pub struct QueryPipeline {
    embedder: Arc<dyn Embedder>,
    index: Arc<dyn VectorIndex>,
    collection: String,
    default_limit: usize,
}

impl QueryPipeline {
    /// Create a query pipeline over the configured collection.
    pub fn new(
        embedder: Arc<dyn Embedder>,
        index: Arc<dyn VectorIndex>,
        config: &DocdexConfig,
    ) -> Self {
        Self {
            embedder,
            index,
            collection: config.collection.clone(),
            default_limit: config.top_k,
        }
    }

    /// The limit used when a caller does not supply one.
    pub fn default_limit(&self) -> usize {
        self.default_limit
    }

    /// Retrieve the `limit` nearest chunks for a query.
    ///
    /// # Errors
    ///
    /// Returns [`DocdexError::Embedding`] if the query cannot be embedded
    /// or [`DocdexError::Store`] if the search fails.
    pub async fn try_search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>> {
        let vector = self.embedder.embed(query).await.map_err(|e| DocdexError::Embedding {
            context: "query".to_string(),
            message: e.to_string(),
        })?;

        let hits = self.index.search(&self.collection, &vector, limit).await?;
        info!(collection = %self.collection, results = hits.len(), "query completed");
        Ok(hits)
    }

    /// Answer a query as a single formatted text block.
    ///
    /// Results carry a 1-based rank, the source path, the similarity score
    /// to two decimals, and the chunk content truncated to 500 characters.
    /// An empty result set yields [`NO_RESULTS_MESSAGE`]; any failure is
    /// converted into an error message string.
    pub async fn search(&self, query: &str, limit: usize) -> String {
        match self.try_search(query, limit).await {
            Ok(hits) if hits.is_empty() => NO_RESULTS_MESSAGE.to_string(),
            Ok(hits) => render_hits(&hits),
            Err(e) => {
                error!(error = %e, "query failed");
                format!("Error searching the documentation index: {e}")
            }
        }
    }
}

/// Format ranked hits into one text block.
fn render_hits(hits: &[SearchHit]) -> String {
    let entries: Vec<String> = hits
        .iter()
        .enumerate()
        .map(|(i, hit)| {
            format!(
                "{}. {} (score: {:.2})\n{}",
                i + 1,
                hit.payload.source,
                hit.score,
                preview(&hit.payload.content)
            )
        })
        .collect();
    entries.join(RESULT_SEPARATOR)
}

/// Truncate content for display, marking the cut with an ellipsis.
fn preview(content: &str) -> String {
    match content.char_indices().nth(CONTENT_PREVIEW_CHARS) {
        Some((byte_pos, _)) => format!("{}...", &content[..byte_pos]),
        None => content.to_string(),
    }
}
