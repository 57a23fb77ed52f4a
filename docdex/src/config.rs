//! Configuration for indexing and query runs.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{DocdexError, Result};

/// Run parameters for the indexing and query pipelines.
///
/// One explicit structure instead of process-wide constants, so several
/// collections or corpora can be handled from one process. Construct via
/// [`DocdexConfig::builder()`]; the builder validates chunk geometry and
/// limits before any I/O happens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocdexConfig {
    /// Root directory of the document corpus.
    pub source_dir: PathBuf,
    /// Name of the vector store collection.
    pub collection: String,
    /// Embedding model identifier passed to the embedding backend.
    pub embedding_model: String,
    /// Dimensionality of the embedding vectors.
    pub embedding_dimensions: usize,
    /// Maximum chunk size in characters.
    pub chunk_size: usize,
    /// Characters of overlap between consecutive chunks.
    pub chunk_overlap: usize,
    /// Records buffered before each batched upsert.
    pub batch_size: usize,
    /// Default number of results returned by a query.
    pub top_k: usize,
    /// File extension of corpus documents, without the dot.
    pub file_extension: String,
    /// When set, only the first `max_docs` files are indexed.
    pub test_mode: bool,
    /// Cap on indexed files in test mode.
    pub max_docs: usize,
}

impl Default for DocdexConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("."),
            collection: "docs".to_string(),
            embedding_model: "text-embedding-3-small".to_string(),
            embedding_dimensions: 1536,
            chunk_size: 1000,
            chunk_overlap: 200,
            batch_size: 100,
            top_k: 5,
            file_extension: "md".to_string(),
            test_mode: false,
            max_docs: 10,
        }
    }
}

impl DocdexConfig {
    /// Create a new builder for constructing a [`DocdexConfig`].
    pub fn builder() -> DocdexConfigBuilder {
        DocdexConfigBuilder::default()
    }
}

/// Builder for a validated [`DocdexConfig`].
#[derive(Debug, Clone, Default)]
pub struct DocdexConfigBuilder {
    config: DocdexConfig,
}

impl DocdexConfigBuilder {
    /// Set the corpus root directory.
    pub fn source_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.source_dir = dir.into();
        self
    }

    /// Set the collection name.
    pub fn collection(mut self, name: impl Into<String>) -> Self {
        self.config.collection = name.into();
        self
    }

    /// Set the embedding model identifier.
    pub fn embedding_model(mut self, model: impl Into<String>) -> Self {
        self.config.embedding_model = model.into();
        self
    }

    /// Set the embedding dimensionality.
    pub fn embedding_dimensions(mut self, dimensions: usize) -> Self {
        self.config.embedding_dimensions = dimensions;
        self
    }

    /// Set the maximum chunk size in characters.
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.config.chunk_size = size;
        self
    }

    /// Set the overlap between consecutive chunks in characters.
    pub fn chunk_overlap(mut self, overlap: usize) -> Self {
        self.config.chunk_overlap = overlap;
        self
    }

    /// Set the number of records per batched upsert.
    pub fn batch_size(mut self, size: usize) -> Self {
        self.config.batch_size = size;
        self
    }

    /// Set the default number of query results.
    pub fn top_k(mut self, k: usize) -> Self {
        self.config.top_k = k;
        self
    }

    /// Set the corpus file extension (without the dot).
    pub fn file_extension(mut self, extension: impl Into<String>) -> Self {
        self.config.file_extension = extension.into();
        self
    }

    /// Enable or disable test mode.
    pub fn test_mode(mut self, enabled: bool) -> Self {
        self.config.test_mode = enabled;
        self
    }

    /// Set the maximum number of files indexed in test mode.
    pub fn max_docs(mut self, max: usize) -> Self {
        self.config.max_docs = max;
        self
    }

    /// Build the [`DocdexConfig`], validating that parameters are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`DocdexError::InvalidConfiguration`] if:
    /// - `chunk_overlap >= chunk_size`
    /// - `batch_size == 0`
    /// - `top_k == 0`
    /// - `embedding_dimensions == 0`
    pub fn build(self) -> Result<DocdexConfig> {
        let config = self.config;
        if config.chunk_overlap >= config.chunk_size {
            return Err(DocdexError::InvalidConfiguration(format!(
                "chunk_overlap ({}) must be less than chunk_size ({})",
                config.chunk_overlap, config.chunk_size
            )));
        }
        if config.batch_size == 0 {
            return Err(DocdexError::InvalidConfiguration(
                "batch_size must be greater than zero".to_string(),
            ));
        }
        if config.top_k == 0 {
            return Err(DocdexError::InvalidConfiguration(
                "top_k must be greater than zero".to_string(),
            ));
        }
        if config.embedding_dimensions == 0 {
            return Err(DocdexError::InvalidConfiguration(
                "embedding_dimensions must be greater than zero".to_string(),
            ));
        }
        Ok(config)
    }
}
