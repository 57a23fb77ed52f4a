//! Indexing pipeline orchestrator.
//!
//! [`IndexPipeline`] drives a full corpus run: enumerate files, chunk each
//! document, embed each retained chunk, and commit records to the vector
//! store in batches. Faults in one file never abort the run; each file's
//! fate is recorded as a [`FileOutcome`] in the returned [`IndexSummary`].
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use docdex::{DocdexConfig, IndexPipeline, InMemoryIndex};
//!
//! let pipeline = IndexPipeline::builder()
//!     .config(DocdexConfig::default())
//!     .embedder(Arc::new(my_embedder))
//!     .index(Arc::new(InMemoryIndex::new()))
//!     .build()?;
//!
//! let summary = pipeline.run().await?;
//! println!("{} chunks from {} files", summary.chunks_indexed(), summary.files_seen());
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};
use walkdir::WalkDir;

use crate::chunking::{Chunker, FixedSizeChunker};
use crate::config::DocdexConfig;
use crate::document::{Document, IndexRecord, RecordPayload};
use crate::embedding::Embedder;
use crate::error::{DocdexError, Result};
use crate::identity::chunk_id;
use crate::vectorstore::VectorIndex;
use crate::writer::IndexWriter;

/// The fate of one corpus file in an indexing run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// The file was read, chunked, and its records buffered for commit.
    Indexed {
        /// Path of the file as enumerated.
        path: PathBuf,
        /// Number of retained chunks.
        chunks: usize,
    },
    /// The file was abandoned after a read or embedding fault.
    Skipped {
        /// Path of the file as enumerated.
        path: PathBuf,
        /// Human-readable reason the file was skipped.
        reason: String,
    },
}

/// Completion report of an indexing run.
#[derive(Debug, Clone)]
pub struct IndexSummary {
    /// The collection records were committed to.
    pub collection: String,
    /// Per-file outcomes in enumeration order.
    pub outcomes: Vec<FileOutcome>,
}

impl IndexSummary {
    /// Total files enumerated and attempted.
    pub fn files_seen(&self) -> usize {
        self.outcomes.len()
    }

    /// Files that were fully indexed.
    pub fn files_indexed(&self) -> usize {
        self.outcomes.iter().filter(|o| matches!(o, FileOutcome::Indexed { .. })).count()
    }

    /// Total chunks committed across all indexed files.
    pub fn chunks_indexed(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| match o {
                FileOutcome::Indexed { chunks, .. } => *chunks,
                FileOutcome::Skipped { .. } => 0,
            })
            .sum()
    }

    /// The files that were skipped, with their reasons.
    pub fn skipped(&self) -> impl Iterator<Item = (&Path, &str)> {
        self.outcomes.iter().filter_map(|o| match o {
            FileOutcome::Skipped { path, reason } => Some((path.as_path(), reason.as_str())),
            FileOutcome::Indexed { .. } => None,
        })
    }
}

/// The indexing pipeline orchestrator.
///
/// Composes a [`Chunker`], an [`Embedder`], and a [`VectorIndex`].
/// Construct one via [`IndexPipeline::builder()`].
pub struct IndexPipeline {
    config: DocdexConfig,
    chunker: Arc<dyn Chunker>,
    embedder: Arc<dyn Embedder>,
    index: Arc<dyn VectorIndex>,
}

impl IndexPipeline {
    /// Create a new [`IndexPipelineBuilder`].
    pub fn builder() -> IndexPipelineBuilder {
        IndexPipelineBuilder::default()
    }

    /// Return a reference to the pipeline configuration.
    pub fn config(&self) -> &DocdexConfig {
        &self.config
    }

    /// Run the pipeline over the configured corpus.
    ///
    /// Ensures the collection exists, then processes files one at a time
    /// in sorted enumeration order. Read and embedding faults skip the
    /// current file and are recorded in the summary; store faults abort
    /// the run, since a silently lost batch would leave holes behind ids
    /// the idempotent scheme considers written.
    ///
    /// # Errors
    ///
    /// Returns [`DocdexError::Store`] if collection creation or a batch
    /// commit fails.
    pub async fn run(&self) -> Result<IndexSummary> {
        self.index
            .ensure_collection(&self.config.collection, self.embedder.dimensions())
            .await?;

        let mut files =
            enumerate_files(&self.config.source_dir, &self.config.file_extension);
        info!(
            dir = %self.config.source_dir.display(),
            files = files.len(),
            "enumerated corpus files"
        );

        if self.config.test_mode {
            files.truncate(self.config.max_docs);
            info!(files = files.len(), "test mode: capped file list");
        }

        let mut writer = IndexWriter::new(
            Arc::clone(&self.index),
            self.config.collection.clone(),
            self.config.batch_size,
        );

        let mut outcomes = Vec::with_capacity(files.len());
        for path in files {
            match self.index_file(&path, &mut writer).await {
                Ok(chunks) => outcomes.push(FileOutcome::Indexed { path, chunks }),
                // A store fault means buffered records were lost; abort.
                Err(e @ DocdexError::Store { .. }) => return Err(e),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping file");
                    outcomes.push(FileOutcome::Skipped { path, reason: e.to_string() });
                }
            }
        }

        writer.flush().await?;

        let summary = IndexSummary { collection: self.config.collection.clone(), outcomes };
        info!(
            collection = %summary.collection,
            files = summary.files_seen(),
            indexed = summary.files_indexed(),
            chunks = summary.chunks_indexed(),
            "indexing run complete"
        );
        Ok(summary)
    }

    /// Read, chunk, embed, and buffer one file. Returns the chunk count.
    async fn index_file(&self, path: &Path, writer: &mut IndexWriter) -> Result<usize> {
        let bytes = std::fs::read(path).map_err(|e| DocdexError::FileRead {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let document = Document {
            source: self.relative_source(path),
            // Best-effort decoding: invalid bytes are replaced, never fatal.
            text: String::from_utf8_lossy(&bytes).into_owned(),
        };

        let chunks = self.chunker.chunk(&document.text);

        for chunk in &chunks {
            let vector = self.embedder.embed(&chunk.text).await.map_err(|e| {
                DocdexError::Embedding {
                    context: format!("{}[{}]", document.source, chunk.index),
                    message: e.to_string(),
                }
            })?;

            writer
                .push(IndexRecord {
                    id: chunk_id(&document.source, chunk.index),
                    vector,
                    payload: RecordPayload {
                        source: document.source.clone(),
                        content: chunk.text.clone(),
                        chunk_index: chunk.index,
                    },
                })
                .await?;
        }

        Ok(chunks.len())
    }

    /// Source identity of a file: its path relative to the corpus root.
    fn relative_source(&self, path: &Path) -> String {
        path.strip_prefix(&self.config.source_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .into_owned()
    }
}

/// Recursively enumerate corpus files by extension, in sorted order.
///
/// Sorting keeps enumeration deterministic, which makes the test-mode cap
/// reproducible across runs.
fn enumerate_files(dir: &Path, extension: &str) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry.path().extension().is_some_and(|ext| ext == extension)
        })
        .map(walkdir::DirEntry::into_path)
        .collect();
    files.sort();
    files
}

/// Builder for constructing an [`IndexPipeline`].
///
/// `config`, `embedder`, and `index` are required; the chunker defaults to
/// a [`FixedSizeChunker`] built from the config's chunk geometry.
#[derive(Default)]
pub struct IndexPipelineBuilder {
    config: Option<DocdexConfig>,
    chunker: Option<Arc<dyn Chunker>>,
    embedder: Option<Arc<dyn Embedder>>,
    index: Option<Arc<dyn VectorIndex>>,
}

impl IndexPipelineBuilder {
    /// Set the run configuration.
    pub fn config(mut self, config: DocdexConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set a custom chunker, overriding the config-derived default.
    pub fn chunker(mut self, chunker: Arc<dyn Chunker>) -> Self {
        self.chunker = Some(chunker);
        self
    }

    /// Set the embedding backend.
    pub fn embedder(mut self, embedder: Arc<dyn Embedder>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    /// Set the vector store backend.
    pub fn index(mut self, index: Arc<dyn VectorIndex>) -> Self {
        self.index = Some(index);
        self
    }

    /// Build the [`IndexPipeline`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`DocdexError::InvalidConfiguration`] if a required field is
    /// missing or the config's chunk geometry is rejected by
    /// [`FixedSizeChunker::new`].
    pub fn build(self) -> Result<IndexPipeline> {
        let config = self.config.ok_or_else(|| {
            DocdexError::InvalidConfiguration("config is required".to_string())
        })?;
        let embedder = self.embedder.ok_or_else(|| {
            DocdexError::InvalidConfiguration("embedder is required".to_string())
        })?;
        let index = self.index.ok_or_else(|| {
            DocdexError::InvalidConfiguration("index is required".to_string())
        })?;
        let chunker: Arc<dyn Chunker> = match self.chunker {
            Some(chunker) => chunker,
            None => Arc::new(FixedSizeChunker::new(config.chunk_size, config.chunk_overlap)?),
        };

        Ok(IndexPipeline { config, chunker, embedder, index })
    }
}
