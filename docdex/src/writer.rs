//! Batched index writer.

use std::sync::Arc;

use tracing::debug;

use crate::document::IndexRecord;
use crate::error::Result;
use crate::vectorstore::VectorIndex;

/// Buffers [`IndexRecord`]s and commits them in fixed-size batches.
///
/// Batching bounds memory during large indexing runs and amortizes store
/// round-trips. Records are flushed through [`VectorIndex::upsert`] every
/// `batch_size` pushes; callers must invoke [`flush`](IndexWriter::flush)
/// once at the end of a run to commit the remainder.
///
/// A failed flush propagates: silently dropping a buffered batch would
/// leave the collection missing records that the deterministic-id scheme
/// assumes were written.
pub struct IndexWriter {
    index: Arc<dyn VectorIndex>,
    collection: String,
    batch_size: usize,
    pending: Vec<IndexRecord>,
    written: usize,
}

impl IndexWriter {
    /// Create a writer committing to `collection` in batches of `batch_size`.
    pub fn new(index: Arc<dyn VectorIndex>, collection: impl Into<String>, batch_size: usize) -> Self {
        Self {
            index,
            collection: collection.into(),
            batch_size,
            pending: Vec::with_capacity(batch_size),
            written: 0,
        }
    }

    /// Buffer one record, flushing if the batch is full.
    ///
    /// # Errors
    ///
    /// Returns [`DocdexError::Store`] if a triggered flush fails.
    ///
    /// [`DocdexError::Store`]: crate::error::DocdexError::Store
    pub async fn push(&mut self, record: IndexRecord) -> Result<()> {
        self.pending.push(record);
        if self.pending.len() >= self.batch_size {
            self.flush().await?;
        }
        Ok(())
    }

    /// Commit all buffered records.
    ///
    /// # Errors
    ///
    /// Returns [`DocdexError::Store`] if the upsert fails; the buffered
    /// records are dropped in that case and the error aborts the run.
    ///
    /// [`DocdexError::Store`]: crate::error::DocdexError::Store
    pub async fn flush(&mut self) -> Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }

        let batch = std::mem::take(&mut self.pending);
        let count = batch.len();
        self.index.upsert(&self.collection, &batch).await?;
        self.written += count;

        debug!(
            collection = %self.collection,
            batch = count,
            total = self.written,
            "flushed record batch"
        );
        Ok(())
    }

    /// Total records committed so far.
    pub fn written(&self) -> usize {
        self.written
    }
}
