//! Error types for the `docdex` crate.

use thiserror::Error;

/// Errors that can occur while indexing or querying a document collection.
#[derive(Debug, Error)]
pub enum DocdexError {
    /// Configuration that would not terminate or is otherwise nonsensical.
    ///
    /// Raised before any I/O happens, never mid-run.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A source file could not be read.
    ///
    /// Per-file: the indexing pipeline skips the file and continues.
    #[error("Failed to read {path}: {message}")]
    FileRead {
        /// Path of the file that failed to read.
        path: String,
        /// A description of the failure.
        message: String,
    },

    /// Embedding generation failed.
    #[error("Embedding failed for {context}: {message}")]
    Embedding {
        /// Identity of the input that failed: the provider name at the
        /// adapter layer, a `source[chunk_index]` pair or `"query"` once
        /// re-wrapped by a pipeline.
        context: String,
        /// A description of the failure.
        message: String,
    },

    /// The vector store rejected a collection, upsert, or search operation.
    #[error("Vector store error ({backend}): {message}")]
    Store {
        /// The vector store backend that produced the error.
        backend: String,
        /// A description of the failure.
        message: String,
    },
}

/// A convenience result type for docdex operations.
pub type Result<T> = std::result::Result<T, DocdexError>;
