//! Chunk, embed, and index documentation corpora for similarity retrieval.
//!
//! `docdex` turns a directory of text documents into a vector collection
//! and answers natural-language queries against it:
//!
//! - [`FixedSizeChunker`] splits documents into overlapping character
//!   windows, dropping whitespace-only segments.
//! - [`chunk_id`] derives a deterministic record id from
//!   `(source, chunk_index)`, so re-indexing an unchanged corpus upserts
//!   in place instead of duplicating.
//! - [`IndexPipeline`] orchestrates enumerate → read → chunk → embed →
//!   batched commit with per-file error isolation.
//! - [`QueryPipeline`] embeds a query, retrieves the nearest chunks, and
//!   formats them as a single text block that never fails the caller.
//!
//! The embedding service and the vector store are capability traits
//! ([`Embedder`], [`VectorIndex`]); any backend can be substituted behind
//! the same contracts. Bundled backends: [`InMemoryIndex`] (always
//! available), OpenAI embeddings (`openai` feature), and Qdrant
//! (`qdrant` feature).

pub mod chunking;
pub mod config;
pub mod document;
pub mod embedding;
pub mod error;
pub mod identity;
pub mod indexer;
pub mod inmemory;
pub mod query;
pub mod tool;
pub mod vectorstore;
pub mod writer;

#[cfg(feature = "openai")]
pub mod openai;

#[cfg(feature = "qdrant")]
pub mod qdrant;

pub use chunking::{Chunker, FixedSizeChunker};
pub use config::{DocdexConfig, DocdexConfigBuilder};
pub use document::{Chunk, Document, IndexRecord, RecordPayload, SearchHit};
pub use embedding::{EMBED_CHAR_BUDGET, Embedder, clamp_to_budget};
pub use error::{DocdexError, Result};
pub use identity::chunk_id;
pub use indexer::{FileOutcome, IndexPipeline, IndexPipelineBuilder, IndexSummary};
pub use inmemory::InMemoryIndex;
pub use query::{NO_RESULTS_MESSAGE, QueryPipeline};
pub use tool::DocsTool;
pub use vectorstore::VectorIndex;
pub use writer::IndexWriter;

#[cfg(feature = "openai")]
pub use openai::OpenAiEmbedder;

#[cfg(feature = "qdrant")]
pub use qdrant::QdrantIndex;
