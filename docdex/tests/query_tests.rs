//! Query pipeline and tool surface tests.

use std::sync::Arc;

use docdex::document::{IndexRecord, RecordPayload};
use docdex::embedding::Embedder;
use docdex::error::{DocdexError, Result};
use docdex::identity::chunk_id;
use docdex::inmemory::InMemoryIndex;
use docdex::query::{NO_RESULTS_MESSAGE, QueryPipeline};
use docdex::vectorstore::VectorIndex;
use docdex::{DocdexConfig, DocsTool};

/// Embeds every input to the same fixed vector, so stored records with
/// hand-picked vectors produce exact, predictable scores.
struct ConstEmbedder {
    vector: Vec<f32>,
}

#[async_trait::async_trait]
impl Embedder for ConstEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Ok(self.vector.clone())
    }

    fn dimensions(&self) -> usize {
        self.vector.len()
    }
}

struct FailEmbedder;

#[async_trait::async_trait]
impl Embedder for FailEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Err(DocdexError::Embedding {
            context: "mock".to_string(),
            message: "rate limited".to_string(),
        })
    }

    fn dimensions(&self) -> usize {
        4
    }
}

fn record(source: &str, content: &str, vector: Vec<f32>) -> IndexRecord {
    IndexRecord {
        id: chunk_id(source, 0),
        vector,
        payload: RecordPayload {
            source: source.to_string(),
            content: content.to_string(),
            chunk_index: 0,
        },
    }
}

fn config(top_k: usize) -> DocdexConfig {
    DocdexConfig::builder().collection("docs").top_k(top_k).build().unwrap()
}

async fn seeded_index(records: &[IndexRecord]) -> Arc<InMemoryIndex> {
    let index = Arc::new(InMemoryIndex::new());
    index.ensure_collection("docs", 4).await.unwrap();
    index.upsert("docs", records).await.unwrap();
    index
}

#[tokio::test]
async fn empty_collection_yields_the_no_results_message() {
    let index = seeded_index(&[]).await;
    let pipeline =
        QueryPipeline::new(Arc::new(ConstEmbedder { vector: vec![1.0, 0.0, 0.0, 0.0] }), index, &config(5));

    let text = pipeline.search("anything", 5).await;
    assert_eq!(text, NO_RESULTS_MESSAGE);
    assert!(!text.is_empty());
}

#[tokio::test]
async fn results_carry_rank_source_score_and_separator() {
    let index = seeded_index(&[
        record("guides/posting.md", "posting rules", vec![1.0, 0.0, 0.0, 0.0]),
        record("guides/other.md", "other rules", vec![0.7071, 0.7071, 0.0, 0.0]),
    ])
    .await;
    let pipeline =
        QueryPipeline::new(Arc::new(ConstEmbedder { vector: vec![1.0, 0.0, 0.0, 0.0] }), index, &config(5));

    let text = pipeline.search("posting", 5).await;
    assert!(text.starts_with("1. guides/posting.md (score: 1.00)\nposting rules"));
    assert!(text.contains("\n\n---\n\n"));
    assert!(text.contains("2. guides/other.md (score: 0.71)\nother rules"));
}

#[tokio::test]
async fn limit_larger_than_the_collection_returns_all_hits() {
    let index = seeded_index(&[
        record("a.md", "alpha", vec![1.0, 0.0, 0.0, 0.0]),
        record("b.md", "beta", vec![0.0, 1.0, 0.0, 0.0]),
    ])
    .await;
    let pipeline =
        QueryPipeline::new(Arc::new(ConstEmbedder { vector: vec![1.0, 0.0, 0.0, 0.0] }), index, &config(5));

    let hits = pipeline.try_search("invoice posting", 3).await.unwrap();
    assert_eq!(hits.len(), 2);
    assert!(hits[0].score >= hits[1].score);
}

#[tokio::test]
async fn long_content_is_truncated_to_five_hundred_characters() {
    let index =
        seeded_index(&[record("big.md", &"x".repeat(600), vec![1.0, 0.0, 0.0, 0.0])]).await;
    let pipeline =
        QueryPipeline::new(Arc::new(ConstEmbedder { vector: vec![1.0, 0.0, 0.0, 0.0] }), index, &config(5));

    let text = pipeline.search("big", 5).await;
    assert!(text.contains(&format!("{}...", "x".repeat(500))));
    assert!(!text.contains(&"x".repeat(501)));
}

#[tokio::test]
async fn short_content_is_shown_in_full_without_a_marker() {
    let index = seeded_index(&[record("a.md", "short", vec![1.0, 0.0, 0.0, 0.0])]).await;
    let pipeline =
        QueryPipeline::new(Arc::new(ConstEmbedder { vector: vec![1.0, 0.0, 0.0, 0.0] }), index, &config(5));

    let text = pipeline.search("short", 5).await;
    assert_eq!(text, "1. a.md (score: 1.00)\nshort");
}

#[tokio::test]
async fn embedding_failure_becomes_an_error_string() {
    let index = seeded_index(&[]).await;
    let pipeline = QueryPipeline::new(Arc::new(FailEmbedder), index, &config(5));

    let text = pipeline.search("anything", 5).await;
    assert!(text.starts_with("Error searching the documentation index:"));
    assert!(text.contains("query"));
}

#[tokio::test]
async fn store_failure_becomes_an_error_string() {
    // No ensure_collection: the in-memory store rejects the search.
    let index = Arc::new(InMemoryIndex::new());
    let pipeline =
        QueryPipeline::new(Arc::new(ConstEmbedder { vector: vec![1.0, 0.0, 0.0, 0.0] }), index, &config(5));

    let text = pipeline.search("anything", 5).await;
    assert!(text.starts_with("Error searching the documentation index:"));
}

#[tokio::test]
async fn docs_tool_uses_the_configured_default_limit() {
    let index = seeded_index(&[
        record("a.md", "alpha", vec![1.0, 0.0, 0.0, 0.0]),
        record("b.md", "beta", vec![0.0, 1.0, 0.0, 0.0]),
    ])
    .await;
    let pipeline = Arc::new(QueryPipeline::new(
        Arc::new(ConstEmbedder { vector: vec![1.0, 0.0, 0.0, 0.0] }),
        index,
        &config(1),
    ));

    let tool = DocsTool::new(pipeline);
    let text = tool.search_docs("alpha", None).await;
    assert!(text.starts_with("1. "));
    assert!(!text.contains("---"));

    let text = tool.search_docs("alpha", Some(2)).await;
    assert!(text.contains("---"));
}

#[tokio::test]
async fn docs_tool_lists_configured_topics() {
    let index = seeded_index(&[]).await;
    let pipeline = Arc::new(QueryPipeline::new(
        Arc::new(ConstEmbedder { vector: vec![1.0, 0.0, 0.0, 0.0] }),
        index,
        &config(5),
    ));

    let tool = DocsTool::new(pipeline)
        .with_topics(vec!["Finance".to_string(), "Supply Chain".to_string()]);
    let text = tool.list_topics();
    assert!(text.starts_with("**Available Documentation Topics:**"));
    assert!(text.contains("- Finance"));
    assert!(text.contains("- Supply Chain"));
}

#[test]
fn empty_topic_list_has_an_explicit_message() {
    assert_eq!(DocsTool::format_topics(&[]), "No documentation topics configured.");
}
