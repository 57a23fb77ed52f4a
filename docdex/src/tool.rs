//! Retrieval tool surface for outer adapters.
//!
//! [`DocsTool`] packages the query pipeline as two plain callables shaped
//! for a tool-registration layer: a search taking `(query, limit)` and a
//! zero-argument topic listing. Both always return displayable text, so an
//! adapter can hand the strings straight to its transport.

use std::sync::Arc;

use crate::query::QueryPipeline;

/// A documentation retrieval tool over a [`QueryPipeline`].
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use docdex::{DocsTool, QueryPipeline};
///
/// let tool = DocsTool::new(Arc::new(pipeline))
///     .with_topics(vec!["Finance".into(), "Supply Chain".into()]);
///
/// let answer = tool.search_docs("invoice posting", None).await;
/// let topics = tool.list_topics();
/// ```
pub struct DocsTool {
    pipeline: Arc<QueryPipeline>,
    topics: Vec<String>,
}

impl DocsTool {
    /// Create a tool with no topic labels configured.
    pub fn new(pipeline: Arc<QueryPipeline>) -> Self {
        Self { pipeline, topics: Vec::new() }
    }

    /// Set the static list of topic labels reported by
    /// [`list_topics`](DocsTool::list_topics).
    pub fn with_topics(mut self, topics: Vec<String>) -> Self {
        self.topics = topics;
        self
    }

    /// Search the indexed documentation.
    ///
    /// Uses the pipeline's configured default when `limit` is `None`.
    /// Always returns displayable text, never an error.
    pub async fn search_docs(&self, query: &str, limit: Option<usize>) -> String {
        let limit = limit.unwrap_or_else(|| self.pipeline.default_limit());
        self.pipeline.search(query, limit).await
    }

    /// List the configured documentation topics.
    pub fn list_topics(&self) -> String {
        Self::format_topics(&self.topics)
    }

    /// Format a topic list the way [`list_topics`](DocsTool::list_topics)
    /// renders it. Usable without a constructed tool.
    pub fn format_topics(topics: &[String]) -> String {
        if topics.is_empty() {
            return "No documentation topics configured.".to_string();
        }
        let items: Vec<String> = topics.iter().map(|t| format!("- {t}")).collect();
        format!("**Available Documentation Topics:**\n\n{}", items.join("\n"))
    }
}
