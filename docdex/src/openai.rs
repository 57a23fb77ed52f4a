//! OpenAI embedding adapter using the OpenAI embeddings API.
//!
//! This module is only available when the `openai` feature is enabled.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::embedding::{Embedder, clamp_to_budget};
use crate::error::{DocdexError, Result};

/// The OpenAI embeddings API endpoint.
const OPENAI_EMBEDDINGS_URL: &str = "https://api.openai.com/v1/embeddings";

/// The default embedding model.
const DEFAULT_MODEL: &str = "text-embedding-3-small";

/// The dimensionality of `text-embedding-3-small` vectors.
const DEFAULT_DIMENSIONS: usize = 1536;

/// An [`Embedder`] backed by the OpenAI embeddings API.
///
/// Calls the `/v1/embeddings` endpoint directly via `reqwest`. Input is
/// truncated to the embedding character budget before submission. The
/// adapter never retries; upstream faults (rate limits, network errors,
/// malformed responses) propagate to the caller as
/// [`DocdexError::Embedding`].
///
/// # Example
///
/// ```rust,ignore
/// use docdex::openai::OpenAiEmbedder;
///
/// let embedder = OpenAiEmbedder::from_env()?;
/// let vector = embedder.embed("general ledger posting").await?;
/// assert_eq!(vector.len(), embedder.dimensions());
/// ```
pub struct OpenAiEmbedder {
    client: reqwest::Client,
    api_key: String,
    model: String,
    dimensions: usize,
}

impl OpenAiEmbedder {
    /// Create a new embedder with the given API key.
    ///
    /// Uses the default model (`text-embedding-3-small`, 1536 dimensions).
    ///
    /// # Errors
    ///
    /// Returns [`DocdexError::Embedding`] if the key is empty.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(DocdexError::Embedding {
                context: "openai".into(),
                message: "API key must not be empty".into(),
            });
        }

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            model: DEFAULT_MODEL.into(),
            dimensions: DEFAULT_DIMENSIONS,
        })
    }

    /// Create a new embedder from the `OPENAI_API_KEY` environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`DocdexError::Embedding`] if the variable is not set.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| DocdexError::Embedding {
            context: "openai".into(),
            message: "OPENAI_API_KEY environment variable not set".into(),
        })?;
        Self::new(api_key)
    }

    /// Set the model name (e.g. `text-embedding-3-large`).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the expected output dimensionality.
    ///
    /// Must match what the configured model actually returns; the value is
    /// used when creating collections in the vector store.
    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = dimensions;
        self
    }

    fn fault(message: impl Into<String>) -> DocdexError {
        DocdexError::Embedding { context: "openai".into(), message: message.into() }
    }
}

// OpenAI API request/response types.

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

#[async_trait]
impl Embedder for OpenAiEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let input = clamp_to_budget(text);
        debug!(model = %self.model, chars = input.chars().count(), "embedding text");

        let request_body = EmbeddingRequest { model: &self.model, input };

        let response = self
            .client
            .post(OPENAI_EMBEDDINGS_URL)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "embedding request failed");
                Self::fault(format!("request failed: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);

            error!(%status, "embedding API error");
            return Err(Self::fault(format!("API returned {status}: {detail}")));
        }

        let embedding_response: EmbeddingResponse = response.json().await.map_err(|e| {
            error!(error = %e, "failed to parse embedding response");
            Self::fault(format!("failed to parse response: {e}"))
        })?;

        embedding_response
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| Self::fault("API returned empty response"))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}
