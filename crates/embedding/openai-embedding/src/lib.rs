//! # OpenAI Embedding Service
//!
//! Implements [`EmbeddingService`] on top of an OpenAI-compatible `/embeddings` endpoint.
//!
//! ## Example
//!
//! ```rust,no_run
//! use openai_embedding::OpenAIEmbedding;
//! use embedding::EmbeddingService;
//!
//! async fn example() -> Result<(), anyhow::Error> {
//!     // An empty key falls back to OPENAI_API_KEY.
//!     let service = OpenAIEmbedding::with_api_key(String::new());
//!     let embedding = service.embed("Hello world").await?;
//!     println!("Embedding dimension: {}", embedding.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! - **API Key**: passed in, or read from `OPENAI_API_KEY` when empty
//! - **Model**: default `text-embedding-3-small`
//! - **Base URL**: optional, for OpenAI-compatible gateways
//! - **Dimensions**: optional shortened output for `text-embedding-3-*`
//!
//! Requests are sent once. Errors, timeouts and short responses are returned to the caller.

use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    types::{CreateEmbeddingRequestArgs, CreateEmbeddingResponse},
    Client,
};
use async_trait::async_trait;
use embedding::{EmbeddingConfig, EmbeddingService, DEFAULT_EMBEDDING_MODEL};
use tracing::{debug, info, instrument, warn};

/// Timeout for a single embed request (connect + request + response).
const EMBED_TIMEOUT: Duration = Duration::from_secs(30);
/// Batch requests carry a larger payload.
const EMBED_BATCH_TIMEOUT: Duration = Duration::from_secs(60);
const LOG_PREVIEW_LEN: usize = 200;

/// OpenAI embedding service. Holds the async-openai client, model name and optional dimensions.
#[derive(Debug, Clone)]
pub struct OpenAIEmbedding {
    client: Client<OpenAIConfig>,
    model: String,
    dimensions: Option<u32>,
}

impl OpenAIEmbedding {
    /// Creates a new OpenAI embedding service.
    ///
    /// * `api_key` - OpenAI API key. If empty, read from OPENAI_API_KEY.
    /// * `model` - e.g. "text-embedding-3-small".
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_base_url(api_key, model, None)
    }

    /// Creates a new service that sends requests to `base_url` when given.
    pub fn new_with_base_url(api_key: String, model: String, base_url: Option<&str>) -> Self {
        let api_key = if api_key.is_empty() {
            std::env::var("OPENAI_API_KEY").unwrap_or_default()
        } else {
            api_key
        };

        let mut openai_config = OpenAIConfig::new().with_api_key(api_key);
        if let Some(url) = base_url.filter(|s| !s.is_empty()) {
            openai_config = openai_config.with_api_base(url);
        }

        Self {
            client: Client::with_config(openai_config),
            model,
            dimensions: None,
        }
    }

    /// Creates a service with the default model.
    pub fn with_api_key(api_key: String) -> Self {
        Self::new(api_key, DEFAULT_EMBEDDING_MODEL.to_string())
    }

    /// Builds a service from any [`EmbeddingConfig`].
    pub fn from_config(config: &dyn EmbeddingConfig) -> Self {
        let service = Self::new_with_base_url(
            config.api_key().to_string(),
            config.model().to_string(),
            config.base_url(),
        );
        match config.dimensions() {
            Some(d) => service.with_dimensions(d),
            None => service,
        }
    }

    /// Sets a different embedding model.
    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    /// Requests shortened vectors of `dimensions` length.
    pub fn with_dimensions(mut self, dimensions: u32) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    /// Requested output length, if any.
    pub fn dimensions(&self) -> Option<u32> {
        self.dimensions
    }

    async fn create(
        &self,
        inputs: Vec<&str>,
        timeout: Duration,
        op: &'static str,
    ) -> Result<CreateEmbeddingResponse, anyhow::Error> {
        let mut args = CreateEmbeddingRequestArgs::default();
        args.model(self.model.clone()).input(inputs);
        if let Some(d) = self.dimensions {
            args.dimensions(d);
        }
        let request = args.build()?;

        let embeddings = self.client.embeddings();
        match tokio::time::timeout(timeout, embeddings.create(request)).await {
            Ok(Ok(r)) => {
                debug!(op, "OpenAI embeddings response received");
                Ok(r)
            }
            Ok(Err(e)) => {
                warn!(op, error = %e, "OpenAI embeddings request failed");
                Err(e.into())
            }
            Err(_) => {
                warn!(op, timeout_secs = timeout.as_secs(), "OpenAI embeddings request timed out");
                Err(anyhow::anyhow!(
                    "OpenAI {} request timed out after {} seconds",
                    op,
                    timeout.as_secs()
                ))
            }
        }
    }
}

fn preview(text: &str) -> String {
    match text.char_indices().nth(LOG_PREVIEW_LEN) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

/// Orders response items by their `index` field and checks the count against `expected`.
fn collect_ordered(
    response: CreateEmbeddingResponse,
    expected: usize,
) -> Result<Vec<Vec<f32>>, anyhow::Error> {
    let mut data = response.data;
    if data.len() != expected {
        warn!(expected, got = data.len(), "OpenAI embed_batch response count mismatch");
        anyhow::bail!("Expected {} embeddings, got {}", expected, data.len());
    }
    data.sort_by_key(|item| item.index);
    Ok(data.into_iter().map(|item| item.embedding).collect())
}

#[async_trait]
impl EmbeddingService for OpenAIEmbedding {
    /// Sends one request with one input and returns the first vector of the response.
    ///
    /// # Errors
    ///
    /// Missing or invalid API key, network failure, timeout, quota errors, or a response
    /// without embedding data.
    #[instrument(skip(self, text), fields(model = %self.model, text_len = text.len()))]
    async fn embed(&self, text: &str) -> Result<Vec<f32>, anyhow::Error> {
        info!(
            model = %self.model,
            text_preview = %preview(text),
            "step: embedding OpenAI embed request"
        );

        let response = self.create(vec![text], EMBED_TIMEOUT, "embed").await?;

        let embedding = match response.data.into_iter().next() {
            Some(item) => item.embedding,
            None => {
                warn!("OpenAI embed response has no embedding data");
                return Err(anyhow::anyhow!("No embedding in response"));
            }
        };

        info!(dimension = embedding.len(), "step: embedding OpenAI embed done");
        Ok(embedding)
    }

    /// Sends all texts in a single request. Empty input returns an empty result without
    /// calling the API.
    #[instrument(skip(self, texts), fields(model = %self.model, batch_size = texts.len()))]
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, anyhow::Error> {
        if texts.is_empty() {
            debug!("OpenAI embed_batch empty input, skipping");
            return Ok(vec![]);
        }

        info!(
            model = %self.model,
            batch_size = texts.len(),
            "step: embedding OpenAI embed_batch request"
        );

        let inputs: Vec<&str> = texts.iter().map(|s| s.as_str()).collect();
        let response = self
            .create(inputs, EMBED_BATCH_TIMEOUT, "embed_batch")
            .await?;
        let embeddings = collect_ordered(response, texts.len())?;

        info!(
            count = embeddings.len(),
            dimension = embeddings.first().map(|v| v.len()).unwrap_or(0),
            "step: embedding OpenAI embed_batch done"
        );
        Ok(embeddings)
    }

    fn model(&self) -> &str {
        &self.model
    }
}
