//! # Text Embeddings
//!
//! This crate defines the embedding service interface used by the clustering CLI.
//!
//! ## EmbeddingService Trait
//!
//! An implementation forwards text to a hosted embedding endpoint and returns the vectors
//! exactly as the endpoint produced them. It does not cache, retry or normalize.
//!
//! ## Example Usage
//!
//! ```rust
//! use embedding::EmbeddingService;
//!
//! async fn example(service: &dyn EmbeddingService) -> Result<(), anyhow::Error> {
//!     let embedding = service.embed("Data scientist with a passion for NLP").await?;
//!     println!("Embedding dimension: {}", embedding.len());
//!
//!     let profiles = vec![
//!         "Backend engineer, Rust and Go".to_string(),
//!         "Product designer, loves typography".to_string(),
//!     ];
//!     let embeddings = service.embed_batch(&profiles).await?;
//!     assert_eq!(embeddings.len(), profiles.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Dimensionality
//!
//! Every vector produced by one model has the same length. [`expected_dimension`] lists the
//! documented lengths of the models this workspace knows about.

use async_trait::async_trait;

mod config;
pub use config::{EmbeddingConfig, EnvEmbeddingConfig, DEFAULT_EMBEDDING_MODEL};

/// Service for generating text embeddings.
#[async_trait]
pub trait EmbeddingService: Send + Sync {
    /// Generates an embedding vector for a single text string.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, anyhow::Error>;

    /// Generates embedding vectors for multiple texts in a single API call.
    /// Output order matches input order.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, anyhow::Error>;

    /// Model identifier sent with each request.
    fn model(&self) -> &str;
}

/// Documented output length for a known embedding model, `None` when unknown.
pub fn expected_dimension(model: &str) -> Option<usize> {
    match model {
        "text-embedding-3-small" => Some(1536),
        "text-embedding-3-large" => Some(3072),
        "text-embedding-ada-002" => Some(1536),
        _ => None,
    }
}
