//! Embedding configuration: trait and env-based implementation.

use anyhow::Result;
use std::env;

/// Model used when `EMBEDDING_MODEL` is not set.
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

/// Embedding service configuration interface.
pub trait EmbeddingConfig: Send + Sync {
    /// API key for the OpenAI-compatible endpoint (OPENAI_API_KEY).
    fn api_key(&self) -> &str;
    /// Optional base URL (OPENAI_BASE_URL). When set, requests go there instead of api.openai.com.
    fn base_url(&self) -> Option<&str>;
    /// Embedding model name (EMBEDDING_MODEL).
    fn model(&self) -> &str;
    /// Requested output length (EMBEDDING_DIMENSIONS); only models that support shortening honor it.
    fn dimensions(&self) -> Option<u32>;
}

/// Embedding config loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvEmbeddingConfig {
    pub api_key: String,
    pub base_url: Option<String>,
    pub model: String,
    pub dimensions: Option<u32>,
}

impl EmbeddingConfig for EnvEmbeddingConfig {
    fn api_key(&self) -> &str {
        &self.api_key
    }
    fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref().filter(|s| !s.is_empty())
    }
    fn model(&self) -> &str {
        &self.model
    }
    fn dimensions(&self) -> Option<u32> {
        self.dimensions
    }
}

impl EnvEmbeddingConfig {
    /// Load from environment variables. Call `dotenvy::dotenv()` first if `.env` should apply.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("OPENAI_API_KEY").unwrap_or_default();
        let base_url = env::var("OPENAI_BASE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty());
        let model = env::var("EMBEDDING_MODEL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string());
        let dimensions = match env::var("EMBEDDING_DIMENSIONS") {
            Ok(raw) if !raw.trim().is_empty() => Some(raw.trim().parse::<u32>().map_err(|e| {
                anyhow::anyhow!("EMBEDDING_DIMENSIONS must be a positive integer, got {:?}: {}", raw, e)
            })?),
            _ => None,
        };
        Ok(Self {
            api_key,
            base_url,
            model,
            dimensions,
        })
    }

    /// Replaces the model (e.g. from a `--model` flag).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Validate config: the API key is required, and dimensions must be non-zero.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            anyhow::bail!("OPENAI_API_KEY is required. Set it in .env or environment.");
        }
        if self.dimensions == Some(0) {
            anyhow::bail!("EMBEDDING_DIMENSIONS must be greater than zero");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_key: &str) -> EnvEmbeddingConfig {
        EnvEmbeddingConfig {
            api_key: api_key.to_string(),
            base_url: Some(String::new()),
            model: DEFAULT_EMBEDDING_MODEL.to_string(),
            dimensions: None,
        }
    }

    #[test]
    fn test_validate_requires_api_key() {
        let err = config("  ").validate().unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
        assert!(config("sk-test").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_dimensions() {
        let mut cfg = config("sk-test");
        cfg.dimensions = Some(0);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_empty_base_url_is_ignored() {
        let cfg = config("sk-test");
        assert_eq!(cfg.base_url(), None);
    }

    #[test]
    fn test_with_model_overrides() {
        let cfg = config("sk-test").with_model("text-embedding-3-large");
        assert_eq!(EmbeddingConfig::model(&cfg), "text-embedding-3-large");
    }
}
