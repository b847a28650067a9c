//! Integration tests for the OpenAI embedding service.
//!
//! Tests that call the API are marked `#[ignore]` and need `OPENAI_API_KEY`
//! (e.g. in the repo root `.env`). Run them with
//! `cargo test -p openai-embedding -- --ignored`. Quota/billing errors are treated as skip.

use std::path::Path;

use embedding::{EmbeddingService, EnvEmbeddingConfig};
use openai_embedding::OpenAIEmbedding;

/// Loads `.env` from the workspace root: `crates/embedding/openai-embedding` → `../../../.env`.
fn load_root_env() {
    let root_env = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../.env");
    let _ = dotenvy::from_path(root_env);
}

fn is_quota_or_billing_error(e: &anyhow::Error) -> bool {
    let s = e.to_string();
    s.contains("insufficient_quota")
        || s.contains("quota")
        || s.contains("billing")
        || s.contains("rate_limit")
}

#[tokio::test]
#[ignore] // Requires API key and quota
async fn test_openai_embedding_has_documented_length() {
    load_root_env();
    let api_key = std::env::var("OPENAI_API_KEY")
        .expect("OPENAI_API_KEY environment variable must be set for this test (or set in root .env)");

    let service = OpenAIEmbedding::new(api_key, "text-embedding-3-small".to_string());

    match service.embed("Data scientist with a passion for NLP").await {
        Ok(embedding) => {
            assert_eq!(
                Some(embedding.len()),
                embedding::expected_dimension("text-embedding-3-small")
            );
        }
        Err(e) if is_quota_or_billing_error(&e) => {
            eprintln!("test skipped: OpenAI quota/billing limit ({})", e);
        }
        Err(e) => panic!("OpenAI embed request failed: {}", e),
    }
}

#[tokio::test]
#[ignore]
async fn test_openai_embedding_batch_preserves_order() {
    load_root_env();
    let api_key = std::env::var("OPENAI_API_KEY")
        .expect("OPENAI_API_KEY environment variable must be set for this test (or set in root .env)");

    let service = OpenAIEmbedding::new(api_key, "text-embedding-3-small".to_string());
    let texts = vec![
        "Hello".to_string(),
        "World".to_string(),
        "Goodbye".to_string(),
    ];

    match service.embed_batch(&texts).await {
        Ok(embeddings) => {
            assert_eq!(embeddings.len(), 3);
            let single = service.embed("World").await.expect("single embed");
            let dist: f32 = single
                .iter()
                .zip(&embeddings[1])
                .map(|(a, b)| (a - b).powi(2))
                .sum::<f32>()
                .sqrt();
            assert!(dist < 0.05, "batch item 1 should match single embed of same text");
        }
        Err(e) if is_quota_or_billing_error(&e) => {
            eprintln!("test skipped: OpenAI quota/billing limit ({})", e);
        }
        Err(e) => panic!("OpenAI embed_batch request failed: {}", e),
    }
}

#[tokio::test]
#[ignore]
async fn test_openai_embedding_shortened_dimensions() {
    load_root_env();
    let api_key = std::env::var("OPENAI_API_KEY")
        .expect("OPENAI_API_KEY environment variable must be set for this test (or set in root .env)");

    let service = OpenAIEmbedding::new(api_key, "text-embedding-3-small".to_string())
        .with_dimensions(256);

    match service.embed("Hello world").await {
        Ok(embedding) => assert_eq!(embedding.len(), 256),
        Err(e) if is_quota_or_billing_error(&e) => {
            eprintln!("test skipped: OpenAI quota/billing limit ({})", e);
        }
        Err(e) => panic!("OpenAI embed request failed: {}", e),
    }
}

#[tokio::test]
async fn test_empty_batch_makes_no_request() {
    // Unroutable endpoint: any real request would fail, so success proves nothing was sent.
    let service = OpenAIEmbedding::new_with_base_url(
        "sk-invalid".to_string(),
        "text-embedding-3-small".to_string(),
        Some("http://127.0.0.1:9/v1"),
    );
    let out = service.embed_batch(&[]).await.unwrap();
    assert!(out.is_empty());
}

#[test]
fn test_openai_embedding_defaults() {
    let service = OpenAIEmbedding::with_api_key(String::new());
    assert_eq!(service.model(), "text-embedding-3-small");
    assert_eq!(service.dimensions(), None);
}

#[test]
fn test_openai_embedding_from_config() {
    let config = EnvEmbeddingConfig {
        api_key: "sk-test".to_string(),
        base_url: Some("http://localhost:9/v1".to_string()),
        model: "text-embedding-3-large".to_string(),
        dimensions: Some(512),
    };
    let service = OpenAIEmbedding::from_config(&config);
    assert_eq!(service.model(), "text-embedding-3-large");
    assert_eq!(service.dimensions(), Some(512));
}
