//! Embedding and clustering steps, one awaited call at a time.

use anyhow::{Context, Result};
use cluster::{KMeans, Metric};
use embed_core::{assignments, ClusterAssignment, EmbedError, EmbeddedProfile, Profile};
use embedding::EmbeddingService;
use serde::Serialize;
use tracing::info;

/// Result of clustering a profile list.
#[derive(Debug, Clone, Serialize)]
pub struct ClusterReport {
    pub model: String,
    pub dimension: usize,
    pub k: usize,
    pub seed: u64,
    pub inertia: f32,
    pub iterations: usize,
    pub cluster_sizes: Vec<usize>,
    pub assignments: Vec<ClusterAssignment>,
}

/// Embeds all profiles in one batch request.
pub async fn embed_profiles(
    service: &dyn EmbeddingService,
    profiles: &[Profile],
) -> Result<Vec<EmbeddedProfile>> {
    let texts: Vec<String> = profiles.iter().map(|p| p.text.clone()).collect();
    let embeddings = service
        .embed_batch(&texts)
        .await
        .map_err(EmbedError::Embedding)
        .context("Embed profiles")?;
    anyhow::ensure!(
        embeddings.len() == profiles.len(),
        "Expected {} embeddings, got {}",
        profiles.len(),
        embeddings.len()
    );
    Ok(profiles
        .iter()
        .cloned()
        .zip(embeddings)
        .map(|(profile, embedding)| EmbeddedProfile { profile, embedding })
        .collect())
}

/// Embeds `a` and `b` and returns the distance between them under `metric`.
pub async fn distance_between(
    service: &dyn EmbeddingService,
    a: &str,
    b: &str,
    metric: Metric,
) -> Result<f32> {
    let va = service
        .embed(a)
        .await
        .map_err(EmbedError::Embedding)
        .context("Embed first text")?;
    let vb = service
        .embed(b)
        .await
        .map_err(EmbedError::Embedding)
        .context("Embed second text")?;
    let d = metric.distance(&va, &vb)?;
    info!(?metric, distance = d, "distance computed");
    Ok(d)
}

/// Embeds the profiles and runs k-means over the vectors.
pub async fn cluster_profiles(
    service: &dyn EmbeddingService,
    profiles: &[Profile],
    kmeans: &KMeans,
) -> Result<ClusterReport> {
    let embedded = embed_profiles(service, profiles).await?;
    let vectors: Vec<Vec<f32>> = embedded.into_iter().map(|e| e.embedding).collect();
    let dimension = vectors.first().map(|v| v.len()).unwrap_or(0);

    let result = kmeans.fit(&vectors).context("Cluster profile embeddings")?;
    info!(
        k = kmeans.n_clusters(),
        inertia = result.inertia,
        iterations = result.iterations,
        "step: k-means done"
    );

    Ok(ClusterReport {
        model: service.model().to_string(),
        dimension,
        k: kmeans.n_clusters(),
        seed: kmeans.seed(),
        inertia: result.inertia,
        iterations: result.iterations,
        cluster_sizes: result.cluster_sizes(),
        assignments: assignments(profiles, &result.labels)?,
    })
}
