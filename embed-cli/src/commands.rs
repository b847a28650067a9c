//! Command handlers. Each writes its result to `out`; logging goes through tracing.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use cluster::{KMeans, Metric, DEFAULT_SEED};
use embed_core::{default_profiles, parse_profiles, EmbedError, Profile};
use embedding::EmbeddingService;

use crate::pipeline::{cluster_profiles, distance_between, embed_profiles};
use crate::table::{render_lengths, render_report};

/// Sentence embedded on its own at the start of the demo.
const DEMO_SENTENCE: &str = "Embeddings turn text into vectors of numbers.";
const DEMO_PAIR: (&str, &str) = (
    "I love programming in Rust.",
    "Writing systems code is my favourite hobby.",
);

pub async fn run_embed(
    service: &dyn EmbeddingService,
    texts: &[String],
    out: &mut dyn Write,
) -> Result<()> {
    let profiles: Vec<Profile> = texts.iter().map(|t| Profile::new(t.as_str())).collect();
    let embedded = embed_profiles(service, &profiles).await?;
    let rows: Vec<(String, usize)> = embedded
        .into_iter()
        .map(|e| (e.profile.text, e.embedding.len()))
        .collect();
    write!(out, "{}", render_lengths(&rows))?;
    Ok(())
}

pub async fn run_distance(
    service: &dyn EmbeddingService,
    a: &str,
    b: &str,
    metric: Metric,
    out: &mut dyn Write,
) -> Result<()> {
    let d = distance_between(service, a, b, metric).await?;
    writeln!(out, "{:.6}", d)?;
    Ok(())
}

/// Reads profiles from `file`, or uses the sample profiles when `None`.
pub fn load_profiles(file: Option<&Path>) -> embed_core::Result<Vec<Profile>> {
    match file {
        Some(path) => parse_profiles(&std::fs::read_to_string(path)?),
        None => Ok(default_profiles()),
    }
}

pub async fn run_cluster(
    service: &dyn EmbeddingService,
    profiles: &[Profile],
    kmeans: &KMeans,
    json: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let report = cluster_profiles(service, profiles, kmeans).await?;
    if json {
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
    } else {
        write!(out, "{}", render_report(&report))?;
    }
    Ok(())
}

/// The walkthrough: one embedding and its length, one Euclidean distance, then k = 2
/// clustering of the sample profiles with a fixed seed.
pub async fn run_demo(service: &dyn EmbeddingService, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "== Embedding a sentence ({})", service.model())?;
    let v = service
        .embed(DEMO_SENTENCE)
        .await
        .map_err(EmbedError::Embedding)
        .context("Embed demo sentence")?;
    writeln!(out, "\"{}\" -> vector of length {}\n", DEMO_SENTENCE, v.len())?;

    writeln!(out, "== Euclidean distance")?;
    let d = distance_between(service, DEMO_PAIR.0, DEMO_PAIR.1, Metric::Euclidean).await?;
    writeln!(out, "\"{}\"\n\"{}\"\ndistance: {:.6}\n", DEMO_PAIR.0, DEMO_PAIR.1, d)?;

    writeln!(out, "== k-means over sample profiles")?;
    let kmeans = KMeans::new(2).with_seed(DEFAULT_SEED);
    run_cluster(service, &default_profiles(), &kmeans, false, out).await
}
