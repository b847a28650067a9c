//! Distance and similarity between two vectors.

use serde::{Deserialize, Serialize};

use crate::error::ClusterError;

/// Distance metric selectable from the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// L2 norm of the difference.
    #[default]
    Euclidean,
    /// `1 - cosine_similarity`.
    Cosine,
}

impl Metric {
    pub fn distance(&self, a: &[f32], b: &[f32]) -> Result<f32, ClusterError> {
        check_same_len(a, b)?;
        Ok(match self {
            Metric::Euclidean => squared_euclidean(a, b).sqrt(),
            Metric::Cosine => 1.0 - cosine_similarity(a, b),
        })
    }
}

fn check_same_len(a: &[f32], b: &[f32]) -> Result<(), ClusterError> {
    if a.len() != b.len() {
        return Err(ClusterError::DimensionMismatch {
            expected: a.len(),
            got: b.len(),
        });
    }
    Ok(())
}

/// Euclidean distance `||a - b||`. Vectors of different length are rejected.
pub fn euclidean_distance(a: &[f32], b: &[f32]) -> Result<f32, ClusterError> {
    Metric::Euclidean.distance(a, b)
}

/// Squared Euclidean distance over the common prefix. Callers check lengths.
pub fn squared_euclidean(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

/// Cosine similarity between two vectors. Returns 0.0 when either is empty or has zero norm.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}
