//! Seeded k-means (Lloyd's algorithm) with k-means++ or random initialization.
//!
//! Each run assigns every point to its nearest centroid, moves each centroid to the mean of its
//! points, and stops once the total squared centroid shift drops below the tolerance or
//! `max_iter` is reached. All `n_init` runs draw from one [`StdRng`] seeded with `seed`; the
//! run with the lowest inertia wins. Labels are renumbered in order of first
//! appearance, so the first point is always in cluster 0.

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::distance::squared_euclidean;
use crate::error::ClusterError;

/// Seed used when none is given.
pub const DEFAULT_SEED: u64 = 42;

/// Centroid initialization strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Init {
    /// Spread initial centroids by sampling proportional to squared distance.
    #[default]
    KMeansPlusPlus,
    /// Pick `k` distinct points uniformly.
    Random,
}

/// K-means configuration. Build with [`KMeans::new`] and the `with_*` methods.
#[derive(Debug, Clone, PartialEq)]
pub struct KMeans {
    n_clusters: usize,
    init: Init,
    seed: u64,
    max_iter: usize,
    tol: f32,
    n_init: usize,
}

/// Outcome of [`KMeans::fit`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KMeansResult {
    /// Cluster id per input vector, same order as the input.
    pub labels: Vec<usize>,
    /// One centroid per cluster, indexed by cluster id.
    pub centroids: Vec<Vec<f32>>,
    /// Sum of squared distances from each point to its centroid.
    pub inertia: f32,
    /// Lloyd iterations used by the winning run.
    pub iterations: usize,
}

impl KMeans {
    pub fn new(n_clusters: usize) -> Self {
        Self {
            n_clusters,
            init: Init::default(),
            seed: DEFAULT_SEED,
            max_iter: 300,
            tol: 1e-4,
            n_init: 10,
        }
    }

    pub fn with_init(mut self, init: Init) -> Self {
        self.init = init;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter.max(1);
        self
    }

    /// Convergence tolerance, relative to the mean per-feature variance of the data.
    pub fn with_tol(mut self, tol: f32) -> Self {
        self.tol = tol.max(0.0);
        self
    }

    pub fn with_n_init(mut self, n_init: usize) -> Self {
        self.n_init = n_init.max(1);
        self
    }

    pub fn n_clusters(&self) -> usize {
        self.n_clusters
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Clusters `data` and returns labels, centroids and inertia.
    ///
    /// # Errors
    ///
    /// Empty input, zero-length vectors, vectors of differing length, or a cluster count
    /// outside `1..=data.len()`.
    pub fn fit(&self, data: &[Vec<f32>]) -> Result<KMeansResult, ClusterError> {
        let dim = validate(data, self.n_clusters)?;
        let tol = self.tol * mean_variance(data, dim);
        let mut rng = StdRng::seed_from_u64(self.seed);

        let mut best: Option<KMeansResult> = None;
        for run in 0..self.n_init {
            let centroids = match self.init {
                Init::KMeansPlusPlus => init_plus_plus(data, self.n_clusters, &mut rng),
                Init::Random => init_random(data, self.n_clusters, &mut rng),
            };
            let result = lloyd(data, centroids, self.max_iter, tol);
            debug!(
                run,
                inertia = result.inertia,
                iterations = result.iterations,
                "k-means run finished"
            );
            if best.as_ref().map_or(true, |b| result.inertia < b.inertia) {
                best = Some(result);
            }
        }

        // n_init >= 1, so a run always happened.
        let best = best.ok_or(ClusterError::EmptyInput)?;
        Ok(canonicalize(best))
    }

    /// Convenience wrapper returning only the labels.
    pub fn fit_predict(&self, data: &[Vec<f32>]) -> Result<Vec<usize>, ClusterError> {
        Ok(self.fit(data)?.labels)
    }
}

impl KMeansResult {
    /// Assigns each point to the nearest fitted centroid.
    pub fn predict(&self, points: &[Vec<f32>]) -> Result<Vec<usize>, ClusterError> {
        let dim = self.centroids.first().map(|c| c.len()).unwrap_or(0);
        points
            .iter()
            .map(|p| {
                if p.len() != dim {
                    return Err(ClusterError::DimensionMismatch {
                        expected: dim,
                        got: p.len(),
                    });
                }
                Ok(nearest(p, &self.centroids).0)
            })
            .collect()
    }

    /// Number of points in each cluster, indexed by cluster id.
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.centroids.len()];
        for &label in &self.labels {
            sizes[label] += 1;
        }
        sizes
    }
}

fn validate(data: &[Vec<f32>], k: usize) -> Result<usize, ClusterError> {
    let first = data.first().ok_or(ClusterError::EmptyInput)?;
    let dim = first.len();
    if dim == 0 {
        return Err(ClusterError::ZeroDimension);
    }
    if let Some(bad) = data.iter().find(|v| v.len() != dim) {
        return Err(ClusterError::DimensionMismatch {
            expected: dim,
            got: bad.len(),
        });
    }
    if k == 0 || k > data.len() {
        return Err(ClusterError::InvalidClusterCount { k, n: data.len() });
    }
    Ok(dim)
}

fn mean_variance(data: &[Vec<f32>], dim: usize) -> f32 {
    let n = data.len() as f64;
    let mut total = 0.0f64;
    for j in 0..dim {
        let mean = data.iter().map(|v| v[j] as f64).sum::<f64>() / n;
        total += data
            .iter()
            .map(|v| {
                let d = v[j] as f64 - mean;
                d * d
            })
            .sum::<f64>()
            / n;
    }
    (total / dim as f64) as f32
}

/// Index of the closest centroid and the squared distance to it.
fn nearest(point: &[f32], centroids: &[Vec<f32>]) -> (usize, f32) {
    let mut best = (0, f32::INFINITY);
    for (i, c) in centroids.iter().enumerate() {
        let d = squared_euclidean(point, c);
        if d < best.1 {
            best = (i, d);
        }
    }
    best
}

fn init_random(data: &[Vec<f32>], k: usize, rng: &mut StdRng) -> Vec<Vec<f32>> {
    rand::seq::index::sample(rng, data.len(), k)
        .into_iter()
        .map(|i| data[i].clone())
        .collect()
}

fn init_plus_plus(data: &[Vec<f32>], k: usize, rng: &mut StdRng) -> Vec<Vec<f32>> {
    let mut centroids = Vec::with_capacity(k);
    centroids.push(data[rng.random_range(0..data.len())].clone());

    let mut closest: Vec<f64> = data
        .iter()
        .map(|p| squared_euclidean(p, &centroids[0]) as f64)
        .collect();

    while centroids.len() < k {
        let total: f64 = closest.iter().sum();
        let pick = if total <= 0.0 {
            // Every point already sits on a centroid (duplicates).
            rng.random_range(0..data.len())
        } else {
            let mut target = rng.random::<f64>() * total;
            let mut chosen = data.len() - 1;
            for (i, d) in closest.iter().enumerate() {
                if target < *d {
                    chosen = i;
                    break;
                }
                target -= d;
            }
            chosen
        };

        let centroid = data[pick].clone();
        for (slot, p) in closest.iter_mut().zip(data) {
            let d = squared_euclidean(p, &centroid) as f64;
            if d < *slot {
                *slot = d;
            }
        }
        centroids.push(centroid);
    }
    centroids
}

fn lloyd(data: &[Vec<f32>], mut centroids: Vec<Vec<f32>>, max_iter: usize, tol: f32) -> KMeansResult {
    let k = centroids.len();
    let dim = centroids[0].len();
    let mut labels = vec![0usize; data.len()];
    let mut iterations = 0;

    for _ in 0..max_iter {
        iterations += 1;

        let mut dists = vec![0f32; data.len()];
        for (i, p) in data.iter().enumerate() {
            let (label, d) = nearest(p, &centroids);
            labels[i] = label;
            dists[i] = d;
        }

        let mut sums = vec![vec![0f64; dim]; k];
        let mut counts = vec![0usize; k];
        for (p, &label) in data.iter().zip(&labels) {
            counts[label] += 1;
            for (s, x) in sums[label].iter_mut().zip(p) {
                *s += *x as f64;
            }
        }

        let mut next: Vec<Vec<f32>> = sums
            .iter()
            .zip(&counts)
            .map(|(s, &c)| {
                if c == 0 {
                    Vec::new()
                } else {
                    s.iter().map(|x| (x / c as f64) as f32).collect()
                }
            })
            .collect();

        // Empty clusters take the points farthest from their current centroid.
        let mut taken = vec![false; data.len()];
        for cluster in 0..k {
            if counts[cluster] > 0 {
                continue;
            }
            let far = dists
                .iter()
                .enumerate()
                .filter(|(i, _)| !taken[*i])
                .max_by(|a, b| a.1.total_cmp(b.1))
                .map(|(i, _)| i)
                .unwrap_or(0);
            taken[far] = true;
            dists[far] = 0.0;
            next[cluster] = data[far].clone();
        }

        let shift: f32 = centroids
            .iter()
            .zip(&next)
            .map(|(old, new)| squared_euclidean(old, new))
            .sum();
        centroids = next;

        if shift <= tol {
            break;
        }
    }

    let mut inertia = 0f32;
    for (i, p) in data.iter().enumerate() {
        let (label, d) = nearest(p, &centroids);
        labels[i] = label;
        inertia += d;
    }

    KMeansResult {
        labels,
        centroids,
        inertia,
        iterations,
    }
}

/// Renumbers clusters by first appearance in `labels`.
fn canonicalize(result: KMeansResult) -> KMeansResult {
    let k = result.centroids.len();
    let mut mapping: Vec<Option<usize>> = vec![None; k];
    let mut next_id = 0;
    for &label in &result.labels {
        if mapping[label].is_none() {
            mapping[label] = Some(next_id);
            next_id += 1;
        }
    }
    // Clusters that ended up without points keep their relative order at the end.
    for slot in mapping.iter_mut() {
        if slot.is_none() {
            *slot = Some(next_id);
            next_id += 1;
        }
    }
    let mapping: Vec<usize> = mapping.into_iter().flatten().collect();

    let mut centroids = vec![Vec::new(); k];
    for (old, centroid) in result.centroids.into_iter().enumerate() {
        centroids[mapping[old]] = centroid;
    }

    KMeansResult {
        labels: result.labels.iter().map(|&l| mapping[l]).collect(),
        centroids,
        inertia: result.inertia,
        iterations: result.iterations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_errors() {
        assert_eq!(validate(&[], 1), Err(ClusterError::EmptyInput));
        assert_eq!(validate(&[vec![]], 1), Err(ClusterError::ZeroDimension));
        assert_eq!(
            validate(&[vec![1.0, 2.0], vec![1.0]], 1),
            Err(ClusterError::DimensionMismatch { expected: 2, got: 1 })
        );
        assert_eq!(
            validate(&[vec![1.0]], 2),
            Err(ClusterError::InvalidClusterCount { k: 2, n: 1 })
        );
        assert_eq!(
            validate(&[vec![1.0]], 0),
            Err(ClusterError::InvalidClusterCount { k: 0, n: 1 })
        );
        assert_eq!(validate(&[vec![1.0, 2.0]], 1), Ok(2));
    }

    #[test]
    fn test_canonicalize_orders_by_first_appearance() {
        let result = KMeansResult {
            labels: vec![2, 2, 0, 1],
            centroids: vec![vec![0.0], vec![1.0], vec![2.0]],
            inertia: 0.0,
            iterations: 1,
        };
        let c = canonicalize(result);
        assert_eq!(c.labels, vec![0, 0, 1, 2]);
        assert_eq!(c.centroids, vec![vec![2.0], vec![0.0], vec![1.0]]);
    }

    #[test]
    fn test_plus_plus_picks_distinct_points() {
        let data = vec![vec![0.0], vec![5.0], vec![10.0]];
        let mut rng = StdRng::seed_from_u64(7);
        let centroids = init_plus_plus(&data, 3, &mut rng);
        let mut picked: Vec<f32> = centroids.iter().map(|c| c[0]).collect();
        picked.sort_by(f32::total_cmp);
        assert_eq!(picked, vec![0.0, 5.0, 10.0]);
    }

    #[test]
    fn test_plus_plus_handles_duplicates() {
        let data = vec![vec![1.0, 1.0]; 4];
        let mut rng = StdRng::seed_from_u64(1);
        let centroids = init_plus_plus(&data, 2, &mut rng);
        assert_eq!(centroids.len(), 2);
    }

    #[test]
    fn test_convergence_is_scale_invariant() {
        let data: Vec<Vec<f32>> = [0.0, 1.0, 2.0, 3.0, 7.0, 8.0, 9.0, 20.0, 21.0]
            .iter()
            .map(|&x| vec![x, x * 0.5])
            .collect();
        // Power-of-two scaling is exact in f32, so every step scales identically.
        let scaled: Vec<Vec<f32>> = data
            .iter()
            .map(|v| v.iter().map(|x| x / 1024.0).collect())
            .collect();

        let kmeans = KMeans::new(3).with_seed(3).with_n_init(1);
        let a = kmeans.fit(&data).unwrap();
        let b = kmeans.fit(&scaled).unwrap();
        assert_eq!(a.labels, b.labels);
        assert_eq!(a.iterations, b.iterations);
    }

    #[test]
    fn test_mean_variance() {
        let data = vec![vec![0.0, 1.0], vec![2.0, 1.0]];
        // Feature 0 variance 1, feature 1 variance 0.
        assert!((mean_variance(&data, 2) - 0.5).abs() < 1e-6);
    }
}
