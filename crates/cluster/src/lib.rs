//! # cluster
//!
//! Distance functions and k-means clustering over dense `f32` vectors, sized for the
//! handful of profile embeddings the CLI works with.
//!
//! ## Example
//!
//! ```rust
//! use cluster::{euclidean_distance, KMeans};
//!
//! let data = vec![
//!     vec![0.0, 0.0],
//!     vec![0.1, 0.1],
//!     vec![10.0, 10.0],
//!     vec![10.1, 10.1],
//! ];
//!
//! assert_eq!(euclidean_distance(&data[0], &data[0]).unwrap(), 0.0);
//!
//! let labels = KMeans::new(2).with_seed(42).fit_predict(&data).unwrap();
//! assert_eq!(labels, vec![0, 0, 1, 1]);
//! ```

mod distance;
mod error;
mod kmeans;

pub use distance::{cosine_similarity, euclidean_distance, squared_euclidean, Metric};
pub use error::ClusterError;
pub use kmeans::{Init, KMeans, KMeansResult, DEFAULT_SEED};
