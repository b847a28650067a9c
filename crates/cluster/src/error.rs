use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClusterError {
    #[error("No vectors to cluster")]
    EmptyInput,

    #[error("Cluster count must be between 1 and {n} (number of vectors), got {k}")]
    InvalidClusterCount { k: usize, n: usize },

    #[error("Vector dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("Vectors must have at least one dimension")]
    ZeroDimension,
}
