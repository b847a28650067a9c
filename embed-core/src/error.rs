use cluster::ClusterError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EmbedError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Embedding error: {0}")]
    Embedding(#[source] anyhow::Error),

    #[error("Cluster error: {0}")]
    Cluster(#[from] ClusterError),

    #[error("Input error: {0}")]
    Input(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EmbedError>;
