//! CLI parser and config loading.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use cluster::{Init, Metric, DEFAULT_SEED};
use embed_core::{EmbedError, Result};
use embedding::EnvEmbeddingConfig;

#[derive(Parser, Debug)]
#[command(name = "embclust")]
#[command(about = "Embed text with an OpenAI-compatible API and cluster it with k-means", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Embedding model (overrides EMBEDDING_MODEL).
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Also append logs to this file.
    #[arg(long, global = true)]
    pub log_file: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Embed each text and print the vector length.
    Embed {
        #[arg(required = true)]
        texts: Vec<String>,
    },
    /// Embed two texts and print the distance between them.
    Distance {
        a: String,
        b: String,
        #[arg(long, value_enum, default_value_t = MetricArg::Euclidean)]
        metric: MetricArg,
    },
    /// Embed profiles and group them with k-means.
    Cluster {
        /// Number of clusters.
        #[arg(short, long, default_value_t = 2)]
        k: usize,
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
        #[arg(long, value_enum, default_value_t = InitArg::KMeansPlusPlus)]
        init: InitArg,
        /// File with one profile per line; defaults to the built-in sample profiles.
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Print the report as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Run the full walkthrough: embed, measure distance, cluster the sample profiles.
    Demo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MetricArg {
    Euclidean,
    Cosine,
}

impl From<MetricArg> for Metric {
    fn from(m: MetricArg) -> Self {
        match m {
            MetricArg::Euclidean => Metric::Euclidean,
            MetricArg::Cosine => Metric::Cosine,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InitArg {
    #[value(name = "k-means++")]
    KMeansPlusPlus,
    Random,
}

impl From<InitArg> for Init {
    fn from(i: InitArg) -> Self {
        match i {
            InitArg::KMeansPlusPlus => Init::KMeansPlusPlus,
            InitArg::Random => Init::Random,
        }
    }
}

/// Loads embedding config from env (OPENAI_API_KEY, OPENAI_BASE_URL, EMBEDDING_MODEL,
/// EMBEDDING_DIMENSIONS). `model` overrides EMBEDDING_MODEL. Failures become
/// [`EmbedError::Config`].
pub fn load_config(model: Option<String>) -> Result<EnvEmbeddingConfig> {
    let config = EnvEmbeddingConfig::from_env().map_err(config_error)?;
    let config = match model {
        Some(m) => config.with_model(m),
        None => config,
    };
    config.validate().map_err(config_error)?;
    Ok(config)
}

fn config_error(e: anyhow::Error) -> EmbedError {
    EmbedError::Config(format!("{:#}", e))
}
