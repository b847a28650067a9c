//! # embed-cli
//!
//! Argument parsing, the embedding/clustering pipeline and table rendering behind the
//! `embclust` binary. Everything that talks to the embedding API goes through
//! `&dyn EmbeddingService`, so the pipeline runs the same against a mock in tests.

pub mod cli;
pub mod commands;
pub mod pipeline;
pub mod table;

pub use cli::{Cli, Commands, InitArg, MetricArg};
pub use pipeline::{cluster_profiles, distance_between, embed_profiles, ClusterReport};
