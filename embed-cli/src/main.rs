//! embclust: embed text with an OpenAI-compatible API, measure distances, cluster profiles.
//! Config from env (and `.env`) with optional CLI overrides.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use cluster::KMeans;
use embed_cli::cli::load_config;
use embed_cli::commands::{load_profiles, run_cluster, run_demo, run_distance, run_embed};
use embed_cli::{Cli, Commands};
use openai_embedding::OpenAIEmbedding;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    embed_core::init_tracing(cli.log_file.as_deref())?;

    let config = load_config(cli.model)
        .context("Load embedding config from .env (OPENAI_API_KEY, EMBEDDING_MODEL)")?;
    let service = OpenAIEmbedding::from_config(&config);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Embed { texts } => run_embed(&service, &texts, &mut out).await?,
        Commands::Distance { a, b, metric } => {
            run_distance(&service, &a, &b, metric.into(), &mut out).await?
        }
        Commands::Cluster {
            k,
            seed,
            init,
            file,
            json,
        } => {
            let profiles = load_profiles(file.as_deref()).with_context(|| {
                format!(
                    "Load profiles from {}",
                    file.as_deref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "built-in samples".to_string())
                )
            })?;
            let kmeans = KMeans::new(k).with_seed(seed).with_init(init.into());
            run_cluster(&service, &profiles, &kmeans, json, &mut out).await?
        }
        Commands::Demo => run_demo(&service, &mut out).await?,
    }

    out.flush()?;
    Ok(())
}
