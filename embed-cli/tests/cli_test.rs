use clap::Parser;
use cluster::{Init, Metric, DEFAULT_SEED};
use embed_cli::cli::load_config;
use embed_cli::{Cli, Commands, InitArg, MetricArg};
use embed_core::EmbedError;

#[test]
fn test_cluster_defaults() {
    let cli = Cli::try_parse_from(["embclust", "cluster"]).unwrap();
    match cli.command {
        Commands::Cluster {
            k,
            seed,
            init,
            file,
            json,
        } => {
            assert_eq!(k, 2);
            assert_eq!(seed, DEFAULT_SEED);
            assert_eq!(init, InitArg::KMeansPlusPlus);
            assert!(file.is_none());
            assert!(!json);
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn test_cluster_overrides() {
    let cli = Cli::try_parse_from([
        "embclust", "cluster", "-k", "3", "--seed", "7", "--init", "random", "--file",
        "profiles.txt", "--json", "--model", "text-embedding-3-large",
    ])
    .unwrap();
    assert_eq!(cli.model.as_deref(), Some("text-embedding-3-large"));
    match cli.command {
        Commands::Cluster {
            k, seed, init, json, ..
        } => {
            assert_eq!(k, 3);
            assert_eq!(seed, 7);
            assert_eq!(Init::from(init), Init::Random);
            assert!(json);
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn test_init_accepts_k_means_plus_plus() {
    let cli = Cli::try_parse_from(["embclust", "cluster", "--init", "k-means++"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Cluster {
            init: InitArg::KMeansPlusPlus,
            ..
        }
    ));
}

#[test]
fn test_distance_metric() {
    let cli = Cli::try_parse_from(["embclust", "distance", "a", "b", "--metric", "cosine"]).unwrap();
    match cli.command {
        Commands::Distance { a, b, metric } => {
            assert_eq!((a.as_str(), b.as_str()), ("a", "b"));
            assert_eq!(Metric::from(metric), Metric::Cosine);
            assert_ne!(metric, MetricArg::Euclidean);
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn test_embed_requires_text() {
    assert!(Cli::try_parse_from(["embclust", "embed"]).is_err());
    let cli = Cli::try_parse_from(["embclust", "--log-file", "run.log", "embed", "x", "y"]).unwrap();
    assert_eq!(cli.log_file.as_deref(), Some("run.log"));
    assert!(matches!(cli.command, Commands::Embed { ref texts } if texts.len() == 2));
}

/// The only test in this binary that touches the process environment.
#[test]
fn test_load_config_reports_config_errors() {
    std::env::remove_var("EMBEDDING_DIMENSIONS");
    std::env::set_var("OPENAI_API_KEY", "");
    match load_config(None) {
        Err(EmbedError::Config(msg)) => assert!(msg.contains("OPENAI_API_KEY")),
        other => panic!("expected config error, got {:?}", other),
    }

    std::env::set_var("OPENAI_API_KEY", "sk-test");
    std::env::set_var("EMBEDDING_DIMENSIONS", "many");
    assert!(matches!(load_config(None), Err(EmbedError::Config(_))));

    std::env::remove_var("EMBEDDING_DIMENSIONS");
    let config = load_config(Some("text-embedding-3-large".to_string())).unwrap();
    assert_eq!(config.model, "text-embedding-3-large");
    assert_eq!(config.api_key, "sk-test");
}
