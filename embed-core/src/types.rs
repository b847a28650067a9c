//! Profiles, embedded profiles and the per-profile cluster assignment rows.

use serde::{Deserialize, Serialize};

use crate::error::{EmbedError, Result};

/// One input string to embed and cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub text: String,
}

impl Profile {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// A profile with the vector returned for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedProfile {
    pub profile: Profile,
    pub embedding: Vec<f32>,
}

/// One row of the results table: position in the profile list, cluster id, text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterAssignment {
    pub index: usize,
    pub cluster: usize,
    pub text: String,
}

/// The five sample profiles clustered by the demo.
pub fn default_profiles() -> Vec<Profile> {
    [
        "Data scientist with five years of experience in machine learning and Python.",
        "Machine learning engineer building NLP models with PyTorch and transformers.",
        "Front-end developer specializing in React, TypeScript and accessible UI.",
        "UX designer focused on user research, wireframes and interactive prototypes.",
        "Statistician working on predictive analytics and data visualization.",
    ]
    .into_iter()
    .map(Profile::new)
    .collect()
}

/// Parses one profile per line. Lines are trimmed; blank lines and `#` comments are skipped.
pub fn parse_profiles(content: &str) -> Result<Vec<Profile>> {
    let profiles: Vec<Profile> = content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(Profile::new)
        .collect();
    if profiles.is_empty() {
        return Err(EmbedError::Input("no profiles found".to_string()));
    }
    Ok(profiles)
}

/// Zips profiles with their labels into table rows. Lengths must match.
pub fn assignments(profiles: &[Profile], labels: &[usize]) -> Result<Vec<ClusterAssignment>> {
    if profiles.len() != labels.len() {
        return Err(EmbedError::Input(format!(
            "{} profiles but {} cluster labels",
            profiles.len(),
            labels.len()
        )));
    }
    Ok(profiles
        .iter()
        .zip(labels)
        .enumerate()
        .map(|(index, (p, &cluster))| ClusterAssignment {
            index,
            cluster,
            text: p.text.clone(),
        })
        .collect())
}
