//! # embed-core
//!
//! Core types shared by the embedding CLI: profiles, embedded profiles and cluster
//! assignments, the [`EmbedError`] type, and tracing initialization.

pub mod error;
pub mod logger;
pub mod types;

pub use error::{EmbedError, Result};
pub use logger::{init_tracing, DEFAULT_LOG_FILTER};
pub use types::{
    assignments, default_profiles, parse_profiles, ClusterAssignment, EmbeddedProfile, Profile,
};
