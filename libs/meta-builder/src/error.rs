//! # Meta Builder Errors

use config::constants::ConfigError;
use morphology::MorphologyError;
use skeleton_builder::SkeletonError;
use thiserror::Error;

/// Errors that can occur while building a meta object.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MetaError {
    /// The morphology could not be loaded.
    #[error("Load error: {0}")]
    Load(#[from] MorphologyError),

    /// Polyline collection failed.
    #[error("Skeleton error: {0}")]
    Skeleton(#[from] SkeletonError),

    /// Options failed validation.
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Options could not be parsed.
    #[error("Invalid options: {0}")]
    InvalidOptions(String),
}

impl From<serde_json::Error> for MetaError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidOptions(err.to_string())
    }
}
