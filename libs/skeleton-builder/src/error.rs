//! # Skeleton Errors
//!
//! Error types for skeleton construction.
//!
//! ## Error Policy
//!
//! - Geometric problems inside one section are recovered locally: the
//!   section is skipped, the error is logged and recorded as a diagnostic
//! - Load and configuration failures abort the current reconstruction only

use config::constants::ConfigError;
use morphology::MorphologyError;
use thiserror::Error;

/// Errors that can occur while building a morphology skeleton.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SkeletonError {
    /// A section has fewer than two samples.
    #[error("Section {section} has {samples} sample(s), at least two are required")]
    MalformedSection {
        /// Section identifier.
        section: u32,
        /// Number of samples found.
        samples: usize,
    },

    /// Every sample of a section collapsed onto one point during repair.
    #[error("Section {section} collapses to a single point")]
    CollapsedSection {
        /// Section identifier.
        section: u32,
    },

    /// The morphology could not be loaded.
    #[error("Load error: {0}")]
    Load(#[from] MorphologyError),

    /// Options failed validation.
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Options could not be parsed.
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// The reconstruction was cancelled between two section visits.
    #[error("Reconstruction cancelled")]
    Cancelled,
}

impl From<serde_json::Error> for SkeletonError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidOptions(err.to_string())
    }
}

// =============================================================================
// TESTS
// =============================================================================
