//! # Morphology Errors
//!
//! Error types for building and loading morphologies.

use thiserror::Error;

use crate::arbor::ArborType;
use crate::section::SectionId;

/// Errors that can occur while assembling or loading a morphology.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MorphologyError {
    /// A section index does not belong to the morphology arena.
    #[error("Unknown section: {0}")]
    UnknownSection(SectionId),

    /// A second axon or apical dendrite was added.
    #[error("Morphology already has an {0} arbor")]
    DuplicateArbor(ArborType),

    /// The reader collaborator failed; no partial morphology is used.
    #[error("Failed to load morphology '{label}': {message}")]
    LoadFailed {
        /// Label of the requested morphology.
        label: String,
        /// Reader-provided reason.
        message: String,
    },
}

impl MorphologyError {
    /// Creates a load failure error.
    pub fn load_failed(label: impl Into<String>, message: impl Into<String>) -> Self {
        Self::LoadFailed {
            label: label.into(),
            message: message.into(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
