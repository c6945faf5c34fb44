//! Morphology source abstractions.
//!
//! File readers (SWC, HDF5, circuit databases) live outside this crate and
//! plug in through [`MorphologySource`]. A failed load is fatal for the
//! reconstruction that requested it.

use std::collections::HashMap;

use crate::error::MorphologyError;
use crate::morphology::Morphology;

/// Anything able to produce a morphology from a label.
///
/// # Examples
/// ```
/// use morphology::{InMemorySource, MorphologySource};
/// let source = InMemorySource::default();
/// assert!(source.load("missing").is_err());
/// ```
pub trait MorphologySource {
    /// Loads the morphology identified by `label`.
    fn load(&self, label: &str) -> Result<Morphology, MorphologyError>;
}

/// In-memory source intended for tests and embedding.
///
/// # Examples
/// ```
/// use glam::DVec3;
/// use morphology::{InMemorySource, MorphologyBuilder, MorphologySource, Soma};
///
/// let mut source = InMemorySource::default();
/// source.insert(MorphologyBuilder::new("cell", Soma::new(DVec3::ZERO, 1.0)).build());
/// assert_eq!(source.load("cell").unwrap().label(), "cell");
/// ```
#[derive(Debug, Default, Clone)]
pub struct InMemorySource {
    morphologies: HashMap<String, Morphology>,
}

impl InMemorySource {
    /// Inserts or replaces a morphology, keyed by its label.
    pub fn insert(&mut self, morphology: Morphology) {
        self.morphologies
            .insert(morphology.label().to_string(), morphology);
    }
}

impl MorphologySource for InMemorySource {
    fn load(&self, label: &str) -> Result<Morphology, MorphologyError> {
        self.morphologies
            .get(label)
            .cloned()
            .ok_or_else(|| MorphologyError::load_failed(label, "no such morphology"))
    }
}
