//! Arbors: the dendritic and axonal trees attached to the soma.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::section::SectionId;

/// Kind of an arbor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArborType {
    /// The axon; at most one per morphology.
    Axon,
    /// A basal dendrite; any number per morphology.
    BasalDendrite,
    /// The apical dendrite; at most one per morphology.
    ApicalDendrite,
}

impl ArborType {
    /// Prefix used when naming the objects drawn for an arbor of this type.
    ///
    /// # Examples
    /// ```
    /// use morphology::ArborType;
    /// assert_eq!(ArborType::ApicalDendrite.prefix(), "apical_dendrite");
    /// ```
    pub fn prefix(self) -> &'static str {
        match self {
            ArborType::Axon => "axon",
            ArborType::BasalDendrite => "basal_dendrite",
            ArborType::ApicalDendrite => "apical_dendrite",
        }
    }
}

impl fmt::Display for ArborType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ArborType::Axon => "axon",
            ArborType::BasalDendrite => "basal dendrite",
            ArborType::ApicalDendrite => "apical dendrite",
        };
        f.write_str(text)
    }
}

/// A tree of sections identified by its root and type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arbor {
    /// Root section of the tree.
    pub root: SectionId,
    /// Arbor kind.
    pub arbor_type: ArborType,
}

impl Arbor {
    /// Creates an arbor handle.
    pub fn new(root: SectionId, arbor_type: ArborType) -> Self {
        Self { root, arbor_type }
    }
}
