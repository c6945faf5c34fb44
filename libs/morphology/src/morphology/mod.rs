//! # Morphology Tree
//!
//! The morphology owns its soma, its arbors and the arena holding every
//! section of every arbor.
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec3;
//! use morphology::{ArborType, MorphologyBuilder, Sample, Soma};
//!
//! let mut builder = MorphologyBuilder::new("cell", Soma::new(DVec3::ZERO, 2.0));
//! let samples = vec![
//!     Sample::new(DVec3::new(2.0, 0.0, 0.0), 0.5),
//!     Sample::new(DVec3::new(8.0, 0.0, 0.0), 0.5),
//! ];
//! let root = builder.add_root(ArborType::BasalDendrite, 1, samples.clone()).unwrap();
//! builder.add_child(root, 2, samples).unwrap();
//!
//! let morphology = builder.build();
//! assert_eq!(morphology.section_count(), 2);
//! assert_eq!(morphology.basal_dendrites().len(), 1);
//! ```

use crate::arbor::{Arbor, ArborType};
use crate::error::MorphologyError;
use crate::sample::Sample;
use crate::section::{Section, SectionId};
use crate::soma::Soma;

// =============================================================================
// MORPHOLOGY
// =============================================================================

/// A neuron skeleton: soma plus at most one axon, at most one apical dendrite
/// and any number of basal dendrites.
///
/// Cloning a morphology deep-copies the whole tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Morphology {
    label: String,
    soma: Soma,
    sections: Vec<Section>,
    apical_dendrite: Option<Arbor>,
    basal_dendrites: Vec<Arbor>,
    axon: Option<Arbor>,
}

impl Morphology {
    /// Label used to name emitted objects.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The soma.
    pub fn soma(&self) -> &Soma {
        &self.soma
    }

    /// Looks up a section by index.
    pub fn section(&self, id: SectionId) -> Option<&Section> {
        self.sections.get(id.index())
    }

    /// Looks up a section by index for in-place repair.
    pub fn section_mut(&mut self, id: SectionId) -> Option<&mut Section> {
        self.sections.get_mut(id.index())
    }

    /// Every section of every arbor, in arena order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Number of sections in the arena.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// The apical dendrite, if present.
    pub fn apical_dendrite(&self) -> Option<&Arbor> {
        self.apical_dendrite.as_ref()
    }

    /// Basal dendrites in reading order.
    pub fn basal_dendrites(&self) -> &[Arbor] {
        &self.basal_dendrites
    }

    /// The axon, if present.
    pub fn axon(&self) -> Option<&Arbor> {
        self.axon.as_ref()
    }

    /// All arbors in drawing order: apical dendrite, basal dendrites, axon.
    pub fn arbors(&self) -> impl Iterator<Item = &Arbor> + '_ {
        self.apical_dendrite
            .iter()
            .chain(self.basal_dendrites.iter())
            .chain(self.axon.iter())
    }

    pub(crate) fn sections_mut(&mut self) -> &mut [Section] {
        &mut self.sections
    }
}

// =============================================================================
// BUILDER
// =============================================================================

/// Incremental constructor used by morphology readers.
///
/// Children can only be attached to sections that already exist, so the
/// resulting structure is always a forest without cycles or sharing.
#[derive(Debug, Clone)]
pub struct MorphologyBuilder {
    label: String,
    soma: Soma,
    sections: Vec<Section>,
    apical_dendrite: Option<Arbor>,
    basal_dendrites: Vec<Arbor>,
    axon: Option<Arbor>,
}

impl MorphologyBuilder {
    /// Starts a morphology with the given label and soma.
    pub fn new(label: impl Into<String>, soma: Soma) -> Self {
        Self {
            label: label.into(),
            soma,
            sections: Vec::new(),
            apical_dendrite: None,
            basal_dendrites: Vec::new(),
            axon: None,
        }
    }

    /// Adds the root section of a new arbor.
    ///
    /// Fails when a second axon or apical dendrite is added.
    pub fn add_root(
        &mut self,
        arbor_type: ArborType,
        id: u32,
        samples: Vec<Sample>,
    ) -> Result<SectionId, MorphologyError> {
        let slot = match arbor_type {
            ArborType::Axon => Some(&self.axon),
            ArborType::ApicalDendrite => Some(&self.apical_dendrite),
            ArborType::BasalDendrite => None,
        };
        if matches!(slot, Some(Some(_))) {
            return Err(MorphologyError::DuplicateArbor(arbor_type));
        }

        let root = self.push(Section::new(id, samples, 0, arbor_type, None));
        let arbor = Arbor::new(root, arbor_type);
        match arbor_type {
            ArborType::Axon => self.axon = Some(arbor),
            ArborType::ApicalDendrite => self.apical_dendrite = Some(arbor),
            ArborType::BasalDendrite => self.basal_dendrites.push(arbor),
        }
        Ok(root)
    }

    /// Appends a child to an existing section; its branching order is one
    /// more than the parent's.
    pub fn add_child(
        &mut self,
        parent: SectionId,
        id: u32,
        samples: Vec<Sample>,
    ) -> Result<SectionId, MorphologyError> {
        let (order, arbor_type) = self
            .sections
            .get(parent.index())
            .map(|section| (section.branching_order + 1, section.arbor_type))
            .ok_or(MorphologyError::UnknownSection(parent))?;

        let child = self.push(Section::new(id, samples, order, arbor_type, Some(parent)));
        self.sections[parent.index()].children.push(child);
        Ok(child)
    }

    /// Finishes construction.
    pub fn build(self) -> Morphology {
        Morphology {
            label: self.label,
            soma: self.soma,
            sections: self.sections,
            apical_dendrite: self.apical_dendrite,
            basal_dendrites: self.basal_dendrites,
            axon: self.axon,
        }
    }

    fn push(&mut self, section: Section) -> SectionId {
        let id = SectionId(self.sections.len());
        self.sections.push(section);
        id
    }
}
