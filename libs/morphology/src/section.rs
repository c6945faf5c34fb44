//! Sections: maximal unbranched runs of samples.

use std::fmt;

use crate::arbor::ArborType;
use crate::sample::Sample;

/// Index of a section inside its morphology's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionId(pub usize);

impl SectionId {
    /// Arena slot of this section.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An ordered run of samples between two branch or terminal points.
///
/// Tree links are owned by the morphology and cannot be edited through a
/// `&mut Section`; operations applied during traversal may only rewrite
/// samples and labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    /// Identifier reported by the morphology source; unique per morphology.
    pub id: u32,
    /// Ordered samples.
    pub samples: Vec<Sample>,
    /// Branch hops from the arbor root, 0-based.
    pub branching_order: u32,
    /// Type of the arbor this section belongs to.
    pub arbor_type: ArborType,
    /// Whether this section continues its parent at a bifurcation. Set by
    /// repair and kept as metadata for downstream meshers; the builders in
    /// this workspace do not read it.
    pub is_primary: bool,
    /// Whether a root section starts at the soma. Non-root sections are
    /// always connected.
    pub connected_to_soma: bool,
    pub(crate) children: Vec<SectionId>,
    pub(crate) parent: Option<SectionId>,
}

impl Section {
    pub(crate) fn new(
        id: u32,
        samples: Vec<Sample>,
        branching_order: u32,
        arbor_type: ArborType,
        parent: Option<SectionId>,
    ) -> Self {
        Self {
            id,
            samples,
            branching_order,
            arbor_type,
            is_primary: true,
            connected_to_soma: true,
            children: Vec::new(),
            parent,
        }
    }

    /// Child sections in stored order.
    pub fn children(&self) -> &[SectionId] {
        &self.children
    }

    /// Parent section, `None` for arbor roots.
    pub fn parent(&self) -> Option<SectionId> {
        self.parent
    }

    /// Returns `true` if the section has at least one child.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Returns `true` if the section is the root of its arbor.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// A section needs two samples to describe a segment.
    pub fn is_valid(&self) -> bool {
        self.samples.len() >= 2
    }

    /// First sample, if any.
    pub fn first_sample(&self) -> Option<&Sample> {
        self.samples.first()
    }

    /// Last sample, if any.
    pub fn last_sample(&self) -> Option<&Sample> {
        self.samples.last()
    }

    /// Path length along the samples.
    ///
    /// # Examples
    /// ```
    /// use glam::DVec3;
    /// use morphology::{ArborType, MorphologyBuilder, Sample, Soma};
    ///
    /// let mut builder = MorphologyBuilder::new("n", Soma::new(DVec3::ZERO, 1.0));
    /// let root = builder.add_root(ArborType::Axon, 0, vec![
    ///     Sample::new(DVec3::ZERO, 1.0),
    ///     Sample::new(DVec3::X * 2.0, 1.0),
    ///     Sample::new(DVec3::X * 5.0, 1.0),
    /// ]).unwrap();
    /// let morphology = builder.build();
    /// assert_eq!(morphology.section(root).unwrap().length(), 5.0);
    /// ```
    pub fn length(&self) -> f64 {
        self.samples
            .windows(2)
            .map(|pair| pair[0].distance(&pair[1]))
            .sum()
    }
}
