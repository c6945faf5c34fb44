//! # Tree Traversal
//!
//! Depth-first application of an operation to every section of an arbor or
//! of a whole morphology.
//!
//! Sections are visited in pre-order: a parent always precedes its
//! descendants and children are visited in their stored order. The walk uses
//! an explicit stack, so arbitrarily deep arbors never grow the call stack.
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec3;
//! use morphology::{apply_to_morphology, ArborType, MorphologyBuilder, Sample, Soma};
//!
//! let mut builder = MorphologyBuilder::new("n", Soma::new(DVec3::ZERO, 1.0));
//! builder.add_root(ArborType::Axon, 0, vec![
//!     Sample::new(DVec3::ZERO, 1.0),
//!     Sample::new(DVec3::X, 1.0),
//! ]).unwrap();
//! let mut morphology = builder.build();
//!
//! apply_to_morphology(&mut morphology, |section| {
//!     for sample in &mut section.samples {
//!         sample.radius *= 2.0;
//!     }
//! });
//! assert_eq!(morphology.sections()[0].samples[0].radius, 2.0);
//! ```

use crate::morphology::Morphology;
use crate::section::{Section, SectionId};

/// Returns the sections of the arbor rooted at `root` in pre-order.
///
/// An absent or unknown root yields an empty list.
pub fn arbor_section_ids(morphology: &Morphology, root: Option<SectionId>) -> Vec<SectionId> {
    let mut order = Vec::new();
    let mut stack: Vec<SectionId> = root.into_iter().collect();

    while let Some(id) = stack.pop() {
        let Some(section) = morphology.section(id) else {
            continue;
        };
        order.push(id);
        stack.extend(section.children().iter().rev().copied());
    }

    order
}

/// Applies `operation` to every section of the arbor rooted at `root`.
///
/// An absent root is a no-op.
pub fn apply_to_arbor<F>(morphology: &mut Morphology, root: Option<SectionId>, mut operation: F)
where
    F: FnMut(&mut Section),
{
    for id in arbor_section_ids(morphology, root) {
        if let Some(section) = morphology.sections_mut().get_mut(id.index()) {
            operation(section);
        }
    }
}

/// Applies `operation` to the apical dendrite, then every basal dendrite in
/// order, then the axon. Missing arbors are skipped.
pub fn apply_to_morphology<F>(morphology: &mut Morphology, mut operation: F)
where
    F: FnMut(&mut Section),
{
    let roots: Vec<SectionId> = morphology.arbors().map(|arbor| arbor.root).collect();
    for root in roots {
        apply_to_arbor(morphology, Some(root), &mut operation);
    }
}

/// Read-only twin of [`apply_to_arbor`].
pub fn visit_arbor<F>(morphology: &Morphology, root: Option<SectionId>, mut visitor: F)
where
    F: FnMut(&Section),
{
    for id in arbor_section_ids(morphology, root) {
        if let Some(section) = morphology.section(id) {
            visitor(section);
        }
    }
}

/// Read-only twin of [`apply_to_morphology`].
pub fn visit_morphology<F>(morphology: &Morphology, mut visitor: F)
where
    F: FnMut(&Section),
{
    for arbor in morphology.arbors() {
        visit_arbor(morphology, Some(arbor.root), &mut visitor);
    }
}
