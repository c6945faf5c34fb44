//! # Morphology
//!
//! Skeleton data model for neuronal morphologies and the operations that walk
//! and repair it.
//!
//! ## Architecture
//!
//! ```text
//! MorphologySource → Morphology (arena of Sections) → repair passes → builders
//! ```
//!
//! A [`Morphology`] owns every [`Section`] of every arbor in a flat arena.
//! Sections refer to each other through [`SectionId`] indices, so traversal
//! code only ever holds indices into the tree while operating.
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec3;
//! use morphology::{ArborType, MorphologyBuilder, Sample, Soma};
//!
//! let mut builder = MorphologyBuilder::new("neuron", Soma::new(DVec3::ZERO, 5.0));
//! let root = builder
//!     .add_root(ArborType::Axon, 0, vec![
//!         Sample::new(DVec3::new(0.0, 6.0, 0.0), 1.0),
//!         Sample::new(DVec3::new(0.0, 16.0, 0.0), 0.8),
//!     ])
//!     .unwrap();
//! let morphology = builder.build();
//! assert!(morphology.section(root).unwrap().is_root());
//! ```

pub mod arbor;
pub mod error;
pub mod morphology;
pub mod repair;
pub mod sample;
pub mod section;
pub mod soma;
pub mod source;
pub mod traversal;

pub use arbor::{Arbor, ArborType};
pub use error::MorphologyError;
pub use morphology::{Morphology, MorphologyBuilder};
pub use repair::BranchingCriterion;
pub use sample::Sample;
pub use section::{Section, SectionId};
pub use soma::Soma;
pub use source::{InMemorySource, MorphologySource};
pub use traversal::{
    apply_to_arbor, apply_to_morphology, arbor_section_ids, visit_arbor, visit_morphology,
};
