//! # Meta Builder
//!
//! Metaball-chain reconstruction of neuron morphologies.
//!
//! Every segment of the skeleton is approximated by overlapping spheres
//! whose spacing adapts to the local radius, so the blended implicit
//! surface stays continuous across bifurcations. The soma is grown towards
//! each arbor root by the same marcher.
//!
//! ## Modules
//!
//! - [`marcher`]: adaptive-step sphere placement along one segment
//! - [`skeleton`]: element accumulation and the finished [`MetaObject`]
//! - [`builder`]: full-morphology driver
//! - [`options`]: serde-loadable configuration

pub mod builder;
pub mod error;
pub mod marcher;
pub mod options;
pub mod skeleton;

pub use builder::{reconstruct_meta, MetaBuilder};
pub use error::MetaError;
pub use marcher::march_segment;
pub use options::{ArborSampling, MetaOptions};
pub use skeleton::{MetaElement, MetaObject, MetaSkeleton};
