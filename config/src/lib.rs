//! # Config Crate
//!
//! Centralized configuration constants for the neuron skeleton pipeline.
//! Every magic number used while turning a morphology skeleton into polylines
//! or metaball chains is defined here, so the builder crates stay free of
//! scattered literals.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{DEGENERATE_SEGMENT_LENGTH, META_RADIUS_SCALE};
//!
//! let segment_length = 0.0005;
//! assert!(segment_length < DEGENERATE_SEGMENT_LENGTH);
//!
//! let scaled = 2.0 * META_RADIUS_SCALE;
//! assert!(scaled > 2.0);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Reference Parity**: Calibration values reproduce the reference renderer
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;
