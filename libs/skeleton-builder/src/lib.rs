//! # Skeleton Builder
//!
//! Turns a neuron morphology into ordered drawable objects: tubes described
//! by `(position, radius)` polylines, plus optional joint spheres.
//!
//! ## Pipeline
//!
//! ```text
//! Morphology → repair (copy) → policy walk per arbor → GeometrySink
//!                                   │
//!                                   └─ polyline extraction per section
//! ```
//!
//! ## Modules
//!
//! - [`polyline`]: per-section extraction with soma bridging and repair
//! - [`policy`]: partitioning of an arbor into objects
//! - [`builder`]: full-morphology driver and the connected-polyline collector
//! - [`sink`]: renderer contract, recording sink and ordered queue sink
//! - [`context`]: per-job frame counter, diagnostics and cancellation
//! - [`options`]: serde-loadable configuration
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec3;
//! use morphology::{ArborType, InMemorySource, MorphologyBuilder, Sample, Soma};
//! use skeleton_builder::{reconstruct_skeleton, RecordingSink, SkeletonOptions};
//!
//! let mut builder = MorphologyBuilder::new("cell", Soma::new(DVec3::ZERO, 1.0));
//! builder.add_root(ArborType::Axon, 0, vec![
//!     Sample::new(DVec3::new(0.0, -2.0, 0.0), 0.4),
//!     Sample::new(DVec3::new(0.0, -9.0, 0.0), 0.3),
//! ]).unwrap();
//! let mut source = InMemorySource::default();
//! source.insert(builder.build());
//!
//! let mut sink = RecordingSink::new();
//! let options = SkeletonOptions::from_json(r#"{ "connect_to_soma": true }"#).unwrap();
//! let result = reconstruct_skeleton(&source, "cell", options, &mut sink).unwrap();
//! assert_eq!(result.arbors[0].name, "axon");
//! assert_eq!(sink.records[0].samples()[0].point, DVec3::ZERO);
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod options;
pub mod policy;
pub mod polyline;
pub mod sink;

pub use builder::{connected_polylines, reconstruct_skeleton, SkeletonBuilder, SkeletonReconstruction};
pub use context::{CancellationToken, Diagnostic, ProgressiveFrames, ReconstructionContext};
pub use error::SkeletonError;
pub use options::{ArborOptions, RadiusPolicy, SkeletonOptions};
pub use policy::{ArborReconstruction, ArborStyle, ConstructionPolicy};
pub use polyline::{Polyline, PolylineParams, PolylineSample};
pub use sink::{
    queued_sink, BevelProfile, DrawCommand, DrawRecord, GeometrySink, MaterialId, QueuedSink,
    RecordingSink,
};
