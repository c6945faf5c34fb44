//! # Geometry Sinks
//!
//! The renderer collaborator receiving finished objects.
//!
//! ## Contract
//!
//! A sink accepts an ordered polyline plus its name, material, bevel profile
//! and caps flag, and returns an opaque handle. Builders never inspect the
//! handle; they only pass it back to the caller in draw order.
//!
//! ## Implementations
//!
//! - [`RecordingSink`]: keeps every request in memory, handles are indices
//! - [`QueuedSink`]: forwards requests over a tokio channel to a consumer
//!   running elsewhere, preserving production order

mod queued;

pub use queued::{queued_sink, DrawCommand, QueuedSink};

use std::path::{Path, PathBuf};

use config::constants::{HARD_EDGES_BEVEL_SIDES, SOFT_EDGES_BEVEL_SIDES};
use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::polyline::Polyline;
use crate::polyline::PolylineSample;

// =============================================================================
// DRAW REQUESTS
// =============================================================================

/// Opaque material reference understood by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaterialId(pub u32);

/// Cross-section profile of the tube swept along a polyline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BevelProfile {
    /// Number of sides of the swept circle.
    pub sides: u32,
}

impl BevelProfile {
    /// Sides for hard-edged arbors with closed caps.
    pub fn hard() -> Self {
        Self {
            sides: HARD_EDGES_BEVEL_SIDES,
        }
    }

    /// Sides for soft-edged arbors that are smoothed afterwards.
    pub fn soft() -> Self {
        Self {
            sides: SOFT_EDGES_BEVEL_SIDES,
        }
    }
}

impl Default for BevelProfile {
    fn default() -> Self {
        Self::hard()
    }
}

/// A tube object to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolylineObject<'a> {
    /// Object name, `<arbor>_<section>` or a segment name.
    pub name: &'a str,
    /// Ordered centerline samples.
    pub samples: &'a [PolylineSample],
    /// Material, if any was configured.
    pub material: Option<MaterialId>,
    /// Tube profile.
    pub bevel: BevelProfile,
    /// Close both tube ends.
    pub caps: bool,
}

/// A sphere placed at a section joint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArticulationObject<'a> {
    /// Object name.
    pub name: &'a str,
    /// Sphere center.
    pub center: DVec3,
    /// Sphere radius.
    pub radius: f64,
    /// Material, if any was configured.
    pub material: Option<MaterialId>,
}

// =============================================================================
// SINK TRAIT
// =============================================================================

/// Receives drawable objects as they are produced.
pub trait GeometrySink {
    /// Handle returned for each created object.
    type Handle;

    /// Creates a tube object.
    fn draw_polyline(&mut self, object: PolylineObject<'_>) -> Self::Handle;

    /// Creates an articulation sphere.
    fn draw_articulation(&mut self, object: ArticulationObject<'_>) -> Self::Handle;

    /// Renders the current scene into `path`.
    fn render_frame(&mut self, _path: &Path) {}
}

// =============================================================================
// RECORDING SINK
// =============================================================================

/// Owned copy of a draw request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawRecord {
    /// A tube object.
    Polyline {
        /// Object name.
        name: String,
        /// Centerline samples.
        samples: Polyline,
        /// Material, if any.
        material: Option<MaterialId>,
        /// Tube profile.
        bevel: BevelProfile,
        /// Whether ends are capped.
        caps: bool,
    },
    /// An articulation sphere.
    Articulation {
        /// Object name.
        name: String,
        /// Sphere center.
        center: DVec3,
        /// Sphere radius.
        radius: f64,
        /// Material, if any.
        material: Option<MaterialId>,
    },
}

impl DrawRecord {
    /// Name of the drawn object.
    pub fn name(&self) -> &str {
        match self {
            DrawRecord::Polyline { name, .. } | DrawRecord::Articulation { name, .. } => name,
        }
    }

    /// Material of the drawn object.
    pub fn material(&self) -> Option<MaterialId> {
        match self {
            DrawRecord::Polyline { material, .. } | DrawRecord::Articulation { material, .. } => {
                *material
            }
        }
    }

    /// Polyline samples, empty for articulations.
    pub fn samples(&self) -> &[PolylineSample] {
        match self {
            DrawRecord::Polyline { samples, .. } => samples,
            DrawRecord::Articulation { .. } => &[],
        }
    }
}

impl From<PolylineObject<'_>> for DrawRecord {
    fn from(object: PolylineObject<'_>) -> Self {
        DrawRecord::Polyline {
            name: object.name.to_string(),
            samples: object.samples.to_vec(),
            material: object.material,
            bevel: object.bevel,
            caps: object.caps,
        }
    }
}

impl From<ArticulationObject<'_>> for DrawRecord {
    fn from(object: ArticulationObject<'_>) -> Self {
        DrawRecord::Articulation {
            name: object.name.to_string(),
            center: object.center,
            radius: object.radius,
            material: object.material,
        }
    }
}

/// In-memory sink keeping every request in order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    /// Drawn objects; a handle is an index into this list.
    pub records: Vec<DrawRecord>,
    /// Rendered frame paths.
    pub frames: Vec<PathBuf>,
}

impl RecordingSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record behind a handle.
    pub fn get(&self, handle: usize) -> Option<&DrawRecord> {
        self.records.get(handle)
    }

    /// Tube objects only.
    pub fn polylines(&self) -> impl Iterator<Item = &DrawRecord> + '_ {
        self.records
            .iter()
            .filter(|record| matches!(record, DrawRecord::Polyline { .. }))
    }
}

impl GeometrySink for RecordingSink {
    type Handle = usize;

    fn draw_polyline(&mut self, object: PolylineObject<'_>) -> usize {
        self.records.push(object.into());
        self.records.len() - 1
    }

    fn draw_articulation(&mut self, object: ArticulationObject<'_>) -> usize {
        self.records.push(object.into());
        self.records.len() - 1
    }

    fn render_frame(&mut self, path: &Path) {
        self.frames.push(path.to_path_buf());
    }
}

#[cfg(test)]
mod tests;
