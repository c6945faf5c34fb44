//! # Meta Skeleton
//!
//! Accumulates metaball elements and the thinnest radius seen while
//! sampling, then finalizes into a [`MetaObject`].
//!
//! Sample radii are multiplied by [`META_RADIUS_SCALE`] before marching so
//! the iso-surface of the blended spheres matches the measured thickness.
//! The smallest radius is tracked on unscaled values.
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec3;
//! use meta_builder::skeleton::MetaSkeleton;
//! use skeleton_builder::PolylineSample;
//!
//! let mut skeleton = MetaSkeleton::new();
//! skeleton.add_polyline(&[
//!     PolylineSample::new(DVec3::ZERO, 0.5),
//!     PolylineSample::new(DVec3::new(0.0, 0.0, 4.0), 0.5),
//! ]);
//! let object = skeleton.finalize("cell");
//! assert_eq!(object.resolution, 0.5);
//! assert!(!object.elements.is_empty());
//! ```

use config::constants::{INITIAL_META_RESOLUTION, INITIAL_SMALLEST_RADIUS, META_RADIUS_SCALE};
use glam::DVec3;
use morphology::{Sample, Section, Soma};
use serde::{Deserialize, Serialize};
use skeleton_builder::PolylineSample;

use crate::marcher::march_segment;

/// One sphere of the implicit surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetaElement {
    /// Sphere center.
    pub center: DVec3,
    /// Sphere radius, already scaled.
    pub radius: f64,
}

/// Finished implicit-surface description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaObject {
    /// Morphology label.
    pub label: String,
    /// Every sphere, soma emanations first, then arbors in draw order.
    pub elements: Vec<MetaElement>,
    /// Polygonization resolution; the smallest sampled radius.
    pub resolution: f64,
}

/// Element accumulator.
#[derive(Debug, Clone, PartialEq)]
pub struct MetaSkeleton {
    elements: Vec<MetaElement>,
    smallest_radius: f64,
}

impl Default for MetaSkeleton {
    fn default() -> Self {
        Self::new()
    }
}

impl MetaSkeleton {
    /// Creates an empty skeleton.
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            smallest_radius: INITIAL_SMALLEST_RADIUS,
        }
    }

    /// Elements produced so far.
    pub fn elements(&self) -> &[MetaElement] {
        &self.elements
    }

    /// Thinnest unscaled radius that started a segment.
    pub fn smallest_radius(&self) -> f64 {
        self.smallest_radius
    }

    /// Marches one segment with radii taken as given.
    pub fn add_segment(&mut self, start: DVec3, end: DVec3, r1: f64, r2: f64) -> usize {
        march_segment(start, end, r1, r2, &mut self.elements)
    }

    /// Marches every consecutive sample pair of a section. Sections with
    /// fewer than two samples add nothing.
    pub fn add_section(&mut self, section: &Section) -> usize {
        self.add_samples(section.samples.iter().map(|s| (s.point, s.radius)))
    }

    /// Marches every consecutive pair of a polyline.
    pub fn add_polyline(&mut self, polyline: &[PolylineSample]) -> usize {
        self.add_samples(polyline.iter().map(|s| (s.point, s.radius)))
    }

    /// Grows the soma towards an arbor: a segment from the centroid, at the
    /// soma mean radius, to the arbor's first sample.
    pub fn emanate(&mut self, soma: &Soma, first: &Sample) -> usize {
        self.add_segment(
            soma.centroid,
            first.point,
            soma.mean_radius,
            first.radius * META_RADIUS_SCALE,
        )
    }

    /// Appends `other`'s elements and keeps the smaller of both radii.
    pub fn merge(&mut self, other: MetaSkeleton) {
        self.elements.extend(other.elements);
        self.smallest_radius = self.smallest_radius.min(other.smallest_radius);
    }

    /// Sets the resolution to the smallest radius and returns the object.
    /// An empty skeleton keeps the initial resolution.
    pub fn finalize(self, label: impl Into<String>) -> MetaObject {
        let resolution = if self.elements.is_empty() {
            INITIAL_META_RESOLUTION
        } else {
            self.smallest_radius
        };
        MetaObject {
            label: label.into(),
            elements: self.elements,
            resolution,
        }
    }

    fn add_samples<I>(&mut self, samples: I) -> usize
    where
        I: Iterator<Item = (DVec3, f64)>,
    {
        let mut added = 0;
        let mut previous: Option<(DVec3, f64)> = None;
        for (point, radius) in samples {
            if let Some((start, r1)) = previous {
                if r1 < self.smallest_radius {
                    self.smallest_radius = r1;
                }
                added += self.add_segment(
                    start,
                    point,
                    r1 * META_RADIUS_SCALE,
                    radius * META_RADIUS_SCALE,
                );
            }
            previous = Some((point, radius));
        }
        added
    }
}

#[cfg(test)]
mod tests;
