//! A single measured point along a section.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// A 3D position with a non-negative radius, in microns.
///
/// # Examples
/// ```
/// use glam::DVec3;
/// use morphology::Sample;
///
/// let a = Sample::new(DVec3::ZERO, 1.0);
/// let b = Sample::new(DVec3::new(3.0, 4.0, 0.0), 1.0);
/// assert_eq!(a.distance(&b), 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Sample position.
    pub point: DVec3,
    /// Sample radius.
    pub radius: f64,
}

impl Sample {
    /// Creates a sample.
    pub fn new(point: DVec3, radius: f64) -> Self {
        Self { point, radius }
    }

    /// Euclidean distance between the positions of two samples.
    pub fn distance(&self, other: &Sample) -> f64 {
        self.point.distance(other.point)
    }
}
