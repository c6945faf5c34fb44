//! The cell body every arbor emanates from.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Soma profile reduced to a centroid and a mean radius.
///
/// # Examples
/// ```
/// use glam::DVec3;
/// use morphology::Soma;
///
/// let soma = Soma::new(DVec3::ZERO, 5.0);
/// assert!(soma.contains(DVec3::new(1.0, 1.0, 1.0)));
/// assert!(!soma.contains(DVec3::new(5.0, 0.0, 0.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Soma {
    /// Soma center.
    pub centroid: DVec3,
    /// Mean distance from the centroid to the soma profile.
    pub mean_radius: f64,
}

impl Soma {
    /// Creates a soma.
    pub fn new(centroid: DVec3, mean_radius: f64) -> Self {
        Self {
            centroid,
            mean_radius,
        }
    }

    /// Returns `true` if `point` lies strictly inside the soma sphere.
    pub fn contains(&self, point: DVec3) -> bool {
        self.centroid.distance(point) < self.mean_radius
    }
}
