//! # Segment Marcher
//!
//! Approximates a tapered cylinder by a chain of overlapping spheres.
//!
//! ## Algorithm
//!
//! 1. Segments shorter than [`DEGENERATE_SEGMENT_LENGTH`] emit nothing
//! 2. Both radii are raised to at least `0.001 × length`
//! 3. Starting at the first endpoint, a sphere is placed at the interpolated
//!    position and radius, then the march advances by half that radius
//! 4. The march stops once the travelled distance reaches the length, so no
//!    sphere is ever placed on or past the second endpoint
//!
//! Radii are taken as given. Callers apply [`META_RADIUS_SCALE`] beforehand.
//!
//! [`META_RADIUS_SCALE`]: config::constants::META_RADIUS_SCALE
//! [`DEGENERATE_SEGMENT_LENGTH`]: config::constants::DEGENERATE_SEGMENT_LENGTH
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec3;
//! use meta_builder::marcher::march_segment;
//!
//! let mut spheres = Vec::new();
//! march_segment(DVec3::ZERO, DVec3::new(0.0, 0.0, 10.0), 1.575, 1.575, &mut spheres);
//! assert_eq!(spheres.len(), 13);
//! assert_eq!(spheres[0].center, DVec3::ZERO);
//! ```

use config::constants::{is_degenerate_length, min_segment_radius};
use glam::DVec3;

use crate::skeleton::MetaElement;

/// Appends the spheres approximating the segment `(start, r1) → (end, r2)`
/// to `elements` and returns how many were added.
pub fn march_segment(
    start: DVec3,
    end: DVec3,
    r1: f64,
    r2: f64,
    elements: &mut Vec<MetaElement>,
) -> usize {
    let offset = end - start;
    let length = offset.length();
    if is_degenerate_length(length) {
        return 0;
    }

    let floor = min_segment_radius(length);
    let r1 = r1.max(floor);
    let r2 = r2.max(floor);
    let dr = r2 - r1;

    let before = elements.len();
    let mut travelled = 0.0;
    let mut radius = r1;
    let mut center = start;
    while travelled < length {
        elements.push(MetaElement { center, radius });
        travelled += radius / 2.0;
        let t = travelled / length;
        radius = r1 + t * dr;
        center = start + offset * t;
    }
    elements.len() - before
}
