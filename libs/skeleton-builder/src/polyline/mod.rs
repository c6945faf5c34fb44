//! # Polyline Extraction
//!
//! Turns the samples of one section into the flat `(position, radius)`
//! sequence consumed by tube and metaball builders.
//!
//! ## Section Flags
//!
//! - `is_continuous`: the section extends a polyline that already holds its
//!   parent's samples, so its duplicate leading sample is omitted
//! - `is_last_section`: the polyline is closed after this section, so a cap
//!   marker equal to the last sample is appended
//!
//! ## Soma Bridging
//!
//! Root sections can be joined to the soma. [`SomaBridge::Origin`] prepends
//! the soma centroid with the soma mean radius, raised to the radius floor
//! when terminals are processed. [`SomaBridge::Surface`] only
//! prepends an auxiliary sample just outside the soma surface, carrying the
//! first sample's radius, and leaves the union to the soma mesher. Roots
//! flagged as not starting at the soma are never bridged.
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec3;
//! use morphology::{ArborType, MorphologyBuilder, Sample, Soma};
//! use skeleton_builder::polyline::{section_polyline, PolylineParams};
//!
//! let mut builder = MorphologyBuilder::new("n", Soma::new(DVec3::ZERO, 1.0));
//! let root = builder.add_root(ArborType::Axon, 0, vec![
//!     Sample::new(DVec3::new(0.0, 0.0, 2.0), 0.5),
//!     Sample::new(DVec3::new(0.0, 0.0, 6.0), 0.4),
//! ]).unwrap();
//! let morphology = builder.build();
//!
//! let params = PolylineParams { fixed_radius: Some(1.0), ..Default::default() };
//! let polyline = section_polyline(morphology.section(root).unwrap(), &params).unwrap();
//! assert_eq!(polyline.len(), 2);
//! assert!(polyline.iter().all(|s| s.radius == 1.0));
//! ```

use config::constants::{RepairConfig, SOMA_BRIDGE_FACTOR};
use glam::{DMat4, DVec3};
use morphology::{Section, Soma};
use serde::{Deserialize, Serialize};

use crate::error::SkeletonError;

// =============================================================================
// TYPES
// =============================================================================

/// A renderer-facing `(position, radius)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolylineSample {
    /// Sample position.
    pub point: DVec3,
    /// Tube radius at this position.
    pub radius: f64,
}

impl PolylineSample {
    /// Creates a polyline sample.
    pub fn new(point: DVec3, radius: f64) -> Self {
        Self { point, radius }
    }
}

/// Ordered samples of one drawable object.
pub type Polyline = Vec<PolylineSample>;

/// Position of a section inside the polyline being accumulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SectionFlags {
    /// The polyline buffer already holds the parent's samples.
    pub is_continuous: bool,
    /// The polyline is flushed after this section.
    pub is_last_section: bool,
}

/// How a root section is joined to the soma.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SomaBridge {
    /// No bridging sample.
    #[default]
    None,
    /// Prepend the soma centroid with the soma mean radius.
    Origin,
    /// Prepend an auxiliary sample just outside the soma surface.
    Surface,
}

/// Per-sample adjustments applied during extraction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PolylineParams {
    /// Replaces every sample radius when set.
    pub fixed_radius: Option<f64>,
    /// Multiplies every sample radius when set and no fixed radius is given.
    pub radius_scale: Option<f64>,
    /// Affine transform applied to every emitted position.
    pub transform: Option<DMat4>,
    /// Enforces the radius floor and merges coincident samples.
    pub process_terminals: bool,
    /// Thresholds used when `process_terminals` is set.
    pub repair: RepairConfig,
}

impl PolylineParams {
    fn radius(&self, radius: f64) -> f64 {
        match (self.fixed_radius, self.radius_scale) {
            (Some(fixed), _) => fixed,
            (None, Some(scale)) => radius * scale,
            (None, None) => radius,
        }
    }

    fn position(&self, point: DVec3) -> DVec3 {
        match self.transform {
            Some(matrix) => matrix.transform_point3(point),
            None => point,
        }
    }
}

// =============================================================================
// EXTRACTION
// =============================================================================

/// Emits every sample of a section, without bridging or cap markers.
pub fn section_polyline(section: &Section, params: &PolylineParams) -> Result<Polyline, SkeletonError> {
    let samples = prepared_samples(section, params)?;
    Ok(samples
        .into_iter()
        .map(|sample| PolylineSample::new(params.position(sample.point), sample.radius))
        .collect())
}

/// Polyline contribution of a section drawn with connected sections.
///
/// When `connect_to_soma` is set, a root section starts at the soma centroid.
pub fn connected_section_polyline(
    section: &Section,
    soma: &Soma,
    flags: SectionFlags,
    connect_to_soma: bool,
    params: &PolylineParams,
) -> Result<Polyline, SkeletonError> {
    let bridge = if connect_to_soma {
        SomaBridge::Origin
    } else {
        SomaBridge::None
    };
    build_polyline(section, soma, flags, bridge, params)
}

/// Polyline contribution of a section drawn with disconnected sections.
///
/// Root sections are extended to the soma centroid when
/// `extend_to_soma_origin` is set, otherwise they only receive a bridging
/// sample outside the soma surface.
pub fn disconnected_section_polyline(
    section: &Section,
    soma: &Soma,
    flags: SectionFlags,
    extend_to_soma_origin: bool,
    params: &PolylineParams,
) -> Result<Polyline, SkeletonError> {
    let bridge = if extend_to_soma_origin {
        SomaBridge::Origin
    } else {
        SomaBridge::Surface
    };
    build_polyline(section, soma, flags, bridge, params)
}

/// Shared extraction behind every policy.
pub fn build_polyline(
    section: &Section,
    soma: &Soma,
    flags: SectionFlags,
    bridge: SomaBridge,
    params: &PolylineParams,
) -> Result<Polyline, SkeletonError> {
    let samples = prepared_samples(section, params)?;
    let mut polyline = Vec::with_capacity(samples.len() + 2);

    if section.is_root() && section.connected_to_soma && !flags.is_continuous {
        if let Some(bridge_sample) = bridge_sample(bridge, soma, &samples[0], params) {
            polyline.push(bridge_sample);
        }
    }

    let skip = usize::from(flags.is_continuous);
    polyline.extend(
        samples
            .iter()
            .skip(skip)
            .map(|sample| PolylineSample::new(params.position(sample.point), sample.radius)),
    );

    if flags.is_last_section {
        let last = samples[samples.len() - 1];
        polyline.push(PolylineSample::new(params.position(last.point), last.radius));
    }

    Ok(polyline)
}

// =============================================================================
// HELPERS
// =============================================================================

/// Validated local-space samples with radius policy and terminal repair
/// applied. Always holds at least two samples.
fn prepared_samples(
    section: &Section,
    params: &PolylineParams,
) -> Result<Vec<PolylineSample>, SkeletonError> {
    if !section.is_valid() {
        return Err(SkeletonError::MalformedSection {
            section: section.id,
            samples: section.samples.len(),
        });
    }

    let samples: Vec<PolylineSample> = section
        .samples
        .iter()
        .map(|sample| PolylineSample::new(sample.point, params.radius(sample.radius)))
        .collect();

    if !params.process_terminals {
        return Ok(samples);
    }

    let repaired = process_terminals(samples, &params.repair);
    if repaired.len() < 2 {
        return Err(SkeletonError::CollapsedSection {
            section: section.id,
        });
    }
    Ok(repaired)
}

/// Floors every radius and merges samples closer than the minimum segment
/// length. The last sample wins over its predecessor so the section keeps
/// its terminal position.
fn process_terminals(samples: Vec<PolylineSample>, repair: &RepairConfig) -> Vec<PolylineSample> {
    let count = samples.len();
    let mut kept: Vec<PolylineSample> = Vec::with_capacity(count);

    for (index, mut sample) in samples.into_iter().enumerate() {
        if !(sample.radius >= repair.radius_floor) {
            sample.radius = repair.radius_floor;
        }
        let Some(previous) = kept.last() else {
            kept.push(sample);
            continue;
        };
        if previous.point.distance(sample.point) >= repair.min_segment_length {
            kept.push(sample);
        } else if index == count - 1 && kept.len() > 1 {
            kept.pop();
            kept.push(sample);
        }
    }

    kept
}

fn bridge_sample(
    bridge: SomaBridge,
    soma: &Soma,
    first: &PolylineSample,
    params: &PolylineParams,
) -> Option<PolylineSample> {
    let local = match bridge {
        SomaBridge::None => return None,
        SomaBridge::Origin => PolylineSample::new(soma.centroid, soma.mean_radius),
        SomaBridge::Surface => {
            let offset = first.point - soma.centroid;
            let reach = soma.mean_radius * SOMA_BRIDGE_FACTOR;
            if offset.length() <= reach {
                return None;
            }
            let direction = offset.try_normalize()?;
            PolylineSample::new(soma.centroid + direction * reach, first.radius)
        }
    };

    let mut radius = local.radius;
    if params.process_terminals {
        if local.point.distance(first.point) < params.repair.min_segment_length {
            return None;
        }
        if !(radius >= params.repair.radius_floor) {
            radius = params.repair.radius_floor;
        }
    }

    Some(PolylineSample::new(params.position(local.point), radius))
}
