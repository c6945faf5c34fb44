//! # Skeleton Options
//!
//! User-facing configuration of a skeleton reconstruction.
//!
//! Options deserialize from JSON with every field optional. Unset branching
//! orders mean "no limit".
//!
//! ## Example
//!
//! ```rust
//! use skeleton_builder::options::{RadiusPolicy, SkeletonOptions};
//!
//! let options = SkeletonOptions::from_json(r#"{
//!     "policy": { "kind": "connected_sections" },
//!     "axon": { "max_branching_order": 3 },
//!     "radii": { "fixed": 0.5 },
//!     "connect_to_soma": true
//! }"#).unwrap();
//!
//! assert_eq!(options.axon.max_branching_order, Some(3));
//! assert_eq!(options.radii, RadiusPolicy::Fixed(0.5));
//! ```

use std::path::PathBuf;

use config::constants::{
    ConfigError, RepairConfig, DEFAULT_MIN_SEGMENT_LENGTH, DEFAULT_RADIUS_FLOOR,
    DEFAULT_RESAMPLING_STEP, SOMA_CONNECTION_FACTOR,
};
use glam::DMat4;
use morphology::{ArborType, BranchingCriterion};
use serde::{Deserialize, Serialize};

use crate::error::SkeletonError;
use crate::policy::ConstructionPolicy;
use crate::polyline::PolylineParams;
use crate::sink::{BevelProfile, MaterialId};

/// Options applying to one arbor type.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ArborOptions {
    /// Deepest branching level drawn; the root is level 1.
    pub max_branching_order: Option<u32>,
    /// Skip arbors of this type.
    pub ignore: bool,
    /// Two materials alternated by section parity.
    pub materials: Option<[MaterialId; 2]>,
}

/// How sample radii are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RadiusPolicy {
    /// Radii as reported by the morphology.
    #[default]
    AsSpecified,
    /// Every sample gets this radius.
    Fixed(f64),
    /// Every radius is multiplied by this factor.
    Scaled(f64),
}

/// Options of a skeleton reconstruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkeletonOptions {
    /// How sections are grouped into polylines.
    pub policy: ConstructionPolicy,
    /// Options of the axon.
    pub axon: ArborOptions,
    /// Options shared by every basal dendrite.
    pub basal_dendrites: ArborOptions,
    /// Options of the apical dendrite.
    pub apical_dendrite: ArborOptions,
    /// How sample radii are rendered.
    pub radii: RadiusPolicy,
    /// Start connected-sections roots at the soma centroid.
    pub connect_to_soma: bool,
    /// Run the repair passes and terminal processing.
    pub repair_morphology: bool,
    /// Resample sections during repair.
    pub resample_sections: bool,
    /// Criterion used to label primary children during repair.
    pub branching: BranchingCriterion,
    /// Smallest radius kept by repair.
    pub radius_floor: f64,
    /// Segments shorter than this are dropped from terminals.
    pub min_segment_length: f64,
    /// Sample spacing used by resampling.
    pub resampling_step: f64,
    /// Roots starting farther than this multiple of the soma radius are not
    /// bridged to the soma. Applied during repair.
    pub soma_connection_factor: f64,
    /// Cross-section of the swept tubes.
    pub bevel: BevelProfile,
    /// Close the tube ends.
    pub caps: bool,
    /// Material of the articulation spheres. No spheres when unset.
    pub articulation_material: Option<MaterialId>,
    /// Record a frame after every drawn polyline.
    pub render_progressive_frames: bool,
    /// Directory receiving the progressive frames.
    pub frame_destination: Option<PathBuf>,
    /// Maps local to global coordinates.
    pub transform: Option<DMat4>,
}

impl Default for SkeletonOptions {
    fn default() -> Self {
        Self {
            policy: ConstructionPolicy::default(),
            axon: ArborOptions::default(),
            basal_dendrites: ArborOptions::default(),
            apical_dendrite: ArborOptions::default(),
            radii: RadiusPolicy::default(),
            connect_to_soma: false,
            repair_morphology: false,
            resample_sections: false,
            branching: BranchingCriterion::default(),
            radius_floor: DEFAULT_RADIUS_FLOOR,
            min_segment_length: DEFAULT_MIN_SEGMENT_LENGTH,
            resampling_step: DEFAULT_RESAMPLING_STEP,
            soma_connection_factor: SOMA_CONNECTION_FACTOR,
            bevel: BevelProfile::default(),
            caps: true,
            articulation_material: None,
            render_progressive_frames: false,
            frame_destination: None,
            transform: None,
        }
    }
}

impl SkeletonOptions {
    /// Parses and validates options from JSON.
    pub fn from_json(json: &str) -> Result<Self, SkeletonError> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Checks numeric ranges and the frame destination.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.repair_config()?;
        match self.radii {
            RadiusPolicy::Fixed(value) | RadiusPolicy::Scaled(value) if !(value > 0.0) => {
                return Err(ConfigError::InvalidRadius(value));
            }
            _ => {}
        }
        if !(self.soma_connection_factor > 0.0) {
            return Err(ConfigError::InvalidSomaConnectionFactor(
                self.soma_connection_factor,
            ));
        }
        if self.render_progressive_frames && self.frame_destination.is_none() {
            return Err(ConfigError::MissingFrameDestination);
        }
        Ok(())
    }

    /// Validated repair thresholds.
    pub fn repair_config(&self) -> Result<RepairConfig, ConfigError> {
        RepairConfig::new(
            self.radius_floor,
            self.min_segment_length,
            self.resampling_step,
        )
    }

    /// Options of one arbor type.
    pub fn arbor(&self, arbor_type: ArborType) -> &ArborOptions {
        match arbor_type {
            ArborType::Axon => &self.axon,
            ArborType::BasalDendrite => &self.basal_dendrites,
            ArborType::ApicalDendrite => &self.apical_dendrite,
        }
    }

    /// Extraction parameters derived from the radius policy and repair flag.
    pub fn polyline_params(&self) -> Result<PolylineParams, ConfigError> {
        let (fixed_radius, radius_scale) = match self.radii {
            RadiusPolicy::AsSpecified => (None, None),
            RadiusPolicy::Fixed(value) => (Some(value), None),
            RadiusPolicy::Scaled(value) => (None, Some(value)),
        };
        Ok(PolylineParams {
            fixed_radius,
            radius_scale,
            transform: self.transform,
            process_terminals: self.repair_morphology,
            repair: self.repair_config()?,
        })
    }
}
