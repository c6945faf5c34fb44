//! Centralized configuration values shared across the neuron skeleton pipeline.
//!
//! Each public item in this module documents its purpose and provides a minimal
//! usage example so that downstream crates can remain declarative and avoid
//! scattering literals.

use std::fmt;

// =============================================================================
// GEOMETRY CONSTANTS
// =============================================================================

/// Segments shorter than this length (in microns) are treated as degenerate
/// and produce no metaball elements.
///
/// # Examples
/// ```
/// use config::constants::DEGENERATE_SEGMENT_LENGTH;
/// assert_eq!(DEGENERATE_SEGMENT_LENGTH, 0.001);
/// ```
pub const DEGENERATE_SEGMENT_LENGTH: f64 = 0.001;

/// Fraction of the segment length used as the lower bound of a metaball
/// radius, which keeps very thin segments from turning into needles.
///
/// # Examples
/// ```
/// use config::constants::MIN_RADIUS_FRACTION;
/// let floor = 10.0 * MIN_RADIUS_FRACTION;
/// assert_eq!(floor, 0.01);
/// ```
pub const MIN_RADIUS_FRACTION: f64 = 0.001;

/// Empirical scale applied to every sample radius before it becomes a
/// metaball element. The iso-surface of a metaball sits inside its nominal
/// radius; this factor restores the reference thickness.
///
/// # Examples
/// ```
/// use config::constants::META_RADIUS_SCALE;
/// assert!((1.0 * META_RADIUS_SCALE - 1.575).abs() < 1e-12);
/// ```
pub const META_RADIUS_SCALE: f64 = 1.575;

/// Initial value of the running smallest-radius tracker of a meta skeleton.
///
/// Any sample thinner than this lowers the final implicit-surface resolution.
pub const INITIAL_SMALLEST_RADIUS: f64 = 10.0;

/// Resolution assigned to a freshly created meta skeleton before
/// finalization replaces it with the smallest observed radius.
pub const INITIAL_META_RESOLUTION: f64 = 1.0;

/// Distance from the soma centroid, in soma mean radii, of the auxiliary
/// sample that bridges a root section to the soma surface.
///
/// # Examples
/// ```
/// use config::constants::SOMA_BRIDGE_FACTOR;
/// let soma_radius = 4.0;
/// assert!(soma_radius * SOMA_BRIDGE_FACTOR > soma_radius);
/// ```
pub const SOMA_BRIDGE_FACTOR: f64 = 1.05;

/// Multiple of the mean soma radius within which a root section's first
/// sample must lie for the root to count as growing out of the soma.
pub const SOMA_CONNECTION_FACTOR: f64 = 2.0;

// =============================================================================
// REPAIR CONSTANTS
// =============================================================================

/// Sample spacing (in microns) used when resampling sections for smooth
/// arbors.
pub const DEFAULT_RESAMPLING_STEP: f64 = 2.5;

/// Smallest radius allowed to survive terminal processing.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_RADIUS_FLOOR;
/// assert!(DEFAULT_RADIUS_FLOOR > 0.0);
/// ```
pub const DEFAULT_RADIUS_FLOOR: f64 = 0.05;

/// Consecutive samples closer than this distance are merged during terminal
/// processing.
pub const DEFAULT_MIN_SEGMENT_LENGTH: f64 = 0.001;

// =============================================================================
// RENDERING CONSTANTS
// =============================================================================

/// Index of the first progressive frame of an arbor reconstruction. Frame 0
/// belongs to the soma.
pub const FIRST_PROGRESSIVE_FRAME: u32 = 1;

/// Number of digits of the zero-padded progressive frame index.
pub const FRAME_INDEX_WIDTH: usize = 5;

/// Bevel sides used for hard-edged arbors with closed caps.
pub const HARD_EDGES_BEVEL_SIDES: u32 = 16;

/// Bevel sides used for soft-edged arbors that are smoothed afterwards.
pub const SOFT_EDGES_BEVEL_SIDES: u32 = 4;

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Bytes of stack space reserved when growing recursion limits using the
/// `stacker` crate.
///
/// # Examples
/// ```
/// use config::constants::STACKER_STACK_SIZE_BYTES;
/// assert!(STACKER_STACK_SIZE_BYTES >= 1024);
/// ```
pub const STACKER_STACK_SIZE_BYTES: usize = 8 * 1024 * 1024;

/// Remaining stack below which `stacker` allocates a new segment.
pub const STACKER_RED_ZONE_BYTES: usize = STACKER_STACK_SIZE_BYTES / 8;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Returns the smallest radius a metaball may have on a segment of the given
/// length.
///
/// # Examples
/// ```
/// use config::constants::min_segment_radius;
/// assert_eq!(min_segment_radius(2000.0), 2.0);
/// ```
#[inline]
pub fn min_segment_radius(segment_length: f64) -> f64 {
    MIN_RADIUS_FRACTION * segment_length
}

/// Checks whether a segment length is below the degenerate threshold.
///
/// # Examples
/// ```
/// use config::constants::is_degenerate_length;
/// assert!(is_degenerate_length(0.0001));
/// assert!(!is_degenerate_length(1.0));
/// ```
#[inline]
pub fn is_degenerate_length(length: f64) -> bool {
    length < DEGENERATE_SEGMENT_LENGTH
}

/// Builds the file name of a progressive frame, e.g. `frame_00001`.
///
/// # Examples
/// ```
/// use config::constants::frame_file_name;
/// assert_eq!(frame_file_name(1), "frame_00001");
/// ```
pub fn frame_file_name(index: u32) -> String {
    format!("frame_{index:0width$}", width = FRAME_INDEX_WIDTH)
}

// =============================================================================
// REPAIR CONFIGURATION
// =============================================================================

/// Validated thresholds used by terminal processing and repair passes.
///
/// # Examples
/// ```
/// use config::constants::RepairConfig;
/// let config = RepairConfig::default();
/// assert!(config.radius_floor > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RepairConfig {
    /// No radius below this value survives terminal processing.
    pub radius_floor: f64,
    /// Consecutive samples closer than this are merged.
    pub min_segment_length: f64,
    /// Spacing used by the resampling pass.
    pub resampling_step: f64,
}

impl RepairConfig {
    /// Builds a configuration enforcing strict validation of the supplied
    /// thresholds.
    ///
    /// # Examples
    /// ```
    /// use config::constants::RepairConfig;
    /// let cfg = RepairConfig::new(0.1, 0.01, 2.0).expect("valid config");
    /// assert_eq!(cfg.resampling_step, 2.0);
    /// ```
    pub fn new(
        radius_floor: f64,
        min_segment_length: f64,
        resampling_step: f64,
    ) -> Result<Self, ConfigError> {
        if !(radius_floor > 0.0) {
            return Err(ConfigError::InvalidRadiusFloor(radius_floor));
        }
        if !(min_segment_length > 0.0) {
            return Err(ConfigError::InvalidSegmentLength(min_segment_length));
        }
        if !(resampling_step > 0.0) {
            return Err(ConfigError::InvalidResamplingStep(resampling_step));
        }
        Ok(Self {
            radius_floor,
            min_segment_length,
            resampling_step,
        })
    }
}

impl Default for RepairConfig {
    fn default() -> Self {
        Self {
            radius_floor: DEFAULT_RADIUS_FLOOR,
            min_segment_length: DEFAULT_MIN_SEGMENT_LENGTH,
            resampling_step: DEFAULT_RESAMPLING_STEP,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Raised when the radius floor is zero, negative or NaN.
    InvalidRadiusFloor(f64),
    /// Raised when the minimum segment length is zero, negative or NaN.
    InvalidSegmentLength(f64),
    /// Raised when the resampling step is zero, negative or NaN.
    InvalidResamplingStep(f64),
    /// Raised when a fixed or scaled radius is not strictly positive.
    InvalidRadius(f64),
    /// Raised when the soma connection factor is not strictly positive.
    InvalidSomaConnectionFactor(f64),
    /// Raised when progressive rendering is requested without a destination.
    MissingFrameDestination,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidRadiusFloor(value) => {
                write!(f, "radius floor must be positive: {value}")
            }
            ConfigError::InvalidSegmentLength(value) => {
                write!(f, "minimum segment length must be positive: {value}")
            }
            ConfigError::InvalidResamplingStep(value) => {
                write!(f, "resampling step must be positive: {value}")
            }
            ConfigError::InvalidRadius(value) => {
                write!(f, "radius value must be positive: {value}")
            }
            ConfigError::InvalidSomaConnectionFactor(value) => {
                write!(f, "soma connection factor must be positive: {value}")
            }
            ConfigError::MissingFrameDestination => {
                write!(f, "progressive rendering requires a frame destination")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
