//! # Reconstruction Context
//!
//! Per-job state threaded through the policy recursion.
//!
//! ## Responsibilities
//!
//! - Owns the progressive-frame counter of one reconstruction job
//! - Collects diagnostics for sections that were skipped
//! - Carries the cancellation token checked at every section visit
//!
//! Nothing here is process-wide: two jobs running side by side each own
//! their context and never share a frame counter.
//!
//! ## Example
//!
//! ```rust
//! use std::path::PathBuf;
//! use skeleton_builder::context::{ProgressiveFrames, ReconstructionContext};
//!
//! let frames = ProgressiveFrames::new(Some(PathBuf::from("/tmp/frames")));
//! let mut ctx = ReconstructionContext::new(frames);
//! assert_eq!(ctx.frames.advance(), Some(PathBuf::from("/tmp/frames/frame_00001")));
//! assert_eq!(ctx.frames.next_index(), 2);
//! ```

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use config::constants::{frame_file_name, FIRST_PROGRESSIVE_FRAME};
use morphology::SectionId;

use crate::error::SkeletonError;
use crate::polyline::Polyline;

// =============================================================================
// CANCELLATION
// =============================================================================

/// Shared flag used to stop a running reconstruction.
///
/// Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Returns true once [`cancel`](Self::cancel) was called on any clone.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

// =============================================================================
// PROGRESSIVE FRAMES
// =============================================================================

/// Frame counter of one reconstruction job.
///
/// Starts at 1 and advances once per flushed object. Frames are only
/// produced when a destination directory is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressiveFrames {
    destination: Option<PathBuf>,
    next_index: u32,
}

impl ProgressiveFrames {
    /// Creates a counter writing into `destination`, or a disabled one.
    pub fn new(destination: Option<PathBuf>) -> Self {
        Self {
            destination,
            next_index: FIRST_PROGRESSIVE_FRAME,
        }
    }

    /// A counter that never produces frames.
    pub fn disabled() -> Self {
        Self::new(None)
    }

    /// Returns true when frames are rendered.
    pub fn is_enabled(&self) -> bool {
        self.destination.is_some()
    }

    /// Index the next frame will receive.
    pub fn next_index(&self) -> u32 {
        self.next_index
    }

    /// Restarts numbering at the first frame.
    pub fn reset(&mut self) {
        self.next_index = FIRST_PROGRESSIVE_FRAME;
    }

    /// Path of the next frame, advancing the counter. `None` when disabled.
    pub fn advance(&mut self) -> Option<PathBuf> {
        let destination = self.destination.as_ref()?;
        let path = destination.join(frame_file_name(self.next_index));
        self.next_index += 1;
        Some(path)
    }

    /// Number of frames produced since the last reset.
    pub fn rendered(&self) -> u32 {
        self.next_index - FIRST_PROGRESSIVE_FRAME
    }
}

impl Default for ProgressiveFrames {
    fn default() -> Self {
        Self::disabled()
    }
}

// =============================================================================
// DIAGNOSTICS
// =============================================================================

/// A recoverable problem met while drawing an arbor.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Name of the arbor being drawn.
    pub arbor: String,
    /// Section that was skipped.
    pub section: u32,
    /// What went wrong.
    pub error: SkeletonError,
}

// =============================================================================
// CONTEXT
// =============================================================================

/// State shared by every arbor of one reconstruction job.
#[derive(Debug, Default)]
pub struct ReconstructionContext {
    /// Progressive-frame counter.
    pub frames: ProgressiveFrames,
    /// Skipped sections, in the order they were met.
    pub diagnostics: Vec<Diagnostic>,
    /// Checked before every section visit.
    pub cancellation: CancellationToken,
}

impl ReconstructionContext {
    /// Creates a context with the given frame counter and a fresh token.
    pub fn new(frames: ProgressiveFrames) -> Self {
        Self {
            frames,
            diagnostics: Vec::new(),
            cancellation: CancellationToken::new(),
        }
    }

    /// Replaces the cancellation token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Fails with [`SkeletonError::Cancelled`] once cancellation was requested.
    pub fn check_cancelled(&self) -> Result<(), SkeletonError> {
        if self.cancellation.is_cancelled() {
            return Err(SkeletonError::Cancelled);
        }
        Ok(())
    }

    /// Logs and records a skipped section.
    pub fn record(&mut self, arbor: &str, section: u32, error: SkeletonError) {
        log::error!("{arbor}: skipping section {section}: {error}");
        self.diagnostics.push(Diagnostic {
            arbor: arbor.to_string(),
            section,
            error,
        });
    }
}

// =============================================================================
// ARBOR STATE
// =============================================================================

/// Accumulation state of the arbor currently being drawn.
#[derive(Debug)]
pub struct ConstructionState<H> {
    /// Samples of the object under construction.
    pub polyline: Polyline,
    /// Handles of the objects flushed so far, in order.
    pub objects: Vec<H>,
    /// Sections that started a new object.
    pub secondary_sections: Vec<SectionId>,
}

impl<H> ConstructionState<H> {
    /// Creates an empty state.
    pub fn new() -> Self {
        Self {
            polyline: Vec::new(),
            objects: Vec::new(),
            secondary_sections: Vec::new(),
        }
    }
}

impl<H> Default for ConstructionState<H> {
    fn default() -> Self {
        Self::new()
    }
}
