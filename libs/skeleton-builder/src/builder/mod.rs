//! # Skeleton Builder
//!
//! Drives a full morphology reconstruction: copy, repair, then draw every
//! arbor with the configured policy.
//!
//! ## Arbor Order
//!
//! Apical dendrite, basal dendrites in stored order, then the axon. Absent
//! and ignored arbors are skipped. Objects are named after their arbor:
//! `apical_dendrite`, `basal_dendrite_<i>` and `axon`.
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec3;
//! use morphology::{ArborType, MorphologyBuilder, Sample, Soma};
//! use skeleton_builder::{RecordingSink, SkeletonBuilder, SkeletonOptions};
//!
//! let mut builder = MorphologyBuilder::new("n", Soma::new(DVec3::ZERO, 1.0));
//! builder.add_root(ArborType::BasalDendrite, 0, vec![
//!     Sample::new(DVec3::new(2.0, 0.0, 0.0), 0.5),
//!     Sample::new(DVec3::new(9.0, 0.0, 0.0), 0.5),
//! ]).unwrap();
//! let morphology = builder.build();
//!
//! let skeleton = SkeletonBuilder::new(&morphology, SkeletonOptions::default()).unwrap();
//! let mut sink = RecordingSink::new();
//! let result = skeleton.draw_morphology_skeleton(&mut sink).unwrap();
//! assert_eq!(result.arbors[0].name, "basal_dendrite_0");
//! assert_eq!(sink.records[0].name(), "basal_dendrite_0_0");
//! ```

mod collect;

pub use collect::{connected_polylines, PolylineCollector};

use config::constants::RepairConfig;
use morphology::{apply_to_morphology, repair, ArborType, Morphology, MorphologySource, SectionId};

use crate::context::{CancellationToken, Diagnostic, ProgressiveFrames, ReconstructionContext};
use crate::error::SkeletonError;
use crate::options::SkeletonOptions;
use crate::policy::{ArborReconstruction, ArborStyle};
use crate::polyline::PolylineParams;
use crate::sink::GeometrySink;

/// Everything produced by one reconstruction job.
#[derive(Debug, Clone, PartialEq)]
pub struct SkeletonReconstruction<H> {
    /// Drawn arbors, in draw order.
    pub arbors: Vec<ArborReconstruction<H>>,
    /// Sections skipped while drawing.
    pub diagnostics: Vec<Diagnostic>,
    /// Progressive frames rendered by this job.
    pub frames_rendered: u32,
}

impl<H> SkeletonReconstruction<H> {
    /// Handles of every drawn object, in draw order.
    pub fn objects(&self) -> impl Iterator<Item = &H> + '_ {
        self.arbors.iter().flat_map(|arbor| arbor.objects.iter())
    }
}

/// Reconstructs the skeleton of one morphology.
///
/// The builder works on its own copy of the morphology, so repair passes
/// never touch the caller's data.
#[derive(Debug, Clone)]
pub struct SkeletonBuilder {
    morphology: Morphology,
    options: SkeletonOptions,
    params: PolylineParams,
    cancellation: CancellationToken,
}

impl SkeletonBuilder {
    /// Validates `options`, copies `morphology` and repairs the copy when
    /// `repair_morphology` is set.
    pub fn new(morphology: &Morphology, options: SkeletonOptions) -> Result<Self, SkeletonError> {
        options.validate()?;
        let params = options.polyline_params()?;

        let mut morphology = morphology.clone();
        if options.repair_morphology {
            repair_morphology(&mut morphology, &options, &params.repair);
        }

        Ok(Self {
            morphology,
            options,
            params,
            cancellation: CancellationToken::new(),
        })
    }

    /// Uses `token` to stop drawing between two section visits.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// The copy being drawn.
    pub fn morphology(&self) -> &Morphology {
        &self.morphology
    }

    /// Options in effect.
    pub fn options(&self) -> &SkeletonOptions {
        &self.options
    }

    /// Draws every arbor into `sink`.
    ///
    /// Frame numbering restarts at 1 for every call and runs across all
    /// arbors of the job.
    pub fn draw_morphology_skeleton<S: GeometrySink>(
        &self,
        sink: &mut S,
    ) -> Result<SkeletonReconstruction<S::Handle>, SkeletonError> {
        let frames = if self.options.render_progressive_frames {
            ProgressiveFrames::new(self.options.frame_destination.clone())
        } else {
            ProgressiveFrames::disabled()
        };
        let mut context =
            ReconstructionContext::new(frames).with_cancellation(self.cancellation.clone());

        log::info!(
            "Building skeleton of {} ({:?})",
            self.morphology.label(),
            self.options.policy
        );

        let mut arbors = Vec::new();
        for (arbor_type, name, root) in self.arbor_jobs() {
            let arbor_options = self.options.arbor(arbor_type);
            if arbor_options.ignore {
                log::info!("Ignoring {name}");
                continue;
            }
            log::info!("Drawing {name}");

            let style = ArborStyle {
                name,
                max_branching_level: arbor_options.max_branching_order,
                materials: arbor_options.materials,
                articulation_material: self.options.articulation_material,
                bevel: self.options.bevel,
                caps: self.options.caps,
                connect_to_soma: self.options.connect_to_soma,
                params: self.params,
            };
            let arbor =
                self.options
                    .policy
                    .draw_arbor(&self.morphology, root, &style, &mut context, sink)?;
            arbors.push(arbor);
        }

        Ok(SkeletonReconstruction {
            arbors,
            frames_rendered: context.frames.rendered(),
            diagnostics: context.diagnostics,
        })
    }

    fn arbor_jobs(&self) -> Vec<(ArborType, String, SectionId)> {
        let mut jobs = Vec::new();
        if let Some(apical) = self.morphology.apical_dendrite() {
            jobs.push((apical.arbor_type, apical.arbor_type.prefix().to_string(), apical.root));
        }
        for (index, basal) in self.morphology.basal_dendrites().iter().enumerate() {
            let name = format!("{}_{index}", basal.arbor_type.prefix());
            jobs.push((basal.arbor_type, name, basal.root));
        }
        if let Some(axon) = self.morphology.axon() {
            jobs.push((axon.arbor_type, axon.arbor_type.prefix().to_string(), axon.root));
        }
        jobs
    }
}

/// Loads `label` from `source` and draws it.
///
/// A load failure aborts the job before anything is drawn.
pub fn reconstruct_skeleton<M, S>(
    source: &M,
    label: &str,
    options: SkeletonOptions,
    sink: &mut S,
) -> Result<SkeletonReconstruction<S::Handle>, SkeletonError>
where
    M: MorphologySource + ?Sized,
    S: GeometrySink,
{
    let morphology = source.load(label)?;
    SkeletonBuilder::new(&morphology, options)?.draw_morphology_skeleton(sink)
}

fn repair_morphology(morphology: &mut Morphology, options: &SkeletonOptions, config: &RepairConfig) {
    repair::remove_internal_samples(morphology);
    repair::update_soma_connections(morphology, options.soma_connection_factor);
    if options.resample_sections {
        apply_to_morphology(morphology, |section| {
            repair::resample_section(section, config.resampling_step)
        });
    }
    apply_to_morphology(morphology, |section| {
        repair::clamp_radii(section, config.radius_floor)
    });
    repair::label_primary_children(morphology, options.branching);
}

#[cfg(test)]
mod tests;
