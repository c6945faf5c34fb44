//! # Meta Builder
//!
//! Reconstructs a whole morphology as one metaball object.
//!
//! ## Stages
//!
//! 1. Copy the morphology and repair it (soma samples, soma connections,
//!    primary labels)
//! 2. Emanate the soma towards the roots that start at the soma
//! 3. Sample every arbor, in parallel, down to its branching limit
//! 4. Merge arbors in order and set the resolution
//!
//! Arbors are independent, so they are sampled on the rayon pool. Results
//! are merged in arbor order, which keeps the element list identical from
//! run to run.
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec3;
//! use meta_builder::{MetaBuilder, MetaOptions};
//! use morphology::{ArborType, MorphologyBuilder, Sample, Soma};
//!
//! let mut builder = MorphologyBuilder::new("cell", Soma::new(DVec3::ZERO, 2.0));
//! builder.add_root(ArborType::Axon, 0, vec![
//!     Sample::new(DVec3::new(0.0, 3.0, 0.0), 0.5),
//!     Sample::new(DVec3::new(0.0, 9.0, 0.0), 0.4),
//! ]).unwrap();
//!
//! let object = MetaBuilder::new(&builder.build(), MetaOptions::default())
//!     .unwrap()
//!     .reconstruct()
//!     .unwrap();
//! assert_eq!(object.label, "cell");
//! assert_eq!(object.resolution, 0.5);
//! ```

use morphology::{repair, visit_arbor, Arbor, Morphology, MorphologySource};
use rayon::prelude::*;
use skeleton_builder::{connected_polylines, PolylineParams};

use crate::error::MetaError;
use crate::options::{ArborSampling, MetaOptions};
use crate::skeleton::{MetaObject, MetaSkeleton};

/// Builds a [`MetaObject`] from a morphology.
#[derive(Debug, Clone)]
pub struct MetaBuilder {
    morphology: Morphology,
    options: MetaOptions,
}

impl MetaBuilder {
    /// Validates `options`, copies `morphology` and repairs the copy when
    /// requested.
    pub fn new(morphology: &Morphology, options: MetaOptions) -> Result<Self, MetaError> {
        options.validate()?;
        let mut morphology = morphology.clone();
        if options.repair_morphology {
            repair::remove_internal_samples(&mut morphology);
            repair::update_soma_connections(&mut morphology, options.soma_connection_factor);
            repair::label_primary_children(&mut morphology, options.branching);
        }
        Ok(Self {
            morphology,
            options,
        })
    }

    /// The copy being sampled.
    pub fn morphology(&self) -> &Morphology {
        &self.morphology
    }

    /// Samples the soma and every arbor into one object.
    pub fn reconstruct(&self) -> Result<MetaObject, MetaError> {
        log::info!("Building meta object of {}", self.morphology.label());
        let arbors = self.arbors();

        let mut skeleton = self.build_soma(&arbors);

        let sampled = arbors
            .par_iter()
            .map(|arbor| self.sample_arbor(arbor))
            .collect::<Result<Vec<_>, _>>()?;
        for arbor in sampled {
            skeleton.merge(arbor);
        }

        let object = skeleton.finalize(self.morphology.label());
        log::info!(
            "Meta object {}: {} elements, resolution {}",
            object.label,
            object.elements.len(),
            object.resolution
        );
        Ok(object)
    }

    /// Arbors that are not ignored: apical, basal in order, axon.
    fn arbors(&self) -> Vec<Arbor> {
        self.morphology
            .arbors()
            .filter(|arbor| !self.options.arbor(arbor.arbor_type).ignore)
            .copied()
            .collect()
    }

    fn build_soma(&self, arbors: &[Arbor]) -> MetaSkeleton {
        let soma = self.morphology.soma();
        let mut skeleton = MetaSkeleton::new();
        for arbor in arbors {
            let first = self
                .morphology
                .section(arbor.root)
                .filter(|section| section.connected_to_soma)
                .and_then(|section| section.first_sample());
            if let Some(first) = first {
                skeleton.emanate(soma, first);
            }
        }
        skeleton
    }

    fn sample_arbor(&self, arbor: &Arbor) -> Result<MetaSkeleton, MetaError> {
        let max_level = self.options.arbor(arbor.arbor_type).max_branching_order;
        let mut skeleton = MetaSkeleton::new();

        match self.options.sampling {
            ArborSampling::Sections => {
                visit_arbor(&self.morphology, Some(arbor.root), |section| {
                    let level = section.branching_order + 1;
                    if max_level.map_or(true, |max| level <= max) {
                        skeleton.add_section(section);
                    }
                });
            }
            ArborSampling::ConnectedPolylines => {
                let polylines = connected_polylines(
                    &self.morphology,
                    arbor.root,
                    max_level,
                    &PolylineParams::default(),
                )?;
                for polyline in &polylines {
                    skeleton.add_polyline(polyline);
                }
            }
        }

        log::debug!(
            "{}: {} elements",
            arbor.arbor_type,
            skeleton.elements().len()
        );
        Ok(skeleton)
    }
}

/// Loads `label` from `source` and reconstructs its meta object.
pub fn reconstruct_meta<M>(
    source: &M,
    label: &str,
    options: MetaOptions,
) -> Result<MetaObject, MetaError>
where
    M: MorphologySource + ?Sized,
{
    let morphology = source.load(label)?;
    MetaBuilder::new(&morphology, options)?.reconstruct()
}
