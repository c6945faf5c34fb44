//! # Repair Passes
//!
//! In-place filters that clean up digitization artifacts before geometry is
//! built. Per-section filters are plain functions meant to be handed to
//! [`apply_to_morphology`](crate::apply_to_morphology); passes that need the
//! whole tree take the morphology itself.
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec3;
//! use morphology::{repair, ArborType, MorphologyBuilder, Sample, Soma};
//!
//! let mut builder = MorphologyBuilder::new("n", Soma::new(DVec3::ZERO, 5.0));
//! builder.add_root(ArborType::Axon, 0, vec![
//!     Sample::new(DVec3::new(1.0, 0.0, 0.0), 1.0),
//!     Sample::new(DVec3::new(6.0, 0.0, 0.0), 1.0),
//!     Sample::new(DVec3::new(9.0, 0.0, 0.0), 1.0),
//! ]).unwrap();
//! let mut morphology = builder.build();
//!
//! repair::remove_internal_samples(&mut morphology);
//! assert_eq!(morphology.sections()[0].samples.len(), 2);
//! ```

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::morphology::Morphology;
use crate::section::{Section, SectionId};
use crate::soma::Soma;
use crate::traversal::apply_to_morphology;

/// Criterion used to pick the primary child at a bifurcation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchingCriterion {
    /// The child whose initial direction deviates least from the parent.
    #[default]
    Angles,
    /// The thickest child.
    Radii,
}

// =============================================================================
// PER-SECTION FILTERS
// =============================================================================

/// Drops the leading samples of a root section that lie inside the soma.
///
/// At least two samples are always kept. Running the filter twice gives the
/// same result as running it once.
pub fn remove_samples_inside_soma(section: &mut Section, soma: &Soma) {
    if !section.is_root() {
        return;
    }
    let removable = section
        .samples
        .iter()
        .take_while(|sample| soma.contains(sample.point))
        .count()
        .min(section.samples.len().saturating_sub(2));
    if removable > 0 {
        log::debug!(
            "removing {removable} samples of section {} inside the soma",
            section.id
        );
        section.samples.drain(..removable);
    }
}

/// Thins a section so consecutive kept samples are at least `step` apart.
///
/// The first and last samples are always kept.
pub fn resample_section(section: &mut Section, step: f64) {
    let count = section.samples.len();
    if count < 3 {
        return;
    }

    let mut kept = Vec::with_capacity(count);
    kept.push(section.samples[0]);
    for sample in &section.samples[1..count - 1] {
        let anchor = kept[kept.len() - 1];
        if anchor.distance(sample) >= step {
            kept.push(*sample);
        }
    }
    kept.push(section.samples[count - 1]);
    section.samples = kept;
}

/// Raises every radius below `floor` to `floor`.
pub fn clamp_radii(section: &mut Section, floor: f64) {
    for sample in &mut section.samples {
        if !(sample.radius >= floor) {
            sample.radius = floor;
        }
    }
}

// =============================================================================
// MORPHOLOGY PASSES
// =============================================================================

/// Applies [`remove_samples_inside_soma`] to every arbor of the morphology.
pub fn remove_internal_samples(morphology: &mut Morphology) {
    let soma = *morphology.soma();
    apply_to_morphology(morphology, |section| {
        remove_samples_inside_soma(section, &soma)
    });
}

/// Flags root sections whose first sample lies farther than
/// `factor × mean radius` from the soma centroid as disconnected, e.g. an
/// axon digitized as growing out of a dendrite. Connected roots are reset,
/// so running the pass again with another factor is safe.
pub fn update_soma_connections(morphology: &mut Morphology, factor: f64) {
    let soma = *morphology.soma();
    let reach = soma.mean_radius * factor;
    apply_to_morphology(morphology, |section| {
        if !section.is_root() {
            return;
        }
        let connected = section
            .first_sample()
            .is_some_and(|sample| soma.centroid.distance(sample.point) <= reach);
        if !connected {
            log::debug!("section {} does not start at the soma", section.id);
        }
        section.connected_to_soma = connected;
    });
}

/// Marks, at every bifurcation, the child that best continues its parent as
/// primary and its siblings as secondary. Roots are always primary.
///
/// Ties keep the earliest child.
pub fn label_primary_children(morphology: &mut Morphology, criterion: BranchingCriterion) {
    let mut labels: Vec<(SectionId, bool)> = Vec::new();

    for (index, section) in morphology.sections().iter().enumerate() {
        if section.is_root() {
            labels.push((SectionId(index), true));
        }
        if !section.has_children() {
            continue;
        }

        let primary = match criterion {
            BranchingCriterion::Radii => thickest_child(morphology, section.children()),
            BranchingCriterion::Angles => {
                straightest_child(morphology, section).or_else(|| {
                    thickest_child(morphology, section.children())
                })
            }
        };

        for child in section.children() {
            labels.push((*child, Some(*child) == primary));
        }
    }

    for (id, is_primary) in labels {
        if let Some(section) = morphology.section_mut(id) {
            section.is_primary = is_primary;
        }
    }
}

fn thickest_child(morphology: &Morphology, children: &[SectionId]) -> Option<SectionId> {
    let mut best: Option<(SectionId, f64)> = None;
    for child in children {
        let radius = morphology
            .section(*child)
            .and_then(Section::first_sample)
            .map_or(0.0, |sample| sample.radius);
        if best.map_or(true, |(_, best_radius)| radius > best_radius) {
            best = Some((*child, radius));
        }
    }
    best.map(|(id, _)| id)
}

fn straightest_child(morphology: &Morphology, parent: &Section) -> Option<SectionId> {
    let parent_direction = tail_direction(parent)?;
    let mut best: Option<(SectionId, f64)> = None;
    for child in parent.children() {
        let Some(direction) = morphology.section(*child).and_then(head_direction) else {
            continue;
        };
        let angle = parent_direction.angle_between(direction);
        if best.map_or(true, |(_, best_angle)| angle < best_angle) {
            best = Some((*child, angle));
        }
    }
    best.map(|(id, _)| id)
}

fn tail_direction(section: &Section) -> Option<DVec3> {
    let [.., before, last] = section.samples.as_slice() else {
        return None;
    };
    (last.point - before.point).try_normalize()
}

fn head_direction(section: &Section) -> Option<DVec3> {
    let [first, second, ..] = section.samples.as_slice() else {
        return None;
    };
    (second.point - first.point).try_normalize()
}

#[cfg(test)]
mod tests;
