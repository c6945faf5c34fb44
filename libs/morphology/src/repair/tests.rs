//! Repair pass tests.

use super::*;
use crate::{ArborType, MorphologyBuilder, Sample};
use approx::assert_relative_eq;

fn line(xs: &[f64], radius: f64) -> Vec<Sample> {
    xs.iter()
        .map(|x| Sample::new(DVec3::new(*x, 0.0, 0.0), radius))
        .collect()
}

fn axon_with(samples: Vec<Sample>, soma_radius: f64) -> Morphology {
    let mut builder = MorphologyBuilder::new("n", Soma::new(DVec3::ZERO, soma_radius));
    builder.add_root(ArborType::Axon, 0, samples).unwrap();
    builder.build()
}

// =============================================================================
// SOMA SAMPLE REMOVAL
// =============================================================================

#[test]
fn samples_inside_soma_are_removed() {
    let mut morphology = axon_with(line(&[0.5, 2.0, 6.0, 8.0], 1.0), 5.0);
    remove_internal_samples(&mut morphology);
    let xs: Vec<f64> = morphology.sections()[0]
        .samples
        .iter()
        .map(|s| s.point.x)
        .collect();
    assert_eq!(xs, vec![6.0, 8.0]);
}

#[test]
fn at_least_two_samples_survive() {
    let mut morphology = axon_with(line(&[0.5, 1.0, 2.0], 1.0), 5.0);
    remove_internal_samples(&mut morphology);
    assert_eq!(morphology.sections()[0].samples.len(), 2);
}

#[test]
fn removal_is_idempotent() {
    let mut once = axon_with(line(&[0.5, 2.0, 3.0, 6.0, 8.0], 1.0), 5.0);
    remove_internal_samples(&mut once);
    let mut twice = once.clone();
    remove_internal_samples(&mut twice);
    assert_eq!(once, twice);

    let mut short = axon_with(line(&[0.5, 1.0, 2.0], 1.0), 5.0);
    remove_internal_samples(&mut short);
    let snapshot = short.clone();
    remove_internal_samples(&mut short);
    assert_eq!(snapshot, short);
}

#[test]
fn child_sections_are_untouched() {
    let mut builder = MorphologyBuilder::new("n", Soma::new(DVec3::ZERO, 5.0));
    let root = builder
        .add_root(ArborType::Axon, 0, line(&[6.0, 7.0], 1.0))
        .unwrap();
    let child = builder.add_child(root, 1, line(&[1.0, 2.0, 3.0], 1.0)).unwrap();
    let mut morphology = builder.build();
    remove_internal_samples(&mut morphology);
    assert_eq!(morphology.section(child).unwrap().samples.len(), 3);
}

// =============================================================================
// RESAMPLING AND RADII
// =============================================================================

#[test]
fn resampling_keeps_endpoints() {
    let mut morphology = axon_with(line(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 5.5], 1.0), 0.1);
    resample_section(&mut morphology.sections_mut()[0], 2.5);
    let xs: Vec<f64> = morphology.sections()[0]
        .samples
        .iter()
        .map(|s| s.point.x)
        .collect();
    assert_eq!(xs, vec![0.0, 3.0, 5.5]);
}

#[test]
fn resampling_ignores_short_sections() {
    let mut morphology = axon_with(line(&[0.0, 0.1], 1.0), 0.1);
    resample_section(&mut morphology.sections_mut()[0], 2.5);
    assert_eq!(morphology.sections()[0].samples.len(), 2);
}

#[test]
fn radii_are_clamped() {
    let mut morphology = axon_with(vec![
        Sample::new(DVec3::ZERO, 0.0),
        Sample::new(DVec3::X, -1.0),
        Sample::new(DVec3::X * 2.0, 2.0),
    ], 0.1);
    let section = &mut morphology.sections_mut()[0];

    clamp_radii(section, 0.5);
    let radii: Vec<f64> = section.samples.iter().map(|s| s.radius).collect();
    assert_eq!(radii, vec![0.5, 0.5, 2.0]);

    clamp_radii(section, 0.5);
    assert_relative_eq!(section.samples[2].radius, 2.0);
}

// =============================================================================
// SOMA CONNECTIONS
// =============================================================================

#[test]
fn far_roots_are_disconnected_from_the_soma() {
    let mut builder = MorphologyBuilder::new("n", Soma::new(DVec3::ZERO, 2.0));
    let near = builder
        .add_root(ArborType::BasalDendrite, 0, line(&[3.0, 6.0], 0.5))
        .unwrap();
    let far = builder
        .add_root(ArborType::Axon, 1, line(&[9.0, 12.0], 0.5))
        .unwrap();
    let child = builder
        .add_child(far, 2, line(&[12.0, 20.0], 0.5))
        .unwrap();
    let mut morphology = builder.build();

    update_soma_connections(&mut morphology, 2.0);
    assert!(morphology.section(near).unwrap().connected_to_soma);
    assert!(!morphology.section(far).unwrap().connected_to_soma);
    assert!(morphology.section(child).unwrap().connected_to_soma);

    update_soma_connections(&mut morphology, 5.0);
    assert!(morphology.section(far).unwrap().connected_to_soma);
}

// =============================================================================
// PRIMARY / SECONDARY LABELS
// =============================================================================

fn fork(thin_straight: bool) -> (Morphology, SectionId, SectionId) {
    let mut builder = MorphologyBuilder::new("n", Soma::new(DVec3::ZERO, 0.1));
    let root = builder
        .add_root(ArborType::BasalDendrite, 0, line(&[0.0, 10.0], 1.0))
        .unwrap();
    let (straight_radius, bent_radius) = if thin_straight { (0.5, 0.9) } else { (0.9, 0.5) };
    let straight = builder
        .add_child(root, 1, vec![
            Sample::new(DVec3::new(10.0, 0.0, 0.0), straight_radius),
            Sample::new(DVec3::new(20.0, 1.0, 0.0), straight_radius),
        ])
        .unwrap();
    let bent = builder
        .add_child(root, 2, vec![
            Sample::new(DVec3::new(10.0, 0.0, 0.0), bent_radius),
            Sample::new(DVec3::new(10.0, 10.0, 0.0), bent_radius),
        ])
        .unwrap();
    (builder.build(), straight, bent)
}

#[test]
fn angles_pick_the_straightest_child() {
    let (mut morphology, straight, bent) = fork(true);
    label_primary_children(&mut morphology, BranchingCriterion::Angles);
    assert!(morphology.section(straight).unwrap().is_primary);
    assert!(!morphology.section(bent).unwrap().is_primary);
}

#[test]
fn radii_pick_the_thickest_child() {
    let (mut morphology, straight, bent) = fork(true);
    label_primary_children(&mut morphology, BranchingCriterion::Radii);
    assert!(!morphology.section(straight).unwrap().is_primary);
    assert!(morphology.section(bent).unwrap().is_primary);
}

#[test]
fn roots_stay_primary() {
    let (mut morphology, _, _) = fork(false);
    label_primary_children(&mut morphology, BranchingCriterion::Radii);
    assert!(morphology.sections()[0].is_primary);
}
