use super::*;
use approx::assert_relative_eq;
use morphology::{ArborType, MorphologyBuilder};

fn section(samples: Vec<Sample>) -> Section {
    let mut builder = MorphologyBuilder::new("s", Soma::new(DVec3::ZERO, 1.0));
    let root = builder.add_root(ArborType::Axon, 0, samples).unwrap();
    builder.build().section(root).unwrap().clone()
}

#[test]
fn test_section_radii_are_scaled() {
    let section = section(vec![
        Sample::new(DVec3::ZERO, 1.0),
        Sample::new(DVec3::new(0.0, 0.0, 10.0), 1.0),
    ]);
    let mut skeleton = MetaSkeleton::new();
    assert_eq!(skeleton.add_section(&section), 13);
    assert_relative_eq!(skeleton.elements()[0].radius, 1.575);
    assert_relative_eq!(skeleton.smallest_radius(), 1.0);
}

#[test]
fn test_single_sample_section_adds_nothing() {
    let section = section(vec![Sample::new(DVec3::ZERO, 0.2)]);
    let mut skeleton = MetaSkeleton::new();
    assert_eq!(skeleton.add_section(&section), 0);
    assert_relative_eq!(skeleton.smallest_radius(), INITIAL_SMALLEST_RADIUS);
}

#[test]
fn test_smallest_radius_tracks_segment_starts() {
    let section = section(vec![
        Sample::new(DVec3::ZERO, 0.8),
        Sample::new(DVec3::new(2.0, 0.0, 0.0), 0.3),
        Sample::new(DVec3::new(4.0, 0.0, 0.0), 0.1),
    ]);
    let mut skeleton = MetaSkeleton::new();
    skeleton.add_section(&section);
    assert_relative_eq!(skeleton.smallest_radius(), 0.3);
}

#[test]
fn test_polyline_cap_marker_is_ignored() {
    let mut skeleton = MetaSkeleton::new();
    let with_cap = [
        PolylineSample::new(DVec3::ZERO, 0.5),
        PolylineSample::new(DVec3::X * 3.0, 0.5),
        PolylineSample::new(DVec3::X * 3.0, 0.5),
    ];
    let added = skeleton.add_polyline(&with_cap);

    let mut plain = MetaSkeleton::new();
    assert_eq!(added, plain.add_polyline(&with_cap[..2]));
}

#[test]
fn test_emanate_from_soma() {
    let soma = Soma::new(DVec3::ZERO, 2.0);
    let first = Sample::new(DVec3::new(0.0, 6.0, 0.0), 0.5);
    let mut skeleton = MetaSkeleton::new();
    assert!(skeleton.emanate(&soma, &first) > 0);

    let elements = skeleton.elements();
    assert_eq!(elements[0].center, DVec3::ZERO);
    assert_relative_eq!(elements[0].radius, 2.0);
    assert!(elements.iter().all(|e| e.center.y < 6.0));
    assert_relative_eq!(skeleton.smallest_radius(), INITIAL_SMALLEST_RADIUS);
}

#[test]
fn test_merge_keeps_order_and_minimum() {
    let mut first = MetaSkeleton::new();
    first.add_polyline(&[
        PolylineSample::new(DVec3::ZERO, 0.7),
        PolylineSample::new(DVec3::X, 0.7),
    ]);
    let mut second = MetaSkeleton::new();
    second.add_polyline(&[
        PolylineSample::new(DVec3::Y * 5.0, 0.2),
        PolylineSample::new(DVec3::Y * 6.0, 0.2),
    ]);
    let first_len = first.elements().len();

    first.merge(second);
    assert_eq!(first.elements()[first_len].center, DVec3::Y * 5.0);
    assert_relative_eq!(first.smallest_radius(), 0.2);
}

#[test]
fn test_finalize_resolution() {
    let mut skeleton = MetaSkeleton::new();
    skeleton.add_polyline(&[
        PolylineSample::new(DVec3::ZERO, 0.25),
        PolylineSample::new(DVec3::Z, 0.25),
    ]);
    let object = skeleton.finalize("cell");
    assert_eq!(object.label, "cell");
    assert_relative_eq!(object.resolution, 0.25);

    let empty = MetaSkeleton::new().finalize("empty");
    assert_relative_eq!(empty.resolution, INITIAL_META_RESOLUTION);
}
