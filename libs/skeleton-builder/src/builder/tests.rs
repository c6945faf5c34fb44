use super::*;
use std::path::PathBuf;

use approx::assert_relative_eq;
use glam::DVec3;
use morphology::{InMemorySource, MorphologyBuilder, MorphologyError, Sample, Soma};

use crate::options::{ArborOptions, RadiusPolicy};
use crate::policy::ConstructionPolicy;
use crate::sink::{queued_sink, DrawCommand, RecordingSink};

fn sample(x: f64, y: f64, z: f64, radius: f64) -> Sample {
    Sample::new(DVec3::new(x, y, z), radius)
}

/// Apical dendrite, two basal dendrites and an axon. The axon starts with a
/// sample inside the soma.
fn neuron() -> Morphology {
    let mut builder = MorphologyBuilder::new("neuron", Soma::new(DVec3::ZERO, 2.0));
    let apical = builder
        .add_root(
            ArborType::ApicalDendrite,
            0,
            vec![sample(0.0, 3.0, 0.0, 1.0), sample(0.0, 10.0, 0.0, 0.8)],
        )
        .unwrap();
    builder
        .add_child(apical, 1, vec![sample(0.0, 10.0, 0.0, 0.6), sample(2.0, 14.0, 0.0, 0.5)])
        .unwrap();
    builder
        .add_child(apical, 2, vec![sample(0.0, 10.0, 0.0, 0.6), sample(-2.0, 14.0, 0.0, 0.5)])
        .unwrap();
    builder
        .add_root(
            ArborType::BasalDendrite,
            3,
            vec![sample(3.0, 0.0, 0.0, 0.7), sample(8.0, 0.0, 0.0, 0.5)],
        )
        .unwrap();
    builder
        .add_root(
            ArborType::BasalDendrite,
            4,
            vec![sample(-3.0, 0.0, 0.0, 0.7), sample(-8.0, 0.0, 0.0, 0.5)],
        )
        .unwrap();
    builder
        .add_root(
            ArborType::Axon,
            5,
            vec![
                sample(0.0, -0.5, 0.0, 0.4),
                sample(0.0, -4.0, 0.0, 0.4),
                sample(0.0, -9.0, 0.0, 0.3),
            ],
        )
        .unwrap();
    builder.build()
}

fn names(sink: &RecordingSink) -> Vec<&str> {
    sink.records.iter().map(|record| record.name()).collect()
}

#[test]
fn test_arbor_order_and_names() {
    let skeleton = SkeletonBuilder::new(&neuron(), SkeletonOptions::default()).unwrap();
    let mut sink = RecordingSink::new();
    let result = skeleton.draw_morphology_skeleton(&mut sink).unwrap();

    let arbors: Vec<&str> = result.arbors.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(
        arbors,
        vec!["apical_dendrite", "basal_dendrite_0", "basal_dendrite_1", "axon"]
    );
    assert_eq!(
        names(&sink),
        vec![
            "apical_dendrite_1",
            "apical_dendrite_2",
            "basal_dendrite_0_3",
            "basal_dendrite_1_4",
            "axon_5",
        ]
    );
    assert_eq!(result.objects().count(), 5);
    assert!(result.diagnostics.is_empty());
}

#[test]
fn test_ignored_arbors_are_skipped() {
    let options = SkeletonOptions {
        axon: ArborOptions {
            ignore: true,
            ..Default::default()
        },
        basal_dendrites: ArborOptions {
            ignore: true,
            ..Default::default()
        },
        ..Default::default()
    };
    let skeleton = SkeletonBuilder::new(&neuron(), options).unwrap();
    let mut sink = RecordingSink::new();
    let result = skeleton.draw_morphology_skeleton(&mut sink).unwrap();
    assert_eq!(result.arbors.len(), 1);
    assert_eq!(result.arbors[0].name, "apical_dendrite");
}

#[test]
fn test_missing_arbors_are_not_errors() {
    let mut builder = MorphologyBuilder::new("lonely", Soma::new(DVec3::ZERO, 1.0));
    builder
        .add_root(
            ArborType::BasalDendrite,
            0,
            vec![sample(2.0, 0.0, 0.0, 0.5), sample(5.0, 0.0, 0.0, 0.5)],
        )
        .unwrap();
    let skeleton = SkeletonBuilder::new(&builder.build(), SkeletonOptions::default()).unwrap();
    let mut sink = RecordingSink::new();
    let result = skeleton.draw_morphology_skeleton(&mut sink).unwrap();
    assert_eq!(result.arbors.len(), 1);
}

#[test]
fn test_per_arbor_branching_limit() {
    let options = SkeletonOptions {
        apical_dendrite: ArborOptions {
            max_branching_order: Some(1),
            ..Default::default()
        },
        ..Default::default()
    };
    let skeleton = SkeletonBuilder::new(&neuron(), options).unwrap();
    let mut sink = RecordingSink::new();
    skeleton.draw_morphology_skeleton(&mut sink).unwrap();
    assert_eq!(names(&sink)[0], "apical_dendrite_0");
    assert_eq!(sink.records.len(), 4);
}

#[test]
fn test_repair_works_on_a_copy() {
    let morphology = neuron();
    let options = SkeletonOptions {
        repair_morphology: true,
        ..Default::default()
    };
    let skeleton = SkeletonBuilder::new(&morphology, options).unwrap();

    let axon = morphology.axon().unwrap().root;
    assert_eq!(morphology.section(axon).unwrap().samples.len(), 3);
    assert_eq!(skeleton.morphology().section(axon).unwrap().samples.len(), 2);

    let apical = morphology.apical_dendrite().unwrap().root;
    let children = skeleton.morphology().section(apical).unwrap().children();
    let primaries = children
        .iter()
        .filter(|id| skeleton.morphology().section(**id).unwrap().is_primary)
        .count();
    assert_eq!(primaries, 1);
}

#[test]
fn test_frames_run_across_arbors_and_restart_per_job() {
    let options = SkeletonOptions {
        render_progressive_frames: true,
        frame_destination: Some(PathBuf::from("frames")),
        ..Default::default()
    };
    let skeleton = SkeletonBuilder::new(&neuron(), options).unwrap();

    let mut sink = RecordingSink::new();
    let result = skeleton.draw_morphology_skeleton(&mut sink).unwrap();
    assert_eq!(result.frames_rendered, 5);
    assert_eq!(sink.frames.first(), Some(&PathBuf::from("frames/frame_00001")));
    assert_eq!(sink.frames.last(), Some(&PathBuf::from("frames/frame_00005")));

    let mut second = RecordingSink::new();
    skeleton.draw_morphology_skeleton(&mut second).unwrap();
    assert_eq!(second.frames.first(), Some(&PathBuf::from("frames/frame_00001")));
}

#[test]
fn test_frames_disabled_by_default() {
    let skeleton = SkeletonBuilder::new(&neuron(), SkeletonOptions::default()).unwrap();
    let mut sink = RecordingSink::new();
    let result = skeleton.draw_morphology_skeleton(&mut sink).unwrap();
    assert_eq!(result.frames_rendered, 0);
    assert!(sink.frames.is_empty());
}

#[test]
fn test_connect_to_soma_on_every_arbor() {
    let options = SkeletonOptions {
        connect_to_soma: true,
        radii: RadiusPolicy::Fixed(0.2),
        ..Default::default()
    };
    let skeleton = SkeletonBuilder::new(&neuron(), options).unwrap();
    let mut sink = RecordingSink::new();
    let result = skeleton.draw_morphology_skeleton(&mut sink).unwrap();

    for arbor in &result.arbors {
        let first = sink.get(arbor.objects[0]).unwrap().samples()[0];
        assert_eq!(first.point, DVec3::ZERO);
        assert_relative_eq!(first.radius, 2.0);
    }
}

#[test]
fn test_detached_root_is_not_bridged() {
    let mut builder = MorphologyBuilder::new("detached", Soma::new(DVec3::ZERO, 2.0));
    builder
        .add_root(
            ArborType::Axon,
            0,
            vec![sample(0.0, -20.0, 0.0, 0.4), sample(0.0, -30.0, 0.0, 0.3)],
        )
        .unwrap();
    let options = SkeletonOptions {
        connect_to_soma: true,
        repair_morphology: true,
        ..Default::default()
    };
    let skeleton = SkeletonBuilder::new(&builder.build(), options).unwrap();
    let mut sink = RecordingSink::new();
    let result = skeleton.draw_morphology_skeleton(&mut sink).unwrap();

    let samples = sink.get(result.arbors[0].objects[0]).unwrap().samples();
    assert_eq!(samples[0].point, DVec3::new(0.0, -20.0, 0.0));
    assert!(samples.iter().all(|s| s.point.y <= -20.0));
}

#[test]
fn test_cancellation_aborts_job() {
    let token = CancellationToken::new();
    token.cancel();
    let skeleton = SkeletonBuilder::new(&neuron(), SkeletonOptions::default())
        .unwrap()
        .with_cancellation(token);
    let mut sink = RecordingSink::new();
    let err = skeleton.draw_morphology_skeleton(&mut sink).unwrap_err();
    assert_eq!(err, SkeletonError::Cancelled);
}

#[test]
fn test_invalid_options_rejected() {
    let options = SkeletonOptions {
        radii: RadiusPolicy::Scaled(-1.0),
        ..Default::default()
    };
    let err = SkeletonBuilder::new(&neuron(), options).unwrap_err();
    assert!(matches!(err, SkeletonError::Config(_)));
}

#[test]
fn test_reconstruct_from_source() {
    let mut source = InMemorySource::default();
    source.insert(neuron());

    let mut sink = RecordingSink::new();
    let result =
        reconstruct_skeleton(&source, "neuron", SkeletonOptions::default(), &mut sink).unwrap();
    assert_eq!(result.arbors.len(), 4);

    let mut sink = RecordingSink::new();
    let err = reconstruct_skeleton(&source, "missing", SkeletonOptions::default(), &mut sink)
        .unwrap_err();
    assert!(matches!(
        err,
        SkeletonError::Load(MorphologyError::LoadFailed { .. })
    ));
    assert!(sink.records.is_empty());
}

#[test]
fn test_articulated_policy_through_builder() {
    let options = SkeletonOptions {
        policy: ConstructionPolicy::ArticulatedSections,
        ..Default::default()
    };
    let skeleton = SkeletonBuilder::new(&neuron(), options).unwrap();
    let mut sink = RecordingSink::new();
    let result = skeleton.draw_morphology_skeleton(&mut sink).unwrap();
    assert_eq!(result.objects().count(), 12);
}

#[tokio::test]
async fn test_queued_sink_receives_objects_in_order() {
    let skeleton = SkeletonBuilder::new(&neuron(), SkeletonOptions::default()).unwrap();
    let (mut sink, mut receiver) = queued_sink();

    let consumer = tokio::spawn(async move {
        let mut names = Vec::new();
        while let Some(command) = receiver.recv().await {
            if let DrawCommand::Draw { record, .. } = command {
                names.push(record.name().to_string());
            }
        }
        names
    });

    let result = skeleton.draw_morphology_skeleton(&mut sink).unwrap();
    drop(sink);

    let handles: Vec<u64> = result.objects().copied().collect();
    assert_eq!(handles, vec![0, 1, 2, 3, 4]);
    let names = consumer.await.unwrap();
    assert_eq!(
        names,
        vec![
            "apical_dendrite_1",
            "apical_dendrite_2",
            "basal_dendrite_0_3",
            "basal_dendrite_1_4",
            "axon_5",
        ]
    );
}

#[test]
fn test_connected_polylines() {
    let morphology = neuron();
    let root = morphology.apical_dendrite().unwrap().root;
    let polylines =
        connected_polylines(&morphology, root, None, &PolylineParams::default()).unwrap();
    assert_eq!(polylines.len(), 2);
    assert_eq!(polylines[0][0].point, DVec3::new(0.0, 3.0, 0.0));
    assert_eq!(polylines[1][0].point, DVec3::new(0.0, 10.0, 0.0));

    let truncated =
        connected_polylines(&morphology, root, Some(1), &PolylineParams::default()).unwrap();
    assert_eq!(truncated.len(), 1);
}
