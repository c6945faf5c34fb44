use super::*;
use crate::polyline::PolylineSample;

fn samples() -> Vec<PolylineSample> {
    vec![
        PolylineSample::new(DVec3::ZERO, 1.0),
        PolylineSample::new(DVec3::X, 0.5),
    ]
}

fn object<'a>(name: &'a str, samples: &'a [PolylineSample]) -> PolylineObject<'a> {
    PolylineObject {
        name,
        samples,
        material: Some(MaterialId(1)),
        bevel: BevelProfile::hard(),
        caps: true,
    }
}

#[test]
fn test_bevel_profiles() {
    assert_eq!(BevelProfile::hard().sides, 16);
    assert_eq!(BevelProfile::soft().sides, 4);
    assert_eq!(BevelProfile::default(), BevelProfile::hard());
    assert!(BevelProfile::hard().sides > BevelProfile::soft().sides);
}

#[test]
fn test_recording_sink_returns_indices() {
    let samples = samples();
    let mut sink = RecordingSink::new();
    assert_eq!(sink.draw_polyline(object("a", &samples)), 0);
    let handle = sink.draw_articulation(ArticulationObject {
        name: "a_articulation",
        center: DVec3::X,
        radius: 0.5,
        material: None,
    });
    assert_eq!(handle, 1);
    assert_eq!(sink.get(0).unwrap().name(), "a");
    assert_eq!(sink.get(0).unwrap().samples().len(), 2);
    assert!(sink.get(1).unwrap().samples().is_empty());
    assert_eq!(sink.polylines().count(), 1);
}

#[test]
fn test_recording_sink_collects_frames() {
    let mut sink = RecordingSink::new();
    sink.render_frame(Path::new("out/frame_00001"));
    assert_eq!(sink.frames, vec![PathBuf::from("out/frame_00001")]);
}

#[tokio::test]
async fn test_queued_sink_preserves_order() {
    let samples = samples();
    let (mut sink, mut receiver) = queued_sink();

    let first = sink.draw_polyline(object("first", &samples));
    sink.render_frame(Path::new("frames/frame_00001"));
    let second = sink.draw_polyline(object("second", &samples));
    drop(sink);

    assert_eq!((first, second), (0, 1));

    let mut received = Vec::new();
    while let Some(command) = receiver.recv().await {
        received.push(command);
    }
    assert_eq!(received.len(), 3);
    assert!(matches!(&received[0], DrawCommand::Draw { handle: 0, record } if record.name() == "first"));
    assert!(matches!(&received[1], DrawCommand::RenderFrame { .. }));
    assert!(matches!(&received[2], DrawCommand::Draw { handle: 1, record } if record.name() == "second"));
}

#[test]
fn test_queued_sink_survives_closed_receiver() {
    let samples = samples();
    let (mut sink, receiver) = queued_sink();
    drop(receiver);
    assert_eq!(sink.draw_polyline(object("orphan", &samples)), 0);
    assert_eq!(sink.draw_polyline(object("orphan", &samples)), 1);
}
