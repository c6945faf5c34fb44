//! Connected polylines collected without a renderer.

use morphology::{Morphology, SectionId};

use crate::context::ReconstructionContext;
use crate::error::SkeletonError;
use crate::policy::{ArborStyle, ConstructionPolicy};
use crate::polyline::{Polyline, PolylineParams};
use crate::sink::{ArticulationObject, GeometrySink, PolylineObject};

/// Sink that keeps the samples of every tube object.
#[derive(Debug, Default)]
pub struct PolylineCollector {
    /// Collected polylines, in draw order.
    pub polylines: Vec<Polyline>,
}

impl GeometrySink for PolylineCollector {
    type Handle = usize;

    fn draw_polyline(&mut self, object: PolylineObject<'_>) -> usize {
        self.polylines.push(object.samples.to_vec());
        self.polylines.len() - 1
    }

    fn draw_articulation(&mut self, _object: ArticulationObject<'_>) -> usize {
        self.polylines.len()
    }
}

/// Polylines of the arbor rooted at `root`, drawn with connected sections
/// down to `max_branching_level`.
pub fn connected_polylines(
    morphology: &Morphology,
    root: SectionId,
    max_branching_level: Option<u32>,
    params: &PolylineParams,
) -> Result<Vec<Polyline>, SkeletonError> {
    let style = ArborStyle {
        max_branching_level,
        params: *params,
        ..ArborStyle::new("arbor")
    };
    let mut collector = PolylineCollector::default();
    let mut context = ReconstructionContext::default();
    ConstructionPolicy::ConnectedSections.draw_arbor(
        morphology,
        root,
        &style,
        &mut context,
        &mut collector,
    )?;
    Ok(collector.polylines)
}
