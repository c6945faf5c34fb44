//! # Construction Policies
//!
//! Decides how one arbor is partitioned into drawable objects.
//!
//! ## Policies
//!
//! | Policy | Objects |
//! |--------|---------|
//! | `ConnectedSections` | a section continues its parent's object until a leaf or the level limit |
//! | `DisconnectedSections` | as above, root sections only touch the soma unless extended |
//! | `DisconnectedSegments` | one two-sample object per consecutive sample pair |
//! | `ArticulatedSections` | one object per section plus a joint sphere at its end |
//!
//! ## Branching Levels
//!
//! The root section is visited at level 1. A section at a level equal to
//! the arbor's maximum is flushed and its children are never visited.
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec3;
//! use morphology::{ArborType, MorphologyBuilder, Sample, Soma};
//! use skeleton_builder::context::ReconstructionContext;
//! use skeleton_builder::policy::{ArborStyle, ConstructionPolicy};
//! use skeleton_builder::sink::RecordingSink;
//!
//! let mut builder = MorphologyBuilder::new("n", Soma::new(DVec3::ZERO, 1.0));
//! let root = builder.add_root(ArborType::Axon, 0, vec![
//!     Sample::new(DVec3::new(0.0, 2.0, 0.0), 0.5),
//!     Sample::new(DVec3::new(0.0, 9.0, 0.0), 0.5),
//! ]).unwrap();
//! let morphology = builder.build();
//!
//! let mut sink = RecordingSink::new();
//! let mut ctx = ReconstructionContext::default();
//! let style = ArborStyle::new("axon");
//! let arbor = ConstructionPolicy::ConnectedSections
//!     .draw_arbor(&morphology, root, &style, &mut ctx, &mut sink)
//!     .unwrap();
//! assert_eq!(arbor.objects, vec![0]);
//! assert_eq!(sink.records[0].name(), "axon_0");
//! ```

use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
use morphology::{Morphology, MorphologyError, Section, SectionId};
use serde::{Deserialize, Serialize};
use stacker::maybe_grow;

use crate::context::{ConstructionState, ReconstructionContext};
use crate::error::SkeletonError;
use crate::polyline::{
    build_polyline, connected_section_polyline, disconnected_section_polyline, section_polyline,
    PolylineParams, PolylineSample, SectionFlags, SomaBridge,
};
use crate::sink::{ArticulationObject, BevelProfile, GeometrySink, MaterialId, PolylineObject};

// =============================================================================
// POLICY
// =============================================================================

/// How an arbor is split into objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConstructionPolicy {
    /// Sections continue their parent's object.
    #[default]
    ConnectedSections,
    /// Sections continue their parent's object; roots are not welded to the
    /// soma unless `extend_to_soma_origin` is set.
    DisconnectedSections {
        /// Extend root sections to the soma centroid.
        #[serde(default)]
        extend_to_soma_origin: bool,
    },
    /// Every segment is its own object. Produces many objects.
    DisconnectedSegments,
    /// Every section is its own object, with a sphere at its terminal sample.
    ArticulatedSections,
}

/// Per-arbor drawing parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ArborStyle {
    /// Arbor name, used as the object name prefix.
    pub name: String,
    /// Deepest level drawn; `None` draws the whole arbor.
    pub max_branching_level: Option<u32>,
    /// Two materials alternated by section or segment parity.
    pub materials: Option<[MaterialId; 2]>,
    /// Material of articulation spheres.
    pub articulation_material: Option<MaterialId>,
    /// Tube profile.
    pub bevel: BevelProfile,
    /// Close tube ends.
    pub caps: bool,
    /// Weld connected root sections to the soma centroid.
    pub connect_to_soma: bool,
    /// Radius and transform adjustments.
    pub params: PolylineParams,
}

impl ArborStyle {
    /// Default style for an arbor named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            max_branching_level: None,
            materials: None,
            articulation_material: None,
            bevel: BevelProfile::default(),
            caps: true,
            connect_to_soma: false,
            params: PolylineParams::default(),
        }
    }

    fn reaches_limit(&self, level: u32) -> bool {
        self.max_branching_level.is_some_and(|max| level >= max)
    }

    fn material(&self, parity: u32) -> Option<MaterialId> {
        self.materials.map(|pair| pair[(parity % 2) as usize])
    }
}

/// Result of drawing one arbor.
#[derive(Debug, Clone, PartialEq)]
pub struct ArborReconstruction<H> {
    /// Arbor name.
    pub name: String,
    /// Handles of the created objects, in draw order.
    pub objects: Vec<H>,
    /// Sections that started a new object.
    pub secondary_sections: Vec<SectionId>,
}

impl ConstructionPolicy {
    /// Draws the arbor rooted at `root` into `sink`.
    ///
    /// Malformed sections are recorded in `context` and skipped. Fails only
    /// on cancellation or when `root` is not part of `morphology`.
    pub fn draw_arbor<S: GeometrySink>(
        &self,
        morphology: &Morphology,
        root: SectionId,
        style: &ArborStyle,
        context: &mut ReconstructionContext,
        sink: &mut S,
    ) -> Result<ArborReconstruction<S::Handle>, SkeletonError> {
        let mut walker = ArborWalker {
            policy: *self,
            morphology,
            style,
            context,
            sink,
            state: ConstructionState::new(),
        };
        maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
            walker.visit(root, 0)
        })?;

        Ok(ArborReconstruction {
            name: style.name.clone(),
            objects: walker.state.objects,
            secondary_sections: walker.state.secondary_sections,
        })
    }
}

// =============================================================================
// WALKER
// =============================================================================

struct ArborWalker<'a, S: GeometrySink> {
    policy: ConstructionPolicy,
    morphology: &'a Morphology,
    style: &'a ArborStyle,
    context: &'a mut ReconstructionContext,
    sink: &'a mut S,
    state: ConstructionState<S::Handle>,
}

impl<'a, S: GeometrySink> ArborWalker<'a, S> {
    fn visit(&mut self, id: SectionId, parent_level: u32) -> Result<(), SkeletonError> {
        self.context.check_cancelled()?;
        let morphology = self.morphology;
        let section = morphology
            .section(id)
            .ok_or(MorphologyError::UnknownSection(id))?;
        let level = parent_level + 1;

        let descend = match self.policy {
            ConstructionPolicy::ConnectedSections
            | ConstructionPolicy::DisconnectedSections { .. } => {
                self.accumulate_section(id, section, level)
            }
            ConstructionPolicy::DisconnectedSegments => self.draw_segments(section, level),
            ConstructionPolicy::ArticulatedSections => self.draw_articulated(id, section, level),
        };
        if !descend {
            return Ok(());
        }

        for &child in section.children() {
            maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
                self.visit(child, level)
            })?;
        }
        Ok(())
    }

    /// Appends a section to the shared buffer and flushes at leaves and at
    /// the level limit. Returns whether children should be visited.
    fn accumulate_section(&mut self, id: SectionId, section: &Section, level: u32) -> bool {
        let is_last_section = self.style.reaches_limit(level) || !section.has_children();
        let is_continuous = !self.state.polyline.is_empty();
        if !is_continuous {
            self.state.secondary_sections.push(id);
        }

        let flags = SectionFlags {
            is_continuous,
            is_last_section,
        };
        let soma = self.morphology.soma();
        let params = &self.style.params;
        let contribution = match self.policy {
            ConstructionPolicy::DisconnectedSections {
                extend_to_soma_origin,
            } => disconnected_section_polyline(section, soma, flags, extend_to_soma_origin, params),
            _ => connected_section_polyline(section, soma, flags, self.style.connect_to_soma, params),
        };
        match contribution {
            Ok(samples) => self.state.polyline.extend(samples),
            Err(err) => self.context.record(&self.style.name, section.id, err),
        }

        if is_last_section {
            let polyline = std::mem::take(&mut self.state.polyline);
            let name = format!("{}_{}", self.style.name, section.id);
            self.emit(&name, &polyline, self.style.material(section.id));
            return false;
        }
        true
    }

    /// Draws each segment of a section as its own object.
    fn draw_segments(&mut self, section: &Section, level: u32) -> bool {
        match section_polyline(section, &self.style.params) {
            Ok(polyline) => {
                for (index, pair) in polyline.windows(2).enumerate() {
                    let name = format!("{}_{}_{}_segment", self.style.name, section.id, index);
                    self.emit(&name, pair, self.style.material(index as u32));
                }
            }
            Err(err) => self.context.record(&self.style.name, section.id, err),
        }
        !self.style.reaches_limit(level)
    }

    /// Draws a section on its own and places a sphere on its terminal sample.
    fn draw_articulated(&mut self, id: SectionId, section: &Section, level: u32) -> bool {
        self.state.secondary_sections.push(id);
        let flags = SectionFlags {
            is_continuous: false,
            is_last_section: true,
        };
        let bridge = if self.style.connect_to_soma {
            SomaBridge::Origin
        } else {
            SomaBridge::None
        };

        let soma = self.morphology.soma();
        match build_polyline(section, soma, flags, bridge, &self.style.params) {
            Ok(polyline) => {
                let name = format!("{}_{}", self.style.name, section.id);
                self.emit(&name, &polyline, self.style.material(section.id));
                if let Some(joint) = polyline.last() {
                    let name = format!("{name}_articulation");
                    let handle = self.sink.draw_articulation(ArticulationObject {
                        name: &name,
                        center: joint.point,
                        radius: joint.radius,
                        material: self.style.articulation_material,
                    });
                    self.state.objects.push(handle);
                }
            }
            Err(err) => self.context.record(&self.style.name, section.id, err),
        }
        !self.style.reaches_limit(level)
    }

    /// Sends a finished polyline to the sink and advances the frame counter.
    fn emit(&mut self, name: &str, polyline: &[PolylineSample], material: Option<MaterialId>) {
        if polyline.len() < 2 {
            log::debug!("{name}: nothing to draw ({} sample(s))", polyline.len());
            return;
        }
        let handle = self.sink.draw_polyline(PolylineObject {
            name,
            samples: polyline,
            material,
            bevel: self.style.bevel,
            caps: self.style.caps,
        });
        self.state.objects.push(handle);
        log::debug!("{name}: flushed {} sample(s)", polyline.len());

        if let Some(path) = self.context.frames.advance() {
            self.sink.render_frame(&path);
        }
    }
}
