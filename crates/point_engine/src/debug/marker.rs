//! Debug markers: renderables that draw into a [`DrawList`]

use log::trace;

use crate::debug::draw::{DebugShape, DebugShapeId, DrawList};
use crate::foundation::math::{Point3, Vec3, Vec4};
use crate::scene::Renderable;

/// Shape a marker draws at its point
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MarkerStyle {
    /// Screen-space dot
    Dot {
        /// Dot size
        size: f32,
    },
    /// Wireframe sphere
    Sphere {
        /// Sphere radius
        radius: f32,
    },
    /// Line from the point along a fixed world offset
    Ray {
        /// End of the ray relative to the point
        offset: Vec3,
    },
}

/// Renderable drawing a debug shape at its point
///
/// A persistent marker keeps one shape in the draw list that follows the
/// point from spawn until despawn. A trailing marker instead leaves a
/// temporary shape behind on every render, each living `trail` ticks.
#[derive(Clone, Debug)]
pub struct DebugMarker {
    label: String,
    style: MarkerStyle,
    color: Vec4,
    trail: Option<u32>,
    shape_id: Option<DebugShapeId>,
}

impl DebugMarker {
    /// Persistent marker
    pub fn new(label: impl Into<String>, style: MarkerStyle) -> Self {
        Self {
            label: label.into(),
            style,
            color: Vec4::new(1.0, 1.0, 1.0, 1.0),
            trail: None,
            shape_id: None,
        }
    }

    /// Dot marker of size one
    pub fn dot(label: impl Into<String>) -> Self {
        Self::new(label, MarkerStyle::Dot { size: 1.0 })
    }

    /// Set the draw color
    pub fn with_color(mut self, color: Vec4) -> Self {
        self.color = color;
        self
    }

    /// Leave a shape behind on every render, each lasting `ticks`
    pub fn with_trail(mut self, ticks: u32) -> Self {
        self.trail = Some(ticks.max(1));
        self
    }

    /// Marker label
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Id of the persistent shape while spawned
    pub fn shape_id(&self) -> Option<&str> {
        self.shape_id.as_deref()
    }

    fn shape_at(&self, position: Point3, duration: u32) -> DebugShape {
        let at = position.coords;
        match self.style {
            MarkerStyle::Dot { size } => DebugShape::Point {
                position: at,
                color: self.color,
                size,
                duration,
            },
            MarkerStyle::Sphere { radius } => DebugShape::Sphere {
                center: at,
                radius,
                color: self.color,
                duration,
                wireframe: true,
            },
            MarkerStyle::Ray { offset } => DebugShape::Line {
                start: at,
                end: at + offset,
                color: self.color,
                duration,
            },
        }
    }
}

impl Renderable<DrawList> for DebugMarker {
    fn spawn(&mut self, world: &mut DrawList, position: Point3) {
        let id = world.attach_marker(&self.label);
        trace!("Marker {} spawned at {:?}", id, position);
        if self.trail.is_none() {
            world.draw_persistent(id.clone(), self.shape_at(position, 0));
        }
        self.shape_id = Some(id);
    }

    fn render(&mut self, world: &mut DrawList, position: Point3) {
        match (self.trail, &self.shape_id) {
            (Some(ticks), _) => world.push(self.shape_at(position, ticks)),
            (None, Some(id)) => world.draw_persistent(id.clone(), self.shape_at(position, 0)),
            (None, None) => {}
        }
    }

    fn despawn(&mut self, world: &mut DrawList, position: Point3) {
        if let Some(id) = self.shape_id.take() {
            trace!("Marker {} despawned at {:?}", id, position);
            world.detach_marker(&id);
        }
    }

    fn is_spawned(&self) -> bool {
        self.shape_id.is_some()
    }

    fn box_clone(&self) -> Box<dyn Renderable<DrawList>> {
        Box::new(Self {
            shape_id: None,
            ..self.clone()
        })
    }
}
