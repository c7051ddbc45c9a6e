//! Debug drawing primitives and the draw list that collects them
//!
//! Shapes are either temporary, living for a number of ticks, or persistent,
//! living until cleared by id.

use std::collections::HashMap;

use crate::foundation::math::{Vec3, Vec4};

/// Unique identifier for persistent debug shapes
pub type DebugShapeId = String;

/// Debug shape primitives
#[derive(Clone, Debug, PartialEq)]
pub enum DebugShape {
    /// Line segment from start to end
    Line {
        start: Vec3,
        end: Vec3,
        color: Vec4,
        duration: u32,
    },

    /// Sphere at center with radius
    Sphere {
        center: Vec3,
        radius: f32,
        color: Vec4,
        duration: u32,
        wireframe: bool,
    },

    /// Point at position
    Point {
        position: Vec3,
        color: Vec4,
        size: f32,
        duration: u32,
    },
}

impl DebugShape {
    /// Remaining lifetime in ticks
    pub fn duration(&self) -> u32 {
        match self {
            DebugShape::Line { duration, .. }
            | DebugShape::Sphere { duration, .. }
            | DebugShape::Point { duration, .. } => *duration,
        }
    }

    /// Set duration (returns modified shape)
    pub fn with_duration(mut self, new_duration: u32) -> Self {
        match &mut self {
            DebugShape::Line { duration, .. }
            | DebugShape::Sphere { duration, .. }
            | DebugShape::Point { duration, .. } => *duration = new_duration,
        }
        self
    }

    /// Anchor position of the shape
    pub fn origin(&self) -> Vec3 {
        match self {
            DebugShape::Line { start, .. } => *start,
            DebugShape::Sphere { center, .. } => *center,
            DebugShape::Point { position, .. } => *position,
        }
    }

    /// Count down one tick, returns true if expired
    pub fn tick(&mut self) -> bool {
        match self {
            DebugShape::Line { duration, .. }
            | DebugShape::Sphere { duration, .. }
            | DebugShape::Point { duration, .. } => {
                *duration = duration.saturating_sub(1);
                *duration == 0
            }
        }
    }
}

/// Render context collecting debug shapes
///
/// Also tracks how many markers are currently spawned into it, which makes
/// spawn/despawn balance observable.
pub struct DrawList {
    /// Temporary shapes that expire after their duration
    temporary_shapes: Vec<DebugShape>,

    /// Persistent shapes that remain until manually removed
    persistent_shapes: HashMap<DebugShapeId, DebugShape>,

    live_markers: usize,
    next_marker: u64,

    /// Master enable/disable flag
    pub enabled: bool,
}

impl DrawList {
    /// Create an empty draw list
    pub fn new() -> Self {
        Self {
            temporary_shapes: Vec::new(),
            persistent_shapes: HashMap::new(),
            live_markers: 0,
            next_marker: 0,
            enabled: true,
        }
    }

    /// Draw a line segment (temporary)
    pub fn draw_line(&mut self, start: Vec3, end: Vec3, color: Vec4, duration: u32) {
        self.push(DebugShape::Line {
            start,
            end,
            color,
            duration,
        });
    }

    /// Draw a sphere (temporary)
    pub fn draw_sphere(&mut self, center: Vec3, radius: f32, color: Vec4, duration: u32) {
        self.push(DebugShape::Sphere {
            center,
            radius,
            color,
            duration,
            wireframe: true,
        });
    }

    /// Draw a point (temporary)
    pub fn draw_point(&mut self, position: Vec3, color: Vec4, size: f32, duration: u32) {
        self.push(DebugShape::Point {
            position,
            color,
            size,
            duration,
        });
    }

    /// Draw a temporary shape
    pub fn push(&mut self, shape: DebugShape) {
        if !self.enabled {
            return;
        }
        self.temporary_shapes.push(shape);
    }

    /// Draw a persistent shape that remains until explicitly removed
    ///
    /// Drawing again under the same id replaces the previous shape.
    pub fn draw_persistent(&mut self, id: impl Into<String>, shape: DebugShape) {
        if !self.enabled {
            return;
        }
        self.persistent_shapes.insert(id.into(), shape);
    }

    /// Persistent shape by id
    pub fn persistent(&self, id: &str) -> Option<&DebugShape> {
        self.persistent_shapes.get(id)
    }

    /// Remove a persistent shape
    pub fn clear_persistent(&mut self, id: &str) {
        self.persistent_shapes.remove(id);
    }

    /// Count down one tick and drop expired temporary shapes
    pub fn update(&mut self) {
        self.temporary_shapes.retain_mut(|shape| !shape.tick());
    }

    /// All shapes, temporary first
    pub fn shapes(&self) -> Vec<&DebugShape> {
        if !self.enabled {
            return Vec::new();
        }
        self.temporary_shapes
            .iter()
            .chain(self.persistent_shapes.values())
            .collect()
    }

    /// Number of shapes currently held
    pub fn shape_count(&self) -> usize {
        self.temporary_shapes.len() + self.persistent_shapes.len()
    }

    /// Markers spawned and not yet despawned
    pub fn live_markers(&self) -> usize {
        self.live_markers
    }

    /// Clear all shapes (temporary and persistent)
    pub fn clear(&mut self) {
        self.temporary_shapes.clear();
        self.persistent_shapes.clear();
    }

    pub(crate) fn attach_marker(&mut self, label: &str) -> DebugShapeId {
        self.live_markers += 1;
        self.next_marker += 1;
        format!("{}#{}", label, self.next_marker)
    }

    pub(crate) fn detach_marker(&mut self, id: &str) {
        self.live_markers = self.live_markers.saturating_sub(1);
        self.clear_persistent(id);
    }
}

impl Default for DrawList {
    fn default() -> Self {
        Self::new()
    }
}
