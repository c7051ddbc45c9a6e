//! Points: local-space positions bound to a renderable

use std::fmt;

use crate::foundation::math::{Point3, Vec3};
use crate::scene::renderable::Renderable;

/// A local-space position bound to one renderable
///
/// Cloning a point clones its renderable, so two nodes never share one.
pub struct Point<W> {
    /// Position relative to the owning node
    pub position: Point3,
    /// What is drawn at that position
    pub renderable: Box<dyn Renderable<W>>,
}

impl<W> Clone for Point<W> {
    fn clone(&self) -> Self {
        Self {
            position: self.position,
            renderable: self.renderable.box_clone(),
        }
    }
}

impl<W> fmt::Debug for Point<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Point")
            .field("position", &self.position)
            .field("renderable", &self.renderable)
            .finish()
    }
}

impl<W> Point<W> {
    /// Create a point at `(x, y, z)`
    pub fn new(x: f32, y: f32, z: f32, renderable: impl Renderable<W> + 'static) -> Self {
        Self {
            position: Point3::new(x, y, z),
            renderable: Box::new(renderable),
        }
    }

    /// Create a point from a vector offset
    pub fn from_vector(offset: Vec3, renderable: impl Renderable<W> + 'static) -> Self {
        Self {
            position: Point3::from(offset),
            renderable: Box::new(renderable),
        }
    }

    /// Position as a vector offset from the node origin
    pub fn vector(&self) -> Vec3 {
        self.position.coords
    }

    /// Replace the position
    pub fn set_vector(&mut self, offset: Vec3) {
        self.position = Point3::from(offset);
    }

    /// Replace the renderable
    pub fn set_renderable(&mut self, renderable: Box<dyn Renderable<W>>) {
        self.renderable = renderable;
    }
}
