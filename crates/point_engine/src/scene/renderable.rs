//! Renderable capability
//!
//! Anything a point can be bound to: particles, display proxies, debug
//! markers. The scene graph only ever talks to this trait.

use std::fmt;

use crate::foundation::math::Point3;

/// Something that can be spawned, rendered and despawned at a world position
///
/// `W` is the render context (the host "world"). The graph owns it and
/// passes it through untouched.
///
/// `spawn` and `despawn` are called exactly once per spawn cycle; `render`
/// may be called every tick in between.
pub trait Renderable<W>: fmt::Debug {
    /// Create whatever the renderable needs at `position`
    fn spawn(&mut self, world: &mut W, position: Point3);

    /// Draw or update at `position`
    fn render(&mut self, world: &mut W, position: Point3);

    /// Tear down at the last known `position`
    fn despawn(&mut self, world: &mut W, position: Point3);

    /// Whether [`spawn`](Renderable::spawn) has been called without a matching despawn
    fn is_spawned(&self) -> bool;

    /// Clone into a fresh, unspawned renderable
    fn box_clone(&self) -> Box<dyn Renderable<W>>;
}

impl<W> Clone for Box<dyn Renderable<W>> {
    fn clone(&self) -> Self {
        self.box_clone()
    }
}
