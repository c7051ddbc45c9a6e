//! Scene graph scenarios run against a recording render context

mod lifecycle;
mod template_reuse;
mod visibility;

use crate::foundation::math::Point3;
use crate::scene::{Point, Renderable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum CallKind {
    Spawn,
    Render,
    Despawn,
}

#[derive(Debug, Clone, PartialEq)]
pub(super) struct Call {
    pub kind: CallKind,
    pub tag: &'static str,
    pub position: Point3,
}

/// Render context that records every renderable call in order
#[derive(Debug, Default)]
pub(super) struct CallLog {
    pub calls: Vec<Call>,
}

impl CallLog {
    pub fn count(&self, kind: CallKind, tag: &str) -> usize {
        self.calls
            .iter()
            .filter(|call| call.kind == kind && call.tag == tag)
            .count()
    }

    pub fn kinds(&self) -> Vec<(CallKind, &'static str)> {
        self.calls.iter().map(|call| (call.kind, call.tag)).collect()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

#[derive(Debug, Clone)]
pub(super) struct Recorder {
    tag: &'static str,
    spawned: bool,
}

impl Recorder {
    pub fn new(tag: &'static str) -> Self {
        Self { tag, spawned: false }
    }

    fn record(&self, world: &mut CallLog, kind: CallKind, position: Point3) {
        world.calls.push(Call {
            kind,
            tag: self.tag,
            position,
        });
    }
}

impl Renderable<CallLog> for Recorder {
    fn spawn(&mut self, world: &mut CallLog, position: Point3) {
        assert!(!self.spawned, "{} spawned twice", self.tag);
        self.spawned = true;
        self.record(world, CallKind::Spawn, position);
    }

    fn render(&mut self, world: &mut CallLog, position: Point3) {
        assert!(self.spawned, "{} rendered while despawned", self.tag);
        self.record(world, CallKind::Render, position);
    }

    fn despawn(&mut self, world: &mut CallLog, position: Point3) {
        assert!(self.spawned, "{} despawned while not spawned", self.tag);
        self.spawned = false;
        self.record(world, CallKind::Despawn, position);
    }

    fn is_spawned(&self) -> bool {
        self.spawned
    }

    fn box_clone(&self) -> Box<dyn Renderable<CallLog>> {
        Box::new(Recorder::new(self.tag))
    }
}

pub(super) fn point(tag: &'static str, x: f32, y: f32, z: f32) -> Point<CallLog> {
    Point::new(x, y, z, Recorder::new(tag))
}
