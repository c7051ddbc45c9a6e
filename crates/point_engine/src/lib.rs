//! # Point Engine
//!
//! A hierarchical scene graph of positioned points, each bound to a
//! pluggable renderable.
//!
//! ## Features
//!
//! - **Templates**: immutable blueprints instantiated into independent node trees
//! - **Cached transforms**: world transforms composed lazily and invalidated downwards
//! - **Visibility inheritance**: `Visible`, `Hidden` or `Inherit` per node
//! - **ECS-lite**: per-node components plus event and periodic systems
//! - **Tick-driven lifecycle**: spawn, render and despawn through a host scheduler
//!
//! ## Quick Start
//!
//! ```rust
//! use point_engine::prelude::*;
//!
//! let mut graph = SceneGraph::new(DrawList::new());
//!
//! let mut moon = Template::<DrawList>::new();
//! moon.add_point(Point::new(0.0, 0.0, 0.0, DebugMarker::dot("moon")));
//!
//! let mut planet = Template::<DrawList>::new();
//! planet
//!     .add_point(Point::new(0.0, 0.0, 0.0, DebugMarker::dot("planet")))
//!     .add_system(SystemTrigger::tick(), systems::velocity)
//!     .set_default(VELOCITY, Vec3::new(0.1, 0.0, 0.0));
//! planet
//!     .add_child_with_transform("moon", moon, Mat4::translation(2.0, 0.0, 0.0))
//!     .unwrap();
//!
//! let root = planet.new_instance(&mut graph, Mat4::identity());
//! graph.spawn(root, 1).unwrap();
//! graph.tick();
//!
//! assert_eq!(graph.world().live_markers(), 2);
//! ```
//!
//! The graph is single-threaded: systems are `Rc` closures and transform
//! caches are `Cell`s, so a [`SceneGraph`](scene::SceneGraph) cannot cross
//! threads.

#![warn(missing_docs)]
#![allow(clippy::must_use_candidate, clippy::missing_errors_doc, clippy::missing_panics_doc)]

pub mod config;
pub mod debug;
pub mod ecs;
pub mod foundation;
pub mod scene;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, SceneConfig, TemplateDefaults},
        debug::{DebugMarker, DebugShape, DrawList, MarkerStyle},
        ecs::{
            component::{ACCELERATION, COLLISION_SHAPE, VELOCITY},
            system, systems, ComponentValue, HostScheduler, System, SystemTrigger, TickScheduler,
        },
        foundation::{
            collections::NodeId,
            math::{Mat4, Mat4Ext, Point3, Transform, Vec3, Vec4},
        },
        scene::{Point, Renderable, SceneError, SceneGraph, Template, Visibility},
    };
}
