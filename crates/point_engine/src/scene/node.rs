//! Scene node storage
//!
//! Nodes live in the graph's arena. Everything here is plain data; the
//! operations are on [`SceneGraph`](crate::scene::SceneGraph).

use std::cell::Cell;
use std::collections::{BTreeMap, HashMap};

use crate::ecs::{ComponentMap, System, SystemTrigger};
use crate::foundation::collections::NodeId;
use crate::foundation::math::Mat4;
use crate::scene::point::Point;
use crate::scene::visibility::Visibility;

/// Spawn state of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LifecycleState {
    /// Nothing spawned, no tasks running
    Unspawned,
    /// Points spawned and tasks guarded on `epoch`
    Spawned {
        epoch: u64,
        /// Spawned directly (not through an ancestor), so the node drives
        /// its own render task
        owns_render_task: bool,
    },
}

/// A live instance of a template
pub(crate) struct SceneNode<W> {
    pub(crate) transform: Mat4,
    /// `None` means dirty
    pub(crate) cached_world_transform: Cell<Option<Mat4>>,
    pub(crate) points: Vec<Point<W>>,
    /// Non-owning back-reference
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: BTreeMap<String, NodeId>,
    pub(crate) components: ComponentMap,
    pub(crate) events: HashMap<String, Vec<System<W>>>,
    pub(crate) tasks: Vec<(SystemTrigger, System<W>)>,
    pub(crate) visibility: Visibility,
    pub(crate) lifecycle: LifecycleState,
}

impl<W> SceneNode<W> {
    pub(crate) fn new(transform: Mat4, parent: Option<NodeId>) -> Self {
        Self {
            transform,
            cached_world_transform: Cell::new(None),
            points: Vec::new(),
            parent,
            children: BTreeMap::new(),
            components: ComponentMap::new(),
            events: HashMap::new(),
            tasks: Vec::new(),
            visibility: if parent.is_none() { Visibility::Visible } else { Visibility::Inherit },
            lifecycle: LifecycleState::Unspawned,
        }
    }

    pub(crate) fn is_spawned(&self) -> bool {
        matches!(self.lifecycle, LifecycleState::Spawned { .. })
    }
}
