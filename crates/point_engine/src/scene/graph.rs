//! Scene graph arena
//!
//! Nodes are stored in a slot map and address each other by [`NodeId`]. A
//! node owns its children through its child map; the parent handle it keeps
//! is only used to walk upwards for transform composition and visibility.
//!
//! The graph is single-threaded by construction: systems are `Rc` closures
//! and transform caches are `Cell`s, so a `SceneGraph` is neither `Send` nor
//! `Sync`.

use log::{debug, trace};

use crate::ecs::trigger::SCALE_CHANGED_EVENT;
use crate::ecs::{
    system, ComponentMap, ComponentValue, HostScheduler, System, SystemTrigger, TickScheduler,
};
use crate::foundation::collections::{NodeArena, NodeId};
use crate::foundation::math::{scale_differs, Mat4, Mat4Ext, Point3};
use crate::scene::error::SceneError;
use crate::scene::node::SceneNode;
use crate::scene::point::Point;
use crate::scene::template::Template;
use crate::scene::visibility::Visibility;

/// Runtime tree of scene nodes plus the render context and scheduler they use
pub struct SceneGraph<W> {
    pub(crate) nodes: NodeArena<SceneNode<W>>,
    pub(crate) world: W,
    pub(crate) scheduler: Box<dyn HostScheduler<W>>,
    pub(crate) next_epoch: u64,
}

impl<W: 'static> SceneGraph<W> {
    /// Create an empty graph driven by a [`TickScheduler`]
    pub fn new(world: W) -> Self {
        Self::with_scheduler(world, Box::new(TickScheduler::new()))
    }

    /// Create an empty graph driven by a host-provided scheduler
    pub fn with_scheduler(world: W, scheduler: Box<dyn HostScheduler<W>>) -> Self {
        Self {
            nodes: NodeArena::with_key(),
            world,
            scheduler,
            next_epoch: 0,
        }
    }

    /// Render context handed to renderables
    pub fn world(&self) -> &W {
        &self.world
    }

    /// Mutable render context
    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }

    /// Scheduler driving periodic work
    pub fn scheduler(&self) -> &dyn HostScheduler<W> {
        self.scheduler.as_ref()
    }

    /// Whether `id` resolves to a live node
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes without a parent
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .filter(|(_, node)| node.parent.is_none())
            .map(|(id, _)| id)
    }

    pub(crate) fn node(&self, id: NodeId) -> Result<&SceneNode<W>, SceneError> {
        self.nodes.get(id).ok_or(SceneError::NodeNotFound(id))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut SceneNode<W>, SceneError> {
        self.nodes.get_mut(id).ok_or(SceneError::NodeNotFound(id))
    }

    pub(crate) fn insert_node(&mut self, node: SceneNode<W>) -> NodeId {
        self.nodes.insert(node)
    }

    pub(crate) fn link_child(&mut self, parent: NodeId, name: String, child: NodeId) {
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.insert(name, child);
        }
    }

    pub(crate) fn child_ids(&self, id: NodeId) -> Vec<NodeId> {
        self.nodes
            .get(id)
            .map(|node| node.children.values().copied().collect())
            .unwrap_or_default()
    }

    // ---------------------------------------------------------------------
    // Transforms
    // ---------------------------------------------------------------------

    /// Local transform, relative to the parent
    pub fn transform(&self, id: NodeId) -> Option<&Mat4> {
        self.nodes.get(id).map(|node| &node.transform)
    }

    /// Mutable local transform
    ///
    /// Invalidates the cached world transforms of the node and its subtree
    /// up front. Never fires [`SCALE_CHANGED_EVENT`]; use
    /// [`with_transform`](Self::with_transform) when scale may change.
    pub fn transform_mut(&mut self, id: NodeId) -> Option<&mut Mat4> {
        self.invalidate_cache(id);
        self.nodes.get_mut(id).map(|node| &mut node.transform)
    }

    /// Edit the local transform, firing [`SCALE_CHANGED_EVENT`] if the scale changed
    ///
    /// Returns whether the scale changed.
    pub fn with_transform(
        &mut self,
        id: NodeId,
        edit: impl FnOnce(&mut Mat4),
    ) -> Result<bool, SceneError> {
        let node = self.node_mut(id)?;
        let before = node.transform.scale_vector();
        edit(&mut node.transform);
        let after = node.transform.scale_vector();
        self.invalidate_cache(id);

        let changed = scale_differs(&before, &after);
        if changed {
            trace!("Scale of {:?} changed from {:?} to {:?}", id, before, after);
            self.trigger_event(id, SCALE_CHANGED_EVENT)?;
        }
        Ok(changed)
    }

    /// Composed transform from the root down to this node
    ///
    /// Served from the cache when it is valid; otherwise recomputed from the
    /// parent's world transform and stored.
    pub fn world_transform(&self, id: NodeId) -> Option<Mat4> {
        let node = self.nodes.get(id)?;
        if let Some(cached) = node.cached_world_transform.get() {
            return Some(cached);
        }

        let world = match node.parent {
            Some(parent) => self.world_transform(parent)? * node.transform,
            None => node.transform,
        };
        node.cached_world_transform.set(Some(world));
        Some(world)
    }

    /// World-space origin of the node
    pub fn world_position(&self, id: NodeId) -> Option<Point3> {
        self.world_transform(id)
            .map(|world| Point3::from(world.translation_vector()))
    }

    /// Whether the node currently holds a cached world transform
    pub fn has_cached_world_transform(&self, id: NodeId) -> bool {
        self.nodes
            .get(id)
            .is_some_and(|node| node.cached_world_transform.get().is_some())
    }

    /// Drop the cached world transform of this node and every descendant
    ///
    /// Ancestors are never touched.
    pub fn invalidate_cache(&self, id: NodeId) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        node.cached_world_transform.set(None);
        for &child in node.children.values() {
            self.invalidate_cache(child);
        }
    }

    // ---------------------------------------------------------------------
    // Points
    // ---------------------------------------------------------------------

    /// Points owned by the node, in local space
    pub fn points(&self, id: NodeId) -> Option<&[Point<W>]> {
        self.nodes.get(id).map(|node| node.points.as_slice())
    }

    /// Mutable access to the node's points
    pub fn points_mut(&mut self, id: NodeId) -> Option<&mut [Point<W>]> {
        self.nodes.get_mut(id).map(|node| node.points.as_mut_slice())
    }

    /// Add a point
    pub fn add_point(&mut self, id: NodeId, point: Point<W>) -> Result<(), SceneError> {
        self.node_mut(id)?.points.push(point);
        Ok(())
    }

    /// Add several points
    pub fn add_points(
        &mut self,
        id: NodeId,
        points: impl IntoIterator<Item = Point<W>>,
    ) -> Result<(), SceneError> {
        self.node_mut(id)?.points.extend(points);
        Ok(())
    }

    /// Remove every point matching `predicate`, returning how many were removed
    pub fn remove_point_if(
        &mut self,
        id: NodeId,
        mut predicate: impl FnMut(&Point<W>) -> bool,
    ) -> Result<usize, SceneError> {
        let points = &mut self.node_mut(id)?.points;
        let before = points.len();
        points.retain(|point| !predicate(point));
        Ok(before - points.len())
    }

    // ---------------------------------------------------------------------
    // Hierarchy
    // ---------------------------------------------------------------------

    /// Parent handle, if any
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|node| node.parent)
    }

    /// Whether the node has a parent
    pub fn has_parent(&self, id: NodeId) -> bool {
        self.parent(id).is_some()
    }

    /// Instantiate `template` as child `name` at the identity offset
    pub fn add_child(
        &mut self,
        id: NodeId,
        name: impl Into<String>,
        template: &Template<W>,
    ) -> Result<NodeId, SceneError> {
        self.add_child_with_transform(id, name, template, Mat4::identity())
    }

    /// Instantiate `template` as child `name` at `transform`
    ///
    /// The new child starts unspawned even when the parent is spawned.
    pub fn add_child_with_transform(
        &mut self,
        id: NodeId,
        name: impl Into<String>,
        template: &Template<W>,
        transform: Mat4,
    ) -> Result<NodeId, SceneError> {
        let name = name.into();
        if self.node(id)?.children.contains_key(&name) {
            return Err(SceneError::DuplicateChild(name));
        }

        let child = template.instantiate(self, transform, Some(id));
        debug!("Attached child '{}' {:?} to {:?}", name, child, id);
        self.link_child(id, name, child);
        Ok(child)
    }

    /// Detach child `name`, returning it as a new root
    ///
    /// The detached subtree is despawned first, since nothing renders it any
    /// more. The caller owns the returned handle and may respawn or
    /// [`destroy`](Self::destroy) it.
    pub fn remove_child(&mut self, id: NodeId, name: &str) -> Option<NodeId> {
        let child = self.nodes.get_mut(id)?.children.remove(name)?;
        self.despawn_subtree(child);
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = None;
        }
        self.invalidate_cache(child);
        debug!("Detached child '{}' {:?} from {:?}", name, child, id);
        Some(child)
    }

    /// Destroy every child matching `predicate`, returning how many were removed
    pub fn remove_child_if(
        &mut self,
        id: NodeId,
        mut predicate: impl FnMut(&str, NodeId) -> bool,
    ) -> Result<usize, SceneError> {
        let doomed: Vec<NodeId> = self
            .node(id)?
            .children
            .iter()
            .filter(|(name, child)| predicate(name, **child))
            .map(|(_, &child)| child)
            .collect();

        for &child in &doomed {
            self.destroy(child)?;
        }
        Ok(doomed.len())
    }

    /// Child handle by name
    pub fn child(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.nodes.get(id)?.children.get(name).copied()
    }

    /// Children in name order
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = (&str, NodeId)> + '_ {
        self.nodes
            .get(id)
            .into_iter()
            .flat_map(|node| node.children.iter().map(|(name, &child)| (name.as_str(), child)))
    }

    /// Name under which `child` is registered on `id`
    pub fn name_of_child(&self, id: NodeId, child: NodeId) -> Option<&str> {
        self.nodes
            .get(id)?
            .children
            .iter()
            .find(|(_, candidate)| **candidate == child)
            .map(|(name, _)| name.as_str())
    }

    // ---------------------------------------------------------------------
    // Components
    // ---------------------------------------------------------------------

    /// Set a component value
    pub fn set(
        &mut self,
        id: NodeId,
        key: impl Into<String>,
        value: impl Into<ComponentValue>,
    ) -> Result<(), SceneError> {
        self.node_mut(id)?.components.insert(key.into(), value.into());
        Ok(())
    }

    /// Set a component value unless the key is already present
    pub fn set_if_absent(
        &mut self,
        id: NodeId,
        key: impl Into<String>,
        value: impl Into<ComponentValue>,
    ) -> Result<(), SceneError> {
        self.node_mut(id)?
            .components
            .entry(key.into())
            .or_insert_with(|| value.into());
        Ok(())
    }

    /// Component value by key
    pub fn get(&self, id: NodeId, key: &str) -> Option<&ComponentValue> {
        self.nodes.get(id)?.components.get(key)
    }

    /// Whether the node has a component
    pub fn has(&self, id: NodeId, key: &str) -> bool {
        self.get(id, key).is_some()
    }

    /// Remove a component, returning its value
    pub fn remove(&mut self, id: NodeId, key: &str) -> Option<ComponentValue> {
        self.nodes.get_mut(id)?.components.remove(key)
    }

    /// All components of the node
    pub fn components(&self, id: NodeId) -> Option<&ComponentMap> {
        self.nodes.get(id).map(|node| &node.components)
    }

    pub(crate) fn apply_components(&mut self, id: NodeId, values: &ComponentMap) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.components
                .extend(values.iter().map(|(key, value)| (key.clone(), value.clone())));
        }
    }

    // ---------------------------------------------------------------------
    // Systems and events
    // ---------------------------------------------------------------------

    /// Register a system on this node only
    ///
    /// Scheduled systems added while the node is spawned do not start until
    /// the next [`respawn`](Self::respawn).
    pub fn add_system<F>(&mut self, id: NodeId, trigger: SystemTrigger, f: F) -> Result<(), SceneError>
    where
        F: Fn(&mut SceneGraph<W>, NodeId) + 'static,
    {
        self.add_shared_system(id, trigger, system(f))
    }

    /// Register an already shared system on this node
    pub fn add_shared_system(
        &mut self,
        id: NodeId,
        trigger: SystemTrigger,
        shared: System<W>,
    ) -> Result<(), SceneError> {
        let node = self.node_mut(id)?;
        match trigger {
            SystemTrigger::Event(name) => node.events.entry(name).or_default().push(shared),
            scheduled @ SystemTrigger::Scheduled { .. } => {
                if node.is_spawned() {
                    debug!("Scheduled system on spawned {:?} deferred until respawn", id);
                }
                node.tasks.push((scheduled, shared));
            }
        }
        Ok(())
    }

    /// Invoke every listener of `event` on this node
    ///
    /// The listener list is snapshotted first, so listeners may add systems
    /// or restructure the tree. Dispatch stops if a listener destroys the
    /// node.
    pub fn trigger_event(&mut self, id: NodeId, event: &str) -> Result<(), SceneError> {
        let listeners = match self.node(id)?.events.get(event) {
            Some(listeners) => listeners.clone(),
            None => return Ok(()),
        };

        trace!("Dispatching '{}' to {} listener(s) on {:?}", event, listeners.len(), id);
        for listener in listeners {
            if !self.contains(id) {
                debug!("{:?} destroyed while dispatching '{}'", id, event);
                break;
            }
            listener(self, id);
        }
        Ok(())
    }

    /// Listeners registered on the node for `event`
    pub fn listener_count(&self, id: NodeId, event: &str) -> usize {
        self.nodes
            .get(id)
            .and_then(|node| node.events.get(event))
            .map_or(0, Vec::len)
    }

    /// Periodic systems registered on the node
    pub fn task_count(&self, id: NodeId) -> usize {
        self.nodes.get(id).map_or(0, |node| node.tasks.len())
    }

    // ---------------------------------------------------------------------
    // Visibility
    // ---------------------------------------------------------------------

    /// Visibility set on the node
    pub fn visibility(&self, id: NodeId) -> Option<Visibility> {
        self.nodes.get(id).map(|node| node.visibility)
    }

    /// Change the node's visibility
    pub fn set_visibility(&mut self, id: NodeId, visibility: Visibility) -> Result<(), SceneError> {
        self.node_mut(id)?.visibility = visibility;
        Ok(())
    }

    /// Effective visibility
    ///
    /// Walks up through `Inherit` nodes to the nearest explicit setting; a
    /// root that inherits is visible. Unknown handles are not visible.
    pub fn is_visible(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            let Some(node) = self.nodes.get(current) else {
                return false;
            };
            match node.visibility {
                Visibility::Visible => return true,
                Visibility::Hidden => return false,
                Visibility::Inherit => match node.parent {
                    Some(parent) => current = parent,
                    None => return true,
                },
            }
        }
    }
}
