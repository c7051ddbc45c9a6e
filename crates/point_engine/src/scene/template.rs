//! Templates: immutable blueprints for scene subtrees
//!
//! A template is assembled once by application code and then instantiated
//! any number of times. Instances deep-clone everything they may mutate
//! (points and their renderables, event and task tables) so no two
//! instances ever share state.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use crate::ecs::trigger::SPAWN_EVENT;
use crate::ecs::{system, ComponentMap, ComponentValue, System, SystemTrigger};
use crate::foundation::collections::NodeId;
use crate::foundation::math::Mat4;
use crate::scene::error::SceneError;
use crate::scene::graph::SceneGraph;
use crate::scene::node::SceneNode;
use crate::scene::point::Point;

/// Blueprint for a [`SceneGraph`] subtree
pub struct Template<W> {
    points: Vec<Point<W>>,
    children: BTreeMap<String, (Mat4, Rc<Template<W>>)>,
    defaults: ComponentMap,
    events: HashMap<String, Vec<System<W>>>,
    tasks: Vec<(SystemTrigger, System<W>)>,
}

impl<W: 'static> Template<W> {
    /// Create an empty template
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            children: BTreeMap::new(),
            defaults: ComponentMap::new(),
            events: HashMap::new(),
            tasks: Vec::new(),
        }
    }

    /// Create a template from prototype points
    pub fn with_points(points: impl IntoIterator<Item = Point<W>>) -> Self {
        let mut template = Self::new();
        template.points.extend(points);
        template
    }

    /// Prototype points
    pub fn points(&self) -> &[Point<W>] {
        &self.points
    }

    /// Add a prototype point
    pub fn add_point(&mut self, point: Point<W>) -> &mut Self {
        self.points.push(point);
        self
    }

    /// Add several prototype points
    pub fn add_points(&mut self, points: impl IntoIterator<Item = Point<W>>) -> &mut Self {
        self.points.extend(points);
        self
    }

    /// Remove every prototype point matching `predicate`, returning how many were removed
    pub fn remove_point_if(&mut self, mut predicate: impl FnMut(&Point<W>) -> bool) -> usize {
        let before = self.points.len();
        self.points.retain(|point| !predicate(point));
        before - self.points.len()
    }

    /// Register a child template at the identity offset
    pub fn add_child(
        &mut self,
        name: impl Into<String>,
        child: impl Into<Rc<Template<W>>>,
    ) -> Result<&mut Self, SceneError> {
        self.add_child_with_transform(name, child, Mat4::identity())
    }

    /// Register a child template at `transform` relative to this template
    ///
    /// Names are unique per template; a second child with the same name is
    /// rejected rather than replacing the first.
    pub fn add_child_with_transform(
        &mut self,
        name: impl Into<String>,
        child: impl Into<Rc<Template<W>>>,
        transform: Mat4,
    ) -> Result<&mut Self, SceneError> {
        match self.children.entry(name.into()) {
            Entry::Occupied(entry) => Err(SceneError::DuplicateChild(entry.key().clone())),
            Entry::Vacant(entry) => {
                entry.insert((transform, child.into()));
                Ok(self)
            }
        }
    }

    /// Remove a child template, returning its offset and template
    pub fn remove_child(&mut self, name: &str) -> Option<(Mat4, Rc<Template<W>>)> {
        self.children.remove(name)
    }

    /// Remove every child matching `predicate`, returning how many were removed
    pub fn remove_child_if(
        &mut self,
        mut predicate: impl FnMut(&str, &Mat4, &Template<W>) -> bool,
    ) -> usize {
        let before = self.children.len();
        self.children
            .retain(|name, (transform, child)| !predicate(name, transform, child));
        before - self.children.len()
    }

    /// Look up a child template by name
    pub fn child(&self, name: &str) -> Option<(&Mat4, &Rc<Template<W>>)> {
        self.children.get(name).map(|(transform, child)| (transform, child))
    }

    /// Child templates in name order
    pub fn children(&self) -> impl Iterator<Item = (&str, &Mat4, &Rc<Template<W>>)> {
        self.children
            .iter()
            .map(|(name, (transform, child))| (name.as_str(), transform, child))
    }

    /// Set a component value every instance receives when it spawns
    pub fn set_default(&mut self, key: impl Into<String>, value: impl Into<ComponentValue>) -> &mut Self {
        self.defaults.insert(key.into(), value.into());
        self
    }

    /// Default component values
    pub fn defaults(&self) -> &ComponentMap {
        &self.defaults
    }

    /// Register a system
    ///
    /// Event triggers append to that event's listeners; scheduled triggers
    /// append to the periodic task list.
    pub fn add_system<F>(&mut self, trigger: SystemTrigger, f: F) -> &mut Self
    where
        F: Fn(&mut SceneGraph<W>, NodeId) + 'static,
    {
        self.add_shared_system(trigger, system(f))
    }

    /// Register an already shared system
    pub fn add_shared_system(&mut self, trigger: SystemTrigger, system: System<W>) -> &mut Self {
        match trigger {
            SystemTrigger::Event(name) => self.events.entry(name).or_default().push(system),
            scheduled @ SystemTrigger::Scheduled { .. } => self.tasks.push((scheduled, system)),
        }
        self
    }

    /// Listeners registered for `event`, not counting the injected defaults listener
    pub fn listener_count(&self, event: &str) -> usize {
        self.events.get(event).map_or(0, Vec::len)
    }

    /// Periodic systems registered
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Instantiate as a new root node of `graph`
    pub fn new_instance(&self, graph: &mut SceneGraph<W>, transform: Mat4) -> NodeId {
        self.instantiate(graph, transform, None)
    }

    /// Instantiate under `parent`, registered as child `name`
    pub fn new_child_instance(
        &self,
        graph: &mut SceneGraph<W>,
        parent: NodeId,
        name: impl Into<String>,
        transform: Mat4,
    ) -> Result<NodeId, SceneError> {
        graph.add_child_with_transform(parent, name, self, transform)
    }

    /// Build the node tree; the caller links the returned root to `parent`
    pub(crate) fn instantiate(
        &self,
        graph: &mut SceneGraph<W>,
        transform: Mat4,
        parent: Option<NodeId>,
    ) -> NodeId {
        let mut node = SceneNode::new(transform, parent);
        node.points = self.points.clone();
        node.events = self.events.clone();
        node.tasks = self.tasks.clone();

        // Defaults go first so the template's own spawn listeners see them
        let defaults = self.defaults.clone();
        node.events
            .entry(SPAWN_EVENT.to_owned())
            .or_default()
            .insert(0, system(move |graph: &mut SceneGraph<W>, id| {
                graph.apply_components(id, &defaults);
            }));

        let id = graph.insert_node(node);
        for (name, (offset, child)) in &self.children {
            let child_id = child.instantiate(graph, *offset, Some(id));
            graph.link_child(id, name.clone(), child_id);
        }
        id
    }
}

impl<W: 'static> Default for Template<W> {
    fn default() -> Self {
        Self::new()
    }
}
