//! System type shared by events and scheduled tasks

use std::rc::Rc;

use crate::foundation::collections::NodeId;
use crate::scene::SceneGraph;

/// A system runs against one node of a scene graph
///
/// Systems may freely mutate the graph, including the node they were invoked
/// for. They are reference counted so event tables can be copied from a
/// template into every instance without cloning the closures themselves.
pub type System<W> = Rc<dyn Fn(&mut SceneGraph<W>, NodeId)>;

/// Wrap a closure or function into a [`System`]
pub fn system<W, F>(f: F) -> System<W>
where
    F: Fn(&mut SceneGraph<W>, NodeId) + 'static,
{
    Rc::new(f)
}
