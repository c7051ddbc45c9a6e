//! Visibility flag

/// Visibility set on a node
///
/// Effective visibility is resolved by
/// [`SceneGraph::is_visible`](crate::scene::SceneGraph::is_visible).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// Always drawn
    Visible,
    /// Never drawn
    Hidden,
    /// Follow the parent; visible when there is no parent
    Inherit,
}
