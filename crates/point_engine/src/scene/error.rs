//! Scene graph errors

use thiserror::Error;

use crate::foundation::collections::NodeId;

/// Structural misuse of the scene graph
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// Handle does not resolve to a live node
    #[error("Node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// Spawn requested while the node, or a node in its subtree, is spawned
    #[error("Node already spawned: {0:?}")]
    AlreadySpawned(NodeId),

    /// A child with this name already exists under the same parent
    #[error("Duplicate child name: {0}")]
    DuplicateChild(String),
}
