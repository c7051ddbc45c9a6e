//! Specialized collection types

pub use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Stable handle to a node living in a [`SceneGraph`](crate::scene::SceneGraph)
    ///
    /// Handles are generational: once a node is destroyed its handle never
    /// resolves again, even if the slot is reused.
    pub struct NodeId;
}

/// Arena storing values addressed by [`NodeId`]
pub type NodeArena<T> = SlotMap<NodeId, T>;
