//! System triggers
//!
//! A trigger decides, once and at registration time, whether a system goes
//! into a node's event table or its periodic task list.

/// Fired after a node and its subtree have spawned their points
pub const SPAWN_EVENT: &str = "spawn";

/// Fired after a node has despawned its points and children
pub const DESPAWN_EVENT: &str = "despawn";

/// Fired when a node's local scale changes, and on every spawn
pub const SCALE_CHANGED_EVENT: &str = "scale_changed";

/// Reserved for collision detection layers built on top of the graph
pub const ENTITY_COLLISION_EVENT: &str = "entity_collision";

/// Registration descriptor for a system
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SystemTrigger {
    /// Run whenever the named event is triggered on the node
    Event(String),
    /// Run on the host scheduler while the node stays spawned
    Scheduled {
        /// Ticks before the first run
        delay: u32,
        /// Ticks between runs; zero runs once
        period: u32,
    },
}

impl SystemTrigger {
    /// Trigger on a named event
    pub fn event(name: impl Into<String>) -> Self {
        Self::Event(name.into())
    }

    /// Run every `period` ticks, starting on the next tick
    pub fn interval(period: u32) -> Self {
        Self::Scheduled { delay: 0, period }
    }

    /// Run once after `delay` ticks
    pub fn delay(delay: u32) -> Self {
        Self::Scheduled { delay, period: 0 }
    }

    /// Run every `period` ticks after an initial `delay`
    pub fn delayed_interval(delay: u32, period: u32) -> Self {
        Self::Scheduled { delay, period }
    }

    /// Every tick
    pub fn tick() -> Self {
        Self::interval(1)
    }

    /// [`SPAWN_EVENT`]
    pub fn on_spawn() -> Self {
        Self::event(SPAWN_EVENT)
    }

    /// [`DESPAWN_EVENT`]
    pub fn on_despawn() -> Self {
        Self::event(DESPAWN_EVENT)
    }

    /// [`SCALE_CHANGED_EVENT`]
    pub fn on_scale_changed() -> Self {
        Self::event(SCALE_CHANGED_EVENT)
    }

    /// [`ENTITY_COLLISION_EVENT`]
    pub fn on_entity_collision() -> Self {
        Self::event(ENTITY_COLLISION_EVENT)
    }

    /// Whether this trigger is an event trigger
    pub fn is_event(&self) -> bool {
        matches!(self, Self::Event(_))
    }

    /// Event name, if this is an event trigger
    pub fn event_name(&self) -> Option<&str> {
        match self {
            Self::Event(name) => Some(name),
            Self::Scheduled { .. } => None,
        }
    }

    /// `(delay, period)`, if this is a scheduled trigger
    pub fn schedule(&self) -> Option<(u32, u32)> {
        match self {
            Self::Event(_) => None,
            Self::Scheduled { delay, period } => Some((*delay, *period)),
        }
    }
}
