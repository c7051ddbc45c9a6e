//! Entity-Component-System layer of the scene graph
//!
//! Nodes act as entities: they carry a component bag, and systems attach to
//! them through triggers that either name an event or describe a periodic
//! schedule on the host.

pub mod component;
pub mod trigger;
pub mod system;
pub mod systems;
pub mod scheduler;

pub use component::{ComponentMap, ComponentValue};
pub use trigger::SystemTrigger;
pub use system::{system, System};
pub use scheduler::{HostScheduler, ScheduledTask, TaskAction, TaskGuard, TickScheduler};
