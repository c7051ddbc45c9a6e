//! Debug drawing for scene graphs
//!
//! A host-independent render context ([`DrawList`]) and the renderable that
//! draws into it ([`DebugMarker`]). Useful for headless runs and tests, where
//! what matters is which shapes a tick produced.

pub mod draw;
pub mod marker;

pub use draw::{DebugShape, DebugShapeId, DrawList};
pub use marker::{DebugMarker, MarkerStyle};
