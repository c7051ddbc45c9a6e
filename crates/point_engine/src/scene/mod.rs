//! Hierarchical scene graph
//!
//! [`Template`]s describe subtrees once; [`SceneGraph`] holds the live node
//! instances created from them, composes their transforms, and drives their
//! [`Renderable`]s through spawn, render and despawn.

mod error;
mod graph;
mod lifecycle;
mod node;
mod point;
mod renderable;
mod template;
mod visibility;

pub use error::SceneError;
pub use graph::SceneGraph;
pub use point::Point;
pub use renderable::Renderable;
pub use template::Template;
pub use visibility::Visibility;

#[cfg(test)]
mod tests;
