//! Built-in systems

mod motion;

pub use motion::{acceleration, velocity};
