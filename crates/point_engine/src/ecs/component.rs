//! Component values for the per-node key/value store
//!
//! Nodes carry a loosely typed bag of components. Values are a closed set of
//! variants so defaults can be cloned into every instance and loaded from
//! config files.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec3;

/// Well-known component key: per-tick translation applied by [`velocity`](crate::ecs::systems::velocity)
pub const VELOCITY: &str = "velocity";

/// Well-known component key: per-tick change of [`VELOCITY`]
pub const ACCELERATION: &str = "acceleration";

/// Well-known component key reserved for collision shapes
pub const COLLISION_SHAPE: &str = "collision_shape";

/// Component key/value bag owned by a node or a template
pub type ComponentMap = HashMap<String, ComponentValue>;

/// Variant for type-safe component values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ComponentValue {
    /// Boolean flag
    Bool(bool),
    /// Signed integer
    Int(i64),
    /// Scalar
    Float(f32),
    /// Free-form text
    Text(String),
    /// 3D vector (velocity, acceleration, offsets)
    Vector(Vec3),
}

impl ComponentValue {
    /// Get the vector payload if this is a vector
    pub fn as_vector(&self) -> Option<Vec3> {
        if let Self::Vector(v) = self {
            Some(*v)
        } else {
            None
        }
    }

    /// Get the scalar payload, widening integers
    #[allow(clippy::cast_precision_loss)]
    pub fn as_float(&self) -> Option<f32> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f32),
            _ => None,
        }
    }

    /// Get the integer payload if this is an integer
    pub fn as_int(&self) -> Option<i64> {
        if let Self::Int(i) = self {
            Some(*i)
        } else {
            None
        }
    }

    /// Get the boolean payload if this is a flag
    pub fn as_bool(&self) -> Option<bool> {
        if let Self::Bool(b) = self {
            Some(*b)
        } else {
            None
        }
    }

    /// Get the text payload if this is text
    pub fn as_text(&self) -> Option<&str> {
        if let Self::Text(t) = self {
            Some(t)
        } else {
            None
        }
    }
}

impl From<bool> for ComponentValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ComponentValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f32> for ComponentValue {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for ComponentValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for ComponentValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec3> for ComponentValue {
    fn from(value: Vec3) -> Self {
        Self::Vector(value)
    }
}
