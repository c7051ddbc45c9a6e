//! Motion systems driven by the [`VELOCITY`] and [`ACCELERATION`] components
//!
//! Register them with a periodic trigger, typically [`SystemTrigger::tick`](crate::ecs::SystemTrigger::tick).

use crate::ecs::component::{ComponentValue, ACCELERATION, VELOCITY};
use crate::foundation::collections::NodeId;
use crate::foundation::math::Mat4Ext;
use crate::scene::SceneGraph;

/// Translate the node's local transform by its velocity
///
/// Goes through the direct mutable path: a translation never changes scale,
/// so no scale check is needed.
pub fn velocity<W: 'static>(graph: &mut SceneGraph<W>, node: NodeId) {
    let Some(velocity) = graph.get(node, VELOCITY).and_then(ComponentValue::as_vector) else {
        return;
    };
    if let Some(transform) = graph.transform_mut(node) {
        transform.translate_local(&velocity);
    }
}

/// Add the node's acceleration to its velocity
pub fn acceleration<W: 'static>(graph: &mut SceneGraph<W>, node: NodeId) {
    let Some(acceleration) = graph.get(node, ACCELERATION).and_then(ComponentValue::as_vector) else {
        return;
    };
    let Some(velocity) = graph.get(node, VELOCITY).and_then(ComponentValue::as_vector) else {
        return;
    };
    // Node exists: both lookups above succeeded
    let _ = graph.set(node, VELOCITY, velocity + acceleration);
}
