use super::{point, CallKind, CallLog};
use crate::foundation::collections::NodeId;
use crate::foundation::math::Mat4;
use crate::scene::{SceneGraph, Template, Visibility};

/// root -> arm -> hand, each carrying one point
fn chain(graph: &mut SceneGraph<CallLog>) -> (NodeId, NodeId, NodeId) {
    let mut hand = Template::<CallLog>::new();
    hand.add_point(point("hand", 0.0, 0.0, 0.0));
    let mut arm = Template::<CallLog>::new();
    arm.add_point(point("arm", 0.0, 0.0, 0.0));
    arm.add_child("hand", hand).unwrap();
    let mut root = Template::<CallLog>::new();
    root.add_point(point("root", 0.0, 0.0, 0.0));
    root.add_child("arm", arm).unwrap();

    let r = root.new_instance(graph, Mat4::identity());
    let arm = graph.child(r, "arm").unwrap();
    let hand = graph.child(arm, "hand").unwrap();
    (r, arm, hand)
}

#[test]
fn test_defaults_root_visible_children_inherit() {
    let mut graph = SceneGraph::new(CallLog::default());
    let (r, arm, hand) = chain(&mut graph);

    assert_eq!(graph.visibility(r), Some(Visibility::Visible));
    assert_eq!(graph.visibility(arm), Some(Visibility::Inherit));
    assert!(graph.is_visible(hand));
}

#[test]
fn test_hidden_ancestor_hides_inheriting_descendants() {
    let mut graph = SceneGraph::new(CallLog::default());
    let (r, arm, hand) = chain(&mut graph);

    graph.set_visibility(arm, Visibility::Hidden).unwrap();
    assert!(graph.is_visible(r));
    assert!(!graph.is_visible(arm));
    assert!(!graph.is_visible(hand));

    graph.set_visibility(hand, Visibility::Visible).unwrap();
    assert!(graph.is_visible(hand));
}

#[test]
fn test_inheriting_root_is_visible() {
    let mut graph = SceneGraph::new(CallLog::default());
    let (r, _, hand) = chain(&mut graph);

    graph.set_visibility(r, Visibility::Inherit).unwrap();
    assert!(graph.is_visible(r));
    assert!(graph.is_visible(hand));
}

#[test]
fn test_hidden_nodes_skip_render_but_children_still_render() {
    let mut graph = SceneGraph::new(CallLog::default());
    let (r, arm, hand) = chain(&mut graph);
    graph.set_visibility(arm, Visibility::Hidden).unwrap();
    graph.set_visibility(hand, Visibility::Visible).unwrap();

    graph.spawn(r, 1).unwrap();
    graph.tick();

    let log = graph.world();
    assert_eq!(log.count(CallKind::Render, "root"), 1);
    assert_eq!(log.count(CallKind::Render, "arm"), 0);
    assert_eq!(log.count(CallKind::Render, "hand"), 1);
    // Hidden only affects rendering
    assert_eq!(log.count(CallKind::Spawn, "arm"), 1);
}
