use super::{point, CallKind, CallLog};
use crate::ecs::{ComponentValue, SystemTrigger};
use crate::foundation::collections::NodeId;
use crate::foundation::math::{Mat4, Mat4Ext};
use crate::scene::{SceneError, SceneGraph, Template};

fn record_event(name: &'static str) -> impl Fn(&mut SceneGraph<CallLog>, NodeId) {
    move |graph, id| {
        let key = format!("{name}_count");
        let seen = graph.get(id, &key).and_then(ComponentValue::as_int).unwrap_or(0);
        graph.set(id, key, seen + 1).unwrap();
    }
}

fn count(graph: &SceneGraph<CallLog>, id: NodeId, name: &str) -> i64 {
    graph
        .get(id, &format!("{name}_count"))
        .and_then(ComponentValue::as_int)
        .unwrap_or(0)
}

/// Body with one point and a child arm with two points
fn body(graph: &mut SceneGraph<CallLog>) -> NodeId {
    let mut arm = Template::<CallLog>::new();
    arm.add_points([point("arm", 0.0, 1.0, 0.0), point("arm", 0.0, 2.0, 0.0)])
        .add_system(SystemTrigger::on_spawn(), record_event("spawn"))
        .add_system(SystemTrigger::on_despawn(), record_event("despawn"));
    let mut body = Template::<CallLog>::new();
    body.add_point(point("body", 0.0, 0.0, 0.0))
        .add_system(SystemTrigger::on_spawn(), record_event("spawn"))
        .add_system(SystemTrigger::on_despawn(), record_event("despawn"))
        .add_system(SystemTrigger::on_scale_changed(), record_event("scale"));
    body.add_child_with_transform("arm", arm, Mat4::translation(1.0, 0.0, 0.0))
        .unwrap();
    body.new_instance(graph, Mat4::identity())
}

#[test]
fn test_spawn_order_children_first() {
    let mut graph = SceneGraph::new(CallLog::default());
    let root = body(&mut graph);
    graph.spawn(root, 1).unwrap();

    assert_eq!(
        graph.world().kinds(),
        vec![
            (CallKind::Spawn, "arm"),
            (CallKind::Spawn, "arm"),
            (CallKind::Spawn, "body"),
        ]
    );
    let arm = graph.child(root, "arm").unwrap();
    assert!(graph.is_spawned(root));
    assert!(graph.is_spawned(arm));
    assert_eq!(count(&graph, root, "spawn"), 1);
    assert_eq!(count(&graph, arm, "spawn"), 1);
    // Spawning always reports a scale change
    assert_eq!(count(&graph, root, "scale"), 1);
}

#[test]
fn test_spawn_despawn_symmetry() {
    let mut graph = SceneGraph::new(CallLog::default());
    let root = body(&mut graph);
    graph.spawn(root, 1).unwrap();
    graph.tick();
    graph.despawn(root).unwrap();

    let log = graph.world();
    for tag in ["body", "arm"] {
        assert_eq!(log.count(CallKind::Spawn, tag), log.count(CallKind::Despawn, tag));
    }
    let arm = graph.child(root, "arm").unwrap();
    assert!(!graph.is_spawned(root));
    assert!(!graph.is_spawned(arm));
    assert_eq!(count(&graph, root, "despawn"), 1);
    assert_eq!(count(&graph, arm, "despawn"), 1);
}

#[test]
fn test_nothing_renders_after_despawn() {
    let mut graph = SceneGraph::new(CallLog::default());
    let root = body(&mut graph);
    graph.spawn(root, 1).unwrap();
    graph.tick();
    graph.despawn(root).unwrap();
    graph.world_mut().clear();

    for _ in 0..5 {
        assert_eq!(graph.tick(), 0);
    }
    assert!(graph.world().calls.is_empty());
    assert_eq!(graph.scheduler().pending(), 0);
}

#[test]
fn test_double_spawn_rejected() {
    let mut graph = SceneGraph::new(CallLog::default());
    let root = body(&mut graph);
    let arm = graph.child(root, "arm").unwrap();

    graph.spawn(arm, 1).unwrap();
    assert_eq!(graph.spawn(root, 1), Err(SceneError::AlreadySpawned(arm)));
    assert_eq!(graph.spawn(arm, 1), Err(SceneError::AlreadySpawned(arm)));
    assert!(!graph.is_spawned(root));
    assert_eq!(graph.world().count(CallKind::Spawn, "arm"), 2);
}

#[test]
fn test_despawn_is_idempotent() {
    let mut graph = SceneGraph::new(CallLog::default());
    let root = body(&mut graph);

    graph.despawn(root).unwrap();
    assert!(graph.world().calls.is_empty());

    graph.spawn(root, 1).unwrap();
    graph.despawn(root).unwrap();
    graph.despawn(root).unwrap();
    assert_eq!(graph.world().count(CallKind::Despawn, "body"), 1);
    assert_eq!(count(&graph, root, "despawn"), 1);
}

#[test]
fn test_despawn_uses_last_known_position() {
    let mut graph = SceneGraph::new(CallLog::default());
    let root = body(&mut graph);
    graph.spawn(root, 1).unwrap();
    *graph.transform_mut(root).unwrap() = Mat4::translation(0.0, 0.0, 4.0);
    graph.despawn(root).unwrap();

    let despawned = graph
        .world()
        .calls
        .iter()
        .find(|call| call.kind == CallKind::Despawn && call.tag == "body")
        .unwrap();
    assert_eq!(despawned.position.coords.z, 4.0);
}

#[test]
fn test_respawn_does_not_duplicate_tasks() {
    let mut graph = SceneGraph::new(CallLog::default());
    let mut template = Template::<CallLog>::new();
    template
        .add_point(point("p", 0.0, 0.0, 0.0))
        .add_system(SystemTrigger::tick(), record_event("tick"));
    let node = template.new_instance(&mut graph, Mat4::identity());

    graph.spawn(node, 1).unwrap();
    graph.tick();
    graph.respawn(node, 1).unwrap();
    graph.respawn(node, 1).unwrap();
    graph.world_mut().clear();
    graph.tick();

    assert_eq!(count(&graph, node, "tick"), 2);
    assert_eq!(graph.world().count(CallKind::Render, "p"), 1);
}

#[test]
fn test_child_spawned_with_parent_renders_once_per_tick() {
    let mut graph = SceneGraph::new(CallLog::default());
    let root = body(&mut graph);
    graph.spawn(root, 1).unwrap();
    graph.world_mut().clear();

    graph.tick();
    assert_eq!(graph.world().count(CallKind::Render, "arm"), 2);
    assert_eq!(graph.world().count(CallKind::Render, "body"), 1);
}

#[test]
fn test_destroy_despawns_and_detaches() {
    let mut graph = SceneGraph::new(CallLog::default());
    let root = body(&mut graph);
    let arm = graph.child(root, "arm").unwrap();
    graph.spawn(root, 1).unwrap();

    graph.destroy(arm).unwrap();
    assert!(!graph.contains(arm));
    assert!(graph.child(root, "arm").is_none());
    assert_eq!(graph.world().count(CallKind::Despawn, "arm"), 2);
    assert!(graph.is_spawned(root));

    graph.destroy(root).unwrap();
    assert!(graph.is_empty());
    assert_eq!(graph.destroy(root), Err(SceneError::NodeNotFound(root)));
}

#[test]
fn test_remove_child_detaches_as_new_root() {
    let mut graph = SceneGraph::new(CallLog::default());
    let root = body(&mut graph);
    graph.spawn(root, 1).unwrap();

    let arm = graph.remove_child(root, "arm").unwrap();
    assert!(!graph.has_parent(arm));
    assert!(!graph.is_spawned(arm));
    assert_eq!(graph.world().count(CallKind::Despawn, "arm"), 2);
    assert!(graph.remove_child(root, "arm").is_none());
    assert_eq!(graph.roots().count(), 2);

    // Detached nodes keep only their local transform
    assert_eq!(graph.world_transform(arm), Some(Mat4::translation(1.0, 0.0, 0.0)));
    graph.spawn(arm, 1).unwrap();
    assert!(graph.is_spawned(arm));
}

#[test]
fn test_remove_child_if_destroys_matches() {
    let mut graph = SceneGraph::new(CallLog::default());
    let root = Template::<CallLog>::new().new_instance(&mut graph, Mat4::identity());
    for name in ["a", "b", "c"] {
        graph.add_child(root, name, &Template::new()).unwrap();
    }
    assert_eq!(
        graph.add_child(root, "a", &Template::new()),
        Err(SceneError::DuplicateChild("a".to_owned()))
    );

    let removed = graph.remove_child_if(root, |name, _| name != "b").unwrap();
    assert_eq!(removed, 2);
    assert_eq!(graph.children(root).map(|(name, _)| name).collect::<Vec<_>>(), vec!["b"]);
    assert_eq!(graph.len(), 2);
}

#[test]
fn test_child_added_to_spawned_parent_starts_unspawned() {
    let mut graph = SceneGraph::new(CallLog::default());
    let root = body(&mut graph);
    graph.spawn(root, 1).unwrap();

    let mut extra = Template::<CallLog>::new();
    extra.add_point(point("extra", 0.0, 0.0, 0.0));
    let child = graph.add_child(root, "extra", &extra).unwrap();
    graph.tick();

    assert!(!graph.is_spawned(child));
    assert_eq!(graph.world().count(CallKind::Spawn, "extra"), 0);
    assert_eq!(graph.world().count(CallKind::Render, "extra"), 0);
}
