use super::{point, CallKind, CallLog};
use crate::ecs::{ComponentValue, SystemTrigger};
use crate::foundation::math::{Mat4, Mat4Ext, Point3};
use crate::scene::{SceneGraph, Template};

fn marker_template() -> Template<CallLog> {
    let mut template = Template::<CallLog>::new();
    template
        .add_point(point("p", 1.0, 0.0, 0.0))
        .set_default("hp", 10_i64)
        .add_system(SystemTrigger::event("hit"), |graph, id| {
            let hp = graph.get(id, "hp").and_then(ComponentValue::as_int).unwrap_or(0);
            graph.set(id, "hp", hp - 1).unwrap();
        });
    template
}

#[test]
fn test_instances_are_independent() {
    let mut graph = SceneGraph::new(CallLog::default());
    let template = marker_template();
    let a = template.new_instance(&mut graph, Mat4::identity());
    let b = template.new_instance(&mut graph, Mat4::translation(0.0, 0.0, 3.0));

    graph.add_point(a, point("extra", 0.0, 0.0, 0.0)).unwrap();
    graph.points_mut(a).unwrap()[0].position = Point3::new(9.0, 9.0, 9.0);
    graph.set(a, "tag", "first").unwrap();
    graph.add_system(a, SystemTrigger::event("hit"), |_, _| {}).unwrap();

    assert_eq!(graph.points(b).unwrap().len(), 1);
    assert_eq!(graph.points(b).unwrap()[0].position, Point3::new(1.0, 0.0, 0.0));
    assert!(!graph.has(b, "tag"));
    assert_eq!(graph.listener_count(a, "hit"), 2);
    assert_eq!(graph.listener_count(b, "hit"), 1);

    assert_eq!(template.points().len(), 1);
    assert_eq!(template.listener_count("hit"), 1);
}

#[test]
fn test_defaults_applied_on_spawn_before_template_listeners() {
    let mut graph = SceneGraph::new(CallLog::default());
    let mut template = marker_template();
    template.add_system(SystemTrigger::on_spawn(), |graph, id| {
        let hp = graph.get(id, "hp").and_then(ComponentValue::as_int);
        graph.set(id, "hp_at_spawn", hp.unwrap_or(-1)).unwrap();
    });
    let node = template.new_instance(&mut graph, Mat4::identity());
    assert!(!graph.has(node, "hp"));

    graph.spawn(node, 1).unwrap();
    assert_eq!(graph.get(node, "hp_at_spawn").and_then(ComponentValue::as_int), Some(10));

    graph.trigger_event(node, "hit").unwrap();
    graph.trigger_event(node, "hit").unwrap();
    assert_eq!(graph.get(node, "hp").and_then(ComponentValue::as_int), Some(8));
}

#[test]
fn test_renderables_are_cloned_per_instance() {
    let mut graph = SceneGraph::new(CallLog::default());
    let template = marker_template();
    let a = template.new_instance(&mut graph, Mat4::identity());
    let b = template.new_instance(&mut graph, Mat4::identity());

    graph.spawn(a, 1).unwrap();
    assert!(graph.points(a).unwrap()[0].renderable.is_spawned());
    assert!(!graph.points(b).unwrap()[0].renderable.is_spawned());
    assert!(!template.points()[0].renderable.is_spawned());

    graph.spawn(b, 1).unwrap();
    assert_eq!(graph.world().count(CallKind::Spawn, "p"), 2);
}

#[test]
fn test_shared_child_template_instantiates_separately() {
    let mut graph = SceneGraph::new(CallLog::default());
    let wheel = std::rc::Rc::new(marker_template());
    let mut cart = Template::<CallLog>::new();
    cart.add_child_with_transform("left", wheel.clone(), Mat4::translation(-1.0, 0.0, 0.0))
        .unwrap()
        .add_child_with_transform("right", wheel, Mat4::translation(1.0, 0.0, 0.0))
        .unwrap();

    let root = cart.new_instance(&mut graph, Mat4::identity());
    let left = graph.child(root, "left").unwrap();
    let right = graph.child(root, "right").unwrap();
    assert_ne!(left, right);
    assert_eq!(graph.name_of_child(root, right), Some("right"));
    assert_eq!(graph.parent(left), Some(root));

    graph.set(left, "hp", 1_i64).unwrap();
    assert!(!graph.has(right, "hp"));
}
