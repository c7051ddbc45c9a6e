//! Orbit demo application
//!
//! Builds a small solar system out of templates, spawns it into a headless
//! debug draw list and drives it tick by tick, logging what gets drawn.
//!
//! Usage: `orbit_demo [config.toml|config.ron]`

use std::f32::consts::TAU;

use point_engine::foundation::logging;
use point_engine::prelude::*;
use rand::Rng;
use thiserror::Error;

const TICKS: u32 = 60;
const BELT_ROCKS: usize = 24;

#[derive(Error, Debug)]
enum DemoError {
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Spin the node about its local y axis by `rate` radians per tick
fn spin(rate: f32) -> impl Fn(&mut SceneGraph<DrawList>, NodeId) {
    move |graph, id| {
        // Rotation keeps the scale, so this never reports a scale change
        let _ = graph.with_transform(id, |transform| {
            *transform *= Mat4::new_rotation(Vec3::y() * rate);
        });
    }
}

fn moon_template() -> Template<DrawList> {
    let mut moon = Template::<DrawList>::new();
    moon.add_point(Point::new(
        0.0,
        0.0,
        0.0,
        DebugMarker::new("moon", MarkerStyle::Sphere { radius: 0.2 }),
    ));
    moon
}

fn planet_template() -> Result<Template<DrawList>, DemoError> {
    let mut planet = Template::<DrawList>::new();
    planet
        .add_point(Point::new(
            0.0,
            0.0,
            0.0,
            DebugMarker::new("planet", MarkerStyle::Sphere { radius: 0.5 })
                .with_color(Vec4::new(0.2, 0.4, 1.0, 1.0)),
        ))
        .add_system(SystemTrigger::tick(), spin(TAU / 20.0));
    planet.add_child_with_transform(
        "moon",
        moon_template(),
        Transform::from_position(Vec3::new(1.5, 0.0, 0.0)).to_matrix(),
    )?;
    Ok(planet)
}

fn belt_template(rng: &mut impl Rng) -> Template<DrawList> {
    let rocks = (0..BELT_ROCKS).map(|i| {
        let angle = TAU * i as f32 / BELT_ROCKS as f32 + rng.gen_range(-0.1..0.1);
        let radius = rng.gen_range(7.5..8.5);
        Point::new(
            radius * angle.cos(),
            rng.gen_range(-0.2..0.2),
            radius * angle.sin(),
            DebugMarker::dot("rock"),
        )
    });
    let mut belt = Template::<DrawList>::with_points(rocks);
    belt.add_system(SystemTrigger::interval(5), spin(TAU / 200.0));
    belt
}

fn comet_template() -> Template<DrawList> {
    let mut comet = Template::<DrawList>::new();
    comet
        .add_point(Point::new(
            0.0,
            0.0,
            0.0,
            DebugMarker::new("comet", MarkerStyle::Ray { offset: Vec3::new(-0.5, 0.0, 0.0) })
                .with_trail(4),
        ))
        .set_default(VELOCITY, Vec3::new(-0.2, 0.0, 0.05))
        .set_default(ACCELERATION, Vec3::new(0.0, 0.0, -0.002))
        .add_system(SystemTrigger::tick(), systems::velocity)
        .add_system(SystemTrigger::delayed_interval(10, 2), systems::acceleration);
    comet
}

fn sun_template(rng: &mut impl Rng) -> Result<Template<DrawList>, DemoError> {
    let mut sun = Template::<DrawList>::new();
    sun.add_point(Point::new(
        0.0,
        0.0,
        0.0,
        DebugMarker::new("sun", MarkerStyle::Sphere { radius: 1.0 })
            .with_color(Vec4::new(1.0, 0.8, 0.1, 1.0)),
    ))
    .add_system(SystemTrigger::tick(), spin(TAU / 60.0))
    // Breathe: grow for a while, then shrink back
    .add_system(SystemTrigger::interval(15), |graph, id| {
        let growing = graph
            .get(id, "growing")
            .and_then(ComponentValue::as_bool)
            .unwrap_or(true);
        let factor = if growing { 1.1 } else { 1.0 / 1.1 };
        let _ = graph.with_transform(id, |transform| *transform *= Mat4::new_scaling(factor));
        let _ = graph.set(id, "growing", !growing);
    })
    .add_system(SystemTrigger::on_scale_changed(), |graph, id| {
        if let Some(transform) = graph.transform(id) {
            log::debug!("Sun scale now {:.2}", transform.scale_vector().x);
        }
    });

    sun.add_child_with_transform(
        "planet",
        planet_template()?,
        Transform::from_position(Vec3::new(4.0, 0.0, 0.0)).to_matrix(),
    )?
    .add_child("belt", belt_template(rng))?
    .add_child_with_transform(
        "comet",
        comet_template(),
        Transform::from_position(Vec3::new(12.0, 1.0, -3.0)).to_matrix(),
    )?;
    Ok(sun)
}

fn log_frame(graph: &SceneGraph<DrawList>, tick: u32, ran: usize) {
    let list = graph.world();
    log::info!(
        "Tick {:>3}: {} task(s) ran, {} shape(s), {} live marker(s)",
        tick,
        ran,
        list.shape_count(),
        list.live_markers()
    );
}

fn run(config: &SceneConfig) -> Result<(), DemoError> {
    let mut rng = rand::thread_rng();
    let mut graph = SceneGraph::new(DrawList::new());

    let sun = sun_template(&mut rng)?.new_instance(&mut graph, Mat4::identity());
    log::info!("Instantiated {} node(s)", graph.len());

    graph.spawn(sun, config.render_interval)?;

    for tick in 1..=TICKS {
        let ran = graph.tick();
        log_frame(&graph, tick, ran);
        graph.world_mut().update();

        if tick == TICKS / 2 {
            // Hide the planet and let the comet go
            if let Some(planet) = graph.child(sun, "planet") {
                graph.set_visibility(planet, Visibility::Hidden)?;
            }
            if let Some(comet) = graph.remove_child(sun, "comet") {
                log::info!("Comet left at {:?}", graph.world_position(comet));
                graph.destroy(comet)?;
            }
        }
    }

    if let Some(moon) = graph
        .child(sun, "planet")
        .and_then(|planet| graph.child(planet, "moon"))
    {
        log::info!("Moon ended at {:?}", graph.world_position(moon));
    }

    graph.despawn(sun)?;
    log::info!(
        "Despawned: {} live marker(s), {} persistent shape(s) left",
        graph.world().live_markers(),
        graph.world().shape_count()
    );
    Ok(())
}

fn main() {
    let config = match std::env::args().nth(1) {
        Some(path) => match SceneConfig::load_from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => SceneConfig::default(),
    };

    logging::init_with_level(&config.log_level);
    log::info!("Starting orbit demo ({:?})", config);

    match run(&config) {
        Ok(()) => log::info!("Orbit demo finished"),
        Err(e) => {
            log::error!("Orbit demo failed: {}", e);
            std::process::exit(1);
        }
    }
}
