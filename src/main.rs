use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use std::env;
use std::time::Duration;

use perihelion::config::{self, GravityConfig};
use perihelion::damage::Hull;
use perihelion::planet_manager::PlanetManager;
use perihelion::scenario::{self, DemoProbe};
use perihelion::simulation::{LastStepReport, PlanetaryPlugin};

const DEFAULT_FRAMES: u32 = 600;
const FRAME_SECS: f32 = 1.0 / 60.0;

fn main() {
    // Frame count can be overridden for quick smoke runs.
    let frames = env::var("PERIHELION_FRAMES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(DEFAULT_FRAMES);

    let mut app = App::new();
    app.add_plugins((MinimalPlugins, LogPlugin::default()))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(
            FRAME_SECS,
        )))
        // Defaults first; load_gravity_config overwrites from assets/gravity.toml.
        .insert_resource(GravityConfig::default())
        .add_plugins(PlanetaryPlugin)
        .add_systems(
            Startup,
            (
                config::load_gravity_config,
                scenario::spawn_demo_world.after(config::load_gravity_config),
            ),
        );

    for _ in 0..frames {
        app.update();
    }

    let world = app.world_mut();
    let (probes, burned) = world
        .query_filtered::<&Hull, With<DemoProbe>>()
        .iter(world)
        .fold((0, 0), |(n, b), hull| (n + 1, b + hull.is_destroyed() as u32));
    let report = world.resource::<LastStepReport>().0.clone();
    let nearest = world
        .resource::<PlanetManager>()
        .current_nearest_planet()
        .map(|p| p.name.clone())
        .unwrap_or_else(|| "none".to_string());

    info!(
        "Ran {frames} frames: {probes} probes, {burned} burned out; last step pulled {} and heated {}; nearest planet {nearest}",
        report.pulled, report.heated
    );
}
