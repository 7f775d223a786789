//! Demo layout for the headless binary.
//!
//! Real layouts come from the external system generator; this one is just
//! enough to exercise every shell: two systems, three orbiting planets, a belt
//! seeded with probes, a maze, and a handful of probes parked in the sun's
//! hot shell.

use crate::celestial::{Maze, Planet, PlanetOrbit, SolSystem, SystemBelt};
use crate::config::GravityConfig;
use crate::constants::{
    DEMO_BELT_HALF_WIDTH, DEMO_BELT_RADIUS, DEMO_PROBE_COUNT, DEMO_PROBE_HP, DEMO_PROBE_SHIELD,
    DEMO_SYSTEM_RADIUS, PLANET_GRAV_CONST,
};
use crate::damage::{Hull, Shield};
use crate::error::SimResult;
use crate::planet_manager::PlanetManager;
use crate::simulation::{ReceivesGravity, ReferenceAnchor};
use bevy::prelude::*;
use rand::Rng;

/// Marker for probes spawned by the demo.
#[derive(Component, Debug, Clone, Copy)]
pub struct DemoProbe;

/// Builds the demo planet manager using the configured sun profile.
pub fn build_demo_manager(config: &GravityConfig) -> SimResult<PlanetManager> {
    let mut man = PlanetManager::new(config.sun_profile(), config.maze_activation_margin);

    let sol = man.add_system(SolSystem::new("Sol", Vec2::ZERO, DEMO_SYSTEM_RADIUS));
    man.add_system(SolSystem::new(
        "Vega",
        Vec2::new(4.0 * DEMO_SYSTEM_RADIUS, 0.0),
        DEMO_SYSTEM_RADIUS,
    ));

    // (name, orbit distance, start angle, orbit speed, ground height)
    let planets = [
        ("Cinder", 130.0, 0.0, 0.20, 12.0),
        ("Verdance", 210.0, 2.1, 0.12, 20.0),
        ("Hollow", 360.0, 4.2, 0.05, 25.0),
    ];
    for (name, distance, angle_to_sys, orbit_speed, ground_height) in planets {
        let orbit = PlanetOrbit {
            center: Vec2::ZERO,
            distance,
            angle_to_sys,
            orbit_speed,
        };
        let planet = Planet::new(name, sol, orbit, ground_height, PLANET_GRAV_CONST)?
            .with_rotation(0.3);
        man.add_planet(planet)?;
    }

    man.add_belt(SystemBelt::new(
        sol,
        Vec2::ZERO,
        DEMO_BELT_RADIUS,
        DEMO_BELT_HALF_WIDTH,
    )?)?;

    man.add_maze(Maze::new("Labyrinth", Vec2::new(900.0, 700.0), 60.0));
    Ok(man)
}

/// Startup system: install the demo layout and spawn probes plus the anchor.
pub fn spawn_demo_world(
    mut commands: Commands,
    config: Res<GravityConfig>,
    mut manager: ResMut<PlanetManager>,
) {
    let demo = match build_demo_manager(&config) {
        Ok(demo) => demo,
        Err(err) => {
            error!("Demo layout rejected: {err}");
            return;
        }
    };
    *manager = demo;

    commands.spawn((ReferenceAnchor, Transform::default()));

    let mut rng = rand::thread_rng();
    let mut spawned = 0;
    for belt in manager.belts() {
        for _ in 0..DEMO_PROBE_COUNT {
            let Some(pos) = belt.random_point(&mut rng) else {
                break;
            };
            spawn_probe(&mut commands, pos, &config);
            spawned += 1;
        }
    }

    // A few probes parked inside the hot shell so the heat path has work.
    let sun_divers = 4;
    for i in 0..sun_divers {
        let angle = std::f32::consts::TAU * i as f32 / sun_divers as f32;
        let dist = rng.gen_range(0.3..0.9) * config.sun_hot_radius;
        spawn_probe(&mut commands, Vec2::from_angle(angle) * dist, &config);
        spawned += 1;
    }

    info!(
        "Spawned demo world: {} systems, {} planets, {} belts, {} mazes, {} probes",
        manager.systems().len(),
        manager.planets().len(),
        manager.belts().len(),
        manager.mazes().len(),
        spawned
    );
}

fn spawn_probe(commands: &mut Commands, pos: Vec2, config: &GravityConfig) {
    commands.spawn((
        DemoProbe,
        ReceivesGravity,
        Hull::new(DEMO_PROBE_HP),
        Shield::new(DEMO_PROBE_SHIELD, config),
        Transform::from_translation(pos.extend(0.0)),
    ));
}
