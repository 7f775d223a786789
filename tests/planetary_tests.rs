//! Headless frame-level tests for [`PlanetaryPlugin`].
//!
//! These tests use [`MinimalPlugins`] (no window and no physics pipeline)
//! with a fixed manual time step so every frame is identical.
//! Receivers are spawned after a warm-up frame, so nothing below sees the
//! zero-length first frame.
//!
//! Covered scenarios:
//! 1. Receivers outside every shell get exactly zero and no heat.
//! 2. Planet shell beats sun shell; no heat on a planet.
//! 3. Sun-shell receivers get one exposure per frame with the centre distance.
//! 4. Gravity uses this frame's planet positions.
//! 5. Non-receivers are never touched.
//! 6. The reference anchor drives the nearest snapshot.
//! 7. Maze activation (also across an empty-world frame).
//! 8. Empty worlds and heat burning a hull out.

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use perihelion::celestial::{Maze, Planet, PlanetOrbit, SolSystem};
use perihelion::config::GravityConfig;
use perihelion::damage::{Hull, HullDestroyed};
use perihelion::planet_manager::PlanetManager;
use perihelion::simulation::{
    GravityAcceleration, HeatExposure, MazeActivated, PlanetarySet, PlanetaryPlugin,
    ReceivesGravity, ReferenceAnchor, ReferencePoint,
};
use std::time::Duration;

// ── Helpers ───────────────────────────────────────────────────────────────────

#[derive(Resource, Default)]
struct Collected {
    heat: Vec<HeatExposure>,
    mazes: Vec<MazeActivated>,
    destroyed: Vec<HullDestroyed>,
}

fn collect_messages(
    mut heat: MessageReader<HeatExposure>,
    mut mazes: MessageReader<MazeActivated>,
    mut destroyed: MessageReader<HullDestroyed>,
    mut collected: ResMut<Collected>,
) {
    collected.heat.extend(heat.read().copied());
    collected.mazes.extend(mazes.read().copied());
    collected.destroyed.extend(destroyed.read().copied());
}

/// Shared test config: sun shell 80, hot shell 60.
fn test_config() -> GravityConfig {
    GravityConfig {
        sun_radius: 80.0,
        sun_hot_radius: 60.0,
        sun_grav_const: 2000.0,
        ..Default::default()
    }
}

fn orbit(distance: f32, angle_to_sys: f32, orbit_speed: f32) -> PlanetOrbit {
    PlanetOrbit {
        center: Vec2::ZERO,
        distance,
        angle_to_sys,
        orbit_speed,
    }
}

/// One system at the origin and a single still planet at (50, 0) whose
/// 24-unit shell overlaps the sun shell.
fn overlapping_manager(config: &GravityConfig) -> PlanetManager {
    let mut man = PlanetManager::new(config.sun_profile(), config.maze_activation_margin);
    let sys = man.add_system(SolSystem::new("Sol", Vec2::ZERO, 400.0));
    man.add_planet(Planet::with_heights("Inner", sys, orbit(50.0, 0.0, 0.0), 10.0, 24.0, 1000.0).unwrap())
        .unwrap();
    man
}

fn app_with(manager: PlanetManager, config: GravityConfig) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)))
        .add_plugins(PlanetaryPlugin)
        .insert_resource(config)
        .insert_resource(manager)
        .init_resource::<Collected>()
        .add_systems(Update, collect_messages.after(PlanetarySet::Damage));
    // The first frame has a zero time delta; get it out of the way so every
    // frame a test counts is a full 100 ms.
    app.update();
    app
}

fn spawn_receiver(app: &mut App, x: f32, y: f32) -> Entity {
    app.world_mut()
        .spawn((ReceivesGravity, Transform::from_xyz(x, y, 0.0)))
        .id()
}

fn acceleration(app: &App, entity: Entity) -> Vec2 {
    app.world().get::<GravityAcceleration>(entity).unwrap().0
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn zero_force_zone_gets_zero_and_no_heat() {
    let config = test_config();
    let mut app = app_with(overlapping_manager(&config), config);
    let far = spawn_receiver(&mut app, 0.0, -500.0);
    app.world_mut()
        .entity_mut(far)
        .insert(GravityAcceleration(Vec2::new(7.0, 7.0)));

    app.update();

    assert_eq!(acceleration(&app, far), Vec2::ZERO, "stale value must be overwritten");
    assert!(app.world().resource::<Collected>().heat.is_empty());
}

#[test]
fn planet_shell_beats_sun_shell_and_blocks_heat() {
    let config = test_config();
    let mut app = app_with(overlapping_manager(&config), config);
    // 10 from the planet, 40 from the sun: inside both shells.
    let both = spawn_receiver(&mut app, 40.0, 0.0);
    app.world_mut().entity_mut(both).insert(Hull::new(10.0));

    for _ in 0..5 {
        app.update();
    }

    // Toward the planet at (50, 0), with the ground-height clamp: 1000 / 10².
    let acc = acceleration(&app, both);
    assert!((acc - Vec2::new(10.0, 0.0)).length() < 1e-3, "{acc:?}");
    assert!(app.world().resource::<Collected>().heat.is_empty());
    assert_eq!(app.world().get::<Hull>(both).unwrap().hp, 10.0);
}

#[test]
fn sun_shell_gives_one_exposure_per_frame_with_centre_distance() {
    let config = test_config();
    let mut app = app_with(overlapping_manager(&config), config);
    let roaster = spawn_receiver(&mut app, 0.0, -30.0);
    app.world_mut().entity_mut(roaster).insert(Hull::new(100.0));

    app.update();
    app.update();
    app.update();

    let heat = &app.world().resource::<Collected>().heat;
    assert_eq!(heat.len(), 3);
    for exposure in heat {
        assert_eq!(exposure.target, roaster);
        assert!((exposure.proximity - 30.0).abs() < 1e-4);
    }

    // Sun pull with the hot-radius clamp: 2000 / 60², straight up.
    let acc = acceleration(&app, roaster);
    assert!((acc - Vec2::new(0.0, 2000.0 / 3600.0)).length() < 1e-4, "{acc:?}");
    assert!(app.world().get::<Hull>(roaster).unwrap().hp < 100.0);
}

#[test]
fn sun_shell_outside_hot_radius_pulls_but_does_not_burn() {
    let config = test_config();
    let mut app = app_with(overlapping_manager(&config), config);
    let warm = spawn_receiver(&mut app, 0.0, 70.0);
    app.world_mut().entity_mut(warm).insert(Hull::new(100.0));

    app.update();

    assert_eq!(app.world().resource::<Collected>().heat.len(), 1);
    assert_eq!(app.world().get::<Hull>(warm).unwrap().hp, 100.0);
    assert!(acceleration(&app, warm).y < 0.0);
}

#[test]
fn gravity_uses_post_advance_planet_positions() {
    let config = test_config();
    let mut man = PlanetManager::new(config.sun_profile(), config.maze_activation_margin);
    let sys = man.add_system(SolSystem::new("Sol", Vec2::ZERO, 400.0));
    // Quarter turn in one 100 ms frame.
    let speed = std::f32::consts::FRAC_PI_2 / 0.1;
    man.add_planet(Planet::with_heights("Mover", sys, orbit(200.0, 0.0, speed), 10.0, 24.0, 1000.0).unwrap())
        .unwrap();

    let mut app = app_with(man, config);
    let at_new = spawn_receiver(&mut app, 0.0, 190.0);
    let at_old = spawn_receiver(&mut app, 190.0, 0.0);

    app.update();

    let planet_pos = app
        .world()
        .resource::<PlanetManager>()
        .current_nearest_planet()
        .unwrap()
        .pos();
    assert!((planet_pos - Vec2::new(0.0, 200.0)).length() < 1e-2, "{planet_pos:?}");
    assert!(acceleration(&app, at_new).y > 0.0);
    assert_eq!(acceleration(&app, at_old), Vec2::ZERO);
}

#[test]
fn entities_without_the_capability_are_untouched() {
    let config = test_config();
    let mut app = app_with(overlapping_manager(&config), config);
    let bystander = app
        .world_mut()
        .spawn((
            Transform::from_xyz(0.0, -30.0, 0.0),
            GravityAcceleration(Vec2::new(9.0, 9.0)),
            Hull::new(10.0),
        ))
        .id();

    app.update();

    assert_eq!(acceleration(&app, bystander), Vec2::new(9.0, 9.0));
    assert!(app.world().resource::<Collected>().heat.is_empty());
    assert_eq!(app.world().get::<Hull>(bystander).unwrap().hp, 10.0);
}

#[test]
fn reference_anchor_selects_nearest_planet() {
    let config = test_config();
    let mut man = PlanetManager::new(config.sun_profile(), config.maze_activation_margin);
    let sys = man.add_system(SolSystem::new("Sol", Vec2::ZERO, 400.0));
    for (name, angle) in [("East", 0.0), ("North", std::f32::consts::FRAC_PI_2)] {
        man.add_planet(Planet::with_heights(name, sys, orbit(200.0, angle, 0.0), 10.0, 24.0, 1000.0).unwrap())
            .unwrap();
    }
    let mut app = app_with(man, config);
    let anchor = app
        .world_mut()
        .spawn((ReferenceAnchor, Transform::from_xyz(10.0, 180.0, 0.0)))
        .id();

    app.update();
    assert_eq!(app.world().resource::<ReferencePoint>().0, Vec2::new(10.0, 180.0));
    let nearest = |app: &App| {
        app.world()
            .resource::<PlanetManager>()
            .current_nearest_planet()
            .unwrap()
            .name
            .clone()
    };
    assert_eq!(nearest(&app), "North");

    app.world_mut().get_mut::<Transform>(anchor).unwrap().translation = Vec3::new(190.0, 5.0, 0.0);
    app.update();
    assert_eq!(nearest(&app), "East");
}

#[test]
fn maze_activation_is_announced_once() {
    let config = test_config();
    let mut man = overlapping_manager(&config);
    man.add_maze(Maze::new("Labyrinth", Vec2::new(0.0, 1000.0), 40.0));
    let mut app = app_with(man, config);
    app.insert_resource(ReferencePoint(Vec2::new(0.0, 950.0)));

    app.update();
    app.update();

    let mazes = &app.world().resource::<Collected>().mazes;
    assert_eq!(mazes.len(), 1);
    assert_eq!(mazes[0].maze, 0);
    assert_eq!(mazes[0].pos, Vec2::new(0.0, 1000.0));
}

#[test]
fn empty_world_skips_the_step_without_stale_pull() {
    let mut app = app_with(PlanetManager::default(), test_config());
    let probe = spawn_receiver(&mut app, 0.0, 10.0);
    app.world_mut()
        .entity_mut(probe)
        .insert(GravityAcceleration(Vec2::new(3.0, 3.0)));

    app.update();

    assert_eq!(acceleration(&app, probe), Vec2::ZERO);
    assert!(app.world().resource::<Collected>().heat.is_empty());
}

#[test]
fn maze_in_range_during_empty_world_is_announced_once_planets_exist() {
    let config = test_config();
    let mut man = PlanetManager::new(config.sun_profile(), config.maze_activation_margin);
    let sys = man.add_system(SolSystem::new("Sol", Vec2::ZERO, 400.0));
    man.add_maze(Maze::new("Labyrinth", Vec2::new(0.0, 1000.0), 40.0));
    let mut app = app_with(man, config);
    app.insert_resource(ReferencePoint(Vec2::new(0.0, 950.0)));

    app.update();
    assert!(app.world().resource::<Collected>().mazes.is_empty());

    app.world_mut()
        .resource_mut::<PlanetManager>()
        .add_planet(Planet::with_heights("Late", sys, orbit(50.0, 0.0, 0.0), 10.0, 24.0, 1000.0).unwrap())
        .unwrap();
    app.update();
    app.update();

    let mazes = &app.world().resource::<Collected>().mazes;
    assert_eq!(mazes.len(), 1);
    assert_eq!(mazes[0].maze, 0);
}

#[test]
fn sustained_heat_burns_a_hull_out_once() {
    let config = GravityConfig {
        sun_damage: 50.0,
        ..test_config()
    };
    let mut app = app_with(overlapping_manager(&config), config);
    let victim = spawn_receiver(&mut app, -20.0, 0.0);
    app.world_mut().entity_mut(victim).insert(Hull::new(12.0));

    // 5 damage per 100 ms frame.
    for _ in 0..6 {
        app.update();
    }

    let hull = app.world().get::<Hull>(victim).unwrap();
    assert!(hull.is_destroyed());
    let destroyed = &app.world().resource::<Collected>().destroyed;
    assert_eq!(destroyed, &vec![HullDestroyed { target: victim }]);
}
