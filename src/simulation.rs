//! Planetary plugin and systems for Bevy ECS
//!
//! Frame layout (all in `Update` unless noted):
//!
//! | Set | Work |
//! |-----|------|
//! | `PreUpdate` | zero `ExternalForce` on gravity receivers |
//! | [`PlanetarySet::Reference`] | pull config into the manager, copy the anchor position into [`ReferencePoint`] |
//! | [`PlanetarySet::Step`] | advance bodies, refresh nearest snapshot, write [`GravityAcceleration`] and [`HeatExposure`] |
//! | [`PlanetarySet::Forces`] | add `acceleration × mass` to Rapier `ExternalForce` |
//! | [`PlanetarySet::Damage`] | shield regen, then sun heat damage |
//!
//! Systems that add their own forces should run after `PreUpdate`.

use crate::config::GravityConfig;
use crate::damage::{shield_regen_system, sun_heat_damage_system, HullDestroyed};
use crate::planet_manager::{GravityReceiver, HeatSink, PlanetManager, StepReport};
use bevy::prelude::*;
use bevy_rapier2d::prelude::{ExternalForce, ReadMassProperties};

pub struct PlanetaryPlugin;

impl Plugin for PlanetaryPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GravityConfig>()
            .init_resource::<PlanetManager>()
            .init_resource::<ReferencePoint>()
            .init_resource::<LastStepReport>()
            .add_message::<HeatExposure>()
            .add_message::<MazeActivated>()
            .add_message::<HullDestroyed>()
            .configure_sets(
                Update,
                (
                    PlanetarySet::Reference,
                    PlanetarySet::Step,
                    PlanetarySet::Forces,
                    PlanetarySet::Damage,
                )
                    .chain(),
            )
            .add_systems(PreUpdate, gravity_force_reset_system)
            .add_systems(
                Update,
                (
                    (apply_gravity_config_system, sync_reference_point_system)
                        .in_set(PlanetarySet::Reference),
                    planetary_step_system.in_set(PlanetarySet::Step),
                    gravity_external_force_system.in_set(PlanetarySet::Forces),
                    (shield_regen_system, sun_heat_damage_system)
                        .chain()
                        .in_set(PlanetarySet::Damage),
                ),
            );
    }
}

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlanetarySet {
    Reference,
    Step,
    Forces,
    Damage,
}

// ── Components ─────────────────────────────────────────────────────────────────

/// Marker: this entity is pulled by planets and suns.
///
/// Entities without it are never looked at by the gravity step.
#[derive(Component, Debug, Clone, Copy, Default)]
#[require(GravityAcceleration)]
pub struct ReceivesGravity;

/// This frame's gravity acceleration.  Overwritten every step; `Vec2::ZERO`
/// outside every shell.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct GravityAcceleration(pub Vec2);

/// Marker for the entity (usually the camera) whose position is the
/// reference point for the nearest snapshot.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct ReferenceAnchor;

// ── Resources ──────────────────────────────────────────────────────────────────

/// Point the nearest planet/system snapshot is computed against.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct ReferencePoint(pub Vec2);

/// Report of the most recent successful gravity step.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct LastStepReport(pub StepReport);

// ── Messages ───────────────────────────────────────────────────────────────────

/// An entity spent this frame inside a sun shell (and outside every planet
/// shell).  `proximity` is its distance to the system centre.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct HeatExposure {
    pub target: Entity,
    pub proximity: f32,
}

/// A maze came within activation range of the reference point.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct MazeActivated {
    /// Index into [`PlanetManager::mazes`].
    pub maze: usize,
    pub pos: Vec2,
}

// ── Receiver adapter ───────────────────────────────────────────────────────────

struct EcsReceiver<'w> {
    entity: Entity,
    pos: Vec2,
    acc: Mut<'w, GravityAcceleration>,
}

impl GravityReceiver for EcsReceiver<'_> {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn receive_acceleration(&mut self, acceleration: Vec2) {
        self.acc.0 = acceleration;
    }
}

#[derive(Default)]
struct HeatExposures(Vec<HeatExposure>);

impl<'w> HeatSink<EcsReceiver<'w>> for HeatExposures {
    fn apply_heat_damage(&mut self, receiver: &EcsReceiver<'w>, proximity: f32) {
        self.0.push(HeatExposure {
            target: receiver.entity,
            proximity,
        });
    }
}

// ── Systems ────────────────────────────────────────────────────────────────────

/// Pushes the shared sun profile and maze margin into the manager when the
/// config resource changes (including the first frame).
///
/// An edit that fails validation is logged and ignored; the manager keeps
/// the last accepted values.
pub fn apply_gravity_config_system(config: Res<GravityConfig>, mut manager: ResMut<PlanetManager>) {
    if !config.is_changed() {
        return;
    }
    if let Err(e) = config.validate() {
        warn!("Rejected gravity config update: {e}; keeping previous values");
        return;
    }
    if let Err(e) = manager.set_sun_profile(config.sun_profile()) {
        warn!("Rejected sun profile: {e}");
        return;
    }
    manager.set_maze_activation_margin(config.maze_activation_margin);
}

/// Copies the anchor's position into [`ReferencePoint`].  Without exactly one
/// anchor the previous value is kept, so tests and tools can set it directly.
pub fn sync_reference_point_system(
    q: Query<&Transform, With<ReferenceAnchor>>,
    mut reference: ResMut<ReferencePoint>,
) {
    if let Ok(transform) = q.single() {
        reference.0 = transform.translation.truncate();
    }
}

/// The per-frame gravity step over every [`ReceivesGravity`] entity.
pub fn planetary_step_system(
    time: Res<Time>,
    reference: Res<ReferencePoint>,
    mut manager: ResMut<PlanetManager>,
    mut last_report: ResMut<LastStepReport>,
    mut receivers: Query<(Entity, &Transform, &mut GravityAcceleration), With<ReceivesGravity>>,
    mut heat_writer: MessageWriter<HeatExposure>,
    mut maze_writer: MessageWriter<MazeActivated>,
) {
    let mut items: Vec<EcsReceiver> = receivers
        .iter_mut()
        .map(|(entity, transform, acc)| EcsReceiver {
            entity,
            pos: transform.translation.truncate(),
            acc,
        })
        .collect();
    let mut exposures = HeatExposures::default();

    match manager.run_gravity_step(reference.0, time.delta_secs(), items.iter_mut(), &mut exposures) {
        Ok(report) => {
            for &maze in &report.activated_mazes {
                let pos = manager.mazes()[maze].pos;
                info!("Maze '{}' activated", manager.mazes()[maze].name);
                maze_writer.write(MazeActivated { maze, pos });
            }
            for exposure in exposures.0 {
                heat_writer.write(exposure);
            }
            last_report.0 = report;
        }
        Err(err) => {
            error_once!("Gravity step skipped: {err}");
            // No stale pull survives a skipped frame.
            for item in &mut items {
                item.receive_acceleration(Vec2::ZERO);
            }
        }
    }
}

/// Zeroes `ExternalForce` on gravity receivers before anything adds to it.
pub fn gravity_force_reset_system(mut q: Query<&mut ExternalForce, With<ReceivesGravity>>) {
    for mut force in q.iter_mut() {
        force.force = Vec2::ZERO;
    }
}

/// Force that produces `acceleration` on a body of `mass`.
#[inline]
pub fn gravity_force(acceleration: Vec2, mass: f32) -> Vec2 {
    acceleration * mass
}

/// Feeds gravity into Rapier for receivers that are rigid bodies.
pub fn gravity_external_force_system(
    mut q: Query<(&GravityAcceleration, &ReadMassProperties, &mut ExternalForce), With<ReceivesGravity>>,
) {
    for (acc, mass_props, mut force) in q.iter_mut() {
        force.force += gravity_force(acc.0, mass_props.get().mass);
    }
}
