//! Owner of every planet, system, belt and maze, and of the per-step gravity pass.
//!
//! [`PlanetManager::run_gravity_step`] is the whole frame in order:
//! advance bodies, refresh the nearest snapshot against the reference point,
//! then push the gravity field into every receiver.  The snapshot is written
//! only here; everyone else reads it through the accessors.

use crate::celestial::{Maze, Planet, SolSystem, SystemBelt, SystemId};
use crate::constants::MAZE_ACTIVATION_MARGIN;
use crate::error::{validate_sun_profile, SimError, SimResult};
use crate::gravity::{GravityField, SunProfile};
use crate::nearest::nearest_index;
use bevy::prelude::*;

/// Something in the world that may be pulled by gravity.
pub trait GravityReceiver {
    fn position(&self) -> Vec2;

    /// Objects returning `false` are skipped entirely.
    fn accepts_gravity(&self) -> bool {
        true
    }

    /// Receives this frame's gravity acceleration (zero when no source applies).
    fn receive_acceleration(&mut self, acceleration: Vec2);
}

/// Where sun heat exposure is reported.  Damage magnitude is the sink's call.
pub trait HeatSink<R: ?Sized> {
    fn apply_heat_damage(&mut self, receiver: &R, proximity: f32);
}

impl<R: ?Sized, F: FnMut(&R, f32)> HeatSink<R> for F {
    fn apply_heat_damage(&mut self, receiver: &R, proximity: f32) {
        self(receiver, proximity)
    }
}

/// Summary of one gravity step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    /// Receivers that got a non-`None` source this step.
    pub pulled: usize,
    /// Receivers handed to the heat sink.
    pub heated: usize,
    /// Indices of mazes that activated during the advance phase.
    pub activated_mazes: Vec<usize>,
}

/// Every celestial body, in registration order, plus the nearest snapshot.
#[derive(Resource, Debug, Clone)]
pub struct PlanetManager {
    systems: Vec<SolSystem>,
    planets: Vec<Planet>,
    belts: Vec<SystemBelt>,
    mazes: Vec<Maze>,
    sun: SunProfile,
    maze_activation_margin: f32,
    nearest_planet: Option<usize>,
    nearest_system: Option<usize>,
}

impl Default for PlanetManager {
    fn default() -> Self {
        Self::new(SunProfile::default(), MAZE_ACTIVATION_MARGIN)
    }
}

impl PlanetManager {
    pub fn new(sun: SunProfile, maze_activation_margin: f32) -> Self {
        Self {
            systems: Vec::new(),
            planets: Vec::new(),
            belts: Vec::new(),
            mazes: Vec::new(),
            sun,
            maze_activation_margin,
            nearest_planet: None,
            nearest_system: None,
        }
    }

    // ── Registration ─────────────────────────────────────────────────────────

    pub fn add_system(&mut self, system: SolSystem) -> SystemId {
        self.systems.push(system);
        self.systems.len() - 1
    }

    pub fn add_planet(&mut self, planet: Planet) -> SimResult<usize> {
        self.system(planet.system)?;
        self.planets.push(planet);
        Ok(self.planets.len() - 1)
    }

    pub fn add_belt(&mut self, belt: SystemBelt) -> SimResult<usize> {
        self.system(belt.system)?;
        self.belts.push(belt);
        Ok(self.belts.len() - 1)
    }

    pub fn add_maze(&mut self, maze: Maze) -> usize {
        self.mazes.push(maze);
        self.mazes.len() - 1
    }

    /// Replaces the shared sun profile.  An unusable profile is rejected and
    /// the current one kept.
    pub fn set_sun_profile(&mut self, sun: SunProfile) -> SimResult<()> {
        validate_sun_profile(&sun)?;
        self.sun = sun;
        Ok(())
    }

    pub fn set_maze_activation_margin(&mut self, margin: f32) {
        self.maze_activation_margin = margin;
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    pub fn system(&self, index: SystemId) -> SimResult<&SolSystem> {
        self.systems
            .get(index)
            .ok_or(SimError::UnknownSystem { index })
    }

    pub fn systems(&self) -> &[SolSystem] {
        &self.systems
    }

    pub fn planets(&self) -> &[Planet] {
        &self.planets
    }

    pub fn planets_mut(&mut self) -> &mut [Planet] {
        &mut self.planets
    }

    pub fn belts(&self) -> &[SystemBelt] {
        &self.belts
    }

    pub fn mazes(&self) -> &[Maze] {
        &self.mazes
    }

    pub fn sun_profile(&self) -> SunProfile {
        self.sun
    }

    // ── Nearest queries ──────────────────────────────────────────────────────

    pub fn nearest_planet_to(&self, point: Vec2) -> Option<&Planet> {
        nearest_index(point, &self.planets, Planet::pos).map(|i| &self.planets[i])
    }

    pub fn nearest_system_to(&self, point: Vec2) -> Option<&SolSystem> {
        nearest_index(point, &self.systems, |s| s.pos).map(|i| &self.systems[i])
    }

    pub fn nearest_maze_to(&self, point: Vec2) -> Option<&Maze> {
        nearest_index(point, &self.mazes, |m| m.pos).map(|i| &self.mazes[i])
    }

    /// Nearest planet as of the last completed step.
    pub fn current_nearest_planet(&self) -> Option<&Planet> {
        self.nearest_planet.and_then(|i| self.planets.get(i))
    }

    /// Nearest system as of the last completed step.
    pub fn current_nearest_system(&self) -> Option<&SolSystem> {
        self.nearest_system.and_then(|i| self.systems.get(i))
    }

    /// Gravity field for the current snapshot, if one has been computed.
    pub fn gravity_field(&self) -> Option<GravityField> {
        let planet = self.current_nearest_planet()?;
        let system = self.current_nearest_system()?;
        Some(GravityField::new(planet, system, self.sun))
    }

    // ── Step ─────────────────────────────────────────────────────────────────

    /// Advances planets and mazes by `dt`, returning newly activated maze indices.
    pub fn advance(&mut self, reference: Vec2, dt: f32) -> Vec<usize> {
        for planet in &mut self.planets {
            planet.advance(dt);
        }
        let margin = self.maze_activation_margin;
        self.mazes
            .iter_mut()
            .enumerate()
            .filter_map(|(i, maze)| maze.advance(reference, margin).then_some(i))
            .collect()
    }

    /// Recomputes the nearest planet and system against `reference`.
    ///
    /// Must run after [`Self::advance`] so the snapshot sees this frame's
    /// planet positions.
    pub fn refresh_nearest(&mut self, reference: Vec2) -> SimResult<GravityField> {
        self.nearest_planet = nearest_index(reference, &self.planets, Planet::pos);
        self.nearest_system = nearest_index(reference, &self.systems, |s| s.pos);

        let planet = self
            .current_nearest_planet()
            .ok_or(SimError::EmptyCandidates { domain: "planet" })?;
        let system = self
            .current_nearest_system()
            .ok_or(SimError::EmptyCandidates { domain: "system" })?;
        Ok(GravityField::new(planet, system, self.sun))
    }

    /// One full frame: advance, refresh the snapshot, apply gravity.
    ///
    /// Without a planet or a system nothing is advanced and
    /// [`SimError::EmptyCandidates`] is returned.
    ///
    /// Receivers that do not accept gravity are never touched.  Receivers in
    /// no shell receive `Vec2::ZERO`.  Receivers whose source is the sun are
    /// passed to `heat` once, with their distance to the system centre.
    pub fn run_gravity_step<'a, R, I, H>(
        &mut self,
        reference: Vec2,
        dt: f32,
        receivers: I,
        heat: &mut H,
    ) -> SimResult<StepReport>
    where
        R: GravityReceiver + ?Sized + 'a,
        I: IntoIterator<Item = &'a mut R>,
        H: HeatSink<R> + ?Sized,
    {
        // Nothing advances in a world that cannot be stepped, so no maze
        // activation is lost with the error.
        if self.planets.is_empty() {
            return Err(SimError::EmptyCandidates { domain: "planet" });
        }
        if self.systems.is_empty() {
            return Err(SimError::EmptyCandidates { domain: "system" });
        }
        let activated_mazes = self.advance(reference, dt);
        let field = self.refresh_nearest(reference)?;

        let mut report = StepReport {
            activated_mazes,
            ..Default::default()
        };
        for receiver in receivers {
            if !receiver.accepts_gravity() {
                continue;
            }
            let outcome = field.evaluate(receiver.position());
            receiver.receive_acceleration(outcome.acceleration);
            if outcome.source.min_dist().is_some() {
                report.pulled += 1;
            }
            if let Some(proximity) = outcome.heat_proximity {
                heat.apply_heat_damage(receiver, proximity);
                report.heated += 1;
            }
        }
        Ok(report)
    }
}
