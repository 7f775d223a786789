//! Celestial bodies: planets, systems, belts and mazes.
//!
//! These are plain data owned by [`crate::planet_manager::PlanetManager`] in
//! registration order, not ECS entities.  Systems never move; planets ride
//! fixed circular orbits around their system centre; mazes are static and
//! only track whether their contents have been built yet.

use crate::constants::ATM_HEIGHT;
use crate::error::{validate_belt_half_width, validate_planet_heights, SimResult};
use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::TAU;

/// Index of a system inside the planet manager.
pub type SystemId = usize;

// ── Systems ───────────────────────────────────────────────────────────────────

/// A star system: a fixed centre with a sun.
///
/// The sun's radius shell, hot radius and gravity constant live in the shared
/// [`crate::gravity::SunProfile`]; every system uses the same one.
#[derive(Debug, Clone, PartialEq)]
pub struct SolSystem {
    pub name: String,
    pub pos: Vec2,
    /// Layout radius of the whole system (planet orbits and belts fit inside).
    pub radius: f32,
}

impl SolSystem {
    pub fn new(name: impl Into<String>, pos: Vec2, radius: f32) -> Self {
        Self {
            name: name.into(),
            pos,
            radius,
        }
    }
}

// ── Planets ───────────────────────────────────────────────────────────────────

/// Fixed circular path of a planet around its system centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetOrbit {
    /// Centre of the orbit (the owning system's position).
    pub center: Vec2,
    /// Distance from the centre.
    pub distance: f32,
    /// Current angle around the centre (radians).
    pub angle_to_sys: f32,
    /// Angular speed around the centre (radians per second).
    pub orbit_speed: f32,
}

impl PlanetOrbit {
    /// Position on the orbit for the current angle.
    #[inline]
    pub fn position(&self) -> Vec2 {
        self.center + Vec2::from_angle(self.angle_to_sys) * self.distance
    }
}

/// A planet with a two-shell gravity profile.
///
/// Inside `full_height` of its centre the planet owns gravity; `ground_height`
/// is both the surface and the minimum distance used in the inverse-square
/// term.
#[derive(Debug, Clone, PartialEq)]
pub struct Planet {
    pub name: String,
    pub system: SystemId,
    pos: Vec2,
    /// Orientation of the surface (radians).
    pub angle: f32,
    /// Self-rotation speed (radians per second).
    pub rot_speed: f32,
    ground_height: f32,
    full_height: f32,
    pub grav_const: f32,
    orbit: PlanetOrbit,
}

impl Planet {
    /// Builds a planet on its orbit with `full_height = ground_height + ATM_HEIGHT`.
    pub fn new(
        name: impl Into<String>,
        system: SystemId,
        orbit: PlanetOrbit,
        ground_height: f32,
        grav_const: f32,
    ) -> SimResult<Self> {
        Self::with_heights(
            name,
            system,
            orbit,
            ground_height,
            ground_height + ATM_HEIGHT,
            grav_const,
        )
    }

    /// Builds a planet with explicit shells; `full_height` must exceed `ground_height`.
    pub fn with_heights(
        name: impl Into<String>,
        system: SystemId,
        orbit: PlanetOrbit,
        ground_height: f32,
        full_height: f32,
        grav_const: f32,
    ) -> SimResult<Self> {
        validate_planet_heights(ground_height, full_height)?;
        Ok(Self {
            name: name.into(),
            system,
            pos: orbit.position(),
            angle: 0.0,
            rot_speed: 0.0,
            ground_height,
            full_height,
            grav_const,
            orbit,
        })
    }

    /// Sets the self-rotation speed (radians per second).
    pub fn with_rotation(mut self, rot_speed: f32) -> Self {
        self.rot_speed = rot_speed;
        self
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn ground_height(&self) -> f32 {
        self.ground_height
    }

    #[inline]
    pub fn full_height(&self) -> f32 {
        self.full_height
    }

    #[inline]
    pub fn orbit(&self) -> &PlanetOrbit {
        &self.orbit
    }

    /// Moves the planet along its orbit and spins it by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.orbit.angle_to_sys = (self.orbit.angle_to_sys + self.orbit.orbit_speed * dt).rem_euclid(TAU);
        self.angle = (self.angle + self.rot_speed * dt).rem_euclid(TAU);
        self.pos = self.orbit.position();
    }
}

// ── Belts ─────────────────────────────────────────────────────────────────────

const BELT_SAMPLE_ATTEMPTS: usize = 64;

/// An annulus around a system centre used for placement tests.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemBelt {
    pub system: SystemId,
    /// Copy of the owning system's centre; systems never move.
    center: Vec2,
    radius: f32,
    half_width: f32,
}

impl SystemBelt {
    pub fn new(system: SystemId, center: Vec2, radius: f32, half_width: f32) -> SimResult<Self> {
        validate_belt_half_width(half_width)?;
        Ok(Self {
            system,
            center,
            radius,
            half_width,
        })
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.center
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn half_width(&self) -> f32 {
        self.half_width
    }

    /// `true` iff `point` lies strictly inside the ring.
    ///
    /// Both boundaries are open: a point exactly at `radius ± half_width` is
    /// outside.
    pub fn contains(&self, point: Vec2) -> bool {
        let to_center = self.center.distance(point);
        self.radius - self.half_width < to_center && to_center < self.radius + self.half_width
    }

    /// Samples a point strictly inside the ring.
    ///
    /// `None` for a zero-width belt, or one too thin for `f32` to tell its
    /// edges apart.
    pub fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Vec2> {
        if self.half_width <= 0.0 {
            return None;
        }
        let inner = (self.radius - self.half_width).max(0.0);
        let outer = self.radius + self.half_width;
        if !inner.is_finite() || !outer.is_finite() || !(inner < outer) {
            return None;
        }
        // Resample the open boundaries instead of nudging.  A ring only a few
        // ulps wide may reject every draw, so give up after a while.
        for _ in 0..BELT_SAMPLE_ATTEMPTS {
            let dist = rng.gen_range(inner..outer);
            let angle = rng.gen_range(0.0..TAU);
            let point = self.center + Vec2::from_angle(angle) * dist;
            if self.contains(point) {
                return Some(point);
            }
        }
        None
    }
}

// ── Mazes ─────────────────────────────────────────────────────────────────────

/// A static maze structure.
///
/// Its contents are built lazily by an external builder the first time the
/// reference point comes within `radius + activation_margin`.
#[derive(Debug, Clone, PartialEq)]
pub struct Maze {
    pub name: String,
    pub pos: Vec2,
    pub radius: f32,
    objs_created: bool,
}

impl Maze {
    pub fn new(name: impl Into<String>, pos: Vec2, radius: f32) -> Self {
        Self {
            name: name.into(),
            pos,
            radius,
            objs_created: false,
        }
    }

    #[inline]
    pub fn is_activated(&self) -> bool {
        self.objs_created
    }

    /// Per-frame update.  Returns `true` exactly once: on the frame the
    /// reference point first comes within range.
    pub fn advance(&mut self, reference: Vec2, activation_margin: f32) -> bool {
        if self.objs_created {
            return false;
        }
        if reference.distance(self.pos) < self.radius + activation_margin {
            self.objs_created = true;
            return true;
        }
        false
    }
}
