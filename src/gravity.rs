//! Two-tier gravity field: planet shell first, then sun shell, else nothing.
//!
//! [`GravityField`] is a per-step snapshot of the nearest planet and nearest
//! system.  [`GravityField::select_source`] picks the dominant source for a
//! point and [`GravityField::evaluate`] turns it into a clamped inverse-square
//! acceleration plus the heat-exposure decision.

use crate::celestial::{Planet, SolSystem};
use crate::constants::{SUN_GRAV_CONST, SUN_HOT_RADIUS, SUN_RADIUS};
use bevy::prelude::*;

/// The sun profile shared by every system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunProfile {
    /// Shell inside which the sun dominates when no planet shell applies.
    pub radius: f32,
    /// Lethal-heat shell; also the sun's gravity clamp distance.
    pub hot_radius: f32,
    pub grav_const: f32,
}

impl Default for SunProfile {
    fn default() -> Self {
        Self {
            radius: SUN_RADIUS,
            hot_radius: SUN_HOT_RADIUS,
            grav_const: SUN_GRAV_CONST,
        }
    }
}

/// The parts of a planet the field needs, copied at snapshot time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetShell {
    pub pos: Vec2,
    pub ground_height: f32,
    pub full_height: f32,
    pub grav_const: f32,
}

impl From<&Planet> for PlanetShell {
    fn from(planet: &Planet) -> Self {
        Self {
            pos: planet.pos(),
            ground_height: planet.ground_height(),
            full_height: planet.full_height(),
            grav_const: planet.grav_const,
        }
    }
}

/// Whichever body owns gravity at a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GravitySource {
    Planet {
        pos: Vec2,
        full_height: f32,
        ground_height: f32,
        grav_const: f32,
    },
    Sun {
        pos: Vec2,
        radius: f32,
        hot_radius: f32,
        grav_const: f32,
    },
    None,
}

impl GravitySource {
    /// Minimum distance used in the inverse-square term.
    pub fn min_dist(&self) -> Option<f32> {
        match *self {
            GravitySource::Planet { ground_height, .. } => Some(ground_height),
            GravitySource::Sun { hot_radius, .. } => Some(hot_radius),
            GravitySource::None => None,
        }
    }

    /// `true` for a planet source; sun heat never applies there.
    #[inline]
    pub fn is_planet(&self) -> bool {
        matches!(self, GravitySource::Planet { .. })
    }

    /// Clamped inverse-square acceleration at `point`.
    ///
    /// The distance is clamped to [`Self::min_dist`] before squaring, so a
    /// point at the source centre gets a finite (zero-direction) result.
    pub fn acceleration(&self, point: Vec2) -> Vec2 {
        let (pos, min_dist, grav_const) = match *self {
            GravitySource::Planet {
                pos,
                ground_height,
                grav_const,
                ..
            } => (pos, ground_height, grav_const),
            GravitySource::Sun {
                pos,
                hot_radius,
                grav_const,
                ..
            } => (pos, hot_radius, grav_const),
            GravitySource::None => return Vec2::ZERO,
        };

        let delta = pos - point;
        let len = delta.length().max(min_dist);
        let g = gravity_magnitude(grav_const, len);
        delta.normalize_or_zero() * g
    }
}

/// `grav_const / len²`; callers clamp `len` first.
#[inline]
pub fn gravity_magnitude(grav_const: f32, len: f32) -> f32 {
    grav_const / len / len
}

/// What the field did to one point this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityOutcome {
    pub source: GravitySource,
    /// Acceleration to deliver; exactly zero when no source applies.
    pub acceleration: Vec2,
    /// Distance to the system centre when the sun is the source.  `Some`
    /// means the object must be handed to the heat-damage sink.
    pub heat_proximity: Option<f32>,
}

/// Snapshot of the nearest planet and nearest system for one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityField {
    pub planet: PlanetShell,
    pub system_pos: Vec2,
    pub sun: SunProfile,
}

impl GravityField {
    pub fn new(planet: &Planet, system: &SolSystem, sun: SunProfile) -> Self {
        Self {
            planet: PlanetShell::from(planet),
            system_pos: system.pos,
            sun,
        }
    }

    /// Dominance rule: planet shell wins, then the sun shell, else no source.
    ///
    /// Also returns the distance to the system centre, which the heat sink
    /// receives as its proximity argument.
    pub fn select_source(&self, point: Vec2) -> (GravitySource, f32) {
        let to_planet = self.planet.pos.distance(point);
        let to_system = self.system_pos.distance(point);

        let source = if to_planet < self.planet.full_height {
            GravitySource::Planet {
                pos: self.planet.pos,
                full_height: self.planet.full_height,
                ground_height: self.planet.ground_height,
                grav_const: self.planet.grav_const,
            }
        } else if to_system < self.sun.radius {
            GravitySource::Sun {
                pos: self.system_pos,
                radius: self.sun.radius,
                hot_radius: self.sun.hot_radius,
                grav_const: self.sun.grav_const,
            }
        } else {
            GravitySource::None
        };
        (source, to_system)
    }

    pub fn evaluate(&self, point: Vec2) -> GravityOutcome {
        let (source, to_system) = self.select_source(point);
        let heat_proximity = match source {
            GravitySource::Sun { .. } => Some(to_system),
            _ => None,
        };
        GravityOutcome {
            source,
            acceleration: source.acceleration(point),
            heat_proximity,
        }
    }
}
