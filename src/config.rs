//! Runtime gravity configuration loaded from `assets/gravity.toml`.
//!
//! [`GravityConfig`] is a Bevy [`Resource`] that mirrors the tunable
//! constants in [`crate::constants`].  At startup, [`load_gravity_config`]
//! reads `assets/gravity.toml` and overwrites the defaults with any values
//! present in the file.  Missing keys fall back to the compile-time defaults,
//! so a minimal TOML can override just the constants you care about:
//!
//! ```toml
//! sun_radius = 90.0
//! sun_damage = 6.0
//! ```
//!
//! The planet manager picks up config changes on the next frame, so editing
//! the resource at runtime retunes the shared sun profile as well.

use crate::constants::*;
use crate::error::{validate_sun_profile, SimError};
use crate::gravity::SunProfile;
use bevy::prelude::*;
use serde::Deserialize;

/// Default location of the config file, relative to the working directory.
pub const GRAVITY_CONFIG_PATH: &str = "assets/gravity.toml";

/// Runtime-tunable gravity and heat configuration.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GravityConfig {
    // ── Sun ───────────────────────────────────────────────────────────────────
    pub sun_radius: f32,
    pub sun_hot_radius: f32,
    pub sun_grav_const: f32,
    pub sun_damage: f32,

    // ── Mazes ─────────────────────────────────────────────────────────────────
    pub maze_activation_margin: f32,

    // ── Shields ───────────────────────────────────────────────────────────────
    pub shield_max_idle_time: f32,
    pub shield_regen_fraction: f32,
}

impl Default for GravityConfig {
    fn default() -> Self {
        Self {
            sun_radius: SUN_RADIUS,
            sun_hot_radius: SUN_HOT_RADIUS,
            sun_grav_const: SUN_GRAV_CONST,
            sun_damage: SUN_DAMAGE,
            maze_activation_margin: MAZE_ACTIVATION_MARGIN,
            shield_max_idle_time: SHIELD_MAX_IDLE_TIME,
            shield_regen_fraction: SHIELD_REGEN_FRACTION,
        }
    }
}

impl GravityConfig {
    /// The sun profile every system shares.
    pub fn sun_profile(&self) -> SunProfile {
        SunProfile {
            radius: self.sun_radius,
            hot_radius: self.sun_hot_radius,
            grav_const: self.sun_grav_const,
        }
    }

    /// Rejects values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), SimError> {
        validate_sun_profile(&self.sun_profile())?;
        if self.sun_damage < 0.0 {
            return Err(SimError::UnsafeConstant {
                name: "SUN_DAMAGE",
                value: self.sun_damage,
                safe_range: "[0.0, ∞)",
            });
        }
        Ok(())
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, String> {
        let loaded: GravityConfig = toml::from_str(contents).map_err(|e| e.to_string())?;
        loaded.validate().map_err(|e| e.to_string())?;
        Ok(loaded)
    }
}

/// Startup system: attempt to load [`GRAVITY_CONFIG_PATH`] and overwrite the
/// `GravityConfig` resource with any values present in the file.
///
/// Parse errors and unsafe values are logged and the defaults kept.  A missing
/// file is not an error.
pub fn load_gravity_config(mut config: ResMut<GravityConfig>) {
    let path = GRAVITY_CONFIG_PATH;
    match std::fs::read_to_string(path) {
        Ok(contents) => match GravityConfig::from_toml_str(&contents) {
            Ok(loaded) => {
                *config = loaded;
                info!("Loaded gravity config from {path}");
            }
            Err(e) => {
                warn!("Failed to load {path}: {e}; using defaults");
            }
        },
        Err(_) => {
            info!("No {path} found; using compiled defaults");
        }
    }
}
