//! Simulation-specific error types.
//!
//! The gravity step never panics on a malformed world; it reports through
//! these types and the calling system logs and skips the frame.
//!
//! ## Usage
//!
//! ```rust
//! use perihelion::error::{validate_sun_profile, SimResult};
//! use perihelion::gravity::SunProfile;
//!
//! fn check(profile: &SunProfile) -> SimResult<()> {
//!     validate_sun_profile(profile)?;
//!     Ok(())
//! }
//! ```

use crate::gravity::SunProfile;
use std::fmt;

/// Top-level error enum for the planetary simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// A nearest query that the gravity step depends on ran over an empty
    /// candidate set.  Once systems exist this never happens; seeing it means
    /// the world was stepped before it was filled.
    EmptyCandidates {
        /// Which candidate domain was empty ("planet", "system").
        domain: &'static str,
    },

    /// A planet or belt referenced a system index that is not registered.
    UnknownSystem {
        /// The index that was looked up.
        index: usize,
    },

    /// Constant or body parameter is outside its safe operating range.
    UnsafeConstant {
        /// Name of the constant (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the safe range.
        safe_range: &'static str,
    },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::EmptyCandidates { domain } => write!(
                f,
                "no {} registered; the gravity step needs at least one",
                domain
            ),
            SimError::UnknownSystem { index } => {
                write!(f, "system index {} is not registered", index)
            }
            SimError::UnsafeConstant {
                name,
                value,
                safe_range,
            } => write!(
                f,
                "constant '{}' = {} is outside safe range {}",
                name, value, safe_range
            ),
        }
    }
}

impl std::error::Error for SimError {}

/// Convenience alias: a `Result` using `SimError` as the error type.
pub type SimResult<T> = Result<T, SimError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Checks that the shared sun profile is usable.
///
/// The hot radius is the gravity clamp and must be strictly positive and
/// strictly inside the sun radius; the gravity constant must be positive.
pub fn validate_sun_profile(profile: &SunProfile) -> SimResult<()> {
    if profile.radius <= 0.0 {
        return Err(SimError::UnsafeConstant {
            name: "SUN_RADIUS",
            value: profile.radius,
            safe_range: "(0.0, ∞)",
        });
    }
    if profile.hot_radius <= 0.0 || profile.hot_radius >= profile.radius {
        return Err(SimError::UnsafeConstant {
            name: "SUN_HOT_RADIUS",
            value: profile.hot_radius,
            safe_range: "(0.0, SUN_RADIUS)",
        });
    }
    if profile.grav_const <= 0.0 {
        return Err(SimError::UnsafeConstant {
            name: "SUN_GRAV_CONST",
            value: profile.grav_const,
            safe_range: "(0.0, ∞)",
        });
    }
    Ok(())
}

/// Checks that a planet's shells are ordered: `0 < ground < full`.
pub fn validate_planet_heights(ground_height: f32, full_height: f32) -> SimResult<()> {
    if ground_height <= 0.0 {
        return Err(SimError::UnsafeConstant {
            name: "ground_height",
            value: ground_height,
            safe_range: "(0.0, ∞)",
        });
    }
    if full_height <= ground_height {
        return Err(SimError::UnsafeConstant {
            name: "full_height",
            value: full_height,
            safe_range: "(ground_height, ∞)",
        });
    }
    Ok(())
}

/// Returns an error if a belt half-width is negative, infinite or NaN.
pub fn validate_belt_half_width(half_width: f32) -> SimResult<()> {
    if half_width >= 0.0 && half_width.is_finite() {
        Ok(())
    } else {
        Err(SimError::UnsafeConstant {
            name: "belt_half_width",
            value: half_width,
            safe_range: "[0.0, f32::MAX]",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sun_profile_is_safe() {
        assert_eq!(validate_sun_profile(&SunProfile::default()), Ok(()));
    }

    #[test]
    fn hot_radius_outside_sun_radius_is_rejected() {
        let profile = SunProfile {
            radius: 50.0,
            hot_radius: 60.0,
            grav_const: 10.0,
        };
        let err = validate_sun_profile(&profile).unwrap_err();
        assert!(matches!(
            err,
            SimError::UnsafeConstant {
                name: "SUN_HOT_RADIUS",
                ..
            }
        ));
    }

    #[test]
    fn planet_full_height_must_exceed_ground() {
        assert!(validate_planet_heights(10.0, 24.0).is_ok());
        assert!(validate_planet_heights(10.0, 10.0).is_err());
        assert!(validate_planet_heights(0.0, 5.0).is_err());
    }

    #[test]
    fn belt_half_width_rejects_negative_nan_and_infinite() {
        assert!(validate_belt_half_width(0.0).is_ok());
        assert!(validate_belt_half_width(-1.0).is_err());
        assert!(validate_belt_half_width(f32::NAN).is_err());
        assert!(validate_belt_half_width(f32::INFINITY).is_err());
    }

    #[test]
    fn display_names_the_empty_domain() {
        let err = SimError::EmptyCandidates { domain: "planet" };
        assert_eq!(
            err.to_string(),
            "no planet registered; the gravity step needs at least one"
        );
    }
}
