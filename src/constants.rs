//! Centralised gravity, heat and layout constants.
//!
//! These are the compiled defaults behind [`crate::config::GravityConfig`].
//! Runtime tuning goes through `assets/gravity.toml`; keep this file as the
//! authoritative default source.

// ── Planets ───────────────────────────────────────────────────────────────────

/// Largest ground height (surface radius) a planet may have (world units).
pub const MAX_GROUND_HEIGHT: f32 = 25.0;

/// Depth of the atmosphere shell above the ground.
///
/// A planet's full height (gravity influence radius) is
/// `ground_height + ATM_HEIGHT` unless set explicitly.
pub const ATM_HEIGHT: f32 = 14.0;

/// Default gravity constant for a planet when the layout does not set one.
pub const PLANET_GRAV_CONST: f32 = 1000.0;

// ── Sun ───────────────────────────────────────────────────────────────────────

/// Radius of system-interior space inside which the sun dominates gravity
/// when no planet shell applies.
///
/// Sized so that the largest planet plus atmosphere fits twice across it.
pub const SUN_RADIUS: f32 = 2.0 * (MAX_GROUND_HEIGHT + ATM_HEIGHT);

/// Lethal-heat shell around a system centre.
///
/// Doubles as the minimum-distance clamp for sun gravity.  Must stay below
/// [`SUN_RADIUS`].
pub const SUN_HOT_RADIUS: f32 = 0.75 * SUN_RADIUS;

/// Gravity constant shared by every system's sun.
pub const SUN_GRAV_CONST: f32 = 2000.0;

/// Heat damage per second dealt to an object inside [`SUN_HOT_RADIUS`].
pub const SUN_DAMAGE: f32 = 4.0;

// ── Mazes ─────────────────────────────────────────────────────────────────────

/// Extra distance beyond a maze's radius at which the maze activates.
///
/// Activation is a one-shot signal that the maze contents should be built.
pub const MAZE_ACTIVATION_MARGIN: f32 = 26.0;

// ── Shields ───────────────────────────────────────────────────────────────────

/// Seconds a shield must go without absorbing before it starts regenerating.
pub const SHIELD_MAX_IDLE_TIME: f32 = 2.0;

/// Fraction of a shield's max life regenerated per second once idle.
pub const SHIELD_REGEN_FRACTION: f32 = 1.0 / 3.0;

// ── Demo layout ───────────────────────────────────────────────────────────────

/// Radius of the demo system layout.
pub const DEMO_SYSTEM_RADIUS: f32 = 400.0;

/// Radius of the demo asteroid belt.
pub const DEMO_BELT_RADIUS: f32 = 300.0;

/// Half-width of the demo asteroid belt.
pub const DEMO_BELT_HALF_WIDTH: f32 = 20.0;

/// Number of gravity-receiving probes scattered over the demo belt.
pub const DEMO_PROBE_COUNT: usize = 24;

/// Hull hit points given to demo probes.
pub const DEMO_PROBE_HP: f32 = 30.0;

/// Shield life given to demo probes.
pub const DEMO_PROBE_SHIELD: f32 = 10.0;
