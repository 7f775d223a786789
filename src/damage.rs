//! Sun heat damage and the hull/shield components that take it.
//!
//! The gravity step only reports *that* an object sits in a sun shell and how
//! far it is from the centre ([`HeatExposure`]).  How much that hurts is
//! decided here: a flat `sun_damage` per second inside the hot radius, nothing
//! outside it.  Shields soak damage first, the hull takes the rest.

use crate::config::GravityConfig;
use crate::simulation::HeatExposure;
use bevy::prelude::*;

// ── Components ─────────────────────────────────────────────────────────────────

/// Structural hit points of a gravity-receiving object.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Hull {
    pub hp: f32,
    pub max_hp: f32,
}

impl Hull {
    pub fn new(max_hp: f32) -> Self {
        Self { hp: max_hp, max_hp }
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.hp <= 0.0
    }

    /// Subtracts `dmg`, clamping at zero.  Returns `true` on the hit that
    /// brings the hull to zero.
    pub fn receive(&mut self, dmg: f32) -> bool {
        if self.is_destroyed() || dmg <= 0.0 {
            return false;
        }
        self.hp = (self.hp - dmg).max(0.0);
        self.is_destroyed()
    }
}

/// Regenerating damage absorber in front of a [`Hull`].
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Shield {
    pub life: f32,
    pub max_life: f32,
    /// Seconds since the shield last absorbed anything.
    pub idle_time: f32,
    pub max_idle_time: f32,
    /// Life regained per second once idle for `max_idle_time`.
    pub regen_speed: f32,
}

impl Shield {
    /// A full shield using the configured idle time and regen fraction.
    pub fn new(max_life: f32, config: &GravityConfig) -> Self {
        Self {
            life: max_life,
            max_life,
            idle_time: 0.0,
            max_idle_time: config.shield_max_idle_time,
            regen_speed: max_life * config.shield_regen_fraction,
        }
    }

    /// Absorbs as much of `dmg` as the remaining life allows and returns the
    /// part that gets through.
    pub fn absorb(&mut self, dmg: f32) -> f32 {
        if dmg <= 0.0 {
            return 0.0;
        }
        self.idle_time = 0.0;
        if self.life >= dmg {
            self.life -= dmg;
            return 0.0;
        }
        let through = dmg - self.life;
        self.life = 0.0;
        through
    }

    /// Idles, then regenerates toward `max_life`.
    pub fn update(&mut self, dt: f32) {
        if self.idle_time >= self.max_idle_time {
            if self.life < self.max_life {
                self.life = (self.life + self.regen_speed * dt).min(self.max_life);
            }
        } else {
            self.idle_time += dt;
        }
    }
}

// ── Messages ───────────────────────────────────────────────────────────────────

/// Written once, on the frame a hull reaches zero.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HullDestroyed {
    pub target: Entity,
}

// ── Systems ────────────────────────────────────────────────────────────────────

/// Heat damage for one frame at `proximity` from a system centre.
///
/// Nothing outside the hot radius: the sun shell pulls there but does not burn.
pub fn sun_heat_damage(config: &GravityConfig, proximity: f32, dt: f32) -> Option<f32> {
    if proximity > config.sun_hot_radius {
        return None;
    }
    Some(config.sun_damage * dt)
}

pub fn shield_regen_system(time: Res<Time>, mut q: Query<&mut Shield>) {
    let dt = time.delta_secs();
    for mut shield in q.iter_mut() {
        shield.update(dt);
    }
}

/// Applies sun heat to every object reported in a [`HeatExposure`] this frame.
pub fn sun_heat_damage_system(
    config: Res<GravityConfig>,
    time: Res<Time>,
    mut exposures: MessageReader<HeatExposure>,
    mut q: Query<(&mut Hull, Option<&mut Shield>)>,
    mut destroyed: MessageWriter<HullDestroyed>,
) {
    let dt = time.delta_secs();
    for exposure in exposures.read() {
        let Some(dmg) = sun_heat_damage(&config, exposure.proximity, dt) else {
            continue;
        };
        let Ok((mut hull, shield)) = q.get_mut(exposure.target) else {
            continue;
        };
        let through = match shield {
            Some(mut shield) => shield.absorb(dmg),
            None => dmg,
        };
        if hull.receive(through) {
            info!("Hull {:?} burned out by the sun", exposure.target);
            destroyed.write(HullDestroyed {
                target: exposure.target,
            });
        }
    }
}
