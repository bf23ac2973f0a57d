//! Weapon behaviors and projectile motion
//!
//! Each weapon variant is a row in a lookup table: fire cooldown, shots per
//! trigger, and projectile speed. Spawn geometry and motion rules are the
//! only per-variant code paths (the spread fan and homing seek).

use glam::Vec2;

use super::state::{Asteroid, Projectile, Ship, WeaponType};
use crate::consts::*;

/// Per-weapon firing parameters
#[derive(Debug, Clone, Copy)]
pub struct WeaponSpec {
    /// Ticks between shots
    pub cooldown: u32,
    /// Projectiles per trigger pull
    pub shots: u32,
    /// Projectile speed (px/s)
    pub speed: f32,
}

/// Half-angle of the spread fan (radians, ~17 degrees)
pub const SPREAD_HALF_ANGLE: f32 = 0.3;

impl WeaponType {
    pub fn spec(self) -> WeaponSpec {
        match self {
            WeaponType::Basic => WeaponSpec { cooldown: 10, shots: 1, speed: 900.0 },
            WeaponType::Spread => WeaponSpec { cooldown: 15, shots: 3, speed: 720.0 },
            WeaponType::Rapid => WeaponSpec { cooldown: 3, shots: 1, speed: 1200.0 },
            WeaponType::Laser => WeaponSpec { cooldown: 8, shots: 1, speed: 1500.0 },
            WeaponType::Homing => WeaponSpec { cooldown: 20, shots: 1, speed: 600.0 },
        }
    }
}

/// Fire the ship's active weapon from its nose.
///
/// No-op (returns an empty pattern) while the cooldown is running; otherwise
/// resets the cooldown and returns the weapon's shot pattern.
pub fn fire(ship: &mut Ship) -> Vec<Projectile> {
    if ship.shoot_cooldown > 0 {
        return Vec::new();
    }
    let spec = ship.weapon.spec();
    ship.shoot_cooldown = spec.cooldown;

    let origin = Vec2::new(ship.pos.x, ship.pos.y - SHIP_HALF_HEIGHT);
    let mut shots = Vec::with_capacity(spec.shots as usize);
    match ship.weapon {
        WeaponType::Spread => {
            // Fan of three: straight up plus one shot either side
            for angle in [-SPREAD_HALF_ANGLE, 0.0, SPREAD_HALF_ANGLE] {
                let dir = Vec2::new(angle.sin(), -angle.cos());
                shots.push(make_projectile(origin, dir * spec.speed, ship.weapon));
            }
        }
        _ => {
            shots.push(make_projectile(
                origin,
                Vec2::new(0.0, -spec.speed),
                ship.weapon,
            ));
        }
    }
    shots
}

fn make_projectile(pos: Vec2, vel: Vec2, kind: WeaponType) -> Projectile {
    Projectile {
        pos,
        vel,
        kind,
        damage: 1,
        active: true,
        target: None,
    }
}

/// Advance a projectile by one tick and cull it once off-screen.
///
/// Homing projectiles keep a non-owning handle to their target; when the
/// referent is gone the handle is cleared and the nearest live asteroid
/// acquired lazily. With no asteroids alive the projectile continues along
/// its current velocity.
pub fn advance(projectile: &mut Projectile, dt: f32, asteroids: &[Asteroid]) {
    if projectile.kind == WeaponType::Homing {
        advance_homing(projectile, dt, asteroids);
    } else {
        projectile.pos += projectile.vel * dt;
    }

    let m = OFFSCREEN_MARGIN;
    let p = projectile.pos;
    if p.x < -m || p.x > SCREEN_WIDTH + m || p.y < -m || p.y > SCREEN_HEIGHT + m {
        projectile.active = false;
    }
}

fn advance_homing(projectile: &mut Projectile, dt: f32, asteroids: &[Asteroid]) {
    let speed = projectile.kind.spec().speed;

    // Validate the current handle; re-acquire only when it has gone stale
    let target_alive = projectile
        .target
        .is_some_and(|id| asteroids.iter().any(|a| a.id == id));
    if !target_alive {
        projectile.target = nearest_asteroid(projectile.pos, asteroids);
    }

    let Some(target) = projectile
        .target
        .and_then(|id| asteroids.iter().find(|a| a.id == id))
    else {
        // No asteroids alive: straight-line fallback
        projectile.pos += projectile.vel * dt;
        return;
    };

    let to_target = target.pos - projectile.pos;
    let dist = to_target.length();
    if dist <= f32::EPSILON {
        // Exactly on the target center; skip movement to avoid a NaN direction
        return;
    }
    projectile.vel = to_target / dist * speed;
    projectile.pos += projectile.vel * dt;
}

fn nearest_asteroid(pos: Vec2, asteroids: &[Asteroid]) -> Option<u32> {
    asteroids
        .iter()
        .min_by(|a, b| {
            a.pos
                .distance_squared(pos)
                .partial_cmp(&b.pos.distance_squared(pos))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|a| a.id)
}
