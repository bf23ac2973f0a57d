//! Per-tick collision and scoring resolver
//!
//! Runs once per tick after all entities have moved, in a fixed order for
//! reproducible behavior: projectiles against asteroids, then the ship
//! against asteroids, then the ship against power-ups. Removals are queued
//! during the pass and applied only once the pass completes; queuing an
//! entity twice is a no-op.

use glam::Vec2;

use super::particles::{self, weapon_color};
use super::state::{GameEvent, GamePhase, GameState, WeaponType};
use crate::circles_overlap;
use crate::consts::*;

/// Resolve all pairwise interactions for this tick
pub fn resolve_collisions(state: &mut GameState) {
    let mut removed: Vec<u32> = Vec::new();

    resolve_projectiles(state, &mut removed);
    resolve_ship_asteroids(state, &mut removed);
    resolve_powerups(state);

    // Queued removals take effect only now, after the full pass
    state.asteroids.retain(|a| !removed.contains(&a.id));
}

/// Projectile x Asteroid: first overlap wins, at most one hit per projectile
fn resolve_projectiles(state: &mut GameState, removed: &mut Vec<u32>) {
    for projectile in &mut state.projectiles {
        if !projectile.active {
            continue;
        }
        for asteroid in &mut state.asteroids {
            if asteroid.health <= 0 || removed.contains(&asteroid.id) {
                continue;
            }
            if !circles_overlap(
                projectile.pos,
                PROJECTILE_RADIUS,
                asteroid.pos,
                asteroid.radius,
            ) {
                continue;
            }

            projectile.active = false;
            if asteroid.hit(projectile.damage) {
                state.score += if asteroid.energy_core {
                    SCORE_ENERGY_CORE
                } else {
                    SCORE_ASTEROID
                };
                state.events.push(GameEvent::AsteroidDestroyed {
                    energy_core: asteroid.energy_core,
                });
                let (color, count) = if asteroid.energy_core {
                    (particles::YELLOW, 40)
                } else {
                    (particles::ORANGE, 30)
                };
                state
                    .particles
                    .emit(asteroid.pos, color, count, &mut state.rng);
                queue_removal(removed, asteroid.id);
            } else {
                state.events.push(GameEvent::AsteroidHit);
                state
                    .particles
                    .emit(asteroid.pos, particles::CYAN, 15, &mut state.rng);
            }
            break;
        }
    }
}

/// Ship x Asteroid: shrunk hit circle; every overlapping asteroid is removed
/// but the ship takes exactly one damage event per tick.
fn resolve_ship_asteroids(state: &mut GameState, removed: &mut Vec<u32>) {
    if state.ship.invulnerable > 0.0 {
        return;
    }
    let mut struck = false;
    for asteroid in &state.asteroids {
        if asteroid.health <= 0 || removed.contains(&asteroid.id) {
            continue;
        }
        let hit_radius = SHIP_HIT_SHRINK * (SHIP_HIT_RADIUS + asteroid.radius);
        if state.ship.pos.distance_squared(asteroid.pos) < hit_radius * hit_radius {
            queue_removal(removed, asteroid.id);
            struck = true;
        }
    }
    if struck {
        let destroyed = state.ship.take_damage();
        state.events.push(GameEvent::ShipHit);
        state
            .particles
            .emit(state.ship.pos, particles::RED, 40, &mut state.rng);
        if destroyed {
            state.phase = GamePhase::GameOver;
            state.events.push(GameEvent::GameOver {
                score: state.score,
                wave: state.waves.current_wave(),
            });
            log::info!(
                "game over at wave {} with score {}",
                state.waves.current_wave(),
                state.score
            );
        }
    }
}

/// Ship x PowerUp: any overlap applies the payload and removes the power-up
fn resolve_powerups(state: &mut GameState) {
    let ship_pos = state.ship.pos;
    let mut collected: Vec<(WeaponType, Vec2)> = Vec::new();
    state.powerups.retain(|powerup| {
        if circles_overlap(ship_pos, SHIP_HIT_RADIUS, powerup.pos, POWERUP_RADIUS) {
            collected.push((powerup.weapon, powerup.pos));
            false
        } else {
            true
        }
    });
    for (weapon, pos) in collected {
        state.ship.change_weapon(weapon);
        state.events.push(GameEvent::PowerUpCollected(weapon));
        state
            .particles
            .emit(pos, weapon_color(weapon), 30, &mut state.rng);
        log::debug!("collected {weapon:?} power-up");
    }
}

fn queue_removal(removed: &mut Vec<u32>, id: u32) {
    // Re-queuing an already-queued entity is a no-op, never a fault
    if !removed.contains(&id) {
        removed.push(id);
    }
}
