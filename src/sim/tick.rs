//! Fixed timestep simulation tick
//!
//! One call to [`tick`] advances the whole game by a single step: input,
//! spawning, entity motion, collision resolution, pruning, and the visual
//! layers, in that order. All mutation happens synchronously inside the
//! call, so the shell can quit or snapshot at any tick boundary.

use glam::Vec2;

use rand::Rng;

use super::collision::resolve_collisions;
use super::state::{Asteroid, GameEvent, GamePhase, GameState, PowerUp, WeaponType};
use super::weapons;
use crate::consts::*;

/// Input commands for a single tick, sampled once by the shell
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub fire: bool,
    /// Demo mode: the core steers and fires by itself
    pub auto_pilot: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();

    if state.phase == GamePhase::GameOver {
        // Terminal until the shell calls restart
        return;
    }

    state.tick_count += 1;

    let input = if input.auto_pilot {
        auto_pilot(state)
    } else {
        *input
    };

    spawn_asteroids(state, dt);
    spawn_powerups(state, dt);
    update_ship(state, &input, dt);
    advance_projectiles(state, dt);
    advance_asteroids(state, dt);
    advance_powerups(state, dt);

    resolve_collisions(state);

    // Inactive projectiles are gone before the next tick ever sees them
    state.projectiles.retain(|p| p.active);

    state.particles.update(dt);
    let starfield = &mut state.starfield;
    starfield.update(dt, &mut state.rng);
}

/// Wave-driven asteroid spawning
fn spawn_asteroids(state: &mut GameState, dt: f32) {
    let wave_before = state.waves.current_wave();
    if state.waves.should_spawn(dt) {
        let category = state.waves.roll_size_category(&mut state.rng);
        let id = state.next_entity_id();
        let asteroid = Asteroid::new(category, id, &mut state.rng);
        log::trace!(
            "spawned size-{} asteroid {} at {:.0},{:.0}",
            asteroid.size_category,
            asteroid.id,
            asteroid.pos.x,
            asteroid.pos.y
        );
        state.asteroids.push(asteroid);
    }
    let wave_now = state.waves.current_wave();
    if wave_now != wave_before {
        state.events.push(GameEvent::WaveStarted(wave_now));
    }
}

/// Timed power-up drops with a uniform weapon payload
fn spawn_powerups(state: &mut GameState, dt: f32) {
    state.powerup_timer -= dt;
    if state.powerup_timer <= 0.0 {
        state.powerup_timer = POWERUP_INTERVAL;
        let weapon = WeaponType::ALL[state.rng.random_range(0..WeaponType::ALL.len())];
        state.powerups.push(PowerUp {
            pos: Vec2::new(state.rng.random_range(50.0..SCREEN_WIDTH - 50.0), -40.0),
            weapon,
        });
    }
}

fn update_ship(state: &mut GameState, input: &TickInput, dt: f32) {
    let ship = &mut state.ship;

    ship.vel_x = match (input.move_left, input.move_right) {
        (true, false) => -SHIP_SPEED,
        (false, true) => SHIP_SPEED,
        _ => 0.0,
    };
    ship.pos.x = (ship.pos.x + ship.vel_x * dt)
        .clamp(SHIP_HALF_WIDTH, SCREEN_WIDTH - SHIP_HALF_WIDTH);

    ship.record_trail();
    ship.update_timers(dt);

    if input.fire {
        let shots = weapons::fire(ship);
        if !shots.is_empty() {
            state.events.push(GameEvent::WeaponFired(ship.weapon));
            state.projectiles.extend(shots);
        }
    }
}

fn advance_projectiles(state: &mut GameState, dt: f32) {
    let asteroids = &state.asteroids;
    for projectile in &mut state.projectiles {
        weapons::advance(projectile, dt, asteroids);
    }
}

fn advance_asteroids(state: &mut GameState, dt: f32) {
    for asteroid in &mut state.asteroids {
        asteroid.pos += asteroid.vel * dt;
        asteroid.rotation += asteroid.rotation_speed * dt;
    }
    // Rocks that drift past the bottom edge despawn without effect
    state
        .asteroids
        .retain(|a| a.pos.y - a.radius <= SCREEN_HEIGHT);
}

fn advance_powerups(state: &mut GameState, dt: f32) {
    for powerup in &mut state.powerups {
        powerup.pos.y += POWERUP_FALL_SPEED * dt;
    }
    state
        .powerups
        .retain(|p| p.pos.y - POWERUP_RADIUS <= SCREEN_HEIGHT);
}

/// Demo AI: dodge the most pressing asteroid, chase power-ups when safe,
/// and keep the trigger held.
fn auto_pilot(state: &GameState) -> TickInput {
    let ship_x = state.ship.pos.x;

    // Most dangerous rock: the one closest to reaching the ship's row
    let threat = state
        .asteroids
        .iter()
        .filter(|a| a.pos.y < state.ship.pos.y)
        .min_by(|a, b| {
            let ta = (state.ship.pos.y - a.pos.y) / a.vel.y.max(1.0);
            let tb = (state.ship.pos.y - b.pos.y) / b.vel.y.max(1.0);
            ta.partial_cmp(&tb).unwrap_or(std::cmp::Ordering::Equal)
        });

    let dodge_margin = 120.0;
    let target_x = match threat {
        Some(rock) if (rock.pos.x - ship_x).abs() < dodge_margin => {
            // Slide away from the incoming rock
            if rock.pos.x > ship_x {
                ship_x - dodge_margin
            } else {
                ship_x + dodge_margin
            }
        }
        _ => {
            // Safe: drift toward the nearest power-up, else recenter
            state
                .powerups
                .iter()
                .min_by(|a, b| {
                    (a.pos.x - ship_x)
                        .abs()
                        .partial_cmp(&(b.pos.x - ship_x).abs())
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .map(|p| p.pos.x)
                .unwrap_or(SCREEN_WIDTH / 2.0)
        }
    };

    TickInput {
        move_left: target_x < ship_x - 10.0,
        move_right: target_x > ship_x + 10.0,
        fire: true,
        auto_pilot: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const DT: f32 = 1.0 / 60.0;

    fn run_ticks(state: &mut GameState, input: &TickInput, n: u32) {
        for _ in 0..n {
            tick(state, input, DT);
        }
    }

    #[test]
    fn test_wave_one_spawns_three_asteroids() {
        let mut state = GameState::new(9);
        let input = TickInput::default();
        // 3 spawns at 0.5s apart finish within 2s
        run_ticks(&mut state, &input, 120);
        let seen = state.asteroids.len();
        assert_eq!(seen, 3);
        assert!(state.waves.wave_complete());
    }

    #[test]
    fn test_firing_emits_event_and_projectile() {
        let mut state = GameState::new(9);
        let input = TickInput {
            fire: true,
            ..TickInput::default()
        };
        tick(&mut state, &input, DT);
        assert_eq!(state.projectiles.len(), 1);
        assert!(state
            .events
            .contains(&GameEvent::WeaponFired(WeaponType::Basic)));

        // Cooldown swallows the next trigger pulls
        tick(&mut state, &input, DT);
        assert_eq!(state.projectiles.len(), 1);
    }

    #[test]
    fn test_ship_stays_on_screen() {
        let mut state = GameState::new(9);
        let input = TickInput {
            move_right: true,
            ..TickInput::default()
        };
        run_ticks(&mut state, &input, 300);
        assert!(state.ship.pos.x <= SCREEN_WIDTH - SHIP_HALF_WIDTH);
    }

    #[test]
    fn test_powerup_drops_after_interval() {
        let mut state = GameState::new(9);
        let input = TickInput::default();
        run_ticks(&mut state, &input, (POWERUP_INTERVAL * 60.0) as u32 + 2);
        let dropped = state.powerups.len()
            + state
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::PowerUpCollected(_)))
                .count();
        assert!(dropped >= 1 || state.phase == GamePhase::GameOver);
    }

    #[test]
    fn test_game_over_tick_is_quiescent() {
        let mut state = GameState::new(9);
        state.phase = GamePhase::GameOver;
        let ticks_before = state.tick_count;
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.tick_count, ticks_before);
        assert!(state.events.is_empty());
    }

    /// End-to-end: one small asteroid overlapping the vulnerable ship costs
    /// exactly one life, 25 health, starts the invulnerability window, and
    /// removes the asteroid.
    #[test]
    fn test_asteroid_strike_end_to_end() {
        let mut state = GameState::new(9);
        let id = state.next_entity_id();
        let mut rng = Pcg32::seed_from_u64(9);
        let mut asteroid = Asteroid::new(1, id, &mut rng);
        asteroid.pos = state.ship.pos - Vec2::new(0.0, 10.0);
        asteroid.vel = Vec2::ZERO;
        state.asteroids.push(asteroid);
        assert_eq!(state.ship.invulnerable, 0.0);

        tick(&mut state, &TickInput::default(), DT);

        assert_eq!(state.ship.lives, SHIP_START_LIVES - 1);
        assert_eq!(state.ship.health, SHIP_MAX_HEALTH - STRIKE_DAMAGE);
        assert_eq!(state.ship.invulnerable, INVULN_WINDOW);
        assert!(state.asteroid(id).is_none());

        // Second strike inside the window is a no-op on lives and health
        let id2 = state.next_entity_id();
        let mut asteroid = Asteroid::new(1, id2, &mut rng);
        asteroid.pos = state.ship.pos;
        asteroid.vel = Vec2::ZERO;
        state.asteroids.push(asteroid);
        let health_before = state.ship.health;
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.ship.lives, SHIP_START_LIVES - 1);
        assert!(state.ship.health >= health_before);
    }

    #[test]
    fn test_autopilot_survives_and_fires() {
        let mut state = GameState::new(1234);
        let input = TickInput {
            auto_pilot: true,
            ..TickInput::default()
        };
        run_ticks(&mut state, &input, 600);
        assert!(state.tick_count > 0);
        // The trigger is held, so shots must have gone out
        assert!(
            !state.projectiles.is_empty() || state.score > 0 || !state.asteroids.is_empty()
        );
    }
}
