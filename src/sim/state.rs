//! Game state and core simulation types
//!
//! Everything the orchestrator owns lives here: the ship singleton, the
//! entity collections, the per-tick event queue, and the session RNG.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use std::collections::VecDeque;

use super::particles::{ParticleSystem, Starfield};
use super::wave::WaveManager;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended; awaiting a restart decision from the shell
    GameOver,
}

/// The five weapon variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeaponType {
    Basic,
    Spread,
    Rapid,
    Laser,
    Homing,
}

impl WeaponType {
    pub const ALL: [WeaponType; 5] = [
        WeaponType::Basic,
        WeaponType::Spread,
        WeaponType::Rapid,
        WeaponType::Laser,
        WeaponType::Homing,
    ];
}

/// Sound cues consumed by an external audio service (fire-and-forget)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    Laser,
    Explosion,
    Powerup,
}

/// Events emitted during a tick, drained by the shell after each tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    WeaponFired(WeaponType),
    /// Asteroid damaged but not destroyed
    AsteroidHit,
    AsteroidDestroyed { energy_core: bool },
    ShipHit,
    PowerUpCollected(WeaponType),
    WaveStarted(u32),
    GameOver { score: u64, wave: u32 },
}

impl GameEvent {
    /// Map this event to an audio cue, if it has one
    pub fn audio_cue(&self) -> Option<AudioCue> {
        match self {
            GameEvent::WeaponFired(_) => Some(AudioCue::Laser),
            GameEvent::AsteroidDestroyed { .. } | GameEvent::ShipHit => Some(AudioCue::Explosion),
            GameEvent::PowerUpCollected(_) => Some(AudioCue::Powerup),
            _ => None,
        }
    }
}

/// The player's ship
#[derive(Debug, Clone)]
pub struct Ship {
    pub pos: Vec2,
    /// Horizontal velocity (px/s), set from input each tick
    pub vel_x: f32,
    pub lives: u32,
    pub health: f32,
    /// Invulnerability window remaining (seconds, never negative)
    pub invulnerable: f32,
    pub weapon: WeaponType,
    /// Seconds until the weapon reverts to Basic (0 when Basic is active)
    pub weapon_timer: f32,
    /// Ticks until the next shot may fire
    pub shoot_cooldown: u32,
    /// Recent positions for the engine trail (oldest first)
    pub trail: VecDeque<Vec2>,
}

impl Ship {
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(
                SCREEN_WIDTH / 2.0,
                SCREEN_HEIGHT - 30.0 - SHIP_HALF_HEIGHT,
            ),
            vel_x: 0.0,
            lives: SHIP_START_LIVES,
            health: SHIP_MAX_HEALTH,
            invulnerable: 0.0,
            weapon: WeaponType::Basic,
            weapon_timer: 0.0,
            shoot_cooldown: 0,
            trail: VecDeque::with_capacity(TRAIL_LENGTH),
        }
    }

    /// Record current position to the trail (call each tick)
    pub fn record_trail(&mut self) {
        self.trail.push_back(self.pos);
        if self.trail.len() > TRAIL_LENGTH {
            self.trail.pop_front();
        }
    }

    /// Apply one asteroid strike. Returns `true` when the ship is destroyed.
    ///
    /// Must only be called when `invulnerable <= 0`; the collision resolver
    /// guarantees at most one call per tick no matter how many asteroids
    /// overlap.
    pub fn take_damage(&mut self) -> bool {
        debug_assert!(self.invulnerable <= 0.0);
        self.lives = self.lives.saturating_sub(1);
        self.invulnerable = INVULN_WINDOW;
        self.health = (self.health - STRIKE_DAMAGE).max(0.0);
        self.lives == 0 || self.health <= 0.0
    }

    /// Switch to a collected weapon and restart its expiry timer
    pub fn change_weapon(&mut self, weapon: WeaponType) {
        self.weapon = weapon;
        self.weapon_timer = WEAPON_DURATION;
    }

    /// Advance per-second timers: weapon expiry, invulnerability, regen
    pub fn update_timers(&mut self, dt: f32) {
        if self.weapon_timer > 0.0 {
            self.weapon_timer -= dt;
            if self.weapon_timer <= 0.0 {
                self.weapon_timer = 0.0;
                self.weapon = WeaponType::Basic;
            }
        }
        self.shoot_cooldown = self.shoot_cooldown.saturating_sub(1);
        if self.invulnerable > 0.0 {
            self.invulnerable = (self.invulnerable - dt).max(0.0);
            // Shields up: regenerate while the window lasts
            self.health = (self.health + HEALTH_REGEN_RATE * dt).min(SHIP_MAX_HEALTH);
        }
    }
}

impl Default for Ship {
    fn default() -> Self {
        Self::new()
    }
}

/// A crack line on an asteroid's surface, in asteroid-local coordinates
#[derive(Debug, Clone, Copy)]
pub struct Crack {
    pub start: Vec2,
    pub end: Vec2,
}

/// Maximum visible cracks per asteroid; hits beyond this still damage
pub const MAX_CRACKS: usize = 5;

/// A procedurally generated asteroid
#[derive(Debug, Clone)]
pub struct Asteroid {
    /// Session-unique id, never reused; homing projectiles hold these as
    /// non-owning target handles
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Cosmetic spin
    pub rotation: f32,
    pub rotation_speed: f32,
    /// Size category 1..=3; fixed for the asteroid's lifetime
    pub size_category: u8,
    pub radius: f32,
    pub health: i32,
    pub max_health: i32,
    /// Cosmetic/scoring flag doubling the asteroid's point value
    pub energy_core: bool,
    pub cracks: Vec<Crack>,
}

impl Asteroid {
    /// Spawn a new asteroid above the screen.
    ///
    /// `size_category` outside 1..=3 is an invariant violation from the
    /// caller; it is clamped rather than crashing the session.
    pub fn new(size_category: u8, id: u32, rng: &mut Pcg32) -> Self {
        let size_category = if (1..=3).contains(&size_category) {
            size_category
        } else {
            log::warn!("invalid asteroid size category {size_category}, clamping");
            size_category.clamp(1, 3)
        };
        let radius = match size_category {
            1 => rng.random_range(20.0..40.0),
            2 => rng.random_range(40.0..60.0),
            _ => rng.random_range(60.0..80.0),
        };
        Self {
            id,
            pos: Vec2::new(
                rng.random_range(radius..SCREEN_WIDTH - radius),
                rng.random_range(-100.0..-40.0),
            ),
            vel: Vec2::new(
                rng.random_range(-60.0..60.0),
                rng.random_range(60.0..(120.0 + 60.0 * size_category as f32)),
            ),
            rotation: 0.0,
            rotation_speed: rng.random_range(-2.0..2.0),
            size_category,
            radius,
            health: size_category as i32,
            max_health: size_category as i32,
            energy_core: rng.random_bool(0.5),
            cracks: Vec::new(),
        }
    }

    /// Apply damage. Returns `true` iff the asteroid is destroyed; the
    /// caller is responsible for removal and scoring.
    pub fn hit(&mut self, damage: i32) -> bool {
        self.health -= damage;
        self.add_crack();
        self.health <= 0
    }

    // Crack placement is hash-derived rather than drawn from the session
    // RNG so visual feedback never perturbs the gameplay stream.
    fn add_crack(&mut self) {
        if self.cracks.len() >= MAX_CRACKS {
            return;
        }
        let hash = self
            .id
            .wrapping_mul(2654435761)
            .wrapping_add(self.cracks.len() as u32 * 7919);
        let angle = (hash % 1000) as f32 / 1000.0 * std::f32::consts::TAU;
        let start_r = ((hash >> 10) % 1000) as f32 / 1000.0 * self.radius * 0.7;
        let length = self.radius * (0.2 + ((hash >> 20) % 1000) as f32 / 1000.0 * 0.3);
        let start = Vec2::new(angle.cos(), angle.sin()) * start_r;
        let end = start + Vec2::new((angle * 3.0).cos(), (angle * 3.0).sin()) * length;
        self.cracks.push(Crack { start, end });
    }
}

/// A projectile in flight
#[derive(Debug, Clone)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: WeaponType,
    pub damage: i32,
    /// Cleared on off-screen or impact; inactive projectiles are pruned the
    /// same tick and never processed again
    pub active: bool,
    /// Homing only: target asteroid id. Not ownership; the referent may be
    /// removed at any time, in which case the handle is cleared and a new
    /// target acquired lazily.
    pub target: Option<u32>,
}

/// A falling weapon power-up
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub pos: Vec2,
    pub weapon: WeaponType,
}

/// Complete simulation state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for single-session reproducibility
    pub seed: u64,
    pub tick_count: u64,
    pub phase: GamePhase,
    pub score: u64,
    pub ship: Ship,
    pub asteroids: Vec<Asteroid>,
    pub projectiles: Vec<Projectile>,
    pub powerups: Vec<PowerUp>,
    /// Visual particles (not gameplay-affecting)
    pub particles: ParticleSystem,
    pub starfield: Starfield,
    pub waves: WaveManager,
    /// Events from the current tick, for the audio layer and shell
    pub events: Vec<GameEvent>,
    /// Seconds until the next power-up drop
    pub powerup_timer: f32,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a fresh session with the given seed
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let starfield = Starfield::new(&mut rng);
        Self {
            seed,
            tick_count: 0,
            phase: GamePhase::Playing,
            score: 0,
            ship: Ship::new(),
            asteroids: Vec::new(),
            projectiles: Vec::new(),
            powerups: Vec::new(),
            particles: ParticleSystem::new(MAX_PARTICLES),
            starfield,
            waves: WaveManager::new(),
            events: Vec::new(),
            powerup_timer: POWERUP_INTERVAL,
            rng,
            next_id: 1,
        }
    }

    /// Allocate a session-unique entity id (monotonic, never reused)
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Look up a live asteroid by id
    pub fn asteroid(&self, id: u32) -> Option<&Asteroid> {
        self.asteroids.iter().find(|a| a.id == id)
    }

    /// Wholesale session reset: replaces the ship, the wave manager, and all
    /// four entity collections before the next tick begins.
    pub fn restart(&mut self, seed: u64) {
        let cap = self.particles.cap();
        *self = Self::new(seed);
        self.particles.set_cap(cap);
    }
}
