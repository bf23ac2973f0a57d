//! Space Defender - a wave-based arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, weapons, waves, collisions)
//! - `settings`: Quality presets and preferences
//!
//! The `sim` module is the whole game: a renderer consumes read-only
//! snapshots of [`sim::GameState`] each frame, and an audio layer maps the
//! per-tick [`sim::GameEvent`] queue to sound cues. Neither ever mutates
//! simulation state.

pub mod settings;
pub mod sim;

pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Playfield dimensions (screen space, +y down)
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;
    /// How far past a screen edge a projectile may travel before culling
    pub const OFFSCREEN_MARGIN: f32 = 10.0;

    /// Ship defaults
    pub const SHIP_SPEED: f32 = 720.0;
    pub const SHIP_HALF_WIDTH: f32 = 30.0;
    pub const SHIP_HALF_HEIGHT: f32 = 25.0;
    /// Nominal ship collision radius; shrunk by [`SHIP_HIT_SHRINK`] against
    /// asteroids so near-misses don't punish
    pub const SHIP_HIT_RADIUS: f32 = 30.0;
    pub const SHIP_HIT_SHRINK: f32 = 0.7;
    pub const SHIP_MAX_HEALTH: f32 = 100.0;
    pub const SHIP_START_LIVES: u32 = 3;
    /// Health lost per asteroid strike
    pub const STRIKE_DAMAGE: f32 = 25.0;
    /// Invulnerability window after a strike (seconds)
    pub const INVULN_WINDOW: f32 = 2.0;
    /// Health regenerated per second while invulnerable
    pub const HEALTH_REGEN_RATE: f32 = 5.0;
    /// Seconds a collected weapon stays active before reverting to Basic
    pub const WEAPON_DURATION: f32 = 10.0;
    /// Trail history length (positions)
    pub const TRAIL_LENGTH: usize = 20;

    /// Projectile collision radius
    pub const PROJECTILE_RADIUS: f32 = 4.0;

    /// Power-up drop cadence (seconds) and fall speed (px/s)
    pub const POWERUP_INTERVAL: f32 = 15.0;
    pub const POWERUP_FALL_SPEED: f32 = 120.0;
    pub const POWERUP_RADIUS: f32 = 20.0;

    /// Scoring
    pub const SCORE_ASTEROID: u64 = 10;
    pub const SCORE_ENERGY_CORE: u64 = 20;

    /// Default particle pool ceiling (overridable via settings)
    pub const MAX_PARTICLES: usize = 500;
    /// Starfield density
    pub const STAR_COUNT: usize = 150;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Whether two circles overlap
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance_squared(b) < (ra + rb) * (ra + rb)
}

/// Whether a circle overlaps an axis-aligned rect given by center and half extents
#[inline]
pub fn circle_rect_overlap(c: Vec2, r: f32, center: Vec2, half: Vec2) -> bool {
    let dx = (c.x - center.x).abs() - half.x;
    let dy = (c.y - center.y).abs() - half.y;
    dx.max(0.0).powi(2) + dy.max(0.0).powi(2) < r * r
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circles_overlap() {
        assert!(circles_overlap(Vec2::ZERO, 5.0, Vec2::new(8.0, 0.0), 5.0));
        assert!(!circles_overlap(Vec2::ZERO, 5.0, Vec2::new(11.0, 0.0), 5.0));
    }

    #[test]
    fn test_circle_rect_overlap() {
        let center = Vec2::new(10.0, 10.0);
        let half = Vec2::new(5.0, 5.0);
        assert!(circle_rect_overlap(Vec2::new(17.0, 10.0), 3.0, center, half));
        assert!(!circle_rect_overlap(Vec2::new(20.0, 10.0), 3.0, center, half));
    }
}
