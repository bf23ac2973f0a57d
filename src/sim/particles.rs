//! Particle pool and starfield scroll layer
//!
//! Purely visual state: nothing here affects gameplay. The pool is capped so
//! burst-heavy ticks stay cheap; over-cap emission is silently truncated.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH, STAR_COUNT};

/// RGB color tag for the renderer
pub type Color = [u8; 3];

pub const WHITE: Color = [255, 255, 255];
pub const CYAN: Color = [0, 255, 255];
pub const NEON_GREEN: Color = [57, 255, 20];
pub const HOT_PINK: Color = [255, 0, 128];
pub const PURPLE: Color = [180, 0, 255];
pub const YELLOW: Color = [255, 255, 0];
pub const ORANGE: Color = [255, 165, 0];
pub const RED: Color = [255, 50, 50];

/// Accent color for each weapon (projectiles, power-up bursts)
pub fn weapon_color(weapon: super::state::WeaponType) -> Color {
    use super::state::WeaponType::*;
    match weapon {
        Basic => CYAN,
        Spread => YELLOW,
        Rapid => NEON_GREEN,
        Laser => PURPLE,
        Homing => HOT_PINK,
    }
}

/// A short-lived visual mote
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Color,
    /// Remaining life in seconds; `life / max_life` drives fade alpha
    pub life: f32,
    pub max_life: f32,
}

impl Particle {
    /// Fade fraction for the renderer (1.0 fresh, 0.0 expired)
    pub fn alpha(&self) -> f32 {
        (self.life / self.max_life).clamp(0.0, 1.0)
    }
}

/// Capped pool of visual particles
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    cap: usize,
}

impl ParticleSystem {
    pub fn new(cap: usize) -> Self {
        Self {
            particles: Vec::with_capacity(cap.min(64)),
            cap,
        }
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Retarget the pool ceiling (quality preset change)
    pub fn set_cap(&mut self, cap: usize) {
        self.cap = cap;
        self.particles.truncate(cap);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Emit a radial burst at `pos`. Truncated to remaining capacity.
    pub fn emit(&mut self, pos: Vec2, color: Color, count: usize, rng: &mut Pcg32) {
        let room = self.cap.saturating_sub(self.particles.len());
        for _ in 0..count.min(room) {
            let angle = rng.random_range(0.0..std::f32::consts::TAU);
            let speed = rng.random_range(60.0..300.0);
            let life = rng.random_range(0.5..1.5);
            self.particles.push(Particle {
                pos,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                radius: rng.random_range(1.0..4.0),
                color,
                life,
                max_life: life,
            });
        }
    }

    /// Advance all particles and drop the expired ones
    pub fn update(&mut self, dt: f32) {
        for particle in &mut self.particles {
            particle.pos += particle.vel * dt;
            particle.life -= dt;
        }
        self.particles.retain(|p| p.life > 0.0);
    }
}

/// A background star
#[derive(Debug, Clone, Copy)]
pub struct Star {
    pub pos: Vec2,
    pub radius: f32,
    /// Downward scroll speed (px/s)
    pub speed: f32,
    pub brightness: u8,
    pub color: Color,
}

/// Scrolling background starfield
#[derive(Debug, Clone)]
pub struct Starfield {
    pub stars: Vec<Star>,
}

impl Starfield {
    pub fn new(rng: &mut Pcg32) -> Self {
        let palette = [WHITE, CYAN, NEON_GREEN, HOT_PINK];
        let stars = (0..STAR_COUNT)
            .map(|_| Star {
                pos: Vec2::new(
                    rng.random_range(0.0..SCREEN_WIDTH),
                    rng.random_range(0.0..SCREEN_HEIGHT),
                ),
                radius: rng.random_range(0.5..2.0),
                speed: rng.random_range(30.0..120.0),
                brightness: rng.random_range(100..=255),
                color: palette[rng.random_range(0..palette.len())],
            })
            .collect();
        Self { stars }
    }

    /// Scroll stars downward, wrapping to the top at a fresh x
    pub fn update(&mut self, dt: f32, rng: &mut Pcg32) {
        for star in &mut self.stars {
            star.pos.y += star.speed * dt;
            if star.pos.y > SCREEN_HEIGHT {
                star.pos.y = 0.0;
                star.pos.x = rng.random_range(0.0..SCREEN_WIDTH);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_emission_truncates_at_cap() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut pool = ParticleSystem::new(50);
        pool.emit(Vec2::new(100.0, 100.0), ORANGE, 40, &mut rng);
        assert_eq!(pool.len(), 40);
        // Second burst only has room for 10 more
        pool.emit(Vec2::new(100.0, 100.0), ORANGE, 40, &mut rng);
        assert_eq!(pool.len(), 50);
    }

    #[test]
    fn test_particles_expire() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut pool = ParticleSystem::new(100);
        pool.emit(Vec2::ZERO, CYAN, 20, &mut rng);
        // Max particle life is 1.5s
        for _ in 0..100 {
            pool.update(1.0 / 60.0);
        }
        assert!(pool.is_empty());
    }

    #[test]
    fn test_alpha_tracks_life_fraction() {
        let particle = Particle {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: 2.0,
            color: RED,
            life: 0.5,
            max_life: 1.0,
        };
        assert!((particle.alpha() - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_starfield_wraps_to_top() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut field = Starfield::new(&mut rng);
        assert_eq!(field.stars.len(), STAR_COUNT);
        for _ in 0..60 * 30 {
            field.update(1.0 / 60.0, &mut rng);
        }
        for star in &field.stars {
            assert!(star.pos.y >= 0.0 && star.pos.y <= SCREEN_HEIGHT + 2.0);
        }
    }
}
