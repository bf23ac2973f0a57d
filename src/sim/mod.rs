//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Single-threaded; every mutation happens inside one `tick` call
//! - No rendering, audio, or platform dependencies

pub mod collision;
pub mod particles;
pub mod state;
pub mod tick;
pub mod wave;
pub mod weapons;

pub use collision::resolve_collisions;
pub use particles::{Color, Particle, ParticleSystem, Star, Starfield};
pub use state::{
    Asteroid, AudioCue, Crack, GameEvent, GamePhase, GameState, PowerUp, Projectile, Ship,
    WeaponType, MAX_CRACKS,
};
pub use tick::{TickInput, tick};
pub use wave::{WaveManager, size_category_for_wave};
pub use weapons::{WeaponSpec, advance, fire};
