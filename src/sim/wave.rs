//! Wave progression state machine
//!
//! Two states: `Spawning` releases asteroids for the current wave on a fixed
//! per-spawn delay; `Intermission` waits out a rest period, then advances the
//! wave number and recomputes the spawn target. Wave numbers only ever move
//! forward within a session.

use rand::Rng;
use rand_pcg::Pcg32;

/// Delay between individual asteroid spawns within a wave (seconds)
pub const SPAWN_DELAY: f32 = 0.5;
/// Rest period between waves (seconds)
pub const INTERMISSION: f32 = 5.0;
/// Spawn target for wave 1
pub const BASE_WAVE_TARGET: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WavePhase {
    /// Actively releasing asteroids for the current wave
    Spawning,
    /// Wave fully spawned; waiting before the next one
    Intermission,
}

/// Spawn cadence and difficulty escalation for one session
#[derive(Debug, Clone)]
pub struct WaveManager {
    current_wave: u32,
    target: u32,
    spawned: u32,
    phase: WavePhase,
    /// Accumulates toward [`INTERMISSION`] while resting
    wave_timer: f32,
    /// Accumulates toward [`SPAWN_DELAY`] while spawning
    spawn_timer: f32,
}

impl WaveManager {
    pub fn new() -> Self {
        Self {
            current_wave: 1,
            target: BASE_WAVE_TARGET,
            spawned: 0,
            phase: WavePhase::Spawning,
            wave_timer: 0.0,
            spawn_timer: 0.0,
        }
    }

    pub fn current_wave(&self) -> u32 {
        self.current_wave
    }

    pub fn spawn_target(&self) -> u32 {
        self.target
    }

    pub fn wave_complete(&self) -> bool {
        self.phase == WavePhase::Intermission
    }

    /// Advance the state machine by `dt` and report whether an asteroid
    /// should spawn this tick.
    ///
    /// Reports at most one spawn per delay interval, and only while the
    /// wave's spawn budget remains. The transition ticks themselves (wave
    /// complete, intermission elapsed) never report a spawn.
    pub fn should_spawn(&mut self, dt: f32) -> bool {
        match self.phase {
            WavePhase::Intermission => {
                self.wave_timer += dt;
                if self.wave_timer >= INTERMISSION {
                    self.start_next_wave();
                }
                false
            }
            WavePhase::Spawning => {
                self.spawn_timer += dt;
                if self.spawn_timer >= SPAWN_DELAY && self.spawned < self.target {
                    self.spawn_timer = 0.0;
                    self.spawned += 1;
                    if self.spawned >= self.target {
                        self.phase = WavePhase::Intermission;
                    }
                    true
                } else {
                    false
                }
            }
        }
    }

    fn start_next_wave(&mut self) {
        self.current_wave += 1;
        self.target = BASE_WAVE_TARGET + self.current_wave;
        self.spawned = 0;
        self.phase = WavePhase::Spawning;
        self.wave_timer = 0.0;
        self.spawn_timer = 0.0;
        log::info!(
            "wave {} started, {} asteroids inbound",
            self.current_wave,
            self.target
        );
    }

    /// Pick a size category for a freshly spawned asteroid.
    ///
    /// Pure function of the wave number: early waves roll only small rocks,
    /// mid waves mix in medium, wave 7+ rolls all three uniformly.
    pub fn roll_size_category(&self, rng: &mut Pcg32) -> u8 {
        size_category_for_wave(self.current_wave, rng)
    }
}

impl Default for WaveManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Size-category selection as a function of wave number
pub fn size_category_for_wave(wave: u32, rng: &mut Pcg32) -> u8 {
    match wave {
        0..=3 => 1,
        4..=6 => rng.random_range(1..=2),
        _ => rng.random_range(1..=3),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    #[test]
    fn test_wave_one_defaults() {
        let waves = WaveManager::new();
        assert_eq!(waves.current_wave(), 1);
        assert_eq!(waves.spawn_target(), 3);
        assert!(!waves.wave_complete());
    }

    #[test]
    fn test_spawn_cadence_and_intermission() {
        let mut waves = WaveManager::new();
        let dt = 0.6; // > SPAWN_DELAY

        // Wave 1 releases exactly its target count
        assert!(waves.should_spawn(dt));
        assert!(waves.should_spawn(dt));
        assert!(waves.should_spawn(dt));
        assert!(waves.wave_complete());

        // Intermission: no spawns until 5.0s of accumulated dt
        for _ in 0..8 {
            assert!(!waves.should_spawn(dt));
        }
        assert_eq!(waves.current_wave(), 1);

        // 9th call crosses 5.0s: wave advances, still no spawn that tick
        assert!(!waves.should_spawn(dt));
        assert_eq!(waves.current_wave(), 2);
        assert_eq!(waves.spawn_target(), 5);
        assert!(!waves.wave_complete());

        // Spawning resumes on the next delay interval
        assert!(waves.should_spawn(dt));
    }

    #[test]
    fn test_no_spawn_before_delay_elapses() {
        let mut waves = WaveManager::new();
        assert!(!waves.should_spawn(0.2));
        assert!(!waves.should_spawn(0.2));
        // 0.6s accumulated now
        assert!(waves.should_spawn(0.2));
    }

    #[test]
    fn test_size_selection_brackets() {
        let mut rng = Pcg32::seed_from_u64(42);
        for wave in 1..=3 {
            for _ in 0..20 {
                assert_eq!(size_category_for_wave(wave, &mut rng), 1);
            }
        }
        for _ in 0..50 {
            let cat = size_category_for_wave(5, &mut rng);
            assert!((1..=2).contains(&cat));
        }
        for _ in 0..50 {
            let cat = size_category_for_wave(9, &mut rng);
            assert!((1..=3).contains(&cat));
        }
    }

    proptest! {
        #[test]
        fn prop_wave_number_never_decreases(dts in proptest::collection::vec(0.0f32..2.0, 1..200)) {
            let mut waves = WaveManager::new();
            let mut last_wave = waves.current_wave();
            let mut spawned_this_wave = 0u32;
            for dt in dts {
                let target = waves.spawn_target();
                if waves.should_spawn(dt) {
                    spawned_this_wave += 1;
                } else if waves.current_wave() != last_wave {
                    spawned_this_wave = 0;
                }
                prop_assert!(waves.current_wave() >= last_wave);
                prop_assert!(spawned_this_wave <= target);
                last_wave = waves.current_wave();
            }
        }
    }
}
