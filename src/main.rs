//! Space Defender headless shell
//!
//! Runs the simulation core in autopilot demo mode at the fixed tick rate,
//! forwarding audio cues to the log. A real frontend would poll input, feed
//! [`TickInput`], and hand `&GameState` snapshots to a renderer each frame;
//! this shell stands in for both so the core can be exercised end to end.

use std::path::Path;
use std::time::{Duration, Instant};

use space_defender::consts::{MAX_SUBSTEPS, SIM_DT};
use space_defender::settings::Settings;
use space_defender::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

fn main() {
    env_logger::init();

    let settings = Settings::load(Path::new("settings.json"));
    log::info!("quality preset: {}", settings.quality.as_str());

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });
    log::info!("session seed: {seed}");

    let mut state = GameState::new(seed);
    state
        .particles
        .set_cap(settings.quality.max_particles());

    let input = TickInput {
        auto_pilot: true,
        ..TickInput::default()
    };

    let mut last = Instant::now();
    let mut accumulator = 0.0f32;

    loop {
        let now = Instant::now();
        accumulator += (now - last).as_secs_f32().min(0.1);
        last = now;

        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut state, &input, SIM_DT);
            accumulator -= SIM_DT;
            substeps += 1;

            for event in &state.events {
                if let Some(cue) = event.audio_cue() {
                    log::debug!("audio cue: {cue:?}");
                }
                match event {
                    GameEvent::WaveStarted(wave) => {
                        log::info!("wave {wave}, score {}", state.score);
                    }
                    GameEvent::PowerUpCollected(weapon) => {
                        log::info!("picked up {weapon:?}");
                    }
                    _ => {}
                }
            }
        }

        if state.phase == GamePhase::GameOver {
            // Contract with the game-over screen: report the final numbers
            // and ask whether to play again. The headless shell declines.
            println!(
                "game over: score {}, wave {}",
                state.score,
                state.waves.current_wave()
            );
            break;
        }

        // Pace the loop to the tick rate; quitting always lands here, on a
        // clean tick boundary.
        std::thread::sleep(Duration::from_secs_f32(SIM_DT / 2.0));
    }
}
