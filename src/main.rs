//! Coin Arena entry point
//!
//! Headless native driver: loads (or creates) settings, runs the simulation at the
//! target frame rate and prints the final snapshot. Rendering backends
//! plug in by consuming `Game::snapshot` and `HudModel` each frame.

use coin_arena::sim::{Game, GameEvent, TickInput, sanitize_dt, tick};
use coin_arena::{HudModel, Settings, settings::SETTINGS_FILE};

fn main() {
    env_logger::init();
    log::info!("Coin Arena (headless) starting...");

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| SETTINGS_FILE.to_string());
    let settings = match Settings::load_or_init(&path) {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let mut game = Game::new(settings.seed);
    game.debug = settings.start_with_debug;
    log::info!("Game initialized with seed: {}", settings.seed);

    let mut input = TickInput {
        idle_mode: settings.idle_mode,
        ..Default::default()
    };
    let dt = sanitize_dt(settings.frame_dt(), settings.max_frame_dt);

    for frame in 0..settings.demo_frames {
        tick(&mut game, &input, dt);
        input.clear_actions();

        for event in game.drain_events() {
            match event {
                GameEvent::Defeated { score } => {
                    log::info!("Frame {}: defeated with score {}", frame, score)
                }
                GameEvent::SpawnFailed { kind } => {
                    log::warn!("Frame {}: could not place {:?}", frame, kind)
                }
                other => log::debug!("Frame {}: {:?}", frame, other),
            }
        }

        if game.quit_requested {
            break;
        }
    }

    let snapshot = game.snapshot();
    let hud = HudModel::from_snapshot(&snapshot);
    log::info!("{} | {} | {}", hud.score_text, hud.health_text, hud.state_text);

    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}
