//! Side Runner headless entry point
//!
//! Runs the simulation at a steady 60 Hz with scripted input and prints the
//! final render frame as JSON. An optional first argument names a tuning file.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use side_runner::{Game, Tuning};

    env_logger::init();
    log::info!("Side Runner (headless) starting...");

    let tuning = match std::env::args().nth(1) {
        Some(path) => match Tuning::load(&path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::error!("Bad tuning file {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };

    let mut game = match Game::new(tuning) {
        Ok(game) => game,
        Err(e) => {
            log::error!("Failed to start: {}", e);
            std::process::exit(1);
        }
    };

    const FRAMES: u32 = 60 * 20;
    const FRAME_MS: f64 = 1000.0 / 60.0;

    let mut rounds = 1;
    for i in 0..FRAMES {
        script_input(&mut game, i);

        let frame = game.step(i as f64 * FRAME_MS);
        for event in &frame.events {
            log::debug!("Frame {}: {:?}", i, event);
        }

        if frame.game_over() {
            log::info!("Round {} over at frame {} with score {}", rounds, i, frame.score);
            game.key_down("Enter");
            game.key_up("Enter");
            rounds += 1;
        }
    }

    let frame = game.frame();
    log::info!("Finished {} frames over {} rounds, score {}", FRAMES, rounds, frame.score);
    match serde_json::to_string_pretty(frame) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize frame: {}", e),
    }
}

/// Run right for a second, stand for a second; fire every quarter second, hop every two
#[cfg(not(target_arch = "wasm32"))]
fn script_input(game: &mut side_runner::Game, frame: u32) {
    match frame % 120 {
        0 => game.key_down("d"),
        60 => game.key_up("d"),
        _ => {}
    }
    if frame % 15 == 0 {
        game.key_down(" ");
        game.key_up(" ");
    }
    match frame % 120 {
        30 => game.key_down("ArrowUp"),
        32 => game.key_up("ArrowUp"),
        _ => {}
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Hosts embed the library and drive `Game::step` themselves
}
