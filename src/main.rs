//! Scripted headless session. Pass a JSON config path to override the
//! defaults; set `RUST_LOG=debug` for per-frame detail.

use log::{error, info};

use viviel::input::KeyCode;
use viviel::{Game, GameConfig, GameStatus};

const FRAME: f32 = 1.0 / 60.0;

// ── Script ──────────────────────────────────────────────────────────────────

enum Step {
    Hold(KeyCode, u32),
    Tap(KeyCode),
    Wait(u32),
}

const SCRIPT: &[Step] = &[
    Step::Wait(5),
    Step::Hold(KeyCode::KeyW, 150),
    Step::Tap(KeyCode::KeyP),
    Step::Wait(10),
    Step::Hold(KeyCode::KeyS, 60),
    Step::Hold(KeyCode::KeyA, 30),
    Step::Tap(KeyCode::KeyT),
    Step::Tap(KeyCode::KeyT),
    Step::Tap(KeyCode::KeyE),
    Step::Wait(30),
];

fn run_step(game: &mut Game, step: &Step) {
    match *step {
        Step::Hold(key, frames) => {
            game.input_mut().press_key(key);
            for _ in 0..frames {
                game.tick(FRAME);
            }
            game.input_mut().release_key(key);
            game.tick(FRAME);
        }
        Step::Tap(key) => {
            game.input_mut().press_key(key);
            game.tick(FRAME);
            game.input_mut().release_key(key);
            game.tick(FRAME);
        }
        Step::Wait(frames) => {
            for _ in 0..frames {
                game.tick(FRAME);
            }
        }
    }
}

fn run() -> viviel::Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!("loading config from {path}");
            GameConfig::load(path)?
        }
        None => GameConfig::default(),
    };
    let mut game = Game::headless(config)?;

    for step in SCRIPT {
        run_step(&mut game, step);
        if game.status().is_finished() {
            break;
        }
    }

    let pos = game.character().position();
    println!("status:   {:?}", game.status());
    println!("room:     {:?}", game.rooms().current_room_id());
    println!("position: ({:.3}, {:.3}, {:.3})", pos.x, pos.y, pos.z);
    println!("{}", game.ui().petal_counter());
    if let Some(line) = game.ui().dialogue() {
        println!("dialogue: {line}");
    }
    if let Some(message) = game.ui().message() {
        println!("message:  {message}");
    }
    if *game.status() == GameStatus::Playing {
        info!("session ended after {:.2}s", game.clock());
    }
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        error!("{err}");
        std::process::exit(1);
    }
}
