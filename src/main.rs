//! Pond Hop entry point
//!
//! Runs the simulation headless with a scripted input source and a
//! log-backed render sink. Useful for balance checks and as a reference
//! for wiring a real frontend: the loop below is the whole contract.

use pond_hop::platform::{Clock, FixedClock, InputSource, LogSink, RenderSink, ScriptedInput};
use pond_hop::sim::{move_player, start, tick, Direction, GameConfig, GamePhase, GameState};
use pond_hop::tuning::Difficulty;

/// Frames the demo runs before giving up (two simulated minutes at 60 fps).
const MAX_FRAMES: u32 = 60 * 120;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let difficulty = args
        .next()
        .and_then(|a| Difficulty::from_str(&a))
        .unwrap_or_default();
    let seed: u64 = args.next().and_then(|a| a.parse().ok()).unwrap_or(0x5EED);

    let config = GameConfig {
        difficulty,
        ..GameConfig::default()
    };
    let mut state = match GameState::new(config, seed) {
        Ok(state) => state,
        Err(err) => {
            log::error!("invalid configuration: {err}");
            std::process::exit(2);
        }
    };

    log::info!(
        "pond-hop headless demo: difficulty {}, seed {seed}",
        difficulty.as_str()
    );

    let mut input = demo_script();
    let mut sink = LogSink::default();
    let mut clock = FixedClock::new(1000.0 / 60.0);

    start(&mut state);
    for _ in 0..MAX_FRAMES {
        if let Some(direction) = input.poll() {
            move_player(&mut state, direction);
        }
        let dt = clock.elapsed_ms() / 1000.0;
        tick(&mut state, dt);
        sink.present(&state.snapshot());

        if state.phase == GamePhase::GameOver {
            break;
        }
        if input.is_exhausted() && state.phase == GamePhase::Running {
            break;
        }
    }

    let snapshot = state.snapshot();
    log::info!(
        "demo finished: phase {:?}, score {}, lives {}, {} obstacles",
        snapshot.phase,
        snapshot.score,
        snapshot.lives,
        snapshot.obstacles.len()
    );
    println!(
        "final score {} with {} lives left ({:?})",
        snapshot.score, snapshot.lives, snapshot.phase
    );
}

/// A stubborn hopper: march up every three-quarters of a second, drift
/// sideways now and then. Dies plenty; that is the point of the demo.
fn demo_script() -> ScriptedInput {
    let pattern = [
        (45, Direction::Up),
        (45, Direction::Up),
        (45, Direction::Left),
        (45, Direction::Up),
        (45, Direction::Up),
        (45, Direction::Right),
        (45, Direction::Up),
    ];
    ScriptedInput::new(
        std::iter::repeat(pattern)
            .take(12)
            .flatten()
            .collect::<Vec<_>>(),
    )
}
