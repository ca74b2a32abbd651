//! Simulation tick and control surface
//!
//! The four entry points here are the whole way a frontend drives the game:
//! [`start`], [`reset`], [`tick`] and [`move_player`]. Moves are synchronous
//! calls interleaved between ticks; a tick never observes a half-applied
//! move. All timing is simulated milliseconds fed through `dt`, including
//! the deferred restart after a completed level, so runs are deterministic
//! and the core never touches a wall clock.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::motion;
use super::resolve::{self, Outcome};
use super::spawn;
use super::state::{Direction, GamePhase, GameState};
use crate::consts;
use crate::tuning::DifficultyTuning;

/// Reset to an idle game per the current difficulty: full lives, zero
/// score, empty board, all pads unclaimed, any pending restart cancelled.
pub fn reset(state: &mut GameState) {
    let tuning = *state.active_tuning();
    state.lives = tuning.lives;
    state.score = 0;
    state.claimed_pads.clear();
    state.obstacles.clear();
    state.spawn_timers.fill(0.0);
    state.restart_delay_ms = None;
    state.phase = GamePhase::Idle;
    state.message = "Press Start to play!".to_string();
    state.player.reset_to_start(&state.grid);
    state.rng = Pcg32::seed_from_u64(state.seed);
}

/// Start a fresh run. Valid from any phase; from a running game this is a
/// restart.
pub fn start(state: &mut GameState) {
    reset(state);
    state.phase = GamePhase::Running;
    state.message.clear();
    log::info!(
        "run started: difficulty {}, seed {}",
        state.difficulty.as_str(),
        state.seed
    );
}

/// Shift the player one cell. Ignored unless the game is running.
///
/// A discrete jump always dismounts, even when it lands back on the same
/// log. Forward progress past the best row so far scores; retreating never
/// deducts and never lowers the best row.
pub fn move_player(state: &mut GameState, direction: Direction) {
    if state.phase != GamePhase::Running {
        return;
    }
    let cell = state.grid.cell_size;
    let pos = &mut state.player.pos;
    match direction {
        Direction::Up => pos.y = (pos.y - cell).max(0.0),
        Direction::Down => pos.y = (pos.y + cell).min((state.grid.rows - 1) as f32 * cell),
        Direction::Left => pos.x = (pos.x - cell).max(0.0),
        Direction::Right => pos.x = (pos.x + cell).min(state.grid.width() - cell),
    }

    let row = state.player.row(cell);
    if row < state.player.max_row_reached {
        state.score += consts::ROW_ADVANCE_SCORE;
        state.player.max_row_reached = row;
    }
    state.player.riding = None;
}

/// Advance the simulation by `dt` seconds.
///
/// Only a running game simulates; a completed level counts down its
/// deferred restart; idle and game-over states are inert.
pub fn tick(state: &mut GameState, dt: f32) {
    match state.phase {
        GamePhase::Running => step(state, dt),
        GamePhase::LevelComplete => count_down_restart(state, dt),
        GamePhase::Idle | GamePhase::GameOver => {}
    }
}

/// One running-phase step: motion, spawning, resolution, consequences.
fn step(state: &mut GameState, dt: f32) {
    let tuning = *state.active_tuning();

    motion::advance(
        &mut state.player,
        &mut state.obstacles,
        &state.grid,
        tuning.obstacle_density,
        &mut state.rng,
        dt,
    );
    run_spawners(state, &tuning, dt);

    let row = state.player.row(state.grid.cell_size);
    let Ok(lane) = state.lanes.lane_at(row) else {
        debug_assert!(false, "player row {row} escaped the lane table");
        return;
    };
    let outcome = resolve::resolve(
        &state.player,
        lane,
        &state.obstacles,
        &state.claimed_pads,
        &state.grid,
    );
    apply_outcome(state, outcome);
}

fn run_spawners(state: &mut GameState, tuning: &DifficultyTuning, dt: f32) {
    let elapsed_ms = dt * 1000.0;
    for row in 0..state.lanes.len() {
        if !state.lanes.rows()[row].kind.spawns() {
            continue;
        }
        let spec = spawn::maybe_spawn(
            &state.lanes.rows()[row],
            elapsed_ms,
            &mut state.spawn_timers[row],
            &state.obstacles,
            &state.grid,
            tuning,
            &mut state.rng,
        );
        if let Some(spec) = spec {
            let id = state.next_entity_id();
            state.obstacles.push(spec.into_obstacle(id, row));
        }
    }
}

fn apply_outcome(state: &mut GameState, outcome: Outcome) {
    match outcome {
        Outcome::Safe => state.player.riding = None,
        Outcome::RidingPlatform(id) => state.player.riding = Some(id),
        Outcome::ClaimedPad(col) => claim_pad(state, col),
        Outcome::HitVehicle | Outcome::Submerged | Outcome::FellOffPlatform | Outcome::MissedPad => {
            lose_life(state, outcome.cause().unwrap_or("Lost a life!"));
        }
    }
}

fn claim_pad(state: &mut GameState, col: u32) {
    let newly_claimed = state.claimed_pads.insert(col);
    debug_assert!(newly_claimed, "resolver only claims unclaimed pads");
    state.score += consts::PAD_SCORE;

    if state.claimed_pads.len() == state.lanes.goal().goal_pads.len() {
        state.score += u64::from(state.lives) * consts::LIFE_BONUS_SCORE;
        state.phase = GamePhase::LevelComplete;
        state.restart_delay_ms = Some(consts::LEVEL_RESTART_DELAY_MS);
        state.message = format!("LEVEL COMPLETE! Score: {}", state.score);
        log::info!("level complete, score {}", state.score);
    } else {
        state.message = "Goal reached!".to_string();
        state.player.reset_to_start(&state.grid);
    }
}

fn lose_life(state: &mut GameState, cause: &str) {
    state.lives = state.lives.saturating_sub(1);
    log::info!("life lost ({cause}), {} remaining", state.lives);
    if state.lives == 0 {
        state.phase = GamePhase::GameOver;
        state.message = format!("GAME OVER! Final Score: {}", state.score);
    } else {
        state.message = format!("Oh no! {cause} Lives left: {}", state.lives);
        state.player.reset_to_start(&state.grid);
    }
}

fn count_down_restart(state: &mut GameState, dt: f32) {
    if let Some(remaining) = state.restart_delay_ms.as_mut() {
        *remaining -= dt * 1000.0;
        if *remaining <= 0.0 {
            state.restart_delay_ms = None;
            log::info!("rolling into the next run");
            start(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{GameConfig, Obstacle, ObstacleKind};
    use crate::tuning::Difficulty;
    use glam::Vec2;

    const DT: f32 = 1.0 / 60.0;

    fn game(difficulty: Difficulty) -> GameState {
        let config = GameConfig {
            difficulty,
            ..GameConfig::default()
        };
        GameState::new(config, 1234).unwrap()
    }

    fn running_game() -> GameState {
        let mut state = game(Difficulty::Medium);
        start(&mut state);
        state
    }

    fn place_player(state: &mut GameState, x: f32, row: usize) {
        state.player.pos = Vec2::new(x, row as f32 * state.grid.cell_size);
    }

    #[test]
    fn start_resets_per_difficulty() {
        let mut state = game(Difficulty::Easy);
        state.score = 999;
        state.claimed_pads.insert(2);
        start(&mut state);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.lives, 5);
        assert_eq!(state.score, 0);
        assert!(state.claimed_pads.is_empty());
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn moves_are_ignored_until_started() {
        let mut state = game(Difficulty::Medium);
        let before = state.player.pos;
        move_player(&mut state, Direction::Up);
        assert_eq!(state.player.pos, before);
    }

    #[test]
    fn hopping_to_a_pad_scores_row_points_plus_the_pad() {
        let mut state = running_game();
        // Twelve hops from the start row land on the center pad column.
        for _ in 0..12 {
            move_player(&mut state, Direction::Up);
        }
        assert_eq!(state.player.row(40.0), 0);
        assert_eq!(state.score, 120);
        tick(&mut state, DT);
        assert_eq!(state.score, 170);
        assert!(state.claimed_pads.contains(&10));
        // One pad down, four to go: back to the start, life intact.
        assert_eq!(state.lives, 3);
        assert_eq!(state.player.row(40.0), 12);
    }

    #[test]
    fn retreating_never_scores_or_lowers_the_best_row() {
        let mut state = running_game();
        move_player(&mut state, Direction::Up);
        assert_eq!(state.score, 10);
        move_player(&mut state, Direction::Down);
        move_player(&mut state, Direction::Down);
        assert_eq!(state.score, 10);
        // Climbing back over known ground stays unscored...
        move_player(&mut state, Direction::Up);
        assert_eq!(state.score, 10);
        // ...until the best row is beaten again.
        move_player(&mut state, Direction::Up);
        assert_eq!(state.score, 20);
    }

    #[test]
    fn sideways_moves_clamp_at_the_walls() {
        let mut state = running_game();
        for _ in 0..40 {
            move_player(&mut state, Direction::Left);
        }
        assert_eq!(state.player.pos.x, 0.0);
        for _ in 0..40 {
            move_player(&mut state, Direction::Right);
        }
        assert_eq!(state.player.pos.x, state.grid.width() - 40.0);
    }

    #[test]
    fn hitting_a_car_costs_a_life_and_repositions() {
        let mut state = running_game();
        place_player(&mut state, 200.0, 7);
        state.obstacles.push(Obstacle {
            id: 1,
            lane: 7,
            kind: ObstacleKind::Car,
            x: 190.0,
            width_cells: 2,
            velocity: 0.0,
        });
        tick(&mut state, DT);
        assert_eq!(state.lives, 2);
        assert_eq!(state.player.row(40.0), 12);
        assert_eq!(state.player.max_row_reached, 12);
        assert!(state.message.contains("Hit by a car!"));
    }

    #[test]
    fn last_life_ends_the_run_and_freezes_it() {
        let mut state = game(Difficulty::Hard);
        start(&mut state);
        assert_eq!(state.lives, 1);
        place_player(&mut state, 200.0, 1);
        tick(&mut state, DT);
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.message.starts_with("GAME OVER!"));

        // Terminal: neither ticks nor moves touch anything further.
        let score = state.score;
        let pos = state.player.pos;
        move_player(&mut state, Direction::Up);
        tick(&mut state, 1.0);
        assert_eq!(state.score, score);
        assert_eq!(state.player.pos, pos);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn riding_binds_to_the_log_and_a_jump_dismounts() {
        let mut state = running_game();
        place_player(&mut state, 200.0, 1);
        state.obstacles.push(Obstacle {
            id: 8,
            lane: 1,
            kind: ObstacleKind::Log,
            x: 180.0,
            width_cells: 3,
            velocity: -1.0,
        });
        tick(&mut state, DT);
        assert_eq!(state.player.riding, Some(8));

        move_player(&mut state, Direction::Left);
        assert_eq!(state.player.riding, None);
    }

    #[test]
    fn drifting_past_the_log_end_is_fatal_on_a_later_tick() {
        let mut state = running_game();
        place_player(&mut state, 200.0, 1);
        // Fast log: the rider gets pinned against the wall while the log
        // keeps sliding out from under them.
        state.obstacles.push(Obstacle {
            id: 8,
            lane: 1,
            kind: ObstacleKind::Log,
            x: 180.0,
            width_cells: 3,
            velocity: -4.0,
        });
        tick(&mut state, DT);
        assert_eq!(state.player.riding, Some(8));

        let mut fell = false;
        for _ in 0..240 {
            tick(&mut state, DT);
            if state.message.contains("Fell off the log!") {
                fell = true;
                break;
            }
        }
        assert!(fell, "rider should eventually slide off the log");
        assert_eq!(state.lives, 2);
    }

    #[test]
    fn claiming_every_pad_completes_the_level_with_a_bonus() {
        let mut state = running_game();
        for pad in [2u32, 6, 14, 18] {
            state.claimed_pads.insert(pad);
        }
        place_player(&mut state, 400.0, 0);
        tick(&mut state, DT);
        assert_eq!(state.phase, GamePhase::LevelComplete);
        // Pad score plus 3 remaining lives times the bonus.
        assert_eq!(state.score, 50 + 300);
        assert_eq!(state.restart_delay_ms, Some(1500.0));
        assert!(state.message.starts_with("LEVEL COMPLETE!"));
    }

    #[test]
    fn completed_level_restarts_after_the_delay() {
        let mut state = running_game();
        for pad in [2u32, 6, 14, 18] {
            state.claimed_pads.insert(pad);
        }
        place_player(&mut state, 400.0, 0);
        tick(&mut state, DT);
        assert_eq!(state.phase, GamePhase::LevelComplete);

        tick(&mut state, 1.0);
        assert_eq!(state.phase, GamePhase::LevelComplete);
        tick(&mut state, 0.6);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert!(state.claimed_pads.is_empty());
    }

    #[test]
    fn reset_cancels_a_pending_restart() {
        let mut state = running_game();
        state.phase = GamePhase::LevelComplete;
        state.restart_delay_ms = Some(1500.0);
        reset(&mut state);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.restart_delay_ms, None);
        tick(&mut state, 10.0);
        assert_eq!(state.phase, GamePhase::Idle);
    }

    #[test]
    fn spawners_populate_moving_lanes_over_time() {
        let mut state = running_game();
        // Park the player on safe grass so nothing fatal interferes.
        place_player(&mut state, 400.0, 6);
        for _ in 0..180 {
            tick(&mut state, DT);
        }
        assert!(!state.obstacles.is_empty());
        assert!(state.obstacles.iter().all(|o| {
            let lane = &state.lanes.rows()[o.lane];
            lane.kind.spawns() && o.velocity.signum() == lane.direction
        }));
        let mut ids: Vec<u32> = state.obstacles.iter().map(|o| o.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), state.obstacles.len(), "ids must be unique");
    }

    #[test]
    fn same_seed_replays_identically() {
        let mut a = running_game();
        let mut b = running_game();
        let moves = [
            Direction::Up,
            Direction::Left,
            Direction::Up,
            Direction::Right,
            Direction::Down,
        ];
        for (i, dir) in moves.iter().cycle().take(120).enumerate() {
            if i % 7 == 0 {
                move_player(&mut a, *dir);
                move_player(&mut b, *dir);
            }
            tick(&mut a, DT);
            tick(&mut b, DT);
        }
        assert_eq!(a.snapshot(), b.snapshot());
    }
}
