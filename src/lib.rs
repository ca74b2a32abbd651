//! Pond Hop - a lane-crossing arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (lanes, spawning, motion, collisions, game state)
//! - `tuning`: Data-driven game balance
//! - `platform`: Seams to the render/input/clock collaborators
//!
//! The simulation never draws, reads devices, or touches wall-clock time;
//! a frontend feeds it elapsed seconds and move intents, and reads back a
//! [`sim::Snapshot`] each frame.

pub mod platform;
pub mod sim;
pub mod tuning;

pub use tuning::{Difficulty, Tuning};

/// Game configuration constants
pub mod consts {
    /// Side of one grid cell, in pixels.
    pub const CELL_SIZE: f32 = 40.0;
    /// Columns of the classic board.
    pub const GAME_COLS: u32 = 20;
    /// Rows (lanes) of the classic board.
    pub const GAME_ROWS: usize = 13;

    /// Points for claiming a landing pad.
    pub const PAD_SCORE: u64 = 50;
    /// Points for each new row of forward progress.
    pub const ROW_ADVANCE_SCORE: u64 = 10;
    /// End-of-level bonus per remaining life.
    pub const LIFE_BONUS_SCORE: u64 = 100;

    /// How far a suppressed spawn rewinds its lane timer, so the retry
    /// lands before a whole interval has passed again.
    pub const SPAWN_BACKOFF_MS: f32 = 200.0;
    /// Pause between completing a level and rolling into the next run.
    pub const LEVEL_RESTART_DELAY_MS: f32 = 1500.0;
}

/// Column whose cell center is nearest to `x`.
#[inline]
pub fn nearest_col(x: f32, cell_size: f32) -> u32 {
    (x / cell_size).round().max(0.0) as u32
}

/// Row containing the vertical position `y`.
#[inline]
pub fn row_at(y: f32, cell_size: f32) -> usize {
    (y / cell_size).floor().max(0.0) as usize
}
