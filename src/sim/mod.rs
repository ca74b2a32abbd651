//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Elapsed time arrives as a parameter, never from a clock
//! - Seeded RNG only
//! - Stable iteration order (obstacles kept in spawn order)
//! - No rendering or platform dependencies

pub mod lanes;
pub mod motion;
pub mod resolve;
pub mod spawn;
pub mod state;
pub mod tick;

pub use lanes::{ConfigError, GridConfig, Lane, LaneKind, LaneTable, OutOfRange};
pub use motion::advance;
pub use resolve::{Outcome, resolve};
pub use spawn::{ObstacleSpec, maybe_spawn};
pub use state::{
    Direction, GameConfig, GamePhase, GameState, Obstacle, ObstacleKind, ObstacleView, Player,
    Snapshot,
};
pub use tick::{move_player, reset, start, tick};
