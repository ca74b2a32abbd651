//! Game state and core simulation types
//!
//! Everything that must be persisted for replay/determinism lives here.

use std::collections::BTreeSet;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::lanes::{ConfigError, GridConfig, Lane, LaneTable};
use crate::tuning::{Difficulty, DifficultyTuning, Tuning};
use crate::{nearest_col, row_at};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Before the first start.
    Idle,
    /// Active gameplay.
    Running,
    /// Run ended; terminal until an explicit restart.
    GameOver,
    /// Every pad claimed; a deferred restart is pending.
    LevelComplete,
}

/// Discrete move intent, one cell per press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Road traffic; lethal on contact.
    Car,
    /// River platform; the only safe footing over water.
    Log,
}

/// A moving entity occupying one lane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Unique for the obstacle's lifetime; riders bind to it.
    pub id: u32,
    /// Row this obstacle travels in.
    pub lane: usize,
    pub kind: ObstacleKind,
    /// Left edge in pixels. May sit off-screen on either side.
    pub x: f32,
    /// Length in whole cells.
    pub width_cells: u32,
    /// Signed cells/second; the sign is the travel direction.
    pub velocity: f32,
}

impl Obstacle {
    /// Length in pixels.
    #[inline]
    pub fn width_px(&self, cell_size: f32) -> f32 {
        self.width_cells as f32 * cell_size
    }

    /// Right edge in pixels.
    #[inline]
    pub fn right_edge(&self, cell_size: f32) -> f32 {
        self.x + self.width_px(cell_size)
    }
}

/// The player token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Continuous x, row-quantized y, both in pixels.
    pub pos: Vec2,
    /// Log the player currently rides. Weak: a missing id reads as none.
    pub riding: Option<u32>,
    /// Best (lowest) row reached this life; drives forward-progress score.
    pub max_row_reached: usize,
}

impl Player {
    /// Player at the start cell: bottom row, horizontal center.
    pub fn at_start(grid: &GridConfig) -> Self {
        let mut player = Self {
            pos: Vec2::ZERO,
            riding: None,
            max_row_reached: 0,
        };
        player.reset_to_start(grid);
        player
    }

    /// Send the player back to the start cell and forget progress.
    pub fn reset_to_start(&mut self, grid: &GridConfig) {
        self.pos = Vec2::new(
            grid.width() / 2.0 - grid.cell_size / 2.0,
            (grid.rows - 1) as f32 * grid.cell_size,
        );
        self.riding = None;
        self.max_row_reached = grid.rows - 1;
    }

    /// Row the player currently occupies.
    #[inline]
    pub fn row(&self, cell_size: f32) -> usize {
        row_at(self.pos.y, cell_size)
    }

    /// Horizontal center of the player's box.
    #[inline]
    pub fn center_x(&self, cell_size: f32) -> f32 {
        self.pos.x + cell_size / 2.0
    }

    /// Column the player is best aligned with.
    #[inline]
    pub fn col(&self, cell_size: f32) -> u32 {
        nearest_col(self.pos.x, cell_size)
    }
}

/// Startup configuration, validated once by [`GameState::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub difficulty: Difficulty,
    pub grid: GridConfig,
    /// Lane stack, goal row first.
    pub lanes: Vec<Lane>,
    pub tuning: Tuning,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            grid: GridConfig::default(),
            lanes: LaneTable::classic_rows(),
            tuning: Tuning::default(),
        }
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub grid: GridConfig,
    pub lanes: LaneTable,
    pub tuning: Tuning,
    pub difficulty: Difficulty,
    /// Run seed for reproducibility.
    pub seed: u64,
    /// The only randomness source in the simulation.
    pub rng: Pcg32,
    pub lives: u32,
    pub score: u64,
    /// Pad columns already claimed this level. Cleared only by reset.
    pub claimed_pads: BTreeSet<u32>,
    pub phase: GamePhase,
    /// Status line for the HUD; carries the cause of the last life loss.
    pub message: String,
    pub player: Player,
    /// Active obstacles across all lanes, in spawn order.
    pub obstacles: Vec<Obstacle>,
    /// Elapsed ms since the last spawn, per lane. Only moving lanes accumulate.
    pub spawn_timers: Vec<f32>,
    /// Countdown to the automatic restart after a completed level.
    pub restart_delay_ms: Option<f32>,
    next_id: u32,
}

impl GameState {
    /// Validate the configuration and build an idle game.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.tuning.validate()?;
        let lanes = LaneTable::new(config.lanes, &config.grid)?;
        let rows = lanes.len();
        let mut state = Self {
            grid: config.grid,
            lanes,
            tuning: config.tuning,
            difficulty: config.difficulty,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            lives: 0,
            score: 0,
            claimed_pads: BTreeSet::new(),
            phase: GamePhase::Idle,
            message: String::new(),
            player: Player::at_start(&config.grid),
            obstacles: Vec::new(),
            spawn_timers: vec![0.0; rows],
            restart_delay_ms: None,
            next_id: 1,
        };
        super::tick::reset(&mut state);
        Ok(state)
    }

    /// Allocate a fresh obstacle id.
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Balance parameters for the current difficulty.
    pub fn active_tuning(&self) -> &DifficultyTuning {
        self.tuning.for_difficulty(self.difficulty)
    }

    /// Read-only state view for the presentation layer.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            player: self.player.pos,
            riding: self.player.riding,
            obstacles: self
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    id: o.id,
                    kind: o.kind,
                    lane: o.lane,
                    x: o.x,
                    width_cells: o.width_cells,
                })
                .collect(),
            lives: self.lives,
            score: self.score,
            phase: self.phase,
            message: self.message.clone(),
            claimed_pads: self.claimed_pads.iter().copied().collect(),
        }
    }
}

/// One obstacle as the presentation layer sees it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub id: u32,
    pub kind: ObstacleKind,
    pub lane: usize,
    pub x: f32,
    pub width_cells: u32,
}

/// Read-only view handed to the render sink each frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub player: Vec2,
    pub riding: Option<u32>,
    pub obstacles: Vec<ObstacleView>,
    pub lives: u32,
    pub score: u64,
    pub phase: GamePhase,
    pub message: String,
    pub claimed_pads: Vec<u32>,
}
