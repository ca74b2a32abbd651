//! Lane configuration
//!
//! The board is a stack of horizontal lanes, each with a fixed behavior:
//! grass is safe, roads carry cars, rivers carry logs, and the goal row
//! holds the landing pads. Lanes are built once at configure time,
//! validated, and never mutated afterwards.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts;
use crate::tuning::Difficulty;

/// Invalid grid/lane/tuning setup, fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid {cols}x{rows} with cell size {cell_size} is not usable")]
    InvalidGrid {
        cols: u32,
        rows: usize,
        cell_size: f32,
    },
    #[error("lane table is empty")]
    EmptyLanes,
    #[error("{lanes} lanes configured for a {rows}-row grid")]
    LaneCountMismatch { lanes: usize, rows: usize },
    #[error("lane at row {row} carries index {index}")]
    BadLaneIndex { row: usize, index: usize },
    #[error("the goal lane must occupy row 0 and only row 0")]
    GoalNotFirst,
    #[error("goal pads must be non-empty, strictly ascending and within {cols} columns")]
    BadGoalPads { cols: u32 },
    #[error("lane {row} needs a direction of -1 or +1")]
    BadDirection { row: usize },
    #[error("lane {row} needs a positive base speed")]
    BadSpeed { row: usize },
    #[error("{difficulty:?} tuning: {what}")]
    BadTuning {
        difficulty: Difficulty,
        what: &'static str,
    },
    #[error("tuning table: {0}")]
    Tuning(#[from] serde_json::Error),
}

/// Lane/column query outside the grid; a programming error in the
/// integration rather than a runtime condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("row {row} is outside the {rows}-row grid")]
pub struct OutOfRange {
    pub row: usize,
    pub rows: usize,
}

/// Play-area dimensions in cells and pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub cols: u32,
    pub rows: usize,
    pub cell_size: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cols: consts::GAME_COLS,
            rows: consts::GAME_ROWS,
            cell_size: consts::CELL_SIZE,
        }
    }
}

impl GridConfig {
    /// Play-area width in pixels.
    #[inline]
    pub fn width(&self) -> f32 {
        self.cols as f32 * self.cell_size
    }

    /// Play-area height in pixels.
    #[inline]
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.cell_size
    }
}

/// Behavior class of a lane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaneKind {
    /// Landing-pad row at the far side of the board.
    Goal,
    /// Water; lethal unless the player is on a log.
    River,
    /// Vehicle traffic; lethal on contact.
    Road,
    /// Safe resting row.
    Grass,
}

impl LaneKind {
    /// Whether standing in this lane is harmless by itself.
    pub fn is_safe(&self) -> bool {
        matches!(self, LaneKind::Goal | LaneKind::Grass)
    }

    /// Whether this lane schedules obstacle spawns.
    pub fn spawns(&self) -> bool {
        matches!(self, LaneKind::Road | LaneKind::River)
    }

    /// Minimum gap kept between obstacles near the spawn edge, in cells.
    pub fn min_spacing_cells(&self) -> f32 {
        match self {
            LaneKind::Road => 2.0,
            LaneKind::River => 2.5,
            LaneKind::Goal | LaneKind::Grass => 0.0,
        }
    }
}

/// Immutable per-row descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lane {
    /// Row number; 0 is the goal side.
    pub index: usize,
    pub kind: LaneKind,
    /// Travel direction sign, -1 or +1. Zero for Grass/Goal.
    pub direction: f32,
    /// Obstacle speed before difficulty multipliers, in cells/second.
    pub base_speed: f32,
    /// Landing-pad columns, ascending. Goal lanes only.
    pub goal_pads: Vec<u32>,
}

impl Lane {
    pub fn grass(index: usize) -> Self {
        Self {
            index,
            kind: LaneKind::Grass,
            direction: 0.0,
            base_speed: 0.0,
            goal_pads: Vec::new(),
        }
    }

    pub fn goal(index: usize, goal_pads: Vec<u32>) -> Self {
        Self {
            index,
            kind: LaneKind::Goal,
            direction: 0.0,
            base_speed: 0.0,
            goal_pads,
        }
    }

    pub fn road(index: usize, base_speed: f32, direction: f32) -> Self {
        Self {
            index,
            kind: LaneKind::Road,
            direction,
            base_speed,
            goal_pads: Vec::new(),
        }
    }

    pub fn river(index: usize, base_speed: f32, direction: f32) -> Self {
        Self {
            index,
            kind: LaneKind::River,
            direction,
            base_speed,
            goal_pads: Vec::new(),
        }
    }
}

/// Validated, read-only lane table indexed by row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneTable {
    rows: Vec<Lane>,
}

impl LaneTable {
    /// Validate a lane stack against the grid it will live on.
    pub fn new(rows: Vec<Lane>, grid: &GridConfig) -> Result<Self, ConfigError> {
        if grid.cols == 0 || grid.rows == 0 || grid.cell_size <= 0.0 {
            return Err(ConfigError::InvalidGrid {
                cols: grid.cols,
                rows: grid.rows,
                cell_size: grid.cell_size,
            });
        }
        if rows.is_empty() {
            return Err(ConfigError::EmptyLanes);
        }
        if rows.len() != grid.rows {
            return Err(ConfigError::LaneCountMismatch {
                lanes: rows.len(),
                rows: grid.rows,
            });
        }
        for (row, lane) in rows.iter().enumerate() {
            if lane.index != row {
                return Err(ConfigError::BadLaneIndex {
                    row,
                    index: lane.index,
                });
            }
            if (lane.kind == LaneKind::Goal) != (row == 0) {
                return Err(ConfigError::GoalNotFirst);
            }
            if lane.kind.spawns() {
                if lane.direction != 1.0 && lane.direction != -1.0 {
                    return Err(ConfigError::BadDirection { row });
                }
                if lane.base_speed <= 0.0 {
                    return Err(ConfigError::BadSpeed { row });
                }
            }
        }
        let pads = &rows[0].goal_pads;
        let ascending = pads.windows(2).all(|w| w[0] < w[1]);
        if pads.is_empty() || !ascending || pads.iter().any(|&p| p >= grid.cols) {
            return Err(ConfigError::BadGoalPads { cols: grid.cols });
        }
        Ok(Self { rows })
    }

    /// The stock 13-row board: goal, five river rows, mid-board grass,
    /// five road rows, start grass.
    pub fn classic_rows() -> Vec<Lane> {
        vec![
            Lane::goal(0, vec![2, 6, 10, 14, 18]),
            Lane::river(1, 1.0, -1.0),
            Lane::river(2, 0.8, 1.0),
            Lane::river(3, 1.2, -1.0),
            Lane::river(4, 0.9, 1.0),
            Lane::river(5, 1.1, -1.0),
            Lane::grass(6),
            Lane::road(7, 1.5, 1.0),
            Lane::road(8, 1.0, -1.0),
            Lane::road(9, 1.3, 1.0),
            Lane::road(10, 0.7, -1.0),
            Lane::road(11, 1.6, 1.0),
            Lane::grass(12),
        ]
    }

    /// Number of lanes.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All lanes in row order.
    pub fn rows(&self) -> &[Lane] {
        &self.rows
    }

    /// Lane at the given row, or `OutOfRange` past the grid edge.
    pub fn lane_at(&self, row: usize) -> Result<&Lane, OutOfRange> {
        self.rows.get(row).ok_or(OutOfRange {
            row,
            rows: self.rows.len(),
        })
    }

    /// The goal lane. Validation pins it to row 0.
    pub fn goal(&self) -> &Lane {
        &self.rows[0]
    }
}
