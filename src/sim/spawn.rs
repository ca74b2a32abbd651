//! Obstacle spawn scheduling
//!
//! Each moving lane accumulates elapsed time and fires a spawn attempt once
//! per interval. An attempt is suppressed while the newest obstacle still
//! crowds the spawn edge; suppression rewinds the lane timer by a fixed
//! backoff instead of resetting it, so dense lanes retry soon without
//! thrashing and are never starved outright.

use rand::Rng;
use rand_pcg::Pcg32;

use super::lanes::{GridConfig, Lane, LaneKind};
use super::state::{Obstacle, ObstacleKind};
use crate::consts;
use crate::tuning::DifficultyTuning;

/// A spawn decision, before the state assigns it an id.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleSpec {
    pub kind: ObstacleKind,
    /// Left edge in pixels, fully off-screen.
    pub x: f32,
    pub width_cells: u32,
    /// Signed cells/second.
    pub velocity: f32,
}

impl ObstacleSpec {
    /// Bind the spec to an id and lane, producing a live obstacle.
    pub fn into_obstacle(self, id: u32, lane: usize) -> Obstacle {
        Obstacle {
            id,
            lane,
            kind: self.kind,
            x: self.x,
            width_cells: self.width_cells,
            velocity: self.velocity,
        }
    }
}

/// Advance one lane's spawn timer and decide whether it produces an
/// obstacle this tick.
///
/// `timer` is the lane's accumulator in ms; it is mutated in place:
/// incremented by `elapsed_ms`, reset to zero on a spawn, rewound by
/// [`consts::SPAWN_BACKOFF_MS`] on a suppressed attempt.
pub fn maybe_spawn(
    lane: &Lane,
    elapsed_ms: f32,
    timer: &mut f32,
    obstacles: &[Obstacle],
    grid: &GridConfig,
    tuning: &DifficultyTuning,
    rng: &mut Pcg32,
) -> Option<ObstacleSpec> {
    if !lane.kind.spawns() {
        return None;
    }
    *timer += elapsed_ms;
    if *timer < tuning.obstacle_spawn_interval_ms {
        return None;
    }
    if !clear_to_spawn(lane, obstacles, grid, tuning) {
        *timer -= consts::SPAWN_BACKOFF_MS;
        log::trace!("lane {}: spawn suppressed, backing off", lane.index);
        return None;
    }
    *timer = 0.0;

    let kind = match lane.kind {
        LaneKind::Road => ObstacleKind::Car,
        LaneKind::River => ObstacleKind::Log,
        LaneKind::Goal | LaneKind::Grass => return None,
    };
    let width_cells = match kind {
        ObstacleKind::Car => {
            if rng.random_bool(0.5) {
                2
            } else {
                3
            }
        }
        ObstacleKind::Log => {
            if rng.random_bool(0.7) {
                3
            } else {
                4
            }
        }
    };
    let velocity = lane.base_speed * lane.direction * tuning.speed_multiplier(kind);
    let x = if lane.direction > 0.0 {
        -(width_cells as f32) * grid.cell_size
    } else {
        grid.width()
    };
    Some(ObstacleSpec {
        kind,
        x,
        width_cells,
        velocity,
    })
}

/// Whether the spawn edge has room for another obstacle.
///
/// Rightward lanes spawn on the left, so the leftmost obstacle is the one
/// that can crowd the edge; leftward lanes mirror this on the right.
fn clear_to_spawn(
    lane: &Lane,
    obstacles: &[Obstacle],
    grid: &GridConfig,
    tuning: &DifficultyTuning,
) -> bool {
    let threshold = lane.kind.min_spacing_cells()
        * grid.cell_size
        * tuning.obstacle_density
        * (grid.cols as f32 / 2.0);
    let in_lane = obstacles.iter().filter(|o| o.lane == lane.index);
    if lane.direction > 0.0 {
        let leftmost = in_lane.map(|o| o.x).fold(f32::INFINITY, f32::min);
        leftmost >= threshold
    } else {
        let rightmost = in_lane
            .map(|o| o.right_edge(grid.cell_size))
            .fold(f32::NEG_INFINITY, f32::max);
        rightmost <= grid.width() - threshold
    }
}
