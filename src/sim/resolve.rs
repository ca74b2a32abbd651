//! Collision and platform resolution
//!
//! A pure function of the player, their current lane and that lane's
//! obstacles. The caller applies the consequences; nothing here mutates
//! state. Only the player's own row is ever examined.

use std::collections::BTreeSet;

use glam::Vec2;

use super::lanes::{GridConfig, Lane, LaneKind};
use super::state::{Obstacle, ObstacleKind, Player};

/// What this tick means for the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing happened.
    Safe,
    /// First landing on an unclaimed pad at this column.
    ClaimedPad(u32),
    /// In the goal row but between pads.
    MissedPad,
    /// Overlapping a car.
    HitVehicle,
    /// In the river with no log underfoot.
    Submerged,
    /// Still overlapping a log, but the player's center slid past its end.
    FellOffPlatform,
    /// Standing on this log; motion will carry the player with it.
    RidingPlatform(u32),
}

impl Outcome {
    /// Whether this outcome costs a life.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Outcome::MissedPad | Outcome::HitVehicle | Outcome::Submerged | Outcome::FellOffPlatform
        )
    }

    /// HUD text for a fatal outcome.
    pub fn cause(&self) -> Option<&'static str> {
        match self {
            Outcome::HitVehicle => Some("Hit by a car!"),
            Outcome::Submerged => Some("Fell in the water!"),
            Outcome::FellOffPlatform => Some("Fell off the log!"),
            Outcome::MissedPad => Some("Missed the lily pad!"),
            _ => None,
        }
    }
}

/// Axis-aligned box for the player/obstacle overlap test.
#[derive(Debug, Clone, Copy)]
struct Aabb {
    min: Vec2,
    max: Vec2,
}

impl Aabb {
    fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Resolve the player's situation on `lane`, which must be the lane of the
/// player's current row.
pub fn resolve(
    player: &Player,
    lane: &Lane,
    obstacles: &[Obstacle],
    claimed_pads: &BTreeSet<u32>,
    grid: &GridConfig,
) -> Outcome {
    match lane.kind {
        LaneKind::Grass => Outcome::Safe,
        LaneKind::Goal => resolve_goal(player, lane, claimed_pads, grid),
        LaneKind::Road => resolve_road(player, lane, obstacles, grid),
        LaneKind::River => resolve_river(player, lane, obstacles, grid),
    }
}

fn resolve_goal(
    player: &Player,
    lane: &Lane,
    claimed_pads: &BTreeSet<u32>,
    grid: &GridConfig,
) -> Outcome {
    let col = player.col(grid.cell_size);
    if !lane.goal_pads.contains(&col) {
        return Outcome::MissedPad;
    }
    if claimed_pads.contains(&col) {
        // Already scored; standing here again is harmless.
        Outcome::Safe
    } else {
        Outcome::ClaimedPad(col)
    }
}

fn resolve_road(
    player: &Player,
    lane: &Lane,
    obstacles: &[Obstacle],
    grid: &GridConfig,
) -> Outcome {
    let player_box = player_box(player, grid);
    let hit = lane_obstacles(lane, obstacles, ObstacleKind::Car)
        .any(|car| player_box.overlaps(&obstacle_box(car, grid)));
    if hit {
        Outcome::HitVehicle
    } else {
        Outcome::Safe
    }
}

fn resolve_river(
    player: &Player,
    lane: &Lane,
    obstacles: &[Obstacle],
    grid: &GridConfig,
) -> Outcome {
    let player_box = player_box(player, grid);
    let footing = lane_obstacles(lane, obstacles, ObstacleKind::Log)
        .filter(|log| player_box.overlaps(&obstacle_box(log, grid)))
        .last();

    let Some(log) = footing else {
        return Outcome::Submerged;
    };

    // Box overlap is enough to mount a log, but staying on one is judged by
    // center containment: the log may have moved since the overlap began,
    // and a rider whose center is past the end is already falling.
    let center = player.center_x(grid.cell_size);
    if center < log.x || center > log.right_edge(grid.cell_size) {
        Outcome::FellOffPlatform
    } else {
        Outcome::RidingPlatform(log.id)
    }
}

fn lane_obstacles<'a>(
    lane: &'a Lane,
    obstacles: &'a [Obstacle],
    kind: ObstacleKind,
) -> impl Iterator<Item = &'a Obstacle> {
    obstacles
        .iter()
        .filter(move |o| o.lane == lane.index && o.kind == kind)
}

fn player_box(player: &Player, grid: &GridConfig) -> Aabb {
    Aabb::new(player.pos, Vec2::splat(grid.cell_size))
}

fn obstacle_box(obstacle: &Obstacle, grid: &GridConfig) -> Aabb {
    let cell = grid.cell_size;
    Aabb::new(
        Vec2::new(obstacle.x, obstacle.lane as f32 * cell),
        Vec2::new(obstacle.width_px(cell), cell),
    )
}
