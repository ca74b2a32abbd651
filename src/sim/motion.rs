//! Motion integration
//!
//! Advances every obstacle, and the player when riding one, by
//! `velocity * dt * cell_size`. An obstacle that has fully left the board
//! teleports back to the far side with a randomized off-screen offset; the
//! jitter keeps lanes from settling into a visually periodic march.

use rand::Rng;
use rand_pcg::Pcg32;

use super::lanes::GridConfig;
use super::state::{Obstacle, Player};

/// Advance the world by `dt` seconds.
///
/// Order within the step is load-bearing: the rider is carried first, then
/// clamped to the board, then obstacles move and wrap. A log can therefore
/// push the player against the wall, and the follow-up resolver pass is
/// what notices the player slipping off the end of it.
pub fn advance(
    player: &mut Player,
    obstacles: &mut [Obstacle],
    grid: &GridConfig,
    density: f32,
    rng: &mut Pcg32,
    dt: f32,
) {
    let cell = grid.cell_size;

    if let Some(id) = player.riding {
        match obstacles.iter().find(|o| o.id == id) {
            Some(log) => player.pos.x += log.velocity * dt * cell,
            None => player.riding = None,
        }
    }
    player.pos.x = player.pos.x.clamp(0.0, grid.width() - cell);

    for obstacle in obstacles.iter_mut() {
        obstacle.x += obstacle.velocity * dt * cell;

        // Wrap only once the whole body is past the far edge.
        if obstacle.velocity > 0.0 {
            if obstacle.x > grid.width() {
                obstacle.x = -obstacle.width_px(cell) - wrap_jitter(rng, grid, density);
            }
        } else if obstacle.right_edge(cell) < 0.0 {
            obstacle.x = grid.width() + wrap_jitter(rng, grid, density);
        }
    }
}

fn wrap_jitter(rng: &mut Pcg32, grid: &GridConfig, density: f32) -> f32 {
    let span = grid.width() * (1.0 - density);
    if span > 0.0 {
        rng.random_range(0.0..span)
    } else {
        0.0
    }
}
