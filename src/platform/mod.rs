//! Platform abstraction layer
//!
//! The seams between the simulation core and whatever drives it:
//! - A render sink consumes snapshots; nothing flows back in
//! - An input source yields discrete move intents, never key codes
//! - A clock supplies elapsed time between frames
//!
//! The core compiles against these traits only, so a DOM frontend, a
//! terminal frontend and the headless demo binary are interchangeable.

use std::collections::VecDeque;

use crate::sim::{Direction, GamePhase, Snapshot};

/// Consumes a frame's snapshot for presentation.
pub trait RenderSink {
    fn present(&mut self, frame: &Snapshot);
}

/// Yields at most one move intent per poll.
pub trait InputSource {
    fn poll(&mut self) -> Option<Direction>;
}

/// Supplies elapsed milliseconds since the previous frame.
pub trait Clock {
    fn elapsed_ms(&mut self) -> f32;
}

/// Render sink that reports phase and status changes through the log.
#[derive(Debug, Default)]
pub struct LogSink {
    last_phase: Option<GamePhase>,
    last_message: String,
}

impl RenderSink for LogSink {
    fn present(&mut self, frame: &Snapshot) {
        if self.last_phase != Some(frame.phase) {
            self.last_phase = Some(frame.phase);
            log::info!(
                "phase {:?}: score {}, lives {}, pads {:?}",
                frame.phase,
                frame.score,
                frame.lives,
                frame.claimed_pads
            );
        }
        if frame.message != self.last_message {
            self.last_message = frame.message.clone();
            if !frame.message.is_empty() {
                log::info!("{}", frame.message);
            }
        }
    }
}

/// Scripted input source: each entry waits a number of polls, then fires.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    moves: VecDeque<(u32, Direction)>,
}

impl ScriptedInput {
    pub fn new(moves: impl IntoIterator<Item = (u32, Direction)>) -> Self {
        Self {
            moves: moves.into_iter().collect(),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.moves.is_empty()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Option<Direction> {
        let (delay, direction) = self.moves.front_mut()?;
        if *delay > 0 {
            *delay -= 1;
            return None;
        }
        let direction = *direction;
        let _ = self.moves.pop_front();
        Some(direction)
    }
}

/// Fixed-step clock for headless runs and tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    step_ms: f32,
}

impl FixedClock {
    pub fn new(step_ms: f32) -> Self {
        Self { step_ms }
    }
}

impl Clock for FixedClock {
    fn elapsed_ms(&mut self) -> f32 {
        self.step_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_input_waits_out_its_delays() {
        let mut input = ScriptedInput::new([(2, Direction::Up), (0, Direction::Left)]);
        assert_eq!(input.poll(), None);
        assert_eq!(input.poll(), None);
        assert_eq!(input.poll(), Some(Direction::Up));
        assert_eq!(input.poll(), Some(Direction::Left));
        assert_eq!(input.poll(), None);
        assert!(input.is_exhausted());
    }

    #[test]
    fn fixed_clock_is_constant() {
        let mut clock = FixedClock::new(16.0);
        assert_eq!(clock.elapsed_ms(), 16.0);
        assert_eq!(clock.elapsed_ms(), 16.0);
    }
}
