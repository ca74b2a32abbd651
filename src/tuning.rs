//! Data-driven game balance
//!
//! Every knob that distinguishes an easy run from a hard one lives here,
//! serializable so a frontend can ship alternative balance tables as JSON
//! instead of recompiling.

use serde::{Deserialize, Serialize};

use crate::sim::lanes::ConfigError;
use crate::sim::state::ObstacleKind;

/// Difficulty selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// Balance parameters for a single difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyTuning {
    /// Speed multiplier applied to every car.
    pub car_speed_multiplier: f32,
    /// Speed multiplier applied to every log.
    pub log_speed_multiplier: f32,
    /// Obstacle density in (0, 1]; scales spawn spacing and wrap jitter.
    pub obstacle_density: f32,
    /// Lives granted at the start of a run.
    pub lives: u32,
    /// Milliseconds between spawn attempts in each lane.
    pub obstacle_spawn_interval_ms: f32,
}

impl DifficultyTuning {
    /// Speed multiplier for the given obstacle kind.
    pub fn speed_multiplier(&self, kind: ObstacleKind) -> f32 {
        match kind {
            ObstacleKind::Car => self.car_speed_multiplier,
            ObstacleKind::Log => self.log_speed_multiplier,
        }
    }

    fn validate(&self, difficulty: Difficulty) -> Result<(), ConfigError> {
        let bad = |what| ConfigError::BadTuning { difficulty, what };
        if self.lives == 0 {
            return Err(bad("lives must be at least 1"));
        }
        if !(self.obstacle_density > 0.0 && self.obstacle_density <= 1.0) {
            return Err(bad("obstacle density must be within (0, 1]"));
        }
        if self.obstacle_spawn_interval_ms <= 0.0 {
            return Err(bad("spawn interval must be positive"));
        }
        if self.car_speed_multiplier <= 0.0 || self.log_speed_multiplier <= 0.0 {
            return Err(bad("speed multipliers must be positive"));
        }
        Ok(())
    }
}

/// Full balance table, one entry per difficulty
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    pub easy: DifficultyTuning,
    pub medium: DifficultyTuning,
    pub hard: DifficultyTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            easy: DifficultyTuning {
                car_speed_multiplier: 0.8,
                log_speed_multiplier: 0.8,
                obstacle_density: 0.5,
                lives: 5,
                obstacle_spawn_interval_ms: 1500.0,
            },
            medium: DifficultyTuning {
                car_speed_multiplier: 1.2,
                log_speed_multiplier: 1.2,
                obstacle_density: 0.7,
                lives: 3,
                obstacle_spawn_interval_ms: 1000.0,
            },
            hard: DifficultyTuning {
                car_speed_multiplier: 1.8,
                log_speed_multiplier: 1.8,
                obstacle_density: 0.9,
                lives: 1,
                obstacle_spawn_interval_ms: 700.0,
            },
        }
    }
}

impl Tuning {
    /// Parameters for the given difficulty.
    pub fn for_difficulty(&self, difficulty: Difficulty) -> &DifficultyTuning {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }

    /// Parse a balance table from JSON, validating every entry.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check every difficulty entry for usable values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.easy.validate(Difficulty::Easy)?;
        self.medium.validate(Difficulty::Medium)?;
        self.hard.validate(Difficulty::Hard)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        Tuning::default().validate().expect("stock table must pass");
    }

    #[test]
    fn defaults_match_expected_lives() {
        let tuning = Tuning::default();
        assert_eq!(tuning.for_difficulty(Difficulty::Easy).lives, 5);
        assert_eq!(tuning.for_difficulty(Difficulty::Medium).lives, 3);
        assert_eq!(tuning.for_difficulty(Difficulty::Hard).lives, 1);
    }

    #[test]
    fn json_round_trip() {
        let json = serde_json::to_string(&Tuning::default()).unwrap();
        let parsed = Tuning::from_json(&json).unwrap();
        assert_eq!(parsed, Tuning::default());
    }

    #[test]
    fn rejects_zero_lives() {
        let mut tuning = Tuning::default();
        tuning.hard.lives = 0;
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_density() {
        let mut tuning = Tuning::default();
        tuning.easy.obstacle_density = 1.5;
        assert!(tuning.validate().is_err());
    }
}
