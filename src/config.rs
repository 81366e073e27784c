//! Engine configuration and boundary errors
//!
//! Everything the planner needs from the surrounding application is passed
//! in explicitly; the engine never reaches into ambient state.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{ARENA_RADIUS, INTERCEPTION_FRAMES, OBSERVATION_FRAMES, SELECTIONS};

/// Circular playable region
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub center: Vec2,
    pub radius: f32,
}

impl Arena {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Whether a point lies inside the playable region
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        (point - self.center).length() <= self.radius
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            center: Vec2::ZERO,
            radius: ARENA_RADIUS,
        }
    }
}

/// Planner configuration, fixed for the duration of a trial
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanConfig {
    /// Number of targets selected per trial
    pub selections: usize,
    /// Region targets and the pursuer are evaluated against
    pub arena: Arena,
    /// Length of the observation phase in frames
    pub observation_frames: u32,
    /// Frame budget of the interception phase
    pub interception_frames: u32,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            selections: SELECTIONS,
            arena: Arena::default(),
            observation_frames: OBSERVATION_FRAMES,
            interception_frames: INTERCEPTION_FRAMES,
        }
    }
}

/// Boundary misuse reported by [`crate::sim::enumerate_and_rank`]
///
/// Nothing inside the engine fails; only a caller handing over an impossible
/// configuration gets an error back.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("selection count must be at least 1")]
    NoSelections,
    #[error("selection count {selections} exceeds the selectable pool of {pool}")]
    SelectionsExceedPool { selections: usize, pool: usize },
    #[error("arena radius must be positive (got {radius})")]
    NonPositiveArenaRadius { radius: f32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_contains() {
        let arena = Arena::default();
        assert!(arena.contains(Vec2::new(399.0, 0.0)));
        assert!(arena.contains(Vec2::ZERO));
        assert!(!arena.contains(Vec2::new(401.0, 0.0)));

        let offset = Arena::new(Vec2::new(405.0, 405.0), 400.0);
        assert!(offset.contains(Vec2::new(405.0, 10.0)));
        assert!(!offset.contains(Vec2::new(405.0, 4.0)));
    }

    #[test]
    fn test_default_config_matches_trial_constants() {
        let config = PlanConfig::default();
        assert_eq!(config.selections, 2);
        assert_eq!(config.observation_frames, 180);
        assert_eq!(config.interception_frames, 120);
        assert_eq!(config.arena.radius, 400.0);
    }

    #[test]
    fn test_config_error_messages() {
        let err = ConfigError::SelectionsExceedPool {
            selections: 5,
            pool: 3,
        };
        assert!(err.to_string().contains("exceeds"));
        assert!(ConfigError::NoSelections.to_string().contains("at least 1"));
    }
}
