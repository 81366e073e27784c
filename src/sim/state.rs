//! Boundary records shared with the engine's collaborators
//!
//! Trial loading, rendering, and input all talk to the planner through the
//! shapes in this file. Everything is a plain value: planning clones the
//! snapshot per candidate plan, so no simulation can alias the live play
//! state or another plan's copy.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{PURSUER_RADIUS, TARGET_RADIUS};

/// How a turning target redirects at its turn frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TurnStrategy {
    /// 180 degree reversal - the only strategy the stimulus generator produces
    #[default]
    Reverse,
    /// Rotate the velocity by +90 degrees (legacy, kept selectable)
    Rotate90,
    /// Rotate to a fixed pseudo-random bearing (legacy, kept selectable)
    Random,
}

/// One-time turn applied to a turning target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRule {
    /// Absolute frame, counted from birth, at which the turn fires
    pub after_frames: u32,
    pub strategy: TurnStrategy,
}

impl TurnRule {
    pub fn reverse_after(after_frames: u32) -> Self {
        Self {
            after_frames,
            strategy: TurnStrategy::Reverse,
        }
    }
}

/// Contact bookkeeping for a penalty hazard
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HazardProfile {
    /// Points deducted per contact
    pub penalty: f32,
    /// Frames of immunity after a contact
    pub cooldown_frames: u32,
    /// Absolute frame of the last applied penalty (`None` = never hit)
    pub last_applied: Option<u32>,
}

impl HazardProfile {
    pub fn new(penalty: f32, cooldown_frames: u32) -> Self {
        Self {
            penalty,
            cooldown_frames,
            last_applied: None,
        }
    }
}

/// Target variant tag, with variant-specific state where it is required
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TargetKind {
    /// Straight-line mover with a constant reward
    Plain,
    /// Straight-line mover whose reward decays once the observation phase ends
    DecayingReward {
        /// Reward level held through observation and decayed from there
        initial_value: f32,
    },
    /// Straight-line mover with an optional one-time turn
    Turning {
        /// The turn this target will make, if it turns at all
        turn: Option<TurnRule>,
        /// Live-play flag; kinematics derives turn state from the frame instead
        has_turned: bool,
    },
    /// Contact deducts points, limited by a per-hazard cooldown
    PenaltyHazard(HazardProfile),
    /// First contact ends the plan outright
    FatalHazard,
}

/// A moving entity on the arena
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    /// Stable identity used in selections and plans
    pub index: usize,
    /// Birth position
    pub pos0: Vec2,
    /// Birth velocity (displacement per frame)
    pub vel0: Vec2,
    pub radius: f32,
    /// Base reward credited on interception
    pub value: f32,
    pub kind: TargetKind,
    /// Interception is terminal: an intercepted target is out of play
    pub intercepted: bool,
}

impl Target {
    pub fn new(index: usize, pos0: Vec2, vel0: Vec2, value: f32, kind: TargetKind) -> Self {
        Self {
            index,
            pos0,
            vel0,
            radius: TARGET_RADIUS,
            value,
            kind,
            intercepted: false,
        }
    }

    /// Hazards are obstacles, not goals
    pub fn is_hazard(&self) -> bool {
        matches!(
            self.kind,
            TargetKind::PenaltyHazard(_) | TargetKind::FatalHazard
        )
    }

    /// Whether this target may appear in a selection sequence
    pub fn is_selectable(&self) -> bool {
        !self.is_hazard() && !self.intercepted
    }

    /// The turn this target will make, if any
    pub fn turn_rule(&self) -> Option<TurnRule> {
        match self.kind {
            TargetKind::Turning { turn, .. } => turn,
            _ => None,
        }
    }
}

/// The player-controlled chaser
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pursuer {
    pub pos: Vec2,
    /// Distance covered per frame
    pub speed: f32,
    pub radius: f32,
}

impl Pursuer {
    pub fn new(pos: Vec2, speed: f32) -> Self {
        Self {
            pos,
            speed,
            radius: PURSUER_RADIUS,
        }
    }
}

/// World state frozen at the instant planning is invoked
///
/// The engine only ever reads this copy; mutating the live state afterwards
/// can never retroactively affect an in-flight or finished plan set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Absolute frame at which the snapshot was taken
    pub frame: u32,
    pub targets: Vec<Target>,
    pub pursuer: Pursuer,
}

impl Snapshot {
    pub fn new(frame: u32, targets: Vec<Target>, pursuer: Pursuer) -> Self {
        debug_assert!(
            targets.iter().enumerate().all(|(i, t)| t.index == i),
            "target indices must match their positions"
        );
        Self {
            frame,
            targets,
            pursuer,
        }
    }

    /// Indices of targets that may appear in a selection
    pub fn selectable(&self) -> Vec<usize> {
        self.targets
            .iter()
            .filter(|t| t.is_selectable())
            .map(|t| t.index)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(index: usize) -> Target {
        Target::new(
            index,
            Vec2::new(100.0, 0.0),
            Vec2::new(1.0, 0.0),
            0.5,
            TargetKind::Plain,
        )
    }

    #[test]
    fn test_hazards_are_not_selectable() {
        let mut targets = vec![plain(0), plain(1)];
        targets[1].kind = TargetKind::PenaltyHazard(HazardProfile::new(0.1, 30));
        let mut fatal = plain(2);
        fatal.kind = TargetKind::FatalHazard;
        targets.push(fatal);

        let snapshot = Snapshot::new(0, targets, Pursuer::new(Vec2::ZERO, 2.0));
        assert_eq!(snapshot.selectable(), vec![0]);
    }

    #[test]
    fn test_intercepted_targets_leave_the_pool() {
        let mut targets = vec![plain(0), plain(1)];
        targets[0].intercepted = true;
        let snapshot = Snapshot::new(0, targets, Pursuer::new(Vec2::ZERO, 2.0));
        assert_eq!(snapshot.selectable(), vec![1]);
    }

    #[test]
    fn test_hazard_profile_starts_unhit() {
        let profile = HazardProfile::new(0.1, 30);
        assert_eq!(profile.last_applied, None);
    }
}
