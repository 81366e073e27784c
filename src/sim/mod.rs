//! Deterministic interception planning engine
//!
//! All planning logic lives here. This module must be pure and deterministic:
//! - Frame-indexed kinematics only, no wall clock
//! - No I/O and no uncontrolled randomness
//! - Every simulated plan owns an exclusive copy of the snapshot
//! - Identical snapshots produce bit-identical plan sets

pub mod hazard;
pub mod intercept;
pub mod kinematics;
pub mod plan;
pub mod reward;
pub mod state;

pub use hazard::{StepOutcome, apply_live_penalties, step_constant};
pub use intercept::{InterceptOutcome, attempt_intercept};
pub use kinematics::{TargetState, state_at, turned_velocity};
pub use plan::{Move, Plan, PlanSet, TargetOutcome, enumerate_and_rank};
pub use reward::{resolved_value, value_of};
pub use state::{HazardProfile, Pursuer, Snapshot, Target, TargetKind, TurnRule, TurnStrategy};
