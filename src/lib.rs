//! Arena Pursuit - interception planning engine for a circular-arena chase task
//!
//! Core modules:
//! - `sim`: Deterministic planning engine (kinematics, intercept solver,
//!   hazard stepping, reward scoring, plan search and ranking)
//! - `config`: Configuration records crossing the engine boundary
//!
//! The crate is the computational core of a timed interception task: targets
//! drift across a circular arena, a player picks an ordered selection of
//! them, and a fixed-speed pursuer tries to run each one down. Everything
//! around that (trial authoring, rendering, input, persistence) is an
//! external collaborator that talks to the engine through the record types
//! in [`sim::state`].

pub mod config;
pub mod sim;

pub use config::{Arena, ConfigError, PlanConfig};
pub use sim::{
    Plan, PlanSet, Pursuer, Snapshot, Target, TargetKind, TurnRule, TurnStrategy,
    enumerate_and_rank,
};

use glam::Vec2;

/// Engine tuning constants
pub mod consts {
    /// Default playable-arena radius (pixels)
    pub const ARENA_RADIUS: f32 = 400.0;

    /// Default target radius
    pub const TARGET_RADIUS: f32 = 15.0;
    /// Default pursuer radius
    pub const PURSUER_RADIUS: f32 = 15.0;
    /// Extra contact slack for fatal hazards so near misses still register
    pub const FATAL_CONTACT_BUFFER: f32 = 5.0;

    /// Default observation-phase length (3 s at 60 Hz)
    pub const OBSERVATION_FRAMES: u32 = 180;
    /// Default interception-phase frame budget (2 s at 60 Hz)
    pub const INTERCEPTION_FRAMES: u32 = 120;
    /// Default number of targets selected per trial
    pub const SELECTIONS: usize = 2;

    /// Decaying rewards reach zero after this multiple of the interception budget
    pub const DECAY_HORIZON_FACTOR: f32 = 3.0;
    /// Partial-credit weight for the first failed chase in a plan
    pub const FIRST_MISS_WEIGHT: f32 = 0.75;
    /// Partial-credit weight once the chase is already broken
    pub const LATER_MISS_WEIGHT: f32 = 0.25;

    /// Bearing offset of the fixed pseudo-random turn strategy (radians)
    pub const RANDOM_TURN_BEARING: f32 = std::f32::consts::PI * 0.73;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
