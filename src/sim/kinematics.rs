//! Stateless target kinematics
//!
//! A target's state at any frame is derived from its immutable birth state,
//! never by accumulating per-frame deltas, so there is no drift and any
//! simulated timeline can query any frame in any order.

use glam::Vec2;

use super::state::{Target, TurnStrategy};
use crate::consts::RANDOM_TURN_BEARING;

/// Position and velocity of a target at a queried frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetState {
    pub pos: Vec2,
    pub vel: Vec2,
}

/// Target state at an absolute frame
///
/// Straight-line targets translate linearly from birth. A turning target
/// follows its birth velocity up to the turn frame, then the turned velocity
/// from the turn point onward; the switch is instantaneous at the turn frame
/// itself. Fractional frames are allowed - the solver projects to
/// real-valued times.
pub fn state_at(target: &Target, frame: f32) -> TargetState {
    if let Some(rule) = target.turn_rule() {
        let turn_frame = rule.after_frames as f32;
        if frame >= turn_frame {
            let turned = turned_velocity(target.vel0, rule.strategy);
            let turn_pos = target.pos0 + target.vel0 * turn_frame;
            return TargetState {
                pos: turn_pos + turned * (frame - turn_frame),
                vel: turned,
            };
        }
    }
    TargetState {
        pos: target.pos0 + target.vel0 * frame,
        vel: target.vel0,
    }
}

/// Velocity after a turn fires
pub fn turned_velocity(vel: Vec2, strategy: TurnStrategy) -> Vec2 {
    match strategy {
        TurnStrategy::Reverse => -vel,
        TurnStrategy::Rotate90 => Vec2::new(-vel.y, vel.x),
        TurnStrategy::Random => {
            let speed = vel.length();
            let bearing = vel.y.atan2(vel.x) + RANDOM_TURN_BEARING;
            Vec2::new(speed * bearing.cos(), speed * bearing.sin())
        }
    }
}
