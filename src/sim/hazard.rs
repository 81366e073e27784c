//! Frame-by-frame hazard stepping
//!
//! The pursuer advances along a fixed per-frame velocity while hazards move
//! on their own piecewise trajectories. Stepping cannot be replaced with a
//! closed-form swept-path test: cooldown state is path dependent, so the
//! order in which contacts happen matters.

use glam::Vec2;

use super::kinematics::state_at;
use super::state::{Pursuer, Target, TargetKind};
use crate::consts::FATAL_CONTACT_BUFFER;

/// Result of one constant-velocity stepping phase
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepOutcome {
    pub penalty_points: f32,
    pub penalty_hits: u32,
    /// Frames actually executed; equals the request unless a fatal hit stopped it
    pub frames_stepped: u32,
    pub fatal_hit: bool,
}

/// Advance the pursuer by `vel` once per frame, for up to `frames` frames
///
/// After each frame every live hazard is repositioned statelessly at the new
/// absolute frame and tested for circular overlap. Penalty hazards apply
/// once per cooldown window, tracked per hazard within this call; fatal
/// hazards stop the stepping on first contact, and the caller must treat the
/// rest of the plan as abandoned.
pub fn step_constant(
    pursuer: &mut Pursuer,
    targets: &mut [Target],
    vel: Vec2,
    frames: u32,
    start_frame: u32,
) -> StepOutcome {
    let mut outcome = StepOutcome::default();
    let mut last_hit: Vec<Option<u32>> = vec![None; targets.len()];

    for step in 0..frames {
        pursuer.pos += vel;
        outcome.frames_stepped = step + 1;
        let frame = start_frame + step + 1;

        for (slot, target) in targets.iter_mut().enumerate() {
            if target.intercepted || !target.is_hazard() {
                continue;
            }
            let hazard_pos = state_at(target, frame as f32).pos;
            let reach = pursuer.radius + target.radius;
            match &mut target.kind {
                TargetKind::FatalHazard => {
                    if overlaps(pursuer.pos, hazard_pos, reach + FATAL_CONTACT_BUFFER) {
                        outcome.fatal_hit = true;
                        return outcome;
                    }
                }
                TargetKind::PenaltyHazard(profile) => {
                    if overlaps(pursuer.pos, hazard_pos, reach) {
                        let off_cooldown = match last_hit[slot] {
                            Some(last) => step - last >= profile.cooldown_frames,
                            None => true,
                        };
                        if off_cooldown {
                            outcome.penalty_points += profile.penalty;
                            outcome.penalty_hits += 1;
                            last_hit[slot] = Some(step);
                            profile.last_applied = Some(frame);
                        }
                    }
                }
                _ => {}
            }
        }
    }

    outcome
}

/// Apply hazard penalties against the live play state for one display frame
///
/// The realized-run counterpart of [`step_constant`], called by the outside
/// animation driver after it moves the pursuer each frame. Cooldowns here
/// span the whole trial, so the decision uses each hazard's persistent
/// last-applied frame rather than call-local tracking. Returns the points
/// and hits applied on this frame.
pub fn apply_live_penalties(
    targets: &mut [Target],
    pursuer: &Pursuer,
    frame: u32,
) -> (f32, u32) {
    let mut points = 0.0;
    let mut hits = 0;

    for target in targets.iter_mut() {
        if target.intercepted || !target.is_hazard() {
            continue;
        }
        let hazard_pos = state_at(target, frame as f32).pos;
        let reach = pursuer.radius + target.radius;
        if let TargetKind::PenaltyHazard(profile) = &mut target.kind {
            if overlaps(pursuer.pos, hazard_pos, reach) {
                let off_cooldown = match profile.last_applied {
                    Some(last) => frame.saturating_sub(last) >= profile.cooldown_frames,
                    None => true,
                };
                if off_cooldown {
                    points += profile.penalty;
                    hits += 1;
                    profile.last_applied = Some(frame);
                }
            }
        }
    }

    (points, hits)
}

#[inline]
fn overlaps(a: Vec2, b: Vec2, reach: f32) -> bool {
    (a - b).length_squared() <= reach * reach
}
