//! Reward resolution and partial-credit scoring

use crate::config::PlanConfig;
use crate::consts::{DECAY_HORIZON_FACTOR, FIRST_MISS_WEIGHT, LATER_MISS_WEIGHT};

use super::state::{Target, TargetKind};

/// Reward a target is worth at an absolute frame
///
/// Decaying rewards hold their initial level through the observation phase,
/// then fall linearly to zero over [`DECAY_HORIZON_FACTOR`] times the
/// interception budget, floored at zero. Every other kind is constant.
pub fn resolved_value(target: &Target, frame: u32, config: &PlanConfig) -> f32 {
    match target.kind {
        TargetKind::DecayingReward { initial_value } => {
            if frame <= config.observation_frames {
                initial_value
            } else {
                let elapsed = (frame - config.observation_frames) as f32;
                let span = config.interception_frames as f32 * DECAY_HORIZON_FACTOR;
                (initial_value * (1.0 - elapsed / span)).max(0.0)
            }
        }
        _ => target.value,
    }
}

/// Value credited for one chased target
///
/// Success pays the resolved reward in full. A failed chase earns partial
/// credit scaled by how close the target's boundary state still was:
/// `((2R - d) / 2R) * resolved * weight`, where the weight is 0.75 for the
/// plan's first failure (`selection_index == intercepted_so_far`) and 0.25
/// once earlier failures already broke the chase.
pub fn value_of(
    target: &Target,
    success: bool,
    final_distance: f32,
    selection_index: usize,
    intercepted_so_far: u32,
    frame: u32,
    config: &PlanConfig,
) -> f32 {
    let resolved = resolved_value(target, frame, config);
    if success {
        return resolved;
    }

    let weight = if selection_index == intercepted_so_far as usize {
        FIRST_MISS_WEIGHT
    } else {
        LATER_MISS_WEIGHT
    };
    let span = config.arena.radius * 2.0;
    ((span - final_distance) / span) * resolved * weight
}
