//! Plan enumeration, simulation, and ranking
//!
//! The orchestrator behind planning: every permutation of the configured
//! selection length is simulated against its own copy of the snapshot,
//! scored, and the whole set is sorted, ranked, and normalized against the
//! best plan. The search is exhaustive by design - selection lengths are
//! small and fixed per trial.

use std::cmp::Ordering;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, PlanConfig};

use super::hazard::{StepOutcome, step_constant};
use super::intercept::attempt_intercept;
use super::kinematics::state_at;
use super::reward::{resolved_value, value_of};
use super::state::{Pursuer, Snapshot, Target};

/// How far a plan's chase has progressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChasePhase {
    /// Still intercepting cleanly
    Active,
    /// A chase failed; later targets score as forced failures
    Broken,
    /// A fatal hazard ended the plan; later targets are not attempted
    Abandoned,
}

/// One executed movement segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Move {
    /// Whether this segment ended in an interception
    pub success: bool,
    /// Segment length in frames
    pub frames: u32,
    /// Per-frame pursuer velocity over the segment
    pub vel: Vec2,
    pub penalty_points: f32,
    pub penalty_hits: u32,
    /// The segment was cut short by fatal contact
    pub fatal_hit: bool,
    /// Pursuer position when the segment ended
    pub end_pos: Vec2,
}

/// Per-target bookkeeping for one plan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetOutcome {
    /// Index of the chased target
    pub target: usize,
    /// False for targets past a fatal abandonment
    pub attempted: bool,
    pub intercepted: bool,
    /// Distance used for partial credit (0 on success)
    pub final_distance: f32,
    /// Value credited toward the plan total
    pub credited_value: f32,
    /// Decay-resolved reward the target was worth when its chase resolved
    pub resolved_value: f32,
}

/// One candidate selection order with its fully simulated outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub sequence: Vec<usize>,
    /// Sum of credited values minus accrued penalties
    pub total_value: f32,
    /// 1-based competition rank; equal totals share a rank
    pub rank: u32,
    /// Total value as a fraction of the best plan's
    pub value_proportion: f32,
    pub moves: Vec<Move>,
    pub outcomes: Vec<TargetOutcome>,
    pub intercepted_count: u32,
    pub penalty_points: f32,
    pub penalty_hits: u32,
    /// A fatal hazard cut this plan short
    pub abandoned: bool,
}

/// The complete ranked plan set for one snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSet {
    plans: Vec<Plan>,
}

impl PlanSet {
    /// All plans, best first
    pub fn plans(&self) -> &[Plan] {
        &self.plans
    }

    /// The optimal plan
    pub fn best(&self) -> &Plan {
        &self.plans[0]
    }

    /// The next-best plan, if more than one candidate exists
    pub fn second_best(&self) -> Option<&Plan> {
        self.plans.get(1)
    }

    /// The simulated outcome for a realized selection order
    ///
    /// Exact sequence match only; an empty or wrong-length selection finds
    /// nothing and the caller decides what to do about it.
    pub fn lookup(&self, sequence: &[usize]) -> Option<&Plan> {
        self.plans.iter().find(|p| p.sequence == sequence)
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}

/// Enumerate, simulate, and rank every candidate plan for a snapshot
pub fn enumerate_and_rank(
    snapshot: &Snapshot,
    config: &PlanConfig,
) -> Result<PlanSet, ConfigError> {
    if config.arena.radius <= 0.0 {
        return Err(ConfigError::NonPositiveArenaRadius {
            radius: config.arena.radius,
        });
    }
    if config.selections == 0 {
        return Err(ConfigError::NoSelections);
    }
    let pool = snapshot.selectable();
    if config.selections > pool.len() {
        return Err(ConfigError::SelectionsExceedPool {
            selections: config.selections,
            pool: pool.len(),
        });
    }

    let mut plans: Vec<Plan> = permutations(&pool, config.selections)
        .into_iter()
        .map(|sequence| simulate(sequence, snapshot, config))
        .collect();

    rank(&mut plans);

    log::debug!(
        "ranked {} plans; best {:?} scoring {:.3}",
        plans.len(),
        plans[0].sequence,
        plans[0].total_value
    );

    Ok(PlanSet { plans })
}

/// All ordered selections of `k` distinct entries from `pool`
///
/// Duplicate-free by construction; recursion depth is bounded by `k`.
fn permutations(pool: &[usize], k: usize) -> Vec<Vec<usize>> {
    fn extend(pool: &[usize], k: usize, current: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
        if current.len() == k {
            out.push(current.clone());
            return;
        }
        for &candidate in pool {
            if current.contains(&candidate) {
                continue;
            }
            current.push(candidate);
            extend(pool, k, current, out);
            current.pop();
        }
    }

    let mut out = Vec::new();
    extend(pool, k, &mut Vec::new(), &mut out);
    out
}

/// Simulate one selection order against its own copy of the snapshot
fn simulate(sequence: Vec<usize>, snapshot: &Snapshot, config: &PlanConfig) -> Plan {
    let mut targets = snapshot.targets.clone();
    let mut pursuer = snapshot.pursuer;
    let mut frame = snapshot.frame;

    let mut phase = ChasePhase::Active;
    let mut moves = Vec::new();
    let mut outcomes = Vec::with_capacity(sequence.len());
    let mut total_value = 0.0f32;
    let mut penalty_points = 0.0f32;
    let mut penalty_hits = 0u32;
    let mut intercepted_count = 0u32;

    for (selection_index, &idx) in sequence.iter().enumerate() {
        if phase == ChasePhase::Abandoned {
            outcomes.push(TargetOutcome {
                target: idx,
                attempted: false,
                intercepted: false,
                final_distance: 0.0,
                credited_value: 0.0,
                resolved_value: 0.0,
            });
            continue;
        }

        let in_progress = phase == ChasePhase::Active;
        let state = state_at(&targets[idx], frame as f32);
        let mut outcome = attempt_intercept(
            in_progress,
            pursuer.pos,
            pursuer.speed,
            state.pos,
            state.vel,
            &config.arena,
            remaining_horizon(frame, snapshot.frame, config),
        );

        if in_progress {
            // A turn firing before the predicted resolution splits the chase
            // in two: hold course until the turn, then re-solve.
            if let Some(rule) = targets[idx].turn_rule() {
                if rule.after_frames > frame {
                    let until_turn = rule.after_frames - frame;
                    if outcome.time.round() as u32 > until_turn {
                        let total_frames = outcome.time.round().max(1.0);
                        let vel = (outcome.point - pursuer.pos) / total_frames;
                        let step =
                            step_constant(&mut pursuer, &mut targets, vel, until_turn, frame);
                        moves.push(segment_move(false, &step, vel, pursuer.pos));
                        penalty_points += step.penalty_points;
                        penalty_hits += step.penalty_hits;
                        frame += step.frames_stepped;

                        if step.fatal_hit {
                            phase = ChasePhase::Abandoned;
                            outcomes.push(unresolved_outcome(
                                idx, &targets, &pursuer, frame, config,
                            ));
                            continue;
                        }

                        let turned = state_at(&targets[idx], frame as f32);
                        outcome = attempt_intercept(
                            true,
                            pursuer.pos,
                            pursuer.speed,
                            turned.pos,
                            turned.vel,
                            &config.arena,
                            remaining_horizon(frame, snapshot.frame, config),
                        );
                    }
                }
            }

            // Final leg toward the (possibly re-solved) resolution point.
            let frames = outcome.time.round().max(0.0) as u32;
            let vel = if frames > 0 {
                (outcome.point - pursuer.pos) / frames as f32
            } else {
                Vec2::ZERO
            };
            let step = step_constant(&mut pursuer, &mut targets, vel, frames, frame);
            moves.push(segment_move(
                outcome.success && !step.fatal_hit,
                &step,
                vel,
                pursuer.pos,
            ));
            penalty_points += step.penalty_points;
            penalty_hits += step.penalty_hits;
            frame += step.frames_stepped;

            if step.fatal_hit {
                phase = ChasePhase::Abandoned;
                outcomes.push(unresolved_outcome(idx, &targets, &pursuer, frame, config));
                continue;
            }
        }

        // Score the resolved chase. Once the plan is broken this is the
        // forced-failure path: zero time, no movement, reduced weight.
        let credited = value_of(
            &targets[idx],
            outcome.success,
            outcome.final_distance,
            selection_index,
            intercepted_count,
            frame,
            config,
        );
        total_value += credited;
        let resolved = resolved_value(&targets[idx], frame, config);

        if outcome.success {
            intercepted_count += 1;
            targets[idx].intercepted = true;
        } else if phase == ChasePhase::Active {
            phase = ChasePhase::Broken;
        }

        outcomes.push(TargetOutcome {
            target: idx,
            attempted: true,
            intercepted: outcome.success,
            final_distance: outcome.final_distance,
            credited_value: credited,
            resolved_value: resolved,
        });
    }

    total_value -= penalty_points;

    Plan {
        sequence,
        total_value,
        rank: 0,
        value_proportion: 0.0,
        moves,
        outcomes,
        intercepted_count,
        penalty_points,
        penalty_hits,
        abandoned: phase == ChasePhase::Abandoned,
    }
}

/// Frames left in the interception budget at an absolute frame
fn remaining_horizon(frame: u32, start: u32, config: &PlanConfig) -> f32 {
    config.interception_frames.saturating_sub(frame - start) as f32
}

fn segment_move(success: bool, step: &StepOutcome, vel: Vec2, end_pos: Vec2) -> Move {
    Move {
        success,
        frames: step.frames_stepped,
        vel,
        penalty_points: step.penalty_points,
        penalty_hits: step.penalty_hits,
        fatal_hit: step.fatal_hit,
        end_pos,
    }
}

/// Bookkeeping for a chase cut off by fatal contact: attempted, but the
/// target never resolved, so nothing is credited
fn unresolved_outcome(
    idx: usize,
    targets: &[Target],
    pursuer: &Pursuer,
    frame: u32,
    config: &PlanConfig,
) -> TargetOutcome {
    let state = state_at(&targets[idx], frame as f32);
    TargetOutcome {
        target: idx,
        attempted: true,
        intercepted: false,
        final_distance: (state.pos - pursuer.pos).length(),
        credited_value: 0.0,
        resolved_value: resolved_value(&targets[idx], frame, config),
    }
}

/// Sort descending by total value (stable), assign competition ranks, and
/// normalize every plan's value against the best one
fn rank(plans: &mut [Plan]) {
    plans.sort_by(|a, b| {
        b.total_value
            .partial_cmp(&a.total_value)
            .unwrap_or(Ordering::Equal)
    });

    let best = plans[0].total_value;
    let mut prev_value = f32::INFINITY;
    let mut prev_rank = 0u32;
    for (i, plan) in plans.iter_mut().enumerate() {
        plan.rank = if plan.total_value == prev_value {
            prev_rank
        } else {
            i as u32 + 1
        };
        prev_value = plan.total_value;
        prev_rank = plan.rank;

        plan.value_proportion = if best > 0.0 {
            (plan.total_value / best).max(0.0)
        } else if plan.total_value == best {
            1.0
        } else {
            0.0
        };
    }
}
