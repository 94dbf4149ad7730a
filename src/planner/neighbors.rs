//! Neighbor generation for kinematic states.
//!
//! Each axis picks from holding, raising or lowering its acceleration by one jerk step.
//! Per-axis candidates that would leave the acceleration or velocity bound, or overshoot
//! the goal, are culled before the cross product is formed, so only the surviving combinations are
//! integrated and canonicalized.

use alloc::vec::Vec;

use itertools::structs::MultiProduct;
use itertools::Itertools;
use libm::fabs;

use crate::config::AxisLimits;

use super::kinematics::EPSILON;
use super::space::{CullStats, KinematicSpace};
use super::state::{MotionState, StateId};

/// Check whether `goal` is a single step away from `node`.
///
/// Per axis, with `j` the active jerk: the goal is within `j` of the position, the
/// velocity is within `j` of the goal velocity, the axis is not moving away from the
/// goal, the acceleration is within `j` of the goal acceleration, and an acceleration
/// that opposes the required velocity change is itself no larger than `j`.
pub fn is_goal_neighbor(node: &MotionState, goal: &MotionState, jerk: &[f64]) -> bool {
    (0..node.dimensions()).all(|i| {
        let j = jerk[i] + EPSILON;
        let d = goal.s()[i] - node.s()[i];
        let v = node.v()[i];
        let a = node.a()[i];
        let dv = goal.v()[i] - v;

        fabs(d) <= j
            && fabs(dv) <= j
            && v * d >= 0.0
            && fabs(goal.a()[i] - a) <= j
            && (a * dv >= 0.0 || fabs(a) <= j)
    })
}

/// Accelerations one axis may take next, after bound and overshoot culling.
///
/// A state that already exceeds `max_acceleration` keeps only the candidates that bring
/// it back inside the bound.
pub(crate) fn axis_accelerations(
    limits: &AxisLimits,
    jerk: f64,
    (s, v, a): (f64, f64, f64),
    goal_s: f64,
    culls: &mut CullStats,
) -> Vec<f64> {
    let candidates = [
        a,
        (a + jerk).min(limits.max_acceleration),
        (a - jerk).max(-limits.max_acceleration),
    ];
    let d = goal_s - s;

    let mut out = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if out.iter().any(|&c: &f64| fabs(c - candidate) <= EPSILON) {
            continue;
        }
        if !limits.acceleration_in_range(candidate) {
            culls.acceleration += 1;
            continue;
        }
        let next_v = v + candidate;
        if !limits.velocity_in_range(next_v) {
            culls.velocity += 1;
            continue;
        }
        // A step may land on the goal but never past it
        if (d >= 0.0 && next_v > d + EPSILON) || (d <= 0.0 && next_v < d - EPSILON) {
            culls.overshoot += 1;
            continue;
        }
        out.push(candidate);
    }
    out
}

enum Source {
    Goal(Option<StateId>),
    Expand {
        s: Vec<f64>,
        v: Vec<f64>,
        combos: MultiProduct<alloc::vec::IntoIter<f64>>,
    },
}

/// Lazy successor sequence of one state.
///
/// Yields only the goal when it is a single step away; otherwise integrates every
/// surviving acceleration combination, skipping results whose heuristic says the goal
/// can no longer be reached.
pub struct Neighbors<'a> {
    space: &'a mut KinematicSpace,
    goal: StateId,
    source: Source,
}

impl<'a> Neighbors<'a> {
    pub(crate) fn new(space: &'a mut KinematicSpace, node: StateId, goal: StateId) -> Self {
        let source = {
            let current = space.cache.get(node);
            let target = space.cache.get(goal);

            if is_goal_neighbor(current, target, &space.jerk) {
                Source::Goal(Some(goal))
            } else {
                let mut per_axis = Vec::with_capacity(current.dimensions());
                for (i, limits) in space.limits.iter().enumerate() {
                    per_axis.push(axis_accelerations(
                        limits,
                        space.jerk[i],
                        (current.s()[i], current.v()[i], current.a()[i]),
                        target.s()[i],
                        &mut space.culls,
                    ));
                }
                Source::Expand {
                    s: current.s().to_vec(),
                    v: current.v().to_vec(),
                    combos: per_axis
                        .into_iter()
                        .map(Vec::into_iter)
                        .multi_cartesian_product(),
                }
            }
        };

        Self {
            space,
            goal,
            source,
        }
    }
}

impl Iterator for Neighbors<'_> {
    type Item = StateId;

    fn next(&mut self) -> Option<StateId> {
        match &mut self.source {
            Source::Goal(goal) => goal.take(),
            Source::Expand { s, v, combos } => loop {
                let a = combos.next()?;
                let next_v: Vec<f64> = v.iter().zip(&a).map(|(v, a)| v + a).collect();
                let next_s: Vec<f64> = s.iter().zip(&next_v).map(|(s, v)| s + v).collect();

                let id = self.space.canonicalize(&next_s, &next_v, &a);
                if self.space.estimate_cost(id, self.goal).is_finite() {
                    return Some(id);
                }
                self.space.culls.unreachable += 1;
            },
        }
    }
}
