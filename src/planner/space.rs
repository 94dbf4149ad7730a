//! The jerk-bounded kinematic search space.

use alloc::vec::Vec;

use crate::config::{AxisLimits, PlannerConfig};
use crate::search::SearchDomain;

use super::cache::NodeCache;
use super::kinematics::axis_estimate;
use super::neighbors::{self, Neighbors};
use super::state::{HeuristicMemo, KinematicState, MotionState, StateId};

/// Candidates discarded during neighbor generation, per search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CullStats {
    /// Per-axis accelerations outside the acceleration bound.
    pub acceleration: usize,
    /// Per-axis accelerations that would leave the velocity bound.
    pub velocity: usize,
    /// Per-axis accelerations that would pass the goal.
    pub overshoot: usize,
    /// Integrated states whose heuristic marked the goal unreachable.
    pub unreachable: usize,
}

impl CullStats {
    /// Total culled candidates.
    pub fn total(&self) -> usize {
        self.acceleration + self.velocity + self.overshoot + self.unreachable
    }
}

/// Canonical motion states plus the rules that connect them.
///
/// Implements [`SearchDomain`] with [`StateId`] nodes: neighbors follow one-step jerk
/// bounded acceleration changes, each edge costs one step, and the heuristic sums
/// per-axis step estimates.
#[derive(Debug, Clone)]
pub struct KinematicSpace {
    pub(crate) limits: Vec<AxisLimits>,
    jerk_scale: f64,
    pub(crate) cache: NodeCache,
    pub(crate) jerk: Vec<f64>,
    generation: u32,
    pub(crate) culls: CullStats,
}

impl KinematicSpace {
    /// Create an empty space for the axes of `config`.
    ///
    /// Until the first [`prepare`](Self::prepare), every axis uses its `min_jerk`.
    pub fn new(config: &PlannerConfig) -> Self {
        let limits: Vec<AxisLimits> = config.axes.iter().cloned().collect();
        let jerk = limits.iter().map(|l| l.min_jerk).collect();
        Self {
            limits,
            jerk_scale: config.jerk_scale,
            cache: NodeCache::new(config.precision),
            jerk,
            generation: 0,
            culls: CullStats::default(),
        }
    }

    /// Number of axes.
    #[inline]
    pub fn dimensions(&self) -> usize {
        self.limits.len()
    }

    /// Per-axis limits.
    #[inline]
    pub fn limits(&self) -> &[AxisLimits] {
        &self.limits
    }

    /// Jerk allowance per axis for the current search.
    #[inline]
    pub fn jerk(&self) -> &[f64] {
        &self.jerk
    }

    /// Set up a search from `start` to `goal`.
    ///
    /// Recomputes the jerk allowance per axis from the travel distance, invalidates
    /// every memoized heuristic and resets the cull counters.
    pub fn prepare(&mut self, start: StateId, goal: StateId) {
        let jerk: Vec<f64> = {
            let from = self.cache.get(start).s();
            let to = self.cache.get(goal).s();
            self.limits
                .iter()
                .zip(from.iter().zip(to))
                .map(|(limits, (s, g))| limits.jerk_for_distance(g - s, self.jerk_scale))
                .collect()
        };
        self.jerk = jerk;
        self.generation = self.generation.wrapping_add(1);
        self.culls = CullStats::default();

        log::debug!(
            "prepare {} -> {}: jerk {:?}",
            self.cache.get(start).key(),
            self.cache.get(goal).key(),
            self.jerk
        );
    }

    /// Canonical handle of `(s, v, a)`.
    pub fn canonicalize(&mut self, s: &[f64], v: &[f64], a: &[f64]) -> StateId {
        self.cache.canonicalize(s, v, a)
    }

    /// Canonical handle of a caller-supplied state.
    pub fn canonical(&mut self, state: &KinematicState) -> StateId {
        self.cache.canonicalize(&state.s, &state.v, &state.a)
    }

    /// The canonical state behind `id`.
    #[inline]
    pub fn state(&self, id: StateId) -> &MotionState {
        self.cache.get(id)
    }

    /// The node cache.
    #[inline]
    pub fn cache(&self) -> &NodeCache {
        &self.cache
    }

    /// Drop every cached state. Previously issued handles become invalid.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Culls recorded since the last [`prepare`](Self::prepare).
    #[inline]
    pub fn cull_stats(&self) -> CullStats {
        self.culls
    }

    /// Check whether `goal` is a single step away from `node` under the current jerk.
    pub fn is_goal_neighbor(&self, node: StateId, goal: StateId) -> bool {
        neighbors::is_goal_neighbor(self.cache.get(node), self.cache.get(goal), &self.jerk)
    }

    /// Lazy successors of `node` when heading for `goal`.
    pub fn neighbors_of(&mut self, node: StateId, goal: StateId) -> Neighbors<'_> {
        Neighbors::new(self, node, goal)
    }

    /// Estimated steps from `node` to `goal`; `f64::INFINITY` when unreachable.
    ///
    /// Memoized on the node for the current goal and search.
    pub fn estimate_cost(&mut self, node: StateId, goal: StateId) -> f64 {
        let generation = self.generation;
        if let Some(memo) = self.cache.get(node).memo {
            if memo.goal == goal && memo.generation == generation {
                return memo.value;
            }
        }

        let value = self.heuristic(self.cache.get(node), self.cache.get(goal));
        self.cache.get_mut(node).memo = Some(HeuristicMemo {
            goal,
            generation,
            value,
        });
        value
    }

    fn heuristic(&self, node: &MotionState, goal: &MotionState) -> f64 {
        let mut total = 0.0;
        for (i, limits) in self.limits.iter().enumerate() {
            let h = axis_estimate(
                goal.s()[i] - node.s()[i],
                node.v()[i],
                goal.v()[i],
                limits.max_acceleration,
                self.jerk[i],
            );
            if h.is_infinite() {
                return f64::INFINITY;
            }
            total += h;
        }
        total
    }
}

impl SearchDomain for KinematicSpace {
    type Node = StateId;
    type Neighbors<'a> = Neighbors<'a>;

    fn neighbors(&mut self, node: StateId, goal: StateId) -> Neighbors<'_> {
        self.neighbors_of(node, goal)
    }

    fn cost(&self, _from: StateId, _to: StateId) -> f64 {
        1.0
    }

    fn estimate_cost(&mut self, node: StateId, goal: StateId) -> f64 {
        KinematicSpace::estimate_cost(self, node, goal)
    }

    fn culled(&self) -> usize {
        self.culls.total()
    }
}
