//! Trajectory planner: the A* engine driving a kinematic space.

use alloc::vec::Vec;

use crate::config::{validate_config, PlannerConfig};
use crate::error::Result;
use crate::search::{SearchEngine, SearchNode, SearchObserver, SearchStats};

use super::neighbors::Neighbors;
use super::space::{CullStats, KinematicSpace};
use super::state::{KinematicState, MotionState, StateId};

/// A planned sequence of states from start to goal inclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    ids: Vec<StateId>,
    states: Vec<KinematicState>,
    /// Search statistics.
    pub stats: SearchStats<StateId>,
    /// Candidates culled while searching.
    pub culls: CullStats,
}

impl Trajectory {
    /// Canonical handles along the path.
    #[inline]
    pub fn ids(&self) -> &[StateId] {
        &self.ids
    }

    /// States along the path.
    #[inline]
    pub fn states(&self) -> &[KinematicState] {
        &self.states
    }

    /// Commanded positions, one per step.
    pub fn positions(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.states.iter().map(|state| state.s.as_slice())
    }

    /// Velocities, one per step.
    pub fn velocities(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.states.iter().map(|state| state.v.as_slice())
    }

    /// Number of states on the path.
    #[inline]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Check if no path was found.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Number of transitions on the path.
    #[inline]
    pub fn steps(&self) -> usize {
        self.states.len().saturating_sub(1)
    }
}

/// Plans jerk-bounded multi-axis trajectories.
///
/// Owns its node cache and search bookkeeping, so one planner serves one thread;
/// create a planner per worker for concurrent planning.
///
/// # Example
///
/// ```rust
/// use motion_search::{KinematicState, PlannerConfig, TrajectoryPlanner};
///
/// let config = PlannerConfig::uniform(1, 10.0, 5.0, 1.0)?;
/// let mut planner = TrajectoryPlanner::new(config)?;
///
/// let path = planner.find_path(&KinematicState::at_rest(&[0.0]), &KinematicState::at_rest(&[3.0]))?;
/// assert_eq!(path.positions().last(), Some(&[3.0][..]));
/// # Ok::<(), motion_search::Error>(())
/// ```
pub struct TrajectoryPlanner {
    engine: SearchEngine<StateId>,
    space: KinematicSpace,
}

impl TrajectoryPlanner {
    /// Create a planner after validating `config`.
    pub fn new(config: PlannerConfig) -> Result<Self> {
        validate_config(&config)?;
        log::debug!(
            "planner: {} axes, {} iterations, precision {}",
            config.dimensions(),
            config.max_iterations,
            config.precision
        );
        Ok(Self {
            engine: SearchEngine::new(config.max_iterations),
            space: KinematicSpace::new(&config),
        })
    }

    /// Number of axes.
    #[inline]
    pub fn dimensions(&self) -> usize {
        self.space.dimensions()
    }

    /// Expansion budget per search.
    #[inline]
    pub fn max_iterations(&self) -> usize {
        self.engine.max_iterations()
    }

    /// Change the expansion budget.
    pub fn set_max_iterations(&mut self, max_iterations: usize) {
        self.engine.set_max_iterations(max_iterations);
    }

    /// Plan from `start` to `goal`, treating a missing path as an error.
    pub fn find_path(&mut self, start: &KinematicState, goal: &KinematicState) -> Result<Trajectory> {
        self.find_path_with(start, goal, &mut ())
    }

    /// Plan from `start` to `goal`, reporting progress to `observer`.
    ///
    /// Both states are checked for axis count and finiteness, canonicalized, and the
    /// per-axis jerk allowance is derived from the distance between them.
    pub fn find_path_with<O>(
        &mut self,
        start: &KinematicState,
        goal: &KinematicState,
        observer: &mut O,
    ) -> Result<Trajectory>
    where
        O: SearchObserver<KinematicSpace>,
    {
        let start = self.canonicalize(start)?;
        let goal = self.canonicalize(goal)?;
        self.space.prepare(start, goal);

        let result = self.engine.find_path(&mut self.space, start, goal, observer)?;
        let culls = self.space.cull_stats();
        log::debug!(
            "culled {} for acceleration, {} for velocity, {} for overshoot, {} unreachable",
            culls.acceleration,
            culls.velocity,
            culls.overshoot,
            culls.unreachable
        );

        let states = result
            .path
            .iter()
            .map(|&id| self.space.state(id).to_kinematic())
            .collect();
        Ok(Trajectory {
            ids: result.path,
            states,
            stats: result.stats,
            culls,
        })
    }

    /// Canonical handle of `state`, after checking it against the configured axes.
    pub fn canonicalize(&mut self, state: &KinematicState) -> Result<StateId> {
        state.check(self.space.dimensions())?;
        Ok(self.space.canonical(state))
    }

    /// The canonical state behind `id`.
    #[inline]
    pub fn state(&self, id: StateId) -> &MotionState {
        self.space.state(id)
    }

    /// Check whether `goal` is a single step away from `node`.
    pub fn is_goal_neighbor(&self, node: StateId, goal: StateId) -> bool {
        self.space.is_goal_neighbor(node, goal)
    }

    /// Lazy successors of `node` when heading for `goal`.
    pub fn neighbors_of(&mut self, node: StateId, goal: StateId) -> Neighbors<'_> {
        self.space.neighbors_of(node, goal)
    }

    /// Estimated steps from `node` to `goal`.
    pub fn estimate_cost(&mut self, node: StateId, goal: StateId) -> f64 {
        self.space.estimate_cost(node, goal)
    }

    /// Search bookkeeping recorded for `id` by the most recent search.
    pub fn search_node(&self, id: StateId) -> SearchNode<StateId> {
        self.engine.node(id)
    }

    /// Number of canonical states cached so far.
    #[inline]
    pub fn cache_len(&self) -> usize {
        self.space.cache().len()
    }

    /// Drop every cached state. Previously issued handles become invalid.
    pub fn clear_cache(&mut self) {
        self.space.clear_cache();
    }

    /// The underlying search space.
    #[inline]
    pub fn space(&self) -> &KinematicSpace {
        &self.space
    }

    /// Mutable access to the underlying search space.
    #[inline]
    pub fn space_mut(&mut self) -> &mut KinematicSpace {
        &mut self.space
    }
}
