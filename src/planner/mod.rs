//! Jerk-bounded kinematic planning on top of the generic search engine.
//!
//! States are `(s, v, a)` triples per axis, canonicalized by rounding so that equal
//! states share one cache entry. A step applies a new acceleration that differs from
//! the current one by at most the per-axis jerk allowance, then integrates velocity and
//! position with a unit time step.

mod cache;
mod kinematics;
mod neighbors;
mod space;
mod state;
mod trajectory;

pub use cache::NodeCache;
pub use kinematics::{axis_estimate, velocity_transition, Transition};
pub use neighbors::{is_goal_neighbor, Neighbors};
pub use space::{CullStats, KinematicSpace};
pub use state::{KinematicState, MotionState, StateId, StateKey};
pub use trajectory::{Trajectory, TrajectoryPlanner};
