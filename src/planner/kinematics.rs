//! Closed-form velocity-change kinematics in the planner's step model.
//!
//! One planner step applies an acceleration, then integrates velocity and position with
//! a unit time step: `v' = v + a'`, `s' = s + v'`. The functions here estimate, per
//! axis, how many such steps a bang-bang velocity change needs and how far it travels.

use libm::{ceil, fabs};

/// Tolerance for comparisons on rounded state components.
pub(crate) const EPSILON: f64 = 1e-9;

/// A velocity change executed at full acceleration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    /// Steps spent changing velocity.
    pub steps: f64,
    /// Signed distance travelled meanwhile.
    pub distance: f64,
}

impl Transition {
    /// No velocity change.
    pub const NONE: Self = Self {
        steps: 0.0,
        distance: 0.0,
    };

    fn then(self, next: Self) -> Self {
        Self {
            steps: self.steps + next.steps,
            distance: self.distance + next.distance,
        }
    }
}

/// Steps and distance to go from velocity `from` to `to` with at most `max_acceleration`
/// of velocity change per step.
///
/// A change that reverses direction is routed through zero velocity, since the two
/// halves brake and accelerate in opposite directions.
pub fn velocity_transition(from: f64, to: f64, max_acceleration: f64) -> Transition {
    if from * to >= 0.0 {
        leg(from, to, max_acceleration)
    } else {
        leg(from, 0.0, max_acceleration).then(leg(0.0, to, max_acceleration))
    }
}

/// Same-sign leg: `n = ceil(|dv| / a)` steps with a uniform velocity increment, each
/// step moving by its end velocity.
fn leg(from: f64, to: f64, max_acceleration: f64) -> Transition {
    let dv = to - from;
    if fabs(dv) <= EPSILON {
        return Transition::NONE;
    }
    let steps = ceil(fabs(dv) / max_acceleration - EPSILON).max(1.0);
    Transition {
        steps,
        distance: steps * (from + to) / 2.0 + dv / 2.0,
    }
}

/// Estimated steps for one axis to cover `delta` (goal position minus current position)
/// while changing velocity from `v` to `goal_v`.
///
/// A velocity change ends with the step that lands on the goal, and that step may also
/// travel up to one jerk step, so it is credited with `jerk` of distance.
///
/// Returns `f64::INFINITY` when the axis is inside one jerk step of its goal but moving
/// faster than that step could absorb.
pub fn axis_estimate(delta: f64, v: f64, goal_v: f64, max_acceleration: f64, jerk: f64) -> f64 {
    let remaining = fabs(delta);
    if remaining < jerk && fabs(v) > remaining + jerk + EPSILON {
        return f64::INFINITY;
    }

    let transition = velocity_transition(v, goal_v, max_acceleration);
    let mut along = if delta < 0.0 {
        -transition.distance
    } else {
        transition.distance
    };
    if transition.steps > 0.0 {
        along += jerk;
    }
    let cruise = remaining - along;
    if cruise <= EPSILON {
        return transition.steps;
    }

    // Rest-to-rest axes still have to move: assume at least one jerk step of speed
    let speed = fabs(v).max(fabs(goal_v)).max(jerk);
    transition.steps + cruise / speed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        fabs(a - b) < 1e-9
    }

    #[test]
    fn test_no_change() {
        assert_eq!(velocity_transition(2.0, 2.0, 5.0), Transition::NONE);
    }

    #[test]
    fn test_single_step_brake_moves_nothing() {
        // Braking from 1 to 0 in one step ends the step at rest
        let t = velocity_transition(-1.0, 0.0, 5.0);
        assert_eq!(t.steps, 1.0);
        assert!(close(t.distance, 0.0));
    }

    #[test]
    fn test_multi_step_acceleration() {
        // 0 -> 3 at 1 per step: velocities 1, 2, 3
        let t = velocity_transition(0.0, 3.0, 1.0);
        assert_eq!(t.steps, 3.0);
        assert!(close(t.distance, 6.0));
    }

    #[test]
    fn test_reversal_goes_through_zero() {
        // 2 -> 0 -> -2 at 1 per step: velocities 1, 0, -1, -2
        let t = velocity_transition(2.0, -2.0, 1.0);
        assert_eq!(t.steps, 4.0);
        assert!(close(t.distance, -2.0));
    }

    #[test]
    fn test_axis_estimate_short_brake() {
        // The braking step itself covers the last 0.1
        assert!(close(axis_estimate(-0.1, -1.0, 0.0, 5.0, 1.0), 1.0));
    }

    #[test]
    fn test_axis_estimate_credits_final_step() {
        // 1 -> 0 brakes in one step that may still travel one jerk step
        assert!(close(axis_estimate(4.0, 1.0, 0.0, 5.0, 1.0), 4.0));
        assert!(close(axis_estimate(1.0, 1.0, 0.0, 5.0, 1.0), 1.0));
        assert!(close(axis_estimate(-4.0, -1.0, 0.0, 5.0, 1.0), 4.0));
    }

    #[test]
    fn test_axis_estimate_rest_to_rest_uses_jerk_speed() {
        assert!(close(axis_estimate(3.0, 0.0, 0.0, 5.0, 1.0), 3.0));
        assert!(close(axis_estimate(-3.0, 0.0, 0.0, 5.0, 0.5), 6.0));
    }

    #[test]
    fn test_axis_estimate_at_goal() {
        assert_eq!(axis_estimate(0.0, 0.0, 0.0, 5.0, 1.0), 0.0);
    }

    #[test]
    fn test_axis_estimate_unreachable() {
        // Half a step away but moving at 3 per step
        assert!(axis_estimate(0.5, 3.0, 0.0, 5.0, 1.0).is_infinite());
        // Same speed but far away is fine
        assert!(axis_estimate(30.0, 3.0, 0.0, 5.0, 1.0).is_finite());
    }
}
