//! Per-axis kinematic limits.

use heapless::String;
use serde::Deserialize;

/// Slack allowed when comparing rounded state components against a bound.
const TOLERANCE: f64 = 1e-9;

/// Dynamic limits for one controlled axis.
///
/// All quantities are expressed in planner units per discrete step: a velocity is the
/// position change over one step, an acceleration is the velocity change over one step.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AxisLimits {
    /// Human-readable axis name (max 32 chars).
    #[serde(default)]
    pub name: String<32>,

    /// Velocity bound, symmetric around zero.
    pub max_velocity: f64,

    /// Acceleration bound, symmetric around zero.
    pub max_acceleration: f64,

    /// Finest acceleration change per step the planner may be forced down to.
    pub min_jerk: f64,
}

impl AxisLimits {
    /// Create limits for an unnamed axis.
    pub fn new(max_velocity: f64, max_acceleration: f64, min_jerk: f64) -> Self {
        Self {
            name: String::new(),
            max_velocity,
            max_acceleration,
            min_jerk,
        }
    }

    /// Attach a name to the axis.
    ///
    /// Names longer than 32 characters are truncated.
    pub fn named(mut self, name: &str) -> Self {
        let mut s = String::new();
        for c in name.chars() {
            if s.push(c).is_err() {
                break;
            }
        }
        self.name = s;
        self
    }

    /// Check whether a velocity lies inside `[-max_velocity, max_velocity]`.
    #[inline]
    pub fn velocity_in_range(&self, v: f64) -> bool {
        libm::fabs(v) <= self.max_velocity + TOLERANCE
    }

    /// Check whether an acceleration lies inside `[-max_acceleration, max_acceleration]`.
    #[inline]
    pub fn acceleration_in_range(&self, a: f64) -> bool {
        libm::fabs(a) <= self.max_acceleration + TOLERANCE
    }

    /// Jerk allowance for a move of `distance` along this axis.
    ///
    /// Long moves get a coarser step (up to `max_acceleration`), short moves are pushed
    /// toward `min_jerk`.
    #[inline]
    pub fn jerk_for_distance(&self, distance: f64, jerk_scale: f64) -> f64 {
        (libm::fabs(distance) / jerk_scale).clamp(self.min_jerk, self.max_acceleration)
    }
}
