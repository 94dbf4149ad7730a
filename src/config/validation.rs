//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::{AxisLimits, PlannerConfig};

/// Largest precision whose scaled coordinates still fit comfortably in an `i64` key.
pub const MAX_PRECISION: u8 = 9;

/// Validate a planner configuration.
///
/// Checks:
/// - At least one axis is configured
/// - Velocity and acceleration limits are positive
/// - Minimum jerk is positive and does not exceed the acceleration limit
/// - Precision, jerk scale and iteration budget are usable
pub fn validate_config(config: &PlannerConfig) -> Result<()> {
    if config.axes.is_empty() {
        return Err(Error::Config(ConfigError::NoAxes));
    }

    for (index, axis) in config.axes.iter().enumerate() {
        validate_axis(index, axis)?;
    }

    if config.precision > MAX_PRECISION {
        return Err(Error::Config(ConfigError::InvalidPrecision(config.precision)));
    }

    if !(config.jerk_scale > 0.0) || !config.jerk_scale.is_finite() {
        return Err(Error::Config(ConfigError::InvalidJerkScale(config.jerk_scale)));
    }

    if config.max_iterations == 0 {
        return Err(Error::Config(ConfigError::InvalidMaxIterations));
    }

    Ok(())
}

fn validate_axis(axis: usize, limits: &AxisLimits) -> Result<()> {
    // Written as negations so NaN is rejected too
    if !(limits.max_velocity > 0.0) {
        return Err(Error::Config(ConfigError::InvalidMaxVelocity {
            axis,
            value: limits.max_velocity,
        }));
    }

    if !(limits.max_acceleration > 0.0) {
        return Err(Error::Config(ConfigError::InvalidMaxAcceleration {
            axis,
            value: limits.max_acceleration,
        }));
    }

    if !(limits.min_jerk > 0.0) || limits.min_jerk > limits.max_acceleration {
        return Err(Error::Config(ConfigError::InvalidJerk {
            axis,
            min_jerk: limits.min_jerk,
            max_acceleration: limits.max_acceleration,
        }));
    }

    Ok(())
}
