//! Unit tests for configuration validation.

use motion_search::config::{validate_config, AxisLimits, PlannerConfig, MAX_AXES};
use motion_search::error::{ConfigError, Error};

fn axes(limits: &[AxisLimits]) -> PlannerConfig {
    PlannerConfig::from_axes(limits.iter().cloned()).expect("within axis limit")
}

/// Test that per-axis limits may differ.
#[test]
fn test_mixed_axes_valid() {
    let config = axes(&[
        AxisLimits::new(10.0, 5.0, 1.0).named("x"),
        AxisLimits::new(2.0, 0.5, 0.5).named("z"),
    ]);
    assert!(validate_config(&config).is_ok());
}

/// Test that the failing axis is identified by index.
#[test]
fn test_reports_failing_axis() {
    let config = axes(&[
        AxisLimits::new(10.0, 5.0, 1.0),
        AxisLimits::new(10.0, 0.0, 1.0),
    ]);
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidMaxAcceleration { axis: 1, .. }))
    ));
}

/// Test that NaN limits are rejected.
#[test]
fn test_nan_velocity_rejected() {
    let config = axes(&[AxisLimits::new(f64::NAN, 5.0, 1.0)]);
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidMaxVelocity { axis: 0, .. }))
    ));
}

/// Test jerk scale bounds.
#[test]
fn test_jerk_scale_must_be_positive() {
    let config = PlannerConfig::uniform(1, 10.0, 5.0, 1.0).unwrap().with_jerk_scale(0.0);
    assert_eq!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidJerkScale(0.0)))
    );
}

/// Test the axis count ceiling.
#[test]
fn test_too_many_axes() {
    let limits = vec![AxisLimits::new(1.0, 1.0, 1.0); MAX_AXES + 1];
    assert_eq!(
        PlannerConfig::from_axes(limits),
        Err(Error::Config(ConfigError::TooManyAxes(MAX_AXES + 1)))
    );
}

/// Test error messages name the problem.
#[test]
fn test_error_display() {
    let err = validate_config(&PlannerConfig::uniform(1, 10.0, 5.0, 6.0).unwrap()).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("min jerk"));
    assert!(msg.contains("axis 0"));
}
