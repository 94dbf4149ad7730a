//! Unit tests for TOML configuration parsing.

use motion_search::config::{load_config, parse_config, PlannerConfig};
use motion_search::error::{ConfigError, Error};
use motion_search::TrajectoryPlanner;

const GANTRY: &str = r#"
max_iterations = 5000
precision = 2
jerk_scale = 50.0

[[axes]]
name = "x"
max_velocity = 10.0
max_acceleration = 5.0
min_jerk = 1.0

[[axes]]
name = "y"
max_velocity = 8.0
max_acceleration = 4.0
min_jerk = 0.5
"#;

/// Test parsing a full two-axis configuration.
#[test]
fn test_parse_gantry_config() {
    let config = parse_config(GANTRY).expect("Failed to parse TOML");

    assert_eq!(config.dimensions(), 2);
    assert_eq!(config.max_iterations, 5000);
    assert_eq!(config.precision, 2);
    assert_eq!(config.jerk_scale, 50.0);

    let y = config.axis("y").expect("Axis not found");
    assert_eq!(y.max_velocity, 8.0);
    assert_eq!(y.max_acceleration, 4.0);
    assert_eq!(y.min_jerk, 0.5);
}

/// Test that omitted search settings fall back to their defaults.
#[test]
fn test_parse_defaults() {
    let toml_str = r#"
[[axes]]
max_velocity = 10.0
max_acceleration = 5.0
min_jerk = 1.0
"#;

    let config: PlannerConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    assert_eq!(config.max_iterations, 10_000);
    assert_eq!(config.precision, 3);
    assert_eq!(config.jerk_scale, 100.0);
    assert_eq!(config.axes[0].name.as_str(), "");
}

/// Test that malformed TOML is reported as a parse error.
#[test]
fn test_parse_error() {
    let result = parse_config("[[axes]]\nmax_velocity = \"fast\"\n");
    assert!(matches!(result, Err(Error::Config(ConfigError::ParseError(_)))));
}

/// Test that parsing also validates.
#[test]
fn test_parse_rejects_invalid_limits() {
    let toml_str = r#"
[[axes]]
max_velocity = 10.0
max_acceleration = 2.0
min_jerk = 3.0
"#;

    assert!(matches!(
        parse_config(toml_str),
        Err(Error::Config(ConfigError::InvalidJerk { axis: 0, .. }))
    ));
}

/// Test the config loading workflow: file on disk to a working planner.
#[test]
fn test_load_config_from_file() {
    let path = std::env::temp_dir().join(format!("motion-search-{}.toml", std::process::id()));
    std::fs::write(&path, GANTRY).expect("Failed to write config");

    let loaded = load_config(&path);
    std::fs::remove_file(&path).ok();

    let config = loaded.expect("Failed to load config");
    let planner = TrajectoryPlanner::new(config).expect("Failed to build planner");
    assert_eq!(planner.dimensions(), 2);
    assert_eq!(planner.max_iterations(), 5000);
}

/// Test that a missing file is an I/O error.
#[test]
fn test_load_missing_file() {
    let result = load_config("/nonexistent/motion-search.toml");
    assert!(matches!(result, Err(Error::Config(ConfigError::IoError(_)))));
}
