//! Configuration module for motion-search.
//!
//! Provides types for loading and validating per-axis limits and search settings
//! from TOML files (with `std` feature) or values built in code.

mod limits;
#[cfg(feature = "std")]
mod loader;
mod planner;
mod validation;

pub use limits::AxisLimits;
pub use planner::{PlannerConfig, MAX_AXES};
pub use validation::{validate_config, MAX_PRECISION};

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};
