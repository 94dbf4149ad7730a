//! Planner configuration - root configuration structure.

use heapless::Vec;
use serde::Deserialize;

use super::limits::AxisLimits;
use crate::error::{ConfigError, Error, Result};

/// Maximum number of axes a planner can control.
pub const MAX_AXES: usize = 8;

/// Root configuration structure from TOML.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlannerConfig {
    /// Per-axis limits, one entry per controlled axis.
    pub axes: Vec<AxisLimits, MAX_AXES>,

    /// Expansion budget for a single search.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// Decimal places kept when canonicalizing states.
    #[serde(default = "default_precision")]
    pub precision: u8,

    /// Travel distance that earns one unit of jerk allowance.
    #[serde(default = "default_jerk_scale")]
    pub jerk_scale: f64,
}

fn default_max_iterations() -> usize {
    10_000
}

fn default_precision() -> u8 {
    3
}

fn default_jerk_scale() -> f64 {
    100.0
}

impl PlannerConfig {
    /// Create a configuration with the given axes and default search settings.
    pub fn new(axes: Vec<AxisLimits, MAX_AXES>) -> Self {
        Self {
            axes,
            max_iterations: default_max_iterations(),
            precision: default_precision(),
            jerk_scale: default_jerk_scale(),
        }
    }

    /// Create a configuration from any sequence of axes.
    ///
    /// Fails with [`ConfigError::TooManyAxes`] when more than [`MAX_AXES`] are given.
    pub fn from_axes<I>(axes: I) -> Result<Self>
    where
        I: IntoIterator<Item = AxisLimits>,
    {
        let mut bounded = Vec::new();
        let mut count = 0;
        for axis in axes {
            count += 1;
            // Keep counting so the error reports the full size
            let _ = bounded.push(axis);
        }
        if count > MAX_AXES {
            return Err(Error::Config(ConfigError::TooManyAxes(count)));
        }
        Ok(Self::new(bounded))
    }

    /// Create a configuration of `dimensions` axes sharing the same limits.
    ///
    /// Fails with [`ConfigError::TooManyAxes`] when `dimensions` exceeds [`MAX_AXES`].
    pub fn uniform(
        dimensions: usize,
        max_velocity: f64,
        max_acceleration: f64,
        min_jerk: f64,
    ) -> Result<Self> {
        let axis = AxisLimits::new(max_velocity, max_acceleration, min_jerk);
        Self::from_axes(core::iter::repeat(axis).take(dimensions))
    }

    /// Set the iteration budget.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the canonicalization precision in decimal places.
    pub fn with_precision(mut self, precision: u8) -> Self {
        self.precision = precision;
        self
    }

    /// Set the jerk scale.
    pub fn with_jerk_scale(mut self, jerk_scale: f64) -> Self {
        self.jerk_scale = jerk_scale;
        self
    }

    /// Number of controlled axes.
    #[inline]
    pub fn dimensions(&self) -> usize {
        self.axes.len()
    }

    /// Get an axis by name.
    pub fn axis(&self, name: &str) -> Option<&AxisLimits> {
        self.axes.iter().find(|a| a.name.as_str() == name)
    }

    /// List all axis names.
    pub fn axis_names(&self) -> impl Iterator<Item = &str> {
        self.axes.iter().map(|a| a.name.as_str())
    }
}
