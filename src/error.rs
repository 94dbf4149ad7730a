//! Error types for motion-search.
//!
//! Provides unified error handling across configuration and trajectory search.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all motion-search operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Trajectory search error
    Search(SearchError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// No axes configured
    NoAxes,
    /// More axes than the planner supports
    TooManyAxes(usize),
    /// Invalid max velocity (must be > 0)
    InvalidMaxVelocity {
        /// Axis index
        axis: usize,
        /// Offending value
        value: f64,
    },
    /// Invalid max acceleration (must be > 0)
    InvalidMaxAcceleration {
        /// Axis index
        axis: usize,
        /// Offending value
        value: f64,
    },
    /// Invalid minimum jerk (must satisfy 0 < min_jerk <= max_acceleration)
    InvalidJerk {
        /// Axis index
        axis: usize,
        /// Configured minimum jerk
        min_jerk: f64,
        /// Configured maximum acceleration
        max_acceleration: f64,
    },
    /// Rounding precision too large for the integer state key
    InvalidPrecision(u8),
    /// Invalid jerk scale (must be > 0)
    InvalidJerkScale(f64),
    /// Iteration budget must be at least one
    InvalidMaxIterations,
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Why a search ended without reaching its goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NoPathReason {
    /// Every reachable state was expanded.
    Exhausted,
    /// The iteration budget ran out.
    IterationLimit,
    /// The observer asked the search to stop.
    Cancelled,
}

/// Trajectory search errors.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    /// The search ended without dequeuing the goal
    NoPath {
        /// Why the search stopped
        reason: NoPathReason,
        /// Expansions performed
        iterations: usize,
        /// Edges examined
        nodes_examined: usize,
    },
    /// A state does not have one component per configured axis
    DimensionMismatch {
        /// Configured axis count
        expected: usize,
        /// Components supplied
        found: usize,
    },
    /// A state component is NaN or infinite
    NonFiniteState,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Search(e) => write!(f, "Search error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::NoAxes => write!(f, "At least one axis must be configured"),
            ConfigError::TooManyAxes(n) => {
                write!(f, "Too many axes: {} (max {})", n, crate::config::MAX_AXES)
            }
            ConfigError::InvalidMaxVelocity { axis, value } => {
                write!(f, "Invalid max velocity on axis {}: {}. Must be > 0", axis, value)
            }
            ConfigError::InvalidMaxAcceleration { axis, value } => {
                write!(f, "Invalid max acceleration on axis {}: {}. Must be > 0", axis, value)
            }
            ConfigError::InvalidJerk {
                axis,
                min_jerk,
                max_acceleration,
            } => write!(
                f,
                "Invalid min jerk on axis {}: {}. Must be > 0 and <= max acceleration ({})",
                axis, min_jerk, max_acceleration
            ),
            ConfigError::InvalidPrecision(p) => {
                write!(f, "Invalid precision: {} decimal places. Must be <= 9", p)
            }
            ConfigError::InvalidJerkScale(v) => write!(f, "Invalid jerk scale: {}. Must be > 0", v),
            ConfigError::InvalidMaxIterations => write!(f, "Max iterations must be > 0"),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for NoPathReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoPathReason::Exhausted => write!(f, "open set exhausted"),
            NoPathReason::IterationLimit => write!(f, "iteration limit reached"),
            NoPathReason::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::NoPath {
                reason,
                iterations,
                nodes_examined,
            } => write!(
                f,
                "No path found ({}) after {} iterations, {} nodes examined",
                reason, iterations, nodes_examined
            ),
            SearchError::DimensionMismatch { expected, found } => {
                write!(f, "Expected {} axis components, found {}", expected, found)
            }
            SearchError::NonFiniteState => write!(f, "State contains a non-finite component"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<SearchError> for Error {
    fn from(e: SearchError) -> Self {
        Error::Search(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for SearchError {}
