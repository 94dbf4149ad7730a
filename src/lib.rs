//! # motion-search
//!
//! Jerk-bounded multi-axis trajectory search with a generic A* kernel.
//!
//! ## Features
//!
//! - **Generic search kernel**: [`SearchEngine`] runs A* over any [`SearchDomain`]
//! - **Kinematic planning**: [`TrajectoryPlanner`] finds step sequences that respect
//!   per-axis velocity, acceleration and jerk limits
//! - **Canonical states**: states are rounded to a fixed precision and shared through a
//!   node cache, so equal states are one search node
//! - **Configuration-driven**: axis limits and search settings load from TOML files
//! - **no_std compatible**: the core works with only an allocator
//!
//! ## Quick Start
//!
//! ```rust
//! use motion_search::{KinematicState, PlannerConfig, TrajectoryPlanner};
//!
//! // Two axes, 10 units/step max velocity, 5 units/step² max acceleration
//! let config = PlannerConfig::uniform(2, 10.0, 5.0, 1.0)?;
//! let mut planner = TrajectoryPlanner::new(config)?;
//!
//! let start = KinematicState::at_rest(&[0.0, 0.0]);
//! let goal = KinematicState::at_rest(&[3.0, -2.0]);
//! let path = planner.find_path(&start, &goal)?;
//!
//! for position in path.positions() {
//!     // Command the axes here
//!     let _ = position;
//! }
//! # Ok::<(), motion_search::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables TOML file loading, search timing and `std::error::Error`
//! - `alloc`: Heap allocation for no_std targets with an allocator
//! - `defmt`: Enables defmt formatting for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

extern crate alloc;

// Core modules
pub mod config;
pub mod error;
pub mod planner;
pub mod search;

// Re-exports for ergonomic API
pub use config::{validate_config, AxisLimits, PlannerConfig};
pub use error::{Error, Result};
pub use planner::{KinematicState, MotionState, StateId, Trajectory, TrajectoryPlanner};
pub use search::{AllowNoPath, SearchDomain, SearchEngine, SearchObserver, SearchStats};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};
