//! Kinematic states and their canonical identities.

use alloc::vec::Vec;
use core::fmt;

use crate::error::{Error, Result, SearchError};

/// A kinematic triple supplied by callers: position, velocity and acceleration per axis.
#[derive(Debug, Clone, PartialEq)]
pub struct KinematicState {
    /// Position per axis.
    pub s: Vec<f64>,
    /// Velocity per axis.
    pub v: Vec<f64>,
    /// Acceleration per axis.
    pub a: Vec<f64>,
}

impl KinematicState {
    /// Create a state from its three component vectors.
    pub fn new(s: Vec<f64>, v: Vec<f64>, a: Vec<f64>) -> Self {
        Self { s, v, a }
    }

    /// A motionless state at `position`.
    pub fn at_rest(position: &[f64]) -> Self {
        let zeros = alloc::vec![0.0; position.len()];
        Self {
            s: position.to_vec(),
            v: zeros.clone(),
            a: zeros,
        }
    }

    /// Number of axes described by the position vector.
    #[inline]
    pub fn dimensions(&self) -> usize {
        self.s.len()
    }

    /// Check that every component vector has `dimensions` finite entries.
    pub fn check(&self, dimensions: usize) -> Result<()> {
        for component in [&self.s, &self.v, &self.a] {
            if component.len() != dimensions {
                return Err(Error::Search(SearchError::DimensionMismatch {
                    expected: dimensions,
                    found: component.len(),
                }));
            }
            if component.iter().any(|x| !x.is_finite()) {
                return Err(Error::Search(SearchError::NonFiniteState));
            }
        }
        Ok(())
    }
}

/// Handle of a canonical state inside a planner's node cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StateId(pub(crate) u32);

impl StateId {
    /// Position of the state in the cache arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<StateId> for usize {
    fn from(id: StateId) -> Self {
        id.index()
    }
}

/// Canonical identity of a state: every component rounded to a fixed number of
/// decimal places and stored as a scaled integer.
///
/// Two states with equal keys are the same state.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateKey {
    scaled: Vec<i64>,
    precision: u8,
}

impl StateKey {
    /// Build the key of `(s, v, a)` at `precision` decimal places.
    pub fn new(s: &[f64], v: &[f64], a: &[f64], precision: u8) -> Self {
        let scale = scale(precision);
        let scaled = s
            .iter()
            .chain(v)
            .chain(a)
            .map(|x| libm::round(x * scale) as i64)
            .collect();
        Self { scaled, precision }
    }

    /// Decimal places kept by this key.
    #[inline]
    pub fn precision(&self) -> u8 {
        self.precision
    }

    /// Rounded component values, in `s`, `v`, `a` order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        let scale = scale(self.precision);
        self.scaled.iter().map(move |&n| n as f64 / scale)
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dims = self.scaled.len() / 3;
        let precision = self.precision as usize;
        for (i, value) in self.values().enumerate() {
            if i > 0 {
                let sep = if i % dims.max(1) == 0 { '|' } else { ',' };
                write!(f, "{}", sep)?;
            }
            write!(f, "{:.*}", precision, value)?;
        }
        Ok(())
    }
}

#[inline]
pub(crate) fn scale(precision: u8) -> f64 {
    libm::pow(10.0, precision as f64)
}

/// Heuristic value cached on a state for one (goal, search generation) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct HeuristicMemo {
    pub goal: StateId,
    pub generation: u32,
    pub value: f64,
}

/// A canonical kinematic state, owned by a planner's node cache.
///
/// Components are stored already rounded, so they always agree with [`MotionState::key`].
#[derive(Debug, Clone)]
pub struct MotionState {
    s: Vec<f64>,
    v: Vec<f64>,
    a: Vec<f64>,
    key: StateKey,
    pub(crate) memo: Option<HeuristicMemo>,
}

impl MotionState {
    pub(crate) fn from_key(key: StateKey) -> Self {
        let dims = key.scaled.len() / 3;
        let values: Vec<f64> = key.values().collect();
        Self {
            s: values[..dims].to_vec(),
            v: values[dims..2 * dims].to_vec(),
            a: values[2 * dims..].to_vec(),
            key,
            memo: None,
        }
    }

    /// Position per axis.
    #[inline]
    pub fn s(&self) -> &[f64] {
        &self.s
    }

    /// Velocity per axis.
    #[inline]
    pub fn v(&self) -> &[f64] {
        &self.v
    }

    /// Acceleration per axis.
    #[inline]
    pub fn a(&self) -> &[f64] {
        &self.a
    }

    /// Canonical identity.
    #[inline]
    pub fn key(&self) -> &StateKey {
        &self.key
    }

    /// Number of axes.
    #[inline]
    pub fn dimensions(&self) -> usize {
        self.s.len()
    }

    /// Copy the components out into a plain [`KinematicState`].
    pub fn to_kinematic(&self) -> KinematicState {
        KinematicState::new(self.s.clone(), self.v.clone(), self.a.clone())
    }
}
