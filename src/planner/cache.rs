//! Flyweight cache of canonical motion states.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use super::state::{MotionState, StateId, StateKey};

/// Maps state keys to a single shared [`MotionState`] each.
///
/// States are stored in an arena and addressed by [`StateId`]; they live until the
/// cache is cleared.
#[derive(Debug, Clone)]
pub struct NodeCache {
    states: Vec<MotionState>,
    index: BTreeMap<StateKey, StateId>,
    precision: u8,
}

impl NodeCache {
    /// Create an empty cache rounding to `precision` decimal places.
    pub fn new(precision: u8) -> Self {
        Self {
            states: Vec::new(),
            index: BTreeMap::new(),
            precision,
        }
    }

    /// Return the canonical state for `(s, v, a)`, creating it on first reference.
    pub fn canonicalize(&mut self, s: &[f64], v: &[f64], a: &[f64]) -> StateId {
        let key = StateKey::new(s, v, a, self.precision);
        if let Some(&id) = self.index.get(&key) {
            return id;
        }

        let id = StateId(self.states.len() as u32);
        self.states.push(MotionState::from_key(key.clone()));
        self.index.insert(key, id);
        id
    }

    /// Look up an existing state without creating it.
    pub fn find(&self, s: &[f64], v: &[f64], a: &[f64]) -> Option<StateId> {
        self.index.get(&StateKey::new(s, v, a, self.precision)).copied()
    }

    /// Get a state by handle.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this cache (or was issued before a [`clear`](Self::clear)).
    #[inline]
    pub fn get(&self, id: StateId) -> &MotionState {
        &self.states[id.index()]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: StateId) -> &mut MotionState {
        &mut self.states[id.index()]
    }

    /// Number of cached states.
    #[inline]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Check if the cache is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Drop every state. Previously issued handles become invalid.
    pub fn clear(&mut self) {
        self.states.clear();
        self.index.clear();
    }
}
