//! Per-search bookkeeping for graph nodes.

use alloc::vec::Vec;

/// Open/closed membership of a node during one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NodeStatus {
    /// Not reached by the current search.
    #[default]
    Unvisited,
    /// Discovered, waiting in the open set.
    Open,
    /// Fully expanded.
    Closed,
}

/// Search bookkeeping attached to one node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchNode<N> {
    /// Best known cost from the start.
    pub g: f64,
    /// `g` plus the heuristic estimate; the open-set key.
    pub f: f64,
    /// Predecessor on the best known path.
    pub came_from: Option<N>,
    /// Queue membership.
    pub status: NodeStatus,
}

impl<N> Default for SearchNode<N> {
    fn default() -> Self {
        Self {
            g: f64::INFINITY,
            f: f64::INFINITY,
            came_from: None,
            status: NodeStatus::Unvisited,
        }
    }
}

impl<N> SearchNode<N> {
    /// Check if the node sits in the open set.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.status == NodeStatus::Open
    }

    /// Check if the node has been expanded.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.status == NodeStatus::Closed
    }
}

#[derive(Debug, Clone)]
struct Entry<N> {
    generation: u32,
    node: SearchNode<N>,
}

/// Bookkeeping table indexed by node handle.
///
/// Each entry carries the generation it was written in. Starting a new search only bumps
/// the table's generation, so entries left behind by earlier searches read as unvisited
/// without touching them.
#[derive(Debug, Clone)]
pub struct NodeTable<N> {
    entries: Vec<Entry<N>>,
    generation: u32,
}

impl<N: Copy> Default for NodeTable<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Copy> NodeTable<N> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            generation: 0,
        }
    }

    /// Invalidate every entry and start a new search generation.
    pub fn begin_search(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Wrapped around: old stamps could collide with new ones
            self.entries.clear();
            self.generation = 1;
        }
    }

    /// Current search generation.
    #[inline]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Bookkeeping for `index` in the current search.
    pub fn get(&self, index: usize) -> SearchNode<N> {
        match self.entries.get(index) {
            Some(entry) if entry.generation == self.generation => entry.node,
            _ => SearchNode::default(),
        }
    }

    /// Mutable bookkeeping for `index`, reset first if it belongs to an earlier search.
    pub fn get_mut(&mut self, index: usize) -> &mut SearchNode<N> {
        if index >= self.entries.len() {
            self.entries.resize(
                index + 1,
                Entry {
                    generation: 0,
                    node: SearchNode::default(),
                },
            );
        }
        let generation = self.generation;
        let entry = &mut self.entries[index];
        if entry.generation != generation {
            entry.generation = generation;
            entry.node = SearchNode::default();
        }
        &mut entry.node
    }
}
