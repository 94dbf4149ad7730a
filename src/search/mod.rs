//! Search module for motion-search.
//!
//! Provides the comparator-ordered priority queue, per-search node bookkeeping and the
//! generic best-first search kernel.

mod engine;
mod node;
mod queue;

pub use engine::{
    AllowNoPath, NeighborOutcome, OpenSetProfile, SearchDomain, SearchEngine, SearchObserver,
    SearchResult, SearchStats,
};
pub use node::{NodeStatus, NodeTable, SearchNode};
pub use queue::PriorityQueue;
