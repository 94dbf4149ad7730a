//! Generic best-first (A*) search kernel.
//!
//! The kernel knows nothing about motion: a [`SearchDomain`] supplies neighbors, edge
//! costs and the heuristic, and node handles are plain arena indices owned by the domain.
//! Bookkeeping for each search lives in the engine's [`NodeTable`], never on the domain's
//! nodes, so one domain can serve any number of searches.

use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;
use core::time::Duration;

use crate::error::{Error, NoPathReason, Result, SearchError};

use super::node::{NodeTable, SearchNode};
use super::queue::PriorityQueue;

/// A graph searched lazily by [`SearchEngine`].
pub trait SearchDomain {
    /// Handle of a node. Must map to a dense arena index.
    type Node: Copy + Eq + Into<usize> + fmt::Debug;

    /// Lazy neighbor sequence produced for one expansion.
    type Neighbors<'a>: Iterator<Item = Self::Node>
    where
        Self: 'a;

    /// Enumerate the successors of `node` when searching toward `goal`.
    fn neighbors(&mut self, node: Self::Node, goal: Self::Node) -> Self::Neighbors<'_>;

    /// Actual cost of the edge `from -> to`. Never negative.
    fn cost(&self, from: Self::Node, to: Self::Node) -> f64;

    /// Estimated remaining cost from `node` to `goal`.
    fn estimate_cost(&mut self, node: Self::Node, goal: Self::Node) -> f64;

    /// Running count of candidates the domain rejected before yielding them as neighbors.
    fn culled(&self) -> usize {
        0
    }
}

/// What happened to a neighbor during an expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NeighborOutcome {
    /// Already expanded; ignored.
    Closed,
    /// Reached before at equal or lower cost; culled.
    NotImproved,
    /// Already open, but this edge lowered its cost.
    Improved,
    /// Reached for the first time.
    Discovered,
}

/// Synchronous hooks invoked by the engine.
///
/// Every method has a default, so observers only override what they need. The unit type
/// `()` is the plain observer: it never cancels and treats a missing path as an error.
pub trait SearchObserver<D: SearchDomain> {
    /// Called once per expansion, before the goal test. Return `false` to cancel.
    fn on_current(&mut self, _domain: &D, _node: D::Node) -> bool {
        true
    }

    /// Called for every neighbor the domain produced.
    fn on_neighbor(&mut self, _domain: &D, _node: D::Node, _outcome: NeighborOutcome) {}

    /// Called after expanding `node` when the domain rejected `count` candidates that
    /// never became neighbors.
    fn on_culled(&mut self, _domain: &D, _node: D::Node, _count: usize) {}

    /// Called when the search ends without a path.
    ///
    /// Returning `Ok(())` lets the search return an empty path with its statistics.
    fn on_no_path(
        &mut self,
        _domain: &D,
        stats: &SearchStats<D::Node>,
        reason: NoPathReason,
    ) -> Result<()> {
        Err(Error::Search(SearchError::NoPath {
            reason,
            iterations: stats.iterations,
            nodes_examined: stats.nodes_examined,
        }))
    }
}

impl<D: SearchDomain> SearchObserver<D> for () {}

/// Observer that accepts searches ending without a path.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowNoPath;

impl<D: SearchDomain> SearchObserver<D> for AllowNoPath {
    fn on_no_path(&mut self, _domain: &D, _stats: &SearchStats<D::Node>, _reason: NoPathReason) -> Result<()> {
        Ok(())
    }
}

/// Open-set occupancy over one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OpenSetProfile {
    /// Largest number of queued entries at any point.
    pub peak: usize,
    /// Entries left in the queue when the search ended.
    pub final_len: usize,
    /// Total insertions, including re-pushes of improved nodes.
    pub pushed: usize,
}

/// Statistics for one search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchStats<N> {
    /// Nodes expanded.
    pub iterations: usize,
    /// Neighbor edges examined.
    pub nodes_examined: usize,
    /// Open nodes pushed again after their cost improved.
    pub reinsertions: usize,
    /// Candidates the domain rejected before they became neighbors.
    pub culled: usize,
    /// Wall-clock duration (only measured with the `std` feature).
    pub elapsed: Option<Duration>,
    /// Open-set occupancy.
    pub open_set: OpenSetProfile,
    /// Number of nodes on the returned path, start and goal included.
    pub path_length: usize,
    /// Start node of the search.
    pub start: N,
    /// Goal node of the search.
    pub goal: N,
}

impl<N> SearchStats<N> {
    fn new(start: N, goal: N) -> Self {
        Self {
            iterations: 0,
            nodes_examined: 0,
            reinsertions: 0,
            culled: 0,
            elapsed: None,
            open_set: OpenSetProfile::default(),
            path_length: 0,
            start,
            goal,
        }
    }
}

/// Outcome of [`SearchEngine::find_path`].
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult<N> {
    /// Nodes from start to goal inclusive; empty when no path was found.
    pub path: Vec<N>,
    /// Search statistics.
    pub stats: SearchStats<N>,
}

impl<N> SearchResult<N> {
    /// Check if a path was found.
    #[inline]
    pub fn is_found(&self) -> bool {
        !self.path.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
struct OpenEntry<N> {
    f: f64,
    node: N,
}

fn by_score<N>(a: &OpenEntry<N>, b: &OpenEntry<N>) -> Ordering {
    a.f.total_cmp(&b.f)
}

type OpenSet<N> = PriorityQueue<OpenEntry<N>, fn(&OpenEntry<N>, &OpenEntry<N>) -> Ordering>;

struct Stopwatch {
    #[cfg(feature = "std")]
    started: std::time::Instant,
}

impl Stopwatch {
    fn start() -> Self {
        Self {
            #[cfg(feature = "std")]
            started: std::time::Instant::now(),
        }
    }

    #[cfg(feature = "std")]
    fn elapsed(&self) -> Option<Duration> {
        Some(self.started.elapsed())
    }

    #[cfg(not(feature = "std"))]
    fn elapsed(&self) -> Option<Duration> {
        None
    }
}

/// Reusable A* kernel.
///
/// Holds the bookkeeping table, the open set and a neighbor buffer so repeated searches
/// reuse their allocations.
pub struct SearchEngine<N> {
    table: NodeTable<N>,
    open: OpenSet<N>,
    scratch: Vec<N>,
    max_iterations: usize,
}

impl<N> SearchEngine<N>
where
    N: Copy + Eq + Into<usize> + fmt::Debug,
{
    /// Create an engine that expands at most `max_iterations` nodes per search.
    pub fn new(max_iterations: usize) -> Self {
        let compare: fn(&OpenEntry<N>, &OpenEntry<N>) -> Ordering = by_score;
        Self {
            table: NodeTable::new(),
            open: PriorityQueue::new(compare),
            scratch: Vec::new(),
            max_iterations,
        }
    }

    /// Expansion budget per search.
    #[inline]
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Change the expansion budget.
    pub fn set_max_iterations(&mut self, max_iterations: usize) {
        self.max_iterations = max_iterations;
    }

    /// Bookkeeping recorded for `node` by the most recent search.
    pub fn node(&self, node: N) -> SearchNode<N> {
        self.table.get(node.into())
    }

    /// Search from `start` to `goal`.
    ///
    /// Returns the path with its statistics. When the goal is not reached, the observer's
    /// [`SearchObserver::on_no_path`] decides whether that is an error or an empty path.
    pub fn find_path<D, O>(
        &mut self,
        domain: &mut D,
        start: N,
        goal: N,
        observer: &mut O,
    ) -> Result<SearchResult<N>>
    where
        D: SearchDomain<Node = N>,
        O: SearchObserver<D>,
    {
        let stopwatch = Stopwatch::start();
        let mut stats = SearchStats::new(start, goal);

        self.table.begin_search();
        self.open.clear();

        let h = domain.estimate_cost(start, goal);
        {
            let node = self.table.get_mut(start.into());
            node.g = 0.0;
            node.f = h;
            node.status = super::NodeStatus::Open;
        }
        self.push(OpenEntry { f: h, node: start }, &mut stats);

        let reason = loop {
            if stats.iterations >= self.max_iterations {
                break NoPathReason::IterationLimit;
            }
            let Some(entry) = self.open.extract_min() else {
                break NoPathReason::Exhausted;
            };

            let current = entry.node;
            let record = self.table.get(current.into());
            if record.is_closed() || entry.f > record.f {
                // Superseded by a cheaper push of the same node
                continue;
            }
            stats.iterations += 1;
            log::trace!("expand {:?}: g={} f={}", current, record.g, record.f);

            if !observer.on_current(domain, current) {
                break NoPathReason::Cancelled;
            }

            if current == goal {
                let path = self.reconstruct(goal);
                stats.path_length = path.len();
                stats.open_set.final_len = self.open.len();
                stats.elapsed = stopwatch.elapsed();
                log::info!(
                    "path found: {} nodes, {} iterations, {} examined",
                    stats.path_length,
                    stats.iterations,
                    stats.nodes_examined
                );
                return Ok(SearchResult { path, stats });
            }

            self.table.get_mut(current.into()).status = super::NodeStatus::Closed;

            self.scratch.clear();
            let culled_before = domain.culled();
            self.scratch.extend(domain.neighbors(current, goal));
            let culled = domain.culled().saturating_sub(culled_before);
            if culled > 0 {
                stats.culled += culled;
                observer.on_culled(domain, current, culled);
            }

            for i in 0..self.scratch.len() {
                let neighbor = self.scratch[i];
                stats.nodes_examined += 1;

                let known = self.table.get(neighbor.into());
                if known.is_closed() {
                    observer.on_neighbor(domain, neighbor, NeighborOutcome::Closed);
                    continue;
                }

                let tentative = record.g + domain.cost(current, neighbor);
                if tentative >= known.g {
                    observer.on_neighbor(domain, neighbor, NeighborOutcome::NotImproved);
                    continue;
                }

                let f = tentative + domain.estimate_cost(neighbor, goal);
                let was_open = known.is_open();
                {
                    let node = self.table.get_mut(neighbor.into());
                    node.came_from = Some(current);
                    node.g = tentative;
                    node.f = f;
                    node.status = super::NodeStatus::Open;
                }
                self.push(OpenEntry { f, node: neighbor }, &mut stats);

                let outcome = if was_open {
                    stats.reinsertions += 1;
                    NeighborOutcome::Improved
                } else {
                    NeighborOutcome::Discovered
                };
                observer.on_neighbor(domain, neighbor, outcome);
            }
        };

        stats.open_set.final_len = self.open.len();
        stats.elapsed = stopwatch.elapsed();
        log::warn!(
            "no path from {:?} to {:?}: {} after {} iterations",
            start,
            goal,
            reason,
            stats.iterations
        );

        observer.on_no_path(domain, &stats, reason)?;
        Ok(SearchResult {
            path: Vec::new(),
            stats,
        })
    }

    fn push(&mut self, entry: OpenEntry<N>, stats: &mut SearchStats<N>) {
        self.open.insert(entry);
        stats.open_set.pushed += 1;
        stats.open_set.peak = stats.open_set.peak.max(self.open.len());
    }

    fn reconstruct(&self, goal: N) -> Vec<N> {
        let mut path = Vec::new();
        let mut cursor = Some(goal);
        while let Some(node) = cursor {
            path.push(node);
            cursor = self.table.get(node.into()).came_from;
        }
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    /// Integer line `0..len` with unit steps, optionally with blocked cells.
    struct Line {
        len: usize,
        blocked: Vec<usize>,
        rejected: usize,
    }

    impl Line {
        fn new(len: usize, blocked: Vec<usize>) -> Self {
            Self {
                len,
                blocked,
                rejected: 0,
            }
        }
    }

    impl SearchDomain for Line {
        type Node = usize;
        type Neighbors<'a> = alloc::vec::IntoIter<usize>;

        fn neighbors(&mut self, node: usize, _goal: usize) -> Self::Neighbors<'_> {
            let mut out = Vec::new();
            if node > 0 {
                out.push(node - 1);
            }
            if node + 1 < self.len {
                out.push(node + 1);
            }
            let before = out.len();
            out.retain(|n| !self.blocked.contains(n));
            self.rejected += before - out.len();
            out.into_iter()
        }

        fn cost(&self, _from: usize, _to: usize) -> f64 {
            1.0
        }

        fn estimate_cost(&mut self, node: usize, goal: usize) -> f64 {
            (node as f64 - goal as f64).abs()
        }

        fn culled(&self) -> usize {
            self.rejected
        }
    }

    #[derive(Default)]
    struct Recorder {
        expanded: Vec<usize>,
        outcomes: Vec<(usize, NeighborOutcome)>,
        culled: Vec<(usize, usize)>,
        stop_after: Option<usize>,
    }

    impl SearchObserver<Line> for Recorder {
        fn on_current(&mut self, _domain: &Line, node: usize) -> bool {
            self.expanded.push(node);
            self.stop_after.map_or(true, |n| self.expanded.len() < n)
        }

        fn on_neighbor(&mut self, _domain: &Line, node: usize, outcome: NeighborOutcome) {
            self.outcomes.push((node, outcome));
        }

        fn on_culled(&mut self, _domain: &Line, node: usize, count: usize) {
            self.culled.push((node, count));
        }

        fn on_no_path(&mut self, _domain: &Line, _stats: &SearchStats<usize>, _reason: NoPathReason) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_finds_straight_path() {
        let mut line = Line::new(10, vec![]);
        let mut engine = SearchEngine::new(100);

        let result = engine.find_path(&mut line, 2, 6, &mut ()).unwrap();

        assert_eq!(result.path, vec![2, 3, 4, 5, 6]);
        assert_eq!(result.stats.path_length, 5);
        assert_eq!(result.stats.iterations, 5);
        assert_eq!(engine.node(6).g, 4.0);
    }

    #[test]
    fn test_start_is_goal() {
        let mut line = Line::new(3, vec![]);
        let mut engine = SearchEngine::new(10);

        let result = engine.find_path(&mut line, 1, 1, &mut ()).unwrap();
        assert_eq!(result.path, vec![1]);
        assert_eq!(result.stats.iterations, 1);
    }

    #[test]
    fn test_exhausted_is_error_by_default() {
        let mut line = Line::new(10, vec![5]);
        let mut engine = SearchEngine::new(100);

        let err = engine.find_path(&mut line, 2, 8, &mut ()).unwrap_err();
        assert_eq!(
            err,
            Error::Search(SearchError::NoPath {
                reason: NoPathReason::Exhausted,
                iterations: 5,
                nodes_examined: 8,
            })
        );
    }

    #[test]
    fn test_exhausted_allowed_returns_empty_path() {
        let mut line = Line::new(10, vec![5]);
        let mut engine = SearchEngine::new(100);

        let result = engine.find_path(&mut line, 2, 8, &mut AllowNoPath).unwrap();
        assert!(!result.is_found());
        assert_eq!(result.stats.path_length, 0);
        assert_eq!(result.stats.open_set.final_len, 0);
    }

    #[test]
    fn test_iteration_limit() {
        let mut line = Line::new(100, vec![]);
        let mut engine = SearchEngine::new(3);

        let result = engine.find_path(&mut line, 0, 50, &mut AllowNoPath).unwrap();
        assert!(result.path.is_empty());
        assert_eq!(result.stats.iterations, 3);
    }

    #[test]
    fn test_observer_cancels() {
        let mut line = Line::new(10, vec![]);
        let mut engine = SearchEngine::new(100);
        let mut recorder = Recorder {
            stop_after: Some(2),
            ..Default::default()
        };

        let result = engine.find_path(&mut line, 0, 9, &mut recorder).unwrap();
        assert!(result.path.is_empty());
        assert_eq!(recorder.expanded, vec![0, 1]);
    }

    #[test]
    fn test_neighbor_outcomes_reported() {
        let mut line = Line::new(10, vec![]);
        let mut engine = SearchEngine::new(100);
        let mut recorder = Recorder::default();

        engine.find_path(&mut line, 3, 5, &mut recorder).unwrap();

        assert!(recorder.outcomes.contains(&(4, NeighborOutcome::Discovered)));
        // Expanding 4 sees 3 again, which is closed by then
        assert!(recorder.outcomes.contains(&(3, NeighborOutcome::Closed)));
    }

    #[test]
    fn test_culled_candidates_reported() {
        let mut line = Line::new(10, vec![5]);
        let mut engine = SearchEngine::new(100);
        let mut recorder = Recorder::default();

        let result = engine.find_path(&mut line, 2, 8, &mut recorder).unwrap();
        assert!(!result.is_found());
        // Only expanding 4 runs into the blocked cell
        assert_eq!(recorder.culled, vec![(4, 1)]);
        assert_eq!(result.stats.culled, 1);
    }

    #[test]
    fn test_bookkeeping_does_not_leak_between_searches() {
        let mut line = Line::new(10, vec![]);
        let mut engine = SearchEngine::new(100);

        let first = engine.find_path(&mut line, 0, 9, &mut ()).unwrap();
        let second = engine.find_path(&mut line, 9, 0, &mut ()).unwrap();

        assert_eq!(first.path.len(), 10);
        assert_eq!(second.path.len(), 10);
        assert_eq!(second.path.first(), Some(&9));
        assert_eq!(engine.node(0).g, 9.0);
    }
}
