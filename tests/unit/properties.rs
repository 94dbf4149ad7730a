//! Property tests for the queue, the node cache and planned paths.

use motion_search::planner::NodeCache;
use motion_search::search::PriorityQueue;
use motion_search::{KinematicState, PlannerConfig, TrajectoryPlanner};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Repeated extraction yields values in non-decreasing order.
    #[test]
    fn prop_queue_extracts_in_order(values in prop::collection::vec(-1000i32..1000, 0..64)) {
        let mut queue = PriorityQueue::natural();
        queue.extend(values.iter().copied());

        let mut extracted = Vec::with_capacity(values.len());
        while let Some(value) = queue.extract_min() {
            extracted.push(value);
        }

        let mut sorted = values.clone();
        sorted.sort();
        prop_assert_eq!(extracted, sorted);
        prop_assert!(queue.extract_min().is_none());
    }

    /// Canonicalizing the same rounded inputs always returns the same handle.
    #[test]
    fn prop_canonicalize_is_idempotent(
        s in -1000.0f64..1000.0,
        v in -10.0f64..10.0,
        a in -5.0f64..5.0,
    ) {
        let mut cache = NodeCache::new(3);
        let first = cache.canonicalize(&[s], &[v], &[a]);

        let stored = cache.get(first).to_kinematic();
        let again = cache.canonicalize(&stored.s, &stored.v, &stored.a);

        prop_assert_eq!(first, again);
        prop_assert_eq!(cache.canonicalize(&[s], &[v], &[a]), first);
        prop_assert_eq!(cache.len(), 1);
    }

    /// Every state on a planned single-axis path respects the limits, ends on the goal
    /// and never moves away from it.
    #[test]
    fn prop_single_axis_paths(distance in -25.0f64..25.0) {
        let config = PlannerConfig::uniform(1, 3.0, 2.0, 1.0).unwrap();
        let mut planner = TrajectoryPlanner::new(config).unwrap();

        let path = planner
            .find_path(&KinematicState::at_rest(&[0.0]), &KinematicState::at_rest(&[distance]))
            .unwrap();

        for state in path.states() {
            prop_assert!(state.v[0].abs() <= 3.0 + 1e-9);
            prop_assert!(state.a[0].abs() <= 2.0 + 1e-9);
            prop_assert!(state.v[0] * distance >= 0.0);
        }
        let end = path.positions().last().unwrap()[0];
        prop_assert!((end - distance).abs() <= 5e-4);
    }

    /// Two-axis paths stay inside the limits on both axes.
    #[test]
    fn prop_two_axis_paths_respect_limits(x in -10.0f64..10.0, y in -10.0f64..10.0) {
        let config = PlannerConfig::uniform(2, 3.0, 2.0, 1.0).unwrap();
        let mut planner = TrajectoryPlanner::new(config).unwrap();

        let path = planner
            .find_path(&KinematicState::at_rest(&[0.0, 0.0]), &KinematicState::at_rest(&[x, y]))
            .unwrap();

        prop_assert!(!path.is_empty());
        for state in path.states() {
            for axis in 0..2 {
                prop_assert!(state.v[axis].abs() <= 3.0 + 1e-9);
                prop_assert!(state.a[axis].abs() <= 2.0 + 1e-9);
            }
        }
    }
}
