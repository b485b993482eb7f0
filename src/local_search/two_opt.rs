//! Intra-route segment reversal.
//!
//! # Algorithm
//!
//! For every segment `[i..=j]` of service stops that does not contain both
//! ends of a trip, reverse it. The reversal is kept when the route stays
//! feasible and its objective value strictly improves; otherwise it is
//! undone by reversing again. First improvement, one scan per route.
//!
//! # Complexity
//!
//! O(k³) per route and pass: O(k²) segments, each followed by an O(k) flush.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use rand::RngCore;
use tracing::trace;

use super::types::LocalSearchStrategy;
use crate::models::{Planning, Route};
use crate::objective::Objective;

/// Segment reversal.
#[derive(Debug, Clone, Copy, Default)]
pub struct TwoOpt;

impl TwoOpt {
    fn can_reverse(route: &Route, i: usize, j: usize) -> bool {
        !route
            .planned_trips()
            .iter()
            .any(|pt| pt.pickup() >= i && pt.delivery() <= j)
    }

    /// One scan over `route`. Returns `true` if any reversal was kept.
    pub fn improve_route(route: &mut Route, objective: &dyn Objective) -> bool {
        let direction = objective.direction();
        let mut value = objective.route_optimization(route);
        let mut changed = false;
        for i in 1..route.body_len() {
            for j in i + 1..route.body_len() {
                if !Self::can_reverse(route, i, j) {
                    continue;
                }
                route.reverse_stops(i, j);
                let candidate = objective.route_optimization(route);
                if route.feasible() && direction.is_better(candidate, value) {
                    trace!(i, j, from = value, to = candidate, "TwoOpt: reversal kept");
                    value = candidate;
                    changed = true;
                } else {
                    route.reverse_stops(i, j);
                }
            }
        }
        changed
    }
}

impl LocalSearchStrategy for TwoOpt {
    fn name(&self) -> &str {
        "two-opt"
    }

    fn apply(
        &self,
        planning: &mut Planning,
        objective: &dyn Objective,
        _rng: &mut dyn RngCore,
    ) -> bool {
        let mut changed = false;
        for route in planning.routes_mut() {
            changed |= Self::improve_route(route, objective);
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::check_route;
    use crate::objective::DialARideObjective;
    use crate::test_utils::{depot_vehicle, route_for, simple_trip};

    #[test]
    fn test_reverses_pickup_block() {
        let mut route = route_for(depot_vehicle("v", 0.0, 0.0, 0.0, 1000.0, 3));
        route.insert_planned_trip(simple_trip("a", (3.0, 0.0), (10.0, 0.0)), 0, 1);
        route.insert_planned_trip(simple_trip("b", (2.0, 0.0), (11.0, 0.0)), 1, 3);
        route.insert_planned_trip(simple_trip("c", (1.0, 0.0), (12.0, 0.0)), 2, 5);
        let positions: Vec<f64> = route.stops().iter().map(|s| s.position().x()).collect();
        assert_eq!(positions, vec![0.0, 3.0, 2.0, 1.0, 10.0, 11.0, 12.0]);
        assert!((route.distance() - 16.0).abs() < 1e-10);

        assert!(TwoOpt::improve_route(&mut route, &DialARideObjective));
        assert!((route.distance() - 12.0).abs() < 1e-10);
        assert!(check_route(&route, 0).is_empty());
    }

    #[test]
    fn test_segment_with_whole_trip_is_skipped() {
        let mut route = route_for(depot_vehicle("v", 0.0, 0.0, 0.0, 1000.0, 1));
        route.insert_planned_trip(simple_trip("t", (5.0, 0.0), (1.0, 0.0)), 0, 1);
        assert!(!TwoOpt::can_reverse(&route, 1, 2));
        assert!(!TwoOpt::improve_route(&mut route, &DialARideObjective));
    }
}
