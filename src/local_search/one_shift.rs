//! Intra-route adjacent stop swap.
//!
//! # Algorithm
//!
//! For every pair of adjacent service stops `(i, i+1)`, swap them unless a
//! trip collected at `i` is delivered at `i+1`. The swap is kept when the
//! route stays feasible and its objective value strictly improves; otherwise
//! it is undone by swapping back. First improvement, one scan per route.
//!
//! # Complexity
//!
//! O(k²) per route and pass: k swaps, each followed by an O(k) flush.

use rand::RngCore;
use tracing::trace;

use super::types::LocalSearchStrategy;
use crate::models::{Planning, Route};
use crate::objective::Objective;

/// Adjacent stop swap.
#[derive(Debug, Clone, Copy, Default)]
pub struct OneShift;

impl OneShift {
    fn can_swap(route: &Route, i: usize) -> bool {
        let (Some(first), Some(second)) = (route.stop(i), route.stop(i + 1)) else {
            return false;
        };
        !first.pickups().iter().any(|p| second.deliveries().contains(p))
    }

    /// One scan over `route`. Returns `true` if any swap was kept.
    pub fn improve_route(route: &mut Route, objective: &dyn Objective) -> bool {
        let direction = objective.direction();
        let mut value = objective.route_optimization(route);
        let mut changed = false;
        let mut i = 1;
        while i + 1 < route.body_len() {
            if Self::can_swap(route, i) {
                route.swap_stops(i);
                let candidate = objective.route_optimization(route);
                if route.feasible() && direction.is_better(candidate, value) {
                    trace!(stop = i, from = value, to = candidate, "OneShift: swap kept");
                    value = candidate;
                    changed = true;
                } else {
                    route.swap_stops(i);
                }
            }
            i += 1;
        }
        changed
    }
}

impl LocalSearchStrategy for OneShift {
    fn name(&self) -> &str {
        "one-shift"
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

    fn detour() -> Route {
        let mut r = route_for(depot_vehicle("v", 0.0, 0.0, 0.0, 1000.0, 2));
        r.insert_planned_trip(simple_trip("a", (5.0, 0.0), (6.0, 0.0)), 0, 1);
        r.insert_planned_trip(simple_trip("b", (1.0, 0.0), (7.0, 0.0)), 1, 3);
        r.finish();
        r
    }

    #[test]
    fn test_swap_removes_detour() {
        let mut route = detour();
        assert!((route.distance() - 22.0).abs() < 1e-10);
        assert!(OneShift::improve_route(&mut route, &DialARideObjective));
        assert!((route.distance() - 14.0).abs() < 1e-10);
        assert!(check_route(&route, 0).is_empty());
        let b = &route.planned_trips()[route.find_trip("b").expect("b")];
        assert_eq!(b.pickup(), 1);
    }

    #[test]
    fn test_never_separates_a_trip() {
        let mut route = route_for(depot_vehicle("v", 0.0, 0.0, 0.0, 1000.0, 1));
        // delivering first would be shorter, but the pair belongs to one trip
        route.insert_planned_trip(simple_trip("t", (5.0, 0.0), (1.0, 0.0)), 0, 1);
        route.finish();
        let before = route.clone();
        assert!(!OneShift::improve_route(&mut route, &DialARideObjective));
        assert_eq!(route, before);
    }

    #[test]
    fn test_rejected_swap_is_reverted() {
        let mut route = route_for(depot_vehicle("v", 0.0, 0.0, 0.0, 1000.0, 2));
        route.insert_planned_trip(simple_trip("a", (1.0, 0.0), (2.0, 0.0)), 0, 1);
        route.insert_planned_trip(simple_trip("b", (3.0, 0.0), (4.0, 0.0)), 2, 3);
        route.finish();
        let before = route.clone();
        assert!(!OneShift::improve_route(&mut route, &DialARideObjective));
        assert_eq!(route, before);
    }
}
