use super::{Objective, OptimizationDirection};
use crate::models::{PlannedTrip, Route};

/// Maximizes the direct distance of the served trips.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaxiSharingObjective;

impl Objective for TaxiSharingObjective {
    fn name(&self) -> &str {
        "taxi-sharing"
    }

    fn direction(&self) -> OptimizationDirection {
        OptimizationDirection::Maximization
    }

    fn planned_trip_optimization(&self, route: &Route, planned_trip: &PlannedTrip) -> f64 {
        planned_trip.trip().distance(route.surface())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{depot_vehicle, route_for, simple_trip};

    #[test]
    fn test_sums_direct_distances() {
        let mut route = route_for(depot_vehicle("v", 0.0, 0.0, 0.0, 1000.0, 2));
        route.insert_planned_trip(simple_trip("a", (1.0, 0.0), (4.0, 0.0)), 0, 1);
        route.insert_planned_trip(simple_trip("b", (2.0, 0.0), (2.0, 5.0)), 1, 3);
        let value = TaxiSharingObjective.route_optimization(&route);
        assert!((value - 8.0).abs() < 1e-10);
    }
}
