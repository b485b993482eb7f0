use super::Criterion;
use crate::models::Route;
use crate::objective::OptimizationDirection;

/// Prefers the candidate whose route ends earliest.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortestTimeCriterion;

impl Criterion for ShortestTimeCriterion {
    fn name(&self) -> &str {
        "shortest-time"
    }

    fn direction(&self) -> OptimizationDirection {
        OptimizationDirection::Minimization
    }

    fn scoring(&self, route: &Route) -> f64 {
        route.last_departure_time()
    }
}

/// Prefers the candidate with the shortest route.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortestDistanceCriterion;

impl Criterion for ShortestDistanceCriterion {
    fn name(&self) -> &str {
        "shortest-distance"
    }

    fn direction(&self) -> OptimizationDirection {
        OptimizationDirection::Minimization
    }

    fn scoring(&self, route: &Route) -> f64 {
        route.distance()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{depot_vehicle, route_for, windowed_trip};

    #[test]
    fn test_shortest_time_accounts_for_waiting() {
        let mut waiting = route_for(depot_vehicle("w", 0.0, 0.0, 0.0, 1000.0, 1));
        waiting.insert_planned_trip(windowed_trip("t", (1.0, 0.0), (2.0, 0.0), 50.0, 60.0), 0, 1);
        let mut direct = route_for(depot_vehicle("d", 0.0, 0.0, 0.0, 1000.0, 1));
        direct.insert_planned_trip(windowed_trip("t", (10.0, 0.0), (20.0, 0.0), 0.0, 60.0), 0, 1);
        assert!((ShortestTimeCriterion.scoring(&waiting) - 51.0).abs() < 1e-10);
        assert!((ShortestTimeCriterion.scoring(&direct) - 20.0).abs() < 1e-10);
        let best = ShortestTimeCriterion
            .best(vec![waiting, direct])
            .expect("non-empty");
        assert_eq!(best.vehicle().id(), "d");
    }
}
