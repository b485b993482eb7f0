use super::{Objective, OptimizationDirection};
use crate::models::{PlannedTrip, Route};

/// Minimizes the total travelled distance.
///
/// Each stop contributes the length of the leg arriving at it.
#[derive(Debug, Clone, Copy, Default)]
pub struct DialARideObjective;

impl Objective for DialARideObjective {
    fn name(&self) -> &str {
        "dial-a-ride"
    }

    fn direction(&self) -> OptimizationDirection {
        OptimizationDirection::Minimization
    }

    fn planned_trip_optimization(&self, _route: &Route, _planned_trip: &PlannedTrip) -> f64 {
        0.0
    }

    fn stop_optimization(&self, route: &Route, index: usize) -> f64 {
        route.leg_distance(index)
    }
}
