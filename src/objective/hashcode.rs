use serde::{Deserialize, Serialize};

use super::{Objective, OptimizationDirection, EPSILON};
use crate::models::{PlannedTrip, Route};

/// Maximizes ride distance, with a bonus for rides collected exactly at
/// their earliest time.
///
/// A ride only scores when it is feasible on its route.
///
/// # Examples
///
/// ```
/// use u_darp::objective::HashCodeObjective;
///
/// let objective = HashCodeObjective::new(25.0);
/// assert_eq!(objective.bonus(), 25.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HashCodeObjective {
    bonus: f64,
}

impl HashCodeObjective {
    /// Creates the objective with the given on-time bonus.
    pub fn new(bonus: f64) -> Self {
        Self { bonus }
    }

    /// On-time bonus.
    pub fn bonus(&self) -> f64 {
        self.bonus
    }
}

impl Default for HashCodeObjective {
    fn default() -> Self {
        Self::new(2.0)
    }
}

impl Objective for HashCodeObjective {
    fn name(&self) -> &str {
        "hashcode"
    }

    fn direction(&self) -> OptimizationDirection {
        OptimizationDirection::Maximization
    }

    fn planned_trip_optimization(&self, route: &Route, planned_trip: &PlannedTrip) -> f64 {
        if !planned_trip.feasible() {
            return 0.0;
        }
        let trip = planned_trip.trip();
        let mut value = trip.distance(route.surface());
        if planned_trip.collection_time() <= trip.earliest() + EPSILON {
            value += self.bonus;
        }
        value
    }
}
