use serde::{Deserialize, Serialize};

use super::Criterion;
use crate::models::Route;
use crate::objective::{OptimizationDirection, EPSILON};

/// Prefers early collections, rewarding those made exactly when the window
/// opens.
///
/// Score of a candidate: `bonus` if its new trip is collected at its earliest
/// time, minus the collection time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EarliestBonusCriterion {
    bonus: f64,
}

impl EarliestBonusCriterion {
    /// Creates the criterion.
    pub fn new(bonus: f64) -> Self {
        Self { bonus }
    }

    /// On-time bonus.
    pub fn bonus(&self) -> f64 {
        self.bonus
    }
}

impl Criterion for EarliestBonusCriterion {
    fn name(&self) -> &str {
        "earliest-bonus"
    }

    fn direction(&self) -> OptimizationDirection {
        OptimizationDirection::Maximization
    }

    fn scoring(&self, route: &Route) -> f64 {
        let Some(planned_trip) = route.last_planned_trip() else {
            return f64::NEG_INFINITY;
        };
        let collection = planned_trip.collection_time();
        let on_time = collection <= planned_trip.trip().earliest() + EPSILON;
        let bonus = if on_time { self.bonus } else { 0.0 };
        bonus - collection
    }
}
