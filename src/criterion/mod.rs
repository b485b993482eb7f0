//! Criteria: ranking of insertion candidates during construction.
//!
//! A [`Criterion`] scores a candidate route (a route with one more trip
//! spliced in, the new one being its last planned trip) and selects the best
//! candidates under its [`OptimizationDirection`]. Unlike an
//! [`Objective`](crate::objective::Objective), it never compares whole
//! solutions.

mod earliest_bonus;
mod shortest;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::Route;
use crate::objective::OptimizationDirection;

pub use earliest_bonus::EarliestBonusCriterion;
pub use shortest::{ShortestDistanceCriterion, ShortestTimeCriterion};

/// Scoring rule for insertion candidates.
pub trait Criterion: fmt::Debug + Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Whether higher or lower scores are better.
    fn direction(&self) -> OptimizationDirection;

    /// Score of a candidate route.
    fn scoring(&self, route: &Route) -> f64;

    /// Candidates ordered best first. Ties keep their input order; NaN
    /// scores go last.
    fn sorted(&self, routes: Vec<Route>) -> Vec<Route> {
        let direction = self.direction();
        let mut scored: Vec<(f64, Route)> = routes
            .into_iter()
            .map(|r| (rank_key(direction, self.scoring(&r)), r))
            .collect();
        scored.sort_by(|a, b| a.0.total_cmp(&b.0));
        scored.into_iter().map(|(_, r)| r).collect()
    }

    /// The best candidate, the first one on ties.
    fn best(&self, routes: Vec<Route>) -> Option<Route> {
        self.nbest(1, routes).into_iter().next()
    }

    /// The `n` best candidates, best first.
    fn nbest(&self, n: usize, routes: Vec<Route>) -> Vec<Route> {
        let mut sorted = self.sorted(routes);
        sorted.truncate(n);
        sorted
    }
}

/// Maps a score to a key where smaller is better.
fn rank_key(direction: OptimizationDirection, score: f64) -> f64 {
    if score.is_nan() {
        return f64::INFINITY;
    }
    match direction {
        OptimizationDirection::Minimization => score,
        OptimizationDirection::Maximization => -score,
    }
}

/// Serializable selector for the built-in criteria.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum CriterionKind {
    /// [`ShortestTimeCriterion`].
    #[default]
    ShortestTime,
    /// [`ShortestDistanceCriterion`].
    ShortestDistance,
    /// [`EarliestBonusCriterion`] with the given bonus.
    EarliestBonus {
        /// On-time bonus.
        bonus: f64,
    },
}

impl CriterionKind {
    /// Instantiates the criterion.
    pub fn build(self) -> Box<dyn Criterion> {
        match self {
            CriterionKind::ShortestTime => Box::new(ShortestTimeCriterion),
            CriterionKind::ShortestDistance => Box::new(ShortestDistanceCriterion),
            CriterionKind::EarliestBonus { bonus } => Box::new(EarliestBonusCriterion::new(bonus)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{depot_vehicle, route_for, simple_trip};

    fn candidates() -> Vec<Route> {
        [(5.0, 6.0), (1.0, 2.0), (3.0, 4.0), (1.0, 2.0)]
            .iter()
            .enumerate()
            .map(|(k, &(a, b))| {
                let mut r = route_for(depot_vehicle(&format!("v{k}"), 0.0, 0.0, 0.0, 100.0, 1));
                r.insert_planned_trip(simple_trip("t", (a, 0.0), (b, 0.0)), 0, 1);
                r
            })
            .collect()
    }

    #[test]
    fn test_sorted_best_first_and_stable() {
        let sorted = ShortestDistanceCriterion.sorted(candidates());
        let ids: Vec<&str> = sorted.iter().map(|r| r.vehicle().id()).collect();
        assert_eq!(ids, vec!["v1", "v3", "v2", "v0"]);
    }

    #[test]
    fn test_best_and_nbest() {
        let best = ShortestDistanceCriterion.best(candidates()).expect("non-empty");
        assert_eq!(best.vehicle().id(), "v1");
        assert_eq!(ShortestDistanceCriterion.nbest(2, candidates()).len(), 2);
        assert_eq!(ShortestDistanceCriterion.nbest(10, candidates()).len(), 4);
        assert!(ShortestDistanceCriterion.best(Vec::new()).is_none());
    }

    #[test]
    fn test_rank_key_nan_last() {
        assert_eq!(rank_key(OptimizationDirection::Maximization, f64::NAN), f64::INFINITY);
        assert_eq!(rank_key(OptimizationDirection::Maximization, 2.0), -2.0);
    }

    #[test]
    fn test_kind_build() {
        assert_eq!(CriterionKind::default().build().name(), "shortest-time");
        let kind = CriterionKind::EarliestBonus { bonus: 3.0 };
        let json = serde_json::to_string(&kind).expect("serialize");
        let back: CriterionKind = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, kind);
        assert_eq!(back.build().name(), "earliest-bonus");
    }
}
