//! Objectives: how whole solutions are scored and compared.
//!
//! An [`Objective`] scores planned trips and stops, and sums the scores
//! bottom-up into route, planning and solution values. Comparison puts
//! coverage (number of planned trips) first and the summed value second, in
//! the objective's [`OptimizationDirection`].
//!
//! - [`DialARideObjective`] — minimize travelled distance
//! - [`HashCodeObjective`] — maximize ride distance plus an on-time bonus
//! - [`TaxiSharingObjective`] — maximize served direct distance

mod dial_a_ride;
mod hashcode;
mod taxi_sharing;

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{PlannedTrip, Planning, Route, Solution};

pub use dial_a_ride::DialARideObjective;
pub use hashcode::HashCodeObjective;
pub use taxi_sharing::TaxiSharingObjective;

/// Values closer than this compare as equal.
pub const EPSILON: f64 = 1e-9;

/// Whether larger or smaller values are better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptimizationDirection {
    /// Larger is better.
    Maximization,
    /// Smaller is better.
    Minimization,
}

impl OptimizationDirection {
    /// Orders `a` against `b` so that `Greater` means `a` is better.
    ///
    /// Differences within [`EPSILON`] are `Equal`.
    pub fn compare(self, a: f64, b: f64) -> Ordering {
        if (a - b).abs() <= EPSILON {
            return Ordering::Equal;
        }
        let ord = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
        match self {
            OptimizationDirection::Maximization => ord,
            OptimizationDirection::Minimization => ord.reverse(),
        }
    }

    /// Returns `true` if `a` is strictly better than `b`.
    pub fn is_better(self, a: f64, b: f64) -> bool {
        self.compare(a, b) == Ordering::Greater
    }
}

/// The overall cost/benefit function of a job.
pub trait Objective: fmt::Debug + Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Whether values are maximized or minimized.
    fn direction(&self) -> OptimizationDirection;

    /// Contribution of one planned trip.
    fn planned_trip_optimization(&self, route: &Route, planned_trip: &PlannedTrip) -> f64;

    /// Contribution of the stop at `index`, e.g. the leg arriving there.
    fn stop_optimization(&self, _route: &Route, _index: usize) -> f64 {
        0.0
    }

    /// Sum of the stop and planned trip contributions of a route.
    fn route_optimization(&self, route: &Route) -> f64 {
        let stops: f64 = (0..route.len())
            .map(|k| self.stop_optimization(route, k))
            .sum();
        let trips: f64 = route
            .planned_trips()
            .iter()
            .map(|pt| self.planned_trip_optimization(route, pt))
            .sum();
        stops + trips
    }

    /// Sum over the routes of a planning.
    fn planning_optimization(&self, planning: &Planning) -> f64 {
        planning
            .routes()
            .iter()
            .map(|r| self.route_optimization(r))
            .sum()
    }

    /// Value of a solution.
    fn optimization(&self, solution: &Solution) -> f64 {
        self.planning_optimization(solution.planning())
    }

    /// Orders two plannings; `Greater` means `a` is better.
    ///
    /// Higher coverage always wins; equal coverage falls back to the value.
    fn compare(&self, a: &Planning, b: &Planning) -> Ordering {
        a.coverage().cmp(&b.coverage()).then_with(|| {
            self.direction().compare(
                self.planning_optimization(a),
                self.planning_optimization(b),
            )
        })
    }

    /// Returns `true` if `candidate` is strictly better than `incumbent`.
    fn is_better(&self, candidate: &Planning, incumbent: &Planning) -> bool {
        self.compare(candidate, incumbent) == Ordering::Greater
    }
}

impl<'o> dyn Objective + 'o {
    /// Returns the best of `candidates`, skipping `None`s.
    ///
    /// Ties keep the earliest candidate, so passing the incumbent first
    /// means a challenger must strictly improve to be chosen.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_darp::models::Planning;
    /// use u_darp::objective::{DialARideObjective, Objective};
    ///
    /// let objective: &dyn Objective = &DialARideObjective;
    /// let a = Planning::default();
    /// let b = Planning::default();
    /// let best = objective.best([Some(&a), None, Some(&b)]).unwrap();
    /// assert!(std::ptr::eq(best, &a));
    /// ```
    pub fn best<'a, T>(&self, candidates: impl IntoIterator<Item = Option<&'a T>>) -> Option<&'a T>
    where
        T: AsRef<Planning> + 'a,
    {
        candidates.into_iter().flatten().fold(None, |best, candidate| match best {
            Some(current) if !self.is_better(candidate.as_ref(), current.as_ref()) => {
                Some(current)
            }
            _ => Some(candidate),
        })
    }
}
