//! Insertion strategies: which `(i, j)` position pairs are tried.
//!
//! A pair `(i, j)` places a trip's pickup right after stop `i` and its
//! delivery right before what is stop `j` (see
//! [`Route::insert_planned_trip`]). A route with body length `k` has
//! `k(k+1)/2` valid pairs.

use std::fmt;
use std::sync::Arc;

use rand::seq::index;
use rand::RngCore;

use crate::models::{Route, Trip};

/// Returns a copy of `route` with `trip` spliced in at `(i, j)`.
///
/// Feasibility is not checked.
///
/// # Panics
///
/// Panics unless `i < j <= route.body_len()`.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_darp::constructive::compute_one;
/// use u_darp::models::{Position, Route, Service, Trip, Vehicle};
/// use u_darp::surface::GeoSurface;
///
/// let vehicle = Arc::new(Vehicle::new("v", Service::at(Position::new(0.0, 0.0)), 1));
/// let route = Route::new(vehicle, Arc::new(GeoSurface::euclidean()));
/// let trip = Arc::new(Trip::new("t", Service::at(Position::new(1.0, 0.0)), Service::at(Position::new(2.0, 0.0))));
/// let extended = compute_one(&route, &trip, 0, 1);
/// assert_eq!(extended.len(), 3);
/// assert_eq!(route.len(), 1);
/// ```
pub fn compute_one(route: &Route, trip: &Arc<Trip>, i: usize, j: usize) -> Route {
    let mut candidate = route.clone();
    candidate.insert_planned_trip(trip.clone(), i, j);
    candidate
}

/// Applies [`compute_one`] for every trip and position pair, optionally
/// keeping only feasible results.
pub fn compute(
    route: &Route,
    trips: &[Arc<Trip>],
    positions: &[(usize, usize)],
    only_feasible: bool,
) -> Vec<Route> {
    trips
        .iter()
        .flat_map(|trip| {
            positions
                .iter()
                .map(move |&(i, j)| compute_one(route, trip, i, j))
        })
        .filter(|candidate| !only_feasible || candidate.feasible())
        .collect()
}

/// Every valid position pair of a route with body length `body_len`, in
/// lexicographic order.
pub fn all_positions(body_len: usize) -> Vec<(usize, usize)> {
    (0..body_len)
        .flat_map(|i| (i + 1..=body_len).map(move |j| (i, j)))
        .collect()
}

/// Produces insertion candidates for a route.
pub trait InsertionStrategy: fmt::Debug + Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Position pairs to try on `route`.
    fn positions(&self, route: &Route, rng: &mut dyn RngCore) -> Vec<(usize, usize)>;

    /// Candidate routes for every trip at the strategy's positions.
    fn compute(
        &self,
        route: &Route,
        trips: &[Arc<Trip>],
        only_feasible: bool,
        rng: &mut dyn RngCore,
    ) -> Vec<Route> {
        let positions = self.positions(route, rng);
        compute(route, trips, &positions, only_feasible)
    }
}

/// Tries a bounded random sample of position pairs.
///
/// With `count == 0` nothing is tried; with `count` at least the number of
/// valid pairs, every pair is tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingInsertionStrategy {
    count: usize,
}

impl SamplingInsertionStrategy {
    /// Creates the strategy.
    pub fn new(count: usize) -> Self {
        Self { count }
    }

    /// Sample size.
    pub fn count(&self) -> usize {
        self.count
    }
}

impl InsertionStrategy for SamplingInsertionStrategy {
    fn name(&self) -> &str {
        "sampling"
    }

    fn positions(&self, route: &Route, rng: &mut dyn RngCore) -> Vec<(usize, usize)> {
        if self.count == 0 {
            return Vec::new();
        }
        let all = all_positions(route.body_len());
        if self.count >= all.len() {
            return all;
        }
        let mut picked = index::sample(rng, all.len(), self.count).into_vec();
        picked.sort_unstable();
        picked.into_iter().map(|k| all[k]).collect()
    }
}

/// Tries every position pair.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntensiveInsertionStrategy;

impl InsertionStrategy for IntensiveInsertionStrategy {
    fn name(&self) -> &str {
        "intensive"
    }

    fn positions(&self, route: &Route, _rng: &mut dyn RngCore) -> Vec<(usize, usize)> {
        all_positions(route.body_len())
    }
}

/// Appends after the last body stop only.
#[derive(Debug, Clone, Copy, Default)]
pub struct TailInsertionStrategy;

impl InsertionStrategy for TailInsertionStrategy {
    fn name(&self) -> &str {
        "tail"
    }

    fn positions(&self, route: &Route, _rng: &mut dyn RngCore) -> Vec<(usize, usize)> {
        let body_len = route.body_len();
        vec![(body_len - 1, body_len)]
    }
}
