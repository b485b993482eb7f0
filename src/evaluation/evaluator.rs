//! Route and planning checker.

use std::collections::HashSet;

use crate::models::{Planning, Route, Solution, StopKind};
use crate::objective::EPSILON;

/// A type of constraint or invariant violation.
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationType {
    /// The stop chain or the stop/planned-trip cross references are broken.
    BrokenChain {
        /// Route index in the planning.
        route_index: usize,
        /// Offending stop.
        stop: usize,
    },
    /// A stop is reached before the previous one is left, or left before it
    /// is reached.
    TimeReversal {
        /// Route index.
        route_index: usize,
        /// Offending stop.
        stop: usize,
    },
    /// Load outside `[0, capacity]`.
    CapacityExceeded {
        /// Route index.
        route_index: usize,
        /// Offending stop.
        stop: usize,
        /// Load when leaving the stop.
        load: i32,
        /// Vehicle capacity.
        capacity: i32,
    },
    /// The constrained leg of a trip is served outside its window.
    TimeWindowViolated {
        /// Route index.
        route_index: usize,
        /// Trip identifier.
        trip_id: String,
        /// Service start of the constrained leg.
        time: f64,
        /// Window close.
        latest: f64,
    },
    /// A trip is delivered before (or at the stop where) it is collected.
    PrecedenceViolated {
        /// Route index.
        route_index: usize,
        /// Trip identifier.
        trip_id: String,
    },
    /// Ride time exceeds the trip timeout.
    RideTimeExceeded {
        /// Route index.
        route_index: usize,
        /// Trip identifier.
        trip_id: String,
        /// Actual ride time.
        duration: f64,
        /// Allowed ride time.
        timeout: f64,
    },
    /// The vehicle is back after its latest time.
    LateReturn {
        /// Route index.
        route_index: usize,
        /// Arrival at the vehicle destination.
        return_time: f64,
        /// Vehicle latest time.
        latest: f64,
    },
    /// Route duration exceeds the vehicle maximum.
    MaxDurationExceeded {
        /// Route index.
        route_index: usize,
        /// Actual duration.
        duration: f64,
        /// Maximum allowed duration.
        max_duration: f64,
    },
    /// The same trip is planned more than once.
    TripPlannedTwice {
        /// Trip identifier.
        trip_id: String,
    },
}

/// A constraint violation in a route or planning.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }

    /// Returns `true` for violations that no sequence of valid route
    /// operations can produce.
    pub fn is_structural(&self) -> bool {
        matches!(
            self.kind,
            ViolationType::BrokenChain { .. }
                | ViolationType::TimeReversal { .. }
                | ViolationType::PrecedenceViolated { .. }
                | ViolationType::TripPlannedTwice { .. }
        )
    }
}

/// Checks chain integrity, cross references, time monotonicity and
/// precedence.
pub fn structural_violations(route: &Route, route_index: usize) -> Vec<Violation> {
    let mut violations = Vec::new();
    let stops = route.stops();
    let broken = |stop| Violation::new(ViolationType::BrokenChain { route_index, stop });

    let walked: Vec<usize> = route.chain().map(|(k, _)| k).collect();
    if walked.len() != stops.len() || walked.last() != Some(&0) {
        violations.push(broken(stops.len() - 1));
    }
    for (k, stop) in stops.iter().enumerate() {
        let kind_ok = match stop.kind() {
            StopKind::Origin => k == 0,
            StopKind::Destination => k == stops.len() - 1 && stop.is_empty(),
            StopKind::Service => k > 0 && !stop.is_empty(),
        };
        let refs_ok = stop.pickups().iter().all(|&p| {
            route
                .planned_trips()
                .get(p)
                .is_some_and(|pt| pt.pickup() == k)
        }) && stop.deliveries().iter().all(|&d| {
            route
                .planned_trips()
                .get(d)
                .is_some_and(|pt| pt.delivery() == k)
        });
        if !kind_ok || !refs_ok {
            violations.push(broken(k));
        }
    }

    for (k, pair) in stops.windows(2).enumerate() {
        let (prev, next) = (&pair[0], &pair[1]);
        if prev.departure_time() > next.arrival_time() + EPSILON
            || next.arrival_time() > next.departure_time() + EPSILON
        {
            violations.push(Violation::new(ViolationType::TimeReversal {
                route_index,
                stop: k + 1,
            }));
        }
    }

    for pt in route.planned_trips() {
        if pt.pickup() >= pt.delivery() {
            violations.push(Violation::new(ViolationType::PrecedenceViolated {
                route_index,
                trip_id: pt.trip().id().to_string(),
            }));
        }
    }
    violations
}

/// Checks every invariant and constraint of a route.
///
/// A route reports no violation exactly when it is structurally sound and
/// [`Route::feasible`] holds.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_darp::evaluation::check_route;
/// use u_darp::models::{Position, Route, Service, Trip, Vehicle};
/// use u_darp::surface::GeoSurface;
///
/// let vehicle = Arc::new(Vehicle::new("v", Service::at(Position::new(0.0, 0.0)), 1));
/// let mut route = Route::new(vehicle, Arc::new(GeoSurface::euclidean()));
/// let trip = Trip::new("t", Service::at(Position::new(1.0, 0.0)), Service::at(Position::new(2.0, 0.0)));
/// route.insert_planned_trip(Arc::new(trip), 0, 1);
/// route.finish();
/// assert!(check_route(&route, 0).is_empty());
/// ```
pub fn check_route(route: &Route, route_index: usize) -> Vec<Violation> {
    let mut violations = structural_violations(route, route_index);
    let vehicle = route.vehicle();

    for (stop, s) in route.stops().iter().enumerate() {
        if s.load() < 0 || s.load() > vehicle.capacity() {
            violations.push(Violation::new(ViolationType::CapacityExceeded {
                route_index,
                stop,
                load: s.load(),
                capacity: vehicle.capacity(),
            }));
        }
    }

    for pt in route.planned_trips() {
        let trip = pt.trip();
        let (time, window) = if trip.is_inbound() {
            (pt.delivery_time(), trip.destination().window())
        } else {
            (pt.collection_time(), trip.origin().window())
        };
        let late_pickup = pt.collection_time() > trip.latest();
        if !window.contains(time) || late_pickup || !time.is_finite() {
            violations.push(Violation::new(ViolationType::TimeWindowViolated {
                route_index,
                trip_id: trip.id().to_string(),
                time,
                latest: window.latest(),
            }));
        }
        if let Some(timeout) = trip.timeout() {
            if pt.duration() > timeout {
                violations.push(Violation::new(ViolationType::RideTimeExceeded {
                    route_index,
                    trip_id: trip.id().to_string(),
                    duration: pt.duration(),
                    timeout,
                }));
            }
        }
    }

    let return_time = route.return_time();
    if !return_time.is_finite() || return_time > vehicle.latest() {
        violations.push(Violation::new(ViolationType::LateReturn {
            route_index,
            return_time,
            latest: vehicle.latest(),
        }));
    }
    if let Some(max_duration) = vehicle.max_duration() {
        let duration = return_time - route.first_stop().departure_time();
        if duration > max_duration {
            violations.push(Violation::new(ViolationType::MaxDurationExceeded {
                route_index,
                duration,
                max_duration,
            }));
        }
    }
    violations
}

/// Checks every route of a planning, and that no trip is planned twice.
pub fn check_planning(planning: &Planning) -> Vec<Violation> {
    let mut violations: Vec<Violation> = planning
        .routes()
        .iter()
        .enumerate()
        .flat_map(|(index, route)| check_route(route, index))
        .collect();
    let mut seen = HashSet::new();
    for trip in planning.routes().iter().flat_map(|r| r.trips()) {
        if !seen.insert(trip.id()) {
            violations.push(Violation::new(ViolationType::TripPlannedTwice {
                trip_id: trip.id().to_string(),
            }));
        }
    }
    violations
}

/// Returns the objective value of a solution and its violations.
pub fn evaluate(solution: &Solution) -> (f64, Vec<Violation>) {
    (solution.optimization(), check_planning(solution.planning()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Planning;
    use crate::test_utils::{depot_vehicle, route_for, simple_trip, windowed_trip};

    #[test]
    fn test_empty_route_is_clean() {
        let route = route_for(depot_vehicle("v", 0.0, 0.0, 0.0, 100.0, 1));
        assert!(check_route(&route, 0).is_empty());
    }

    #[test]
    fn test_feasible_route_is_clean() {
        let mut route = route_for(depot_vehicle("v", 0.0, 0.0, 0.0, 100.0, 2));
        route.insert_planned_trip(simple_trip("a", (1.0, 0.0), (3.0, 0.0)), 0, 1);
        route.insert_planned_trip(simple_trip("b", (2.0, 0.0), (4.0, 0.0)), 1, 3);
        route.finish();
        assert!(route.feasible());
        assert!(check_route(&route, 0).is_empty());
    }

    #[test]
    fn test_capacity_violation() {
        let mut route = route_for(depot_vehicle("v", 0.0, 0.0, 0.0, 100.0, 1));
        route.insert_planned_trip(simple_trip("a", (1.0, 0.0), (3.0, 0.0)), 0, 1);
        route.insert_planned_trip(simple_trip("b", (2.0, 0.0), (4.0, 0.0)), 1, 3);
        let violations = check_route(&route, 4);
        assert_eq!(violations.len(), 1);
        assert!(matches!(
            violations[0].kind,
            ViolationType::CapacityExceeded { route_index: 4, stop: 2, load: 2, capacity: 1 }
        ));
        assert!(!violations[0].is_structural());
    }

    #[test]
    fn test_window_and_late_return() {
        let mut route = route_for(depot_vehicle("v", 0.0, 0.0, 0.0, 30.0, 1));
        route.insert_planned_trip(windowed_trip("w", (20.0, 0.0), (21.0, 0.0), 0.0, 10.0), 0, 1);
        let violations = check_route(&route, 0);
        let kinds: Vec<&ViolationType> = violations.iter().map(|v| &v.kind).collect();
        assert_eq!(kinds.len(), 2);
        assert!(matches!(kinds[0], ViolationType::TimeWindowViolated { .. }));
        assert!(matches!(kinds[1], ViolationType::LateReturn { .. }));
    }

    #[test]
    fn test_planned_twice() {
        let mut a = route_for(depot_vehicle("a", 0.0, 0.0, 0.0, 100.0, 1));
        a.insert_planned_trip(simple_trip("t", (1.0, 0.0), (2.0, 0.0)), 0, 1);
        let b = a.clone();
        let violations = check_planning(&Planning::new(vec![a, b]));
        assert_eq!(violations.len(), 1);
        assert!(violations[0].is_structural());
    }

    #[test]
    fn test_violations_agree_with_feasible() {
        use crate::random::create_rng;
        use rand::Rng;

        let mut rng = create_rng(11);
        for round in 0..50 {
            let mut route = route_for(depot_vehicle("v", 0.0, 0.0, 0.0, 80.0, 2));
            for k in 0..4 {
                let from = (rng.random_range(0..15) as f64, rng.random_range(0..15) as f64);
                let to = (rng.random_range(0..15) as f64, rng.random_range(0..15) as f64);
                let earliest = rng.random_range(0..30) as f64;
                let id = format!("{round}-{k}");
                let trip = windowed_trip(&id, from, to, earliest, earliest + 20.0);
                let body = route.body_len();
                let i = rng.random_range(0..body);
                let j = rng.random_range(i + 1..=body);
                route.insert_planned_trip(trip, i, j);
            }
            let violations = check_route(&route, 0);
            assert!(violations.iter().all(|v| !v.is_structural()));
            assert_eq!(violations.is_empty(), route.feasible(), "round {round}");
        }
    }
}
