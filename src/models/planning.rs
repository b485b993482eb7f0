//! A full candidate solution: one route per used vehicle.

use std::collections::HashSet;

use super::Route;

/// A set of routes, one per vehicle in use.
///
/// # Examples
///
/// ```
/// use u_darp::models::Planning;
///
/// let planning = Planning::default();
/// assert!(planning.is_empty());
/// assert_eq!(planning.coverage(), 0);
/// assert!(planning.feasible());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Planning {
    routes: Vec<Route>,
}

impl Planning {
    /// Creates a planning from routes.
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// Routes of this planning.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Mutable access to the routes.
    pub fn routes_mut(&mut self) -> &mut Vec<Route> {
        &mut self.routes
    }

    /// Consumes the planning and returns its routes.
    pub fn into_routes(self) -> Vec<Route> {
        self.routes
    }

    /// Adds a route.
    pub fn push(&mut self, route: Route) {
        self.routes.push(route);
    }

    /// Number of routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns `true` if there are no routes.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Number of planned trips across all routes.
    pub fn coverage(&self) -> usize {
        self.routes.iter().map(|r| r.planned_trips().len()).sum()
    }

    /// Total travelled distance.
    pub fn distance(&self) -> f64 {
        self.routes.iter().map(|r| r.distance()).sum()
    }

    /// Returns `true` if every route is feasible.
    pub fn feasible(&self) -> bool {
        self.routes.iter().all(|r| r.feasible())
    }

    /// Appends the closing leg to every route.
    pub fn finish(&mut self) {
        for route in &mut self.routes {
            route.finish();
        }
    }

    /// Identifiers of every planned trip.
    pub fn trip_ids(&self) -> HashSet<&str> {
        self.routes
            .iter()
            .flat_map(|r| r.trips().map(|t| t.id()))
            .collect()
    }

    /// Locates a trip as `(route index, planned trip index)`.
    pub fn find_trip(&self, id: &str) -> Option<(usize, usize)> {
        self.routes
            .iter()
            .enumerate()
            .find_map(|(r, route)| route.find_trip(id).map(|p| (r, p)))
    }
}

impl AsRef<Planning> for Planning {
    fn as_ref(&self) -> &Planning {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{depot_vehicle, route_for, simple_trip};

    fn two_routes() -> Planning {
        let mut a = route_for(depot_vehicle("a", 0.0, 0.0, 0.0, 1000.0, 2));
        a.insert_planned_trip(simple_trip("t1", (1.0, 0.0), (2.0, 0.0)), 0, 1);
        let mut b = route_for(depot_vehicle("b", 0.0, 0.0, 0.0, 1000.0, 2));
        b.insert_planned_trip(simple_trip("t2", (0.0, 3.0), (0.0, 4.0)), 0, 1);
        b.insert_planned_trip(simple_trip("t3", (0.0, 5.0), (0.0, 6.0)), 2, 3);
        Planning::new(vec![a, b])
    }

    #[test]
    fn test_coverage_and_distance() {
        let p = two_routes();
        assert_eq!(p.len(), 2);
        assert_eq!(p.coverage(), 3);
        assert!((p.distance() - 8.0).abs() < 1e-10);
        assert!(p.feasible());
    }

    #[test]
    fn test_find_trip() {
        let p = two_routes();
        assert_eq!(p.find_trip("t3"), Some((1, 1)));
        assert_eq!(p.find_trip("nope"), None);
        let ids = p.trip_ids();
        assert!(ids.contains("t1") && ids.contains("t2") && ids.contains("t3"));
    }

    #[test]
    fn test_finish_closes_routes() {
        let mut p = two_routes();
        p.finish();
        assert!(p.routes().iter().all(|r| r.is_finished()));
        assert!((p.distance() - 16.0).abs() < 1e-10);
    }
}
