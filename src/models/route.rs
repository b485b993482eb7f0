//! Routes: a vehicle's stop chain and the trips it carries.

use std::fmt;
use std::sync::Arc;

use super::{PlannedTrip, Stop, StopKind, Trip, Vehicle};
use crate::surface::Surface;

/// An ordered chain of stops assigned to a single vehicle.
///
/// Stops live in an owned vector in chain order: the previous stop of index
/// `k` is `k - 1`, and the first stop (the vehicle origin) has none. Planned
/// trips refer to their stops by index and stops refer back to planned trips
/// by index, so the route can be cloned freely as a rollback copy.
///
/// Derived stop values (arrival, waiting, departure, load) are cached. Every
/// structural mutation ends with [`Route::flush`] from the first touched
/// index, which recomputes that stop, everything after it, and the planned
/// trips delivered there or later. Nothing before the touched index is
/// recomputed.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_darp::models::{Position, Route, Service, TimeWindow, Trip, Vehicle};
/// use u_darp::surface::GeoSurface;
///
/// let depot = Service::new(Position::new(0.0, 0.0), TimeWindow::new(0.0, 100.0).unwrap());
/// let vehicle = Arc::new(Vehicle::new("v", depot, 2));
/// let mut route = Route::new(vehicle, Arc::new(GeoSurface::euclidean()));
///
/// let trip = Trip::new("t", Service::at(Position::new(3.0, 4.0)), Service::at(Position::new(6.0, 8.0)));
/// route.insert_planned_trip(Arc::new(trip), 0, 1);
/// assert_eq!(route.len(), 3);
/// assert!((route.distance() - 10.0).abs() < 1e-10);
/// assert!(route.feasible());
/// ```
#[derive(Clone)]
pub struct Route {
    vehicle: Arc<Vehicle>,
    surface: Arc<dyn Surface>,
    stops: Vec<Stop>,
    planned_trips: Vec<PlannedTrip>,
}

impl Route {
    /// Creates an empty route holding only the vehicle origin stop.
    pub fn new(vehicle: Arc<Vehicle>, surface: Arc<dyn Surface>) -> Self {
        let origin = Stop::origin(&vehicle);
        let mut route = Self {
            vehicle,
            surface,
            stops: vec![origin],
            planned_trips: Vec::new(),
        };
        route.flush(0);
        route
    }

    /// Returns the vehicle assigned to this route.
    pub fn vehicle(&self) -> &Arc<Vehicle> {
        &self.vehicle
    }

    /// Surface used for timing.
    pub fn surface(&self) -> &dyn Surface {
        self.surface.as_ref()
    }

    /// Stops in chain order.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Stop at `index`, if any.
    pub fn stop(&self, index: usize) -> Option<&Stop> {
        self.stops.get(index)
    }

    /// The vehicle origin stop.
    pub fn first_stop(&self) -> &Stop {
        &self.stops[0]
    }

    /// The last stop of the chain.
    pub fn last_stop(&self) -> &Stop {
        &self.stops[self.stops.len() - 1]
    }

    /// Number of stops, including the origin and the closing stop.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Number of stops before the closing stop (all stops if not finished).
    ///
    /// Insertion positions and local-search moves stay within `0..body_len()`.
    pub fn body_len(&self) -> usize {
        if self.is_finished() {
            self.stops.len() - 1
        } else {
            self.stops.len()
        }
    }

    /// Returns `true` if the route carries no trips.
    pub fn is_empty(&self) -> bool {
        self.planned_trips.is_empty()
    }

    /// Returns `true` once the closing stop has been appended.
    pub fn is_finished(&self) -> bool {
        self.last_stop().kind() == StopKind::Destination
    }

    /// Index of the stop preceding `index`.
    pub fn previous(&self, index: usize) -> Option<usize> {
        if index < self.stops.len() {
            index.checked_sub(1)
        } else {
            None
        }
    }

    /// Walks the chain backwards from the last stop to the origin.
    pub fn chain(&self) -> Chain<'_> {
        Chain {
            route: self,
            next: Some(self.stops.len() - 1),
        }
    }

    /// Planned trips in insertion order.
    pub fn planned_trips(&self) -> &[PlannedTrip] {
        &self.planned_trips
    }

    /// The most recently inserted planned trip.
    pub fn last_planned_trip(&self) -> Option<&PlannedTrip> {
        self.planned_trips.last()
    }

    /// Trips carried by this route.
    pub fn trips(&self) -> impl Iterator<Item = &Arc<Trip>> + '_ {
        self.planned_trips.iter().map(|pt| pt.trip())
    }

    /// Index of the planned trip serving the trip `id`.
    pub fn find_trip(&self, id: &str) -> Option<usize> {
        self.planned_trips.iter().position(|pt| pt.trip().id() == id)
    }

    /// Total distance travelled along the chain.
    pub fn distance(&self) -> f64 {
        self.stops
            .windows(2)
            .map(|w| self.surface.distance(w[0].position(), w[1].position()))
            .sum()
    }

    /// Distance of the leg arriving at stop `index` (zero for the origin).
    pub fn leg_distance(&self, index: usize) -> f64 {
        match self.previous(index) {
            Some(prev) => self
                .surface
                .distance(self.stops[prev].position(), self.stops[index].position()),
            None => 0.0,
        }
    }

    /// Time between leaving the origin and leaving the last stop.
    pub fn duration(&self) -> f64 {
        self.last_stop().departure_time() - self.first_stop().departure_time()
    }

    /// Departure time from the last stop.
    pub fn last_departure_time(&self) -> f64 {
        self.last_stop().departure_time()
    }

    /// Arrival time at the vehicle destination, projected if not finished.
    pub fn return_time(&self) -> f64 {
        let last = self.last_stop();
        if self.is_finished() {
            last.arrival_time()
        } else {
            last.departure_time()
                + self
                    .surface
                    .time(last.position(), self.vehicle.destination().position())
        }
    }

    /// Checks capacity, every planned trip, the return deadline and the
    /// vehicle duration cap.
    pub fn feasible(&self) -> bool {
        let capacity = self.vehicle.capacity();
        if self
            .stops
            .iter()
            .any(|s| s.load() < 0 || s.load() > capacity)
        {
            return false;
        }
        if !self.planned_trips.iter().all(|pt| pt.feasible()) {
            return false;
        }
        let back = self.return_time();
        if !back.is_finite() || back > self.vehicle.latest() {
            return false;
        }
        if let Some(max) = self.vehicle.max_duration() {
            if back - self.first_stop().departure_time() > max {
                return false;
            }
        }
        true
    }

    /// Recomputes cached values of stop `from` onwards and of the planned
    /// trips delivered at or after it.
    ///
    /// Callers that mutate the chain by hand must flush from the first
    /// mutated index; every mutation provided here already does.
    pub fn flush(&mut self, from: usize) {
        for k in from..self.stops.len() {
            let (head, tail) = self.stops.split_at_mut(k);
            tail[0].refresh(
                head.last(),
                &self.vehicle,
                self.surface.as_ref(),
                &self.planned_trips,
            );
        }
        for pt in &mut self.planned_trips {
            if pt.delivery >= from {
                pt.refresh(&self.stops, &self.vehicle, self.surface.as_ref());
            }
        }
    }

    /// Moves every pickup and delivery of stop `b` into stop `a` and removes
    /// `b` from the chain.
    ///
    /// # Panics
    ///
    /// Panics unless `b == a + 1` and both are service stops.
    pub fn merge(&mut self, a: usize, b: usize) {
        self.merge_stops(a, b);
        self.relink();
        self.flush(a);
    }

    /// Splices `trip` into the chain: the pickup goes right after stop `i`
    /// and the delivery right before what was stop `j`.
    ///
    /// A new stop at the same position as the stop preceding it is merged
    /// into that stop (never into the origin, never a delivery into its own
    /// pickup). Feasibility is not checked.
    ///
    /// # Panics
    ///
    /// Panics unless `i < j <= body_len()`.
    pub fn insert_planned_trip(&mut self, trip: Arc<Trip>, i: usize, j: usize) {
        assert!(
            i < j && j <= self.body_len(),
            "insertion positions ({i}, {j}) out of range for body length {}",
            self.body_len()
        );
        let index = self.planned_trips.len();
        let pickup_position = *trip.origin().position();
        let delivery_position = *trip.destination().position();
        self.planned_trips.push(PlannedTrip::new(trip));

        self.stops.insert(j, Stop::delivery(delivery_position, index));
        self.stops.insert(i + 1, Stop::pickup(pickup_position, index));

        // delivery now sits at j + 1, after what used to be stop j - 1
        if j > i + 1 && self.stops[j].position() == self.stops[j + 1].position() {
            self.merge_stops(j, j + 1);
        }
        if i > 0 && self.stops[i].position() == self.stops[i + 1].position() {
            self.merge_stops(i, i + 1);
        }
        self.relink();
        self.flush(i);
    }

    /// Removes the planned trip at `index` and returns its trip.
    ///
    /// Service stops left empty are dropped; the remaining planned trips are
    /// re-indexed.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn remove_planned_trip(&mut self, index: usize) -> Arc<Trip> {
        let removed = self.planned_trips.remove(index);
        let shift = |refs: &mut Vec<usize>| {
            refs.retain(|&r| r != index);
            for r in refs.iter_mut() {
                if *r > index {
                    *r -= 1;
                }
            }
        };
        for stop in &mut self.stops {
            shift(&mut stop.pickups);
            shift(&mut stop.deliveries);
        }
        self.stops.retain(|s| !(s.kind() == StopKind::Service && s.is_empty()));
        self.relink();
        self.flush(removed.pickup);
        removed.trip().clone()
    }

    /// Swaps service stops `i` and `i + 1`.
    ///
    /// # Panics
    ///
    /// Panics unless both are service stops.
    pub fn swap_stops(&mut self, i: usize) {
        assert!(
            i >= 1 && i + 1 < self.body_len(),
            "cannot swap stops {i} and {}",
            i + 1
        );
        self.stops.swap(i, i + 1);
        self.relink();
        self.flush(i);
    }

    /// Reverses the service stops `i..=j`.
    ///
    /// # Panics
    ///
    /// Panics unless `1 <= i <= j < body_len()`.
    pub fn reverse_stops(&mut self, i: usize, j: usize) {
        assert!(
            i >= 1 && i <= j && j < self.body_len(),
            "cannot reverse stops {i}..={j}"
        );
        self.stops[i..=j].reverse();
        self.relink();
        self.flush(i);
    }

    /// Fixes the waiting time at stop `index`, or restores the default
    /// (wait until the window opens) with `None`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds or `waiting` is negative or not
    /// finite.
    pub fn set_waiting(&mut self, index: usize, waiting: Option<f64>) {
        assert!(index < self.stops.len(), "no stop at index {index}");
        if let Some(w) = waiting {
            assert!(w.is_finite() && w >= 0.0, "invalid waiting time {w}");
        }
        self.stops[index].waiting_override = waiting;
        self.flush(index);
    }

    /// Appends the closing leg back to the vehicle destination.
    ///
    /// Finishing twice is a no-op.
    pub fn finish(&mut self) {
        if self.is_finished() {
            return;
        }
        self.stops.push(Stop::destination(&self.vehicle));
        self.flush(self.stops.len() - 1);
    }

    fn merge_stops(&mut self, a: usize, b: usize) {
        assert!(b == a + 1, "only adjacent stops can be merged ({a}, {b})");
        assert!(
            self.stops[a].kind() == StopKind::Service && self.stops[b].kind() == StopKind::Service,
            "only service stops can be merged"
        );
        let merged = self.stops.remove(b);
        self.stops[a].pickups.extend(merged.pickups);
        self.stops[a].deliveries.extend(merged.deliveries);
    }

    /// Repoints every planned trip at the stops referencing it.
    fn relink(&mut self) {
        for (index, stop) in self.stops.iter().enumerate() {
            for &p in &stop.pickups {
                self.planned_trips[p].pickup = index;
            }
            for &d in &stop.deliveries {
                self.planned_trips[d].delivery = index;
            }
        }
    }
}

impl PartialEq for Route {
    fn eq(&self, other: &Self) -> bool {
        self.vehicle.id() == other.vehicle.id()
            && self.stops == other.stops
            && self.planned_trips == other.planned_trips
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("vehicle", &self.vehicle.id())
            .field("stops", &self.stops.len())
            .field("trips", &self.trips().map(|t| t.id()).collect::<Vec<_>>())
            .finish()
    }
}

/// Iterator over a route's stops following `previous` links from the last
/// stop back to the origin.
pub struct Chain<'a> {
    route: &'a Route,
    next: Option<usize>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = (usize, &'a Stop);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.next?;
        self.next = self.route.previous(index);
        Some((index, &self.route.stops[index]))
    }
}
