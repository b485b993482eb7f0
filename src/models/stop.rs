//! Stops: the nodes of a route's chain.

use super::{PlannedTrip, Position, Vehicle};
use crate::surface::Surface;

/// Role of a stop inside its route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StopKind {
    /// Vehicle origin; always the first stop, never has a previous one.
    Origin,
    /// Pickups and/or deliveries.
    Service,
    /// Closing stop at the vehicle destination, appended by [`Route::finish`](super::Route::finish).
    Destination,
}

/// One visited location of a route.
///
/// A stop references the planned trips picked up and delivered there by
/// their index in the owning route. Its timing and load are derived from the
/// previous stop and cached; the owning route refreshes them whenever the
/// previous stop or the stop's own services change.
///
/// Waiting defaults to the time until the stop's window opens. An explicit
/// value set through [`Route::set_waiting`](super::Route::set_waiting)
/// replaces it.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub(super) kind: StopKind,
    pub(super) position: Position,
    pub(super) pickups: Vec<usize>,
    pub(super) deliveries: Vec<usize>,
    pub(super) waiting_override: Option<f64>,
    earliest: f64,
    latest: f64,
    load_time: f64,
    arrival_time: f64,
    waiting_time: f64,
    departure_time: f64,
    load: i32,
}

impl Stop {
    fn with_kind(kind: StopKind, position: Position) -> Self {
        Self {
            kind,
            position,
            pickups: Vec::new(),
            deliveries: Vec::new(),
            waiting_override: None,
            earliest: f64::NEG_INFINITY,
            latest: f64::INFINITY,
            load_time: 0.0,
            arrival_time: 0.0,
            waiting_time: 0.0,
            departure_time: 0.0,
            load: 0,
        }
    }

    pub(super) fn origin(vehicle: &Vehicle) -> Self {
        Self::with_kind(StopKind::Origin, *vehicle.origin().position())
    }

    pub(super) fn destination(vehicle: &Vehicle) -> Self {
        Self::with_kind(StopKind::Destination, *vehicle.destination().position())
    }

    pub(super) fn pickup(position: Position, planned_trip: usize) -> Self {
        let mut stop = Self::with_kind(StopKind::Service, position);
        stop.pickups.push(planned_trip);
        stop
    }

    pub(super) fn delivery(position: Position, planned_trip: usize) -> Self {
        let mut stop = Self::with_kind(StopKind::Service, position);
        stop.deliveries.push(planned_trip);
        stop
    }

    /// Role of this stop.
    pub fn kind(&self) -> StopKind {
        self.kind
    }

    /// Returns `true` for the origin and the closing stop.
    pub fn is_depot(&self) -> bool {
        self.kind != StopKind::Service
    }

    /// Where the stop is.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Indices (in the owning route) of the planned trips collected here.
    pub fn pickups(&self) -> &[usize] {
        &self.pickups
    }

    /// Indices (in the owning route) of the planned trips delivered here.
    pub fn deliveries(&self) -> &[usize] {
        &self.deliveries
    }

    /// Returns `true` if nothing is collected or delivered here.
    pub fn is_empty(&self) -> bool {
        self.pickups.is_empty() && self.deliveries.is_empty()
    }

    /// Latest of the earliest times of every service at this stop.
    pub fn earliest(&self) -> f64 {
        self.earliest
    }

    /// Earliest of the latest times of every service at this stop.
    pub fn latest(&self) -> f64 {
        self.latest
    }

    /// Longest service duration at this stop; services run concurrently.
    pub fn load_time(&self) -> f64 {
        self.load_time
    }

    /// Arrival time.
    pub fn arrival_time(&self) -> f64 {
        self.arrival_time
    }

    /// Time spent waiting before service starts.
    pub fn waiting_time(&self) -> f64 {
        self.waiting_time
    }

    /// Explicit waiting time, if one was set.
    pub fn waiting_override(&self) -> Option<f64> {
        self.waiting_override
    }

    /// Time at which service starts.
    pub fn starting_time(&self) -> f64 {
        self.arrival_time + self.waiting_time
    }

    /// Departure time.
    pub fn departure_time(&self) -> f64 {
        self.departure_time
    }

    /// Load on board when leaving this stop.
    pub fn load(&self) -> i32 {
        self.load
    }

    /// Recomputes the cached timing and load from `previous`.
    pub(super) fn refresh(
        &mut self,
        previous: Option<&Stop>,
        vehicle: &Vehicle,
        surface: &dyn Surface,
        planned_trips: &[PlannedTrip],
    ) {
        let (earliest, latest, load_time) = match self.kind {
            StopKind::Origin => {
                let s = vehicle.origin();
                (s.earliest(), s.latest(), s.duration())
            }
            StopKind::Destination => {
                let s = vehicle.destination();
                (s.earliest(), s.latest(), s.duration())
            }
            StopKind::Service => {
                let services = self
                    .pickups
                    .iter()
                    .map(|&p| planned_trips[p].trip().origin())
                    .chain(
                        self.deliveries
                            .iter()
                            .map(|&d| planned_trips[d].trip().destination()),
                    );
                services.fold(
                    (f64::NEG_INFINITY, f64::INFINITY, 0.0_f64),
                    |(e, l, t), s| (e.max(s.earliest()), l.min(s.latest()), t.max(s.duration())),
                )
            }
        };
        self.earliest = earliest;
        self.latest = latest;
        self.load_time = load_time;

        self.arrival_time = match previous {
            Some(prev) => prev.departure_time + surface.time(&prev.position, &self.position),
            None => vehicle.earliest(),
        };
        self.waiting_time = self
            .waiting_override
            .unwrap_or_else(|| (earliest - self.arrival_time).max(0.0));
        self.departure_time = (self.arrival_time + self.waiting_time).max(earliest) + load_time;

        let collected: i32 = self
            .pickups
            .iter()
            .map(|&p| planned_trips[p].trip().capacity())
            .sum();
        let delivered: i32 = self
            .deliveries
            .iter()
            .map(|&d| planned_trips[d].trip().capacity())
            .sum();
        self.load = previous.map_or(0, |prev| prev.load) + collected - delivered;
    }
}
