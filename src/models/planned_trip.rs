//! A trip bound to a pickup and a delivery stop.

use std::sync::Arc;

use super::{Stop, Trip, Vehicle};
use crate::surface::Surface;

/// Association of a [`Trip`] with the stops that collect and deliver it.
///
/// Stops are referenced by index into the owning route. Collection time,
/// delivery time and feasibility are cached and refreshed together with the
/// stops they depend on.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedTrip {
    trip: Arc<Trip>,
    pub(super) pickup: usize,
    pub(super) delivery: usize,
    collection_time: f64,
    delivery_time: f64,
    feasible: bool,
}

impl PlannedTrip {
    pub(super) fn new(trip: Arc<Trip>) -> Self {
        Self {
            trip,
            pickup: 0,
            delivery: 0,
            collection_time: 0.0,
            delivery_time: 0.0,
            feasible: false,
        }
    }

    /// The planned request.
    pub fn trip(&self) -> &Arc<Trip> {
        &self.trip
    }

    /// Index of the pickup stop.
    pub fn pickup(&self) -> usize {
        self.pickup
    }

    /// Index of the delivery stop.
    pub fn delivery(&self) -> usize {
        self.delivery
    }

    /// Service start at the pickup stop.
    pub fn collection_time(&self) -> f64 {
        self.collection_time
    }

    /// Service start at the delivery stop.
    pub fn delivery_time(&self) -> f64 {
        self.delivery_time
    }

    /// Ride time.
    pub fn duration(&self) -> f64 {
        self.delivery_time - self.collection_time
    }

    /// Whether this trip's own constraints hold on its route.
    pub fn feasible(&self) -> bool {
        self.feasible
    }

    pub(super) fn refresh(&mut self, stops: &[Stop], vehicle: &Vehicle, surface: &dyn Surface) {
        let pickup = &stops[self.pickup];
        let delivery = &stops[self.delivery];
        self.collection_time = pickup.starting_time();
        self.delivery_time = delivery.starting_time();
        let back = delivery.departure_time()
            + surface.time(delivery.position(), vehicle.destination().position());
        self.feasible = self.check(stops[0].departure_time(), back, vehicle);
    }

    fn check(&self, route_start: f64, back: f64, vehicle: &Vehicle) -> bool {
        if self.pickup >= self.delivery {
            return false;
        }
        if !self.collection_time.is_finite() || !back.is_finite() {
            return false;
        }
        if self.collection_time > self.trip.latest() {
            return false;
        }
        let window_ok = if self.trip.is_inbound() {
            self.trip.destination().window().contains(self.delivery_time)
        } else {
            self.trip.origin().window().contains(self.collection_time)
        };
        if !window_ok {
            return false;
        }
        if back > vehicle.latest() {
            return false;
        }
        if let Some(timeout) = self.trip.timeout() {
            if self.duration() > timeout {
                return false;
            }
        }
        if let Some(max) = vehicle.max_duration() {
            if back - route_start > max {
                return false;
            }
        }
        true
    }
}
