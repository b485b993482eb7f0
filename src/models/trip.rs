//! Transport requests.

use serde::{Deserialize, Serialize};

use super::Service;
use crate::error::{Error, Result};
use crate::surface::Surface;

/// Which leg of a trip carries the binding time window.
///
/// Inbound trips must be delivered within the destination window; outbound
/// trips must be collected within the origin window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TripDirection {
    /// The pickup leg is time-constrained.
    #[default]
    Outbound,
    /// The delivery leg is time-constrained.
    Inbound,
}

impl TripDirection {
    /// Infers the direction from the two ends of a trip: the leg with the
    /// narrower window is the constrained one.
    ///
    /// Fails with [`Error::AmbiguousDirection`] when both windows have the
    /// same width.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_darp::models::{Position, Service, TimeWindow, TripDirection};
    ///
    /// let origin = Service::new(Position::new(0.0, 0.0), TimeWindow::new(0.0, 1440.0).unwrap());
    /// let destination = Service::new(Position::new(5.0, 0.0), TimeWindow::new(60.0, 75.0).unwrap());
    /// let direction = TripDirection::classify("r1", &origin, &destination).unwrap();
    /// assert_eq!(direction, TripDirection::Inbound);
    /// ```
    pub fn classify(id: &str, origin: &Service, destination: &Service) -> Result<Self> {
        let origin_width = origin.window().width();
        let destination_width = destination.window().width();
        if destination_width < origin_width {
            Ok(TripDirection::Inbound)
        } else if origin_width < destination_width {
            Ok(TripDirection::Outbound)
        } else {
            Err(Error::AmbiguousDirection(id.to_string()))
        }
    }
}

/// One transport request: carry `capacity` units from `origin` to
/// `destination`.
///
/// # Examples
///
/// ```
/// use u_darp::models::{Position, Service, Trip, TripDirection};
///
/// let trip = Trip::new(
///     "A",
///     Service::at(Position::new(0.0, 0.0)),
///     Service::at(Position::new(1.0, 1.0)),
/// )
/// .with_capacity(2)
/// .with_direction(TripDirection::Inbound);
/// assert_eq!(trip.capacity(), 2);
/// assert!(trip.is_inbound());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    id: String,
    origin: Service,
    destination: Service,
    capacity: i32,
    direction: TripDirection,
    timeout: Option<f64>,
}

impl Trip {
    /// Creates an outbound trip of one capacity unit with no ride-time cap.
    pub fn new(id: impl Into<String>, origin: Service, destination: Service) -> Self {
        Self {
            id: id.into(),
            origin,
            destination,
            capacity: 1,
            direction: TripDirection::Outbound,
            timeout: None,
        }
    }

    /// Sets the load carried by this trip.
    pub fn with_capacity(mut self, capacity: i32) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets which leg is time-constrained.
    pub fn with_direction(mut self, direction: TripDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Sets the maximum ride time (collection to delivery).
    pub fn with_timeout(mut self, timeout: f64) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Trip identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Pickup service.
    pub fn origin(&self) -> &Service {
        &self.origin
    }

    /// Delivery service.
    pub fn destination(&self) -> &Service {
        &self.destination
    }

    /// Load carried between pickup and delivery.
    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    /// Constrained leg.
    pub fn direction(&self) -> TripDirection {
        self.direction
    }

    /// Returns `true` if the delivery leg is the constrained one.
    pub fn is_inbound(&self) -> bool {
        self.direction == TripDirection::Inbound
    }

    /// Maximum ride time, if any.
    pub fn timeout(&self) -> Option<f64> {
        self.timeout
    }

    /// Earliest pickup.
    pub fn earliest(&self) -> f64 {
        self.origin.earliest()
    }

    /// Latest pickup.
    pub fn latest(&self) -> f64 {
        self.origin.latest()
    }

    /// Direct distance from origin to destination.
    pub fn distance(&self, surface: &dyn Surface) -> f64 {
        surface.distance(self.origin.position(), self.destination.position())
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.capacity < 0 {
            return Err(Error::NegativeCapacity {
                id: self.id.clone(),
                capacity: self.capacity,
            });
        }
        Ok(())
    }
}
