//! Vehicle type with capacity and operating window.

use serde::{Deserialize, Serialize};

use super::Service;
use crate::error::{Error, Result};

/// A vehicle that services one route.
///
/// The vehicle starts at its origin service and ends at its destination
/// service, which defaults to the origin. The origin window bounds the start
/// of the route; the destination window bounds the return.
///
/// # Examples
///
/// ```
/// use u_darp::models::{Position, Service, TimeWindow, Vehicle};
///
/// let depot = Service::new(Position::new(0.0, 0.0), TimeWindow::new(0.0, 1440.0).unwrap());
/// let v = Vehicle::new("v0", depot, 4);
/// assert_eq!(v.id(), "v0");
/// assert_eq!(v.capacity(), 4);
/// assert_eq!(v.destination(), v.origin());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    id: String,
    origin: Service,
    destination: Option<Service>,
    capacity: i32,
    max_duration: Option<f64>,
}

impl Vehicle {
    /// Creates a vehicle returning to its origin, with no duration limit.
    pub fn new(id: impl Into<String>, origin: Service, capacity: i32) -> Self {
        Self {
            id: id.into(),
            origin,
            destination: None,
            capacity,
            max_duration: None,
        }
    }

    /// Sets a distinct end depot.
    pub fn with_destination(mut self, destination: Service) -> Self {
        self.destination = Some(destination);
        self
    }

    /// Sets maximum route duration.
    pub fn with_max_duration(mut self, max: f64) -> Self {
        self.max_duration = Some(max);
        self
    }

    /// Vehicle identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Start depot.
    pub fn origin(&self) -> &Service {
        &self.origin
    }

    /// End depot (the origin unless set otherwise).
    pub fn destination(&self) -> &Service {
        self.destination.as_ref().unwrap_or(&self.origin)
    }

    /// Maximum load capacity.
    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    /// Maximum duration limit, if any.
    pub fn max_duration(&self) -> Option<f64> {
        self.max_duration
    }

    /// Earliest departure from the origin.
    pub fn earliest(&self) -> f64 {
        self.origin.earliest()
    }

    /// Latest arrival at the destination.
    pub fn latest(&self) -> f64 {
        self.destination().latest()
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Position, TimeWindow};

    fn depot(x: f64, earliest: f64, latest: f64) -> Service {
        Service::new(
            Position::new(x, 0.0),
            TimeWindow::new(earliest, latest).expect("valid"),
        )
    }

    #[test]
    fn test_vehicle_new() {
        let v = Vehicle::new("0", depot(0.0, 0.0, 100.0), 200);
        assert_eq!(v.id(), "0");
        assert_eq!(v.capacity(), 200);
        assert_eq!(v.destination(), v.origin());
        assert_eq!(v.earliest(), 0.0);
        assert_eq!(v.latest(), 100.0);
        assert!(v.max_duration().is_none());
    }

    #[test]
    fn test_vehicle_builder() {
        let v = Vehicle::new("1", depot(0.0, 10.0, 100.0), 100)
            .with_destination(depot(5.0, 0.0, 80.0))
            .with_max_duration(480.0);
        assert_eq!(v.destination().position(), &Position::new(5.0, 0.0));
        assert_eq!(v.earliest(), 10.0);
        assert_eq!(v.latest(), 80.0);
        assert_eq!(v.max_duration(), Some(480.0));
    }

    #[test]
    fn test_vehicle_validate() {
        assert!(Vehicle::new("ok", depot(0.0, 0.0, 1.0), 0).validate().is_ok());
        assert!(Vehicle::new("bad", depot(0.0, 0.0, 1.0), -3).validate().is_err());
    }
}
