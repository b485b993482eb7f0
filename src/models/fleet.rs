//! The available vehicles.

use std::collections::HashSet;
use std::sync::Arc;

use super::Vehicle;
use crate::error::{Error, Result};

/// The vehicles available to a job.
///
/// # Examples
///
/// ```
/// use u_darp::models::{Fleet, Position, Service, Vehicle};
///
/// let depot = Service::at(Position::new(0.0, 0.0));
/// let fleet = Fleet::new(vec![
///     Vehicle::new("v0", depot.clone(), 4),
///     Vehicle::new("v1", depot, 4),
/// ])
/// .unwrap();
/// assert_eq!(fleet.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Fleet {
    vehicles: Vec<Arc<Vehicle>>,
}

impl Fleet {
    /// Creates a fleet.
    ///
    /// Fails on duplicate vehicle identifiers and negative capacities.
    pub fn new(vehicles: impl IntoIterator<Item = Vehicle>) -> Result<Self> {
        let vehicles: Vec<Arc<Vehicle>> = vehicles.into_iter().map(Arc::new).collect();
        let mut seen = HashSet::new();
        for vehicle in &vehicles {
            vehicle.validate()?;
            if !seen.insert(vehicle.id()) {
                return Err(Error::DuplicateVehicle(vehicle.id().to_string()));
            }
        }
        Ok(Self { vehicles })
    }

    /// Vehicles in load order.
    pub fn vehicles(&self) -> &[Arc<Vehicle>] {
        &self.vehicles
    }

    /// Vehicle with the given identifier.
    pub fn vehicle(&self, id: &str) -> Option<&Arc<Vehicle>> {
        self.vehicles.iter().find(|v| v.id() == id)
    }

    /// Number of vehicles.
    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    /// Returns `true` if there are no vehicles.
    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Position, Service};

    fn vehicle(id: &str, capacity: i32) -> Vehicle {
        Vehicle::new(id, Service::at(Position::new(0.0, 0.0)), capacity)
    }

    #[test]
    fn test_fleet_lookup() {
        let fleet = Fleet::new(vec![vehicle("a", 1), vehicle("b", 2)]).expect("valid");
        assert_eq!(fleet.vehicle("b").map(|v| v.capacity()), Some(2));
        assert!(fleet.vehicle("c").is_none());
    }

    #[test]
    fn test_fleet_rejects_duplicates() {
        let err = Fleet::new(vec![vehicle("a", 1), vehicle("a", 2)]).expect_err("duplicate");
        assert_eq!(err, Error::DuplicateVehicle("a".into()));
    }

    #[test]
    fn test_fleet_rejects_negative_capacity() {
        assert!(Fleet::new(vec![vehicle("a", -1)]).is_err());
    }
}
