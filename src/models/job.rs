//! The set of requests to serve.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use super::Trip;
use crate::error::{Error, Result};
use crate::objective::Objective;
use crate::surface::Surface;

/// Trips to serve, the objective that scores solutions, and the surface all
/// positions live on.
///
/// A job is built once by the loader and shared read-only by every
/// algorithm.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_darp::models::{Job, Position, Service, Trip};
/// use u_darp::objective::DialARideObjective;
/// use u_darp::surface::GeoSurface;
///
/// let trip = Trip::new("A", Service::at(Position::new(0.0, 0.0)), Service::at(Position::new(1.0, 1.0)));
/// let job = Job::new(
///     vec![trip],
///     Arc::new(DialARideObjective),
///     Arc::new(GeoSurface::euclidean()),
/// )
/// .unwrap();
/// assert_eq!(job.len(), 1);
/// assert!(job.trip("A").is_some());
/// ```
#[derive(Clone)]
pub struct Job {
    trips: Vec<Arc<Trip>>,
    objective: Arc<dyn Objective>,
    surface: Arc<dyn Surface>,
}

impl Job {
    /// Creates a job.
    ///
    /// Fails on duplicate trip identifiers and negative capacities.
    pub fn new(
        trips: impl IntoIterator<Item = Trip>,
        objective: Arc<dyn Objective>,
        surface: Arc<dyn Surface>,
    ) -> Result<Self> {
        let trips: Vec<Arc<Trip>> = trips.into_iter().map(Arc::new).collect();
        let mut seen = HashSet::new();
        for trip in &trips {
            trip.validate()?;
            if !seen.insert(trip.id()) {
                return Err(Error::DuplicateTrip(trip.id().to_string()));
            }
        }
        Ok(Self {
            trips,
            objective,
            surface,
        })
    }

    /// Trips in load order.
    pub fn trips(&self) -> &[Arc<Trip>] {
        &self.trips
    }

    /// Trip with the given identifier.
    pub fn trip(&self, id: &str) -> Option<&Arc<Trip>> {
        self.trips.iter().find(|t| t.id() == id)
    }

    /// Objective used to compare solutions.
    pub fn objective(&self) -> &dyn Objective {
        self.objective.as_ref()
    }

    /// Shared surface.
    pub fn surface(&self) -> &Arc<dyn Surface> {
        &self.surface
    }

    /// Number of trips.
    pub fn len(&self) -> usize {
        self.trips.len()
    }

    /// Returns `true` if there is nothing to serve.
    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }
}

impl fmt::Debug for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Job")
            .field("trips", &self.trips.len())
            .field("objective", &self.objective.name())
            .field("surface", &self.surface)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Position, Service};
    use crate::objective::DialARideObjective;
    use crate::surface::GeoSurface;

    fn trip(id: &str) -> Trip {
        Trip::new(
            id,
            Service::at(Position::new(0.0, 0.0)),
            Service::at(Position::new(1.0, 0.0)),
        )
    }

    fn build(trips: Vec<Trip>) -> Result<Job> {
        Job::new(
            trips,
            Arc::new(DialARideObjective),
            Arc::new(GeoSurface::euclidean()),
        )
    }

    #[test]
    fn test_job_new() {
        let job = build(vec![trip("a"), trip("b")]).expect("valid");
        assert_eq!(job.len(), 2);
        assert!(!job.is_empty());
        assert_eq!(job.trips()[1].id(), "b");
        assert_eq!(job.objective().name(), "dial-a-ride");
    }

    #[test]
    fn test_job_duplicate_trip() {
        let err = build(vec![trip("a"), trip("a")]).expect_err("duplicate");
        assert_eq!(err, Error::DuplicateTrip("a".into()));
    }

    #[test]
    fn test_job_negative_capacity() {
        let err = build(vec![trip("a").with_capacity(-1)]).expect_err("negative");
        assert!(matches!(err, Error::NegativeCapacity { .. }));
    }
}
