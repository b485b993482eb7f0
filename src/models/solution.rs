//! The output of an algorithm run.

use std::sync::Arc;
use std::time::Duration;

use super::{Fleet, Job, Planning, Trip};

/// A planning together with the inputs that produced it, the name of the
/// algorithm and the time it took.
///
/// This is the unit handed to storage and reporting collaborators, and the
/// `initial` input of refinement algorithms.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::time::Duration;
/// use u_darp::models::{Fleet, Job, Planning, Solution};
/// use u_darp::objective::DialARideObjective;
/// use u_darp::surface::GeoSurface;
///
/// let fleet = Arc::new(Fleet::new(vec![]).unwrap());
/// let job = Arc::new(Job::new(vec![], Arc::new(DialARideObjective), Arc::new(GeoSurface::euclidean())).unwrap());
/// let solution = Solution::new(fleet, job, Planning::default(), "manual", Duration::ZERO);
/// assert_eq!(solution.algorithm(), "manual");
/// assert_eq!(solution.coverage(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct Solution {
    fleet: Arc<Fleet>,
    job: Arc<Job>,
    planning: Planning,
    algorithm: String,
    computation_time: Duration,
}

impl Solution {
    /// Creates a solution.
    pub fn new(
        fleet: Arc<Fleet>,
        job: Arc<Job>,
        planning: Planning,
        algorithm: impl Into<String>,
        computation_time: Duration,
    ) -> Self {
        Self {
            fleet,
            job,
            planning,
            algorithm: algorithm.into(),
            computation_time,
        }
    }

    /// Fleet the planning was built for.
    pub fn fleet(&self) -> &Arc<Fleet> {
        &self.fleet
    }

    /// Job the planning was built for.
    pub fn job(&self) -> &Arc<Job> {
        &self.job
    }

    /// The routes.
    pub fn planning(&self) -> &Planning {
        &self.planning
    }

    /// Consumes the solution and returns its planning.
    pub fn into_planning(self) -> Planning {
        self.planning
    }

    /// Name of the producing algorithm.
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    /// Wall-clock time spent producing the planning.
    pub fn computation_time(&self) -> Duration {
        self.computation_time
    }

    /// Relabels the solution with the algorithm that returns it.
    pub fn with_algorithm(
        mut self,
        algorithm: impl Into<String>,
        computation_time: Duration,
    ) -> Self {
        self.algorithm = algorithm.into();
        self.computation_time = computation_time;
        self
    }

    /// Objective value under the job's objective.
    pub fn optimization(&self) -> f64 {
        self.job.objective().optimization(self)
    }

    /// Number of planned trips.
    pub fn coverage(&self) -> usize {
        self.planning.coverage()
    }

    /// Returns `true` if every route is feasible.
    pub fn feasible(&self) -> bool {
        self.planning.feasible()
    }

    /// Trips of the job that no route serves.
    pub fn unplanned_trips(&self) -> Vec<&Arc<Trip>> {
        let planned = self.planning.trip_ids();
        self.job
            .trips()
            .iter()
            .filter(|t| !planned.contains(t.id()))
            .collect()
    }
}

impl AsRef<Planning> for Solution {
    fn as_ref(&self) -> &Planning {
        &self.planning
    }
}
