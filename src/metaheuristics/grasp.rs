//! Greedy randomized adaptive search.

use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use super::config::{GraspConfig, SequentialConfig};
use crate::algorithm::{Algorithm, AlgorithmConfig, AlgorithmState};
use crate::error::{Error, Result};
use crate::models::{Fleet, Job, Solution};
use crate::random::derive_seed;

/// GRASP: a randomized construction followed by rounds of refinement.
///
/// The first solution comes from an iterative run of the configured
/// construction. Each round then runs the refinement stages as a sequential
/// pipeline on the current best, with a fresh derived seed. A round's output
/// replaces the best only when it is strictly better; the search stops after
/// `no_improvement_threshold` consecutive rounds without improvement.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_darp::algorithm::Algorithm;
/// use u_darp::metaheuristics::{GraspAlgorithm, GraspConfig};
/// use u_darp::models::{Fleet, Job, Position, Service, Trip, Vehicle};
/// use u_darp::objective::DialARideObjective;
/// use u_darp::surface::GeoSurface;
///
/// let fleet = Fleet::new(vec![Vehicle::new("v", Service::at(Position::new(0.0, 0.0)), 2)]).unwrap();
/// let trips = vec![
///     Trip::new("a", Service::at(Position::new(1.0, 0.0)), Service::at(Position::new(4.0, 0.0))),
///     Trip::new("b", Service::at(Position::new(2.0, 0.0)), Service::at(Position::new(3.0, 0.0))),
/// ];
/// let job = Job::new(trips, Arc::new(DialARideObjective), Arc::new(GeoSurface::euclidean())).unwrap();
///
/// let mut grasp = GraspAlgorithm::new(Arc::new(fleet), Arc::new(job), GraspConfig::default()).unwrap();
/// let solution = grasp.optimize().unwrap();
/// assert_eq!(solution.coverage(), 2);
/// assert!(grasp.rounds() >= 3);
/// ```
///
/// # Reference
///
/// Feo, T. A. & Resende, M. G. C. (1995). "Greedy randomized adaptive search
/// procedures", *Journal of Global Optimization* 6, 109-133.
#[derive(Debug)]
pub struct GraspAlgorithm {
    fleet: Arc<Fleet>,
    job: Arc<Job>,
    config: GraspConfig,
    state: AlgorithmState,
    rounds: usize,
}

impl GraspAlgorithm {
    /// Name recorded in produced solutions.
    pub const NAME: &'static str = "grasp";

    /// Creates the algorithm.
    ///
    /// Fails on a zero threshold or an empty stage list.
    pub fn new(fleet: Arc<Fleet>, job: Arc<Job>, config: GraspConfig) -> Result<Self> {
        if config.no_improvement_threshold == 0 {
            return Err(Error::InvalidParameter {
                name: "no_improvement_threshold",
                reason: "must be at least 1".into(),
            });
        }
        if config.stages.is_empty() {
            return Err(Error::InvalidParameter {
                name: "stages",
                reason: "at least one stage is required".into(),
            });
        }
        Ok(Self {
            fleet,
            job,
            config,
            state: AlgorithmState::Created,
            rounds: 0,
        })
    }

    /// Refinement rounds of the last run.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    fn first_solution(&self) -> Result<Solution> {
        AlgorithmConfig::Iterative(self.config.first_solution.clone())
            .with_seed(derive_seed(self.config.seed, 0))
            .build(self.fleet.clone(), self.job.clone(), None)?
            .optimize()
    }

    fn refine(&self, round: usize, best: &Solution) -> Result<Solution> {
        AlgorithmConfig::Sequential(SequentialConfig::new(self.config.stages.clone()))
            .with_seed(derive_seed(self.config.seed, round as u64 + 1))
            .build(self.fleet.clone(), self.job.clone(), Some(best.clone()))?
            .optimize()
    }
}

impl Algorithm for GraspAlgorithm {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn state(&self) -> AlgorithmState {
        self.state
    }

    #[tracing::instrument(
        level = "debug",
        name = "GRASP",
        skip(self),
        fields(seed = self.config.seed)
    )]
    fn optimize(&mut self) -> Result<Solution> {
        self.state = AlgorithmState::Optimizing;
        let start = Instant::now();
        let objective = self.job.objective();

        let mut best = self.first_solution()?;
        debug!(
            coverage = best.coverage(),
            value = best.optimization(),
            "GRASP: first solution"
        );

        self.rounds = 0;
        let mut stale = 0;
        while stale < self.config.no_improvement_threshold {
            let candidate = self.refine(self.rounds, &best)?;
            self.rounds += 1;
            let improved = objective.is_better(candidate.planning(), best.planning());
            if improved {
                best = candidate;
                stale = 0;
            } else {
                stale += 1;
            }
            debug!(
                round = self.rounds,
                improved,
                value = best.optimization(),
                "GRASP: round done"
            );
        }

        self.state = AlgorithmState::Done;
        Ok(best.with_algorithm(Self::NAME, start.elapsed()))
    }
}
