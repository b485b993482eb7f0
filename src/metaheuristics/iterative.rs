//! Best of independent seeded episodes.

use std::sync::Arc;
use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::debug;

use super::config::IterativeConfig;
use crate::algorithm::{Algorithm, AlgorithmState};
use crate::error::{Error, Result};
use crate::models::{Fleet, Job, Solution};
use crate::random::derive_seed;

/// Runs a base algorithm for a number of independently seeded episodes and
/// keeps the best solution under the job's objective.
///
/// Episodes share only the read-only fleet and job. With the `parallel`
/// feature and [`IterativeConfig::parallel`] set they run on the rayon pool;
/// results are reduced in episode order, so the outcome does not depend on
/// scheduling. Ties keep the earliest episode.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_darp::algorithm::Algorithm;
/// use u_darp::metaheuristics::{IterativeAlgorithm, IterativeConfig};
/// use u_darp::models::{Fleet, Job, Position, Service, Trip, Vehicle};
/// use u_darp::objective::DialARideObjective;
/// use u_darp::surface::GeoSurface;
///
/// let fleet = Fleet::new(vec![Vehicle::new("v", Service::at(Position::new(0.0, 0.0)), 1)]).unwrap();
/// let trip = Trip::new("a", Service::at(Position::new(1.0, 0.0)), Service::at(Position::new(2.0, 0.0)));
/// let job = Job::new(vec![trip], Arc::new(DialARideObjective), Arc::new(GeoSurface::euclidean())).unwrap();
///
/// let config = IterativeConfig::default().with_episodes(3).with_seed(1);
/// let mut algorithm = IterativeAlgorithm::new(Arc::new(fleet), Arc::new(job), None, config).unwrap();
/// let solution = algorithm.optimize().unwrap();
/// assert_eq!(solution.coverage(), 1);
/// assert_eq!(solution.algorithm(), "iterative");
/// ```
#[derive(Debug)]
pub struct IterativeAlgorithm {
    fleet: Arc<Fleet>,
    job: Arc<Job>,
    initial: Option<Solution>,
    config: IterativeConfig,
    state: AlgorithmState,
}

impl IterativeAlgorithm {
    /// Name recorded in produced solutions.
    pub const NAME: &'static str = "iterative";

    /// Creates the algorithm. `initial` is handed to every episode.
    ///
    /// Fails if `episodes` is zero.
    pub fn new(
        fleet: Arc<Fleet>,
        job: Arc<Job>,
        initial: Option<Solution>,
        config: IterativeConfig,
    ) -> Result<Self> {
        if config.episodes == 0 {
            return Err(Error::InvalidParameter {
                name: "episodes",
                reason: "must be at least 1".into(),
            });
        }
        Ok(Self {
            fleet,
            job,
            initial,
            config,
            state: AlgorithmState::Created,
        })
    }

    fn episode(&self, index: usize) -> Result<Solution> {
        let seed = derive_seed(self.config.seed, index as u64);
        let solution = self
            .config
            .base
            .as_ref()
            .clone()
            .with_seed(seed)
            .build(self.fleet.clone(), self.job.clone(), self.initial.clone())?
            .optimize()?;
        debug!(
            episode = index,
            coverage = solution.coverage(),
            value = solution.optimization(),
            "Iterative: episode done"
        );
        Ok(solution)
    }

    fn run_episodes(&self) -> Result<Vec<Solution>> {
        #[cfg(feature = "parallel")]
        {
            if self.config.parallel {
                return (0..self.config.episodes)
                    .into_par_iter()
                    .map(|e| self.episode(e))
                    .collect();
            }
        }
        (0..self.config.episodes).map(|e| self.episode(e)).collect()
    }
}

impl Algorithm for IterativeAlgorithm {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn state(&self) -> AlgorithmState {
        self.state
    }

    #[tracing::instrument(
        level = "debug",
        name = "Iterative",
        skip(self),
        fields(episodes = self.config.episodes, seed = self.config.seed)
    )]
    fn optimize(&mut self) -> Result<Solution> {
        self.state = AlgorithmState::Optimizing;
        let start = Instant::now();
        let solutions = self.run_episodes()?;
        let best = self
            .job
            .objective()
            .best(solutions.iter().map(Some))
            .cloned()
            .ok_or_else(|| Error::InvalidParameter {
                name: "episodes",
                reason: "must be at least 1".into(),
            })?;
        self.state = AlgorithmState::Done;
        Ok(best.with_algorithm(Self::NAME, start.elapsed()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::AlgorithmConfig;
    use crate::constructive::{InsertionConfig, StrategyKind};
    use crate::objective::{DialARideObjective, Objective};
    use crate::test_utils::random_instance;

    fn config(episodes: usize) -> IterativeConfig {
        IterativeConfig::new(AlgorithmConfig::Insertion(
            InsertionConfig::default()
                .with_strategy(StrategyKind::Sampling { count: 5 })
                .with_rcl_size(3),
        ))
        .with_episodes(episodes)
        .with_seed(17)
    }

    fn run(episodes: usize, parallel: bool) -> Solution {
        let (fleet, job) = random_instance(4, 9, 3, Arc::new(DialARideObjective));
        IterativeAlgorithm::new(fleet, job, None, config(episodes).with_parallel(parallel))
            .expect("valid")
            .optimize()
            .expect("runs")
    }

    #[test]
    fn test_reproducible() {
        assert_eq!(run(4, false).planning(), run(4, false).planning());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        assert_eq!(run(6, true).planning(), run(6, false).planning());
    }

    #[test]
    fn test_best_episode_wins() {
        let (fleet, job) = random_instance(4, 9, 3, Arc::new(DialARideObjective));
        let best = IterativeAlgorithm::new(fleet.clone(), job.clone(), None, config(5))
            .expect("valid")
            .optimize()
            .expect("runs");
        let objective: &dyn Objective = job.objective();
        for e in 0..5 {
            let single = AlgorithmConfig::Insertion(
                InsertionConfig::default()
                    .with_strategy(StrategyKind::Sampling { count: 5 })
                    .with_rcl_size(3),
            )
            .with_seed(derive_seed(17, e))
            .build(fleet.clone(), job.clone(), None)
            .expect("valid")
            .optimize()
            .expect("runs");
            assert!(!objective.is_better(single.planning(), best.planning()));
        }
    }

    #[test]
    fn test_rejects_zero_episodes() {
        let (fleet, job) = random_instance(0, 1, 1, Arc::new(DialARideObjective));
        assert!(IterativeAlgorithm::new(fleet, job, None, config(0)).is_err());
    }
}
