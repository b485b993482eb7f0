//! The common algorithm contract and its configuration factory.
//!
//! Every optimizer (construction, local search, metaheuristics) implements
//! [`Algorithm`]. [`AlgorithmConfig`] is a serializable description of one,
//! and [`AlgorithmConfig::build`] binds it to a fleet, a job and an optional
//! initial solution. Composite algorithms hold configurations, not built
//! algorithms, and build their parts on demand.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::constructive::{InsertionAlgorithm, InsertionConfig};
use crate::error::{Error, Result};
use crate::local_search::{LocalSearchAlgorithm, LocalSearchConfig};
use crate::metaheuristics::{
    GraspAlgorithm, GraspConfig, IterativeAlgorithm, IterativeConfig, SequentialAlgorithm,
    SequentialConfig,
};
use crate::models::{Fleet, Job, Solution};
use crate::random::derive_seed;

/// Lifecycle of an algorithm instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmState {
    /// Built, not run yet.
    Created,
    /// Inside [`Algorithm::optimize`].
    Optimizing,
    /// Produced a solution. Running again reproduces it.
    Done,
}

/// An optimizer bound to a fleet and a job.
pub trait Algorithm: Send {
    /// Short identifier, recorded in the produced [`Solution`].
    fn name(&self) -> &str;

    /// Current lifecycle state.
    fn state(&self) -> AlgorithmState;

    /// Runs the algorithm.
    ///
    /// Infeasibility is never an error: a construction that cannot place
    /// every trip returns a lower-coverage solution.
    fn optimize(&mut self) -> Result<Solution>;
}

/// Serializable description of an algorithm.
///
/// # Examples
///
/// ```
/// use u_darp::algorithm::AlgorithmConfig;
/// use u_darp::constructive::InsertionConfig;
/// use u_darp::metaheuristics::IterativeConfig;
///
/// let config = AlgorithmConfig::Iterative(
///     IterativeConfig::new(AlgorithmConfig::Insertion(InsertionConfig::default())).with_episodes(4),
/// )
/// .with_seed(7);
/// assert_eq!(config.name(), "iterative");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AlgorithmConfig {
    /// Insertion-based construction.
    Insertion(InsertionConfig),
    /// Local-search refinement of an initial solution.
    LocalSearch(LocalSearchConfig),
    /// Best of independent seeded episodes.
    Iterative(IterativeConfig),
    /// Stages chained output to input.
    Sequential(SequentialConfig),
    /// Randomized construction plus iterated refinement.
    Grasp(GraspConfig),
}

impl AlgorithmConfig {
    /// Identifier of the configured algorithm.
    pub fn name(&self) -> &'static str {
        match self {
            AlgorithmConfig::Insertion(_) => InsertionAlgorithm::NAME,
            AlgorithmConfig::LocalSearch(_) => LocalSearchAlgorithm::NAME,
            AlgorithmConfig::Iterative(_) => IterativeAlgorithm::NAME,
            AlgorithmConfig::Sequential(_) => SequentialAlgorithm::NAME,
            AlgorithmConfig::Grasp(_) => GraspAlgorithm::NAME,
        }
    }

    /// Rebinds every seed of the configuration tree, deriving distinct
    /// seeds for nested stages.
    pub fn with_seed(self, seed: u64) -> Self {
        match self {
            AlgorithmConfig::Insertion(c) => AlgorithmConfig::Insertion(c.with_seed(seed)),
            AlgorithmConfig::LocalSearch(c) => AlgorithmConfig::LocalSearch(c.with_seed(seed)),
            AlgorithmConfig::Iterative(c) => AlgorithmConfig::Iterative(c.with_seed(seed)),
            AlgorithmConfig::Sequential(c) => AlgorithmConfig::Sequential(SequentialConfig {
                stages: c
                    .stages
                    .into_iter()
                    .enumerate()
                    .map(|(i, stage)| stage.with_seed(derive_seed(seed, i as u64)))
                    .collect(),
            }),
            AlgorithmConfig::Grasp(c) => AlgorithmConfig::Grasp(c.with_seed(seed)),
        }
    }

    /// Builds the algorithm.
    ///
    /// Fails with [`Error::MissingInitial`] when a refinement algorithm gets
    /// no initial solution, and with [`Error::InvalidParameter`] on
    /// out-of-range parameters.
    pub fn build(
        &self,
        fleet: Arc<Fleet>,
        job: Arc<Job>,
        initial: Option<Solution>,
    ) -> Result<Box<dyn Algorithm>> {
        Ok(match self {
            AlgorithmConfig::Insertion(c) => {
                Box::new(InsertionAlgorithm::new(fleet, job, c.clone())?)
            }
            AlgorithmConfig::LocalSearch(c) => {
                let initial =
                    initial.ok_or_else(|| Error::MissingInitial(self.name().to_string()))?;
                Box::new(LocalSearchAlgorithm::new(initial, c.clone())?)
            }
            AlgorithmConfig::Iterative(c) => {
                Box::new(IterativeAlgorithm::new(fleet, job, initial, c.clone())?)
            }
            AlgorithmConfig::Sequential(c) => {
                Box::new(SequentialAlgorithm::new(fleet, job, initial, c.clone())?)
            }
            AlgorithmConfig::Grasp(c) => Box::new(GraspAlgorithm::new(fleet, job, c.clone())?),
        })
    }
}
