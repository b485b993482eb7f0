//! Metaheuristic configuration.

use serde::{Deserialize, Serialize};

use crate::algorithm::AlgorithmConfig;
use crate::constructive::InsertionConfig;
use crate::local_search::LocalSearchConfig;

/// Configuration for [`IterativeAlgorithm`](super::IterativeAlgorithm).
///
/// # Examples
///
/// ```
/// use u_darp::algorithm::AlgorithmConfig;
/// use u_darp::constructive::InsertionConfig;
/// use u_darp::metaheuristics::IterativeConfig;
///
/// let config = IterativeConfig::new(AlgorithmConfig::Insertion(InsertionConfig::default().with_rcl_size(3)))
///     .with_episodes(16)
///     .with_parallel(true)
///     .with_seed(42);
/// assert_eq!(config.episodes, 16);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterativeConfig {
    /// Algorithm run once per episode.
    pub base: Box<AlgorithmConfig>,

    /// Number of independent episodes.
    pub episodes: usize,

    /// Whether to run episodes on the rayon pool. Only honoured when the
    /// `parallel` feature is enabled; the result is the same either way.
    #[serde(default)]
    pub parallel: bool,

    /// Random seed. Episode `e` runs with `derive_seed(seed, e)`.
    pub seed: u64,
}

impl IterativeConfig {
    /// Creates a configuration running `base` for 8 episodes.
    pub fn new(base: AlgorithmConfig) -> Self {
        Self {
            base: Box::new(base),
            episodes: 8,
            parallel: false,
            seed: 0,
        }
    }

    /// Sets the episode count.
    pub fn with_episodes(mut self, episodes: usize) -> Self {
        self.episodes = episodes;
        self
    }

    /// Enables or disables parallel episodes.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

impl Default for IterativeConfig {
    /// Randomized insertion (restricted candidate list of 3).
    fn default() -> Self {
        Self::new(AlgorithmConfig::Insertion(
            InsertionConfig::default().with_rcl_size(3),
        ))
    }
}

/// Configuration for [`SequentialAlgorithm`](super::SequentialAlgorithm).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SequentialConfig {
    /// Stages in execution order; each gets the previous output as its
    /// initial solution.
    pub stages: Vec<AlgorithmConfig>,
}

impl SequentialConfig {
    /// Creates a configuration from stages.
    pub fn new(stages: Vec<AlgorithmConfig>) -> Self {
        Self { stages }
    }
}

/// Configuration for [`GraspAlgorithm`](super::GraspAlgorithm).
///
/// # Examples
///
/// ```
/// use u_darp::metaheuristics::GraspConfig;
///
/// let config = GraspConfig::default()
///     .with_no_improvement_threshold(2)
///     .with_seed(3);
/// assert_eq!(config.no_improvement_threshold, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraspConfig {
    /// Randomized construction of the first solution.
    pub first_solution: IterativeConfig,

    /// Refinement stages run each round, chained like a sequential
    /// algorithm.
    pub stages: Vec<AlgorithmConfig>,

    /// Consecutive non-improving rounds before stopping.
    pub no_improvement_threshold: usize,

    /// Random seed.
    pub seed: u64,
}

impl Default for GraspConfig {
    fn default() -> Self {
        Self {
            first_solution: IterativeConfig::default(),
            stages: vec![AlgorithmConfig::LocalSearch(LocalSearchConfig::default())],
            no_improvement_threshold: 3,
            seed: 0,
        }
    }
}

impl GraspConfig {
    /// Sets the first-solution construction.
    pub fn with_first_solution(mut self, first_solution: IterativeConfig) -> Self {
        self.first_solution = first_solution;
        self
    }

    /// Sets the refinement stages.
    pub fn with_stages(mut self, stages: Vec<AlgorithmConfig>) -> Self {
        self.stages = stages;
        self
    }

    /// Sets the no-improvement threshold.
    pub fn with_no_improvement_threshold(mut self, threshold: usize) -> Self {
        self.no_improvement_threshold = threshold;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
