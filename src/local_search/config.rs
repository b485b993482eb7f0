//! Local-search configuration.

use serde::{Deserialize, Serialize};

use super::{LocalSearchStrategy, OneShift, Reallocation, TwoOpt};
use crate::constructive::StrategyKind;

/// Serializable selector for the built-in local-search strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocalSearchKind {
    /// [`OneShift`].
    OneShift,
    /// [`TwoOpt`].
    TwoOpt,
    /// [`Reallocation`] placing moved trips with `strategy`.
    Reallocation {
        /// Insertion strategy on the receiving route.
        strategy: StrategyKind,
    },
}

impl LocalSearchKind {
    /// Instantiates the strategy.
    pub fn build(self) -> Box<dyn LocalSearchStrategy> {
        match self {
            LocalSearchKind::OneShift => Box::new(OneShift),
            LocalSearchKind::TwoOpt => Box::new(TwoOpt),
            LocalSearchKind::Reallocation { strategy } => Box::new(Reallocation::new(strategy)),
        }
    }
}

/// Configuration for [`LocalSearchAlgorithm`](super::LocalSearchAlgorithm).
///
/// # Examples
///
/// ```
/// use u_darp::local_search::{LocalSearchConfig, LocalSearchKind};
///
/// let config = LocalSearchConfig::default()
///     .with_kinds(vec![LocalSearchKind::TwoOpt])
///     .with_no_improvement_threshold(3)
///     .with_seed(1);
/// assert_eq!(config.kinds.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalSearchConfig {
    /// Strategies applied in order on every pass.
    pub kinds: Vec<LocalSearchKind>,

    /// Consecutive passes without improvement before stopping.
    pub no_improvement_threshold: usize,

    /// Random seed, used by sampling insertion strategies.
    pub seed: u64,
}

impl Default for LocalSearchConfig {
    fn default() -> Self {
        Self {
            kinds: vec![
                LocalSearchKind::OneShift,
                LocalSearchKind::TwoOpt,
                LocalSearchKind::Reallocation {
                    strategy: StrategyKind::Intensive,
                },
            ],
            no_improvement_threshold: 1,
            seed: 0,
        }
    }
}

impl LocalSearchConfig {
    /// Sets the strategies.
    pub fn with_kinds(mut self, kinds: Vec<LocalSearchKind>) -> Self {
        self.kinds = kinds;
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
