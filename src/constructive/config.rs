//! Insertion configuration.

use std::sync::Arc;

use rand::RngCore;
use serde::{Deserialize, Serialize};

use super::iterator::{CandidateIterator, RankingIterator, StatelessIterator};
use super::strategy::{
    InsertionStrategy, IntensiveInsertionStrategy, SamplingInsertionStrategy,
    TailInsertionStrategy,
};
use crate::criterion::{Criterion, CriterionKind};
use crate::models::{Route, Trip};

/// Serializable selector for the built-in insertion strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StrategyKind {
    /// [`SamplingInsertionStrategy`] drawing `count` position pairs.
    Sampling {
        /// Number of position pairs drawn per call.
        count: usize,
    },
    /// [`IntensiveInsertionStrategy`].
    #[default]
    Intensive,
    /// [`TailInsertionStrategy`].
    Tail,
}

impl StrategyKind {
    /// Instantiates the strategy.
    pub fn build(self) -> Box<dyn InsertionStrategy> {
        match self {
            StrategyKind::Sampling { count } => Box::new(SamplingInsertionStrategy::new(count)),
            StrategyKind::Intensive => Box::new(IntensiveInsertionStrategy),
            StrategyKind::Tail => Box::new(TailInsertionStrategy),
        }
    }
}

/// How construction picks the next insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SelectionKind {
    /// Per-vehicle rankings, rebuilt only for the vehicle that changed.
    #[default]
    Ranking,
    /// Full routes x pending trips cross product on every step.
    Stateless,
}

impl SelectionKind {
    pub(crate) fn build(
        self,
        routes: Vec<Route>,
        pending: Vec<Arc<Trip>>,
        strategy: Box<dyn InsertionStrategy>,
        criterion: Box<dyn Criterion>,
        rcl_size: usize,
        rng: &mut dyn RngCore,
    ) -> Box<dyn CandidateIterator> {
        match self {
            SelectionKind::Ranking => Box::new(RankingIterator::new(
                routes, pending, strategy, criterion, rcl_size, rng,
            )),
            SelectionKind::Stateless => Box::new(StatelessIterator::new(
                routes, pending, strategy, criterion, rcl_size,
            )),
        }
    }
}

/// Configuration for [`InsertionAlgorithm`](super::InsertionAlgorithm).
///
/// # Examples
///
/// ```
/// use u_darp::constructive::{InsertionConfig, SelectionKind, StrategyKind};
/// use u_darp::criterion::CriterionKind;
///
/// let config = InsertionConfig::default()
///     .with_strategy(StrategyKind::Sampling { count: 20 })
///     .with_selection(SelectionKind::Stateless)
///     .with_criterion(CriterionKind::ShortestDistance)
///     .with_rcl_size(3)
///     .with_seed(42);
/// assert_eq!(config.rcl_size, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertionConfig {
    /// Which position pairs are tried.
    pub strategy: StrategyKind,

    /// Candidate iterator.
    pub selection: SelectionKind,

    /// Ranking of candidates.
    pub criterion: CriterionKind,

    /// Size of the restricted candidate list the next insertion is drawn
    /// from. 1 = greedy.
    pub rcl_size: usize,

    /// Consecutive steps without a feasible candidate before giving up.
    pub max_misses: usize,

    /// Random seed.
    pub seed: u64,
}

impl Default for InsertionConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::default(),
            selection: SelectionKind::default(),
            criterion: CriterionKind::default(),
            rcl_size: 1,
            max_misses: 8,
            seed: 0,
        }
    }
}

impl InsertionConfig {
    /// Sets the insertion strategy.
    pub fn with_strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the candidate iterator.
    pub fn with_selection(mut self, selection: SelectionKind) -> Self {
        self.selection = selection;
        self
    }

    /// Sets the ranking criterion.
    pub fn with_criterion(mut self, criterion: CriterionKind) -> Self {
        self.criterion = criterion;
        self
    }

    /// Sets the restricted candidate list size.
    pub fn with_rcl_size(mut self, rcl_size: usize) -> Self {
        self.rcl_size = rcl_size;
        self
    }

    /// Sets the miss budget.
    pub fn with_max_misses(mut self, max_misses: usize) -> Self {
        self.max_misses = max_misses;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
