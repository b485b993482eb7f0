//! Composite local search over an initial solution.

use std::time::Instant;

use tracing::debug;

use super::config::LocalSearchConfig;
use crate::algorithm::{Algorithm, AlgorithmState};
use crate::error::{Error, Result};
use crate::models::{Planning, Route, Solution};
use crate::random::create_rng;

/// Refines an initial solution with an ordered list of strategies.
///
/// Each pass runs every strategy once. The search stops after
/// `no_improvement_threshold` consecutive passes without a change. Idle
/// vehicles get an empty route for the duration of the search so trips can be
/// reallocated to them; routes still empty at the end are dropped.
///
/// The result is never worse than the initial solution under the job's
/// objective.
#[derive(Debug)]
pub struct LocalSearchAlgorithm {
    initial: Solution,
    config: LocalSearchConfig,
    state: AlgorithmState,
    passes: usize,
}

impl LocalSearchAlgorithm {
    /// Name recorded in produced solutions.
    pub const NAME: &'static str = "local-search";

    /// Creates the algorithm.
    ///
    /// Fails on an empty strategy list or a zero threshold.
    pub fn new(initial: Solution, config: LocalSearchConfig) -> Result<Self> {
        if config.kinds.is_empty() {
            return Err(Error::InvalidParameter {
                name: "kinds",
                reason: "at least one strategy is required".into(),
            });
        }
        if config.no_improvement_threshold == 0 {
            return Err(Error::InvalidParameter {
                name: "no_improvement_threshold",
                reason: "must be at least 1".into(),
            });
        }
        Ok(Self {
            initial,
            config,
            state: AlgorithmState::Created,
            passes: 0,
        })
    }

    /// Number of passes of the last run.
    pub fn passes(&self) -> usize {
        self.passes
    }

    fn with_idle_routes(&self) -> Planning {
        let mut planning = self.initial.planning().clone();
        let surface = self.initial.job().surface();
        for vehicle in self.initial.fleet().vehicles() {
            let used = planning
                .routes()
                .iter()
                .any(|r| r.vehicle().id() == vehicle.id());
            if !used {
                let mut idle = Route::new(vehicle.clone(), surface.clone());
                idle.finish();
                planning.push(idle);
            }
        }
        planning
    }
}

impl Algorithm for LocalSearchAlgorithm {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn state(&self) -> AlgorithmState {
        self.state
    }

    #[tracing::instrument(
        level = "debug",
        name = "Local Search",
        skip(self),
        fields(seed = self.config.seed)
    )]
    fn optimize(&mut self) -> Result<Solution> {
        self.state = AlgorithmState::Optimizing;
        let start = Instant::now();
        let mut rng = create_rng(self.config.seed);
        let objective = self.initial.job().objective();
        let strategies: Vec<_> = self.config.kinds.iter().map(|k| k.build()).collect();

        let mut planning = self.with_idle_routes();
        let mut stale = 0;
        self.passes = 0;
        while stale < self.config.no_improvement_threshold {
            self.passes += 1;
            let mut improved = false;
            for strategy in &strategies {
                if strategy.improve(&mut planning, objective, &mut rng) {
                    improved = true;
                }
            }
            if improved {
                stale = 0;
            } else {
                stale += 1;
            }
            debug!(
                pass = self.passes,
                improved,
                value = objective.planning_optimization(&planning),
                "Local Search: pass done"
            );
        }
        planning.routes_mut().retain(|r| !r.is_empty());

        if objective.is_better(self.initial.planning(), &planning) {
            planning = self.initial.planning().clone();
        }
        self.state = AlgorithmState::Done;
        Ok(Solution::new(
            self.initial.fleet().clone(),
            self.initial.job().clone(),
            planning,
            Self::NAME,
            start.elapsed(),
        ))
    }
}
