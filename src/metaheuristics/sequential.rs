//! Staged pipelines.

use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use super::config::SequentialConfig;
use crate::algorithm::{Algorithm, AlgorithmState};
use crate::error::{Error, Result};
use crate::models::{Fleet, Job, Solution};

/// Runs stages in order, feeding each stage's output to the next one as its
/// initial solution.
///
/// The first stage receives the optional initial solution passed at
/// construction, so a pipeline starting with a refinement stage needs one.
#[derive(Debug)]
pub struct SequentialAlgorithm {
    fleet: Arc<Fleet>,
    job: Arc<Job>,
    initial: Option<Solution>,
    config: SequentialConfig,
    state: AlgorithmState,
}

impl SequentialAlgorithm {
    /// Name recorded in produced solutions.
    pub const NAME: &'static str = "sequential";

    /// Creates the pipeline. Fails on an empty stage list.
    pub fn new(
        fleet: Arc<Fleet>,
        job: Arc<Job>,
        initial: Option<Solution>,
        config: SequentialConfig,
    ) -> Result<Self> {
        if config.stages.is_empty() {
            return Err(Error::InvalidParameter {
                name: "stages",
                reason: "at least one stage is required".into(),
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
}

impl Algorithm for SequentialAlgorithm {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn state(&self) -> AlgorithmState {
        self.state
    }

    #[tracing::instrument(
        level = "debug",
        name = "Sequential",
        skip(self),
        fields(stages = self.config.stages.len())
    )]
    fn optimize(&mut self) -> Result<Solution> {
        self.state = AlgorithmState::Optimizing;
        let start = Instant::now();
        let mut current = self.initial.clone();
        for (index, stage) in self.config.stages.iter().enumerate() {
            let solution = stage
                .build(self.fleet.clone(), self.job.clone(), current.take())?
                .optimize()?;
            debug!(
                stage = index,
                algorithm = stage.name(),
                coverage = solution.coverage(),
                value = solution.optimization(),
                "Sequential: stage done"
            );
            current = Some(solution);
        }
        let solution = current.ok_or_else(|| Error::InvalidParameter {
            name: "stages",
            reason: "at least one stage is required".into(),
        })?;
        self.state = AlgorithmState::Done;
        Ok(solution.with_algorithm(Self::NAME, start.elapsed()))
    }
}
