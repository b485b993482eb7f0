//! Insertion-based construction.

use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use super::config::InsertionConfig;
use super::iterator::InsertionStep;
use crate::algorithm::{Algorithm, AlgorithmState};
use crate::error::{Error, Result};
use crate::models::{Fleet, Job, Planning, Route, Solution};
use crate::random::create_rng;

/// Builds a planning from scratch by repeatedly committing the insertion
/// its candidate iterator proposes.
///
/// Every vehicle starts with an empty route. Construction stops when the
/// iterator is exhausted or after `max_misses` consecutive misses; trips
/// that could not be placed stay unplanned. Routes left empty are dropped and
/// the others are finished.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_darp::algorithm::Algorithm;
/// use u_darp::constructive::{InsertionAlgorithm, InsertionConfig};
/// use u_darp::models::{Fleet, Job, Position, Service, Trip, Vehicle};
/// use u_darp::objective::DialARideObjective;
/// use u_darp::surface::GeoSurface;
///
/// let fleet = Fleet::new(vec![Vehicle::new("v", Service::at(Position::new(0.0, 0.0)), 2)]).unwrap();
/// let trips = vec![
///     Trip::new("a", Service::at(Position::new(1.0, 0.0)), Service::at(Position::new(2.0, 0.0))),
///     Trip::new("b", Service::at(Position::new(0.0, 1.0)), Service::at(Position::new(0.0, 2.0))),
/// ];
/// let job = Job::new(trips, Arc::new(DialARideObjective), Arc::new(GeoSurface::euclidean())).unwrap();
///
/// let mut algorithm = InsertionAlgorithm::new(Arc::new(fleet), Arc::new(job), InsertionConfig::default()).unwrap();
/// let solution = algorithm.optimize().unwrap();
/// assert_eq!(solution.coverage(), 2);
/// assert!(solution.feasible());
/// ```
#[derive(Debug)]
pub struct InsertionAlgorithm {
    fleet: Arc<Fleet>,
    job: Arc<Job>,
    config: InsertionConfig,
    state: AlgorithmState,
}

impl InsertionAlgorithm {
    /// Name recorded in produced solutions.
    pub const NAME: &'static str = "insertion";

    /// Creates the algorithm.
    ///
    /// Fails if `rcl_size` is zero.
    pub fn new(fleet: Arc<Fleet>, job: Arc<Job>, config: InsertionConfig) -> Result<Self> {
        if config.rcl_size == 0 {
            return Err(Error::InvalidParameter {
                name: "rcl_size",
                reason: "must be at least 1".into(),
            });
        }
        Ok(Self {
            fleet,
            job,
            config,
            state: AlgorithmState::Created,
        })
    }

    /// Configuration in use.
    pub fn config(&self) -> &InsertionConfig {
        &self.config
    }
}

impl Algorithm for InsertionAlgorithm {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn state(&self) -> AlgorithmState {
        self.state
    }

    #[tracing::instrument(
        level = "debug",
        name = "Insertion",
        skip(self),
        fields(seed = self.config.seed)
    )]
    fn optimize(&mut self) -> Result<Solution> {
        self.state = AlgorithmState::Optimizing;
        let start = Instant::now();
        let mut rng = create_rng(self.config.seed);

        let routes: Vec<Route> = self
            .fleet
            .vehicles()
            .iter()
            .map(|v| Route::new(v.clone(), self.job.surface().clone()))
            .collect();
        let mut iterator = self.config.selection.build(
            routes,
            self.job.trips().to_vec(),
            self.config.strategy.build(),
            self.config.criterion.build(),
            self.config.rcl_size,
            &mut rng,
        );

        let mut misses = 0;
        loop {
            match iterator.next_step(&mut rng) {
                InsertionStep::Candidate(candidate) => {
                    misses = 0;
                    iterator.commit(candidate, &mut rng);
                }
                InsertionStep::Miss => {
                    misses += 1;
                    if misses >= self.config.max_misses {
                        debug!(misses, "Insertion: miss budget spent");
                        break;
                    }
                }
                InsertionStep::Exhausted => break,
            }
        }
        let unplanned = iterator.pending().len();

        let mut planning = Planning::new(
            iterator
                .into_routes()
                .into_iter()
                .filter(|r| !r.is_empty())
                .collect(),
        );
        planning.finish();
        debug!(
            coverage = planning.coverage(),
            unplanned,
            routes = planning.len(),
            "Insertion: done"
        );

        self.state = AlgorithmState::Done;
        Ok(Solution::new(
            self.fleet.clone(),
            self.job.clone(),
            planning,
            Self::NAME,
            start.elapsed(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructive::{SelectionKind, StrategyKind};
    use crate::criterion::CriterionKind;
    use crate::evaluation::check_planning;
    use crate::models::StopKind;
    use crate::objective::DialARideObjective;
    use crate::test_utils::{random_instance, scenario_one};

    fn run(fleet: Arc<Fleet>, job: Arc<Job>, config: InsertionConfig) -> Solution {
        InsertionAlgorithm::new(fleet, job, config)
            .expect("valid")
            .optimize()
            .expect("runs")
    }

    #[test]
    fn test_tail_insertion_merges_shared_stop() {
        let (fleet, job) = scenario_one();
        let config = InsertionConfig::default().with_strategy(StrategyKind::Tail);
        let solution = run(fleet, job, config);
        let route = &solution.planning().routes()[0];

        let body: Vec<(usize, usize)> = route
            .stops()
            .iter()
            .filter(|s| s.kind() == StopKind::Service)
            .map(|s| (s.pickups().len(), s.deliveries().len()))
            .collect();
        // A.pickup, A.delivery + B.pickup, B.delivery
        assert_eq!(body, vec![(1, 0), (1, 1), (0, 1)]);
        let shared = route.stop(2).expect("merged stop");
        let a = route.find_trip("A").expect("A planned");
        let b = route.find_trip("B").expect("B planned");
        assert_eq!(shared.deliveries(), &[a]);
        assert_eq!(shared.pickups(), &[b]);

        let open_distance: f64 = (1..route.body_len()).map(|k| route.leg_distance(k)).sum();
        let expected = 2.0_f64.sqrt() + 9.0 * 2.0_f64.sqrt();
        assert!((open_distance - expected).abs() < 1e-9);
        assert!(solution.feasible());
    }

    #[test]
    fn test_every_selection_and_strategy_is_consistent() {
        let strategies = [
            StrategyKind::Intensive,
            StrategyKind::Tail,
            StrategyKind::Sampling { count: 6 },
        ];
        let selections = [SelectionKind::Ranking, SelectionKind::Stateless];
        for strategy in strategies {
            for selection in selections {
                let (fleet, job) = random_instance(21, 8, 2, Arc::new(DialARideObjective));
                let config = InsertionConfig::default()
                    .with_strategy(strategy)
                    .with_selection(selection)
                    .with_criterion(CriterionKind::ShortestDistance)
                    .with_rcl_size(2)
                    .with_seed(5);
                let solution = run(fleet, job, config);
                assert!(check_planning(solution.planning()).is_empty());
                assert!(solution
                    .planning()
                    .routes()
                    .iter()
                    .all(|r| r.is_finished() && !r.is_empty()));
                assert_eq!(solution.coverage() + solution.unplanned_trips().len(), 8);
            }
        }
    }

    #[test]
    fn test_same_seed_same_solution() {
        let (fleet, job) = random_instance(3, 10, 3, Arc::new(DialARideObjective));
        let config = InsertionConfig::default()
            .with_strategy(StrategyKind::Sampling { count: 4 })
            .with_rcl_size(3)
            .with_seed(99);
        let a = run(fleet.clone(), job.clone(), config.clone());
        let b = run(fleet, job, config);
        assert_eq!(a.planning(), b.planning());
    }

    #[test]
    fn test_sampling_zero_plans_nothing() {
        let (fleet, job) = scenario_one();
        let config = InsertionConfig::default()
            .with_strategy(StrategyKind::Sampling { count: 0 })
            .with_selection(SelectionKind::Stateless)
            .with_max_misses(3);
        let solution = run(fleet, job, config);
        assert_eq!(solution.coverage(), 0);
        assert!(solution.planning().is_empty());
        assert_eq!(solution.unplanned_trips().len(), 2);
    }

    #[test]
    fn test_rejects_zero_rcl() {
        let (fleet, job) = scenario_one();
        let err = InsertionAlgorithm::new(fleet, job, InsertionConfig::default().with_rcl_size(0))
            .expect_err("invalid");
        assert!(matches!(err, Error::InvalidParameter { name: "rcl_size", .. }));
    }
}
