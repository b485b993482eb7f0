//! Stateful candidate selection for insertion-based construction.

use std::sync::Arc;

use rand::{Rng, RngCore};

use super::strategy::InsertionStrategy;
use crate::criterion::Criterion;
use crate::models::{Route, Trip};

/// Outcome of asking a candidate iterator for the next insertion.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertionStep {
    /// A feasible route extended by one pending trip.
    Candidate(Route),
    /// No feasible candidate this time; another attempt may find one.
    Miss,
    /// Nothing left to try; construction ends.
    Exhausted,
}

/// Source of insertion candidates over a fleet's routes.
///
/// Every committed candidate replaces the route of its vehicle and removes
/// its trip from the pending set.
pub trait CandidateIterator: Send {
    /// Proposes the next insertion.
    fn next_step(&mut self, rng: &mut dyn RngCore) -> InsertionStep;

    /// Accepts a candidate previously returned by [`next_step`](Self::next_step).
    fn commit(&mut self, candidate: Route, rng: &mut dyn RngCore);

    /// Trips not planned yet.
    fn pending(&self) -> &[Arc<Trip>];

    /// Current routes, one per vehicle.
    fn into_routes(self: Box<Self>) -> Vec<Route>;
}

/// Draws uniformly among the `rcl_size` best candidates.
pub(crate) fn pick(
    criterion: &dyn Criterion,
    candidates: Vec<Route>,
    rcl_size: usize,
    rng: &mut dyn RngCore,
) -> Option<Route> {
    let mut restricted = criterion.nbest(rcl_size.max(1), candidates);
    if restricted.is_empty() {
        return None;
    }
    let k = rng.random_range(0..restricted.len());
    Some(restricted.swap_remove(k))
}

fn committed_trip(candidate: &Route) -> Option<String> {
    candidate
        .last_planned_trip()
        .map(|pt| pt.trip().id().to_string())
}

/// Keeps, per vehicle, the feasible insertions of every pending trip ranked
/// by the criterion.
///
/// A commit rebuilds the ranking of the vehicle that changed and only prunes
/// the committed trip from the others. The iterator is exhausted once every
/// ranking is empty.
#[derive(Debug)]
pub struct RankingIterator {
    routes: Vec<Route>,
    rankings: Vec<Vec<Route>>,
    pending: Vec<Arc<Trip>>,
    strategy: Box<dyn InsertionStrategy>,
    criterion: Box<dyn Criterion>,
    rcl_size: usize,
}

impl RankingIterator {
    /// Creates the iterator and ranks every vehicle.
    pub fn new(
        routes: Vec<Route>,
        pending: Vec<Arc<Trip>>,
        strategy: Box<dyn InsertionStrategy>,
        criterion: Box<dyn Criterion>,
        rcl_size: usize,
        rng: &mut dyn RngCore,
    ) -> Self {
        let mut iterator = Self {
            routes,
            rankings: Vec::new(),
            pending,
            strategy,
            criterion,
            rcl_size,
        };
        let rankings = iterator
            .routes
            .iter()
            .map(|route| iterator.rank(route, rng))
            .collect();
        iterator.rankings = rankings;
        iterator
    }

    fn rank(&self, route: &Route, rng: &mut dyn RngCore) -> Vec<Route> {
        let candidates = self.strategy.compute(route, &self.pending, true, rng);
        self.criterion.sorted(candidates)
    }

    /// Current per-vehicle rankings, best first.
    pub fn rankings(&self) -> &[Vec<Route>] {
        &self.rankings
    }
}

impl CandidateIterator for RankingIterator {
    fn next_step(&mut self, rng: &mut dyn RngCore) -> InsertionStep {
        let heads: Vec<Route> = self
            .rankings
            .iter()
            .flat_map(|ranking| ranking.iter().take(self.rcl_size.max(1)).cloned())
            .collect();
        match pick(self.criterion.as_ref(), heads, self.rcl_size, rng) {
            Some(candidate) => InsertionStep::Candidate(candidate),
            None => InsertionStep::Exhausted,
        }
    }

    fn commit(&mut self, candidate: Route, rng: &mut dyn RngCore) {
        let vehicle = candidate.vehicle().id();
        let Some(v) = self.routes.iter().position(|r| r.vehicle().id() == vehicle) else {
            return;
        };
        let Some(trip_id) = committed_trip(&candidate) else {
            return;
        };
        self.pending.retain(|t| t.id() != trip_id);
        self.routes[v] = candidate;
        self.rankings[v] = self.rank(&self.routes[v], rng);
        for (other, ranking) in self.rankings.iter_mut().enumerate() {
            if other != v {
                ranking.retain(|r| committed_trip(r).as_deref() != Some(trip_id.as_str()));
            }
        }
    }

    fn pending(&self) -> &[Arc<Trip>] {
        &self.pending
    }

    fn into_routes(self: Box<Self>) -> Vec<Route> {
        self.routes
    }
}

/// Recomputes the full routes x pending trips cross product on every step.
///
/// Simpler than [`RankingIterator`] and more expensive per step. An empty
/// cross product is a [`InsertionStep::Miss`], since a sampling strategy may
/// find candidates on the next attempt.
#[derive(Debug)]
pub struct StatelessIterator {
    routes: Vec<Route>,
    pending: Vec<Arc<Trip>>,
    strategy: Box<dyn InsertionStrategy>,
    criterion: Box<dyn Criterion>,
    rcl_size: usize,
}

impl StatelessIterator {
    /// Creates the iterator.
    pub fn new(
        routes: Vec<Route>,
        pending: Vec<Arc<Trip>>,
        strategy: Box<dyn InsertionStrategy>,
        criterion: Box<dyn Criterion>,
        rcl_size: usize,
    ) -> Self {
        Self {
            routes,
            pending,
            strategy,
            criterion,
            rcl_size,
        }
    }
}

impl CandidateIterator for StatelessIterator {
    fn next_step(&mut self, rng: &mut dyn RngCore) -> InsertionStep {
        if self.pending.is_empty() || self.routes.is_empty() {
            return InsertionStep::Exhausted;
        }
        let mut candidates = Vec::new();
        for route in &self.routes {
            candidates.extend(self.strategy.compute(route, &self.pending, true, rng));
        }
        match pick(self.criterion.as_ref(), candidates, self.rcl_size, rng) {
            Some(candidate) => InsertionStep::Candidate(candidate),
            None => InsertionStep::Miss,
        }
    }

    fn commit(&mut self, candidate: Route, _rng: &mut dyn RngCore) {
        let vehicle = candidate.vehicle().id();
        let Some(v) = self.routes.iter().position(|r| r.vehicle().id() == vehicle) else {
            return;
        };
        let Some(trip_id) = committed_trip(&candidate) else {
            return;
        };
        self.pending.retain(|t| t.id() != trip_id);
        self.routes[v] = candidate;
    }

    fn pending(&self) -> &[Arc<Trip>] {
        &self.pending
    }

    fn into_routes(self: Box<Self>) -> Vec<Route> {
        self.routes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructive::{IntensiveInsertionStrategy, SamplingInsertionStrategy};
    use crate::criterion::ShortestDistanceCriterion;
    use crate::random::create_rng;
    use crate::test_utils::{depot_vehicle, route_for, simple_trip, windowed_trip};

    fn routes() -> Vec<Route> {
        vec![
            route_for(depot_vehicle("near", 0.0, 0.0, 0.0, 1000.0, 1)),
            route_for(depot_vehicle("far", 50.0, 0.0, 0.0, 1000.0, 1)),
        ]
    }

    fn trips() -> Vec<Arc<Trip>> {
        vec![
            simple_trip("a", (1.0, 0.0), (2.0, 0.0)),
            simple_trip("b", (48.0, 0.0), (49.0, 0.0)),
        ]
    }

    #[test]
    fn test_ranking_runs_to_exhaustion() {
        let mut rng = create_rng(0);
        let mut it = RankingIterator::new(
            routes(),
            trips(),
            Box::new(IntensiveInsertionStrategy),
            Box::new(ShortestDistanceCriterion),
            1,
            &mut rng,
        );
        assert_eq!(it.rankings().len(), 2);
        let mut committed = Vec::new();
        loop {
            match it.next_step(&mut rng) {
                InsertionStep::Candidate(route) => {
                    committed.push(route.vehicle().id().to_string());
                    it.commit(route, &mut rng);
                }
                InsertionStep::Miss => unreachable!("ranking never misses"),
                InsertionStep::Exhausted => break,
            }
        }
        assert!(it.pending().is_empty());
        let routes = Box::new(it).into_routes();
        assert_eq!(routes[0].find_trip("a"), Some(0));
        assert_eq!(routes[1].find_trip("b"), Some(0));
        assert_eq!(committed.len(), 2);
    }

    #[test]
    fn test_ranking_prunes_committed_trip() {
        let mut rng = create_rng(0);
        let mut it = RankingIterator::new(
            routes(),
            trips(),
            Box::new(IntensiveInsertionStrategy),
            Box::new(ShortestDistanceCriterion),
            1,
            &mut rng,
        );
        let InsertionStep::Candidate(first) = it.next_step(&mut rng) else {
            panic!("candidate expected");
        };
        let trip = first.last_planned_trip().expect("planned").trip().id().to_string();
        it.commit(first, &mut rng);
        for ranking in it.rankings() {
            assert!(ranking
                .iter()
                .all(|r| r.last_planned_trip().map(|pt| pt.trip().id()) != Some(trip.as_str())));
        }
    }

    #[test]
    fn test_ranking_exhausts_on_infeasible() {
        let mut rng = create_rng(0);
        let mut it = RankingIterator::new(
            routes(),
            vec![windowed_trip("x", (500.0, 0.0), (501.0, 0.0), 0.0, 1.0)],
            Box::new(IntensiveInsertionStrategy),
            Box::new(ShortestDistanceCriterion),
            1,
            &mut rng,
        );
        assert_eq!(it.next_step(&mut rng), InsertionStep::Exhausted);
        assert_eq!(it.pending().len(), 1);
    }

    #[test]
    fn test_stateless_miss_and_exhaustion() {
        let mut rng = create_rng(0);
        let mut it = StatelessIterator::new(
            routes(),
            trips(),
            Box::new(SamplingInsertionStrategy::new(0)),
            Box::new(ShortestDistanceCriterion),
            1,
        );
        assert_eq!(it.next_step(&mut rng), InsertionStep::Miss);

        let mut it = StatelessIterator::new(
            routes(),
            trips(),
            Box::new(IntensiveInsertionStrategy),
            Box::new(ShortestDistanceCriterion),
            1,
        );
        while let InsertionStep::Candidate(route) = it.next_step(&mut rng) {
            it.commit(route, &mut rng);
        }
        assert!(it.pending().is_empty());
        assert_eq!(it.next_step(&mut rng), InsertionStep::Exhausted);
    }

    #[test]
    fn test_pick_respects_rcl() {
        let mut rng = create_rng(4);
        let candidates: Vec<Route> = [(1.0, 2.0), (3.0, 4.0), (30.0, 40.0)]
            .iter()
            .map(|&(a, b)| {
                let mut r = route_for(depot_vehicle("v", 0.0, 0.0, 0.0, 1000.0, 1));
                r.insert_planned_trip(simple_trip("t", (a, 0.0), (b, 0.0)), 0, 1);
                r
            })
            .collect();
        for _ in 0..20 {
            let chosen = pick(&ShortestDistanceCriterion, candidates.clone(), 2, &mut rng)
                .expect("non-empty");
            assert!(chosen.distance() < 10.0);
        }
        let greedy = pick(&ShortestDistanceCriterion, candidates, 1, &mut rng).expect("non-empty");
        assert!((greedy.distance() - 2.0).abs() < 1e-10);
    }
}
