//! Inter-route trip reallocation.
//!
//! # Algorithm
//!
//! For every ordered pair of routes `(origin, destination)` and every trip on
//! `origin`: remove the trip from a copy of `origin` (the copy must stay
//! feasible), then try the insertion strategy's positions on `destination`.
//! The best strictly improving `(origin', destination')` pair of the whole
//! pass is committed at the end of the pass.
//!
//! # Complexity
//!
//! O(R² · p · c · k) per pass for R routes, p trips per route, c candidate
//! positions and body length k.

use rand::RngCore;
use tracing::trace;

use super::types::LocalSearchStrategy;
use crate::constructive::{InsertionStrategy, StrategyKind};
use crate::models::{Planning, Route};
use crate::objective::Objective;

/// Moves one trip from one route to another.
#[derive(Debug)]
pub struct Reallocation {
    strategy: Box<dyn InsertionStrategy>,
}

struct Move {
    origin: usize,
    destination: usize,
    new_origin: Route,
    new_destination: Route,
    delta: f64,
}

impl Reallocation {
    /// Creates the strategy using `strategy` to place the moved trip.
    pub fn new(strategy: StrategyKind) -> Self {
        Self {
            strategy: strategy.build(),
        }
    }
}

impl Default for Reallocation {
    fn default() -> Self {
        Self::new(StrategyKind::Intensive)
    }
}

impl LocalSearchStrategy for Reallocation {
    fn name(&self) -> &str {
        "reallocation"
    }

    fn apply(
        &self,
        planning: &mut Planning,
        objective: &dyn Objective,
        rng: &mut dyn RngCore,
    ) -> bool {
        let direction = objective.direction();
        let routes = planning.routes();
        let values: Vec<f64> = routes
            .iter()
            .map(|r| objective.route_optimization(r))
            .collect();

        let mut best: Option<Move> = None;
        for (o, origin) in routes.iter().enumerate() {
            for p in 0..origin.planned_trips().len() {
                let mut new_origin = origin.clone();
                let trip = new_origin.remove_planned_trip(p);
                if !new_origin.feasible() {
                    continue;
                }
                let origin_value = objective.route_optimization(&new_origin);
                for (d, destination) in routes.iter().enumerate() {
                    if d == o {
                        continue;
                    }
                    let current = values[o] + values[d];
                    let candidates =
                        self.strategy.compute(destination, std::slice::from_ref(&trip), true, rng);
                    for candidate in candidates {
                        let value = origin_value + objective.route_optimization(&candidate);
                        let delta = value - current;
                        if !direction.is_better(value, current) {
                            continue;
                        }
                        if best.as_ref().map_or(true, |b| direction.is_better(delta, b.delta)) {
                            best = Some(Move {
                                origin: o,
                                destination: d,
                                new_origin: new_origin.clone(),
                                new_destination: candidate,
                                delta,
                            });
                        }
                    }
                }
            }
        }

        let Some(chosen) = best else {
            return false;
        };
        trace!(
            origin = chosen.origin,
            destination = chosen.destination,
            delta = chosen.delta,
            "Reallocation: move committed"
        );
        let routes = planning.routes_mut();
        routes[chosen.origin] = chosen.new_origin;
        routes[chosen.destination] = chosen.new_destination;
        true
    }
}
