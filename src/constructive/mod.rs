//! Insertion-based construction heuristics.
//!
//! A trip is spliced into a route between two existing positions `(i, j)`
//! ([`compute_one`]). An [`InsertionStrategy`] decides which pairs to try, a
//! [`CandidateIterator`] keeps track of the feasible candidates across the
//! fleet, and [`InsertionAlgorithm`] commits them one at a time.
//!
//! - [`SamplingInsertionStrategy`] — bounded random sample of pairs, O(sample)
//! - [`IntensiveInsertionStrategy`] — every pair, O(k²) for body length k
//! - [`TailInsertionStrategy`] — append only, O(1)
//!
//! # Complexity
//!
//! Each candidate costs a route clone plus a flush, O(k). A ranking rebuild
//! for one vehicle costs O(p · k³) with the intensive strategy, p pending
//! trips.
//!
//! # Reference
//!
//! Jaw, J., Odoni, A., Psaraftis, H. & Wilson, N. (1986). "A heuristic
//! algorithm for the multi-vehicle advance request dial-a-ride problem with
//! time windows", *Transportation Research B* 20(3), 243-257.

mod config;
mod iterator;
mod runner;
mod strategy;

pub use config::{InsertionConfig, SelectionKind, StrategyKind};
pub use iterator::{CandidateIterator, InsertionStep, RankingIterator, StatelessIterator};
pub use runner::InsertionAlgorithm;
pub use strategy::{
    all_positions, compute, compute_one, InsertionStrategy, IntensiveInsertionStrategy,
    SamplingInsertionStrategy, TailInsertionStrategy,
};
