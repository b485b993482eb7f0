//! Local-search improvement of existing plannings.
//!
//! - [`OneShift`] — intra-route adjacent stop swap
//! - [`TwoOpt`] — intra-route segment reversal
//! - [`Reallocation`] — inter-route trip move, best of pass
//!
//! Every strategy commits only feasible, strictly improving moves, so a
//! pass never worsens its input. [`LocalSearchAlgorithm`] repeats passes
//! until a configurable number of consecutive passes find nothing.

mod config;
mod one_shift;
mod reallocation;
mod runner;
mod two_opt;
mod types;

pub use config::{LocalSearchConfig, LocalSearchKind};
pub use one_shift::OneShift;
pub use reallocation::Reallocation;
pub use runner::LocalSearchAlgorithm;
pub use two_opt::TwoOpt;
pub use types::LocalSearchStrategy;
