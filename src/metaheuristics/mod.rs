//! Metaheuristics composing construction and local search.
//!
//! - [`IterativeAlgorithm`]: best of N independently seeded episodes,
//!   optionally on the rayon pool (`parallel` feature)
//! - [`SequentialAlgorithm`]: stages chained output to input
//! - [`GraspAlgorithm`]: randomized construction plus iterated refinement
//!
//! All three are configured through plain value objects that nest an
//! [`AlgorithmConfig`](crate::algorithm::AlgorithmConfig), so any algorithm
//! can serve as an episode or a stage.

mod config;
mod grasp;
mod iterative;
mod sequential;

pub use config::{GraspConfig, IterativeConfig, SequentialConfig};
pub use grasp::GraspAlgorithm;
pub use iterative::IterativeAlgorithm;
pub use sequential::SequentialAlgorithm;
