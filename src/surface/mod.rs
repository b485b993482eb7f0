//! Distance and travel time between positions.
//!
//! - [`GeoSurface`] — coordinate metric (Euclidean or Manhattan)
//! - [`MatrixSurface`] — explicit dense matrix over known positions

mod geo;
mod matrix;

use std::fmt;

use crate::models::Position;

pub use geo::{DistanceMetric, GeoSurface};
pub use matrix::MatrixSurface;

/// Shared distance metric for every position of a problem instance.
///
/// Travel times must be non-negative; the stop-chain timing relies on it.
pub trait Surface: fmt::Debug + Send + Sync {
    /// Travel distance from `from` to `to`.
    fn distance(&self, from: &Position, to: &Position) -> f64;

    /// Travel time from `from` to `to`.
    ///
    /// Defaults to `distance(from, to)` (speed = 1).
    fn time(&self, from: &Position, to: &Position) -> f64 {
        self.distance(from, to)
    }
}
