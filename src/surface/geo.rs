//! Coordinate-based surface.

use serde::{Deserialize, Serialize};

use super::Surface;
use crate::models::Position;

/// Metric used to measure the distance between two coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DistanceMetric {
    /// Straight-line distance.
    #[default]
    Euclidean,
    /// Sum of absolute coordinate differences.
    Manhattan,
}

impl DistanceMetric {
    /// Distance between two positions under this metric.
    pub fn measure(&self, from: &Position, to: &Position) -> f64 {
        let dx = from.x() - to.x();
        let dy = from.y() - to.y();
        match self {
            DistanceMetric::Euclidean => (dx * dx + dy * dy).sqrt(),
            DistanceMetric::Manhattan => dx.abs() + dy.abs(),
        }
    }
}

/// A surface where distances come straight from coordinates.
///
/// Travel time is `distance / speed`.
///
/// # Examples
///
/// ```
/// use u_darp::models::Position;
/// use u_darp::surface::{DistanceMetric, GeoSurface, Surface};
///
/// let surface = GeoSurface::new(DistanceMetric::Manhattan);
/// let d = surface.distance(&Position::new(0.0, 0.0), &Position::new(3.0, 4.0));
/// assert!((d - 7.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoSurface {
    metric: DistanceMetric,
    speed: f64,
}

impl GeoSurface {
    /// Creates a surface using `metric` at unit speed.
    pub fn new(metric: DistanceMetric) -> Self {
        Self { metric, speed: 1.0 }
    }

    /// Euclidean surface at unit speed.
    pub fn euclidean() -> Self {
        Self::new(DistanceMetric::Euclidean)
    }

    /// Sets the travel speed (distance units per time unit).
    ///
    /// Non-positive or non-finite speeds are ignored.
    pub fn with_speed(mut self, speed: f64) -> Self {
        if speed.is_finite() && speed > 0.0 {
            self.speed = speed;
        }
        self
    }

    /// Distance metric.
    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    /// Travel speed.
    pub fn speed(&self) -> f64 {
        self.speed
    }
}

impl Default for GeoSurface {
    fn default() -> Self {
        Self::euclidean()
    }
}

impl Surface for GeoSurface {
    fn distance(&self, from: &Position, to: &Position) -> f64 {
        self.metric.measure(from, to)
    }

    fn time(&self, from: &Position, to: &Position) -> f64 {
        self.distance(from, to) / self.speed
    }
}
