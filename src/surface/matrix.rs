//! Dense distance matrix surface.

use std::collections::HashMap;

use super::{DistanceMetric, Surface};
use crate::models::Position;

/// A dense n×n distance matrix over a fixed set of positions, stored in
/// row-major order.
///
/// Positions are deduplicated by value when the index is built. Asking for a
/// position that is not part of the matrix yields `f64::INFINITY`, which makes
/// any stop there infeasible instead of panicking.
///
/// # Examples
///
/// ```
/// use u_darp::models::Position;
/// use u_darp::surface::{DistanceMetric, MatrixSurface, Surface};
///
/// let positions = vec![
///     Position::new(0.0, 0.0),
///     Position::new(3.0, 4.0),
///     Position::new(0.0, 0.0),
/// ];
/// let surface = MatrixSurface::from_positions(&positions, DistanceMetric::Euclidean);
/// assert_eq!(surface.size(), 2);
/// assert!((surface.distance(&positions[0], &positions[1]) - 5.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct MatrixSurface {
    index: HashMap<Position, usize>,
    data: Vec<f64>,
    size: usize,
    speed: f64,
}

impl MatrixSurface {
    /// Creates a matrix over `positions` with every distance set to zero.
    pub fn new(positions: &[Position]) -> Self {
        let mut index = HashMap::new();
        for position in positions {
            let next = index.len();
            index.entry(*position).or_insert(next);
        }
        let size = index.len();
        Self {
            index,
            data: vec![0.0; size * size],
            size,
            speed: 1.0,
        }
    }

    /// Computes the matrix from coordinates using `metric`.
    pub fn from_positions(positions: &[Position], metric: DistanceMetric) -> Self {
        let mut surface = Self::new(positions);
        let known: Vec<(Position, usize)> = surface.index.iter().map(|(p, &i)| (*p, i)).collect();
        for &(a, i) in &known {
            for &(b, j) in &known {
                surface.data[i * surface.size + j] = metric.measure(&a, &b);
            }
        }
        surface
    }

    /// Creates a matrix from an explicit grid, indexed in the order the
    /// (deduplicated) positions are given.
    ///
    /// Returns `None` if the data length doesn't match the number of distinct
    /// positions squared, or if any entry is negative or NaN.
    pub fn from_data(positions: &[Position], data: Vec<f64>) -> Option<Self> {
        let mut surface = Self::new(positions);
        if data.len() != surface.size * surface.size {
            return None;
        }
        if data.iter().any(|d| d.is_nan() || *d < 0.0) {
            return None;
        }
        surface.data = data;
        Some(surface)
    }

    /// Sets the travel speed used to derive times from distances.
    ///
    /// Non-positive or non-finite speeds are ignored.
    pub fn with_speed(mut self, speed: f64) -> Self {
        if speed.is_finite() && speed > 0.0 {
            self.speed = speed;
        }
        self
    }

    /// Matrix index of `position`, if known.
    pub fn index_of(&self, position: &Position) -> Option<usize> {
        self.index.get(position).copied()
    }

    /// Returns the distance between two matrix indices.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Overrides the distance between two matrix indices.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of distinct positions in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }
}

impl Surface for MatrixSurface {
    fn distance(&self, from: &Position, to: &Position) -> f64 {
        match (self.index_of(from), self.index_of(to)) {
            (Some(i), Some(j)) => self.get(i, j),
            _ => f64::INFINITY,
        }
    }

    fn time(&self, from: &Position, to: &Position) -> f64 {
        self.distance(from, to) / self.speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_positions() -> Vec<Position> {
        vec![
            Position::new(0.0, 0.0),
            Position::new(3.0, 4.0),
            Position::new(0.0, 8.0),
        ]
    }

    #[test]
    fn test_from_positions() {
        let positions = sample_positions();
        let m = MatrixSurface::from_positions(&positions, DistanceMetric::Euclidean);
        assert_eq!(m.size(), 3);
        assert!((m.distance(&positions[0], &positions[1]) - 5.0).abs() < 1e-10);
        assert!((m.distance(&positions[0], &positions[2]) - 8.0).abs() < 1e-10);
        assert!(m.distance(&positions[0], &positions[0]).abs() < 1e-10);
    }

    #[test]
    fn test_symmetric() {
        let m = MatrixSurface::from_positions(&sample_positions(), DistanceMetric::Euclidean);
        assert!(m.is_symmetric(1e-10));
    }

    #[test]
    fn test_from_data() {
        let positions = vec![Position::new(0.0, 0.0), Position::new(1.0, 0.0)];
        let m = MatrixSurface::from_data(&positions, vec![0.0, 5.0, 7.0, 0.0]).expect("valid");
        assert_eq!(m.distance(&positions[0], &positions[1]), 5.0);
        assert_eq!(m.distance(&positions[1], &positions[0]), 7.0);
        assert!(!m.is_symmetric(1e-10));
    }

    #[test]
    fn test_from_data_invalid() {
        let positions = vec![Position::new(0.0, 0.0), Position::new(1.0, 0.0)];
        assert!(MatrixSurface::from_data(&positions, vec![0.0, 1.0, 2.0]).is_none());
        assert!(MatrixSurface::from_data(&positions, vec![0.0, -1.0, 2.0, 0.0]).is_none());
        assert!(MatrixSurface::from_data(&positions, vec![0.0, f64::NAN, 2.0, 0.0]).is_none());
    }

    #[test]
    fn test_duplicate_positions_share_index() {
        let positions = vec![
            Position::new(0.0, 0.0),
            Position::new(1.0, 0.0),
            Position::new(0.0, 0.0),
        ];
        let m = MatrixSurface::new(&positions);
        assert_eq!(m.size(), 2);
        assert_eq!(m.index_of(&positions[0]), m.index_of(&positions[2]));
    }

    #[test]
    fn test_unknown_position_unreachable() {
        let m = MatrixSurface::from_positions(&sample_positions(), DistanceMetric::Euclidean);
        let outside = Position::new(100.0, 100.0);
        assert!(m.distance(&sample_positions()[0], &outside).is_infinite());
    }

    #[test]
    fn test_set_get_and_speed() {
        let positions = sample_positions();
        let mut m = MatrixSurface::new(&positions).with_speed(2.0);
        m.set(0, 1, 42.0);
        assert_eq!(m.get(0, 1), 42.0);
        assert_eq!(m.get(1, 0), 0.0);
        assert!((m.time(&positions[0], &positions[1]) - 21.0).abs() < 1e-10);
    }
}
