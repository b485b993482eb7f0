//! Geographic positions.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::surface::Surface;

/// A point on a [`Surface`].
///
/// Positions are plain values: two positions with the same coordinates are
/// the same position, which lets stops at equal places be merged and lets
/// matrix surfaces deduplicate their index.
///
/// # Examples
///
/// ```
/// use u_darp::models::Position;
/// use u_darp::surface::GeoSurface;
///
/// let surface = GeoSurface::euclidean();
/// let a = Position::new(0.0, 0.0);
/// let b = Position::new(3.0, 4.0);
/// assert!((a.distance_to(&b, &surface) - 5.0).abs() < 1e-10);
/// assert_eq!(a, Position::new(0.0, -0.0));
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Position {
    x: f64,
    y: f64,
}

impl Position {
    /// Creates a position from its coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// X-coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Distance to `other` measured on `surface`.
    pub fn distance_to(&self, other: &Position, surface: &dyn Surface) -> f64 {
        surface.distance(self, other)
    }

    /// Travel time to `other` on `surface`.
    pub fn time_to(&self, other: &Position, surface: &dyn Surface) -> f64 {
        surface.time(self, other)
    }

    fn key(&self) -> (u64, u64) {
        // +0.0 and -0.0 are the same place
        ((self.x + 0.0).to_bits(), (self.y + 0.0).to_bits())
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Position {}

impl Hash for Position {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::GeoSurface;
    use std::collections::HashSet;

    #[test]
    fn test_position_equality_by_value() {
        assert_eq!(Position::new(1.0, 2.0), Position::new(1.0, 2.0));
        assert_ne!(Position::new(1.0, 2.0), Position::new(2.0, 1.0));
        assert_eq!(Position::new(-0.0, 0.0), Position::new(0.0, -0.0));
    }

    #[test]
    fn test_position_dedup() {
        let set: HashSet<Position> = [
            Position::new(0.0, 0.0),
            Position::new(1.0, 1.0),
            Position::new(0.0, 0.0),
            Position::new(-0.0, 0.0),
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_position_distance_and_time() {
        let surface = GeoSurface::euclidean().with_speed(2.0);
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert!((a.distance_to(&b, &surface) - 5.0).abs() < 1e-10);
        assert!((a.time_to(&b, &surface) - 2.5).abs() < 1e-10);
    }

    #[test]
    fn test_position_serde() {
        let p = Position::new(1.5, -2.0);
        let json = serde_json::to_string(&p).expect("serialize");
        let back: Position = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(p, back);
    }
}
