//! City type and Euclidean geometry.

use serde::{Deserialize, Serialize};

/// A city in a Euclidean TSP instance.
///
/// Cities are plain points in the plane. A city is identified by its index
/// in the instance slice, which stays stable for the whole run; coordinates
/// may repeat (duplicate points simply produce zero-length edges).
///
/// # Examples
///
/// ```
/// use u_tsp::models::City;
///
/// let a = City::new(0.0, 0.0);
/// let b = City::new(3.0, 4.0);
/// assert_eq!(a.distance_to(&b), 5.0);
/// assert_eq!(b.distance_to(&a), 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct City {
    x: f64,
    y: f64,
}

impl City {
    /// Creates a city at the given coordinates.
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

    /// Returns `true` if both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean distance to another city.
    ///
    /// Exactly symmetric: `(a - b)²` and `(b - a)²` round identically.
    pub fn distance_to(&self, other: &City) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<(f64, f64)> for City {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<(i32, i32)> for City {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(f64::from(x), f64::from(y))
    }
}
