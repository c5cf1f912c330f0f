//! Tour type: a cyclic permutation of city indices.

use serde::{Deserialize, Serialize};

use super::City;
use crate::error::{Result, TspError};

/// Total length of a cyclic route over `cities`.
///
/// Sums `d(route[i], route[(i + 1) % n])` for every position `i`, so the
/// closing edge back to `route[0]` is always included. A single city has
/// length `0`; two cities count their edge once in each direction.
///
/// # Panics
///
/// Panics if the route references an index outside `cities`.
///
/// # Examples
///
/// ```
/// use u_tsp::models::{total_length, City};
///
/// let cities = vec![City::new(0.0, 0.0), City::new(3.0, 4.0)];
/// assert_eq!(total_length(&cities, &[0, 1]), 10.0);
/// ```
pub fn total_length(cities: &[City], route: &[usize]) -> f64 {
    let n = route.len();
    let mut sum = 0.0;
    for i in 0..n {
        let c0 = route[i];
        let c1 = route[(i + 1) % n];
        sum += cities[c0].distance_to(&cities[c1]);
    }
    sum
}

/// A closed tour visiting every city exactly once.
///
/// Holds a permutation of `0..n`. The only mutation offered is
/// [`swap_positions`](Tour::swap_positions), which cannot break the
/// permutation, so a `Tour` is valid for its whole lifetime.
///
/// # Examples
///
/// ```
/// use u_tsp::models::{City, Tour};
///
/// let cities = vec![
///     City::new(0.0, 0.0),
///     City::new(10.0, 10.0),
///     City::new(10.0, 0.0),
///     City::new(0.0, 10.0),
/// ];
/// let mut tour = Tour::identity(4);
/// assert!(tour.total_length(&cities) > 48.0);
///
/// tour.swap_positions(1, 2);
/// assert_eq!(tour.order(), &[0, 2, 1, 3]);
/// assert!((tour.total_length(&cities) - 40.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tour {
    order: Vec<usize>,
}

impl Tour {
    /// Creates the identity tour `0, 1, ..., n-1`.
    pub fn identity(n: usize) -> Self {
        Self {
            order: (0..n).collect(),
        }
    }

    /// Creates a tour from an explicit visiting order.
    ///
    /// Returns [`TspError::InvalidPermutation`] unless `order` contains each
    /// of `0..order.len()` exactly once.
    pub fn from_order(order: Vec<usize>) -> Result<Self> {
        check_permutation(&order)?;
        Ok(Self { order })
    }

    /// Returns the visiting order.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Consumes the tour, returning the visiting order.
    pub fn into_order(self) -> Vec<usize> {
        self.order
    }

    /// Number of cities in the tour.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the tour visits no cities.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// City index held at `position`.
    pub fn city_at(&self, position: usize) -> usize {
        self.order[position]
    }

    /// Exchanges the cities held at positions `i` and `j`.
    ///
    /// Self-inverse: applying the same swap twice restores the tour. A no-op
    /// when `i == j`. Not cost-aware; callers recompute lengths themselves.
    ///
    /// # Panics
    ///
    /// Panics if either position is out of bounds.
    pub fn swap_positions(&mut self, i: usize, j: usize) {
        self.order.swap(i, j);
    }

    /// Total cyclic length of this tour over `cities`.
    pub fn total_length(&self, cities: &[City]) -> f64 {
        total_length(cities, &self.order)
    }

    /// Returns `true` if the order is still a permutation of `0..n`.
    pub fn is_valid(&self) -> bool {
        check_permutation(&self.order).is_ok()
    }

    /// Iterates over the cyclic edges `(route[i], route[(i + 1) % n])`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.order.len();
        (0..n).map(move |i| (self.order[i], self.order[(i + 1) % n]))
    }
}

/// Verifies that `order` contains each of `0..order.len()` exactly once.
pub(crate) fn check_permutation(order: &[usize]) -> Result<()> {
    let n = order.len();
    let mut seen = vec![false; n];
    for (pos, &city) in order.iter().enumerate() {
        if city >= n {
            return Err(TspError::InvalidPermutation(format!(
                "index {city} at position {pos} is out of range for {n} cities"
            )));
        }
        if seen[city] {
            return Err(TspError::InvalidPermutation(format!(
                "index {city} appears more than once (again at position {pos})"
            )));
        }
        seen[city] = true;
    }
    Ok(())
}
