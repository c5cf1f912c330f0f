//! Dense distance matrix.

use crate::models::City;

/// A dense n×n distance matrix stored in row-major order.
///
/// Entries are computed with [`City::distance_to`], so a route length summed
/// from the matrix is bit-identical to [`total_length`](crate::models::total_length)
/// over the same cities.
///
/// # Examples
///
/// ```
/// use u_tsp::models::City;
/// use u_tsp::distance::DistanceMatrix;
///
/// let cities = vec![
///     City::new(0.0, 0.0),
///     City::new(3.0, 4.0),
///     City::new(6.0, 8.0),
/// ];
/// let dm = DistanceMatrix::from_cities(&cities);
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Computes the Euclidean distance matrix of a city set.
    pub fn from_cities(cities: &[City]) -> Self {
        let n = cities.len();
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = cities[i].distance_to(&cities[j]);
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }
        Self { data, size: n }
    }

    /// Returns the distance between cities `from` and `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Number of cities in this matrix.
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

    /// Total cyclic length of `route`, summed in position order.
    pub fn route_length(&self, route: &[usize]) -> f64 {
        let n = route.len();
        let mut sum = 0.0;
        for i in 0..n {
            sum += self.get(route[i], route[(i + 1) % n]);
        }
        sum
    }
}
