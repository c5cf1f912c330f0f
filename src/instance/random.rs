//! Uniform random instance generator.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Result, TspError};
use crate::models::City;

/// Largest instance the command-line tool accepts.
pub const MAX_CITIES: usize = 1000;

/// Region that random cities are drawn from.
///
/// Coordinates are integral: x in `[0, width - margin)`, y in `[0, height)`.
/// The right margin leaves room for a city's label on an ASCII map of the
/// same size.
///
/// # Examples
///
/// ```
/// use u_tsp::instance::InstanceBounds;
///
/// let bounds = InstanceBounds::default();
/// assert_eq!((bounds.width, bounds.height, bounds.margin), (70, 40, 5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstanceBounds {
    /// Map width in cells.
    pub width: u32,
    /// Map height in cells.
    pub height: u32,
    /// Columns kept free on the right edge.
    pub margin: u32,
}

impl Default for InstanceBounds {
    fn default() -> Self {
        Self {
            width: 70,
            height: 40,
            margin: 5,
        }
    }
}

impl InstanceBounds {
    /// Creates bounds of the given size with the default margin.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Sets the right margin.
    pub fn with_margin(mut self, margin: u32) -> Self {
        self.margin = margin;
        self
    }

    fn x_range(&self) -> Result<u32> {
        match self.width.checked_sub(self.margin) {
            Some(span) if span > 0 => Ok(span),
            _ => Err(TspError::InvalidArgument(format!(
                "width {} leaves no room after a margin of {}",
                self.width, self.margin
            ))),
        }
    }
}

/// Draws `n` cities uniformly from `bounds`.
///
/// Coordinates may repeat.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_tsp::instance::{random_cities, InstanceBounds};
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let cities = random_cities(20, &InstanceBounds::default(), &mut rng).unwrap();
/// assert_eq!(cities.len(), 20);
/// assert!(cities.iter().all(|c| c.x() < 65.0 && c.y() < 40.0));
/// ```
pub fn random_cities<R: Rng>(n: usize, bounds: &InstanceBounds, rng: &mut R) -> Result<Vec<City>> {
    let x_span = bounds.x_range()?;
    if bounds.height == 0 {
        return Err(TspError::InvalidArgument("height must be positive".into()));
    }

    Ok((0..n)
        .map(|_| {
            let x = rng.random_range(0..x_span);
            let y = rng.random_range(0..bounds.height);
            City::new(f64::from(x), f64::from(y))
        })
        .collect())
}

/// Reproducible variant of [`random_cities`].
pub fn seeded_cities(n: usize, bounds: &InstanceBounds, seed: u64) -> Result<Vec<City>> {
    let mut rng = StdRng::seed_from_u64(seed);
    random_cities(n, bounds, &mut rng)
}
