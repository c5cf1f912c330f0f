//! Instance generation.
//!
//! Random Euclidean instances on an integer grid, sized to fit the ASCII map
//! in [`crate::render`].

mod random;

pub use random::{random_cities, seeded_cities, InstanceBounds, MAX_CITIES};
