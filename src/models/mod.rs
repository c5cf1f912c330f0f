//! Domain model types for Euclidean TSP instances.
//!
//! Provides the two core abstractions: cities as points in the plane, and
//! tours as cyclic permutations of city indices.

mod city;
mod tour;

pub use city::City;
pub(crate) use tour::check_permutation;
pub use tour::{total_length, Tour};
