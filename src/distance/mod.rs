//! Distance matrices.
//!
//! Provides a dense precomputed distance matrix for O(1) edge lookups.

mod matrix;

pub use matrix::DistanceMatrix;
