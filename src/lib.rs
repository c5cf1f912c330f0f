//! # u-tsp
//!
//! Euclidean traveling salesman local search: pairwise position-swap hill
//! climbing that runs until no single swap shortens the tour.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (City, Tour, cyclic tour length)
//! - [`distance`] — Precomputed distance matrix
//! - [`local_search`] — Swap search engine, configuration and results
//! - [`instance`] — Random instance generation
//! - [`render`] — ASCII map rendering
//! - [`error`] — Error type

pub mod distance;
pub mod error;
pub mod instance;
pub mod local_search;
pub mod models;
pub mod render;

pub use error::{Result, TspError};
