//! Local search over Euclidean tours.
//!
//! - [`swap`] — Pairwise position-swap hill climbing (first- or best-improvement)
//! - [`config`] — Strategy, cost evaluation mode and sweep budget

mod config;
mod swap;

pub use config::{CostEvaluation, SearchStrategy, SwapSearchConfig};
pub use swap::{
    is_swap_local_optimum, optimize, optimize_with, AcceptedSwap, SearchState, SwapSearch,
    SwapSearchResult,
};
