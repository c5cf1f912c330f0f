//! Swap search configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TspError};

/// Order in which improving swaps are taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SearchStrategy {
    /// Accept the first improving swap in `(i, j)` scan order and keep
    /// scanning against the updated tour.
    #[default]
    FirstImprovement,

    /// Scan every pair against a frozen tour, apply only the most improving
    /// swap (earliest `(i, j)` on ties), then rescan.
    ///
    /// Visits a different sequence of intermediate tours than
    /// `FirstImprovement` and may settle in a different local optimum.
    BestImprovement,
}

/// How a candidate swap's tour length is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CostEvaluation {
    /// Recompute the whole tour length for every candidate, O(n) each.
    /// Acceptance is strict `<` on the recomputed length.
    #[default]
    Full,

    /// Evaluate only the edges touching the two swapped positions, O(1) each.
    ///
    /// A swap is accepted only when its delta is below
    /// `-improvement_eps * current_length`, so rounding noise on a tie never
    /// counts as an improvement. The running length is recomputed from
    /// scratch after every sweep, and a sweep that keeps nothing is repeated
    /// with full recomputation before the search converges.
    Incremental,
}

/// Configuration for [`SwapSearch`](super::SwapSearch).
///
/// # Examples
///
/// ```
/// use u_tsp::local_search::{CostEvaluation, SearchStrategy, SwapSearchConfig};
///
/// let config = SwapSearchConfig::default()
///     .with_strategy(SearchStrategy::BestImprovement)
///     .with_evaluation(CostEvaluation::Incremental)
///     .with_max_sweeps(500);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapSearchConfig {
    /// Acceptance strategy.
    pub strategy: SearchStrategy,

    /// Candidate cost evaluation.
    pub evaluation: CostEvaluation,

    /// Maximum number of sweeps. 0 = run until convergence.
    pub max_sweeps: usize,

    /// Record the tour length after every sweep and every kept swap.
    pub record_history: bool,

    /// Minimum relative length reduction (fraction of the current tour
    /// length) for an incremental delta to count as an improvement.
    /// Ignored by [`CostEvaluation::Full`].
    pub improvement_eps: f64,
}

impl Default for SwapSearchConfig {
    fn default() -> Self {
        Self {
            strategy: SearchStrategy::default(),
            evaluation: CostEvaluation::default(),
            max_sweeps: 0,
            record_history: true,
            improvement_eps: 1e-10,
        }
    }
}

impl SwapSearchConfig {
    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_evaluation(mut self, evaluation: CostEvaluation) -> Self {
        self.evaluation = evaluation;
        self
    }

    pub fn with_max_sweeps(mut self, n: usize) -> Self {
        self.max_sweeps = n;
        self
    }

    pub fn with_history(mut self, record: bool) -> Self {
        self.record_history = record;
        self
    }

    pub fn with_improvement_eps(mut self, eps: f64) -> Self {
        self.improvement_eps = eps;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.improvement_eps.is_finite() || self.improvement_eps < 0.0 {
            return Err(TspError::InvalidConfig(format!(
                "improvement_eps must be finite and non-negative, got {}",
                self.improvement_eps
            )));
        }
        Ok(())
    }

    /// Returns `true` if the sweep budget has been spent.
    pub(crate) fn budget_exhausted(&self, sweeps: usize) -> bool {
        self.max_sweeps > 0 && sweeps >= self.max_sweeps
    }
}
