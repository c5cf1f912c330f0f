//! Pairwise position-swap hill climbing.
//!
//! # Algorithm
//!
//! Starting from a tour (the identity order by default), one *sweep* visits
//! every position pair `(i, j)` with `0 <= i < j < n` in lexicographic order:
//!
//! 1. swap the cities at positions `i` and `j`
//! 2. recompute the tour length
//! 3. keep the swap if the length strictly decreased, otherwise swap back
//!
//! Accepted swaps take effect immediately, so later pairs in the same sweep
//! are evaluated against the updated tour (first-improvement). The search
//! stops after the first sweep that accepts nothing; the tour is then a
//! local optimum under the swap neighborhood.
//!
//! # Complexity
//!
//! n(n-1)/2 candidates per sweep. O(n) each with [`CostEvaluation::Full`],
//! O(1) each with [`CostEvaluation::Incremental`]. No bound on the number of
//! sweeps beyond [`SwapSearchConfig::max_sweeps`].

use log::{debug, info, trace, warn};
use serde::{Deserialize, Serialize};

use super::config::{CostEvaluation, SearchStrategy, SwapSearchConfig};
use crate::distance::DistanceMatrix;
use crate::error::{Result, TspError};
use crate::models::{check_permutation, total_length, City, Tour};

/// Lifecycle of a [`SwapSearch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// The last sweep improved the tour (or no sweep has run yet).
    Running,
    /// A full sweep found no improving swap. Terminal.
    Converged,
}

/// A swap kept by the search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AcceptedSwap {
    /// Sweep (1-based) in which the swap was kept.
    pub sweep: usize,
    /// First swapped position.
    pub i: usize,
    /// Second swapped position, always greater than `i`.
    pub j: usize,
    /// Tour length right after the swap.
    pub length: f64,
}

/// Outcome of a swap search run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapSearchResult {
    /// Final tour.
    pub tour: Tour,
    /// Length of the final tour. Always equals `tour.total_length(cities)`.
    pub total_length: f64,
    /// Number of sweeps executed.
    pub sweeps: usize,
    /// Number of swaps kept over the whole run.
    pub accepted_swaps: usize,
    /// `false` only when the sweep budget ran out first.
    pub converged: bool,
    /// Starting length followed by the length after each sweep.
    /// Empty when history recording is disabled.
    pub length_history: Vec<f64>,
    /// Every kept swap in the order it was applied.
    /// Empty when history recording is disabled.
    pub accepted_moves: Vec<AcceptedSwap>,
}

impl SwapSearchResult {
    /// Final visiting order.
    pub fn route(&self) -> &[usize] {
        self.tour.order()
    }
}

/// Pairwise position-swap local search over a Euclidean city set.
///
/// Owns its tour and running length for the duration of a run; the cities
/// are only read (through a precomputed [`DistanceMatrix`]).
///
/// # Examples
///
/// ```
/// use u_tsp::models::City;
/// use u_tsp::local_search::{SearchState, SwapSearch, SwapSearchConfig};
///
/// let cities = vec![
///     City::new(0.0, 0.0),
///     City::new(10.0, 10.0),
///     City::new(10.0, 0.0),
///     City::new(0.0, 10.0),
/// ];
/// let mut search = SwapSearch::new(&cities, SwapSearchConfig::default()).unwrap();
/// assert_eq!(search.state(), SearchState::Running);
///
/// assert!(search.sweep());
/// assert!(!search.sweep());
/// assert_eq!(search.state(), SearchState::Converged);
/// assert!((search.current_length() - 40.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct SwapSearch {
    distances: DistanceMatrix,
    tour: Tour,
    current_length: f64,
    state: SearchState,
    config: SwapSearchConfig,
    sweeps: usize,
    accepted_swaps: usize,
    length_history: Vec<f64>,
    accepted_moves: Vec<AcceptedSwap>,
}

impl SwapSearch {
    /// Creates a search starting from the identity tour `0, 1, ..., n-1`.
    ///
    /// Fails on an empty city set, a non-finite coordinate, or an invalid
    /// configuration.
    pub fn new(cities: &[City], config: SwapSearchConfig) -> Result<Self> {
        Self::from_tour(cities, Tour::identity(cities.len()), config)
    }

    /// Creates a search starting from a caller-chosen tour.
    pub fn from_tour(cities: &[City], tour: Tour, config: SwapSearchConfig) -> Result<Self> {
        config.validate()?;
        validate_cities(cities)?;
        if tour.len() != cities.len() {
            return Err(TspError::InvalidPermutation(format!(
                "tour visits {} cities but the instance has {}",
                tour.len(),
                cities.len()
            )));
        }
        // A deserialized tour bypasses `Tour::from_order`.
        check_permutation(tour.order())?;

        let n = cities.len();
        let distances = DistanceMatrix::from_cities(cities);
        let (current_length, state) = if n <= 1 {
            (0.0, SearchState::Converged)
        } else {
            (distances.route_length(tour.order()), SearchState::Running)
        };
        let length_history = if config.record_history {
            vec![current_length]
        } else {
            Vec::new()
        };

        debug!("swap search over {n} cities, initial length {current_length:.4}");

        Ok(Self {
            distances,
            tour,
            current_length,
            state,
            config,
            sweeps: 0,
            accepted_swaps: 0,
            length_history,
            accepted_moves: Vec::new(),
        })
    }

    /// Current state.
    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Current tour.
    pub fn tour(&self) -> &Tour {
        &self.tour
    }

    /// Length of the current tour.
    pub fn current_length(&self) -> f64 {
        self.current_length
    }

    /// Sweeps executed so far.
    pub fn sweeps(&self) -> usize {
        self.sweeps
    }

    /// Swaps kept so far.
    pub fn accepted_swaps(&self) -> usize {
        self.accepted_swaps
    }

    /// Runs one sweep. Returns `true` if at least one swap was kept.
    ///
    /// A sweep that keeps nothing moves the search to
    /// [`SearchState::Converged`]; once converged this is a no-op.
    ///
    /// With [`CostEvaluation::Incremental`], a pass that keeps nothing is
    /// repeated with full recomputation before convergence is declared, so
    /// improvements hidden below the delta threshold are still taken.
    pub fn sweep(&mut self) -> bool {
        if self.state == SearchState::Converged {
            return false;
        }
        self.sweeps += 1;

        let mut improved = self.pass(self.config.evaluation);
        if self.config.evaluation == CostEvaluation::Incremental {
            self.current_length = self.distances.route_length(self.tour.order());
            if !improved {
                improved = self.pass(CostEvaluation::Full);
            }
        }
        debug_assert!(check_permutation(self.tour.order()).is_ok());

        if self.config.record_history {
            self.length_history.push(self.current_length);
        }
        debug!(
            "sweep {}: length {:.4}, {} swaps accepted so far",
            self.sweeps, self.current_length, self.accepted_swaps
        );

        if !improved {
            self.state = SearchState::Converged;
            info!(
                "converged after {} sweeps ({} swaps), length {:.4}",
                self.sweeps, self.accepted_swaps, self.current_length
            );
        }
        improved
    }

    /// Sweeps until convergence or until the sweep budget is spent.
    pub fn run(mut self) -> SwapSearchResult {
        while self.state == SearchState::Running {
            if self.config.budget_exhausted(self.sweeps) {
                warn!(
                    "sweep budget of {} exhausted before convergence, length {:.4}",
                    self.config.max_sweeps, self.current_length
                );
                break;
            }
            self.sweep();
        }

        SwapSearchResult {
            converged: self.state == SearchState::Converged,
            tour: self.tour,
            total_length: self.current_length,
            sweeps: self.sweeps,
            accepted_swaps: self.accepted_swaps,
            length_history: self.length_history,
            accepted_moves: self.accepted_moves,
        }
    }

    fn pass(&mut self, evaluation: CostEvaluation) -> bool {
        match self.config.strategy {
            SearchStrategy::FirstImprovement => self.first_improvement_pass(evaluation),
            SearchStrategy::BestImprovement => self.best_improvement_pass(evaluation),
        }
    }

    fn record_swap(&mut self, i: usize, j: usize) {
        self.accepted_swaps += 1;
        if self.config.record_history {
            self.accepted_moves.push(AcceptedSwap {
                sweep: self.sweeps,
                i,
                j,
                length: self.current_length,
            });
        }
        trace!("swap ({i}, {j}) accepted, length {:.4}", self.current_length);
    }

    fn first_improvement_pass(&mut self, evaluation: CostEvaluation) -> bool {
        let n = self.tour.len();
        let mut improved = false;

        for i in 0..n {
            for j in (i + 1)..n {
                let accepted = match evaluation {
                    CostEvaluation::Full => self.try_swap_full(i, j),
                    CostEvaluation::Incremental => self.try_swap_incremental(i, j),
                };
                if accepted {
                    self.record_swap(i, j);
                    improved = true;
                }
            }
        }

        improved
    }

    /// Smallest delta that counts as an incremental improvement, relative to
    /// the current tour length so the cut-off follows the instance scale.
    fn delta_threshold(&self) -> f64 {
        -self.config.improvement_eps * self.current_length
    }

    /// Swap, measure, and undo unless the tour got strictly shorter.
    fn try_swap_full(&mut self, i: usize, j: usize) -> bool {
        self.tour.swap_positions(i, j);
        let candidate = self.distances.route_length(self.tour.order());
        if candidate < self.current_length {
            self.current_length = candidate;
            true
        } else {
            self.tour.swap_positions(i, j);
            false
        }
    }

    fn try_swap_incremental(&mut self, i: usize, j: usize) -> bool {
        let delta = swap_delta(self.tour.order(), &self.distances, i, j);
        if delta < self.delta_threshold() {
            self.tour.swap_positions(i, j);
            self.current_length += delta;
            true
        } else {
            false
        }
    }

    fn best_improvement_pass(&mut self, evaluation: CostEvaluation) -> bool {
        let n = self.tour.len();
        let mut best: Option<(usize, usize, f64)> = None;

        for i in 0..n {
            for j in (i + 1)..n {
                let candidate = match evaluation {
                    CostEvaluation::Full => {
                        self.tour.swap_positions(i, j);
                        let len = self.distances.route_length(self.tour.order());
                        self.tour.swap_positions(i, j);
                        (len < self.current_length).then_some(len)
                    }
                    CostEvaluation::Incremental => {
                        let delta = swap_delta(self.tour.order(), &self.distances, i, j);
                        (delta < self.delta_threshold()).then_some(self.current_length + delta)
                    }
                };
                if let Some(len) = candidate {
                    if best.is_none_or(|b| len < b.2) {
                        best = Some((i, j, len));
                    }
                }
            }
        }

        match best {
            Some((i, j, len)) => {
                self.tour.swap_positions(i, j);
                self.current_length = len;
                self.record_swap(i, j);
                true
            }
            None => false,
        }
    }
}

/// Length change from swapping positions `i` and `j` of a cyclic route.
///
/// Only the edges leaving positions `i - 1`, `i`, `j - 1` and `j` (mod n)
/// change. Adjacent and wrap-around pairs share edges, so each start
/// position is counted once.
fn swap_delta(order: &[usize], distances: &DistanceMatrix, i: usize, j: usize) -> f64 {
    let n = order.len();
    let after = |p: usize| {
        if p == i {
            order[j]
        } else if p == j {
            order[i]
        } else {
            order[p]
        }
    };

    let mut starts = [(i + n - 1) % n, i, (j + n - 1) % n, j];
    starts.sort_unstable();

    let mut old_cost = 0.0;
    let mut new_cost = 0.0;
    for (k, &p) in starts.iter().enumerate() {
        if k > 0 && starts[k - 1] == p {
            continue;
        }
        let q = (p + 1) % n;
        old_cost += distances.get(order[p], order[q]);
        new_cost += distances.get(after(p), after(q));
    }

    new_cost - old_cost
}

/// Rejects inputs the engine does not accept.
fn validate_cities(cities: &[City]) -> Result<()> {
    if cities.is_empty() {
        return Err(TspError::EmptyInstance);
    }
    if let Some((index, c)) = cities.iter().enumerate().find(|(_, c)| !c.is_finite()) {
        return Err(TspError::NonFiniteCoordinate {
            index,
            x: c.x(),
            y: c.y(),
        });
    }
    Ok(())
}

/// Optimizes a city set with the default configuration.
///
/// Starts from the identity order and returns a tour that no single
/// position swap can shorten.
///
/// # Examples
///
/// ```
/// use u_tsp::models::City;
/// use u_tsp::local_search::optimize;
///
/// let cities = vec![
///     City::new(0.0, 0.0),
///     City::new(10.0, 0.0),
///     City::new(10.0, 10.0),
///     City::new(0.0, 10.0),
/// ];
/// let result = optimize(&cities).unwrap();
/// assert_eq!(result.route(), &[0, 1, 2, 3]);
/// assert!((result.total_length - 40.0).abs() < 1e-10);
/// ```
pub fn optimize(cities: &[City]) -> Result<SwapSearchResult> {
    optimize_with(cities, &SwapSearchConfig::default())
}

/// Optimizes a city set with an explicit configuration.
pub fn optimize_with(cities: &[City], config: &SwapSearchConfig) -> Result<SwapSearchResult> {
    Ok(SwapSearch::new(cities, config.clone())?.run())
}

/// Returns `true` if no single position swap strictly shortens `route`.
///
/// Uses full recomputation, matching [`CostEvaluation::Full`].
///
/// # Panics
///
/// Panics if `route` references an index outside `cities`.
pub fn is_swap_local_optimum(cities: &[City], route: &[usize]) -> bool {
    let base = total_length(cities, route);
    let mut order = route.to_vec();
    let n = order.len();
    for i in 0..n {
        for j in (i + 1)..n {
            order.swap(i, j);
            let candidate = total_length(cities, &order);
            order.swap(i, j);
            if candidate < base {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<City> {
        vec![
            City::new(0.0, 0.0),
            City::new(10.0, 0.0),
            City::new(10.0, 10.0),
            City::new(0.0, 10.0),
        ]
    }

    fn crossed_square() -> Vec<City> {
        vec![
            City::new(0.0, 0.0),
            City::new(10.0, 10.0),
            City::new(10.0, 0.0),
            City::new(0.0, 10.0),
        ]
    }

    fn scattered() -> Vec<City> {
        [
            (12i32, 3i32),
            (55, 31),
            (7, 38),
            (40, 2),
            (63, 17),
            (21, 22),
            (48, 36),
            (3, 11),
            (33, 14),
            (59, 5),
            (16, 30),
            (44, 25),
        ]
        .into_iter()
        .map(City::from)
        .collect()
    }

    #[test]
    fn test_square_already_optimal() {
        let result = optimize(&square()).expect("valid input");
        assert_eq!(result.route(), &[0, 1, 2, 3]);
        assert!((result.total_length - 40.0).abs() < 1e-10);
        assert_eq!(result.accepted_swaps, 0);
        assert_eq!(result.sweeps, 1);
        assert!(result.converged);
    }

    #[test]
    fn test_crossed_square_uncrossed() {
        let cities = crossed_square();
        let initial = Tour::identity(4).total_length(&cities);
        assert!((initial - (20.0 + 200f64.sqrt() * 2.0)).abs() < 1e-10);

        let result = optimize(&cities).expect("valid input");
        assert!((result.total_length - 40.0).abs() < 1e-10);
        assert_eq!(result.route(), &[3, 1, 2, 0]);
        assert_eq!(result.accepted_swaps, 1);
        assert_eq!(result.sweeps, 2);
        assert_eq!(result.accepted_moves.len(), 1);
        let only = result.accepted_moves[0];
        assert_eq!((only.sweep, only.i, only.j), (1, 0, 3));
        assert!((only.length - 40.0).abs() < 1e-10);
    }

    #[test]
    fn test_scattered_trajectory() {
        let cities = scattered();
        let result = optimize(&cities).expect("valid input");
        assert_eq!(result.route(), &[2, 7, 0, 3, 9, 4, 8, 5, 11, 1, 6, 10]);
        assert_eq!(result.sweeps, 3);
        assert_eq!(result.accepted_swaps, 18);
        assert!((result.total_length - 232.736_812_960_174_3).abs() < 1e-9);

        let moves: Vec<(usize, usize, usize)> = result
            .accepted_moves
            .iter()
            .map(|m| (m.sweep, m.i, m.j))
            .collect();
        assert_eq!(moves.len(), 18);
        // Position 0 keeps improving within the first sweep.
        assert_eq!(
            &moves[..7],
            &[
                (1, 0, 1),
                (1, 0, 3),
                (1, 0, 5),
                (1, 0, 6),
                (1, 0, 9),
                (1, 0, 10),
                (1, 1, 2)
            ]
        );
        assert_eq!(moves[14], (1, 8, 11));
        assert_eq!(&moves[15..], &[(2, 0, 11), (2, 3, 4), (2, 3, 5)]);
        assert!((result.accepted_moves[0].length - 435.527_632_749_666_7).abs() < 1e-9);
    }

    #[test]
    fn test_accepted_moves_strictly_decrease() {
        let cities = scattered();
        let result = optimize(&cities).expect("valid input");
        let mut previous = result.length_history[0];
        for (k, m) in result.accepted_moves.iter().enumerate() {
            assert!(m.i < m.j);
            assert!(m.length < previous, "move {k} did not shorten the tour");
            previous = m.length;
        }
        assert_eq!(previous, result.total_length);
    }

    #[test]
    fn test_accepted_moves_empty_without_history() {
        let config = SwapSearchConfig::default().with_history(false);
        let result = optimize_with(&crossed_square(), &config).expect("valid input");
        assert_eq!(result.accepted_swaps, 1);
        assert!(result.accepted_moves.is_empty());
    }

    #[test]
    fn test_incremental_on_tiny_coordinates() {
        // Every edge is far below the default eps in absolute terms.
        let cities: Vec<City> = scattered()
            .iter()
            .map(|c| City::new(c.x() * 1e-12, c.y() * 1e-12))
            .collect();
        for strategy in [SearchStrategy::FirstImprovement, SearchStrategy::BestImprovement] {
            let config = SwapSearchConfig::default()
                .with_strategy(strategy)
                .with_evaluation(CostEvaluation::Incremental);
            let result = optimize_with(&cities, &config).expect("valid input");
            assert!(result.converged);
            assert!(result.accepted_swaps > 0);
            assert!(is_swap_local_optimum(&cities, result.route()));
            assert_eq!(result.total_length, result.tour.total_length(&cities));
        }
    }

    #[test]
    fn test_incremental_converges_to_local_optimum_despite_large_eps() {
        // A threshold that hides every delta still ends in a true local optimum.
        let cities = scattered();
        let config = SwapSearchConfig::default()
            .with_evaluation(CostEvaluation::Incremental)
            .with_improvement_eps(0.5);
        let result = optimize_with(&cities, &config).expect("valid input");
        assert!(result.converged);
        assert!(is_swap_local_optimum(&cities, result.route()));
        let full = optimize(&cities).expect("valid input");
        assert_eq!(result.route(), full.route());
        assert_eq!(result.sweeps, full.sweeps);
    }

    #[test]
    fn test_single_city() {
        let result = optimize(&[City::new(3.0, 4.0)]).expect("valid input");
        assert_eq!(result.route(), &[0]);
        assert_eq!(result.total_length, 0.0);
        assert_eq!(result.sweeps, 0);
        assert!(result.converged);
    }

    #[test]
    fn test_single_city_starts_converged() {
        let search = SwapSearch::new(&[City::new(1.0, 1.0)], SwapSearchConfig::default())
            .expect("valid input");
        assert_eq!(search.state(), SearchState::Converged);
    }

    #[test]
    fn test_two_cities_counts_edge_twice() {
        let cities = vec![City::new(0.0, 0.0), City::new(3.0, 4.0)];
        let result = optimize(&cities).expect("valid input");
        assert!((result.total_length - 10.0).abs() < 1e-10);
        assert_eq!(result.route(), &[0, 1]);
    }

    #[test]
    fn test_duplicate_coordinates() {
        let cities = vec![
            City::new(5.0, 5.0),
            City::new(5.0, 5.0),
            City::new(0.0, 0.0),
        ];
        let result = optimize(&cities).expect("valid input");
        assert!(result.tour.is_valid());
        assert!((result.total_length - 2.0 * 50f64.sqrt()).abs() < 1e-10);
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(optimize(&[]), Err(TspError::EmptyInstance)));
    }

    #[test]
    fn test_non_finite_rejected() {
        let cities = vec![City::new(0.0, 0.0), City::new(f64::NAN, 1.0)];
        let err = optimize(&cities).unwrap_err();
        assert!(matches!(
            err,
            TspError::NonFiniteCoordinate { index: 1, .. }
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SwapSearchConfig::default().with_improvement_eps(-1.0);
        assert!(matches!(
            optimize_with(&square(), &config),
            Err(TspError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_from_tour_length_mismatch() {
        let tour = Tour::identity(3);
        let err = SwapSearch::from_tour(&square(), tour, SwapSearchConfig::default()).unwrap_err();
        assert!(matches!(err, TspError::InvalidPermutation(_)));
    }

    #[test]
    fn test_from_tour_rejects_deserialized_duplicate() {
        let tour: Tour = serde_json::from_str(r#"{"order":[0,1,1,3]}"#).expect("parses");
        let err = SwapSearch::from_tour(&square(), tour, SwapSearchConfig::default()).unwrap_err();
        assert!(matches!(err, TspError::InvalidPermutation(_)));
    }

    #[test]
    fn test_from_tour_crossed_start() {
        let cities = square();
        let tour = Tour::from_order(vec![0, 2, 1, 3]).expect("valid");
        let result = SwapSearch::from_tour(&cities, tour, SwapSearchConfig::default())
            .expect("valid input")
            .run();
        assert!((result.total_length - 40.0).abs() < 1e-10);
    }

    #[test]
    fn test_result_length_matches_tour() {
        let cities = scattered();
        let result = optimize(&cities).expect("valid input");
        assert_eq!(result.total_length, result.tour.total_length(&cities));
    }

    #[test]
    fn test_result_is_local_optimum() {
        let cities = scattered();
        let result = optimize(&cities).expect("valid input");
        assert!(result.converged);
        assert!(is_swap_local_optimum(&cities, result.route()));
    }

    #[test]
    fn test_history_non_increasing() {
        let cities = scattered();
        let result = optimize(&cities).expect("valid input");
        assert_eq!(result.length_history.len(), result.sweeps + 1);
        for w in result.length_history.windows(2) {
            assert!(w[1] <= w[0]);
        }
        assert_eq!(result.length_history.last().copied(), Some(result.total_length));
    }

    #[test]
    fn test_history_disabled() {
        let config = SwapSearchConfig::default().with_history(false);
        let result = optimize_with(&scattered(), &config).expect("valid input");
        assert!(result.length_history.is_empty());
    }

    #[test]
    fn test_deterministic() {
        let cities = scattered();
        let a = optimize(&cities).expect("valid input");
        let b = optimize(&cities).expect("valid input");
        assert_eq!(a.route(), b.route());
        assert_eq!(a.total_length, b.total_length);
        assert_eq!(a.sweeps, b.sweeps);
    }

    #[test]
    fn test_sweep_after_convergence_is_noop() {
        let mut search =
            SwapSearch::new(&square(), SwapSearchConfig::default()).expect("valid input");
        assert!(!search.sweep());
        assert_eq!(search.sweeps(), 1);
        assert!(!search.sweep());
        assert_eq!(search.sweeps(), 1);
    }

    #[test]
    fn test_max_sweeps_budget() {
        let config = SwapSearchConfig::default().with_max_sweeps(1);
        let cities = scattered();
        let result = optimize_with(&cities, &config).expect("valid input");
        assert_eq!(result.sweeps, 1);
        // The identity order of this instance is far from swap-optimal.
        assert!(!result.converged);
        assert!(result.tour.is_valid());
        assert_eq!(result.total_length, result.tour.total_length(&cities));
    }

    #[test]
    fn test_incremental_matches_full() {
        let cities = scattered();
        let full = optimize(&cities).expect("valid input");
        let config = SwapSearchConfig::default().with_evaluation(CostEvaluation::Incremental);
        let incremental = optimize_with(&cities, &config).expect("valid input");
        assert_eq!(full.route(), incremental.route());
        assert!((full.total_length - incremental.total_length).abs() < 1e-9);
        assert_eq!(
            incremental.total_length,
            incremental.tour.total_length(&cities)
        );
    }

    #[test]
    fn test_best_improvement_converges() {
        let cities = scattered();
        for evaluation in [CostEvaluation::Full, CostEvaluation::Incremental] {
            let config = SwapSearchConfig::default()
                .with_strategy(SearchStrategy::BestImprovement)
                .with_evaluation(evaluation);
            let result = optimize_with(&cities, &config).expect("valid input");
            assert!(result.converged);
            assert!(result.tour.is_valid());
            // One swap per productive sweep, plus the confirming sweep.
            assert_eq!(result.sweeps, result.accepted_swaps + 1);
            let initial = Tour::identity(cities.len()).total_length(&cities);
            assert!(result.total_length < initial);
        }
    }

    #[test]
    fn test_best_improvement_crossed_square() {
        let config = SwapSearchConfig::default().with_strategy(SearchStrategy::BestImprovement);
        let result = optimize_with(&crossed_square(), &config).expect("valid input");
        assert!((result.total_length - 40.0).abs() < 1e-10);
        assert_eq!(result.accepted_swaps, 1);
    }

    #[test]
    fn test_swap_delta_matches_recompute() {
        let cities = scattered();
        let dm = DistanceMatrix::from_cities(&cities);
        let order: Vec<usize> = vec![3, 7, 0, 11, 5, 1, 9, 2, 8, 10, 4, 6];
        let base = dm.route_length(&order);
        let n = order.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let mut swapped = order.clone();
                swapped.swap(i, j);
                let expected = dm.route_length(&swapped) - base;
                let delta = swap_delta(&order, &dm, i, j);
                assert!(
                    (delta - expected).abs() < 1e-9,
                    "pair ({i}, {j}): delta {delta}, expected {expected}"
                );
            }
        }
    }

    #[test]
    fn test_swap_delta_small_tours() {
        let cities = crossed_square();
        let dm = DistanceMatrix::from_cities(&cities);
        for n in 2..=3 {
            let order: Vec<usize> = (0..n).collect();
            let base = dm.route_length(&order);
            for i in 0..n {
                for j in (i + 1)..n {
                    let mut swapped = order.clone();
                    swapped.swap(i, j);
                    let expected = dm.route_length(&swapped) - base;
                    assert!((swap_delta(&order, &dm, i, j) - expected).abs() < 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_is_swap_local_optimum() {
        let cities = square();
        assert!(is_swap_local_optimum(&cities, &[0, 1, 2, 3]));
        assert!(!is_swap_local_optimum(&cities, &[0, 2, 1, 3]));
    }
}
