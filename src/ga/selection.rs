//! Selection strategies for the GA.
//!
//! Selection draws the next parent generation, with replacement, from the
//! scored pool of parents and offspring. Each pool entry is `Some(fitness)`
//! for a feasible individual and `None` for one that breaks a hard
//! constraint; infeasible entries are only ever drawn by the runner's
//! degenerate-generation fallback.
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*, ch. 1 (roulette wheel)
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::types::Fitness;
use crate::error::{EnrollError, Result};

/// Selection strategy for drawing the next generation.
///
/// All strategies assume **maximization** (higher fitness = better).
///
/// # Examples
///
/// ```
/// use u_enroll::ga::Selection;
/// use u_enroll::random::create_rng;
///
/// let mut rng = create_rng(42);
/// let scores = [None, Some(3_i64), Some(-1)];
/// let picks = Selection::Roulette.select_many(&scores, 5, &mut rng).unwrap();
/// assert_eq!(picks.len(), 5);
/// assert!(picks.iter().all(|&i| i != 0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    /// Fitness-proportionate (roulette wheel) selection over the feasible
    /// individuals.
    ///
    /// Weight of a feasible individual is its fitness, shifted up by
    /// `1 - min_feasible` when the lowest feasible fitness is below 1, so
    /// every feasible individual has weight at least 1. Infeasible
    /// individuals have weight 0.
    ///
    /// # Complexity
    /// O(n) to build the cumulative table, O(log n) per draw
    #[default]
    Roulette,

    /// Tournament selection: pick `k` individuals at random, keep the best.
    /// Any feasible individual beats any infeasible one.
    ///
    /// # Complexity
    /// O(k) per draw
    Tournament(usize),
}

impl Selection {
    /// Draws `count` pool indices.
    ///
    /// # Errors
    ///
    /// [`EnrollError::NoFeasibleSelection`] if the pool has no feasible
    /// individual (including an empty pool).
    pub fn select_many<F: Fitness, R: Rng>(
        &self,
        scores: &[Option<F>],
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<usize>> {
        if scores.iter().all(Option::is_none) {
            return Err(EnrollError::NoFeasibleSelection);
        }
        match self {
            Selection::Roulette => roulette(scores, count, rng),
            Selection::Tournament(k) => Ok(tournament(scores, *k, count, rng)),
        }
    }
}

/// Draws `count` indices uniformly at random from `0..n`.
///
/// # Panics
/// Panics if `n == 0` and `count > 0`.
pub fn uniform<R: Rng>(n: usize, count: usize, rng: &mut R) -> Vec<usize> {
    (0..count).map(|_| rng.random_range(0..n)).collect()
}

/// Roulette wheel over a normalized cumulative table.
///
/// Each draw samples `r` in `[0, 1)` and binary-searches for the first entry
/// whose cumulative probability exceeds `r`.
fn roulette<F: Fitness, R: Rng>(scores: &[Option<F>], count: usize, rng: &mut R) -> Result<Vec<usize>> {
    let min_feasible = scores
        .iter()
        .flatten()
        .map(|f| f.to_f64())
        .fold(f64::INFINITY, f64::min);
    let shift = (1.0 - min_feasible).max(0.0);

    let weights: Vec<f64> = scores
        .iter()
        .map(|s| s.map_or(0.0, |f| f.to_f64() + shift))
        .collect();
    let total: f64 = weights.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        return Err(EnrollError::NoFeasibleSelection);
    }

    let mut running = 0.0;
    let mut cumulative: Vec<f64> = weights
        .iter()
        .map(|w| {
            running += w / total;
            running
        })
        .collect();
    // Pin the last positive entry to 1.0 so rounding can never leave a gap.
    if let Some(last) = weights.iter().rposition(|&w| w > 0.0) {
        for c in &mut cumulative[last..] {
            *c = 1.0;
        }
    }

    Ok((0..count)
        .map(|_| {
            let r: f64 = rng.random_range(0.0..1.0);
            cumulative.partition_point(|&c| c <= r)
        })
        .collect())
}

/// Tournament selection: for each draw, sample `k` indices and keep the
/// highest-scoring one (the first sampled wins ties). `None < Some(_)`, so
/// infeasible entries only win tournaments made entirely of infeasible ones.
fn tournament<F: Fitness, R: Rng>(scores: &[Option<F>], k: usize, count: usize, rng: &mut R) -> Vec<usize> {
    let k = k.max(1);
    let n = scores.len();
    (0..count)
        .map(|_| {
            let mut best = rng.random_range(0..n);
            for _ in 1..k {
                let idx = rng.random_range(0..n);
                if scores[idx] > scores[best] {
                    best = idx;
                }
            }
            best
        })
        .collect()
}
