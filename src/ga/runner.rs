//! GA search loop execution.
//!
//! [`GaRunner`] drives the generational loop:
//! initialization → (crossover → scoring → selection) × N → extraction.
//!
//! Each generation pairs consecutive parents, recombines every pair into two
//! offspring, scores the combined pool `parents ++ offspring`, and draws the
//! next parents from that pool. After the last generation the highest-scoring
//! feasible parent is returned.
//!
//! Individuals for which [`GaProblem::is_feasible`] is false rank below every
//! feasible one in selection and extraction.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use rand::Rng;
use tracing::{debug, info, warn};

use super::config::{DegeneratePolicy, GaConfig};
use super::selection::uniform;
use super::types::{Fitness, GaProblem};
use crate::error::{EnrollError, Result};
use crate::random::create_rng;

/// Result of a GA run.
#[derive(Debug, Clone)]
pub struct GaResult<I, F> {
    /// Highest-scoring feasible individual of the final parent generation
    /// (first occurrence on ties). If no final parent is feasible, the first
    /// parent, and `feasible` is `false`.
    pub best: I,

    /// Score of `best`.
    pub best_fitness: F,

    /// Whether `best` satisfies the problem's hard constraints.
    pub feasible: bool,

    /// Number of generations completed.
    pub generations: usize,

    /// Generations whose pool had no feasible individual.
    pub degenerate_generations: usize,

    /// Whether the run stopped on a degenerate generation under
    /// [`DegeneratePolicy::Abort`].
    pub aborted: bool,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Whether the run stopped on its time limit.
    pub timed_out: bool,

    /// Best feasible pool score of each completed generation (`None` for a
    /// generation with no feasible individual).
    pub fitness_history: Vec<Option<F>>,
}

/// Executes the GA search loop.
///
/// # Usage
///
/// ```ignore
/// let problem = MyProblem::new();
/// let config = GaConfig::default().with_seed(42);
/// let result = GaRunner::run(&problem, &config)?;
/// println!("Best fitness: {:?}", result.best_fitness);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the search.
    ///
    /// # Errors
    ///
    /// Fails on an invalid configuration or when the problem reports an
    /// evaluation error.
    pub fn run<P: GaProblem>(problem: &P, config: &GaConfig) -> Result<GaResult<P::Individual, P::Fitness>> {
        Self::run_with_cancel(problem, config, None)
    }

    /// Runs the search with an optional cancellation token.
    ///
    /// If `cancel` is set to `true`, the run stops before the next generation
    /// and extracts the best individual from the current parents.
    pub fn run_with_cancel<P: GaProblem>(
        problem: &P,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaResult<P::Individual, P::Fitness>> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };
        let started = Instant::now();

        info!(
            population = config.population_size,
            generations = config.max_generations,
            seed = ?config.seed,
            "starting search"
        );

        // 1. Initialize parents
        let mut parents: Vec<P::Individual> = (0..config.population_size)
            .map(|_| problem.create_individual(&mut rng))
            .collect();

        let mut fitness_history = Vec::with_capacity(config.max_generations);
        let mut degenerate_generations = 0usize;
        let mut generations = 0usize;
        let mut cancelled = false;
        let mut timed_out = false;
        let mut aborted = false;

        // 2. Generational loop
        for gen in 0..config.max_generations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }
            if let Some(limit) = config.time_limit_ms {
                if started.elapsed().as_millis() >= u128::from(limit) {
                    timed_out = true;
                    break;
                }
            }

            // Crossover over consecutive pairs; an odd last parent pairs with itself.
            let mut offspring = Vec::with_capacity(parents.len() + 1);
            for pair in parents.chunks(2) {
                let first = &pair[0];
                let second = pair.get(1).unwrap_or(first);
                let (c1, c2) = problem.crossover(first, second, &mut rng);
                for child in [c1, c2] {
                    if config.mutation_rate > 0.0 && rng.random_bool(config.mutation_rate) {
                        offspring.push(problem.mutate(&child, &mut rng));
                    } else {
                        offspring.push(child);
                    }
                }
            }

            let mut pool = std::mem::take(&mut parents);
            pool.extend(offspring);

            // Score
            let scores = evaluate_all(problem, &pool, config.parallel)?;
            let (best_idx, mean) = summarize(&scores);
            let gen_best = scores[best_idx];
            fitness_history.push(gen_best);
            debug!(generation = gen + 1, best = ?gen_best, mean = ?mean, pool = pool.len(), "generation scored");
            problem.on_generation(gen + 1, gen_best);

            // Select
            let picks = match config.selection.select_many(&scores, config.population_size, &mut rng) {
                Ok(picks) => picks,
                Err(EnrollError::NoFeasibleSelection) => {
                    degenerate_generations += 1;
                    match config.degenerate_policy {
                        DegeneratePolicy::UniformFallback => {
                            warn!(generation = gen + 1, "no feasible individual, drawing uniformly");
                            uniform(pool.len(), config.population_size, &mut rng)
                        }
                        DegeneratePolicy::Abort => {
                            warn!(generation = gen + 1, "no feasible individual, aborting search");
                            aborted = true;
                            generations = gen + 1;
                            parents = pool;
                            break;
                        }
                    }
                }
                Err(e) => return Err(e),
            };
            parents = picks.into_iter().map(|i| pool[i].clone()).collect();
            generations = gen + 1;
        }

        // 3. Extract the best feasible parent
        let scores = evaluate_all(problem, &parents, config.parallel)?;
        let (best_idx, _) = summarize(&scores);
        let best = parents.swap_remove(best_idx);
        let (best_fitness, feasible) = match scores[best_idx] {
            Some(fitness) => (fitness, true),
            None => (problem.evaluate(&best)?, false),
        };

        info!(
            generations,
            best = ?best_fitness,
            feasible,
            degenerate_generations,
            aborted,
            cancelled,
            timed_out,
            "search finished"
        );

        Ok(GaResult {
            best,
            best_fitness,
            feasible,
            generations,
            degenerate_generations,
            aborted,
            cancelled,
            timed_out,
            fitness_history,
        })
    }
}

/// Scores one individual; `None` if it breaks a hard constraint.
fn score<P: GaProblem>(problem: &P, individual: &P::Individual) -> Result<Option<P::Fitness>> {
    let fitness = problem.evaluate(individual)?;
    Ok(problem.is_feasible(individual, fitness).then_some(fitness))
}

/// Scores every individual of a pool.
#[cfg(feature = "parallel")]
fn evaluate_all<P: GaProblem>(problem: &P, pool: &[P::Individual], parallel: bool) -> Result<Vec<Option<P::Fitness>>> {
    use rayon::prelude::*;

    if parallel {
        pool.par_iter().map(|ind| score(problem, ind)).collect()
    } else {
        pool.iter().map(|ind| score(problem, ind)).collect()
    }
}

/// Scores every individual of a pool.
#[cfg(not(feature = "parallel"))]
fn evaluate_all<P: GaProblem>(problem: &P, pool: &[P::Individual], _parallel: bool) -> Result<Vec<Option<P::Fitness>>> {
    pool.iter().map(|ind| score(problem, ind)).collect()
}

/// Index of the first maximum score, and the mean feasible score.
///
/// Infeasible entries rank below every feasible one; if none is feasible the
/// index is 0 and the mean is `None`. `scores` must be non-empty.
fn summarize<F: Fitness>(scores: &[Option<F>]) -> (usize, Option<f64>) {
    let mut best = 0;
    let mut sum = 0.0;
    let mut feasible = 0usize;
    for (i, &score) in scores.iter().enumerate() {
        if score > scores[best] {
            best = i;
        }
        if let Some(f) = score {
            sum += f.to_f64();
            feasible += 1;
        }
    }
    (best, (feasible > 0).then(|| sum / feasible as f64))
}

// ============================================================================
// Tests
// ============================================================================
