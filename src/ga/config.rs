//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the search loop.

use serde::{Deserialize, Serialize};

use super::selection::Selection;
use crate::error::{EnrollError, Result};

/// What the runner does when a scored pool has no feasible individual.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegeneratePolicy {
    /// Draw the next generation uniformly at random from the pool.
    #[default]
    UniformFallback,
    /// Stop the search and report that no feasible individual was found.
    Abort,
}

/// Configuration for the schedule search.
///
/// # Defaults
///
/// ```
/// use u_enroll::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.max_generations, 20);
/// assert_eq!((config.min_courses, config.max_courses), (3, 10));
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_enroll::ga::{GaConfig, Selection};
///
/// let config = GaConfig::default()
///     .with_population_size(60)
///     .with_course_range(2, 6)
///     .with_selection(Selection::Tournament(3))
///     .with_mutation_rate(0.05)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfig {
    /// Number of parents kept per generation.
    pub population_size: usize,

    /// Number of crossover/score/select iterations.
    pub max_generations: usize,

    /// Lower bound on the number of courses drawn for a new individual.
    pub min_courses: usize,

    /// Upper bound on the number of courses drawn for a new individual.
    ///
    /// The draw is further clipped to the size of the eligibility pool.
    pub max_courses: usize,

    /// Selection strategy for drawing the next generation.
    pub selection: Selection,

    /// Probability that an offspring is replaced by a mutated copy (0.0–1.0).
    ///
    /// Zero disables mutation; recombination and selection are then the only
    /// source of exploration.
    pub mutation_rate: f64,

    /// Behaviour when a generation has no feasible individual.
    pub degenerate_policy: DegeneratePolicy,

    /// Whether to score each generation in parallel.
    ///
    /// Only effective with the `parallel` feature.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,

    /// Optional wall-clock time limit in milliseconds.
    ///
    /// Checked between generations; the run returns the best individual of
    /// the last completed generation.
    pub time_limit_ms: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 20,
            min_courses: 3,
            max_courses: 10,
            selection: Selection::default(),
            mutation_rate: 0.0,
            degenerate_policy: DegeneratePolicy::default(),
            parallel: false,
            seed: None,
            time_limit_ms: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the per-individual course count range.
    pub fn with_course_range(mut self, min: usize, max: usize) -> Self {
        self.min_courses = min;
        self.max_courses = max;
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, sel: Selection) -> Self {
        self.selection = sel;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the degenerate-generation policy.
    pub fn with_degenerate_policy(mut self, policy: DegeneratePolicy) -> Self {
        self.degenerate_policy = policy;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the wall-clock time limit in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Preset for interactive use: small population, few generations.
    ///
    /// - Population: 40, Generations: 10, Time limit: 2s
    pub fn fast() -> Self {
        Self {
            population_size: 40,
            max_generations: 10,
            time_limit_ms: Some(2_000),
            ..Self::default()
        }
    }

    /// Preset for large catalogs: bigger population, more generations, light
    /// mutation.
    ///
    /// - Population: 200, Generations: 100, Mutation: 0.05, Time limit: 30s
    pub fn thorough() -> Self {
        Self {
            population_size: 200,
            max_generations: 100,
            mutation_rate: 0.05,
            time_limit_ms: Some(30_000),
            ..Self::default()
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// [`EnrollError::InvalidConfig`] describing the first invalid parameter.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| Err(EnrollError::InvalidConfig(msg.into()));
        if self.population_size == 0 {
            return invalid("population_size must be at least 1");
        }
        if self.max_generations == 0 {
            return invalid("max_generations must be at least 1");
        }
        if self.max_courses == 0 {
            return invalid("max_courses must be at least 1");
        }
        if self.min_courses > self.max_courses {
            return invalid("min_courses must not exceed max_courses");
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return invalid("mutation_rate must be within [0, 1]");
        }
        if self.selection == Selection::Tournament(0) {
            return invalid("tournament size must be at least 1");
        }
        if self.time_limit_ms == Some(0) {
            return invalid("time_limit_ms must be positive or None");
        }
        Ok(())
    }
}
