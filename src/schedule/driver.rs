//! Search driver: the single entry point callers use.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use super::chromosome::Chromosome;
use super::fitness::INFEASIBLE;
use super::preferences::{Preferences, Scoring};
use super::problem::CourseProblem;
use crate::catalog::{Catalog, CourseId};
use crate::error::Result;
use crate::ga::{GaConfig, GaResult, GaRunner};

/// Finds the best schedule for an eligibility pool with default settings.
///
/// Returns the best feasible chromosome of the final generation and its
/// fitness, or the empty chromosome with [`INFEASIBLE`] if the final
/// generation has none.
///
/// # Errors
///
/// Only malformed input fails: a pool id missing from the catalog. Empty
/// pools, sectionless courses, and generations with no feasible individual
/// all produce a well-defined (possibly empty, zero-fitness) result.
pub fn run(pool: &[CourseId], catalog: &Catalog, preferences: &Preferences) -> Result<(Chromosome, i64)> {
    let result = Scheduler::new(catalog)
        .with_preferences(preferences.clone())
        .run(pool)?;
    Ok((result.best, result.best_fitness))
}

/// Configurable front end over [`CourseProblem`] and [`GaRunner`].
///
/// ```
/// use u_enroll::catalog::Catalog;
/// use u_enroll::ga::GaConfig;
/// use u_enroll::schedule::{Preferences, Scheduler};
///
/// let catalog = Catalog::new();
/// let result = Scheduler::new(&catalog)
///     .with_preferences(Preferences::default().with_credit(15))
///     .with_config(GaConfig::fast().with_seed(3))
///     .run(&catalog.eligible_pool())
///     .unwrap();
/// assert!(result.best.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Scheduler<'c> {
    catalog: &'c Catalog,
    preferences: Preferences,
    scoring: Scoring,
    config: GaConfig,
}

impl<'c> Scheduler<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self {
            catalog,
            preferences: Preferences::default(),
            scoring: Scoring::default(),
            config: GaConfig::default(),
        }
    }

    pub fn with_preferences(mut self, preferences: Preferences) -> Self {
        self.preferences = preferences;
        self
    }

    pub fn with_scoring(mut self, scoring: Scoring) -> Self {
        self.scoring = scoring;
        self
    }

    pub fn with_config(mut self, config: GaConfig) -> Self {
        self.config = config;
        self
    }

    /// Runs the search over `pool`.
    pub fn run(&self, pool: &[CourseId]) -> Result<GaResult<Chromosome, i64>> {
        self.run_with_cancel(pool, None)
    }

    /// Runs the search with an optional cancellation token.
    ///
    /// A schedule with a time conflict or a passed course is never returned.
    /// When the final generation has no feasible individual (including a run
    /// aborted on a degenerate generation), the result carries the empty
    /// schedule with fitness [`INFEASIBLE`] and `feasible` left `false`.
    pub fn run_with_cancel(
        &self,
        pool: &[CourseId],
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaResult<Chromosome, i64>> {
        let problem = CourseProblem::new(pool.to_vec(), self.catalog, self.preferences.clone())?
            .with_scoring(self.scoring)
            .with_course_range(self.config.min_courses, self.config.max_courses);

        let mut result = GaRunner::run_with_cancel(&problem, &self.config, cancel)?;
        if !result.feasible {
            result.best = Chromosome::empty();
            result.best_fitness = INFEASIBLE;
        }
        Ok(result)
    }
}
