//! Core trait definitions for the GA engine.
//!
//! [`GaProblem`] is the contract between the generic evolutionary loop and a
//! domain-specific problem; [`Fitness`] abstracts the score type.

use rand::Rng;

use crate::error::Result;

/// Marker trait for fitness values.
///
/// Fitness must support comparison and be cheaply copyable.
/// **Higher fitness is better** (maximization).
///
/// Built-in implementations exist for `i64` and `f64`.
pub trait Fitness: PartialOrd + Copy + Send + Sync + std::fmt::Debug + 'static {
    /// Converts the fitness to `f64` for selection weights and statistics.
    fn to_f64(self) -> f64;
}

impl Fitness for i64 {
    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl Fitness for f64 {
    fn to_f64(self) -> f64 {
        self
    }
}

/// Defines a GA optimization problem.
///
/// Implementors supply:
///
/// 1. **Initialization**: how to create a random individual
/// 2. **Evaluation**: how to score one
/// 3. **Crossover**: how to recombine two parents into two children
/// 4. **Mutation**: how to derive a perturbed copy (optional)
/// 5. **Feasibility**: which scores mark a hard-constraint violation (optional)
///
/// Individuals are never modified in place; operators return new ones, so a
/// score computed for an individual stays valid for the whole generation.
///
/// # Thread Safety
///
/// `GaProblem` must be `Send + Sync` because the runner may evaluate a
/// generation in parallel (`parallel` feature).
pub trait GaProblem: Send + Sync {
    /// The individual (solution) type for this problem.
    type Individual: Clone + Send + Sync;

    /// The score type.
    type Fitness: Fitness;

    /// Creates a random individual.
    fn create_individual<R: Rng>(&self, rng: &mut R) -> Self::Individual;

    /// Scores an individual. Must be deterministic and side-effect free.
    ///
    /// # Errors
    ///
    /// Returns an error if the individual references data the problem does
    /// not know about; the runner aborts the search with that error.
    fn evaluate(&self, individual: &Self::Individual) -> Result<Self::Fitness>;

    /// Recombines two parents into two children.
    ///
    /// The default implementation returns clones of the parents.
    fn crossover<R: Rng>(
        &self,
        parent1: &Self::Individual,
        parent2: &Self::Individual,
        _rng: &mut R,
    ) -> (Self::Individual, Self::Individual) {
        (parent1.clone(), parent2.clone())
    }

    /// Returns a perturbed copy of an individual.
    ///
    /// The default implementation returns an unchanged clone.
    fn mutate<R: Rng>(&self, individual: &Self::Individual, _rng: &mut R) -> Self::Individual {
        individual.clone()
    }

    /// Whether a scored individual satisfies every hard constraint.
    ///
    /// Infeasible individuals are never selected by roulette, lose every
    /// tournament against a feasible one, and are never extracted as the
    /// result while a feasible individual exists. Called after
    /// [`evaluate`](GaProblem::evaluate) succeeded for `individual`.
    ///
    /// The default implementation treats every individual as feasible.
    fn is_feasible(&self, _individual: &Self::Individual, _fitness: Self::Fitness) -> bool {
        true
    }

    /// Called at the end of each generation with the best feasible score in
    /// the scored pool (`None` if the pool has no feasible individual).
    ///
    /// The default implementation is a no-op.
    fn on_generation(&self, _generation: usize, _best_fitness: Option<Self::Fitness>) {}
}
