//! Schedule search: the domain layer on top of the GA engine.
//!
//! # Key Types
//!
//! - [`Gene`] / [`Chromosome`]: candidate schedules, one section per course
//! - [`Preferences`] / [`Scoring`]: soft preferences and their weights
//! - [`CourseProblem`]: the [`GaProblem`](crate::ga::GaProblem) implementation
//! - [`Scheduler`] / [`run`]: entry points
//!
//! # Control flow
//!
//! Generation 0 is drawn by [`CourseProblem::populate`]. Each generation then
//! pairs consecutive parents for [`crossover`], scores `parents ++ offspring`
//! with [`fitness()`], and draws the next parents by roulette wheel over the
//! feasible individuals. After a fixed number of generations the best
//! feasible parent is returned, or the empty schedule if there is none.

mod chromosome;
mod driver;
mod fitness;
mod preferences;
mod problem;

pub use chromosome::{crossover, crossover_at, Chromosome, Gene};
pub use driver::{run, Scheduler};
pub use fitness::{count_gene_conflicts, evaluate, fitness, is_feasible, INFEASIBLE};
pub use preferences::{Preferences, Scoring};
pub use problem::CourseProblem;
