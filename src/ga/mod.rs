//! Genetic Algorithm engine.
//!
//! A generic GA loop built on trait-based abstractions. A problem plugs in by
//! implementing [`GaProblem`], which specifies how to create, score, and
//! recombine individuals.
//!
//! # Core Traits
//!
//! - [`Fitness`]: Score type (higher is better)
//! - [`GaProblem`]: Problem definition: initialization, evaluation, operators
//!
//! # Key Types
//!
//! - [`GaConfig`]: Search parameters (population, generations, selection, presets)
//! - [`GaRunner`]: Executes the generational loop
//! - [`GaResult`]: Final result with run statistics
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
mod runner;
mod selection;
mod types;

pub use config::{DegeneratePolicy, GaConfig};
pub use runner::{GaResult, GaRunner};
pub use selection::{uniform, Selection};
pub use types::{Fitness, GaProblem};
