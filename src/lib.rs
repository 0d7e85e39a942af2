//! Course-section registration planner.
//!
//! Given a course catalog, the courses a student is eligible for this term,
//! and their scheduling preferences, searches for a conflict-free set of
//! sections that scores best under a fitness function combining hard
//! constraints and soft preferences.
//!
//! - **Catalog** ([`catalog`]): courses, sections, meeting times, and the
//!   section conflict predicate.
//! - **Schedule** ([`schedule`]): chromosome encoding, fitness evaluation,
//!   crossover, population initialization, and the search driver.
//! - **GA engine** ([`ga`]): a generic generational loop with roulette and
//!   tournament selection.
//!
//! # Architecture
//!
//! The study-plan and section-offering loaders are external: they build a
//! [`catalog::Catalog`] and an eligibility pool, then call [`run`] (or
//! [`schedule::Scheduler`] for full control). The search holds the catalog
//! by shared reference, so priorities and completion flags are fixed for the
//! duration of a run.
//!
//! ```
//! use u_enroll::catalog::{Catalog, Course, Section, TimeWindow};
//! use u_enroll::schedule::Preferences;
//!
//! let mw = "MW".parse().unwrap();
//! let tr = "TR".parse().unwrap();
//! let slot = TimeWindow::parse("10:00", "11:15").unwrap();
//! let mut catalog: Catalog = [
//!     Course::new("ENCS2340", 4).with_sections([Section::new(1, "lecture").meeting(mw, slot)]),
//!     Course::new("ENCS2110", 3).with_sections([Section::new(1, "lecture").meeting(tr, slot)]),
//!     Course::new("ENCS3310", 3).with_prerequisites(["ENCS2340", "ENCS2110"]),
//! ]
//! .into_iter()
//! .collect();
//! catalog.compute_priorities();
//!
//! let pool = catalog.eligible_pool();
//! let (best, fitness) = u_enroll::run(&pool, &catalog, &Preferences::default()).unwrap();
//! assert_eq!(best.len(), 2);
//! assert_eq!(fitness, 2);
//! ```

pub mod catalog;
pub mod error;
pub mod ga;
pub mod random;
pub mod schedule;

pub use error::{EnrollError, Result};
pub use schedule::run;
