//! Course catalog model.
//!
//! The [`Catalog`] exclusively owns every [`Course`] and, through them, every
//! [`Section`]. Chromosomes refer into it by course id and section index.
//! The study-plan and section loaders populate it; all mutation
//! (priorities, completion, prerequisites) happens before a search starts,
//! which holds only a shared borrow for the duration of the run.
//!
//! # Key Types
//!
//! - [`Course`] / [`CourseId`]: course records keyed by code
//! - [`Section`]: an offered section with its conflict predicate
//! - [`DaySet`], [`TimeOfDay`], [`TimeWindow`]: meeting-time primitives

mod course;
mod section;
mod time;

pub use course::{Course, CourseId};
pub use section::Section;
pub use time::{DaySet, TimeOfDay, TimeWindow, Weekday};

use std::collections::{BTreeMap, HashSet};

use crate::error::{EnrollError, Result};

/// Mapping from course id to [`Course`].
///
/// Iteration order is sorted by course id, which keeps eligibility pools and
/// therefore seeded runs reproducible.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    courses: BTreeMap<CourseId, Course>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a course, replacing any previous course with the same id.
    pub fn insert(&mut self, course: Course) -> Option<Course> {
        self.courses.insert(course.id().clone(), course)
    }

    pub fn get(&self, id: &str) -> Option<&Course> {
        self.courses.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Course> {
        self.courses.get_mut(id)
    }

    /// Looks up a course, reporting an unknown id as malformed input.
    pub fn course(&self, id: &CourseId) -> Result<&Course> {
        self.courses
            .get(id)
            .ok_or_else(|| EnrollError::UnknownCourse(id.clone()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.courses.contains_key(id)
    }

    /// Number of courses in the catalog.
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Course> {
        self.courses.values()
    }

    /// Appends a section to an existing course.
    pub fn add_section(&mut self, id: &CourseId, section: Section) -> Result<()> {
        self.courses
            .get_mut(id)
            .ok_or_else(|| EnrollError::UnknownCourse(id.clone()))?
            .add_section(section);
        Ok(())
    }

    /// Recomputes every course's priority from the prerequisite graph.
    ///
    /// Each time a course appears as another course's prerequisite, its
    /// priority increases by one. Prerequisites that are not in the catalog
    /// are ignored. Priorities are reset first, so the pass is idempotent.
    pub fn compute_priorities(&mut self) {
        let mut counts: BTreeMap<CourseId, u32> = BTreeMap::new();
        for course in self.courses.values() {
            for pre in course.prerequisites() {
                *counts.entry(pre.clone()).or_insert(0) += 1;
            }
        }
        for course in self.courses.values_mut() {
            course.reset_priority();
            for _ in 0..counts.get(course.id()).copied().unwrap_or(0) {
                course.increase_priority();
            }
        }
    }

    /// Marks a course as passed and removes it from every other course's
    /// prerequisites.
    pub fn complete_course(&mut self, id: &CourseId) -> Result<()> {
        self.courses
            .get_mut(id)
            .ok_or_else(|| EnrollError::UnknownCourse(id.clone()))?
            .mark_passed();
        for course in self.courses.values_mut() {
            course.satisfy_prerequisite(id.as_str());
        }
        Ok(())
    }

    /// Every course that is available and not yet passed, in id order.
    pub fn eligible_pool(&self) -> Vec<CourseId> {
        self.courses
            .values()
            .filter(|c| c.is_available() && !c.is_passed())
            .map(|c| c.id().clone())
            .collect()
    }

    /// Filters an ordered candidate list (e.g. a study plan) down to the
    /// courses a student may register for.
    ///
    /// Unknown ids, unavailable or passed courses, and repeats are dropped;
    /// the remaining ids keep their input order.
    pub fn eligible_from<'a, I>(&self, candidates: I) -> Vec<CourseId>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut seen = HashSet::new();
        candidates
            .into_iter()
            .filter_map(|id| self.courses.get(id))
            .filter(|c| c.is_available() && !c.is_passed())
            .filter(|c| seen.insert(c.id().clone()))
            .map(|c| c.id().clone())
            .collect()
    }
}

impl FromIterator<Course> for Catalog {
    fn from_iter<I: IntoIterator<Item = Course>>(iter: I) -> Self {
        let mut catalog = Catalog::new();
        for course in iter {
            catalog.insert(course);
        }
        catalog
    }
}
