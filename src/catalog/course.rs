//! Course records.

use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::section::Section;

/// A course code such as `"ENCS2340"`.
///
/// Backed by an `Arc<str>` so genes can carry it without allocating.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(Arc<str>);

impl CourseId {
    pub fn new(id: impl AsRef<str>) -> Self {
        CourseId(Arc::from(id.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CourseId {
    fn from(id: &str) -> Self {
        CourseId::new(id)
    }
}

impl From<String> for CourseId {
    fn from(id: String) -> Self {
        CourseId(Arc::from(id))
    }
}

impl Borrow<str> for CourseId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A catalog course.
///
/// Each course owns its own prerequisite set and section list. Mutation goes
/// through a small set of operations ([`increase_priority`](Course::increase_priority),
/// [`mark_passed`](Course::mark_passed), [`satisfy_prerequisite`](Course::satisfy_prerequisite),
/// [`add_section`](Course::add_section)); the search itself only reads courses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    id: CourseId,
    credit_hours: u32,
    prerequisites: BTreeSet<CourseId>,
    priority: u32,
    passed: bool,
    sections: Vec<Section>,
}

impl Course {
    /// Creates a course with no prerequisites and no sections.
    pub fn new(id: impl Into<CourseId>, credit_hours: u32) -> Self {
        Self {
            id: id.into(),
            credit_hours,
            prerequisites: BTreeSet::new(),
            priority: 0,
            passed: false,
            sections: Vec::new(),
        }
    }

    /// Sets the prerequisite course ids.
    pub fn with_prerequisites<I, S>(mut self, prerequisites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<CourseId>,
    {
        self.prerequisites = prerequisites.into_iter().map(Into::into).collect();
        self
    }

    /// Appends offered sections.
    pub fn with_sections(mut self, sections: impl IntoIterator<Item = Section>) -> Self {
        self.sections.extend(sections);
        self
    }

    pub fn id(&self) -> &CourseId {
        &self.id
    }

    pub fn credit_hours(&self) -> u32 {
        self.credit_hours
    }

    pub fn prerequisites(&self) -> &BTreeSet<CourseId> {
        &self.prerequisites
    }

    pub fn priority(&self) -> u32 {
        self.priority
    }

    pub fn is_passed(&self) -> bool {
        self.passed
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// A course is available once every prerequisite has been satisfied
    /// (and removed).
    pub fn is_available(&self) -> bool {
        self.prerequisites.is_empty()
    }

    pub fn increase_priority(&mut self) {
        self.priority += 1;
    }

    pub(crate) fn reset_priority(&mut self) {
        self.priority = 0;
    }

    pub fn mark_passed(&mut self) {
        self.passed = true;
    }

    /// Removes a prerequisite; returns `true` if it was present.
    pub fn satisfy_prerequisite(&mut self, prerequisite: &str) -> bool {
        self.prerequisites.remove(prerequisite)
    }

    pub fn add_section(&mut self, section: Section) {
        self.sections.push(section);
    }
}
