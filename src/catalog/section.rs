//! Offered course sections and the pairwise conflict predicate.

use std::fmt;

use super::time::{DaySet, TimeWindow};
use crate::error::{EnrollError, Result};

/// One offered section of a course.
///
/// A section either meets on a non-empty set of days within a single
/// [`TimeWindow`], or has no scheduled meeting at all (e.g. online or
/// by-arrangement sections). [`try_meeting`](Section::try_meeting) rejects a day set without a
/// meeting time, so [`has_conflict`](Section::has_conflict) never sees a
/// malformed section.
///
/// # Example
///
/// ```
/// use u_enroll::catalog::{Section, TimeWindow};
///
/// let lecture = Section::new(1, "lecture")
///     .with_instructor("Dr. Haddad")
///     .meeting("MW".parse().unwrap(), TimeWindow::parse("10:00", "11:25").unwrap());
/// let lab = Section::new(2, "lab")
///     .meeting("W".parse().unwrap(), TimeWindow::parse("11:00", "12:00").unwrap());
///
/// assert!(lecture.has_conflict(&lab));
/// assert!(!lecture.has_conflict(&lecture));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    number: u32,
    kind: String,
    instructor: Option<String>,
    days: DaySet,
    window: Option<TimeWindow>,
}

impl Section {
    /// Creates an unscheduled section with no instructor.
    pub fn new(number: u32, kind: impl Into<String>) -> Self {
        Self {
            number,
            kind: kind.into(),
            instructor: None,
            days: DaySet::empty(),
            window: None,
        }
    }

    /// Sets the instructor.
    pub fn with_instructor(mut self, instructor: impl Into<String>) -> Self {
        self.instructor = Some(instructor.into());
        self
    }

    /// Sets the weekly meeting pattern.
    ///
    /// An empty day set clears the meeting entirely.
    pub fn meeting(mut self, days: DaySet, window: TimeWindow) -> Self {
        self.days = days;
        self.window = (!days.is_empty()).then_some(window);
        self
    }

    /// Sets the meeting pattern from loader output where the time may be
    /// missing.
    ///
    /// # Errors
    ///
    /// [`EnrollError::MissingMeetingTime`] if `days` is non-empty and
    /// `window` is `None`.
    pub fn try_meeting(self, days: DaySet, window: Option<TimeWindow>) -> Result<Self> {
        match window {
            Some(window) => Ok(self.meeting(days, window)),
            None if days.is_empty() => Ok(self),
            None => Err(EnrollError::MissingMeetingTime {
                number: self.number,
                days: days.to_string(),
            }),
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    /// Lecture, lab, tutorial, ...
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn instructor(&self) -> Option<&str> {
        self.instructor.as_deref()
    }

    pub fn days(&self) -> DaySet {
        self.days
    }

    pub fn window(&self) -> Option<TimeWindow> {
        self.window
    }

    /// Returns `true` if the two sections cannot both be attended.
    ///
    /// Two sections conflict iff they are distinct instances, share at least
    /// one day, and their windows overlap. The relation is symmetric and
    /// irreflexive.
    pub fn has_conflict(&self, other: &Section) -> bool {
        if std::ptr::eq(self, other) || !self.days.intersects(other.days) {
            return false;
        }
        match (self.window, other.window) {
            (Some(a), Some(b)) => a.overlaps(&b),
            _ => false,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.number, self.kind)?;
        if let Some(window) = self.window {
            write!(f, " {} {}-{}", self.days, window.start(), window.end())?;
        }
        if let Some(instructor) = &self.instructor {
            write!(f, " ({instructor})")?;
        }
        Ok(())
    }
}
