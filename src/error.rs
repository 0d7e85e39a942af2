//! Error taxonomy.
//!
//! Malformed input (bad sections, unknown course ids, invalid configuration)
//! is reported through [`EnrollError`] and propagates to the caller. Empty
//! pools, odd generation sizes, and degenerate generations are recovered
//! inside the search driver and never surface as errors.

use crate::catalog::CourseId;

/// Errors produced by the catalog model and the schedule search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnrollError {
    /// A section meets on at least one day but has no start/end time.
    #[error("section {number} meets on {days} but has no meeting time")]
    MissingMeetingTime { number: u32, days: String },

    /// A time window whose start is not strictly before its end.
    #[error("invalid time window: start {start} is not before end {end}")]
    InvalidTimeWindow { start: String, end: String },

    /// A time-of-day token that could not be parsed.
    #[error("invalid time of day: {0:?}")]
    InvalidTime(String),

    /// A weekday token that could not be parsed.
    #[error("invalid weekday: {0:?}")]
    InvalidWeekday(String),

    /// A course id that is not present in the catalog.
    #[error("unknown course: {0}")]
    UnknownCourse(CourseId),

    /// A gene pointing past the end of its course's section list.
    #[error("course {course} has no section at index {index}")]
    UnknownSection { course: CourseId, index: usize },

    /// A search configuration that failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A preferences record with unknown keys or mistyped values.
    #[error("invalid preferences: {0}")]
    InvalidPreferences(String),

    /// Every individual in the pool has zero selection weight.
    #[error("no individual in the pool has positive fitness")]
    NoFeasibleSelection,
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EnrollError>;
