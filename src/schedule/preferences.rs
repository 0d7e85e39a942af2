//! Student preferences and scoring constants.

use serde::{Deserialize, Serialize};

use crate::error::{EnrollError, Result};

/// Soft scheduling preferences.
///
/// Every key is optional; an absent key contributes no scoring term.
/// Unknown keys are rejected when deserializing.
///
/// ```
/// use u_enroll::schedule::Preferences;
///
/// let prefs = Preferences::from_json(r#"{ "credit": 15, "days-off": 1 }"#).unwrap();
/// assert_eq!(prefs.credit, Some(15));
/// assert_eq!(prefs.days_off, Some(1));
/// assert!(Preferences::from_json(r#"{ "max_hours_day": 6 }"#).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Preferences {
    /// An instructor the student wants at least one section with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructor: Option<String>,

    /// Desired number of weekdays with nothing scheduled.
    #[serde(default, alias = "days-off", skip_serializing_if = "Option::is_none")]
    pub days_off: Option<u32>,

    /// Desired total credit-hour load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit: Option<u32>,
}

impl Preferences {
    /// Parses preferences from a JSON object.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| EnrollError::InvalidPreferences(e.to_string()))
    }

    pub fn with_instructor(mut self, instructor: impl Into<String>) -> Self {
        self.instructor = Some(instructor.into());
        self
    }

    pub fn with_days_off(mut self, days: u32) -> Self {
        self.days_off = Some(days);
        self
    }

    pub fn with_credit(mut self, credit: u32) -> Self {
        self.credit = Some(credit);
        self
    }
}

/// Fixed weights used by the fitness evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scoring {
    /// Bonus when the preferred instructor teaches a scheduled section.
    pub instructor_bonus: i64,

    /// Teaching days per week; days off = `week_days - occupied days`.
    pub week_days: u32,
}

impl Default for Scoring {
    fn default() -> Self {
        Self {
            instructor_bonus: 5,
            week_days: 5,
        }
    }
}
