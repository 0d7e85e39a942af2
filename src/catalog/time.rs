//! Weekdays and time-of-day windows.
//!
//! Section meetings are expressed as a [`DaySet`] plus a [`TimeWindow`].
//! Times are minutes from midnight; windows are half-open `[start, end)`.

use std::fmt;
use std::str::FromStr;

use crate::error::{EnrollError, Result};

/// A day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All days, Monday first.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Single-letter registrar code (`M T W R F S U`).
    pub fn code(self) -> char {
        match self {
            Weekday::Monday => 'M',
            Weekday::Tuesday => 'T',
            Weekday::Wednesday => 'W',
            Weekday::Thursday => 'R',
            Weekday::Friday => 'F',
            Weekday::Saturday => 'S',
            Weekday::Sunday => 'U',
        }
    }

    fn from_code(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'M' => Some(Weekday::Monday),
            'T' => Some(Weekday::Tuesday),
            'W' => Some(Weekday::Wednesday),
            'R' => Some(Weekday::Thursday),
            'F' => Some(Weekday::Friday),
            'S' => Some(Weekday::Saturday),
            'U' => Some(Weekday::Sunday),
            _ => None,
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl FromStr for Weekday {
    type Err = EnrollError;

    /// Accepts single-letter codes, three-letter abbreviations, and full
    /// English names, case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        let token = s.trim();
        let mut chars = token.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Weekday::from_code(c).ok_or_else(|| EnrollError::InvalidWeekday(s.into()));
        }
        let lower = token.to_ascii_lowercase();
        Weekday::ALL
            .into_iter()
            .find(|day| {
                let name = format!("{day:?}").to_ascii_lowercase();
                name == lower || (lower.len() == 3 && name.starts_with(&lower))
            })
            .ok_or_else(|| EnrollError::InvalidWeekday(s.into()))
    }
}

/// A set of weekdays stored as a bit mask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DaySet(u8);

impl DaySet {
    /// The empty set.
    pub const fn empty() -> Self {
        DaySet(0)
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= day.bit();
    }

    pub fn contains(self, day: Weekday) -> bool {
        self.0 & day.bit() != 0
    }

    /// Returns `true` if the two sets share at least one day.
    pub fn intersects(self, other: DaySet) -> bool {
        self.0 & other.0 != 0
    }

    pub fn union(self, other: DaySet) -> DaySet {
        DaySet(self.0 | other.0)
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates the days in Monday-first order.
    pub fn iter(self) -> impl Iterator<Item = Weekday> {
        Weekday::ALL.into_iter().filter(move |d| self.contains(*d))
    }
}

impl FromIterator<Weekday> for DaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set = DaySet::empty();
        for day in iter {
            set.insert(day);
        }
        set
    }
}

impl FromStr for DaySet {
    type Err = EnrollError;

    /// Parses either separated tokens (`"Mon, Wed"`, `"M W"`) or a compact
    /// code string (`"MWF"`, `"TR"`).
    fn from_str(s: &str) -> Result<Self> {
        let mut set = DaySet::empty();
        for token in s.split(|c: char| c == ',' || c.is_whitespace()) {
            if token.is_empty() {
                continue;
            }
            match token.parse::<Weekday>() {
                Ok(day) => set.insert(day),
                Err(err) => {
                    for c in token.chars() {
                        set.insert(Weekday::from_code(c).ok_or_else(|| err.clone())?);
                    }
                }
            }
        }
        Ok(set)
    }
}

impl fmt::Display for DaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for day in self.iter() {
            write!(f, "{}", day.code())?;
        }
        Ok(())
    }
}

/// A time of day, in minutes from midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Creates a time from hours and minutes.
    pub fn from_hm(hours: u16, minutes: u16) -> Result<Self> {
        if hours >= 24 || minutes >= 60 {
            return Err(EnrollError::InvalidTime(format!("{hours}:{minutes:02}")));
        }
        Ok(TimeOfDay(hours * 60 + minutes))
    }

    /// Creates a time from an offset in minutes.
    pub fn from_minutes(minutes: u16) -> Result<Self> {
        if minutes >= 24 * 60 {
            return Err(EnrollError::InvalidTime(minutes.to_string()));
        }
        Ok(TimeOfDay(minutes))
    }

    pub fn minutes(self) -> u16 {
        self.0
    }
}

impl FromStr for TimeOfDay {
    type Err = EnrollError;

    /// Parses `H:MM` or `HH:MM` (24-hour clock).
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || EnrollError::InvalidTime(s.into());
        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
        let hours: u16 = h.parse().map_err(|_| invalid())?;
        let minutes: u16 = m.parse().map_err(|_| invalid())?;
        if m.len() != 2 {
            return Err(invalid());
        }
        TimeOfDay::from_hm(hours, minutes).map_err(|_| invalid())
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

/// A half-open interval `[start, end)` within one day.
///
/// Construction guarantees `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeWindow {
    start: TimeOfDay,
    end: TimeOfDay,
}

impl TimeWindow {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Result<Self> {
        if start >= end {
            return Err(EnrollError::InvalidTimeWindow {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Parses a window from two `HH:MM` tokens.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::new(start.parse()?, end.parse()?)
    }

    pub fn start(&self) -> TimeOfDay {
        self.start
    }

    pub fn end(&self) -> TimeOfDay {
        self.end
    }

    /// Half-open overlap test: `s1 < e2 && s2 < e1`.
    ///
    /// Windows that merely touch (`e1 == s2`) do not overlap.
    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        self.start < other.end && other.start < self.end
    }
}
