//! Calendar months
//!
//! Expenses are grouped by month. A month is always the first day of that
//! month, and its storage key is the fixed numeric form `YYYY-MM` so keys are
//! identical on every machine.

use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    /// Create a month, returning `None` for a month outside `1..=12`
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    /// The month containing `date`
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The month containing today's local date
    pub fn current() -> Self {
        Self::from_date(chrono::Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First calendar day of the month
    pub fn first_day(&self) -> NaiveDate {
        // Every constructor and `next`/`prev` keep the month representable
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Stable storage key, e.g. `2026-01`
    pub fn key(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    /// Human readable title, e.g. `January 2026`
    pub fn title(&self) -> String {
        self.first_day().format("%B %Y").to_string()
    }

    /// The following month, or `self` at the last representable month
    pub fn next(&self) -> Self {
        let (year, month) = if self.month == 12 {
            (self.year.checked_add(1), 1)
        } else {
            (Some(self.year), self.month + 1)
        };
        year.and_then(|year| Self::new(year, month)).unwrap_or(*self)
    }

    /// The preceding month, or `self` at the first representable month
    pub fn prev(&self) -> Self {
        let (year, month) = if self.month == 1 {
            (self.year.checked_sub(1), 12)
        } else {
            (Some(self.year), self.month - 1)
        };
        year.and_then(|year| Self::new(year, month)).unwrap_or(*self)
    }

    /// Parse a `YYYY-MM` key
    pub fn parse(s: &str) -> Result<Self, MonthParseError> {
        let (year, month) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| MonthParseError(s.to_string()))?;

        let year: i32 = year.parse().map_err(|_| MonthParseError(s.to_string()))?;
        let month: u32 = month.parse().map_err(|_| MonthParseError(s.to_string()))?;

        Self::new(year, month).ok_or_else(|| MonthParseError(s.to_string()))
    }
}

impl Default for Month {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for Month {
    type Err = MonthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Error returned when a month key cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthParseError(pub String);

impl fmt::Display for MonthParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid month '{}', expected YYYY-MM", self.0)
    }
}

impl std::error::Error for MonthParseError {}
