//! Cutoff days
//!
//! A salary is paid in two halves, each on a day-of-month boundary. The two
//! boundaries are independent integers in `1..=31`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MIN_CUTOFF_DAY: u8 = 1;
pub const MAX_CUTOFF_DAY: u8 = 31;

/// Which of the two cutoffs an amount or day belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cutoff {
    First,
    Second,
}

impl Cutoff {
    pub fn all() -> [Cutoff; 2] {
        [Cutoff::First, Cutoff::Second]
    }
}

impl fmt::Display for Cutoff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cutoff::First => write!(f, "first"),
            Cutoff::Second => write!(f, "second"),
        }
    }
}

impl FromStr for Cutoff {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "first" | "1" | "1st" => Ok(Cutoff::First),
            "second" | "2" | "2nd" => Ok(Cutoff::Second),
            other => Err(format!("unknown cutoff '{}', expected 'first' or 'second'", other)),
        }
    }
}

/// A day of the month in `1..=31`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CutoffDay(u8);

impl CutoffDay {
    /// Clamp any integer into `1..=31`
    pub fn clamped(day: i64) -> Self {
        let day = day.clamp(MIN_CUTOFF_DAY as i64, MAX_CUTOFF_DAY as i64);
        Self(day as u8)
    }

    /// Accept a stored value only when it is already in range
    pub fn checked(day: i64) -> Option<Self> {
        (MIN_CUTOFF_DAY as i64..=MAX_CUTOFF_DAY as i64)
            .contains(&day)
            .then_some(Self(day as u8))
    }

    pub fn get(&self) -> u8 {
        self.0
    }

    /// English ordinal form (`1st`, `2nd`, `3rd`, `11th`, `22nd`)
    pub fn ordinal(&self) -> String {
        let day = self.0;
        let suffix = if (day / 10) % 10 == 1 {
            "th"
        } else {
            match day % 10 {
                1 => "st",
                2 => "nd",
                3 => "rd",
                _ => "th",
            }
        };
        format!("{}{}", day, suffix)
    }
}

impl fmt::Display for CutoffDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The pair of cutoff days, defaulting to the 15th and the 30th
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CutoffSettings {
    pub first: CutoffDay,
    pub second: CutoffDay,
}

impl CutoffSettings {
    pub fn get(&self, which: Cutoff) -> CutoffDay {
        match which {
            Cutoff::First => self.first,
            Cutoff::Second => self.second,
        }
    }

    pub fn set(&mut self, which: Cutoff, day: CutoffDay) {
        match which {
            Cutoff::First => self.first = day,
            Cutoff::Second => self.second = day,
        }
    }
}

impl Default for CutoffSettings {
    fn default() -> Self {
        Self {
            first: CutoffDay(15),
            second: CutoffDay(30),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamping() {
        assert_eq!(CutoffDay::clamped(0).get(), 1);
        assert_eq!(CutoffDay::clamped(-40).get(), 1);
        assert_eq!(CutoffDay::clamped(15).get(), 15);
        assert_eq!(CutoffDay::clamped(32).get(), 31);
        assert_eq!(CutoffDay::clamped(i64::MAX).get(), 31);
    }

    #[test]
    fn test_checked_rejects_out_of_range() {
        assert!(CutoffDay::checked(0).is_none());
        assert!(CutoffDay::checked(32).is_none());
        assert_eq!(CutoffDay::checked(31).map(|d| d.get()), Some(31));
    }

    #[test]
    fn test_ordinals() {
        let cases = [
            (1, "1st"),
            (2, "2nd"),
            (3, "3rd"),
            (4, "4th"),
            (11, "11th"),
            (12, "12th"),
            (13, "13th"),
            (21, "21st"),
            (22, "22nd"),
            (23, "23rd"),
            (30, "30th"),
            (31, "31st"),
        ];
        for (day, expected) in cases {
            assert_eq!(CutoffDay::clamped(day).ordinal(), expected);
        }
    }

    #[test]
    fn test_defaults() {
        let settings = CutoffSettings::default();
        assert_eq!(settings.get(Cutoff::First).get(), 15);
        assert_eq!(settings.get(Cutoff::Second).get(), 30);
    }

    #[test]
    fn test_parse_cutoff() {
        assert_eq!("first".parse::<Cutoff>().unwrap(), Cutoff::First);
        assert_eq!("2nd".parse::<Cutoff>().unwrap(), Cutoff::Second);
        assert!("third".parse::<Cutoff>().is_err());
    }
}
