//! Seasonal pricing calendars.
//!
//! A company prices rentals by season. Seasons are repeating yearly ranges of
//! `(month, day)` pairs, inclusive on both ends, and may wrap across the year
//! end (`12-20/01-20`). Together a company's seasons must partition a fixed
//! 366-day reference year: every day in exactly one season.
//!
//! - [`MonthDay`] and [`SeasonRange`] model dates and ranges of the reference year.
//! - [`validate_seasons_coverage`] and [`CoverageValidator`] check a candidate set.
//! - [`SeasonService`] runs create / update / delete against a [`SeasonStore`],
//!   validating each candidate set under a per-scope lock before writing.

mod book;
mod config;
mod consts;
mod coverage;
mod prelude;
mod range;
mod season;
mod service;
mod types;

#[cfg(test)]
mod test_utils;

pub use book::{BookError, Mutation, SeasonBook};
pub use config::{ConfigError, CoverageConfig};
pub use consts::*;
pub use coverage::{
    CoverageError, CoverageReport, CoverageValidator, uncovered_ranges, validate_seasons_coverage,
};
pub use range::{RangeError, SeasonRange, season_days};
pub use season::{RecordError, Season, SeasonBounds, SeasonRow};
pub use service::{MemoryStore, MemoryStoreError, SeasonError, SeasonService, SeasonStore};
pub use types::{Day, Month, day_of_year, days_in_month, is_valid_date};

use crate::consts::MONTH_START_DAY;
use crate::prelude::*;
use std::str::FromStr;

/// A day of the reference year, named by month and day of month.
/// Ordering follows the calendar, January 1st first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:02}-{:02}", "month.get()", "day.get()")]
pub struct MonthDay {
    month: Month,
    day: Day,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {month:02}")]
    InvalidDay { month: u8, day: u8 },
    #[display(fmt = "Invalid day: {} (must be 1-{})", "_0", MAX_DAY)]
    InvalidDayNumber(u8),
    #[display(fmt = "Invalid day of year: {} (must be 1-{})", "_0", DAYS_IN_REFERENCE_YEAR)]
    InvalidDayOfYear(u16),
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

impl MonthDay {
    /// Creates a date of the reference year
    ///
    /// # Errors
    /// Returns `ParseError::InvalidMonth` or `ParseError::InvalidDay` when the pair
    /// does not exist (February has 29 days).
    pub fn new(month: u8, day: u8) -> Result<Self, ParseError> {
        let month_nz = Month::new(month)?;
        let day_nz = Day::new(day, month)?;
        Ok(Self {
            month: month_nz,
            day: day_nz,
        })
    }

    /// Inverse of [`MonthDay::day_of_year`]
    ///
    /// # Errors
    /// Returns `ParseError::InvalidDayOfYear` outside `1..=366`.
    pub fn from_day_of_year(ordinal: u16) -> Result<Self, ParseError> {
        if ordinal == 0 || ordinal > DAYS_IN_REFERENCE_YEAR {
            return Err(ParseError::InvalidDayOfYear(ordinal));
        }
        let month = (JANUARY..=DECEMBER)
            .rev()
            .find(|&m| MONTH_START_DAY[m as usize] <= ordinal)
            .ok_or(ParseError::InvalidDayOfYear(ordinal))?;
        let day = ordinal - MONTH_START_DAY[month as usize] + 1;
        let day = u8::try_from(day).map_err(|_| ParseError::InvalidDayOfYear(ordinal))?;
        Self::new(month, day)
    }

    /// January 1st
    pub fn first() -> Self {
        Self::boundary(JANUARY, MIN_DAY)
    }

    /// December 31st
    pub fn last() -> Self {
        Self::boundary(DECEMBER, DAYS_IN_MONTH[DECEMBER as usize])
    }

    fn boundary(month: u8, day: u8) -> Self {
        match Self::new(month, day) {
            Ok(date) => date,
            Err(_) => unreachable!("calendar boundaries are valid dates"),
        }
    }

    /// Returns the month (1-12)
    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    /// Returns the day of the month
    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    /// Returns the Month type
    pub const fn month_typed(&self) -> Month {
        self.month
    }

    /// Returns the Day type
    pub const fn day_typed(&self) -> Day {
        self.day
    }

    /// Position in the reference year (1..=366)
    pub const fn day_of_year(&self) -> u16 {
        day_of_year(self.month.get(), self.day.get())
    }
}

impl FromStr for MonthDay {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).map(str::trim).collect();
        let [month, day] = parts.as_slice() else {
            return Err(ParseError::InvalidFormat(format!(
                "expected MM{DATE_SEPARATOR}DD, found {trimmed}"
            )));
        };

        let month = Self::parse_u8(month)?;
        let day = Self::parse_u8(day)?;
        Self::new(month, day)
    }
}

impl MonthDay {
    /// Helper to parse u8 with better error messages
    fn parse_u8(s: &str) -> Result<u8, ParseError> {
        s.parse::<u8>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }
}

impl TryFrom<(u8, u8)> for MonthDay {
    type Error = ParseError;

    fn try_from(value: (u8, u8)) -> Result<Self, Self::Error> {
        Self::new(value.0, value.1)
    }
}

impl serde::Serialize for MonthDay {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for MonthDay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::md;

    #[test]
    fn test_new_valid() {
        let date = MonthDay::new(8, 15).unwrap();
        assert_eq!(date.month(), 8);
        assert_eq!(date.day(), 15);
        assert_eq!(date.month_typed(), Month::new(8).unwrap());
        assert_eq!(date.day_typed(), Day::new(15, 8).unwrap());
    }

    #[test]
    fn test_leap_day_always_exists() {
        assert!(MonthDay::new(2, 29).is_ok());
        assert!(matches!(
            MonthDay::new(2, 30),
            Err(ParseError::InvalidDay { month: 2, day: 30 })
        ));
    }

    #[test]
    fn test_invalid_month() {
        assert!(matches!(MonthDay::new(13, 1), Err(ParseError::InvalidMonth(13))));
        assert!(matches!(MonthDay::new(0, 1), Err(ParseError::InvalidMonth(0))));
    }

    #[test]
    fn test_day_of_year() {
        assert_eq!(md(1, 1).day_of_year(), 1);
        assert_eq!(md(3, 1).day_of_year(), 61);
        assert_eq!(md(12, 20).day_of_year(), 355);
        assert_eq!(md(12, 31).day_of_year(), 366);
    }

    #[test]
    fn test_from_day_of_year_roundtrip_all_days() {
        for ordinal in 1..=DAYS_IN_REFERENCE_YEAR {
            let date = MonthDay::from_day_of_year(ordinal).unwrap();
            assert_eq!(date.day_of_year(), ordinal, "roundtrip failed for {date}");
        }
    }

    #[test]
    fn test_from_day_of_year_out_of_range() {
        assert!(matches!(
            MonthDay::from_day_of_year(0),
            Err(ParseError::InvalidDayOfYear(0))
        ));
        assert!(matches!(
            MonthDay::from_day_of_year(367),
            Err(ParseError::InvalidDayOfYear(367))
        ));
    }

    #[test]
    fn test_first_and_last() {
        assert_eq!(MonthDay::first(), md(1, 1));
        assert_eq!(MonthDay::last(), md(12, 31));
    }

    #[test]
    fn test_ordering_follows_calendar() {
        assert!(md(1, 31) < md(2, 1));
        assert!(md(2, 29) < md(3, 1));
        assert!(md(12, 30) < md(12, 31));
    }

    #[test]
    fn test_display() {
        assert_eq!(md(8, 5).to_string(), "08-05");
        assert_eq!(md(12, 20).to_string(), "12-20");
    }

    #[test]
    fn test_parse() {
        assert_eq!("12-20".parse::<MonthDay>().unwrap(), md(12, 20));
        assert_eq!(" 2 - 29 ".parse::<MonthDay>().unwrap(), md(2, 29));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!("".parse::<MonthDay>(), Err(ParseError::EmptyInput)));
        assert!(matches!("12".parse::<MonthDay>(), Err(ParseError::InvalidFormat(_))));
        assert!(matches!("12-01-05".parse::<MonthDay>(), Err(ParseError::InvalidFormat(_))));
        assert!(matches!("XX-01".parse::<MonthDay>(), Err(ParseError::InvalidFormat(_))));
        assert!(matches!(
            "02-30".parse::<MonthDay>(),
            Err(ParseError::InvalidDay { month: 2, day: 30 })
        ));
    }

    #[test]
    fn test_try_from_tuple() {
        let date: MonthDay = (6, 30).try_into().unwrap();
        assert_eq!(date, md(6, 30));

        let result: Result<MonthDay, _> = (6, 31).try_into();
        assert!(result.is_err());
    }

    #[test]
    fn test_serde_string_format() {
        let date = md(1, 20);
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, r#""01-20""#);
        let parsed: MonthDay = serde_json::from_str(&json).unwrap();
        assert_eq!(date, parsed);

        let result: Result<MonthDay, _> = serde_json::from_str(r#""04-31""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(ParseError::InvalidMonth(13).to_string(), "Invalid month: 13 (must be 1-12)");
        assert_eq!(
            ParseError::InvalidDay { month: 2, day: 30 }.to_string(),
            "Invalid day 30 for month 02"
        );
    }
}
