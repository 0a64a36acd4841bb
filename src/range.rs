use std::{collections::BTreeSet, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{DAYS_IN_REFERENCE_YEAR, MonthDay, ParseError, RANGE_SEPARATOR, prelude::*};

/// An inclusive range of days in the reference year.
/// When the end falls before the start the range wraps across December 31st.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{start}/{end}")]
pub struct SeasonRange {
    start: MonthDay,
    end:   MonthDay,
}

/// Error type for season range construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// The start month/day does not exist in the reference year.
    #[error("Invalid start date: {0}")]
    InvalidStart(#[source] ParseError),

    /// The end month/day does not exist in the reference year.
    #[error("Invalid end date: {0}")]
    InvalidEnd(#[source] ParseError),

    /// Invalid range format.
    #[error("Invalid range format: {0}")]
    InvalidFormat(String),
}

impl SeasonRange {
    /// Creates a range. Any two dates form a valid range; `start > end` wraps.
    pub const fn new(start: MonthDay, end: MonthDay) -> Self {
        Self { start, end }
    }

    /// Creates a range from raw month/day numbers, checking the start before the end.
    ///
    /// # Errors
    /// Returns `RangeError::InvalidStart` or `RangeError::InvalidEnd` naming the
    /// side that is not a real date.
    pub fn from_parts(start_month: u8, start_day: u8, end_month: u8, end_day: u8) -> Result<Self, RangeError> {
        let start = MonthDay::new(start_month, start_day).map_err(RangeError::InvalidStart)?;
        let end = MonthDay::new(end_month, end_day).map_err(RangeError::InvalidEnd)?;
        Ok(Self::new(start, end))
    }

    /// The whole reference year, January 1st through December 31st
    pub fn full_year() -> Self {
        Self::new(MonthDay::first(), MonthDay::last())
    }

    /// Returns the first day of the range
    pub const fn start(&self) -> MonthDay {
        self.start
    }

    /// Returns the last day of the range (inclusive)
    pub const fn end(&self) -> MonthDay {
        self.end
    }

    /// True when the range crosses the year end
    pub const fn wraps(&self) -> bool {
        self.start.day_of_year() > self.end.day_of_year()
    }

    /// Number of days covered
    pub const fn len(&self) -> u16 {
        let start = self.start.day_of_year();
        let end = self.end.day_of_year();
        if start <= end {
            end - start + 1
        } else {
            DAYS_IN_REFERENCE_YEAR - start + 1 + end
        }
    }

    /// A range always covers at least one day
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Day-of-year numbers covered by this range.
    pub fn days(&self) -> BTreeSet<u16> {
        let start = self.start.day_of_year();
        let end = self.end.day_of_year();
        if start <= end {
            (start..=end).collect()
        } else {
            (start..=DAYS_IN_REFERENCE_YEAR).chain(1..=end).collect()
        }
    }

    /// Checks if the range contains a given day
    pub const fn contains(&self, date: &MonthDay) -> bool {
        let day = date.day_of_year();
        let start = self.start.day_of_year();
        let end = self.end.day_of_year();
        if start <= end {
            start <= day && day <= end
        } else {
            day >= start || day <= end
        }
    }

    /// Checks if this range shares at least one day with another range
    pub fn overlaps(&self, other: &Self) -> bool {
        // Two circular ranges meet iff one of them contains the other's first day.
        self.contains(&other.start) || other.contains(&self.start)
    }

    /// Converts to database columns: (`start_month`, `start_day`, `end_month`, `end_day`)
    pub const fn to_columns(&self) -> (u8, u8, u8, u8) {
        (self.start.month(), self.start.day(), self.end.month(), self.end.day())
    }

    /// Creates from database columns: (`start_month`, `start_day`, `end_month`, `end_day`)
    ///
    /// # Errors
    /// Returns `RangeError` if either side is not a real date.
    pub fn from_columns(start_month: u8, start_day: u8, end_month: u8, end_day: u8) -> Result<Self, RangeError> {
        Self::from_parts(start_month, start_day, end_month, end_day)
    }
}

/// Expands raw season bounds into the set of day-of-year numbers they cover.
///
/// # Errors
/// Returns `RangeError` if either bound is not a real date.
pub fn season_days(start_month: u8, start_day: u8, end_month: u8, end_day: u8) -> Result<BTreeSet<u16>, RangeError> {
    SeasonRange::from_parts(start_month, start_day, end_month, end_day).map(|range| range.days())
}

impl FromStr for SeasonRange {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        let separator_count = trimmed.matches(RANGE_SEPARATOR).count();

        match separator_count {
            0 => Err(RangeError::InvalidFormat(format!(
                "No range separator found (expected '{RANGE_SEPARATOR}'): {s}"
            ))),
            1 => {
                let (start_str, end_str) = trimmed.split_once(RANGE_SEPARATOR).ok_or_else(|| {
                    RangeError::InvalidFormat(format!("Separator '{RANGE_SEPARATOR}' not found despite count == 1"))
                })?;

                let start = start_str.trim().parse::<MonthDay>().map_err(RangeError::InvalidStart)?;
                let end = end_str.trim().parse::<MonthDay>().map_err(RangeError::InvalidEnd)?;

                Ok(Self::new(start, end))
            },
            _ => Err(RangeError::InvalidFormat(format!(
                "Too many '{RANGE_SEPARATOR}' separators: expected 1, found {separator_count}"
            ))),
        }
    }
}

impl Serialize for SeasonRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for SeasonRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
