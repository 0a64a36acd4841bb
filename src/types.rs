use crate::ParseError;
use crate::consts::{DAYS_IN_MONTH, MAX_DAY, MAX_MONTH, MIN_DAY, MONTH_START_DAY};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU8;

/// A month value guaranteed to be in the range `1..=MAX_MONTH` (1..=12)
/// Uses `NonZeroU8` internally, so 0 is not a valid month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(NonZeroU8);

impl Month {
    /// Creates a new Month, validating that it's non-zero and <= `MAX_MONTH`
    ///
    /// # Errors
    /// Returns `ParseError::InvalidMonth` if the value is 0 or > `MAX_MONTH`.
    pub fn new(value: u8) -> Result<Self, ParseError> {
        let non_zero = NonZeroU8::new(value).ok_or(ParseError::InvalidMonth(value))?;
        if value > MAX_MONTH {
            return Err(ParseError::InvalidMonth(value));
        }
        Ok(Self(non_zero))
    }

    /// Returns the month value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    /// Number of days this month has in the reference year
    #[inline]
    pub const fn days(self) -> u8 {
        days_in_month(self.get())
    }
}

impl TryFrom<u8> for Month {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0.get()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A day value guaranteed to be valid for a given month of the reference year
/// Uses `NonZeroU8` internally, so 0 is not a valid day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Day(NonZeroU8);

impl Day {
    /// Creates a new Day, validating that it's non-zero and exists in the given month
    ///
    /// # Errors
    /// Returns `ParseError::InvalidMonth` if the month is out of range, and
    /// `ParseError::InvalidDay` if the day is 0 or past the end of the month.
    pub fn new(value: u8, month: u8) -> Result<Self, ParseError> {
        let month = Month::new(month)?;
        let non_zero = NonZeroU8::new(value).ok_or(ParseError::InvalidDay {
            month: month.get(),
            day: value,
        })?;

        if value > month.days() {
            return Err(ParseError::InvalidDay {
                month: month.get(),
                day: value,
            });
        }

        Ok(Self(non_zero))
    }

    /// Returns the day value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Day {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        // Without a month only the widest month can be checked
        if value > MAX_DAY {
            return Err(ParseError::InvalidDayNumber(value));
        }
        let non_zero = NonZeroU8::new(value).ok_or(ParseError::InvalidDayNumber(value))?;
        Ok(Self(non_zero))
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> Self {
        day.0.get()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Helper functions

/// Returns true when `(month, day)` names a real day of the reference year.
pub const fn is_valid_date(month: u8, day: u8) -> bool {
    month >= 1 && month <= MAX_MONTH && day >= MIN_DAY && day <= DAYS_IN_MONTH[month as usize]
}

/// Length of `month` in the reference year (February has 29 days).
pub const fn days_in_month(month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    DAYS_IN_MONTH[month as usize]
}

/// Position of `(month, day)` in the reference year, 1 for January 1st through 366 for December 31st.
/// The date must satisfy `is_valid_date`.
pub const fn day_of_year(month: u8, day: u8) -> u16 {
    debug_assert!(is_valid_date(month, day));

    MONTH_START_DAY[month as usize] + day as u16 - 1
}
