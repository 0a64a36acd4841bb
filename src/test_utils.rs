//! Shorthand constructors for tests.

use crate::{MonthDay, Season, SeasonRange};

pub fn md(month: u8, day: u8) -> MonthDay {
    MonthDay::new(month, day).expect("test date must be valid")
}

pub fn range(start_month: u8, start_day: u8, end_month: u8, end_day: u8) -> SeasonRange {
    SeasonRange::from_parts(start_month, start_day, end_month, end_day).expect("test range must be valid")
}

pub fn season(id: u32, start_month: u8, start_day: u8, end_month: u8, end_day: u8) -> Season<u32> {
    Season::new(id, range(start_month, start_day, end_month, end_day), 1.0).expect("test season must be valid")
}
