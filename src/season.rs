//! Season records as callers store them.

use serde::{Deserialize, Serialize};

use crate::{RangeError, SeasonRange};

/// Anything that occupies a range of the reference year.
///
/// The coverage checks accept slices of any implementor, so callers can hand
/// over their own records without copying them into `SeasonRange`s first.
pub trait SeasonBounds {
    fn season_range(&self) -> SeasonRange;
}

impl SeasonBounds for SeasonRange {
    fn season_range(&self) -> SeasonRange {
        *self
    }
}

impl<T: SeasonBounds + ?Sized> SeasonBounds for &T {
    fn season_range(&self) -> SeasonRange {
        (**self).season_range()
    }
}

/// A priced season of one scope (company).
///
/// `Id` is the caller's key type; it only identifies the record and plays no
/// part in coverage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "SeasonRow<Id>",
    into = "SeasonRow<Id>",
    bound(serialize = "Id: Serialize + Clone", deserialize = "Id: Deserialize<'de>")
)]
pub struct Season<Id> {
    id: Id,
    range: SeasonRange,
    price_multiplier: f64,
    discount_label: Option<String>,
}

/// Error type for season records that cannot exist.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    #[error(transparent)]
    Range(#[from] RangeError),

    #[error("Invalid price multiplier: {0} (must be finite and greater than 0)")]
    InvalidMultiplier(f64),
}

impl<Id> Season<Id> {
    /// Creates a season with no discount label.
    ///
    /// # Errors
    /// Returns `RecordError::InvalidMultiplier` for a multiplier that is not a
    /// finite positive number.
    pub fn new(id: Id, range: SeasonRange, price_multiplier: f64) -> Result<Self, RecordError> {
        if !price_multiplier.is_finite() || price_multiplier <= 0.0 {
            return Err(RecordError::InvalidMultiplier(price_multiplier));
        }
        Ok(Self {
            id,
            range,
            price_multiplier,
            discount_label: None,
        })
    }

    #[must_use]
    pub fn with_discount_label(mut self, label: impl Into<String>) -> Self {
        self.discount_label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_range(mut self, range: SeasonRange) -> Self {
        self.range = range;
        self
    }

    pub const fn id(&self) -> &Id {
        &self.id
    }

    pub const fn range(&self) -> SeasonRange {
        self.range
    }

    pub const fn price_multiplier(&self) -> f64 {
        self.price_multiplier
    }

    pub fn discount_label(&self) -> Option<&str> {
        self.discount_label.as_deref()
    }
}

impl<Id> SeasonBounds for Season<Id> {
    fn season_range(&self) -> SeasonRange {
        self.range
    }
}

/// Flat column form of a [`Season`], as it travels to and from storage and forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonRow<Id> {
    pub id: Id,
    pub start_month: u8,
    pub start_day: u8,
    pub end_month: u8,
    pub end_day: u8,
    pub price_multiplier: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_label: Option<String>,
}

impl<Id> TryFrom<SeasonRow<Id>> for Season<Id> {
    type Error = RecordError;

    fn try_from(row: SeasonRow<Id>) -> Result<Self, Self::Error> {
        let range = SeasonRange::from_columns(row.start_month, row.start_day, row.end_month, row.end_day)?;
        let season = Self::new(row.id, range, row.price_multiplier)?;
        Ok(Self {
            discount_label: row.discount_label,
            ..season
        })
    }
}

impl<Id> From<Season<Id>> for SeasonRow<Id> {
    fn from(season: Season<Id>) -> Self {
        let (start_month, start_day, end_month, end_day) = season.range.to_columns();
        Self {
            id: season.id,
            start_month,
            start_day,
            end_month,
            end_day,
            price_multiplier: season.price_multiplier,
            discount_label: season.discount_label,
        }
    }
}
