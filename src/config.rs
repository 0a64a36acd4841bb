//! Coverage configuration.

use serde::{Deserialize, Serialize};

use crate::{DAYS_IN_REFERENCE_YEAR, DEFAULT_MIN_COVERED_DAYS};

/// How much of the reference year a season set must cover.
///
/// The default accepts 365 covered days, leaving room for a single uncovered
/// day in the 366-day reference year. [`CoverageConfig::strict`] demands all 366.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCoverageConfig", rename_all = "camelCase")]
pub struct CoverageConfig {
    min_covered_days: u16,
}

/// Unchecked wire form of [`CoverageConfig`].
#[derive(Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawCoverageConfig {
    min_covered_days: u16,
}

impl Default for RawCoverageConfig {
    fn default() -> Self {
        Self {
            min_covered_days: DEFAULT_MIN_COVERED_DAYS,
        }
    }
}

impl TryFrom<RawCoverageConfig> for CoverageConfig {
    type Error = ConfigError;

    fn try_from(raw: RawCoverageConfig) -> Result<Self, Self::Error> {
        let config = Self::new().with_min_covered_days(raw.min_covered_days);
        config.validate()?;
        Ok(config)
    }
}

/// Error type for rejected coverage configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid coverage threshold: {0} (must be 1-{max})", max = DAYS_IN_REFERENCE_YEAR)]
    InvalidThreshold(u16),
}

impl CoverageConfig {
    /// Creates the default configuration.
    pub const fn new() -> Self {
        Self {
            min_covered_days: DEFAULT_MIN_COVERED_DAYS,
        }
    }

    /// Every day of the reference year must be covered.
    pub const fn strict() -> Self {
        Self {
            min_covered_days: DAYS_IN_REFERENCE_YEAR,
        }
    }

    /// Sets the number of distinct days the union of seasons must reach.
    #[must_use]
    pub const fn with_min_covered_days(mut self, days: u16) -> Self {
        self.min_covered_days = days;
        self
    }

    /// Returns the coverage threshold in days.
    pub const fn min_covered_days(&self) -> u16 {
        self.min_covered_days
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidThreshold` unless the threshold is in `1..=366`.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.min_covered_days == 0 || self.min_covered_days > DAYS_IN_REFERENCE_YEAR {
            return Err(ConfigError::InvalidThreshold(self.min_covered_days));
        }
        Ok(())
    }
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_threshold() {
        assert_eq!(CoverageConfig::default().min_covered_days(), 365);
        assert_eq!(CoverageConfig::strict().min_covered_days(), 366);
    }

    #[test]
    fn test_builder() {
        let config = CoverageConfig::new().with_min_covered_days(300);
        assert_eq!(config.min_covered_days(), 300);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let zero = CoverageConfig::new().with_min_covered_days(0);
        assert_eq!(zero.validate(), Err(ConfigError::InvalidThreshold(0)));

        let too_many = CoverageConfig::new().with_min_covered_days(367);
        assert_eq!(too_many.validate(), Err(ConfigError::InvalidThreshold(367)));
        assert_eq!(
            too_many.validate().unwrap_err().to_string(),
            "Invalid coverage threshold: 367 (must be 1-366)"
        );
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: CoverageConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, CoverageConfig::default());

        let config: CoverageConfig = serde_json::from_str(r#"{"minCoveredDays": 366}"#).unwrap();
        assert_eq!(config, CoverageConfig::strict());
    }

    #[test]
    fn test_deserialize_rejects_out_of_range() {
        for input in [r#"{"minCoveredDays": 0}"#, r#"{"minCoveredDays": 367}"#] {
            let err = serde_json::from_str::<CoverageConfig>(input).unwrap_err();
            assert!(err.to_string().contains("Invalid coverage threshold"), "{input}: {err}");
        }
    }
}
