//! Coverage and overlap checks over a candidate set of seasons.
//!
//! A set is accepted when no day of the reference year belongs to two seasons
//! and the seasons together cover at least
//! [`CoverageConfig::min_covered_days`] distinct days. Checks are pure: no I/O,
//! no logging, same input same verdict.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{
    ConfigError, CoverageConfig, DAYS_IN_REFERENCE_YEAR, GAP_MESSAGE, MonthDay, OVERLAP_MESSAGE, SeasonBounds, SeasonRange,
};

/// Why a candidate set of seasons was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CoverageError {
    /// Seasons at input positions `first` and `second` share at least one day.
    #[error("{}", OVERLAP_MESSAGE)]
    OverlapDetected { first: usize, second: usize },

    /// The union of all seasons covers `covered` days, fewer than `required`.
    #[error("{}", GAP_MESSAGE)]
    CoverageGap { covered: usize, required: u16 },
}

/// Verdict in the `{ valid, message? }` shape handed to presentation layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageReport {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CoverageReport {
    pub const fn ok() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }
}

impl From<Result<(), CoverageError>> for CoverageReport {
    fn from(result: Result<(), CoverageError>) -> Self {
        match result {
            Ok(()) => Self::ok(),
            Err(err) => Self {
                valid: false,
                message: Some(err.to_string()),
            },
        }
    }
}

impl From<CoverageError> for CoverageReport {
    fn from(err: CoverageError) -> Self {
        Self::from(Err::<(), _>(err))
    }
}

/// Checks candidate season sets against a [`CoverageConfig`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoverageValidator {
    config: CoverageConfig,
}

impl CoverageValidator {
    /// # Errors
    /// Returns `ConfigError::InvalidThreshold` if `config` is out of range.
    pub fn new(config: CoverageConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub const fn config(&self) -> &CoverageConfig {
        &self.config
    }

    /// Runs the overlap scan, then the coverage count.
    ///
    /// Pairs are visited in input order (`i < j`) and the first overlapping
    /// pair ends the scan.
    ///
    /// # Errors
    /// Returns `CoverageError::OverlapDetected` for the first pair sharing a
    /// day, otherwise `CoverageError::CoverageGap` if too few days are covered.
    pub fn check<T: SeasonBounds>(&self, seasons: &[T]) -> Result<(), CoverageError> {
        let day_sets: Vec<BTreeSet<u16>> = seasons.iter().map(|s| s.season_range().days()).collect();

        for (first, a) in day_sets.iter().enumerate() {
            for (offset, b) in day_sets[first + 1..].iter().enumerate() {
                if !a.is_disjoint(b) {
                    return Err(CoverageError::OverlapDetected {
                        first,
                        second: first + 1 + offset,
                    });
                }
            }
        }

        let covered = day_sets.iter().flatten().collect::<BTreeSet<_>>().len();
        let required = self.config.min_covered_days();
        if covered < usize::from(required) {
            return Err(CoverageError::CoverageGap { covered, required });
        }

        Ok(())
    }

    /// Same as [`CoverageValidator::check`], in report form.
    pub fn report<T: SeasonBounds>(&self, seasons: &[T]) -> CoverageReport {
        self.check(seasons).into()
    }
}

/// Validates a candidate set with the default threshold of 365 covered days.
pub fn validate_seasons_coverage<T: SeasonBounds>(seasons: &[T]) -> CoverageReport {
    CoverageValidator::default().report(seasons)
}

/// Maximal runs of days no season covers, in calendar order.
/// A run touching both December 31st and January 1st is reported once, wrapping.
pub fn uncovered_ranges<T: SeasonBounds>(seasons: &[T]) -> Vec<SeasonRange> {
    let mut covered = [false; DAYS_IN_REFERENCE_YEAR as usize + 1];
    for season in seasons {
        for day in season.season_range().days() {
            covered[usize::from(day)] = true;
        }
    }

    let mut runs: Vec<(u16, u16)> = Vec::new();
    let mut open: Option<u16> = None;
    for day in 1..=DAYS_IN_REFERENCE_YEAR {
        match (covered[usize::from(day)], open) {
            (false, None) => open = Some(day),
            (true, Some(start)) => {
                runs.push((start, day - 1));
                open = None;
            },
            _ => {},
        }
    }
    if let Some(start) = open {
        runs.push((start, DAYS_IN_REFERENCE_YEAR));
    }

    // Fold a December tail into a January head.
    if runs.len() > 1 {
        let head = runs[0];
        let tail = runs[runs.len() - 1];
        if head.0 == 1 && tail.1 == DAYS_IN_REFERENCE_YEAR {
            runs.pop();
            runs[0] = (tail.0, head.1);
            runs.rotate_left(1);
        }
    }

    runs.into_iter()
        .filter_map(|(start, end)| {
            let start = MonthDay::from_day_of_year(start).ok()?;
            let end = MonthDay::from_day_of_year(end).ok()?;
            Some(SeasonRange::new(start, end))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{range, season};

    #[test]
    fn test_single_full_year_season() {
        let report = validate_seasons_coverage(&[range(1, 1, 12, 31)]);
        assert_eq!(report, CoverageReport::ok());
    }

    #[test]
    fn test_overlap_reports_first_pair() {
        let seasons = [
            range(1, 1, 3, 31),
            range(4, 1, 6, 30),
            range(6, 1, 8, 31),
            range(3, 15, 12, 31),
        ];
        let result = CoverageValidator::default().check(&seasons);
        assert_eq!(result, Err(CoverageError::OverlapDetected { first: 0, second: 3 }));
    }

    #[test]
    fn test_overlap_wins_over_gap() {
        let seasons = [range(1, 1, 2, 1), range(1, 15, 3, 1)];
        let result = CoverageValidator::default().check(&seasons);
        assert!(matches!(result, Err(CoverageError::OverlapDetected { .. })));
    }

    #[test]
    fn test_gap_counts() {
        let seasons = [range(1, 1, 6, 1), range(6, 10, 12, 31)];
        let result = CoverageValidator::default().check(&seasons);
        assert_eq!(result, Err(CoverageError::CoverageGap { covered: 358, required: 365 }));
    }

    #[test]
    fn test_empty_set_is_a_gap() {
        let seasons: [SeasonRange; 0] = [];
        let result = CoverageValidator::default().check(&seasons);
        assert_eq!(result, Err(CoverageError::CoverageGap { covered: 0, required: 365 }));
    }

    #[test]
    fn test_one_day_gap_tolerated_by_default() {
        // December 31st left uncovered
        let seasons = [range(1, 1, 6, 30), range(7, 1, 12, 30)];
        assert!(CoverageValidator::default().check(&seasons).is_ok());

        let strict = CoverageValidator::new(CoverageConfig::strict()).unwrap();
        assert_eq!(
            strict.check(&seasons),
            Err(CoverageError::CoverageGap { covered: 365, required: 366 })
        );
    }

    #[test]
    fn test_rejects_disabled_threshold() {
        let off = CoverageConfig::new().with_min_covered_days(0);
        assert_eq!(CoverageValidator::new(off), Err(ConfigError::InvalidThreshold(0)));

        let off: Result<CoverageConfig, _> = serde_json::from_str(r#"{"minCoveredDays": 0}"#);
        assert!(off.is_err());
    }

    #[test]
    fn test_accepts_season_records() {
        let seasons = vec![season(1, 12, 20, 1, 20), season(2, 1, 21, 12, 19)];
        assert!(validate_seasons_coverage(&seasons).valid);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CoverageError::OverlapDetected { first: 0, second: 1 }.to_string(),
            "Seasons overlap detected. Each day must belong to only one season"
        );
        assert_eq!(
            CoverageError::CoverageGap { covered: 10, required: 365 }.to_string(),
            "All days of the year must be covered by seasons. Found gaps in coverage"
        );
    }

    #[test]
    fn test_report_serde_shape() {
        let valid = serde_json::to_string(&CoverageReport::ok()).unwrap();
        assert_eq!(valid, r#"{"valid":true}"#);

        let invalid = CoverageReport::from(CoverageError::OverlapDetected { first: 0, second: 1 });
        let json = serde_json::to_value(&invalid).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "valid": false,
                "message": "Seasons overlap detected. Each day must belong to only one season"
            })
        );
    }

    #[test]
    fn test_uncovered_ranges_none() {
        assert!(uncovered_ranges(&[range(1, 1, 12, 31)]).is_empty());
        assert!(uncovered_ranges(&[range(12, 20, 1, 20), range(1, 21, 12, 19)]).is_empty());
    }

    #[test]
    fn test_uncovered_ranges_inner_gap() {
        let gaps = uncovered_ranges(&[range(1, 1, 6, 1), range(6, 10, 12, 31)]);
        assert_eq!(gaps, vec![range(6, 2, 6, 9)]);
    }

    #[test]
    fn test_uncovered_ranges_wrapping_gap() {
        let gaps = uncovered_ranges(&[range(1, 10, 6, 30), range(7, 1, 12, 25)]);
        assert_eq!(gaps, vec![range(12, 26, 1, 9)]);
    }

    #[test]
    fn test_uncovered_ranges_everything() {
        let seasons: [SeasonRange; 0] = [];
        assert_eq!(uncovered_ranges(&seasons), vec![SeasonRange::full_year()]);
    }

    #[test]
    fn test_uncovered_ranges_multiple_in_order() {
        let gaps = uncovered_ranges(&[range(2, 1, 2, 28), range(3, 2, 12, 31)]);
        assert_eq!(gaps, vec![range(1, 1, 1, 31), range(2, 29, 3, 1)]);
    }
}
