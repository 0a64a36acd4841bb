/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;

/// Longest month length, the bound for a day without a month
pub const MAX_DAY: u8 = 31;

/// Month number for January
pub const JANUARY: u8 = 1;
/// Month number for February
pub const FEBRUARY: u8 = 2;
/// Month number for December
pub const DECEMBER: u8 = 12;

/// Number of days in the reference year
pub const DAYS_IN_REFERENCE_YEAR: u16 = 366;

/// Coverage a season set must reach by default.
/// One below `DAYS_IN_REFERENCE_YEAR`, see `CoverageConfig::strict`.
pub const DEFAULT_MIN_COVERED_DAYS: u16 = 365;

/// Maximum days in each month of the reference year (index 0 is unused, months are 1-indexed)
/// February is fixed at 29 days so every month/day pair a season may name exists.
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    29, // February (always leap in the reference year)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Day of year on which each month starts (index 0 unused)
pub(crate) const MONTH_START_DAY: [u16; 13] =
    [0, 1, 32, 61, 92, 122, 153, 183, 214, 245, 275, 306, 336];

/// Month/day separator (`MM-DD`)
pub const DATE_SEPARATOR: char = '-';
/// Range separator (`MM-DD/MM-DD`)
pub const RANGE_SEPARATOR: char = '/';

/// Diagnostic shown when two seasons share a day
pub const OVERLAP_MESSAGE: &str = "Seasons overlap detected. Each day must belong to only one season";
/// Diagnostic shown when the season set leaves days uncovered
pub const GAP_MESSAGE: &str = "All days of the year must be covered by seasons. Found gaps in coverage";
