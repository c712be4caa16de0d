//! Calendar configuration
//!
//! These values are process-wide constants: they are loaded once at start
//! and never change while the competition runs.

use chrono::{DateTime, FixedOffset, TimeZone};
use serde::{Deserialize, Serialize};

/// Asia/Kuala_Lumpur offset in seconds (UTC+8, no DST)
pub const COMPETITION_UTC_OFFSET_SECS: i32 = 8 * 3600;

/// Default competition opening instant, local to the competition zone
const DEFAULT_START: (i32, u32, u32) = (2025, 11, 1);

/// Default length of the elongated inaugural week
pub const DEFAULT_FIRST_WEEK_DAYS: i64 = 9;

/// Length of every regular competition week
pub const REGULAR_WEEK_DAYS: i64 = 7;

/// Competition calendar configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// First instant of the competition, carrying the competition offset
    pub competition_start: DateTime<FixedOffset>,
    /// Days in the inaugural week (start date through the following Sunday)
    pub first_week_days: i64,
}

impl CalendarConfig {
    /// Create a config with an explicit start instant
    pub fn new(competition_start: DateTime<FixedOffset>, first_week_days: i64) -> Self {
        Self {
            competition_start,
            first_week_days,
        }
    }

    /// The competition's fixed UTC offset
    pub fn offset(&self) -> FixedOffset {
        *self.competition_start.offset()
    }
}

impl Default for CalendarConfig {
    fn default() -> Self {
        let offset = FixedOffset::east_opt(COMPETITION_UTC_OFFSET_SECS)
            .expect("competition offset is a valid fixed offset");
        let (year, month, day) = DEFAULT_START;
        let competition_start = offset
            .with_ymd_and_hms(year, month, day, 0, 0, 0)
            .single()
            .expect("default competition start is a valid local instant");
        Self {
            competition_start,
            first_week_days: DEFAULT_FIRST_WEEK_DAYS,
        }
    }
}
