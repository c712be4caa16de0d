//! Competition week boundary arithmetic
//!
//! Week 1 is the elongated inaugural week: it spans the competition start
//! through the following Sunday (`first_week_days` days, 9 by default).
//! Week `k >= 2` is a regular 7-day window anchored at the end of week 1.
//! Window ends are inclusive and land on the last second of the local day
//! (`23:59:59`).

use crate::config::REGULAR_WEEK_DAYS;
use crate::{CalendarConfig, CalendarError, CalendarResult};
use chrono::{DateTime, Duration, FixedOffset, Utc};
use duitrace_types::PeriodWindow;

/// Computes competition week boundaries from a reference instant or an
/// explicit week index
#[derive(Debug, Clone)]
pub struct CompetitionCalendar {
    config: CalendarConfig,
}

impl CompetitionCalendar {
    /// Create a calendar from configuration
    pub fn new(config: CalendarConfig) -> Self {
        Self { config }
    }

    /// The calendar's configuration
    pub fn config(&self) -> &CalendarConfig {
        &self.config
    }

    /// The competition's fixed UTC offset
    pub fn offset(&self) -> FixedOffset {
        self.config.offset()
    }

    /// Whether the competition has started at `now`
    pub fn has_started(&self, now: DateTime<Utc>) -> bool {
        now >= self.config.competition_start.with_timezone(&Utc)
    }

    /// First instant after the inaugural week, as a UTC instant
    fn end_of_first_week_exclusive(&self) -> DateTime<Utc> {
        (self.config.competition_start + Duration::days(self.config.first_week_days))
            .with_timezone(&Utc)
    }

    /// Boundaries of the competition week containing `now`
    ///
    /// Returns `None` before the competition start: the competition has
    /// not begun and callers must treat this as "no results", not an
    /// error.
    pub fn current_week(&self, now: DateTime<Utc>) -> Option<PeriodWindow> {
        if !self.has_started(now) {
            return None;
        }

        let first_week_start = self.config.competition_start.with_timezone(&Utc);
        let first_week_end = self.end_of_first_week_exclusive();
        if now < first_week_end {
            return Some(PeriodWindow::new(
                first_week_start,
                first_week_end - Duration::seconds(1),
            ));
        }

        let weeks_since_first = (now - first_week_end).num_days() / REGULAR_WEEK_DAYS;
        let week_start = first_week_end + Duration::weeks(weeks_since_first);
        Some(PeriodWindow::new(
            week_start,
            week_start + Duration::days(REGULAR_WEEK_DAYS) - Duration::seconds(1),
        ))
    }

    /// Boundaries of an explicit competition week
    ///
    /// Indices are 1-based; week 1 is the elongated inaugural week. Weeks
    /// past the current date are valid (they are simply in the future),
    /// which lets exports address any historical or upcoming week.
    pub fn week(&self, index: u32) -> CalendarResult<PeriodWindow> {
        if index == 0 {
            return Err(CalendarError::InvalidWeekIndex { week: index });
        }

        let first_week_start = self.config.competition_start.with_timezone(&Utc);
        let first_week_end = self.end_of_first_week_exclusive();
        if index == 1 {
            return Ok(PeriodWindow::new(
                first_week_start,
                first_week_end - Duration::seconds(1),
            ));
        }

        let week_start = first_week_end + Duration::weeks(i64::from(index) - 2);
        Ok(PeriodWindow::new(
            week_start,
            week_start + Duration::days(REGULAR_WEEK_DAYS) - Duration::seconds(1),
        ))
    }

    /// 1-based index of the competition week containing `now`, if the
    /// competition has started
    pub fn week_index_for(&self, now: DateTime<Utc>) -> Option<u32> {
        if !self.has_started(now) {
            return None;
        }
        let first_week_end = self.end_of_first_week_exclusive();
        if now < first_week_end {
            return Some(1);
        }
        let weeks_since_first = (now - first_week_end).num_days() / REGULAR_WEEK_DAYS;
        Some(2 + weeks_since_first as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    fn calendar() -> CompetitionCalendar {
        CompetitionCalendar::new(CalendarConfig::default())
    }

    fn local(y: i32, m: u32, d: u32, hh: u32, mm: u32, ss: u32) -> DateTime<Utc> {
        FixedOffset::east_opt(8 * 3600)
            .unwrap()
            .with_ymd_and_hms(y, m, d, hh, mm, ss)
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_before_competition_start() {
        let cal = calendar();
        assert!(cal.current_week(local(2025, 10, 31, 12, 0, 0)).is_none());
        assert!(cal.week_index_for(local(2025, 10, 31, 12, 0, 0)).is_none());
        assert!(!cal.has_started(local(2025, 10, 31, 23, 59, 59)));
        assert!(cal.has_started(local(2025, 11, 1, 0, 0, 0)));
    }

    #[test]
    fn test_first_week_is_nine_days() {
        let cal = calendar();
        let window = cal.current_week(local(2025, 11, 5, 10, 30, 0)).unwrap();
        assert_eq!(window.start, local(2025, 11, 1, 0, 0, 0));
        assert_eq!(window.end, local(2025, 11, 9, 23, 59, 59));
        // The very last second of the first week still resolves to it
        let window = cal.current_week(local(2025, 11, 9, 23, 59, 59)).unwrap();
        assert_eq!(window.start, local(2025, 11, 1, 0, 0, 0));
    }

    #[test]
    fn test_second_week_is_monday_to_sunday() {
        let cal = calendar();
        let window = cal.current_week(local(2025, 11, 10, 0, 0, 0)).unwrap();
        assert_eq!(window.start, local(2025, 11, 10, 0, 0, 0));
        assert_eq!(window.end, local(2025, 11, 16, 23, 59, 59));
    }

    #[test]
    fn test_later_week_alignment() {
        let cal = calendar();
        // 2025-11-26 is a Wednesday in week 4
        let window = cal.current_week(local(2025, 11, 26, 9, 0, 0)).unwrap();
        assert_eq!(window.start, local(2025, 11, 24, 0, 0, 0));
        assert_eq!(window.end, local(2025, 11, 30, 23, 59, 59));
        assert_eq!(cal.week_index_for(local(2025, 11, 26, 9, 0, 0)), Some(4));
    }

    #[test]
    fn test_week_by_index_matches_current_week() {
        let cal = calendar();
        assert_eq!(
            cal.week(1).unwrap(),
            cal.current_week(local(2025, 11, 5, 0, 0, 0)).unwrap()
        );
        assert_eq!(
            cal.week(2).unwrap(),
            cal.current_week(local(2025, 11, 12, 0, 0, 0)).unwrap()
        );
        assert_eq!(
            cal.week(4).unwrap(),
            cal.current_week(local(2025, 11, 26, 9, 0, 0)).unwrap()
        );
    }

    #[test]
    fn test_week_zero_is_invalid() {
        assert_eq!(
            calendar().week(0),
            Err(CalendarError::InvalidWeekIndex { week: 0 })
        );
    }

    #[test]
    fn test_week_index_one_based() {
        let cal = calendar();
        assert_eq!(cal.week_index_for(local(2025, 11, 1, 0, 0, 0)), Some(1));
        assert_eq!(cal.week_index_for(local(2025, 11, 9, 23, 59, 59)), Some(1));
        assert_eq!(cal.week_index_for(local(2025, 11, 10, 0, 0, 0)), Some(2));
    }
}
