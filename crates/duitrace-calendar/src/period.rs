//! Period request resolution
//!
//! Presentation layers hand us loose `(period, week?, month?, year?)`
//! query inputs. [`PeriodRequest`] turns them into a tagged union up
//! front, and [`PeriodFilter`] resolves that into a [`ResolvedPeriod`]
//! carrying both the period kind and its window, so the aggregator never
//! has to guess what an absent window means.

use crate::{CalendarError, CalendarResult, CompetitionCalendar};
use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use duitrace_types::PeriodWindow;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Period token for weekly leaderboards
pub const PERIOD_WEEKLY: &str = "weekly";
/// Period token for monthly leaderboards
pub const PERIOD_MONTHLY: &str = "monthly";
/// Period token for all-time leaderboards
pub const PERIOD_ALL_TIME: &str = "all_time";

/// A normalized leaderboard period request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "period", rename_all = "snake_case")]
pub enum PeriodRequest {
    /// Current competition week, or an explicit 1-based week index
    Weekly { week: Option<u32> },
    /// Current calendar month, or an explicit month/year
    Monthly {
        month: Option<u32>,
        year: Option<i32>,
    },
    /// The entire competition history
    AllTime,
}

impl PeriodRequest {
    /// Build a request from the wire-level period token and optional
    /// selectors
    ///
    /// Tokens are matched exactly; anything that is not one of the three
    /// literal tokens falls back to all-time rather than erroring, so a
    /// stale or mistyped query string still renders a leaderboard.
    pub fn from_token(
        token: &str,
        week: Option<u32>,
        month: Option<u32>,
        year: Option<i32>,
    ) -> Self {
        match token {
            PERIOD_WEEKLY => Self::Weekly { week },
            PERIOD_MONTHLY => Self::Monthly { month, year },
            PERIOD_ALL_TIME => Self::AllTime,
            other => {
                debug!(token = other, "unknown period token, using all-time");
                Self::AllTime
            }
        }
    }

    /// The wire token for this request
    pub fn token(&self) -> &'static str {
        match self {
            Self::Weekly { .. } => PERIOD_WEEKLY,
            Self::Monthly { .. } => PERIOD_MONTHLY,
            Self::AllTime => PERIOD_ALL_TIME,
        }
    }
}

/// A resolved period: the kind of leaderboard plus its concrete window
///
/// The kind travels with the window because two very different situations
/// both lack a window: a weekly leaderboard before the competition starts
/// (matches nothing) and the all-time leaderboard (matches everything).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolvedPeriod {
    /// A competition week; `None` means the competition has not started
    /// yet and no transaction can match
    Weekly { window: Option<PeriodWindow> },
    /// A calendar month
    Monthly { window: PeriodWindow },
    /// Unbounded: every approved transaction counts
    AllTime,
}

impl ResolvedPeriod {
    /// The bounded window, if any
    pub fn window(&self) -> Option<&PeriodWindow> {
        match self {
            Self::Weekly { window } => window.as_ref(),
            Self::Monthly { window } => Some(window),
            Self::AllTime => None,
        }
    }

    /// True when this period can never match a transaction
    pub fn matches_nothing(&self) -> bool {
        matches!(self, Self::Weekly { window: None })
    }

    /// Whether a timestamp belongs to this period
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        match self {
            Self::Weekly { window: None } => false,
            Self::Weekly { window: Some(w) } | Self::Monthly { window: w } => w.contains(ts),
            Self::AllTime => true,
        }
    }
}

/// Resolves period requests into concrete windows
#[derive(Debug, Clone)]
pub struct PeriodFilter {
    calendar: CompetitionCalendar,
}

impl PeriodFilter {
    /// Create a filter over a competition calendar
    pub fn new(calendar: CompetitionCalendar) -> Self {
        Self { calendar }
    }

    /// The underlying calendar
    pub fn calendar(&self) -> &CompetitionCalendar {
        &self.calendar
    }

    /// Resolve a request against a reference instant
    pub fn resolve(&self, request: &PeriodRequest, now: DateTime<Utc>) -> CalendarResult<ResolvedPeriod> {
        match *request {
            PeriodRequest::Weekly { week: Some(index) } => Ok(ResolvedPeriod::Weekly {
                window: Some(self.calendar.week(index)?),
            }),
            PeriodRequest::Weekly { week: None } => Ok(ResolvedPeriod::Weekly {
                window: self.calendar.current_week(now),
            }),
            PeriodRequest::Monthly { month, year } => {
                let window = self.month_window(month, year, now)?;
                Ok(ResolvedPeriod::Monthly { window })
            }
            PeriodRequest::AllTime => Ok(ResolvedPeriod::AllTime),
        }
    }

    /// Window for a calendar month, defaulting to the month containing
    /// `now` in the competition time zone
    fn month_window(
        &self,
        month: Option<u32>,
        year: Option<i32>,
        now: DateTime<Utc>,
    ) -> CalendarResult<PeriodWindow> {
        let offset = self.calendar.offset();
        let now_local = now.with_timezone(&offset);
        let month = month.unwrap_or_else(|| now_local.month());
        let year = year.unwrap_or_else(|| now_local.year());

        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth { month });
        }

        let start = offset
            .with_ymd_and_hms(year, month, 1, 0, 0, 0)
            .single()
            .ok_or(CalendarError::InvalidDate { year, month })?;
        let (next_year, next_month) = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };
        let next_start = offset
            .with_ymd_and_hms(next_year, next_month, 1, 0, 0, 0)
            .single()
            .ok_or(CalendarError::InvalidDate {
                year: next_year,
                month: next_month,
            })?;

        Ok(PeriodWindow::new(
            start.with_timezone(&Utc),
            (next_start - Duration::seconds(1)).with_timezone(&Utc),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CalendarConfig;
    use chrono::FixedOffset;

    fn filter() -> PeriodFilter {
        PeriodFilter::new(CompetitionCalendar::new(CalendarConfig::default()))
    }

    fn local(y: i32, m: u32, d: u32, hh: u32, mm: u32, ss: u32) -> DateTime<Utc> {
        FixedOffset::east_opt(8 * 3600)
            .unwrap()
            .with_ymd_and_hms(y, m, d, hh, mm, ss)
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_token_parsing() {
        assert_eq!(
            PeriodRequest::from_token("weekly", Some(2), None, None),
            PeriodRequest::Weekly { week: Some(2) }
        );
        assert_eq!(
            PeriodRequest::from_token("monthly", None, Some(11), Some(2025)),
            PeriodRequest::Monthly {
                month: Some(11),
                year: Some(2025)
            }
        );
        assert_eq!(
            PeriodRequest::from_token("all_time", None, None, None),
            PeriodRequest::AllTime
        );
    }

    #[test]
    fn test_unknown_token_falls_back_to_all_time() {
        assert_eq!(
            PeriodRequest::from_token("fortnightly", None, None, None),
            PeriodRequest::AllTime
        );
        assert_eq!(PeriodRequest::from_token("", None, None, None), PeriodRequest::AllTime);
    }

    #[test]
    fn test_token_matching_is_exact() {
        // The wire contract names the literal lowercase tokens; padded or
        // re-cased variants are unknown strings and take the fallback.
        assert_eq!(
            PeriodRequest::from_token(" Monthly ", None, Some(11), None),
            PeriodRequest::AllTime
        );
        assert_eq!(
            PeriodRequest::from_token("Weekly", Some(2), None, None),
            PeriodRequest::AllTime
        );
        assert_eq!(
            PeriodRequest::from_token("ALL_TIME", None, None, None),
            PeriodRequest::AllTime
        );
    }

    #[test]
    fn test_request_serde_tagging() {
        let request = PeriodRequest::Weekly { week: Some(2) };
        let json = serde_json::to_value(request).unwrap();
        assert_eq!(json["period"], "weekly");
        assert_eq!(json["week"], 2);
        let back: PeriodRequest = serde_json::from_value(json).unwrap();
        assert_eq!(back, request);

        let period = serde_json::to_value(ResolvedPeriod::AllTime).unwrap();
        assert_eq!(period["kind"], "all_time");
        let back: ResolvedPeriod = serde_json::from_value(period).unwrap();
        assert_eq!(back, ResolvedPeriod::AllTime);
    }

    #[test]
    fn test_weekly_current_week() {
        let period = filter()
            .resolve(
                &PeriodRequest::Weekly { week: None },
                local(2025, 11, 5, 12, 0, 0),
            )
            .unwrap();
        let window = period.window().copied().unwrap();
        assert_eq!(window.start, local(2025, 11, 1, 0, 0, 0));
        assert_eq!(window.end, local(2025, 11, 9, 23, 59, 59));
        assert!(!period.matches_nothing());
    }

    #[test]
    fn test_weekly_explicit_week() {
        let period = filter()
            .resolve(
                &PeriodRequest::Weekly { week: Some(2) },
                local(2025, 12, 25, 0, 0, 0),
            )
            .unwrap();
        let window = period.window().copied().unwrap();
        assert_eq!(window.start, local(2025, 11, 10, 0, 0, 0));
        assert_eq!(window.end, local(2025, 11, 16, 23, 59, 59));
    }

    #[test]
    fn test_weekly_before_competition_matches_nothing() {
        let period = filter()
            .resolve(
                &PeriodRequest::Weekly { week: None },
                local(2025, 10, 31, 12, 0, 0),
            )
            .unwrap();
        assert!(period.matches_nothing());
        assert!(period.window().is_none());
        assert!(!period.contains(local(2025, 11, 2, 0, 0, 0)));
    }

    #[test]
    fn test_monthly_defaults_to_now() {
        let period = filter()
            .resolve(
                &PeriodRequest::Monthly {
                    month: None,
                    year: None,
                },
                local(2025, 11, 15, 8, 0, 0),
            )
            .unwrap();
        let window = period.window().copied().unwrap();
        assert_eq!(window.start, local(2025, 11, 1, 0, 0, 0));
        assert_eq!(window.end, local(2025, 11, 30, 23, 59, 59));
    }

    #[test]
    fn test_monthly_explicit_december() {
        let period = filter()
            .resolve(
                &PeriodRequest::Monthly {
                    month: Some(12),
                    year: Some(2025),
                },
                local(2026, 2, 1, 0, 0, 0),
            )
            .unwrap();
        let window = period.window().copied().unwrap();
        assert_eq!(window.start, local(2025, 12, 1, 0, 0, 0));
        assert_eq!(window.end, local(2025, 12, 31, 23, 59, 59));
    }

    #[test]
    fn test_monthly_invalid_month() {
        let err = filter()
            .resolve(
                &PeriodRequest::Monthly {
                    month: Some(13),
                    year: Some(2025),
                },
                Utc::now(),
            )
            .unwrap_err();
        assert_eq!(err, CalendarError::InvalidMonth { month: 13 });
    }

    #[test]
    fn test_all_time_is_unbounded() {
        let period = filter()
            .resolve(&PeriodRequest::AllTime, Utc::now())
            .unwrap();
        assert_eq!(period, ResolvedPeriod::AllTime);
        assert!(period.window().is_none());
        assert!(!period.matches_nothing());
        assert!(period.contains(local(1999, 1, 1, 0, 0, 0)));
    }
}
