//! DuitRace Competition Calendar
//!
//! Maps instants to competition week boundaries and normalizes loose
//! period requests into concrete time windows.
//!
//! # Competition weeks
//!
//! The competition opens mid-week, so the inaugural week is elongated: it
//! runs from the competition start through the following Sunday (9 days by
//! default). Every later week is a regular Monday-to-Sunday 7-day window.
//! All boundary arithmetic happens in the competition's fixed time zone
//! (Asia/Kuala_Lumpur, UTC+8) regardless of caller locale, so week
//! cutovers are deterministic.
//!
//! # Example
//!
//! ```ignore
//! use duitrace_calendar::{CalendarConfig, CompetitionCalendar, PeriodFilter, PeriodRequest};
//!
//! let calendar = CompetitionCalendar::new(CalendarConfig::default());
//! let filter = PeriodFilter::new(calendar);
//!
//! let period = filter.resolve(&PeriodRequest::Weekly { week: None }, Utc::now())?;
//! ```

pub mod calendar;
pub mod config;
pub mod period;

use thiserror::Error;

pub use calendar::CompetitionCalendar;
pub use config::CalendarConfig;
pub use period::{PeriodFilter, PeriodRequest, ResolvedPeriod};

// Re-export the window type alongside its producers
pub use duitrace_types::PeriodWindow;

/// Calendar and period-resolution errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CalendarError {
    /// Week indices are 1-based; 0 is never a valid competition week
    #[error("Invalid competition week index: {week}")]
    InvalidWeekIndex { week: u32 },

    /// Explicit month outside 1..=12
    #[error("Invalid month: {month}")]
    InvalidMonth { month: u32 },

    /// Year/month combination that does not form a valid date
    #[error("Invalid date: year {year}, month {month}")]
    InvalidDate { year: i32, month: u32 },
}

/// Result type for calendar operations
pub type CalendarResult<T> = Result<T, CalendarError>;
