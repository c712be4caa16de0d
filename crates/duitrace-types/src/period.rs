//! Time window types for DuitRace
//!
//! A [`PeriodWindow`] is a resolved, inclusive time range in UTC. Window
//! ends land on the last second of the period (`23:59:59` local), matching
//! the end-of-day semantics the rest of the platform uses.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A resolved inclusive time range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodWindow {
    /// First instant of the period (inclusive)
    pub start: DateTime<Utc>,
    /// Last instant of the period (inclusive, second precision)
    pub end: DateTime<Utc>,
}

impl PeriodWindow {
    /// Create a window from inclusive bounds
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Whether a timestamp falls inside this window
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        self.start <= ts && ts <= self.end
    }

    /// Length of the window
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

impl fmt::Display for PeriodWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} .. {}]", self.start, self.end)
    }
}
