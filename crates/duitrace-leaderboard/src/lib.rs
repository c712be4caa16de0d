//! DuitRace Leaderboard Core
//!
//! Ranks competition participants by their approved DuitNow transactions
//! over weekly, monthly and all-time periods.
//!
//! # Architecture
//!
//! - [`rank`] — deterministic dense ranking with pluggable tie-break
//!   policies (students rank by count only; entrepreneur units break
//!   count ties by total amount)
//! - [`store`] — the read-only contracts against the external transaction
//!   store and user directory, plus an in-memory implementation
//! - [`aggregate`] — per-period aggregation, top-N and paginated views
//! - [`position`] — "your rank" lookup consistent with the headline list
//!
//! The core is stateless between requests: every query re-aggregates from
//! the store, so concurrent calls are fully independent and two calls
//! separated in time may legitimately disagree as new approvals land.
//!
//! # Example
//!
//! ```ignore
//! use duitrace_leaderboard::{LeaderboardService, MemoryTransactionStore};
//!
//! let store = Arc::new(MemoryTransactionStore::new());
//! let service = LeaderboardService::individuals(store.clone(), store, filter);
//!
//! let period = service.resolve(&PeriodRequest::Weekly { week: None }, Utc::now())?;
//! let view = service.top_n_with_position(me, &period, None)?;
//! ```

pub mod aggregate;
pub mod position;
pub mod rank;
pub mod store;

use thiserror::Error;

pub use aggregate::{LeaderboardConfig, LeaderboardPage, LeaderboardService, RankedRow};
pub use position::LeaderboardView;
pub use rank::{AggregateEntry, RankEngine, RankedEntry, TieBreakPolicy};
pub use store::{MemoryTransactionStore, ParticipantDirectory, TransactionStore};

// Re-export the period types callers hand us
pub use duitrace_calendar::{PeriodFilter, PeriodRequest, PeriodWindow, ResolvedPeriod};

/// Default number of headline entries on a leaderboard
pub const DEFAULT_TOP_N: u32 = 20;

/// Default rows per page for paginated leaderboard tables
pub const DEFAULT_PER_PAGE: u32 = 50;

/// Leaderboard errors
#[derive(Debug, Error)]
pub enum LeaderboardError {
    /// The transaction store failed to serve the query
    #[error("Storage error: {0}")]
    Store(String),

    /// Period resolution failed (bad explicit week or month)
    #[error(transparent)]
    Calendar(#[from] duitrace_calendar::CalendarError),
}

/// Result type for leaderboard operations
pub type LeaderboardResult<T> = Result<T, LeaderboardError>;
