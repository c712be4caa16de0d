//! Canonical domain types for DuitRace
//!
//! DuitRace is a university competition platform where students submit
//! DuitNow payment receipts and approved transactions feed weekly, monthly
//! and all-time leaderboards. This crate holds the domain types shared by
//! the calendar and leaderboard crates:
//!
//! - Strongly typed identities ([`ParticipantId`], [`TransactionId`])
//! - Stored transaction rows and their validated form
//!   ([`TransactionRow`], [`ApprovedTransaction`])
//! - Participant profiles ([`ParticipantProfile`], [`ParticipantKind`])
//! - Resolved time windows ([`PeriodWindow`])
//!
//! This crate has zero dependencies on other duitrace crates.

pub mod error;
pub mod identity;
pub mod participant;
pub mod period;
pub mod transaction;

pub use error::{TransactionDataError, UnknownStatusError};
pub use identity::{ParticipantId, TransactionId};
pub use participant::{ParticipantKind, ParticipantProfile};
pub use period::PeriodWindow;
pub use transaction::{ApprovedTransaction, TransactionRow, TransactionStatus};
