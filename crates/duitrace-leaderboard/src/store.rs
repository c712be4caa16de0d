//! Transaction store and participant directory contracts
//!
//! The leaderboard core is read-only over two external collaborators: the
//! transaction store (approved receipts) and the user directory (display
//! names). Both are expressed as traits here; the HTTP layer wires real
//! database-backed implementations, while [`MemoryTransactionStore`]
//! backs tests and demos.

use crate::LeaderboardResult;
use duitrace_types::{ParticipantId, ParticipantProfile, PeriodWindow, TransactionRow};
use parking_lot::RwLock;
use std::collections::HashMap;

/// Read-only access to approved transactions
pub trait TransactionStore: Send + Sync {
    /// Fetch approved transaction rows, optionally restricted to a window
    ///
    /// `None` means no time filter (the all-time leaderboard). The window
    /// test applies to `approved_at` — the only timestamp that decides
    /// period membership. Rows are returned as stored; validation happens
    /// in the aggregator.
    fn fetch_approved(
        &self,
        window: Option<&PeriodWindow>,
    ) -> LeaderboardResult<Vec<TransactionRow>>;
}

/// Read-only access to participant display attributes
pub trait ParticipantDirectory: Send + Sync {
    /// Look up display profiles for a set of participants
    ///
    /// Unknown ids are simply absent from the result; a participant
    /// deleted between aggregation and display is not an error.
    fn display_info(&self, ids: &[ParticipantId]) -> HashMap<ParticipantId, ParticipantProfile>;
}

/// In-memory store implementing both contracts
#[derive(Debug, Default)]
pub struct MemoryTransactionStore {
    rows: RwLock<Vec<TransactionRow>>,
    profiles: RwLock<HashMap<ParticipantId, ParticipantProfile>>,
}

impl MemoryTransactionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a transaction row
    pub fn insert_transaction(&self, row: TransactionRow) {
        self.rows.write().push(row);
    }

    /// Register a participant profile
    pub fn insert_profile(&self, profile: ParticipantProfile) {
        self.profiles.write().insert(profile.id, profile);
    }

    /// Number of stored rows, any status
    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    /// Whether the store holds no rows
    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }
}

impl TransactionStore for MemoryTransactionStore {
    fn fetch_approved(
        &self,
        window: Option<&PeriodWindow>,
    ) -> LeaderboardResult<Vec<TransactionRow>> {
        let rows = self.rows.read();
        Ok(rows
            .iter()
            .filter(|row| row.status.trim().eq_ignore_ascii_case("approved"))
            .filter(|row| match (row.approved_at, window) {
                (Some(ts), Some(w)) => w.contains(ts),
                // A bounded window can never match a row without an
                // approval timestamp; unbounded fetches still surface it
                // so the aggregator can log and skip it.
                (None, Some(_)) => false,
                (_, None) => true,
            })
            .cloned()
            .collect())
    }
}

impl ParticipantDirectory for MemoryTransactionStore {
    fn display_info(&self, ids: &[ParticipantId]) -> HashMap<ParticipantId, ParticipantProfile> {
        let profiles = self.profiles.read();
        ids.iter()
            .filter_map(|id| profiles.get(id).map(|p| (*id, p.clone())))
            .collect()
    }
}
