//! Period aggregation and leaderboard views
//!
//! [`LeaderboardService`] is the entry point: it resolves a period,
//! aggregates approved transactions per participant, ranks the full set
//! and serves headline (top-N) and paginated table views. Participants
//! with zero approved transactions in a period never appear — absence,
//! not a zero row, decides who is on a leaderboard at all.

use crate::rank::{AggregateEntry, RankEngine, RankedEntry, TieBreakPolicy};
use crate::store::{ParticipantDirectory, TransactionStore};
use crate::{LeaderboardResult, DEFAULT_PER_PAGE, DEFAULT_TOP_N};
use chrono::{DateTime, Utc};
use duitrace_calendar::{PeriodFilter, PeriodRequest, ResolvedPeriod};
use duitrace_types::ParticipantId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tracing::{debug, warn};

/// Leaderboard behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardConfig {
    /// Tie-break policy for this leaderboard flavor
    pub policy: TieBreakPolicy,
    /// Default headline size
    pub top_n: u32,
    /// Default rows per page
    pub per_page: u32,
    /// Participants hidden from the all-time view (admin/test accounts).
    /// Applies to the all-time period only; weekly and monthly views show
    /// everyone.
    pub all_time_exclusions: HashSet<ParticipantId>,
}

impl LeaderboardConfig {
    /// Student leaderboard: count only, amounts never break ties
    pub fn individuals() -> Self {
        Self {
            policy: TieBreakPolicy::CountOnly,
            top_n: DEFAULT_TOP_N,
            per_page: DEFAULT_PER_PAGE,
            all_time_exclusions: HashSet::new(),
        }
    }

    /// Entrepreneur-unit leaderboard: count ties broken by total amount
    pub fn entrepreneur_units() -> Self {
        Self {
            policy: TieBreakPolicy::CountThenAmount,
            ..Self::individuals()
        }
    }

    /// Set the all-time exclusion list
    pub fn with_all_time_exclusions(
        mut self,
        ids: impl IntoIterator<Item = ParticipantId>,
    ) -> Self {
        self.all_time_exclusions = ids.into_iter().collect();
        self
    }
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self::individuals()
    }
}

/// One row of a paginated leaderboard table, with display attributes
/// joined in from the user directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedRow {
    pub rank: u32,
    pub participant_id: ParticipantId,
    pub transaction_count: u64,
    pub total_amount: Decimal,
    /// Directory display name; falls back to the prefixed id when the
    /// participant was deleted between aggregation and display
    pub display_name: String,
    pub affiliation: Option<String>,
}

impl RankedRow {
    /// Case-insensitive substring match against name, affiliation or id
    fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.display_name.to_lowercase().contains(&needle)
            || self
                .affiliation
                .as_deref()
                .map(|a| a.to_lowercase().contains(&needle))
                .unwrap_or(false)
            || self.participant_id.to_prefixed_string().contains(&needle)
    }
}

/// A page of leaderboard rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardPage {
    pub rows: Vec<RankedRow>,
    /// Post-filter, pre-pagination row count
    pub total: usize,
    /// 1-based page number
    pub page: u32,
    pub per_page: u32,
}

/// Leaderboard query service
///
/// Stateless between requests: every call re-aggregates from the
/// transaction store, so results always reflect the approvals present at
/// query time.
pub struct LeaderboardService {
    store: Arc<dyn TransactionStore>,
    directory: Arc<dyn ParticipantDirectory>,
    filter: PeriodFilter,
    engine: RankEngine,
    config: LeaderboardConfig,
}

impl LeaderboardService {
    /// Create a service with explicit configuration
    pub fn new(
        store: Arc<dyn TransactionStore>,
        directory: Arc<dyn ParticipantDirectory>,
        filter: PeriodFilter,
        config: LeaderboardConfig,
    ) -> Self {
        Self {
            store,
            directory,
            filter,
            engine: RankEngine::new(config.policy),
            config,
        }
    }

    /// Student leaderboard service
    pub fn individuals(
        store: Arc<dyn TransactionStore>,
        directory: Arc<dyn ParticipantDirectory>,
        filter: PeriodFilter,
    ) -> Self {
        Self::new(store, directory, filter, LeaderboardConfig::individuals())
    }

    /// Entrepreneur-unit leaderboard service
    pub fn entrepreneur_units(
        store: Arc<dyn TransactionStore>,
        directory: Arc<dyn ParticipantDirectory>,
        filter: PeriodFilter,
    ) -> Self {
        Self::new(
            store,
            directory,
            filter,
            LeaderboardConfig::entrepreneur_units(),
        )
    }

    /// The active configuration
    pub fn config(&self) -> &LeaderboardConfig {
        &self.config
    }

    /// The ranking engine (shares the service's tie-break policy)
    pub fn engine(&self) -> &RankEngine {
        &self.engine
    }

    /// Resolve a wire-level period request against a reference instant
    pub fn resolve(
        &self,
        request: &PeriodRequest,
        now: DateTime<Utc>,
    ) -> LeaderboardResult<ResolvedPeriod> {
        Ok(self.filter.resolve(request, now)?)
    }

    /// Aggregate approved transactions per participant for a period
    ///
    /// Corrupt rows (unparseable amount, missing approval timestamp,
    /// unexpected status) are logged and skipped so a single bad record
    /// never takes the whole leaderboard down.
    pub fn aggregate(&self, period: &ResolvedPeriod) -> LeaderboardResult<Vec<AggregateEntry>> {
        if period.matches_nothing() {
            debug!("period matches nothing, returning empty aggregate");
            return Ok(Vec::new());
        }

        let rows = self.store.fetch_approved(period.window())?;
        let exclusions = matches!(*period, ResolvedPeriod::AllTime)
            .then_some(&self.config.all_time_exclusions);

        let mut totals: BTreeMap<ParticipantId, (u64, Decimal)> = BTreeMap::new();
        for row in rows {
            if let Some(excluded) = exclusions {
                if excluded.contains(&row.participant_id) {
                    continue;
                }
            }
            match row.into_approved() {
                Ok(tx) => {
                    let slot = totals
                        .entry(tx.participant_id)
                        .or_insert((0, Decimal::ZERO));
                    slot.0 += 1;
                    slot.1 += tx.amount;
                }
                Err(err) => {
                    warn!(code = err.error_code(), error = %err, "skipping unusable transaction row");
                }
            }
        }

        Ok(totals
            .into_iter()
            .map(|(participant_id, (transaction_count, total_amount))| AggregateEntry {
                participant_id,
                transaction_count,
                total_amount,
            })
            .collect())
    }

    /// Rank the full aggregate set for a period
    pub fn ranked(&self, period: &ResolvedPeriod) -> LeaderboardResult<Vec<RankedEntry>> {
        Ok(self.engine.rank(self.aggregate(period)?))
    }

    /// Headline view: the first `n` rows of the full ranking
    ///
    /// Ranks are computed over the entire set first and the list is then
    /// hard-cut at `n` rows, even when the cut lands inside a tied group
    /// (three participants tied at rank 20 may have only one shown). This
    /// mirrors the published competition pages; widening the cut to keep
    /// tied groups whole would change results and needs product sign-off.
    pub fn top_n(
        &self,
        period: &ResolvedPeriod,
        n: Option<u32>,
    ) -> LeaderboardResult<Vec<RankedEntry>> {
        let n = n.unwrap_or(self.config.top_n) as usize;
        let mut ranked = self.ranked(period)?;
        ranked.truncate(n);
        Ok(ranked)
    }

    /// Paginated table view with optional search
    ///
    /// The search filter runs over the *ranked* set, so surviving entries
    /// keep the rank they hold on the unfiltered leaderboard. `total` is
    /// the post-filter, pre-pagination count. Pages are 1-based; page 0 is
    /// treated as page 1.
    pub fn paginate(
        &self,
        period: &ResolvedPeriod,
        page: u32,
        per_page: Option<u32>,
        search: Option<&str>,
    ) -> LeaderboardResult<LeaderboardPage> {
        let ranked = self.ranked(period)?;
        let ids: Vec<ParticipantId> = ranked.iter().map(|r| r.participant_id()).collect();
        let profiles = self.directory.display_info(&ids);

        let mut rows: Vec<RankedRow> = ranked
            .into_iter()
            .map(|r| {
                let profile = profiles.get(&r.entry.participant_id);
                RankedRow {
                    rank: r.rank,
                    participant_id: r.entry.participant_id,
                    transaction_count: r.entry.transaction_count,
                    total_amount: r.entry.total_amount,
                    display_name: profile
                        .map(|p| p.name.clone())
                        .unwrap_or_else(|| r.entry.participant_id.to_prefixed_string()),
                    affiliation: profile.and_then(|p| p.affiliation.clone()),
                }
            })
            .collect();

        if let Some(needle) = search.map(str::trim).filter(|s| !s.is_empty()) {
            rows.retain(|row| row.matches_search(needle));
        }

        let total = rows.len();
        let page = page.max(1);
        let per_page = per_page.unwrap_or(self.config.per_page).max(1);
        let offset = (page as usize - 1).saturating_mul(per_page as usize);
        let rows = rows
            .into_iter()
            .skip(offset)
            .take(per_page as usize)
            .collect();

        Ok(LeaderboardPage {
            rows,
            total,
            page,
            per_page,
        })
    }
}
