//! Dense ranking with pluggable tie-break policies
//!
//! The competition has two leaderboard flavors with different tie-break
//! sets: students rank by transaction count only (count ties share a rank
//! regardless of amount), while entrepreneur units break count ties by
//! total amount. Both fall back to participant id ascending as the final
//! ordering tie-break so repeated calls over identical input produce
//! identical output. The id never participates in the dense-rank key.

use duitrace_types::ParticipantId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Aggregated totals for one participant within one period
///
/// Ephemeral: computed fresh on every leaderboard query, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateEntry {
    pub participant_id: ParticipantId,
    /// Number of approved transactions in the period
    pub transaction_count: u64,
    /// Sum of approved transaction amounts in the period
    pub total_amount: Decimal,
}

/// An aggregate entry with its assigned dense rank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    /// 1-based dense rank over the full eligible set
    pub rank: u32,
    #[serde(flatten)]
    pub entry: AggregateEntry,
}

impl RankedEntry {
    /// The ranked participant
    pub fn participant_id(&self) -> ParticipantId {
        self.entry.participant_id
    }
}

/// Which fields break ties between equal transaction counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreakPolicy {
    /// Student leaderboard: count is the only competitive metric; count
    /// ties share a rank even when amounts differ
    CountOnly,
    /// Entrepreneur-unit leaderboard: count ties are broken by total
    /// amount descending
    CountThenAmount,
}

impl TieBreakPolicy {
    /// Total ordering for the leaderboard: best entry first
    pub fn compare(&self, a: &AggregateEntry, b: &AggregateEntry) -> Ordering {
        b.transaction_count
            .cmp(&a.transaction_count)
            .then_with(|| match self {
                Self::CountOnly => Ordering::Equal,
                Self::CountThenAmount => b.total_amount.cmp(&a.total_amount),
            })
            .then_with(|| a.participant_id.cmp(&b.participant_id))
    }

    /// Whether two entries share a dense-rank key under this policy
    pub fn same_rank(&self, a: &AggregateEntry, b: &AggregateEntry) -> bool {
        a.transaction_count == b.transaction_count
            && match self {
                Self::CountOnly => true,
                Self::CountThenAmount => a.total_amount == b.total_amount,
            }
    }
}

/// Converts unordered aggregates into a deterministic dense ranking
#[derive(Debug, Clone, Copy)]
pub struct RankEngine {
    policy: TieBreakPolicy,
}

impl RankEngine {
    /// Create an engine with the given tie-break policy
    pub fn new(policy: TieBreakPolicy) -> Self {
        Self { policy }
    }

    /// The active tie-break policy
    pub fn policy(&self) -> TieBreakPolicy {
        self.policy
    }

    /// Rank the entire eligible set
    ///
    /// Ranking is dense: tied entries share a rank and the next distinct
    /// key gets `previous + 1`. Ranks are always assigned over the full
    /// set; truncation and pagination happen afterwards, never before.
    pub fn rank(&self, mut entries: Vec<AggregateEntry>) -> Vec<RankedEntry> {
        entries.sort_by(|a, b| self.policy.compare(a, b));

        let mut ranked = Vec::with_capacity(entries.len());
        let mut rank = 0u32;
        let mut previous: Option<AggregateEntry> = None;
        for entry in entries {
            let tied = previous
                .map(|prev| self.policy.same_rank(&prev, &entry))
                .unwrap_or(false);
            if !tied {
                rank += 1;
            }
            previous = Some(entry);
            ranked.push(RankedEntry { rank, entry });
        }
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn entry(id: u64, count: u64, amount: Decimal) -> AggregateEntry {
        AggregateEntry {
            participant_id: ParticipantId::new(id),
            transaction_count: count,
            total_amount: amount,
        }
    }

    #[test]
    fn test_empty_input() {
        let engine = RankEngine::new(TieBreakPolicy::CountOnly);
        assert!(engine.rank(Vec::new()).is_empty());
    }

    #[test]
    fn test_single_entry_is_rank_one() {
        let engine = RankEngine::new(TieBreakPolicy::CountOnly);
        let ranked = engine.rank(vec![entry(1, 3, dec!(10))]);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].rank, 1);
    }

    #[test]
    fn test_dense_ranking() {
        let engine = RankEngine::new(TieBreakPolicy::CountOnly);
        let ranked = engine.rank(vec![
            entry(1, 5, dec!(10)),
            entry(2, 5, dec!(10)),
            entry(3, 3, dec!(50)),
        ]);
        let ranks: Vec<u32> = ranked.iter().map(|r| r.rank).collect();
        // Dense: [1, 1, 2] — never [1, 1, 3]
        assert_eq!(ranks, vec![1, 1, 2]);
    }

    #[test]
    fn test_all_tied_share_rank_one() {
        let engine = RankEngine::new(TieBreakPolicy::CountThenAmount);
        let ranked = engine.rank(vec![
            entry(3, 2, dec!(7)),
            entry(1, 2, dec!(7)),
            entry(2, 2, dec!(7)),
        ]);
        assert!(ranked.iter().all(|r| r.rank == 1));
        // Id ascending keeps the ordering stable
        let ids: Vec<u64> = ranked.iter().map(|r| r.participant_id().value()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_count_only_ignores_amount() {
        let engine = RankEngine::new(TieBreakPolicy::CountOnly);
        let ranked = engine.rank(vec![
            entry(2, 4, dec!(100)),
            entry(1, 4, dec!(5)),
            entry(3, 1, dec!(900)),
        ]);
        // Both count-4 entries share rank 1; amounts do not split them and
        // the lower id orders first.
        assert_eq!(ranked[0].participant_id(), ParticipantId::new(1));
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[1].rank, 1);
        assert_eq!(ranked[2].rank, 2);
    }

    #[test]
    fn test_count_then_amount_breaks_ties() {
        let engine = RankEngine::new(TieBreakPolicy::CountThenAmount);
        let ranked = engine.rank(vec![
            entry(1, 4, dec!(5)),
            entry(2, 4, dec!(100)),
            entry(3, 4, dec!(100)),
        ]);
        assert_eq!(ranked[0].participant_id(), ParticipantId::new(2));
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[1].participant_id(), ParticipantId::new(3));
        assert_eq!(ranked[1].rank, 1);
        assert_eq!(ranked[2].participant_id(), ParticipantId::new(1));
        assert_eq!(ranked[2].rank, 2);
    }

    #[test]
    fn test_ranked_entry_serializes_flat() {
        let engine = RankEngine::new(TieBreakPolicy::CountOnly);
        let ranked = engine.rank(vec![entry(7, 3, dec!(12.50))]);

        let json = serde_json::to_value(&ranked[0]).unwrap();
        // The aggregate fields flatten next to the rank
        assert_eq!(json["rank"], 1);
        assert_eq!(json["participant_id"], 7);
        assert_eq!(json["transaction_count"], 3);

        let back: RankedEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back, ranked[0]);
    }

    #[test]
    fn test_determinism() {
        let engine = RankEngine::new(TieBreakPolicy::CountThenAmount);
        let entries = vec![
            entry(5, 2, dec!(20)),
            entry(9, 7, dec!(1)),
            entry(2, 2, dec!(20)),
            entry(7, 7, dec!(3)),
        ];
        let first = engine.rank(entries.clone());
        let second = engine.rank(entries);
        assert_eq!(first, second);
    }
}
