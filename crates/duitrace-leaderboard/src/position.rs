//! Participant position lookup
//!
//! A participant outside the headline top-N still needs to see their own
//! rank. The lookup scans the same full ranking that produced the
//! headline list, so the reported rank is always consistent with the
//! entries shown alongside it — never recomputed under a different
//! tie-break policy.

use crate::aggregate::LeaderboardService;
use crate::rank::RankedEntry;
use crate::LeaderboardResult;
use duitrace_calendar::ResolvedPeriod;
use duitrace_types::ParticipantId;
use serde::{Deserialize, Serialize};

/// Headline leaderboard plus one participant's own position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardView {
    /// The top-N entries by rank order
    pub top_entries: Vec<RankedEntry>,
    /// The requested participant's entry, wherever it ranks; `None` when
    /// they have no approved transactions in the period ("not yet
    /// ranked", never rank 0)
    pub user_position: Option<RankedEntry>,
    /// Size of the full eligible set for the period
    pub total_participants: usize,
}

impl LeaderboardService {
    /// Find one participant's ranked entry within a period
    ///
    /// `None` means the participant has no approved transactions in the
    /// period (or was deleted from the store) — not an error.
    pub fn position(
        &self,
        participant: ParticipantId,
        period: &ResolvedPeriod,
    ) -> LeaderboardResult<Option<RankedEntry>> {
        Ok(self
            .ranked(period)?
            .into_iter()
            .find(|r| r.participant_id() == participant))
    }

    /// Headline view with the participant's own position attached
    ///
    /// The full ranking is computed once, sliced for the headline and
    /// scanned for the participant, so both halves of the view agree.
    pub fn top_n_with_position(
        &self,
        participant: ParticipantId,
        period: &ResolvedPeriod,
        n: Option<u32>,
    ) -> LeaderboardResult<LeaderboardView> {
        let ranked = self.ranked(period)?;
        let total_participants = ranked.len();
        let user_position = ranked
            .iter()
            .find(|r| r.participant_id() == participant)
            .copied();
        let n = n.unwrap_or(self.config().top_n) as usize;
        let mut top_entries = ranked;
        top_entries.truncate(n);

        Ok(LeaderboardView {
            top_entries,
            user_position,
            total_participants,
        })
    }
}
