//! Transaction types for DuitRace
//!
//! The transaction store is an external collaborator and its rows arrive
//! loosely typed: amounts as strings, statuses as strings, approval
//! timestamps possibly missing. [`TransactionRow::into_approved`] is the
//! validation boundary between stored rows and the values the leaderboard
//! aggregates over.

use crate::{ParticipantId, TransactionDataError, TransactionId, UnknownStatusError};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Verification status of a submitted receipt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    /// Awaiting verification
    Pending,
    /// Verified by the receipt pipeline; counts toward leaderboards
    Approved,
    /// Rejected by the receipt pipeline; invisible to leaderboards
    Rejected,
}

impl TransactionStatus {
    /// Get the canonical status string stored by the verification pipeline
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransactionStatus {
    type Err = UnknownStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(UnknownStatusError(s.to_string())),
        }
    }
}

/// A transaction row as read from the external store
///
/// Field types mirror what the store actually returns; nothing here is
/// validated yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRow {
    /// Store primary key
    pub id: TransactionId,
    /// The participant this receipt belongs to
    pub participant_id: ParticipantId,
    /// Ringgit amount as stored (e.g. "12.50")
    pub amount: String,
    /// Raw status string from the verification pipeline
    pub status: String,
    /// When the receipt was approved; the only timestamp the leaderboard
    /// treats as authoritative for period membership
    pub approved_at: Option<DateTime<Utc>>,
}

impl TransactionRow {
    /// Build an approved row (test and demo convenience)
    pub fn approved(
        id: TransactionId,
        participant_id: ParticipantId,
        amount: &str,
        approved_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            participant_id,
            amount: amount.to_string(),
            status: TransactionStatus::Approved.as_str().to_string(),
            approved_at: Some(approved_at),
        }
    }

    /// Validate this row into an [`ApprovedTransaction`]
    ///
    /// Only approved rows with a parseable, non-negative amount and an
    /// approval timestamp pass. Everything else is an explicit error the
    /// aggregator logs and skips.
    pub fn into_approved(self) -> Result<ApprovedTransaction, TransactionDataError> {
        let status = TransactionStatus::from_str(&self.status).map_err(
            |UnknownStatusError(status)| TransactionDataError::UnknownStatus {
                transaction_id: self.id,
                status,
            },
        )?;
        if status != TransactionStatus::Approved {
            return Err(TransactionDataError::NotApproved {
                transaction_id: self.id,
                status: self.status,
            });
        }

        let approved_at =
            self.approved_at
                .ok_or(TransactionDataError::MissingApprovalTime {
                    transaction_id: self.id,
                })?;

        let amount = Decimal::from_str_exact(self.amount.trim()).map_err(|_| {
            TransactionDataError::MalformedAmount {
                transaction_id: self.id,
                raw: self.amount.clone(),
            }
        })?;
        if amount.is_sign_negative() {
            return Err(TransactionDataError::NegativeAmount {
                transaction_id: self.id,
                raw: self.amount,
            });
        }

        Ok(ApprovedTransaction {
            id: self.id,
            participant_id: self.participant_id,
            amount,
            approved_at,
        })
    }
}

/// A validated, approved transaction ready for aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovedTransaction {
    pub id: TransactionId,
    pub participant_id: ParticipantId,
    /// Ringgit amount, 2 decimal places
    pub amount: Decimal,
    pub approved_at: DateTime<Utc>,
}
