//! Error types for DuitRace domain data
//!
//! Row-level validation failures are explicit so the leaderboard can skip
//! a corrupt record and keep aggregating instead of failing the whole
//! query.

use crate::TransactionId;
use thiserror::Error;

/// A stored status string that is not one of the known statuses
///
/// Raised by `TransactionStatus::from_str`; row validation wraps it with
/// the offending transaction id.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown transaction status {0:?}")]
pub struct UnknownStatusError(pub String);

/// Errors raised when a stored transaction row cannot be used for
/// aggregation
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransactionDataError {
    /// The stored amount could not be parsed as a decimal
    #[error("Transaction {transaction_id} has malformed amount {raw:?}")]
    MalformedAmount {
        transaction_id: TransactionId,
        raw: String,
    },

    /// The stored amount is negative, which a payment receipt never is
    #[error("Transaction {transaction_id} has negative amount {raw:?}")]
    NegativeAmount {
        transaction_id: TransactionId,
        raw: String,
    },

    /// The row is marked approved but carries no approval timestamp
    #[error("Transaction {transaction_id} is approved but has no approval timestamp")]
    MissingApprovalTime { transaction_id: TransactionId },

    /// The stored status string is not one of the known statuses
    #[error("Transaction {transaction_id} has unknown status {status:?}")]
    UnknownStatus {
        transaction_id: TransactionId,
        status: String,
    },

    /// The row is not approved and must stay invisible to the leaderboard
    #[error("Transaction {transaction_id} is not approved (status: {status})")]
    NotApproved {
        transaction_id: TransactionId,
        status: String,
    },
}

impl TransactionDataError {
    /// Get an error code for log fields and API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MalformedAmount { .. } => "MALFORMED_AMOUNT",
            Self::NegativeAmount { .. } => "NEGATIVE_AMOUNT",
            Self::MissingApprovalTime { .. } => "MISSING_APPROVAL_TIME",
            Self::UnknownStatus { .. } => "UNKNOWN_STATUS",
            Self::NotApproved { .. } => "NOT_APPROVED",
        }
    }
}
