//! Identity types for DuitRace
//!
//! All identity types are strongly typed wrappers around the integer
//! primary keys handed out by the external user directory and transaction
//! store, to prevent accidental mixing of different ID types. The wrapped
//! integer gives a total order, which the leaderboard uses as its final
//! deterministic tie-break.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;

/// Macro to generate ID types with common implementations
macro_rules! define_id_type {
    ($name:ident, $prefix:literal, $doc:literal) => {
        #[doc = $doc]
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name(pub u64);

        impl $name {
            /// Create from a raw store key
            pub fn new(value: u64) -> Self {
                Self(value)
            }

            /// Parse from a string (with or without prefix)
            pub fn parse(s: &str) -> Result<Self, ParseIntError> {
                let s = s.strip_prefix(concat!($prefix, "_")).unwrap_or(s);
                Ok(Self(s.parse()?))
            }

            /// Get the inner key
            pub fn value(&self) -> u64 {
                self.0
            }

            /// Convert to prefixed string
            pub fn to_prefixed_string(&self) -> String {
                format!("{}_{}", $prefix, self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}_{}", $prefix, self.0)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }
    };
}

// Core identity types
define_id_type!(
    ParticipantId,
    "participant",
    "Unique identifier for a ranked participant (student or entrepreneur unit)"
);
define_id_type!(
    TransactionId,
    "txn",
    "Unique identifier for a submitted DuitNow transaction"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_parse_roundtrip() {
        let id = ParticipantId::new(42);
        assert_eq!(id.to_prefixed_string(), "participant_42");
        assert_eq!(ParticipantId::parse("participant_42").unwrap(), id);
        assert_eq!(ParticipantId::parse("42").unwrap(), id);
    }

    #[test]
    fn test_id_ordering() {
        assert!(ParticipantId::new(1) < ParticipantId::new(2));
        assert!(TransactionId::new(10) > TransactionId::new(9));
    }

    #[test]
    fn test_id_types_distinct() {
        // Compile-time property: ParticipantId and TransactionId are
        // different types even though both wrap u64.
        let p = ParticipantId::new(7);
        let t = TransactionId::new(7);
        assert_eq!(p.value(), t.value());
        assert_ne!(p.to_prefixed_string(), t.to_prefixed_string());
    }
}
