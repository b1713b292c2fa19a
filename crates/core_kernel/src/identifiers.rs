//! Strongly-typed identifiers for engine entities
//!
//! Newtype wrappers around UUIDs prevent accidental mixing of identifier
//! types across claim, audit, review, and settlement records. Fresh ids
//! are time-ordered (UUID v7) so audit trails sort by creation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident => $prefix:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Mints a fresh time-ordered identifier.
            pub fn new_v7() -> Self {
                Self(Uuid::now_v7())
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "-{}"), self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            /// Accepts both the prefixed display form and a bare UUID.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let bare = s.strip_prefix(concat!($prefix, "-")).unwrap_or(s);
                Uuid::parse_str(bare).map(Self)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }
    };
}

entity_id! {
    /// Identifies a claim aggregate.
    ClaimId => "CLM"
}

entity_id! {
    /// Identifies one audit trail entry.
    TransactionId => "TXN"
}

entity_id! {
    /// Identifies a recorded review decision.
    ReviewId => "REV"
}

entity_id! {
    /// Identifies a recorded settlement update.
    SettlementId => "STL"
}
