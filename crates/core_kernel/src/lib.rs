//! Core Kernel - Foundational types for the claim lifecycle engine
//!
//! This crate provides the building blocks used across all engine crates:
//! - Money types with precise decimal arithmetic
//! - Strongly-typed identifiers
//! - Actor identity, roles, and processor tiers
//! - A clock abstraction for testable time-bounded state (lock expiry)

pub mod actor;
pub mod clock;
pub mod identifiers;
pub mod money;

pub use actor::{Actor, ActorParseError, ActorRole, ProcessorTier};
pub use clock::{Clock, ManualClock, SystemClock};
pub use identifiers::{ClaimId, ReviewId, SettlementId, TransactionId};
pub use money::{Currency, Money, MoneyError};
