//! Claim Lifecycle Domain
//!
//! This crate implements the claim state machine and its two parallel
//! sub-workflows (second-level review, RM settlement), plus the immutable
//! audit records every accepted transition produces.
//!
//! # Primary lifecycle
//!
//! ```text
//! qc_pending -> {qc_query, qc_clear, need_more_info, claim_approved, claim_denial}
//! qc_query -> qc_answered -> (re-evaluated like qc_pending)
//! need_more_info -> qc_pending
//! claim_denial -> claim_contested -> (re-evaluated like qc_pending)
//! qc_clear -> dispatched
//! ```
//!
//! All types here are pure domain: persistence, locking, and admission
//! control live in the `claims_engine` crate.

pub mod claim;
pub mod error;
pub mod lifecycle;
pub mod lock;
pub mod review;
pub mod settlement;
pub mod transaction;

pub use claim::{Claim, ClaimStatus, ClaimSubmission, DispatchDetail, ProcessorOptions, QcQueryDetail};
pub use error::ClaimError;
pub use lifecycle::{DispatchMode, TransitionOutcome, TransitionRequest};
pub use lock::ClaimLock;
pub use review::{
    EscalationDetail, ReviewAmounts, ReviewDecision, ReviewOutcome, ReviewRecord, ReviewStatus,
    ReviewTrack,
};
pub use settlement::{
    RmStatus, SettlementDetail, SettlementOutcome, SettlementRecord, SettlementTrack,
};
pub use transaction::{NewTransaction, TransactionRecord, TransactionType};
