//! Persistence port
//!
//! The engine talks to storage through this trait. Two operations carry
//! all the concurrency weight:
//!
//! - `commit` writes the aggregate and appends its audit entries as one
//!   unit, guarded by an expected version. A mismatch writes nothing.
//! - `compare_and_swap_lock` swaps the lock sub-record against its full
//!   expected value, expired or not, so two late acquirers cannot both
//!   succeed.
//!
//! Everything else is plain reads.

use async_trait::async_trait;
use thiserror::Error;

use core_kernel::ClaimId;
use domain_claims::{Claim, ClaimLock, NewTransaction, TransactionRecord};

/// A claim as stored: the aggregate, its lock sub-record, and the version
/// that guards the next commit
#[derive(Debug, Clone)]
pub struct ClaimRecord {
    pub claim: Claim,
    pub lock: Option<ClaimLock>,
    pub version: u64,
}

/// Storage failures surfaced to the engine
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Claim not found: {0}")]
    NotFound(ClaimId),

    #[error("Version conflict on claim {claim_id}: expected {expected}, found {found}")]
    VersionConflict {
        claim_id: ClaimId,
        expected: u64,
        found: u64,
    },

    /// The lock sub-record did not match the expected value. Carries the
    /// value actually stored so callers can report the current holder.
    #[error("Lock compare-and-swap failed on claim {claim_id}")]
    LockCasFailed {
        claim_id: ClaimId,
        current: Option<ClaimLock>,
    },
}

/// Port over claim persistence
#[async_trait]
pub trait ClaimStore: Send + Sync {
    /// Stores a new claim at version 1 together with its `Created` audit
    /// entry
    async fn insert(&self, claim: Claim, audit: NewTransaction)
        -> Result<ClaimRecord, StoreError>;

    async fn get(&self, claim_id: ClaimId) -> Result<ClaimRecord, StoreError>;

    async fn list(&self) -> Result<Vec<ClaimRecord>, StoreError>;

    /// Versioned write of the aggregate plus its audit entries, atomic.
    /// The lock sub-record is untouched.
    async fn commit(
        &self,
        claim_id: ClaimId,
        expected_version: u64,
        claim: Claim,
        audit: Vec<NewTransaction>,
    ) -> Result<ClaimRecord, StoreError>;

    /// Full-value compare-and-swap on the lock sub-record
    async fn compare_and_swap_lock(
        &self,
        claim_id: ClaimId,
        expected: Option<ClaimLock>,
        next: Option<ClaimLock>,
    ) -> Result<(), StoreError>;

    /// Audit page ordered by `seq` ascending
    async fn transactions(
        &self,
        claim_id: ClaimId,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<TransactionRecord>, StoreError>;
}
