//! Engine error taxonomy

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use core_kernel::{ClaimId, ProcessorTier};
use domain_claims::ClaimError;

use crate::store::StoreError;

/// Errors produced by the engine services
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Claim not found: {0}")]
    NotFound(ClaimId),

    /// Another processor holds a live lock on the claim
    #[error("Claim is locked by {holder_name} until {expires_at}")]
    LockConflict {
        holder_id: String,
        holder_name: String,
        expires_at: DateTime<Utc>,
    },

    /// A processor transition was attempted without holding the lock
    #[error("Caller does not hold the evaluation lock")]
    LockNotHeld,

    /// Release attempted by someone other than the live holder
    #[error("Caller is not the lock holder")]
    NotLockHolder,

    #[error("Claim amount {amount} exceeds the {tier} ceiling of {ceiling}")]
    AdmissionDenied {
        tier: ProcessorTier,
        amount: Decimal,
        ceiling: Decimal,
    },

    /// Concurrent writer won the version race; caller should re-read
    #[error("Claim {0} was modified concurrently")]
    VersionConflict(ClaimId),

    #[error(transparent)]
    Domain(#[from] ClaimError),
}

impl From<StoreError> for EngineError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => EngineError::NotFound(id),
            StoreError::VersionConflict { claim_id, .. } => EngineError::VersionConflict(claim_id),
            StoreError::LockCasFailed { current, .. } => match current {
                Some(lock) => EngineError::LockConflict {
                    holder_id: lock.holder.id,
                    holder_name: lock.holder.name,
                    expires_at: lock.expires_at,
                },
                None => EngineError::LockNotHeld,
            },
        }
    }
}
