//! Per-claim exclusive lock protocol
//!
//! Acquisition is a single compare-and-swap against the stored lock
//! value. The expected value is whatever is stored right now, expired or
//! not, so when several processors race for a claim whose lock just
//! expired, exactly one swap matches and the rest surface a conflict.

use std::sync::Arc;

use tracing::{debug, instrument};

use core_kernel::{Actor, ActorRole, Clock};
use domain_claims::{ClaimError, ClaimLock};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::store::{ClaimStore, StoreError};

#[derive(Clone)]
pub struct LockManager {
    store: Arc<dyn ClaimStore>,
    clock: Arc<dyn Clock>,
    duration: chrono::Duration,
}

impl LockManager {
    pub fn new(store: Arc<dyn ClaimStore>, clock: Arc<dyn Clock>, config: &EngineConfig) -> Self {
        Self {
            store,
            clock,
            duration: config.lock_duration(),
        }
    }

    /// Acquires or re-acquires the claim's evaluation lock for a
    /// processor. Re-acquire by the current holder extends the expiry.
    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn acquire(
        &self,
        claim_id: core_kernel::ClaimId,
        actor: &Actor,
    ) -> Result<ClaimLock, EngineError> {
        if actor.role != ActorRole::Processor {
            return Err(ClaimError::validation("only processors may lock claims").into());
        }

        let record = self.store.get(claim_id).await?;
        let now = self.clock.now();

        if let Some(lock) = &record.lock {
            if !lock.is_expired(now) && !lock.holder.is_same_identity(actor) {
                return Err(EngineError::LockConflict {
                    holder_id: lock.holder.id.clone(),
                    holder_name: lock.holder.name.clone(),
                    expires_at: lock.expires_at,
                });
            }
        }

        let next = ClaimLock::acquire(actor.clone(), now, self.duration);
        self.store
            .compare_and_swap_lock(claim_id, record.lock, Some(next.clone()))
            .await?;

        debug!(claim_id = %claim_id, expires_at = %next.expires_at, "lock acquired");
        Ok(next)
    }

    /// Releases the lock. Releasing an absent or expired lock succeeds
    /// without effect; releasing someone else's live lock does not.
    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn release(
        &self,
        claim_id: core_kernel::ClaimId,
        actor: &Actor,
    ) -> Result<(), EngineError> {
        let record = self.store.get(claim_id).await?;
        let now = self.clock.now();

        let lock = match record.lock {
            None => return Ok(()),
            Some(lock) => lock,
        };
        if lock.is_expired(now) {
            return Ok(());
        }
        if !lock.holder.is_same_identity(actor) {
            return Err(EngineError::NotLockHolder);
        }

        match self
            .store
            .compare_and_swap_lock(claim_id, Some(lock), None)
            .await
        {
            Ok(()) => Ok(()),
            // Lost the race: the lock we meant to clear is gone already
            Err(StoreError::LockCasFailed { current: None, .. }) => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// The live lock on a claim, if any. Expired locks read as absent.
    pub async fn inspect(
        &self,
        claim_id: core_kernel::ClaimId,
    ) -> Result<Option<ClaimLock>, EngineError> {
        let record = self.store.get(claim_id).await?;
        let now = self.clock.now();
        Ok(record.lock.filter(|lock| !lock.is_expired(now)))
    }
}
