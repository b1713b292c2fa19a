//! Claim lifecycle service
//!
//! Orders the checks around a transition: lock possession, admission,
//! then the domain machine. A rejected transition leaves the claim, the
//! lock and the audit log untouched.

use std::sync::Arc;

use serde_json::json;
use tracing::{info, instrument, warn};

use core_kernel::{Actor, ActorRole, ClaimId, Clock};
use domain_claims::{
    Claim, ClaimError, ClaimSubmission, NewTransaction, TransactionRecord, TransactionType,
    TransitionRequest,
};

use crate::admission::AdmissionGate;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::store::{ClaimRecord, ClaimStore};

/// A processor's claim listing, split by whether the claim is waiting on
/// a processor decision
#[derive(Debug, Clone)]
pub struct ProcessorInbox {
    pub unprocessed: Vec<ClaimRecord>,
    pub processed: Vec<ClaimRecord>,
}

#[derive(Clone)]
pub struct ClaimLifecycle {
    store: Arc<dyn ClaimStore>,
    clock: Arc<dyn Clock>,
    admission: AdmissionGate,
}

impl ClaimLifecycle {
    pub fn new(store: Arc<dyn ClaimStore>, clock: Arc<dyn Clock>, config: &EngineConfig) -> Self {
        Self {
            store,
            clock,
            admission: AdmissionGate::new(config.tier_ceilings.clone()),
        }
    }

    /// Submits a new claim into `qc_pending` with its `Created` audit
    /// entry
    #[instrument(skip(self, actor, submission), fields(actor_id = %actor.id))]
    pub async fn submit(
        &self,
        actor: &Actor,
        submission: ClaimSubmission,
    ) -> Result<ClaimRecord, EngineError> {
        if actor.role != ActorRole::Hospital {
            return Err(ClaimError::validation("only hospital users may submit claims").into());
        }

        let now = self.clock.now();
        let claim = Claim::submit(submission, actor.clone(), now);
        let audit = NewTransaction {
            claim_id: claim.id,
            transaction_type: TransactionType::Created,
            performed_by: actor.clone(),
            previous_status: "none".to_string(),
            new_status: claim.status.to_string(),
            remarks: None,
            metadata: json!({ "claim_number": claim.claim_number }),
            performed_at: now,
        };

        let record = self.store.insert(claim, audit).await?;
        info!(claim_id = %record.claim.id, claim_number = %record.claim.claim_number, "claim submitted");
        Ok(record)
    }

    pub async fn get(&self, claim_id: ClaimId) -> Result<ClaimRecord, EngineError> {
        Ok(self.store.get(claim_id).await?)
    }

    /// Claims submitted by the calling hospital
    pub async fn list_for_hospital(&self, actor: &Actor) -> Result<Vec<ClaimRecord>, EngineError> {
        let records = self.store.list().await?;
        Ok(records
            .into_iter()
            .filter(|r| r.claim.submitted_by.is_same_identity(actor))
            .collect())
    }

    /// Inbox for a processor, filtered by the caller's admission ceiling
    /// and split into unprocessed and processed buckets
    pub async fn list_for_processor(&self, actor: &Actor) -> Result<ProcessorInbox, EngineError> {
        let tier = actor
            .tier
            .ok_or_else(|| ClaimError::validation("processor tier is required"))?;

        let records = self.store.list().await?;
        let mut inbox = ProcessorInbox {
            unprocessed: Vec::new(),
            processed: Vec::new(),
        };
        for record in records {
            if !self.admission.admits(tier, &record.claim.claimed_amount) {
                continue;
            }
            if record.claim.status.is_processor_workable() {
                inbox.unprocessed.push(record);
            } else {
                inbox.processed.push(record);
            }
        }
        Ok(inbox)
    }

    /// Applies a status transition. Processor transitions additionally
    /// require a live lock held by the caller and an admission pass.
    #[instrument(skip(self, actor, request), fields(actor_id = %actor.id, status = %request.target_status()))]
    pub async fn transition(
        &self,
        claim_id: ClaimId,
        actor: &Actor,
        request: &TransitionRequest,
    ) -> Result<ClaimRecord, EngineError> {
        let record = self.store.get(claim_id).await?;
        let now = self.clock.now();

        if actor.role == ActorRole::Processor {
            let held = record
                .lock
                .as_ref()
                .map_or(false, |lock| lock.is_held_by(actor, now));
            if !held {
                return Err(EngineError::LockNotHeld);
            }

            let tier = actor
                .tier
                .ok_or_else(|| ClaimError::validation("processor tier is required"))?;
            self.admission.authorize(tier, &record.claim.claimed_amount)?;
        }

        let mut claim = record.claim.clone();
        let previous_status = claim.status.to_string();
        let outcome = claim.apply_transition(actor, request, now)?;

        let audit = NewTransaction {
            claim_id,
            transaction_type: outcome.transaction_type,
            performed_by: actor.clone(),
            previous_status,
            new_status: claim.status.to_string(),
            remarks: request.remarks().map(str::to_string),
            metadata: outcome.metadata,
            performed_at: now,
        };

        let mut committed = self
            .store
            .commit(claim_id, record.version, claim, vec![audit])
            .await?;
        info!(claim_id = %claim_id, status = %committed.claim.status, "transition applied");

        // Terminal processor decisions hand the claim back. The commit
        // already landed, so a lost swap here only means the lock moved
        // on by itself.
        if outcome.clears_lock {
            match self
                .store
                .compare_and_swap_lock(claim_id, record.lock, None)
                .await
            {
                Ok(()) => committed.lock = None,
                Err(err) => warn!(claim_id = %claim_id, error = %err, "lock not cleared"),
            }
        }

        Ok(committed)
    }

    /// Ordered audit page for a claim
    pub async fn transactions(
        &self,
        claim_id: ClaimId,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<TransactionRecord>, EngineError> {
        // Existence check so an unknown claim reads as 404, not an empty page
        self.store.get(claim_id).await?;
        Ok(self.store.transactions(claim_id, offset, limit).await?)
    }
}
