//! Review workflow service
//!
//! Reviews do not take the processor lock. They go through the same
//! versioned commit as everything else, so a concurrent lifecycle write
//! surfaces as a version conflict instead of a silent lost update.

use std::sync::Arc;

use tracing::{info, instrument};

use core_kernel::{Actor, ClaimId, Clock};
use domain_claims::{NewTransaction, ReviewDecision};

use crate::error::EngineError;
use crate::store::{ClaimRecord, ClaimStore};

#[derive(Clone)]
pub struct ReviewWorkflow {
    store: Arc<dyn ClaimStore>,
    clock: Arc<dyn Clock>,
}

impl ReviewWorkflow {
    pub fn new(store: Arc<dyn ClaimStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Records a review decision against the claim's review track
    #[instrument(skip(self, reviewer, decision, remarks), fields(reviewer_id = %reviewer.id))]
    pub async fn decide(
        &self,
        claim_id: ClaimId,
        reviewer: &Actor,
        decision: &ReviewDecision,
        remarks: Option<String>,
    ) -> Result<ClaimRecord, EngineError> {
        let record = self.store.get(claim_id).await?;
        let now = self.clock.now();

        let mut claim = record.claim.clone();
        let previous_status = claim.review.review_status.to_string();
        let outcome = claim.apply_review_decision(reviewer, decision, remarks.clone(), now)?;

        let audit = NewTransaction {
            claim_id,
            transaction_type: outcome.transaction_type,
            performed_by: reviewer.clone(),
            previous_status,
            new_status: claim.review.review_status.to_string(),
            remarks,
            metadata: outcome.metadata,
            performed_at: now,
        };

        let committed = self
            .store
            .commit(claim_id, record.version, claim, vec![audit])
            .await?;
        info!(claim_id = %claim_id, review_status = %committed.claim.review.review_status, "review recorded");
        Ok(committed)
    }

    /// Escalates the review past the reviewer
    #[instrument(skip(self, reviewer, reason, target), fields(reviewer_id = %reviewer.id))]
    pub async fn escalate(
        &self,
        claim_id: ClaimId,
        reviewer: &Actor,
        reason: &str,
        target: Option<String>,
    ) -> Result<ClaimRecord, EngineError> {
        let record = self.store.get(claim_id).await?;
        let now = self.clock.now();

        let mut claim = record.claim.clone();
        let previous_status = claim.review.review_status.to_string();
        let outcome = claim.apply_review_escalation(reviewer, reason, target, now)?;

        let audit = NewTransaction {
            claim_id,
            transaction_type: outcome.transaction_type,
            performed_by: reviewer.clone(),
            previous_status,
            new_status: claim.review.review_status.to_string(),
            remarks: Some(reason.to_string()),
            metadata: outcome.metadata,
            performed_at: now,
        };

        let committed = self
            .store
            .commit(claim_id, record.version, claim, vec![audit])
            .await?;
        info!(claim_id = %claim_id, "review escalated");
        Ok(committed)
    }
}
