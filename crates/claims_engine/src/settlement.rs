//! Settlement workflow service

use std::sync::Arc;

use tracing::{info, instrument};

use core_kernel::{Actor, ClaimId, Clock};
use domain_claims::{NewTransaction, RmStatus, SettlementDetail};

use crate::error::EngineError;
use crate::store::{ClaimRecord, ClaimStore};

#[derive(Clone)]
pub struct SettlementWorkflow {
    store: Arc<dyn ClaimStore>,
    clock: Arc<dyn Clock>,
}

impl SettlementWorkflow {
    pub fn new(store: Arc<dyn ClaimStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Records an RM settlement status update
    #[instrument(skip(self, actor, detail, remarks), fields(actor_id = %actor.id, rm_status = %rm_status))]
    pub async fn update_status(
        &self,
        claim_id: ClaimId,
        actor: &Actor,
        rm_status: RmStatus,
        detail: Option<SettlementDetail>,
        remarks: Option<String>,
    ) -> Result<ClaimRecord, EngineError> {
        let record = self.store.get(claim_id).await?;
        let now = self.clock.now();

        let mut claim = record.claim.clone();
        let previous_status = claim.settlement_status_label();
        let outcome = claim.apply_settlement_update(actor, rm_status, detail, remarks.clone(), now)?;

        let audit = NewTransaction {
            claim_id,
            transaction_type: outcome.transaction_type,
            performed_by: actor.clone(),
            previous_status,
            new_status: rm_status.to_string(),
            remarks,
            metadata: outcome.metadata,
            performed_at: now,
        };

        let committed = self
            .store
            .commit(claim_id, record.version, claim, vec![audit])
            .await?;
        info!(claim_id = %claim_id, rm_status = %rm_status, "settlement updated");
        Ok(committed)
    }

    /// Flags the claim for re-evaluation without moving `rm_status`
    #[instrument(skip(self, actor, remarks), fields(actor_id = %actor.id))]
    pub async fn re_evaluate(
        &self,
        claim_id: ClaimId,
        actor: &Actor,
        remarks: &str,
    ) -> Result<ClaimRecord, EngineError> {
        let record = self.store.get(claim_id).await?;
        let now = self.clock.now();

        let mut claim = record.claim.clone();
        let status_label = claim.settlement_status_label();
        let outcome = claim.apply_settlement_reevaluation(actor, remarks, now)?;

        let audit = NewTransaction {
            claim_id,
            transaction_type: outcome.transaction_type,
            performed_by: actor.clone(),
            previous_status: status_label.clone(),
            new_status: status_label,
            remarks: Some(remarks.to_string()),
            metadata: outcome.metadata,
            performed_at: now,
        };

        let committed = self
            .store
            .commit(claim_id, record.version, claim, vec![audit])
            .await?;
        info!(claim_id = %claim_id, "re-evaluation requested");
        Ok(committed)
    }
}
