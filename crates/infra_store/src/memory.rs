//! In-memory claim store
//!
//! Backs the engine with a single mutex over the claim table. Holding the
//! mutex across each operation makes `commit` and `compare_and_swap_lock`
//! atomic by construction, which is exactly the contract the port asks
//! for. Suitable for tests and single-node deployments.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use claims_engine::store::{ClaimRecord, ClaimStore, StoreError};
use core_kernel::ClaimId;
use domain_claims::{Claim, ClaimLock, NewTransaction, TransactionRecord};

#[derive(Debug)]
struct StoredClaim {
    claim: Claim,
    lock: Option<ClaimLock>,
    version: u64,
    transactions: Vec<TransactionRecord>,
    next_seq: u64,
}

impl StoredClaim {
    fn record(&self) -> ClaimRecord {
        ClaimRecord {
            claim: self.claim.clone(),
            lock: self.lock.clone(),
            version: self.version,
        }
    }

    fn append(&mut self, audit: NewTransaction) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.transactions.push(audit.into_record(seq));
    }
}

/// Claim store held entirely in process memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryClaimStore {
    claims: Arc<Mutex<HashMap<ClaimId, StoredClaim>>>,
}

impl InMemoryClaimStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClaimStore for InMemoryClaimStore {
    async fn insert(
        &self,
        claim: Claim,
        audit: NewTransaction,
    ) -> Result<ClaimRecord, StoreError> {
        let mut claims = self.claims.lock().await;
        let mut stored = StoredClaim {
            claim,
            lock: None,
            version: 1,
            transactions: Vec::new(),
            next_seq: 1,
        };
        stored.append(audit);
        let record = stored.record();
        claims.insert(record.claim.id, stored);
        debug!(claim_id = %record.claim.id, "claim inserted");
        Ok(record)
    }

    async fn get(&self, claim_id: ClaimId) -> Result<ClaimRecord, StoreError> {
        let claims = self.claims.lock().await;
        claims
            .get(&claim_id)
            .map(StoredClaim::record)
            .ok_or(StoreError::NotFound(claim_id))
    }

    async fn list(&self) -> Result<Vec<ClaimRecord>, StoreError> {
        let claims = self.claims.lock().await;
        let mut records: Vec<ClaimRecord> = claims.values().map(StoredClaim::record).collect();
        records.sort_by(|a, b| a.claim.created_at.cmp(&b.claim.created_at));
        Ok(records)
    }

    async fn commit(
        &self,
        claim_id: ClaimId,
        expected_version: u64,
        claim: Claim,
        audit: Vec<NewTransaction>,
    ) -> Result<ClaimRecord, StoreError> {
        let mut claims = self.claims.lock().await;
        let stored = claims
            .get_mut(&claim_id)
            .ok_or(StoreError::NotFound(claim_id))?;

        if stored.version != expected_version {
            return Err(StoreError::VersionConflict {
                claim_id,
                expected: expected_version,
                found: stored.version,
            });
        }

        stored.claim = claim;
        stored.version += 1;
        for entry in audit {
            stored.append(entry);
        }
        Ok(stored.record())
    }

    async fn compare_and_swap_lock(
        &self,
        claim_id: ClaimId,
        expected: Option<ClaimLock>,
        next: Option<ClaimLock>,
    ) -> Result<(), StoreError> {
        let mut claims = self.claims.lock().await;
        let stored = claims
            .get_mut(&claim_id)
            .ok_or(StoreError::NotFound(claim_id))?;

        if stored.lock != expected {
            return Err(StoreError::LockCasFailed {
                claim_id,
                current: stored.lock.clone(),
            });
        }
        stored.lock = next;
        Ok(())
    }

    async fn transactions(
        &self,
        claim_id: ClaimId,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<TransactionRecord>, StoreError> {
        let claims = self.claims.lock().await;
        let stored = claims
            .get(&claim_id)
            .ok_or(StoreError::NotFound(claim_id))?;
        Ok(stored
            .transactions
            .iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use core_kernel::{Actor, Currency, Money, ProcessorTier};
    use domain_claims::{ClaimSubmission, ProcessorOptions, TransactionType};
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn new_claim() -> Claim {
        Claim::submit(
            ClaimSubmission {
                hospital_id: "HOSP-1".to_string(),
                hospital_name: "City Care".to_string(),
                patient_name: "R. Iyer".to_string(),
                payer_name: "Acme Health".to_string(),
                claimed_amount: Money::new(dec!(50000), Currency::INR),
                total_bill_amount: Money::new(dec!(60000), Currency::INR),
                processor_options: ProcessorOptions::default(),
            },
            Actor::hospital("u-1", "Desk"),
            Utc::now(),
        )
    }

    fn created_audit(claim: &Claim) -> NewTransaction {
        NewTransaction {
            claim_id: claim.id,
            transaction_type: TransactionType::Created,
            performed_by: claim.submitted_by.clone(),
            previous_status: "none".to_string(),
            new_status: claim.status.to_string(),
            remarks: None,
            metadata: json!({}),
            performed_at: claim.created_at,
        }
    }

    #[tokio::test]
    async fn test_insert_starts_at_version_one_with_created_entry() {
        let store = InMemoryClaimStore::new();
        let claim = new_claim();
        let audit = created_audit(&claim);

        let record = store.insert(claim, audit).await.unwrap();
        assert_eq!(record.version, 1);

        let page = store.transactions(record.claim.id, 0, 10).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].seq, 1);
        assert_eq!(page[0].transaction_type, TransactionType::Created);
    }

    #[tokio::test]
    async fn test_commit_checks_version_and_appends_seq() {
        let store = InMemoryClaimStore::new();
        let claim = new_claim();
        let id = claim.id;
        store.insert(claim.clone(), created_audit(&claim)).await.unwrap();

        let mut audit = created_audit(&claim);
        audit.transaction_type = TransactionType::Cleared;
        let record = store.commit(id, 1, claim.clone(), vec![audit]).await.unwrap();
        assert_eq!(record.version, 2);

        // stale version writes nothing
        let mut audit = created_audit(&claim);
        audit.transaction_type = TransactionType::Denied;
        let err = store.commit(id, 1, claim, vec![audit]).await.unwrap_err();
        assert!(matches!(err, StoreError::VersionConflict { found: 2, .. }));

        let page = store.transactions(id, 0, 10).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[1].seq, 2);
    }

    #[tokio::test]
    async fn test_lock_cas_is_full_value() {
        let store = InMemoryClaimStore::new();
        let claim = new_claim();
        let id = claim.id;
        store.insert(claim.clone(), created_audit(&claim)).await.unwrap();

        let now = Utc::now();
        let first = ClaimLock::acquire(
            Actor::processor("p-1", "One", ProcessorTier::L1),
            now,
            Duration::hours(1),
        );
        let second = ClaimLock::acquire(
            Actor::processor("p-2", "Two", ProcessorTier::L1),
            now,
            Duration::hours(1),
        );

        store
            .compare_and_swap_lock(id, None, Some(first.clone()))
            .await
            .unwrap();

        // a second swap expecting None reports the actual holder
        let err = store
            .compare_and_swap_lock(id, None, Some(second))
            .await
            .unwrap_err();
        match err {
            StoreError::LockCasFailed { current, .. } => {
                assert_eq!(current, Some(first));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_transactions_page_by_offset_and_limit() {
        let store = InMemoryClaimStore::new();
        let claim = new_claim();
        let id = claim.id;
        store.insert(claim.clone(), created_audit(&claim)).await.unwrap();

        for version in 1..=4 {
            store
                .commit(id, version, claim.clone(), vec![created_audit(&claim)])
                .await
                .unwrap();
        }

        let page = store.transactions(id, 2, 2).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].seq, 3);
        assert_eq!(page[1].seq, 4);
    }
}
