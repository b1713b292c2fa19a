//! Claim DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use claims_engine::{ClaimRecord, ProcessorInbox};
use core_kernel::{Currency, Money};
use domain_claims::{
    Claim, ClaimLock, ClaimSubmission, DispatchDetail, ProcessorOptions, QcQueryDetail,
    ReviewTrack, SettlementTrack, TransactionRecord,
};

use crate::error::ApiError;

#[derive(Debug, Deserialize, Validate)]
pub struct SubmitClaimRequest {
    #[validate(length(min = 1))]
    pub hospital_id: String,
    #[validate(length(min = 1))]
    pub hospital_name: String,
    #[validate(length(min = 1))]
    pub patient_name: String,
    #[validate(length(min = 1))]
    pub payer_name: String,
    pub claimed_amount: Decimal,
    pub total_bill_amount: Decimal,
    #[serde(default)]
    pub currency: Option<Currency>,
    #[serde(default)]
    pub processor_options: Option<ProcessorOptions>,
}

impl SubmitClaimRequest {
    pub fn into_submission(self) -> Result<ClaimSubmission, ApiError> {
        self.validate()?;
        if self.claimed_amount.is_sign_negative() || self.total_bill_amount.is_sign_negative() {
            return Err(ApiError::Validation(
                "Claim amounts must not be negative".to_string(),
            ));
        }

        let currency = self.currency.unwrap_or(Currency::INR);
        Ok(ClaimSubmission {
            hospital_id: self.hospital_id,
            hospital_name: self.hospital_name,
            patient_name: self.patient_name,
            payer_name: self.payer_name,
            claimed_amount: Money::new(self.claimed_amount, currency),
            total_bill_amount: Money::new(self.total_bill_amount, currency),
            processor_options: self.processor_options.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct LockView {
    pub holder_id: String,
    pub holder_name: String,
    pub acquired_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl From<&ClaimLock> for LockView {
    fn from(lock: &ClaimLock) -> Self {
        Self {
            holder_id: lock.holder.id.clone(),
            holder_name: lock.holder.name.clone(),
            acquired_at: lock.acquired_at,
            expires_at: lock.expires_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClaimResponse {
    pub id: Uuid,
    pub claim_number: String,
    pub hospital_id: String,
    pub hospital_name: String,
    pub patient_name: String,
    pub payer_name: String,
    pub status: String,
    pub claimed_amount: Decimal,
    pub total_bill_amount: Decimal,
    pub currency: Currency,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disallowed_amount: Option<Decimal>,
    pub processor_options: ProcessorOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qc_query: Option<QcQueryDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dispatch: Option<DispatchDetail>,
    pub review: ReviewTrack,
    pub settlement: SettlementTrack,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lock: Option<LockView>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ClaimResponse {
    pub fn from_record(record: &ClaimRecord) -> Self {
        let claim: &Claim = &record.claim;
        Self {
            id: *claim.id.as_uuid(),
            claim_number: claim.claim_number.clone(),
            hospital_id: claim.hospital_id.clone(),
            hospital_name: claim.hospital_name.clone(),
            patient_name: claim.patient_name.clone(),
            payer_name: claim.payer_name.clone(),
            status: claim.status.to_string(),
            claimed_amount: claim.claimed_amount.amount(),
            total_bill_amount: claim.total_bill_amount.amount(),
            currency: claim.claimed_amount.currency(),
            approved_amount: claim.approved_amount.map(|m| m.amount()),
            disallowed_amount: claim.disallowed_amount.map(|m| m.amount()),
            processor_options: claim.processor_options,
            qc_query: claim.qc_query.clone(),
            dispatch: claim.dispatch.clone(),
            review: claim.review.clone(),
            settlement: claim.settlement.clone(),
            lock: record.lock.as_ref().map(LockView::from),
            created_at: claim.created_at,
            updated_at: claim.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClaimListResponse {
    pub claims: Vec<ClaimResponse>,
}

#[derive(Debug, Serialize)]
pub struct ProcessorInboxResponse {
    pub unprocessed: Vec<ClaimResponse>,
    pub processed: Vec<ClaimResponse>,
}

impl ProcessorInboxResponse {
    pub fn from_inbox(inbox: &ProcessorInbox) -> Self {
        Self {
            unprocessed: inbox.unprocessed.iter().map(ClaimResponse::from_record).collect(),
            processed: inbox.processed.iter().map(ClaimResponse::from_record).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    pub id: Uuid,
    pub seq: u64,
    #[serde(rename = "type")]
    pub transaction_type: String,
    pub performed_by_id: String,
    pub performed_by_name: String,
    pub performed_by_role: String,
    pub previous_status: String,
    pub new_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    pub metadata: serde_json::Value,
    pub performed_at: DateTime<Utc>,
}

impl From<&TransactionRecord> for TransactionResponse {
    fn from(record: &TransactionRecord) -> Self {
        Self {
            id: *record.id.as_uuid(),
            seq: record.seq,
            transaction_type: record.transaction_type.as_str().to_string(),
            performed_by_id: record.performed_by.id.clone(),
            performed_by_name: record.performed_by.name.clone(),
            performed_by_role: record.performed_by.role.to_string(),
            previous_status: record.previous_status.clone(),
            new_status: record.new_status.clone(),
            remarks: record.remarks.clone(),
            metadata: record.metadata.clone(),
            performed_at: record.performed_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TransactionPageResponse {
    pub transactions: Vec<TransactionResponse>,
    pub offset: usize,
    pub limit: usize,
}

#[derive(Debug, Deserialize)]
pub struct TransactionPageQuery {
    #[serde(default)]
    pub offset: usize,
    #[serde(default = "default_page_limit")]
    pub limit: usize,
}

fn default_page_limit() -> usize {
    50
}
