//! Append-only audit records
//!
//! Every accepted state change produces exactly one transaction record.
//! Records are never updated or deleted; `seq` is assigned by the store,
//! strictly increasing per claim, and orders records even when wall-clock
//! timestamps collide.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{Actor, ClaimId, TransactionId};

/// What kind of change a transaction records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// Claim submitted by a hospital
    Created,
    /// Processor raised a QC query
    Queried,
    /// Hospital answered a QC query
    Answered,
    /// Processor requested more information
    InfoRequested,
    /// Hospital supplied the requested information
    InfoSupplied,
    /// Processor cleared the claim
    Cleared,
    /// Processor approved the claim
    Approved,
    /// Processor denied the claim
    Denied,
    /// Hospital contested a denial
    Contested,
    /// Hospital dispatched the cleared claim
    Dispatched,
    /// Reviewer recorded a terminal review decision
    Reviewed,
    /// Reviewer moved the review status without a terminal decision
    ReviewStatusUpdated,
    /// Review escalated past the reviewer
    Escalated,
    /// RM updated the settlement track
    Updated,
    /// RM flagged the claim for re-evaluation
    Reevaluated,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Created => "CREATED",
            TransactionType::Queried => "QUERIED",
            TransactionType::Answered => "ANSWERED",
            TransactionType::InfoRequested => "INFO_REQUESTED",
            TransactionType::InfoSupplied => "INFO_SUPPLIED",
            TransactionType::Cleared => "CLEARED",
            TransactionType::Approved => "APPROVED",
            TransactionType::Denied => "DENIED",
            TransactionType::Contested => "CONTESTED",
            TransactionType::Dispatched => "DISPATCHED",
            TransactionType::Reviewed => "REVIEWED",
            TransactionType::ReviewStatusUpdated => "REVIEW_STATUS_UPDATED",
            TransactionType::Escalated => "ESCALATED",
            TransactionType::Updated => "UPDATED",
            TransactionType::Reevaluated => "REEVALUATED",
        }
    }
}

/// A transaction as the engine hands it to the store, before `seq` exists
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub claim_id: ClaimId,
    pub transaction_type: TransactionType,
    pub performed_by: Actor,
    /// Status before the change, as wire text. Spans the claim, review and
    /// settlement tracks, so it stays a string rather than one enum.
    pub previous_status: String,
    /// Status after the change, as wire text
    pub new_status: String,
    pub remarks: Option<String>,
    pub metadata: serde_json::Value,
    pub performed_at: DateTime<Utc>,
}

impl NewTransaction {
    pub fn into_record(self, seq: u64) -> TransactionRecord {
        TransactionRecord {
            id: TransactionId::new_v7(),
            claim_id: self.claim_id,
            seq,
            transaction_type: self.transaction_type,
            performed_by: self.performed_by,
            previous_status: self.previous_status,
            new_status: self.new_status,
            remarks: self.remarks,
            metadata: self.metadata,
            performed_at: self.performed_at,
        }
    }
}

/// A persisted audit record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: TransactionId,
    pub claim_id: ClaimId,
    /// Strictly increasing per claim, assigned at commit
    pub seq: u64,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub performed_by: Actor,
    pub previous_status: String,
    pub new_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    pub metadata: serde_json::Value,
    pub performed_at: DateTime<Utc>,
}
