//! Claim aggregate

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{Actor, ClaimId, Money};

use crate::lifecycle::DispatchMode;
use crate::review::ReviewTrack;
use crate::settlement::SettlementTrack;

/// Claim status - the primary lifecycle machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStatus {
    /// Awaiting first QC pass by a processor
    QcPending,
    /// Processor raised a query back to the hospital
    QcQuery,
    /// Hospital answered the query; re-evaluated like pending
    QcAnswered,
    /// Cleared by QC; hospital may dispatch
    QcClear,
    /// Processor needs more information from the hospital
    NeedMoreInfo,
    /// Approved by a processor
    ClaimApproved,
    /// Denied by a processor; hospital may contest
    ClaimDenial,
    /// Hospital contested a denial; re-evaluated like pending
    ClaimContested,
    /// Dispatched to the payer by the hospital
    Dispatched,
    /// Closed outside the processor track; terminal, no producing edge here
    Rejected,
}

impl ClaimStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::QcPending => "qc_pending",
            ClaimStatus::QcQuery => "qc_query",
            ClaimStatus::QcAnswered => "qc_answered",
            ClaimStatus::QcClear => "qc_clear",
            ClaimStatus::NeedMoreInfo => "need_more_info",
            ClaimStatus::ClaimApproved => "claim_approved",
            ClaimStatus::ClaimDenial => "claim_denial",
            ClaimStatus::ClaimContested => "claim_contested",
            ClaimStatus::Dispatched => "dispatched",
            ClaimStatus::Rejected => "rejected",
        }
    }

    /// Statuses a processor may pick up for evaluation
    pub fn is_processor_workable(&self) -> bool {
        matches!(
            self,
            ClaimStatus::QcPending | ClaimStatus::QcAnswered | ClaimStatus::ClaimContested
        )
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which processor decisions are enabled for this claim, fixed at submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessorOptions {
    pub need_more_info: bool,
    pub claim_approved: bool,
    pub claim_denial: bool,
}

impl Default for ProcessorOptions {
    fn default() -> Self {
        Self {
            need_more_info: true,
            claim_approved: true,
            claim_denial: true,
        }
    }
}

impl ProcessorOptions {
    /// Returns true if this claim permits the processor-requested status.
    /// `qc_clear` and `qc_query` are always available.
    pub fn permits(&self, status: ClaimStatus) -> bool {
        match status {
            ClaimStatus::QcClear | ClaimStatus::QcQuery => true,
            ClaimStatus::NeedMoreInfo => self.need_more_info,
            ClaimStatus::ClaimApproved => self.claim_approved,
            ClaimStatus::ClaimDenial => self.claim_denial,
            _ => false,
        }
    }
}

/// Most recent QC query raised by a processor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QcQueryDetail {
    pub issue_categories: Vec<String>,
    pub repeat_issue: bool,
    pub action_required: String,
    pub raised_at: DateTime<Utc>,
}

/// Dispatch information recorded by the hospital
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchDetail {
    pub mode: DispatchMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dispatch_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    pub dispatched_at: DateTime<Utc>,
}

/// Data supplied by a hospital when submitting a claim
#[derive(Debug, Clone)]
pub struct ClaimSubmission {
    pub hospital_id: String,
    pub hospital_name: String,
    pub patient_name: String,
    pub payer_name: String,
    pub claimed_amount: Money,
    pub total_bill_amount: Money,
    pub processor_options: ProcessorOptions,
}

/// The claim aggregate root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claim {
    /// Unique identifier
    pub id: ClaimId,
    /// Human-facing claim reference
    pub claim_number: String,
    /// Submitting hospital
    pub hospital_id: String,
    pub hospital_name: String,
    /// Submission context carried for inbox views
    pub patient_name: String,
    pub payer_name: String,
    /// Primary lifecycle status; mutated only through the lifecycle service
    pub status: ClaimStatus,
    /// Amount claimed from the payer
    pub claimed_amount: Money,
    /// Total billed amount
    pub total_bill_amount: Money,
    /// Amount approved by a processor decision, if any
    pub approved_amount: Option<Money>,
    /// Always recomputed as max(0, total_bill - approved); never client-supplied
    pub disallowed_amount: Option<Money>,
    /// Decision toggles fixed at submission
    pub processor_options: ProcessorOptions,
    /// Most recent QC query, if any
    pub qc_query: Option<QcQueryDetail>,
    /// Dispatch details once dispatched
    pub dispatch: Option<DispatchDetail>,
    /// Second-level review track (independent of `status`)
    pub review: ReviewTrack,
    /// RM settlement track (independent of `status`)
    pub settlement: SettlementTrack,
    /// Hospital user who submitted the claim
    pub submitted_by: Actor,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Claim {
    /// Creates a newly submitted claim in `qc_pending`
    pub fn submit(submission: ClaimSubmission, submitted_by: Actor, now: DateTime<Utc>) -> Self {
        let id = ClaimId::new_v7();

        Self {
            id,
            claim_number: generate_claim_number(&id, now),
            hospital_id: submission.hospital_id,
            hospital_name: submission.hospital_name,
            patient_name: submission.patient_name,
            payer_name: submission.payer_name,
            status: ClaimStatus::QcPending,
            claimed_amount: submission.claimed_amount,
            total_bill_amount: submission.total_bill_amount,
            approved_amount: None,
            disallowed_amount: None,
            processor_options: submission.processor_options,
            qc_query: None,
            dispatch: None,
            review: ReviewTrack::default(),
            settlement: SettlementTrack::default(),
            submitted_by,
            created_at: now,
            updated_at: now,
        }
    }
}

fn generate_claim_number(id: &ClaimId, now: DateTime<Utc>) -> String {
    let tail = id.as_uuid().as_fields().0 % 10_000_000;
    format!("CLM-{}-{:07}", now.format("%Y"), tail)
}
