//! RM settlement track
//!
//! Relationship managers record payer-side settlement progress against a
//! claim. Like review, this runs beside the primary machine without the
//! processor lock, and the history is append-only.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;

use core_kernel::{Actor, ActorRole, SettlementId};

use crate::claim::Claim;
use crate::error::ClaimError;
use crate::transaction::TransactionType;

/// RM-reported settlement status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RmStatus {
    #[serde(rename = "RECEIVED")]
    Received,
    #[serde(rename = "QUERY RAISED")]
    QueryRaised,
    #[serde(rename = "REPUDIATED")]
    Repudiated,
    #[serde(rename = "SETTLED")]
    Settled,
    #[serde(rename = "APPROVED")]
    Approved,
    #[serde(rename = "PARTIALLY SETTLED")]
    PartiallySettled,
    #[serde(rename = "RECONCILIATION")]
    Reconciliation,
    #[serde(rename = "INPROGRESS")]
    InProgress,
    #[serde(rename = "CANCELLED")]
    Cancelled,
    #[serde(rename = "CLOSED")]
    Closed,
    #[serde(rename = "NOT FOUND")]
    NotFound,
}

impl RmStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RmStatus::Received => "RECEIVED",
            RmStatus::QueryRaised => "QUERY RAISED",
            RmStatus::Repudiated => "REPUDIATED",
            RmStatus::Settled => "SETTLED",
            RmStatus::Approved => "APPROVED",
            RmStatus::PartiallySettled => "PARTIALLY SETTLED",
            RmStatus::Reconciliation => "RECONCILIATION",
            RmStatus::InProgress => "INPROGRESS",
            RmStatus::Cancelled => "CANCELLED",
            RmStatus::Closed => "CLOSED",
            RmStatus::NotFound => "NOT FOUND",
        }
    }

    /// Statuses that represent money movement and need settlement fields
    pub fn requires_settlement_detail(&self) -> bool {
        matches!(
            self,
            RmStatus::Settled | RmStatus::PartiallySettled | RmStatus::Reconciliation
        )
    }
}

impl fmt::Display for RmStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment particulars attached to a settlement update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettlementDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claim_settlement_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utr_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settled_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tds_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disallowed_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_amount: Option<Decimal>,
}

/// One immutable entry in the settlement history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementRecord {
    pub id: SettlementId,
    pub recorded_by: Actor,
    pub rm_status: RmStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<SettlementDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

/// Latest RM status plus append-only history and the re-evaluation flag
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettlementTrack {
    pub rm_status: Option<RmStatus>,
    pub history: Vec<SettlementRecord>,
    /// Set by `re_evaluate`, never cleared by status updates
    pub reevaluation_requested: bool,
}

/// What an accepted settlement call produced
#[derive(Debug, Clone)]
pub struct SettlementOutcome {
    pub transaction_type: TransactionType,
    pub metadata: serde_json::Value,
}

impl Claim {
    /// Records an RM status update. Money-movement statuses must carry a
    /// settlement date and payment mode; everything else in the detail
    /// block is persisted verbatim when present.
    pub fn apply_settlement_update(
        &mut self,
        actor: &Actor,
        rm_status: RmStatus,
        detail: Option<SettlementDetail>,
        remarks: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<SettlementOutcome, ClaimError> {
        if actor.role != ActorRole::Rm {
            return Err(ClaimError::InvalidTransition {
                from: self.settlement_status_label(),
                to: rm_status.to_string(),
                role: actor.role.to_string(),
            });
        }

        if rm_status.requires_settlement_detail() {
            let detail = detail
                .as_ref()
                .ok_or_else(|| ClaimError::missing_field("claim_settlement_date"))?;
            if detail.claim_settlement_date.is_none() {
                return Err(ClaimError::missing_field("claim_settlement_date"));
            }
            if detail.payment_mode.as_deref().map_or(true, |m| m.trim().is_empty()) {
                return Err(ClaimError::missing_field("payment_mode"));
            }
        }

        let record = SettlementRecord {
            id: SettlementId::new_v7(),
            recorded_by: actor.clone(),
            rm_status,
            detail: detail.clone(),
            remarks,
            recorded_at: now,
        };

        self.settlement.rm_status = Some(rm_status);
        self.settlement.history.push(record);
        self.updated_at = now;

        Ok(SettlementOutcome {
            transaction_type: TransactionType::Updated,
            metadata: json!({ "rm_status": rm_status.as_str(), "detail": detail }),
        })
    }

    /// Flags the claim for re-evaluation. `rm_status` is left alone; the
    /// request shows up as the flag plus an audit entry.
    pub fn apply_settlement_reevaluation(
        &mut self,
        actor: &Actor,
        remarks: &str,
        now: DateTime<Utc>,
    ) -> Result<SettlementOutcome, ClaimError> {
        if actor.role != ActorRole::Rm {
            return Err(ClaimError::InvalidTransition {
                from: self.settlement_status_label(),
                to: "reevaluation".to_string(),
                role: actor.role.to_string(),
            });
        }
        if remarks.trim().is_empty() {
            return Err(ClaimError::missing_field("remarks"));
        }

        self.settlement.reevaluation_requested = true;
        self.updated_at = now;

        Ok(SettlementOutcome {
            transaction_type: TransactionType::Reevaluated,
            metadata: json!({ "reevaluation_requested": true }),
        })
    }

    /// Wire label for the current RM status, `"NONE"` before the first
    /// update
    pub fn settlement_status_label(&self) -> String {
        self.settlement
            .rm_status
            .map(|s| s.as_str().to_string())
            .unwrap_or_else(|| "NONE".to_string())
    }
}
