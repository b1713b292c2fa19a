//! Second-level review track
//!
//! Reviews run beside the primary claim machine and never touch the
//! processor lock. `review_status` is a projection of the latest record in
//! an append-only history; nothing here edits or removes earlier records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;

use core_kernel::{Actor, ActorRole, Money, ReviewId};

use crate::claim::Claim;
use crate::error::ClaimError;
use crate::transaction::TransactionType;

/// Where the review track stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReviewStatus {
    #[serde(rename = "REVIEW PENDING")]
    Pending,
    #[serde(rename = "UNDER REVIEW")]
    UnderReview,
    #[serde(rename = "REVIEW APPROVED")]
    Approved,
    #[serde(rename = "REVIEW REJECTED")]
    Rejected,
    #[serde(rename = "ADDITIONAL INFO NEEDED")]
    AdditionalInfoNeeded,
    #[serde(rename = "ESCALATED")]
    Escalated,
    #[serde(rename = "REVIEW COMPLETED")]
    Completed,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "REVIEW PENDING",
            ReviewStatus::UnderReview => "UNDER REVIEW",
            ReviewStatus::Approved => "REVIEW APPROVED",
            ReviewStatus::Rejected => "REVIEW REJECTED",
            ReviewStatus::AdditionalInfoNeeded => "ADDITIONAL INFO NEEDED",
            ReviewStatus::Escalated => "ESCALATED",
            ReviewStatus::Completed => "REVIEW COMPLETED",
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A reviewer's call on the claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum ReviewDecision {
    /// Full monetary review. `disallowed_amount` is derived (clamped at
    /// zero) when the reviewer omits it.
    Reviewed {
        total_bill_amount: Decimal,
        claimed_amount: Decimal,
        approved_amount: Decimal,
        #[serde(default)]
        disallowed_amount: Option<Decimal>,
    },
    /// Claim could not be located with the payer
    NotFound,
    Approve,
    Reject,
    RequestMoreInfo,
    MarkUnderReview,
}

impl ReviewDecision {
    pub fn label(&self) -> &'static str {
        match self {
            ReviewDecision::Reviewed { .. } => "reviewed",
            ReviewDecision::NotFound => "not_found",
            ReviewDecision::Approve => "approve",
            ReviewDecision::Reject => "reject",
            ReviewDecision::RequestMoreInfo => "request_more_info",
            ReviewDecision::MarkUnderReview => "mark_under_review",
        }
    }

    /// The review status this decision projects to
    pub fn projected_status(&self) -> ReviewStatus {
        match self {
            ReviewDecision::Reviewed { .. } => ReviewStatus::Completed,
            ReviewDecision::NotFound => ReviewStatus::Rejected,
            ReviewDecision::Approve => ReviewStatus::Approved,
            ReviewDecision::Reject => ReviewStatus::Rejected,
            ReviewDecision::RequestMoreInfo => ReviewStatus::AdditionalInfoNeeded,
            ReviewDecision::MarkUnderReview => ReviewStatus::UnderReview,
        }
    }

    fn is_terminal(&self) -> bool {
        matches!(
            self.projected_status(),
            ReviewStatus::Completed | ReviewStatus::Approved | ReviewStatus::Rejected
        )
    }
}

/// Monetary snapshot captured by a `Reviewed` decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewAmounts {
    pub total_bill_amount: Money,
    pub claimed_amount: Money,
    pub approved_amount: Money,
    pub disallowed_amount: Money,
}

/// Escalation details attached to a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscalationDetail {
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

/// One immutable entry in the review history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub id: ReviewId,
    pub reviewer: Actor,
    pub decision: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amounts: Option<ReviewAmounts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub escalation: Option<EscalationDetail>,
    pub reviewed_at: DateTime<Utc>,
}

/// Status projection plus append-only history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewTrack {
    pub review_status: ReviewStatus,
    pub history: Vec<ReviewRecord>,
}

impl Default for ReviewTrack {
    fn default() -> Self {
        Self {
            review_status: ReviewStatus::Pending,
            history: Vec::new(),
        }
    }
}

/// What an accepted review call produced
#[derive(Debug, Clone)]
pub struct ReviewOutcome {
    pub transaction_type: TransactionType,
    pub metadata: serde_json::Value,
}

impl Claim {
    /// Records a review decision, appending to the history and moving the
    /// status projection. On error nothing changes.
    pub fn apply_review_decision(
        &mut self,
        reviewer: &Actor,
        decision: &ReviewDecision,
        remarks: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<ReviewOutcome, ClaimError> {
        if reviewer.role != ActorRole::Reviewer {
            return Err(ClaimError::InvalidTransition {
                from: self.review.review_status.to_string(),
                to: decision.projected_status().to_string(),
                role: reviewer.role.to_string(),
            });
        }

        let amounts = match decision {
            ReviewDecision::Reviewed {
                total_bill_amount,
                claimed_amount,
                approved_amount,
                disallowed_amount,
            } => {
                let currency = self.claimed_amount.currency();
                let total = Money::new(*total_bill_amount, currency);
                let approved = Money::new(*approved_amount, currency);
                let disallowed = match disallowed_amount {
                    Some(amount) => Money::new(*amount, currency),
                    None => total
                        .clamped_sub(&approved)
                        .map_err(|e| ClaimError::validation(e.to_string()))?,
                };
                Some(ReviewAmounts {
                    total_bill_amount: total,
                    claimed_amount: Money::new(*claimed_amount, currency),
                    approved_amount: approved,
                    disallowed_amount: disallowed,
                })
            }
            ReviewDecision::NotFound => {
                if remarks.as_deref().map_or(true, |r| r.trim().is_empty()) {
                    return Err(ClaimError::missing_field("remarks"));
                }
                None
            }
            _ => None,
        };

        let record = ReviewRecord {
            id: ReviewId::new_v7(),
            reviewer: reviewer.clone(),
            decision: decision.label().to_string(),
            amounts: amounts.clone(),
            remarks,
            escalation: None,
            reviewed_at: now,
        };

        self.review.review_status = decision.projected_status();
        self.review.history.push(record);
        self.updated_at = now;

        let transaction_type = if decision.is_terminal() {
            TransactionType::Reviewed
        } else {
            TransactionType::ReviewStatusUpdated
        };

        Ok(ReviewOutcome {
            transaction_type,
            metadata: json!({
                "decision": decision.label(),
                "amounts": amounts,
            }),
        })
    }

    /// Escalates the review past the reviewer. Additive: prior history is
    /// untouched and the claim machine does not move.
    pub fn apply_review_escalation(
        &mut self,
        reviewer: &Actor,
        reason: &str,
        target: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<ReviewOutcome, ClaimError> {
        if reviewer.role != ActorRole::Reviewer {
            return Err(ClaimError::InvalidTransition {
                from: self.review.review_status.to_string(),
                to: ReviewStatus::Escalated.to_string(),
                role: reviewer.role.to_string(),
            });
        }
        if reason.trim().is_empty() {
            return Err(ClaimError::missing_field("reason"));
        }

        let record = ReviewRecord {
            id: ReviewId::new_v7(),
            reviewer: reviewer.clone(),
            decision: "escalate".to_string(),
            amounts: None,
            remarks: None,
            escalation: Some(EscalationDetail {
                reason: reason.to_string(),
                target: target.clone(),
            }),
            reviewed_at: now,
        };

        self.review.review_status = ReviewStatus::Escalated;
        self.review.history.push(record);
        self.updated_at = now;

        Ok(ReviewOutcome {
            transaction_type: TransactionType::Escalated,
            metadata: json!({ "reason": reason, "target": target }),
        })
    }
}
