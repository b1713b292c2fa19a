//! Status transitions for the primary claim machine
//!
//! The transition table is closed: every `(role, from, to)` edge is written
//! out here, and everything else is an [`ClaimError::InvalidTransition`].
//! Payloads arrive as a tagged enum keyed by the requested status, so a
//! request can never claim one status and carry another status's fields.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;

use core_kernel::{Actor, ActorRole, Money};

use crate::claim::{Claim, ClaimStatus, DispatchDetail, QcQueryDetail};
use crate::error::ClaimError;
use crate::transaction::TransactionType;

/// How a cleared claim was dispatched to the payer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DispatchMode {
    Online {
        acknowledgment_number: String,
    },
    Courier {
        courier_name: String,
        docket_number: String,
    },
    Direct {
        contact_person_name: String,
        contact_person_phone: String,
    },
}

impl DispatchMode {
    pub fn label(&self) -> &'static str {
        match self {
            DispatchMode::Online { .. } => "online",
            DispatchMode::Courier { .. } => "courier",
            DispatchMode::Direct { .. } => "direct",
        }
    }

    fn validate(&self) -> Result<(), ClaimError> {
        match self {
            DispatchMode::Online {
                acknowledgment_number,
            } => require_text(acknowledgment_number, "acknowledgment_number"),
            DispatchMode::Courier {
                courier_name,
                docket_number,
            } => {
                require_text(courier_name, "courier_name")?;
                require_text(docket_number, "docket_number")
            }
            DispatchMode::Direct {
                contact_person_name,
                contact_person_phone,
            } => {
                require_text(contact_person_name, "contact_person_name")?;
                require_text(contact_person_phone, "contact_person_phone")
            }
        }
    }
}

/// A requested status change with its status-specific payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TransitionRequest {
    /// Processor: claim passes QC
    QcClear {
        #[serde(default)]
        remarks: Option<String>,
    },
    /// Processor: raise a query back to the hospital
    QcQuery {
        issue_categories: Vec<String>,
        repeat_issue: bool,
        action_required: String,
        #[serde(default)]
        remarks: Option<String>,
    },
    /// Processor: request more information
    NeedMoreInfo {
        #[serde(default)]
        remarks: Option<String>,
    },
    /// Processor: approve the claim
    ClaimApproved {
        #[serde(default)]
        approved_amount: Option<Decimal>,
        #[serde(default)]
        remarks: Option<String>,
    },
    /// Processor: deny the claim
    ClaimDenial {
        #[serde(default)]
        remarks: Option<String>,
    },
    /// Hospital: answer an open QC query
    QcAnswered { response: String },
    /// Hospital: supply the requested information
    QcPending {
        #[serde(default)]
        remarks: Option<String>,
    },
    /// Hospital: contest a denial
    ClaimContested { remarks: String },
    /// Hospital: dispatch a cleared claim
    Dispatched {
        #[serde(flatten)]
        mode: DispatchMode,
        #[serde(default)]
        dispatch_date: Option<NaiveDate>,
        #[serde(default)]
        remarks: Option<String>,
    },
}

impl TransitionRequest {
    /// The status this request is asking for
    pub fn target_status(&self) -> ClaimStatus {
        match self {
            TransitionRequest::QcClear { .. } => ClaimStatus::QcClear,
            TransitionRequest::QcQuery { .. } => ClaimStatus::QcQuery,
            TransitionRequest::NeedMoreInfo { .. } => ClaimStatus::NeedMoreInfo,
            TransitionRequest::ClaimApproved { .. } => ClaimStatus::ClaimApproved,
            TransitionRequest::ClaimDenial { .. } => ClaimStatus::ClaimDenial,
            TransitionRequest::QcAnswered { .. } => ClaimStatus::QcAnswered,
            TransitionRequest::QcPending { .. } => ClaimStatus::QcPending,
            TransitionRequest::ClaimContested { .. } => ClaimStatus::ClaimContested,
            TransitionRequest::Dispatched { .. } => ClaimStatus::Dispatched,
        }
    }

    /// The role allowed to make this request
    pub fn required_role(&self) -> ActorRole {
        match self {
            TransitionRequest::QcClear { .. }
            | TransitionRequest::QcQuery { .. }
            | TransitionRequest::NeedMoreInfo { .. }
            | TransitionRequest::ClaimApproved { .. }
            | TransitionRequest::ClaimDenial { .. } => ActorRole::Processor,
            TransitionRequest::QcAnswered { .. }
            | TransitionRequest::QcPending { .. }
            | TransitionRequest::ClaimContested { .. }
            | TransitionRequest::Dispatched { .. } => ActorRole::Hospital,
        }
    }

    /// Free-form remarks carried by the request, if any
    pub fn remarks(&self) -> Option<&str> {
        match self {
            TransitionRequest::QcClear { remarks }
            | TransitionRequest::QcQuery { remarks, .. }
            | TransitionRequest::NeedMoreInfo { remarks }
            | TransitionRequest::ClaimApproved { remarks, .. }
            | TransitionRequest::ClaimDenial { remarks }
            | TransitionRequest::QcPending { remarks }
            | TransitionRequest::Dispatched { remarks, .. } => remarks.as_deref(),
            TransitionRequest::QcAnswered { response } => Some(response.as_str()),
            TransitionRequest::ClaimContested { remarks } => Some(remarks.as_str()),
        }
    }

    fn validate(&self) -> Result<(), ClaimError> {
        match self {
            TransitionRequest::QcQuery {
                issue_categories,
                action_required,
                ..
            } => {
                if issue_categories.is_empty()
                    || issue_categories.iter().all(|c| c.trim().is_empty())
                {
                    return Err(ClaimError::missing_field("issue_categories"));
                }
                require_text(action_required, "action_required")
            }
            TransitionRequest::QcAnswered { response } => require_text(response, "response"),
            TransitionRequest::ClaimContested { remarks } => require_text(remarks, "remarks"),
            TransitionRequest::Dispatched { mode, .. } => mode.validate(),
            _ => Ok(()),
        }
    }
}

/// What a successfully applied transition produced
#[derive(Debug, Clone)]
pub struct TransitionOutcome {
    pub transaction_type: TransactionType,
    pub metadata: serde_json::Value,
    /// True for transitions that end the processor's iteration on this claim
    pub clears_lock: bool,
}

/// Returns true if the edge `(role, from, to)` is in the closed table.
///
/// Processor-option gating and payload validation are separate concerns;
/// this answers reachability only.
pub fn is_permitted(role: ActorRole, from: ClaimStatus, to: ClaimStatus) -> bool {
    use ClaimStatus::*;
    match role {
        ActorRole::Processor => {
            from.is_processor_workable()
                && matches!(to, QcClear | QcQuery | NeedMoreInfo | ClaimApproved | ClaimDenial)
        }
        ActorRole::Hospital => matches!(
            (from, to),
            (QcQuery, QcAnswered)
                | (NeedMoreInfo, QcPending)
                | (ClaimDenial, ClaimContested)
                | (QcClear, Dispatched)
        ),
        ActorRole::Reviewer | ActorRole::Rm => false,
    }
}

impl Claim {
    /// Validates and applies a transition, mutating the claim in place.
    ///
    /// Lock possession and admission are checked by the lifecycle service
    /// before this is called; everything status-machine-shaped lives here.
    /// On error the claim is untouched.
    pub fn apply_transition(
        &mut self,
        actor: &Actor,
        request: &TransitionRequest,
        now: DateTime<Utc>,
    ) -> Result<TransitionOutcome, ClaimError> {
        let target = request.target_status();

        if actor.role != request.required_role() || !is_permitted(actor.role, self.status, target) {
            return Err(ClaimError::InvalidTransition {
                from: self.status.to_string(),
                to: target.to_string(),
                role: actor.role.to_string(),
            });
        }

        if actor.role == ActorRole::Processor && !self.processor_options.permits(target) {
            return Err(ClaimError::InvalidTransition {
                from: self.status.to_string(),
                to: target.to_string(),
                role: actor.role.to_string(),
            });
        }

        request.validate()?;

        let outcome = match request {
            TransitionRequest::QcClear { .. } => TransitionOutcome {
                transaction_type: TransactionType::Cleared,
                metadata: json!({}),
                clears_lock: true,
            },
            TransitionRequest::QcQuery {
                issue_categories,
                repeat_issue,
                action_required,
                ..
            } => {
                self.qc_query = Some(QcQueryDetail {
                    issue_categories: issue_categories.clone(),
                    repeat_issue: *repeat_issue,
                    action_required: action_required.clone(),
                    raised_at: now,
                });
                TransitionOutcome {
                    transaction_type: TransactionType::Queried,
                    metadata: json!({
                        "issue_categories": issue_categories,
                        "repeat_issue": repeat_issue,
                        "action_required": action_required,
                    }),
                    clears_lock: false,
                }
            }
            TransitionRequest::NeedMoreInfo { .. } => TransitionOutcome {
                transaction_type: TransactionType::InfoRequested,
                metadata: json!({}),
                clears_lock: false,
            },
            TransitionRequest::ClaimApproved {
                approved_amount, ..
            } => {
                let approved = match approved_amount {
                    Some(amount) => Money::new(*amount, self.claimed_amount.currency()),
                    None => self.claimed_amount,
                };
                let disallowed = self
                    .total_bill_amount
                    .clamped_sub(&approved)
                    .map_err(|e| ClaimError::validation(e.to_string()))?;

                self.approved_amount = Some(approved);
                self.disallowed_amount = Some(disallowed);

                TransitionOutcome {
                    transaction_type: TransactionType::Approved,
                    metadata: json!({
                        "approved_amount": approved.amount(),
                        "disallowed_amount": disallowed.amount(),
                    }),
                    clears_lock: true,
                }
            }
            TransitionRequest::ClaimDenial { .. } => TransitionOutcome {
                transaction_type: TransactionType::Denied,
                metadata: json!({}),
                clears_lock: true,
            },
            TransitionRequest::QcAnswered { response } => TransitionOutcome {
                transaction_type: TransactionType::Answered,
                metadata: json!({ "response": response }),
                clears_lock: false,
            },
            TransitionRequest::QcPending { .. } => TransitionOutcome {
                transaction_type: TransactionType::InfoSupplied,
                metadata: json!({}),
                clears_lock: false,
            },
            TransitionRequest::ClaimContested { remarks } => TransitionOutcome {
                transaction_type: TransactionType::Contested,
                metadata: json!({ "contest_remarks": remarks }),
                clears_lock: false,
            },
            TransitionRequest::Dispatched {
                mode,
                dispatch_date,
                remarks,
            } => {
                self.dispatch = Some(DispatchDetail {
                    mode: mode.clone(),
                    dispatch_date: *dispatch_date,
                    remarks: remarks.clone(),
                    dispatched_at: now,
                });
                TransitionOutcome {
                    transaction_type: TransactionType::Dispatched,
                    metadata: serde_json::to_value(mode)
                        .unwrap_or_else(|_| json!({ "mode": mode.label() })),
                    clears_lock: false,
                }
            }
        };

        self.status = target;
        self.updated_at = now;
        Ok(outcome)
    }
}

fn require_text(value: &str, field: &'static str) -> Result<(), ClaimError> {
    if value.trim().is_empty() {
        Err(ClaimError::missing_field(field))
    } else {
        Ok(())
    }
}
