//! Review DTOs

use serde::Deserialize;
use validator::Validate;

use domain_claims::ReviewDecision;

/// Body of `POST /claims/{id}/review`. The decision payload is flattened
/// so the request reads `{"decision": "reviewed", "total_bill_amount": ...}`.
#[derive(Debug, Deserialize)]
pub struct ReviewDecisionRequest {
    #[serde(flatten)]
    pub decision: ReviewDecision,
    #[serde(default)]
    pub remarks: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct EscalationRequest {
    #[validate(length(min = 1))]
    pub reason: String,
    #[serde(default)]
    pub target: Option<String>,
}
