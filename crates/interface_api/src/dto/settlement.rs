//! Settlement DTOs

use serde::Deserialize;
use validator::Validate;

use domain_claims::{RmStatus, SettlementDetail};

/// Body of `POST /claims/{id}/settlement`. Detail fields ride alongside
/// the status, matching the settlement advice forms RMs work from.
#[derive(Debug, Deserialize)]
pub struct SettlementUpdateRequest {
    pub rm_status: RmStatus,
    #[serde(flatten)]
    pub detail: SettlementDetail,
    #[serde(default)]
    pub remarks: Option<String>,
}

impl SettlementUpdateRequest {
    /// The detail block, or `None` when every field was omitted
    pub fn detail(&self) -> Option<SettlementDetail> {
        if self.detail == SettlementDetail::default() {
            None
        } else {
            Some(self.detail.clone())
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ReevaluationRequest {
    #[validate(length(min = 1))]
    pub remarks: String,
}
