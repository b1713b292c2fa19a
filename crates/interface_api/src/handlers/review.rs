//! Review handlers

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use core_kernel::ClaimId;

use crate::actor::ActorContext;
use crate::dto::claims::ClaimResponse;
use crate::dto::review::{EscalationRequest, ReviewDecisionRequest};
use crate::error::ApiError;
use crate::AppState;

/// Records a review decision on a claim
pub async fn review_claim(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    actor: ActorContext,
    Json(request): Json<ReviewDecisionRequest>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let record = state
        .reviews
        .decide(
            ClaimId::from(id),
            actor.actor(),
            &request.decision,
            request.remarks,
        )
        .await?;
    Ok(Json(ClaimResponse::from_record(&record)))
}

/// Escalates the review on a claim
pub async fn escalate_claim(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    actor: ActorContext,
    Json(request): Json<EscalationRequest>,
) -> Result<Json<ClaimResponse>, ApiError> {
    request.validate()?;
    let record = state
        .reviews
        .escalate(
            ClaimId::from(id),
            actor.actor(),
            &request.reason,
            request.target,
        )
        .await?;
    Ok(Json(ClaimResponse::from_record(&record)))
}
