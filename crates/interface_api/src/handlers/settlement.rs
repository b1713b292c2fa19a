//! Settlement handlers

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use core_kernel::ClaimId;

use crate::actor::ActorContext;
use crate::dto::claims::ClaimResponse;
use crate::dto::settlement::{ReevaluationRequest, SettlementUpdateRequest};
use crate::error::ApiError;
use crate::AppState;

/// Records an RM settlement status update
pub async fn update_settlement(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    actor: ActorContext,
    Json(request): Json<SettlementUpdateRequest>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let detail = request.detail();
    let record = state
        .settlements
        .update_status(
            ClaimId::from(id),
            actor.actor(),
            request.rm_status,
            detail,
            request.remarks,
        )
        .await?;
    Ok(Json(ClaimResponse::from_record(&record)))
}

/// Flags the claim for re-evaluation
pub async fn reevaluate_settlement(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    actor: ActorContext,
    Json(request): Json<ReevaluationRequest>,
) -> Result<Json<ClaimResponse>, ApiError> {
    request.validate()?;
    let record = state
        .settlements
        .re_evaluate(ClaimId::from(id), actor.actor(), &request.remarks)
        .await?;
    Ok(Json(ClaimResponse::from_record(&record)))
}
