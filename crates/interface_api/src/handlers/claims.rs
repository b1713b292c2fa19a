//! Claim handlers

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

use core_kernel::{ActorRole, ClaimId};
use domain_claims::TransitionRequest;

use crate::actor::ActorContext;
use crate::dto::claims::*;
use crate::error::ApiError;
use crate::AppState;

/// Submits a new claim
pub async fn submit_claim(
    State(state): State<AppState>,
    actor: ActorContext,
    Json(request): Json<SubmitClaimRequest>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let submission = request.into_submission()?;
    let record = state.lifecycle.submit(actor.actor(), submission).await?;
    Ok(Json(ClaimResponse::from_record(&record)))
}

/// Lists claims for the caller: processors get their admission-filtered
/// inbox, hospitals get their own submissions
pub async fn list_claims(
    State(state): State<AppState>,
    actor: ActorContext,
) -> Result<Response, ApiError> {
    match actor.actor().role {
        ActorRole::Processor => {
            let inbox = state.lifecycle.list_for_processor(actor.actor()).await?;
            Ok(Json(ProcessorInboxResponse::from_inbox(&inbox)).into_response())
        }
        ActorRole::Hospital => {
            let records = state.lifecycle.list_for_hospital(actor.actor()).await?;
            Ok(Json(ClaimListResponse {
                claims: records.iter().map(ClaimResponse::from_record).collect(),
            })
            .into_response())
        }
        role => Err(ApiError::Validation(format!(
            "Claim listing is not available for role {role}"
        ))),
    }
}

/// Gets a claim snapshot, including the current lock view
pub async fn get_claim(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let record = state.lifecycle.get(ClaimId::from(id)).await?;
    Ok(Json(ClaimResponse::from_record(&record)))
}

/// Applies a status transition
pub async fn transition_claim(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    actor: ActorContext,
    Json(request): Json<TransitionRequest>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let record = state
        .lifecycle
        .transition(ClaimId::from(id), actor.actor(), &request)
        .await?;
    Ok(Json(ClaimResponse::from_record(&record)))
}

/// Returns a page of the claim's audit log, ordered by sequence
pub async fn list_transactions(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(page): Query<TransactionPageQuery>,
) -> Result<Json<TransactionPageResponse>, ApiError> {
    let records = state
        .lifecycle
        .transactions(ClaimId::from(id), page.offset, page.limit)
        .await?;
    Ok(Json(TransactionPageResponse {
        transactions: records.iter().map(TransactionResponse::from).collect(),
        offset: page.offset,
        limit: page.limit,
    }))
}
