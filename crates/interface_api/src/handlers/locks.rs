//! Lock handlers

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use core_kernel::ClaimId;

use crate::actor::ActorContext;
use crate::dto::claims::LockView;
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct UnlockResponse {
    pub released: bool,
}

/// Acquires or extends the evaluation lock on a claim
pub async fn lock_claim(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    actor: ActorContext,
) -> Result<Json<LockView>, ApiError> {
    let lock = state
        .locks
        .acquire(ClaimId::from(id), actor.actor())
        .await?;
    Ok(Json(LockView::from(&lock)))
}

/// Releases the evaluation lock
pub async fn unlock_claim(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    actor: ActorContext,
) -> Result<Json<UnlockResponse>, ApiError> {
    state
        .locks
        .release(ClaimId::from(id), actor.actor())
        .await?;
    Ok(Json(UnlockResponse { released: true }))
}
