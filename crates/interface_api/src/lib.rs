//! HTTP API Layer
//!
//! REST surface over the claim lifecycle engine using Axum. Callers are
//! collaborating services that assert the authenticated identity through
//! `X-Actor-*` headers; authentication itself lives outside this system.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, config::ApiConfig};
//! use infra_store::InMemoryClaimStore;
//! use std::sync::Arc;
//!
//! let app = create_router(Arc::new(InMemoryClaimStore::new()), ApiConfig::default());
//! axum::serve(listener, app).await?;
//! ```

pub mod actor;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use claims_engine::{
    ClaimLifecycle, ClaimStore, LockManager, ReviewWorkflow, SettlementWorkflow,
};
use core_kernel::{Clock, SystemClock};

use crate::config::ApiConfig;
use crate::handlers::{claims, health, locks, review, settlement};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub lifecycle: ClaimLifecycle,
    pub locks: LockManager,
    pub reviews: ReviewWorkflow,
    pub settlements: SettlementWorkflow,
}

/// Creates the main API router over the given store and the system clock
pub fn create_router(store: Arc<dyn ClaimStore>, config: ApiConfig) -> Router {
    create_router_with_clock(store, Arc::new(SystemClock), config)
}

/// Creates the router with an explicit clock, for tests that steer time
pub fn create_router_with_clock(
    store: Arc<dyn ClaimStore>,
    clock: Arc<dyn Clock>,
    config: ApiConfig,
) -> Router {
    let engine_config = config.engine_config();
    let state = AppState {
        lifecycle: ClaimLifecycle::new(store.clone(), clock.clone(), &engine_config),
        locks: LockManager::new(store.clone(), clock.clone(), &engine_config),
        reviews: ReviewWorkflow::new(store.clone(), clock.clone()),
        settlements: SettlementWorkflow::new(store, clock),
    };

    let claim_routes = Router::new()
        .route("/", post(claims::submit_claim))
        .route("/", get(claims::list_claims))
        .route("/:id", get(claims::get_claim))
        .route("/:id/lock", post(locks::lock_claim))
        .route("/:id/unlock", post(locks::unlock_claim))
        .route("/:id/transition", post(claims::transition_claim))
        .route("/:id/review", post(review::review_claim))
        .route("/:id/escalate", post(review::escalate_claim))
        .route("/:id/settlement", post(settlement::update_settlement))
        .route("/:id/settlement/reevaluate", post(settlement::reevaluate_settlement))
        .route("/:id/transactions", get(claims::list_transactions));

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/claims", claim_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
