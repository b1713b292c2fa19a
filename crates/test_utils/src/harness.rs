//! Engine harness
//!
//! Wires the engine services over the in-memory store and a manual clock
//! so tests can steer time deterministically.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use claims_engine::{
    ClaimLifecycle, EngineConfig, LockManager, ReviewWorkflow, SettlementWorkflow,
};
use core_kernel::{Clock, ManualClock};
use infra_store::InMemoryClaimStore;

pub struct EngineHarness {
    pub store: Arc<InMemoryClaimStore>,
    pub clock: Arc<ManualClock>,
    pub lifecycle: ClaimLifecycle,
    pub locks: LockManager,
    pub reviews: ReviewWorkflow,
    pub settlements: SettlementWorkflow,
}

impl EngineHarness {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let store = Arc::new(InMemoryClaimStore::new());
        let clock = Arc::new(ManualClock::starting_at(test_epoch()));

        let store_dyn: Arc<dyn claims_engine::ClaimStore> = store.clone();
        let clock_dyn: Arc<dyn Clock> = clock.clone();

        Self {
            lifecycle: ClaimLifecycle::new(store_dyn.clone(), clock_dyn.clone(), &config),
            locks: LockManager::new(store_dyn.clone(), clock_dyn.clone(), &config),
            reviews: ReviewWorkflow::new(store_dyn.clone(), clock_dyn.clone()),
            settlements: SettlementWorkflow::new(store_dyn, clock_dyn),
            store,
            clock,
        }
    }
}

impl Default for EngineHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed starting instant for deterministic tests
pub fn test_epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap()
}
