//! Claim lifecycle engine
//!
//! Services that drive the domain model: the `ClaimStore` persistence
//! port, the per-claim lock manager, the tier admission gate, and the
//! lifecycle, review and settlement workflows. All state changes flow
//! through the store's versioned commit so a status change and its audit
//! entry land together or not at all.

pub mod admission;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod lock_manager;
pub mod review;
pub mod settlement;
pub mod store;

pub use admission::AdmissionGate;
pub use config::{EngineConfig, TierCeilings};
pub use error::EngineError;
pub use lifecycle::{ClaimLifecycle, ProcessorInbox};
pub use lock_manager::LockManager;
pub use review::ReviewWorkflow;
pub use settlement::SettlementWorkflow;
pub use store::{ClaimRecord, ClaimStore, StoreError};
