//! Test Utilities Crate
//!
//! Shared test infrastructure for the claim lifecycle engine suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built actors and submissions
//! - `builders`: Builder patterns for test data construction
//! - `harness`: Engine services wired over the in-memory store

pub mod builders;
pub mod fixtures;
pub mod harness;

pub use builders::*;
pub use fixtures::*;
pub use harness::*;
