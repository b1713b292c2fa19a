//! Storage adapters for the claim store port

pub mod memory;

pub use memory::InMemoryClaimStore;
