//! Request handlers

pub mod claims;
pub mod health;
pub mod locks;
pub mod review;
pub mod settlement;
