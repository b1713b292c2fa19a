//! Request/response data transfer objects

pub mod claims;
pub mod review;
pub mod settlement;
