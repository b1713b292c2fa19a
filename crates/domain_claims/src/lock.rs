//! Per-claim exclusive evaluation lock
//!
//! A lock is a value stored beside the claim, never inside it, so that
//! lifecycle commits cannot resurrect a lock that was released or stolen
//! concurrently. Expiry is lazy: nothing sweeps expired locks, they are
//! simply treated as absent at the next acquisition attempt.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::Actor;

/// An exclusive hold on a claim by one processor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimLock {
    pub holder: Actor,
    pub acquired_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl ClaimLock {
    pub fn acquire(holder: Actor, now: DateTime<Utc>, duration: Duration) -> Self {
        Self {
            holder,
            acquired_at: now,
            expires_at: now + duration,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// True if the lock is live and held by this actor
    pub fn is_held_by(&self, actor: &Actor, now: DateTime<Utc>) -> bool {
        !self.is_expired(now) && self.holder.is_same_identity(actor)
    }
}
