//! Actor identity, roles, and processor tiers
//!
//! Every mutating operation in the engine is performed by an [`Actor`]: the
//! identity is recorded verbatim on each transaction record, and the role
//! decides which transition table applies. Processors additionally carry a
//! tier, which the admission gate compares against the claim amount.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Role of an actor interacting with a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    /// Submitting hospital user
    Hospital,
    /// Tiered claim processor
    Processor,
    /// Second-level reviewer
    Reviewer,
    /// Relationship manager / reconciliation
    Rm,
}

impl fmt::Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ActorRole::Hospital => "hospital",
            ActorRole::Processor => "processor",
            ActorRole::Reviewer => "reviewer",
            ActorRole::Rm => "rm",
        };
        write!(f, "{s}")
    }
}

impl FromStr for ActorRole {
    type Err = ActorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hospital" | "hospital_user" => Ok(ActorRole::Hospital),
            "processor" => Ok(ActorRole::Processor),
            "reviewer" | "review_request" => Ok(ActorRole::Reviewer),
            "rm" | "reconciler" => Ok(ActorRole::Rm),
            other => Err(ActorParseError::UnknownRole(other.to_string())),
        }
    }
}

/// Processor tier levels, each bounded by a monetary approval ceiling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProcessorTier {
    L1,
    L2,
    L3,
    L4,
}

impl ProcessorTier {
    pub const ALL: [ProcessorTier; 4] = [
        ProcessorTier::L1,
        ProcessorTier::L2,
        ProcessorTier::L3,
        ProcessorTier::L4,
    ];
}

impl fmt::Display for ProcessorTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProcessorTier::L1 => "L1",
            ProcessorTier::L2 => "L2",
            ProcessorTier::L3 => "L3",
            ProcessorTier::L4 => "L4",
        };
        write!(f, "{s}")
    }
}

impl FromStr for ProcessorTier {
    type Err = ActorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "L1" => Ok(ProcessorTier::L1),
            "L2" => Ok(ProcessorTier::L2),
            "L3" => Ok(ProcessorTier::L3),
            "L4" => Ok(ProcessorTier::L4),
            other => Err(ActorParseError::UnknownTier(other.to_string())),
        }
    }
}

/// Errors from parsing actor metadata off the wire
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActorParseError {
    #[error("Unknown actor role: {0}")]
    UnknownRole(String),

    #[error("Unknown processor tier: {0}")]
    UnknownTier(String),

    #[error("Missing required actor field: {0}")]
    MissingField(&'static str),
}

/// An authenticated-elsewhere identity performing an operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Stable identity of the user (issued by the out-of-scope auth system)
    pub id: String,
    /// Display name recorded on audit entries
    pub name: String,
    /// Role deciding which transition table applies
    pub role: ActorRole,
    /// Tier, present only for processors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<ProcessorTier>,
}

impl Actor {
    /// Creates a hospital-side actor
    pub fn hospital(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role: ActorRole::Hospital,
            tier: None,
        }
    }

    /// Creates a processor actor at the given tier
    pub fn processor(id: impl Into<String>, name: impl Into<String>, tier: ProcessorTier) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role: ActorRole::Processor,
            tier: Some(tier),
        }
    }

    /// Creates a second-level reviewer
    pub fn reviewer(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role: ActorRole::Reviewer,
            tier: None,
        }
    }

    /// Creates a relationship manager
    pub fn rm(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role: ActorRole::Rm,
            tier: None,
        }
    }

    /// Returns true if the two actors are the same identity
    pub fn is_same_identity(&self, other: &Actor) -> bool {
        self.id == other.id
    }
}
