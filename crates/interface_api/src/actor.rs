//! Actor identity extraction
//!
//! Authentication lives outside this system. Collaborating services
//! assert the already-authenticated identity through request headers,
//! which this extractor parses into a domain [`Actor`].

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use core_kernel::{Actor, ActorRole, ProcessorTier};

use crate::error::ApiError;

pub const ACTOR_ID_HEADER: &str = "x-actor-id";
pub const ACTOR_NAME_HEADER: &str = "x-actor-name";
pub const ACTOR_ROLE_HEADER: &str = "x-actor-role";
pub const ACTOR_TIER_HEADER: &str = "x-actor-tier";

/// The calling identity, parsed from `X-Actor-*` headers
#[derive(Debug, Clone)]
pub struct ActorContext(pub Actor);

impl ActorContext {
    pub fn actor(&self) -> &Actor {
        &self.0
    }
}

fn header<'a>(parts: &'a Parts, name: &'static str) -> Result<&'a str, ApiError> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ApiError::Validation(format!("Missing required header: {name}")))
}

#[axum::async_trait]
impl<S: Send + Sync> FromRequestParts<S> for ActorContext {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = header(parts, ACTOR_ID_HEADER)?.to_string();
        let name = header(parts, ACTOR_NAME_HEADER)?.to_string();
        let role: ActorRole = header(parts, ACTOR_ROLE_HEADER)?
            .parse()
            .map_err(|e: core_kernel::ActorParseError| ApiError::Validation(e.to_string()))?;

        let tier = match parts.headers.get(ACTOR_TIER_HEADER) {
            Some(value) => {
                let raw = value
                    .to_str()
                    .map_err(|_| ApiError::Validation("Malformed tier header".to_string()))?;
                Some(
                    raw.parse::<ProcessorTier>()
                        .map_err(|e| ApiError::Validation(e.to_string()))?,
                )
            }
            None => None,
        };

        if role == ActorRole::Processor && tier.is_none() {
            return Err(ApiError::Validation(
                "Processors must supply X-Actor-Tier".to_string(),
            ));
        }

        Ok(ActorContext(Actor {
            id,
            name,
            role,
            tier,
        }))
    }
}
