//! API configuration
//!
//! Server settings come from `API_*` environment variables. Engine tunables
//! (lock lease length, processor tier ceilings) ride along so a deployment
//! can adjust them without a rebuild.

use claims_engine::{EngineConfig, TierCeilings};
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server bind host
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Log level filter
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Lock lease length in seconds
    #[serde(default = "default_lock_duration")]
    pub lock_duration_secs: i64,
    /// Overrides for the per-tier claim amount ceilings
    #[serde(default)]
    pub tier_l1_ceiling: Option<Decimal>,
    #[serde(default)]
    pub tier_l2_ceiling: Option<Decimal>,
    #[serde(default)]
    pub tier_l3_ceiling: Option<Decimal>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_lock_duration() -> i64 {
    3600
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            lock_duration_secs: default_lock_duration(),
            tier_l1_ceiling: None,
            tier_l2_ceiling: None,
            tier_l3_ceiling: None,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `API_*` environment variables.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("API"))
            .build()?
            .try_deserialize()
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Engine tunables derived from this configuration. Unset ceiling
    /// overrides fall back to the engine defaults.
    pub fn engine_config(&self) -> EngineConfig {
        let defaults = TierCeilings::default();
        EngineConfig {
            lock_duration_secs: self.lock_duration_secs,
            tier_ceilings: TierCeilings {
                l1: self.tier_l1_ceiling.or(defaults.l1),
                l2: self.tier_l2_ceiling.or(defaults.l2),
                l3: self.tier_l3_ceiling.or(defaults.l3),
                l4: defaults.l4,
            },
        }
    }
}
