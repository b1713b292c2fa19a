//! Engine configuration

use chrono::Duration;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use core_kernel::ProcessorTier;

/// Per-tier claim amount ceilings. `None` means unbounded.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TierCeilings {
    pub l1: Option<Decimal>,
    pub l2: Option<Decimal>,
    pub l3: Option<Decimal>,
    pub l4: Option<Decimal>,
}

impl Default for TierCeilings {
    fn default() -> Self {
        Self {
            l1: Some(dec!(100000)),
            l2: Some(dec!(500000)),
            l3: Some(dec!(2000000)),
            l4: None,
        }
    }
}

impl TierCeilings {
    pub fn for_tier(&self, tier: ProcessorTier) -> Option<Decimal> {
        match tier {
            ProcessorTier::L1 => self.l1,
            ProcessorTier::L2 => self.l2,
            ProcessorTier::L3 => self.l3,
            ProcessorTier::L4 => self.l4,
        }
    }
}

/// Tunables consumed by the engine services at construction
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// How long an acquired lock lives before lazy expiry
    #[serde(default = "default_lock_duration_secs")]
    pub lock_duration_secs: i64,
    #[serde(default)]
    pub tier_ceilings: TierCeilings,
}

fn default_lock_duration_secs() -> i64 {
    3600
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            lock_duration_secs: default_lock_duration_secs(),
            tier_ceilings: TierCeilings::default(),
        }
    }
}

impl EngineConfig {
    pub fn lock_duration(&self) -> Duration {
        Duration::seconds(self.lock_duration_secs)
    }
}
