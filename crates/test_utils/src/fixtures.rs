//! Pre-built test data for common entities

use core_kernel::{Actor, Currency, Money, ProcessorTier};
use rust_decimal_macros::dec;

/// Canonical actors used across the test suite
pub struct ActorFixtures;

impl ActorFixtures {
    pub fn hospital() -> Actor {
        Actor::hospital("hosp-user-1", "City Care Desk")
    }

    pub fn other_hospital() -> Actor {
        Actor::hospital("hosp-user-2", "Lakeside Desk")
    }

    pub fn processor_l1() -> Actor {
        Actor::processor("proc-1", "Asha Pillai", ProcessorTier::L1)
    }

    pub fn processor_l2() -> Actor {
        Actor::processor("proc-2", "Vikram Shah", ProcessorTier::L2)
    }

    pub fn processor_l4() -> Actor {
        Actor::processor("proc-4", "Meera Nair", ProcessorTier::L4)
    }

    pub fn reviewer() -> Actor {
        Actor::reviewer("rev-1", "Dev Kapoor")
    }

    pub fn rm() -> Actor {
        Actor::rm("rm-1", "Sana Qureshi")
    }
}

/// Canonical monetary amounts
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// Within every tier ceiling
    pub fn small_claim() -> Money {
        Money::new(dec!(50000), Currency::INR)
    }

    pub fn small_bill() -> Money {
        Money::new(dec!(60000), Currency::INR)
    }

    /// Above the L1 ceiling, within L2
    pub fn mid_claim() -> Money {
        Money::new(dec!(250000), Currency::INR)
    }

    /// Above every bounded ceiling
    pub fn large_claim() -> Money {
        Money::new(dec!(5000000), Currency::INR)
    }
}
