//! Tier admission control
//!
//! Processors are banded L1 to L4; each band has a claim amount ceiling
//! from configuration. The gate is consulted when building a processor's
//! inbox and again, authoritatively, inside every processor transition.

use core_kernel::{Money, ProcessorTier};

use crate::config::TierCeilings;
use crate::error::EngineError;

#[derive(Debug, Clone)]
pub struct AdmissionGate {
    ceilings: TierCeilings,
}

impl AdmissionGate {
    pub fn new(ceilings: TierCeilings) -> Self {
        Self { ceilings }
    }

    /// True if the tier may work a claim of this amount
    pub fn admits(&self, tier: ProcessorTier, amount: &Money) -> bool {
        match self.ceilings.for_tier(tier) {
            Some(ceiling) => amount.amount() <= ceiling,
            None => true,
        }
    }

    pub fn authorize(&self, tier: ProcessorTier, amount: &Money) -> Result<(), EngineError> {
        match self.ceilings.for_tier(tier) {
            Some(ceiling) if amount.amount() > ceiling => Err(EngineError::AdmissionDenied {
                tier,
                amount: amount.amount(),
                ceiling,
            }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    fn gate() -> AdmissionGate {
        AdmissionGate::new(TierCeilings::default())
    }

    #[test]
    fn test_amount_at_ceiling_is_admitted() {
        let amount = Money::new(dec!(100000), Currency::INR);
        assert!(gate().admits(ProcessorTier::L1, &amount));
        assert!(gate().authorize(ProcessorTier::L1, &amount).is_ok());
    }

    #[test]
    fn test_amount_above_ceiling_is_denied() {
        let amount = Money::new(dec!(100001), Currency::INR);
        let err = gate().authorize(ProcessorTier::L1, &amount).unwrap_err();
        assert!(matches!(err, EngineError::AdmissionDenied { tier: ProcessorTier::L1, .. }));
    }

    #[test]
    fn test_unbounded_tier_admits_everything() {
        let amount = Money::new(dec!(99999999), Currency::INR);
        assert!(gate().admits(ProcessorTier::L4, &amount));
    }
}
