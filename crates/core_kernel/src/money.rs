//! Monetary amounts with precise decimal arithmetic
//!
//! Claim amounts are carried as [`Money`] backed by `rust_decimal`, never
//! floating point. The clamped subtraction here is what keeps the
//! disallowed-amount rule (`max(0, billed - approved)`) in one place.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// ISO 4217 currency codes the engine accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    INR,
    USD,
    EUR,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::INR => "INR",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("currency mismatch: {0} vs {1}")]
    CurrencyMismatch(Currency, Currency),
}

/// An amount in a single currency, held to 2 decimal places.
///
/// Claim forms and settlement advices record paise, so construction
/// rounds to 2 places with banker's rounding left to `rust_decimal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self {
            amount: amount.round_dp(2),
            currency,
        }
    }

    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency,
        }
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    fn same_currency(&self, other: &Money) -> Result<(), MoneyError> {
        if self.currency == other.currency {
            Ok(())
        } else {
            Err(MoneyError::CurrencyMismatch(self.currency, other.currency))
        }
    }

    pub fn checked_add(&self, other: &Money) -> Result<Money, MoneyError> {
        self.same_currency(other)?;
        Ok(Self::new(self.amount + other.amount, self.currency))
    }

    pub fn checked_sub(&self, other: &Money) -> Result<Money, MoneyError> {
        self.same_currency(other)?;
        Ok(Self::new(self.amount - other.amount, self.currency))
    }

    /// Subtraction floored at zero.
    ///
    /// Deriving a disallowed amount from billed and approved amounts must
    /// never go negative: an approval above the billed amount yields zero.
    pub fn clamped_sub(&self, other: &Money) -> Result<Money, MoneyError> {
        let diff = self.checked_sub(other)?;
        Ok(if diff.is_negative() {
            Money::zero(self.currency)
        } else {
            diff
        })
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {}", self.amount, self.currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_construction_rounds_to_paise() {
        let m = Money::new(dec!(50000.505), Currency::INR);
        assert_eq!(m.amount(), dec!(50000.50));
        assert_eq!(m.currency(), Currency::INR);
    }

    #[test]
    fn test_checked_arithmetic() {
        let a = Money::new(dec!(100.00), Currency::INR);
        let b = Money::new(dec!(40.00), Currency::INR);

        assert_eq!(a.checked_add(&b).unwrap().amount(), dec!(140.00));
        assert_eq!(a.checked_sub(&b).unwrap().amount(), dec!(60.00));
    }

    #[test]
    fn test_cross_currency_arithmetic_is_refused() {
        let inr = Money::new(dec!(100.00), Currency::INR);
        let usd = Money::new(dec!(100.00), Currency::USD);

        assert_eq!(
            inr.checked_add(&usd),
            Err(MoneyError::CurrencyMismatch(Currency::INR, Currency::USD))
        );
    }

    #[test]
    fn test_clamped_sub_keeps_positive_difference() {
        let billed = Money::new(dec!(10000), Currency::INR);
        let approved = Money::new(dec!(8000), Currency::INR);

        assert_eq!(billed.clamped_sub(&approved).unwrap().amount(), dec!(2000));
    }

    #[test]
    fn test_clamped_sub_floors_at_zero() {
        let billed = Money::new(dec!(10000), Currency::INR);
        let approved = Money::new(dec!(12000), Currency::INR);

        assert!(billed.clamped_sub(&approved).unwrap().is_zero());
    }

    #[test]
    fn test_display_shows_amount_then_code() {
        let m = Money::new(dec!(1234.5), Currency::INR);
        assert_eq!(m.to_string(), "1234.50 INR");
    }
}
