//! Money in Kenyan shillings, kept in minor units (cents).
//!
//! Amounts are stored and computed as integers; formatting is the only
//! place a decimal point appears.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// A KES amount in cents.
#[derive(
    Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Build from whole shillings, e.g. `Money::from_shillings(120)` = KES 120.00.
    pub const fn from_shillings(shillings: i64) -> Self {
        Self(shillings * 100)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    pub fn checked_add(self, other: Money) -> DomainResult<Money> {
        self.0
            .checked_add(other.0)
            .map(Money)
            .ok_or_else(|| DomainError::invariant("money addition overflowed"))
    }

    /// Multiply a unit price by a quantity of units.
    pub fn checked_mul(self, units: i64) -> DomainResult<Money> {
        self.0
            .checked_mul(units)
            .map(Money)
            .ok_or_else(|| DomainError::invariant("money multiplication overflowed"))
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "KES {sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl core::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        Money(iter.map(|m| m.0).sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_two_decimal_places() {
        assert_eq!(Money::from_cents(12050).to_string(), "KES 120.50");
        assert_eq!(Money::from_cents(5).to_string(), "KES 0.05");
        assert_eq!(Money::ZERO.to_string(), "KES 0.00");
    }

    #[test]
    fn formats_negative_amounts() {
        assert_eq!(Money::from_cents(-150).to_string(), "KES -1.50");
    }

    #[test]
    fn multiplies_unit_price_by_quantity() {
        let total = Money::from_shillings(25).checked_mul(4).unwrap();
        assert_eq!(total, Money::from_shillings(100));
    }

    #[test]
    fn multiplication_overflow_is_an_error() {
        assert!(Money::from_cents(i64::MAX).checked_mul(2).is_err());
    }

    #[test]
    fn sums_an_iterator_of_amounts() {
        let total: Money = [Money::from_cents(100), Money::from_cents(250)]
            .into_iter()
            .sum();
        assert_eq!(total, Money::from_cents(350));
    }
}
