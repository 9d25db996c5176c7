//! Type-safe price representation using decimal arithmetic.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A per-unit price in the store currency.
///
/// Backed by [`Decimal`] so line totals never pick up floating-point
/// rounding, no matter the mutation order. The amount recorded at first
/// insertion into the cart is authoritative and never recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// A zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole number of currency units.
    #[must_use]
    pub fn from_units(units: i64) -> Self {
        Self(Decimal::from(units))
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Line total for `quantity` units at this price.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total_is_exact() {
        let price = Price::new(Decimal::new(1999, 2)); // 19.99
        assert_eq!(price.times(3).amount(), Decimal::new(5997, 2));
    }

    #[test]
    fn test_sum_over_lines() {
        let total: Price = [Price::from_units(1000), Price::from_units(500).times(2)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from_units(2000));
    }

    #[test]
    fn test_serializes_as_string() {
        // serde-with-str keeps decimal amounts exact in persisted records
        let json = serde_json::to_string(&Price::from_units(500)).expect("serialize");
        assert_eq!(json, "\"500\"");
    }
}
