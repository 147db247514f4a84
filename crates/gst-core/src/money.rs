//! # Money Module
//!
//! Provides the `Money` type for rupee amounts.
//!
//! ## Why Integer Paise?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    (1.005).toFixed(2) = "1.00"         ❌ binary 1.005 is 1.00499...    │
//! │    0.1 + 0.2 = 0.30000000000000004     ❌                               │
//! │                                                                         │
//! │  OUR SOLUTION: Decimal math, Integer Paise                              │
//! │    Intermediate values are exact `Decimal`s                            │
//! │    Every amount that leaves a calculation is rounded ONCE, half away   │
//! │    from zero, to whole paise and stored as i64                         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! The billing backend expects plain JSON numbers in rupees (`106.2`), so
//! `Money` serializes as an `f64` of rupees, not as integer paise.
//!
//! ## Usage
//! ```rust
//! use gst_core::money::Money;
//! use rust_decimal_macros::dec;
//!
//! let price = Money::from_paise(10_620); // ₹106.20
//! assert_eq!(price, Money::from_decimal(dec!(106.2)));
//!
//! // Half away from zero
//! assert_eq!(Money::from_decimal(dec!(0.125)).paise(), 13);
//! ```

use std::fmt;
use std::ops::{Add, Neg, Sub};

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Serialize, Serializer};

// =============================================================================
// Money Type
// =============================================================================

/// A rupee amount in the smallest currency unit (paise).
///
/// ## Design Decisions
/// - **i64 (signed)**: round-off adjustments and balances can be negative
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Rupee wire format**: see module docs
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                                                                         │
/// │  pricing::compute ──► LineAmounts { discount, tax, line_total }         │
/// │                              │                                          │
/// │                              ▼                                          │
/// │  totals::aggregate ──► InvoiceTotals { subtotal, ..., grand_total }     │
/// │                              │                                          │
/// │                              ▼                                          │
/// │  SaleRequest / PurchaseRequest ──► JSON numbers ──► billing backend     │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise.
    ///
    /// ## Example
    /// ```rust
    /// use gst_core::money::Money;
    ///
    /// let price = Money::from_paise(1099); // ₹10.99
    /// assert_eq!(price.paise(), 1099);
    /// ```
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Rounds a decimal rupee amount to whole paise, half away from zero.
    ///
    /// Returns `None` when the amount does not fit in i64 paise.
    pub fn try_from_decimal(amount: Decimal) -> Option<Self> {
        amount
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .checked_mul(Decimal::ONE_HUNDRED)?
            .to_i64()
            .map(Money)
    }

    /// Rounds a decimal rupee amount to whole paise, half away from zero.
    ///
    /// Amounts outside the i64 paise range collapse to zero.
    ///
    /// ## Example
    /// ```rust
    /// use gst_core::money::Money;
    /// use rust_decimal_macros::dec;
    ///
    /// assert_eq!(Money::from_decimal(dec!(16.2)).paise(), 1620);
    /// assert_eq!(Money::from_decimal(dec!(1.005)).paise(), 101);
    /// assert_eq!(Money::from_decimal(dec!(-1.005)).paise(), -101);
    /// ```
    pub fn from_decimal(amount: Decimal) -> Self {
        Self::try_from_decimal(amount).unwrap_or_default()
    }

    /// Returns the exact rupee value as a decimal with two places.
    #[inline]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// Returns the value in paise.
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the whole rupee portion (truncated toward zero).
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paise portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value, saturating at the i64 limit.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.saturating_abs())
    }

    /// Adds two amounts. `None` on overflow.
    #[inline]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(paise) => Some(Money(paise)),
            None => None,
        }
    }

    /// Subtracts `other`. `None` on overflow.
    #[inline]
    pub const fn checked_sub(self, other: Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(paise) => Some(Money(paise)),
            None => None,
        }
    }

    /// Sums amounts. `None` when the running total overflows.
    pub fn checked_sum<I>(amounts: I) -> Option<Self>
    where
        I: IntoIterator<Item = Money>,
    {
        amounts
            .into_iter()
            .try_fold(Money::zero(), |acc, amount| acc.checked_add(amount))
    }

    /// Sums amounts; a total that does not fit in i64 paise is zero.
    ///
    /// ## Example
    /// ```rust
    /// use gst_core::money::Money;
    ///
    /// let lines = [Money::from_paise(1000), Money::from_paise(620)];
    /// assert_eq!(Money::total(lines).paise(), 1620);
    /// assert_eq!(Money::total([Money::from_paise(i64::MAX), Money::from_paise(1)]), Money::zero());
    /// ```
    pub fn total<I>(amounts: I) -> Self
    where
        I: IntoIterator<Item = Money>,
    {
        Self::checked_sum(amounts).unwrap_or_default()
    }

    /// Rupee value as `f64`, for the JSON wire format only.
    #[inline]
    pub fn to_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount as `₹1234.50`.
///
/// ## Note
/// No digit grouping. Lakh/crore grouping is left to the front end.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}₹{}.{:02}", sign, self.rupees().abs(), self.paise_part())
    }
}

/// Plain i64 arithmetic. Sums over form input go through
/// [`Money::checked_add`] and [`Money::total`] instead.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(self.0.saturating_neg())
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_f64())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_from_paise() {
        let money = Money::from_paise(1099);
        assert_eq!(money.paise(), 1099);
        assert_eq!(money.rupees(), 10);
        assert_eq!(money.paise_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_paise(1099).to_string(), "₹10.99");
        assert_eq!(Money::from_paise(500).to_string(), "₹5.00");
        assert_eq!(Money::from_paise(-550).to_string(), "-₹5.50");
        assert_eq!(Money::from_paise(-5).to_string(), "-₹0.05");
        assert_eq!(Money::zero().to_string(), "₹0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_paise(1000);
        let b = Money::from_paise(500);

        assert_eq!((a + b).paise(), 1500);
        assert_eq!((a - b).paise(), 500);
        assert_eq!((-a).paise(), -1000);

        assert_eq!(Money::total([a, b, b]).paise(), 2000);
        assert_eq!(Money::total([]), Money::zero());
    }

    #[test]
    fn test_checked_arithmetic_overflow() {
        let near_max = Money::from_paise(i64::MAX - 10);

        assert_eq!(near_max.checked_add(Money::from_paise(10)), Some(Money::from_paise(i64::MAX)));
        assert_eq!(near_max.checked_add(Money::from_paise(11)), None);
        assert_eq!(Money::from_paise(i64::MIN).checked_sub(Money::from_paise(1)), None);
        assert_eq!(Money::checked_sum([near_max, near_max]), None);
        assert_eq!(Money::total([near_max, near_max]), Money::zero());

        assert_eq!(Money::from_paise(i64::MIN).abs().paise(), i64::MAX);
    }

    #[test]
    fn test_from_decimal_rounds_half_away_from_zero() {
        assert_eq!(Money::from_decimal(dec!(0.005)).paise(), 1);
        assert_eq!(Money::from_decimal(dec!(0.004999)).paise(), 0);
        assert_eq!(Money::from_decimal(dec!(-0.005)).paise(), -1);
        assert_eq!(Money::from_decimal(dec!(84.745762711864)).paise(), 8475);
    }

    #[test]
    fn test_from_decimal_out_of_range_is_zero() {
        let huge = Decimal::MAX;
        assert!(Money::try_from_decimal(huge).is_none());
        assert_eq!(Money::from_decimal(huge), Money::zero());
    }

    #[test]
    fn test_to_decimal() {
        assert_eq!(Money::from_paise(10_620).to_decimal(), dec!(106.20));
        assert_eq!(Money::from_paise(-50).to_decimal(), dec!(-0.50));
    }

    #[test]
    fn test_serializes_as_rupee_number() {
        let json = serde_json::to_string(&Money::from_paise(10_620)).unwrap();
        assert_eq!(json, "106.2");

        let json = serde_json::to_string(&Money::from_paise(1800)).unwrap();
        assert_eq!(json, "18.0");
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let negative = Money::from_paise(-100);
        assert!(negative.is_negative());
        assert_eq!(negative.abs().paise(), 100);
    }
}
