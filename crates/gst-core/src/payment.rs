//! Settlement helpers: balance due, "paid in full", round-off suggestion.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::money::Money;

/// What is still owed after `received` has been paid against `total`.
///
/// Negative when more than the total was received; zero when the
/// difference does not fit in i64 paise.
pub fn balance_due(total: Money, received: Money) -> Money {
    total.checked_sub(received).unwrap_or_default()
}

/// Whether `received` settles `total` exactly.
///
/// A zero invoice is never "paid in full", so the pay-full toggle stays off
/// on an empty form.
pub fn is_paid_in_full(total: Money, received: Money) -> bool {
    received == total && total.is_positive()
}

/// The adjustment that brings `amount` to the nearest whole rupee.
///
/// Halves go away from zero, so the result always lies in `-0.49..=0.50`
/// for positive amounts.
///
/// ## Example
/// ```rust
/// use gst_core::payment::suggest_round_off;
/// use gst_core::Money;
///
/// assert_eq!(suggest_round_off(Money::from_paise(10_620)), Money::from_paise(-20));
/// assert_eq!(suggest_round_off(Money::from_paise(10_650)), Money::from_paise(50));
/// assert_eq!(suggest_round_off(Money::from_paise(10_000)), Money::zero());
/// ```
pub fn suggest_round_off(amount: Money) -> Money {
    let exact = amount.to_decimal();
    let whole = exact.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    Money::from_decimal(whole - exact)
}

/// Whether an amount is already a whole rupee figure.
pub fn is_whole_rupees(amount: Money) -> bool {
    amount.paise_part() == 0
}

/// Converts a decimal received/paid figure to money, blank as zero.
pub fn settled_amount(raw: Option<Decimal>) -> Money {
    raw.map(Money::from_decimal).unwrap_or_default()
}

// =============================================================================
// Unit Tests
// =============================================================================
