//! # Line Item Pricing
//!
//! The one pricing rule shared by sale invoices and purchase bills.
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  unit price ──► WITH_TAX?  ── yes ──► price / (1 + tax% / 100) ──┐      │
//! │                    │                                             │      │
//! │                    └──── no ─────► price ─────────────────────────┤      │
//! │                                                                  ▼      │
//! │                                      subtotal = qty × base price        │
//! │                                      discount = subtotal × disc% / 100  │
//! │                                      taxable  = subtotal − discount     │
//! │                                      tax      = taxable × tax% / 100    │
//! │                                      total    = taxable + tax           │
//! │                                                                  │      │
//! │                               round each to paise (half up) ◄────┘      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Discount is always taken before tax. The calculator never fails: values
//! it cannot represent (overflow, a zero divisor from a −100 % tax) produce
//! an all-zero result.
//!
//! ## Example
//! ```rust
//! use gst_core::pricing::compute;
//! use gst_core::{Money, PriceMode, Rate};
//! use rust_decimal_macros::dec;
//!
//! // ₹118 including 18 % GST
//! let line = compute(dec!(1), dec!(118), PriceMode::WithTax, Rate::zero(), Rate::whole(18));
//! assert_eq!(line.tax_amount, Money::from_paise(1800));
//! assert_eq!(line.line_total, Money::from_paise(11_800));
//! ```

use rust_decimal::Decimal;
use serde::Serialize;

use crate::money::Money;
use crate::types::{PriceMode, Rate};

/// Rounded per-line amounts, as shown in the item table and sent to the
/// backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineAmounts {
    pub discount_amount: Money,
    pub tax_amount: Money,
    pub line_total: Money,
}

/// Exact, unrounded intermediate values of one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineBreakdown {
    /// Tax-exclusive unit price.
    pub base_price: Decimal,
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub taxable: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl LineBreakdown {
    /// Runs the pricing rule with exact decimals.
    ///
    /// `None` when an intermediate value is not representable.
    pub fn compute(
        quantity: Decimal,
        unit_price: Decimal,
        price_mode: PriceMode,
        discount: Rate,
        tax: Rate,
    ) -> Option<Self> {
        let base_price = match price_mode {
            PriceMode::WithoutTax => unit_price,
            PriceMode::WithTax => {
                let divisor = Decimal::ONE.checked_add(tax.fraction())?;
                unit_price.checked_div(divisor)?
            }
        };

        let subtotal = quantity.checked_mul(base_price)?;
        let discount = subtotal
            .checked_mul(discount.percent())?
            .checked_div(Decimal::ONE_HUNDRED)?;
        let taxable = subtotal.checked_sub(discount)?;
        let tax = taxable
            .checked_mul(tax.percent())?
            .checked_div(Decimal::ONE_HUNDRED)?;
        let total = taxable.checked_add(tax)?;

        Some(LineBreakdown {
            base_price,
            subtotal,
            discount,
            taxable,
            tax,
            total,
        })
    }

    /// Rounds the outputs to paise.
    ///
    /// `None` when any of them falls outside the `Money` range.
    pub fn rounded(&self) -> Option<LineAmounts> {
        Some(LineAmounts {
            discount_amount: Money::try_from_decimal(self.discount)?,
            tax_amount: Money::try_from_decimal(self.tax)?,
            line_total: Money::try_from_decimal(self.total)?,
        })
    }
}

/// Computes discount, tax and total for one line item.
///
/// Inputs are already-coerced numbers; see [`crate::form`] for how blank or
/// non-numeric form text becomes zero.
///
/// ## Example
/// ```rust
/// use gst_core::pricing::compute;
/// use gst_core::{Money, PriceMode, Rate};
/// use rust_decimal_macros::dec;
///
/// let line = compute(dec!(1), dec!(100), PriceMode::WithoutTax, Rate::whole(10), Rate::whole(18));
/// assert_eq!(line.discount_amount, Money::from_paise(1000)); // 10.00
/// assert_eq!(line.tax_amount, Money::from_paise(1620));      // 16.20
/// assert_eq!(line.line_total, Money::from_paise(10_620));    // 106.20
/// ```
pub fn compute(
    quantity: Decimal,
    unit_price: Decimal,
    price_mode: PriceMode,
    discount: Rate,
    tax: Rate,
) -> LineAmounts {
    LineBreakdown::compute(quantity, unit_price, price_mode, discount, tax)
        .and_then(|breakdown| breakdown.rounded())
        .unwrap_or_default()
}

// =============================================================================
// Unit Tests
// =============================================================================
