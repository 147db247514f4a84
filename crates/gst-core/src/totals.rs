//! # Invoice Totals
//!
//! Aggregates the valid lines of an invoice or bill.
//!
//! ## Aggregation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  lines ──► keep valid ──┬──► subtotal       = Σ qty × entered price     │
//! │                         ├──► total_discount = Σ rounded line discount   │
//! │                         └──► total_tax      = Σ rounded line tax        │
//! │                                                                         │
//! │  grand_total = subtotal − total_discount + total_tax + round_off        │
//! │  (subtotal and round_off rounded to paise first)                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Known Quirk
//! `subtotal` uses the price exactly as entered, even for `WITH_TAX` lines,
//! while each line's discount and tax are worked out on the tax-exclusive
//! base. For a `WITH_TAX` line the GST is therefore counted once inside the
//! entered price and again in `total_tax`. Invoices already issued were
//! totalled this way, so the rule is kept as is.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::line::LineItem;
use crate::money::Money;

/// Invoice-level figures shown beside the item table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTotals {
    pub subtotal: Money,
    pub total_discount: Money,
    pub total_tax: Money,
    pub round_off: Money,
    pub grand_total: Money,
}

/// Computes invoice totals over `lines` with a manual round-off.
///
/// Pure: the same lines and round-off always give the same totals.
///
/// ## Example
/// ```rust
/// use gst_core::line::{LineItem, LineItemForm};
/// use gst_core::totals::aggregate;
/// use gst_core::{ItemRef, Money};
/// use rust_decimal_macros::dec;
///
/// let row = LineItemForm {
///     item: Some(ItemRef { id: 1, name: "Notebook".into(), hsn_code: None }),
///     qty: "1".into(),
///     price: "100".into(),
///     discount_percent: "10".into(),
///     tax_percent: "18".into(),
///     ..Default::default()
/// };
/// let totals = aggregate(&[LineItem::from_form(&row)], dec!(-0.2));
///
/// assert_eq!(totals.subtotal, Money::from_paise(10_000));
/// assert_eq!(totals.total_discount, Money::from_paise(1000));
/// assert_eq!(totals.total_tax, Money::from_paise(1620));
/// assert_eq!(totals.grand_total, Money::from_paise(10_600));
/// ```
pub fn aggregate(lines: &[LineItem], round_off: Decimal) -> InvoiceTotals {
    let valid: Vec<&LineItem> = lines.iter().filter(|line| line.is_valid()).collect();
    let amounts: Vec<_> = valid.iter().map(|line| line.amounts()).collect();

    // a sum that leaves the representable range is zero, like a single line
    let raw_subtotal = valid
        .iter()
        .try_fold(Decimal::ZERO, |acc, line| acc.checked_add(line.raw_subtotal()))
        .unwrap_or_default();
    let total_discount = Money::total(amounts.iter().map(|a| a.discount_amount));
    let total_tax = Money::total(amounts.iter().map(|a| a.tax_amount));

    let subtotal = Money::from_decimal(raw_subtotal);
    let round_off = Money::from_decimal(round_off);

    // all terms are whole paise
    let grand_total = subtotal
        .checked_sub(total_discount)
        .and_then(|value| value.checked_add(total_tax))
        .and_then(|value| value.checked_add(round_off))
        .unwrap_or_default();

    InvoiceTotals {
        subtotal,
        total_discount,
        total_tax,
        round_off,
        grand_total,
    }
}

/// Figures in the footer row of the item table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableFooter {
    /// Σ quantity over lines with an item and a quantity, priced or not.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_quantity: Decimal,
    pub total_discount: Money,
    pub total_tax: Money,
    /// Σ line totals over valid lines.
    pub total_amount: Money,
}

impl TableFooter {
    pub fn from_lines(lines: &[LineItem]) -> Self {
        let total_quantity = lines
            .iter()
            .filter(|line| line.has_quantity())
            .map(LineItem::quantity_or_zero)
            .try_fold(Decimal::ZERO, |acc, qty| acc.checked_add(qty))
            .unwrap_or_default();

        let valid: Vec<_> = lines
            .iter()
            .filter(|line| line.is_valid())
            .map(LineItem::amounts)
            .collect();

        TableFooter {
            total_quantity,
            total_discount: Money::total(valid.iter().map(|a| a.discount_amount)),
            total_tax: Money::total(valid.iter().map(|a| a.tax_amount)),
            total_amount: Money::total(valid.iter().map(|a| a.line_total)),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
