//! # Line Items
//!
//! One row of a sale invoice or purchase bill.
//!
//! ## Form Row → Line Item
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  LineItemForm (text, as typed)        LineItem (typed)                  │
//! │  ─────────────────────────────        ─────────────────────────────     │
//! │  item:            {id, name}    ───►  item: Option<ItemRef>             │
//! │  qty:             "2"           ───►  quantity: Some(2)                 │
//! │  price:           ""            ───►  unit_price: None  (blank)         │
//! │  priceType:       "WITH_TAX"    ───►  price_mode: WithTax               │
//! │  discountPercent: "abc"         ───►  discount: 0 %                     │
//! │  taxPercent:      "18"          ───►  tax: 18 %                         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A line counts towards the invoice only when it is *valid*: an item is
//! selected and neither the quantity nor the price field is blank.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::form::{parse_number, parse_whole, text_field};
use crate::pricing::{compute, LineAmounts};
use crate::types::{ItemRef, PriceMode, Rate};

/// A line as held by the invoice form: every numeric field is raw text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LineItemForm {
    pub item: Option<ItemRef>,
    #[serde(deserialize_with = "text_field")]
    pub qty: String,
    pub unit: String,
    #[serde(deserialize_with = "text_field")]
    pub price: String,
    pub price_type: String,
    #[serde(deserialize_with = "text_field")]
    pub discount_percent: String,
    #[serde(deserialize_with = "text_field")]
    pub tax_percent: String,
}

/// A typed line item.
///
/// `quantity` and `unit_price` keep the blank/non-blank distinction of the
/// form; everything else is already coerced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineItem {
    pub item: Option<ItemRef>,
    pub quantity: Option<Decimal>,
    /// Quantity as a whole number, truncated, for payloads that carry an
    /// integer count.
    pub whole_quantity: Option<i64>,
    pub unit: String,
    pub unit_price: Option<Decimal>,
    pub price_mode: PriceMode,
    pub discount: Rate,
    pub tax: Rate,
}

impl LineItem {
    /// Reads a form row.
    pub fn from_form(form: &LineItemForm) -> Self {
        LineItem {
            item: form.item.clone(),
            quantity: parse_number(&form.qty),
            whole_quantity: parse_whole(&form.qty),
            unit: form.unit.clone(),
            unit_price: parse_number(&form.price),
            price_mode: PriceMode::from_form(&form.price_type),
            discount: Rate::from_percent(parse_number(&form.discount_percent).unwrap_or_default()),
            tax: Rate::from_percent(parse_number(&form.tax_percent).unwrap_or_default()),
        }
    }

    /// Item selected, quantity and price entered.
    pub fn is_valid(&self) -> bool {
        self.item.is_some() && self.quantity.is_some() && self.unit_price.is_some()
    }

    /// Item selected and quantity entered (price may still be blank).
    ///
    /// Such lines already count towards the quantity shown under the table.
    pub fn has_quantity(&self) -> bool {
        self.item.is_some() && self.quantity.is_some()
    }

    /// Quantity, blank as zero.
    pub fn quantity_or_zero(&self) -> Decimal {
        self.quantity.unwrap_or_default()
    }

    /// Unit price, blank as zero.
    pub fn unit_price_or_zero(&self) -> Decimal {
        self.unit_price.unwrap_or_default()
    }

    /// Discount, tax and total for this line.
    pub fn amounts(&self) -> LineAmounts {
        compute(
            self.quantity_or_zero(),
            self.unit_price_or_zero(),
            self.price_mode,
            self.discount,
            self.tax,
        )
    }

    /// Quantity times the price as entered, ignoring price mode.
    ///
    /// Zero when the product is not representable.
    pub fn raw_subtotal(&self) -> Decimal {
        self.quantity_or_zero()
            .checked_mul(self.unit_price_or_zero())
            .unwrap_or_default()
    }

    /// Display name of the selected item, empty when none is selected.
    pub fn item_name(&self) -> &str {
        self.item.as_ref().map(|item| item.name.as_str()).unwrap_or("")
    }
}

impl From<&LineItemForm> for LineItem {
    fn from(form: &LineItemForm) -> Self {
        LineItem::from_form(form)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
