//! # Domain Types
//!
//! Small value types shared by pricing, totals and the request payloads.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Rate       │   │   PriceMode     │   │    SaleType     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  percent (Dec)  │   │  WITHOUT_TAX    │   │  Cash           │       │
//! │  │  18 = 18 %      │   │  WITH_TAX       │   │  Credit         │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    ItemRef      │   │    PartyRef     │   │  PaymentType    │       │
//! │  │  id, name,      │   │  id, name,      │   │  Cash / Cheque  │       │
//! │  │  hsnCode        │   │  address, phone │   │  / bank name    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Items, parties and bank accounts live in the billing backend. The
//! `*Ref` types carry only what a request body needs from them.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Rate
// =============================================================================

/// A percentage rate (GST or discount).
///
/// Held as an exact decimal percentage: `Rate::whole(18)` is 18 %, and
/// `Rate::from_percent(dec!(2.5))` is 2.5 %. Serializes as a JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Rate(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Rate {
    /// Creates a rate from a decimal percentage.
    #[inline]
    pub const fn from_percent(percent: Decimal) -> Self {
        Rate(percent)
    }

    /// Creates a rate from a whole percentage (e.g. a GST slab).
    #[inline]
    pub fn whole(percent: u32) -> Self {
        Rate(Decimal::from(percent))
    }

    /// Returns the rate as a percentage (18 for 18 %).
    #[inline]
    pub const fn percent(&self) -> Decimal {
        self.0
    }

    /// Returns the rate as a fraction (0.18 for 18 %).
    #[inline]
    pub fn fraction(&self) -> Decimal {
        self.0 / Decimal::ONE_HUNDRED
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        Rate(Decimal::ZERO)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0.normalize())
    }
}

// =============================================================================
// Price Mode
// =============================================================================

/// Whether an entered unit price already includes GST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriceMode {
    /// Price excludes GST; tax is added on top.
    #[default]
    WithoutTax,
    /// Price includes GST; the tax-exclusive base is backed out first.
    WithTax,
}

impl PriceMode {
    /// Reads a price-mode form value.
    ///
    /// Anything other than `WITH_TAX` is treated as `WITHOUT_TAX`, which is
    /// also what a blank selector means.
    pub fn from_form(raw: &str) -> Self {
        match raw.trim() {
            "WITH_TAX" => PriceMode::WithTax,
            _ => PriceMode::WithoutTax,
        }
    }

    /// The wire/form label of this mode.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PriceMode::WithoutTax => "WITHOUT_TAX",
            PriceMode::WithTax => "WITH_TAX",
        }
    }
}

// =============================================================================
// Sale Type
// =============================================================================

/// Cash sales are settled at once; credit sales leave a balance on the party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum SaleType {
    #[default]
    Cash,
    Credit,
}

// =============================================================================
// Payment Type
// =============================================================================

/// How a sale or purchase is paid.
///
/// On the wire this is a plain string: `"Cash"`, `"Cheque"`, or the name of
/// one of the company's bank accounts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentType {
    #[default]
    Cash,
    Cheque,
    /// Transfer to or from the named bank account.
    Bank(String),
}

impl From<String> for PaymentType {
    fn from(value: String) -> Self {
        match value.trim() {
            "" | "Cash" => PaymentType::Cash,
            "Cheque" => PaymentType::Cheque,
            name => PaymentType::Bank(name.to_string()),
        }
    }
}

impl From<PaymentType> for String {
    fn from(value: PaymentType) -> Self {
        match value {
            PaymentType::Cash => "Cash".to_string(),
            PaymentType::Cheque => "Cheque".to_string(),
            PaymentType::Bank(name) => name,
        }
    }
}

// =============================================================================
// References to Backend Records
// =============================================================================

/// A catalogue item picked on a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRef {
    pub id: i64,
    pub name: String,
    /// HSN/SAC classification code, printed on tax invoices.
    #[serde(default)]
    pub hsn_code: Option<String>,
}

/// A customer or supplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyRef {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// One of the company's bank accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankAccountRef {
    pub id: i64,
    pub name: String,
}

// =============================================================================
// Unit Tests
// =============================================================================
