//! # gst-core: Pricing & Totals for GST Invoices
//!
//! This crate holds the arithmetic behind the sale invoice and purchase bill
//! screens: per-line pricing, invoice totals, and the request bodies those
//! screens submit. It does no I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        GST Billing                                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Sale / Purchase form (one row per line)            │   │
//! │  │     item ▾   qty   unit ▾   price  [WITH_TAX ▾]  disc %  GST %  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ every edit                             │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ gst-core (THIS CRATE) ★                         │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐   │   │
//! │  │   │   form    │  │  pricing  │  │  totals   │  │  invoice  │   │   │
//! │  │   │ text→num  │─►│ per line  │─►│ per bill  │─►│ requests  │   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO PANICS ON BAD INPUT • EXACT DECIMALS             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON                                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            Billing backend: POST /sales, POST /purchases        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`pricing`] - Discount, GST and total for one line
//! - [`totals`] - Subtotal, discount, tax and grand total for a document
//! - [`line`] - Form rows and their typed view
//! - [`form`] - Lenient reading of numeric text fields
//! - [`invoice`] - Sale/purchase drafts and request bodies
//! - [`summary`] - CGST/SGST split and amount in words
//! - [`payment`] - Balance due and round-off helpers
//! - [`money`] - Money type with integer paise
//! - [`validation`] - Advisory field checks
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: the same form state always gives the same figures
//! 2. **Never Reject**: blank or junk input is zero, never an error
//! 3. **Exact Arithmetic**: `Decimal` for rates and prices, paise for money
//! 4. **Half Away From Zero**: every currency amount rounds to paise that way
//!
//! ## Example Usage
//!
//! ```rust
//! use gst_core::pricing::compute;
//! use gst_core::{Money, PriceMode, Rate};
//! use rust_decimal_macros::dec;
//!
//! // 1 × ₹100, 10 % off, 18 % GST on top
//! let amounts = compute(dec!(1), dec!(100), PriceMode::WithoutTax, Rate::whole(10), Rate::whole(18));
//!
//! assert_eq!(amounts.discount_amount, Money::from_paise(1000));
//! assert_eq!(amounts.tax_amount, Money::from_paise(1620));
//! assert_eq!(amounts.line_total, Money::from_paise(10_620));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod form;
pub mod invoice;
pub mod line;
pub mod money;
pub mod payment;
pub mod pricing;
pub mod summary;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use invoice::{PurchaseDraft, PurchaseRequest, SaleDraft, SaleRequest};
pub use line::{LineItem, LineItemForm};
pub use money::Money;
pub use pricing::LineAmounts;
pub use summary::InvoiceSummary;
pub use totals::{InvoiceTotals, TableFooter};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// GST slabs offered in the tax selector, in percent.
pub const GST_SLABS: [u32; 5] = [0, 5, 12, 18, 28];

/// Quick-pick discounts offered in the discount selector, in percent.
pub const DISCOUNT_PRESETS: [u32; 6] = [0, 5, 10, 15, 20, 25];

/// Units offered in the unit selector.
pub const UNIT_OPTIONS: [&str; 13] = [
    "NONE",
    "BAGS (Bag)",
    "BOTTLES (Btl)",
    "BOX (Box)",
    "BUNDLES (Bdl)",
    "CANS (Can)",
    "CARTONS (Ctn)",
    "DOZENS (Dzn)",
    "GRAMMES (Gm)",
    "ROLLS (Rol)",
    "SQUARE FEET (Sqf)",
    "SQUARE METERS (Sqm)",
    "TABLETS (Tbs)",
];

/// Unit a new line starts with.
pub const DEFAULT_UNIT: &str = "NONE";

/// Longest invoice or bill number accepted without a warning.
pub const MAX_DOCUMENT_NUMBER_LEN: usize = 50;
