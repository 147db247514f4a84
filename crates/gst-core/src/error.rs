//! # Error Types
//!
//! Domain-specific error types for gst-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  gst-core errors (this file)                                           │
//! │  ├── CoreError        - A draft cannot become a request body           │
//! │  └── ValidationError  - Advisory field checks                          │
//! │                                                                         │
//! │  gst-billing CLI (apps/cli)                                            │
//! │  └── ConfigError      - Settings could not be loaded                   │
//! │                                                                         │
//! │  Pricing and totals have NO error type: bad input becomes zero.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, document, value)
//! 3. Errors are enum variants, never String

use rust_decimal::Decimal;
use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Reasons a sale or purchase draft cannot be turned into a request.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No line has an item, a quantity and a price.
    #[error("Add at least one item with a quantity and price")]
    NoValidItems,

    /// The document needs a customer or supplier.
    ///
    /// ## When This Occurs
    /// - Credit sale with no customer selected
    /// - Any purchase bill with no supplier selected
    #[error("Select a party for this {document}")]
    PartyRequired { document: &'static str },

    /// A date field could not be read.
    #[error("{field} '{value}' is not a valid date (expected {expected})")]
    InvalidDate {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation findings.
///
/// Pricing never rejects input, so these are reported back to the user as
/// warnings rather than stopping a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: String,
        min: Decimal,
        max: Decimal,
        value: Decimal,
    },

    /// Value must not be negative.
    #[error("{field} must not be negative, got {value}")]
    Negative { field: String, value: Decimal },

    /// Invalid format (e.g. phone number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
