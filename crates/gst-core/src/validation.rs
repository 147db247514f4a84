//! # Validation Module
//!
//! Advisory checks on invoice form fields.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Where Checks Happen                                │
//! │                                                                         │
//! │  Pricing / totals                                                       │
//! │  └── NONE. Blank or junk input is zero, out-of-range rates are used    │
//! │      as typed. The form must always show a total.                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  THIS MODULE                                                            │
//! │  ├── Range checks (rates 0-100, no negative qty/price)                 │
//! │  └── Header checks (document number length, phone format)              │
//! │      Reported as warnings; `strict` callers may refuse to submit       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Billing backend                                                        │
//! │  └── Final authority on what gets stored                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use gst_core::validation::{validate_percent, validate_phone};
//! use rust_decimal_macros::dec;
//!
//! assert!(validate_percent("taxPercent", dec!(18)).is_ok());
//! assert!(validate_percent("taxPercent", dec!(118)).is_err());
//! assert!(validate_phone("phoneNumber", "+91 98765 43210").is_ok());
//! ```

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::MAX_DOCUMENT_NUMBER_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// A percentage must lie within 0..=100.
pub fn validate_percent(field: &str, percent: Decimal) -> ValidationResult<()> {
    if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: Decimal::ZERO,
            max: Decimal::ONE_HUNDRED,
            value: percent,
        });
    }

    Ok(())
}

/// Quantities and prices must not be negative. Zero is allowed.
pub fn validate_non_negative(field: &str, value: Decimal) -> ValidationResult<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::Negative {
            field: field.to_string(),
            value,
        });
    }

    Ok(())
}

/// A manual round-off must stay within `±max`.
///
/// ## User Workflow
/// ```text
/// Grand total 1,062.40 ──► user types round-off -0.40 ──► OK
///                     └──► user types round-off 40    ──► warning: typo?
/// ```
pub fn validate_round_off(round_off: Decimal, max: Decimal) -> ValidationResult<()> {
    if round_off.abs() > max {
        return Err(ValidationError::OutOfRange {
            field: "roundOff".to_string(),
            min: -max,
            max,
            value: round_off,
        });
    }

    Ok(())
}

// =============================================================================
// Header Validators
// =============================================================================

/// Invoice and bill numbers are optional but bounded.
pub fn validate_document_number(field: &str, number: &str) -> ValidationResult<()> {
    if number.trim().chars().count() > MAX_DOCUMENT_NUMBER_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_DOCUMENT_NUMBER_LEN,
        });
    }

    Ok(())
}

/// Indian mobile/landline numbers: 10 digits, optionally prefixed with
/// `+91` or `0`. Spaces and hyphens are ignored. Blank is allowed.
pub fn validate_phone(field: &str, phone: &str) -> ValidationResult<()> {
    let digits: String = phone
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();

    if digits.is_empty() {
        return Ok(());
    }

    let local = digits
        .strip_prefix("+91")
        .or_else(|| digits.strip_prefix('0'))
        .unwrap_or(&digits);

    if local.len() != 10 || !local.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "expected 10 digits, optionally prefixed with +91".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
