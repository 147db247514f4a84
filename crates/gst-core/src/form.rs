//! # Form Input Coercion
//!
//! Invoice forms hold every numeric field as the text the user typed. This
//! module turns that text into numbers the lenient way billing screens
//! expect:
//!
//! | Raw text   | `parse_number` | `parse_whole` |
//! |------------|----------------|---------------|
//! | `""`       | `None`         | `None`        |
//! | `"   "`    | `None`         | `None`        |
//! | `"12.5"`   | `Some(12.5)`   | `Some(12)`    |
//! | `"18%"`    | `Some(18)`     | `Some(18)`    |
//! | `"1e2"`    | `Some(100)`    | `Some(1)`     |
//! | `"abc"`    | `Some(0)`      | `Some(0)`     |
//!
//! `None` means the field was left blank, which matters for deciding whether
//! a line counts towards the totals. Text that is present but not a number
//! counts as zero. Nothing here ever fails.
//!
//! Whitespace-only text is blank here, so a row whose quantity or price is
//! just spaces does not count. A plain truthiness check on the raw string
//! (`qty && price`) would accept such a row and price it at zero.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

/// Parses the leading number of a form field.
///
/// Accepts an optional sign, digits with at most one decimal point, and an
/// optional exponent. Trailing text after the number is ignored.
///
/// ## Example
/// ```rust
/// use gst_core::form::parse_number;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(parse_number(" 118.00 "), Some(dec!(118)));
/// assert_eq!(parse_number("-0.5"), Some(dec!(-0.5)));
/// assert_eq!(parse_number("Rs 10"), Some(dec!(0)));
/// assert_eq!(parse_number("   "), None);
/// ```
pub fn parse_number(raw: &str) -> Option<Decimal> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }

    let prefix = numeric_prefix(text);
    if prefix.is_empty() {
        return Some(Decimal::ZERO);
    }

    Some(decimal_from_prefix(prefix).unwrap_or(Decimal::ZERO))
}

/// Parses the leading whole number of a form field, truncating any fraction.
///
/// Only sign and digits are read, so `"2.9"` is `2` and `".5"` is `0`.
pub fn parse_whole(raw: &str) -> Option<i64> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }

    let bytes = text.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }

    if end == digits_start {
        return Some(0);
    }

    Some(text[..end].parse().unwrap_or(0))
}

/// Returns the longest prefix of `text` that reads as a decimal number.
fn numeric_prefix(text: &str) -> &str {
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let mut digits = 0;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        digits += 1;
    }

    if end < bytes.len() && bytes[end] == b'.' {
        let mut frac_end = end + 1;
        let mut frac_digits = 0;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
            frac_digits += 1;
        }
        // "5." is a number, "." is not
        if digits + frac_digits > 0 {
            end = frac_end;
            digits += frac_digits;
        }
    }

    if digits == 0 {
        return "";
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    &text[..end]
}

/// Converts a prefix produced by `numeric_prefix` into a decimal.
///
/// `None` when the value is outside the `Decimal` range.
fn decimal_from_prefix(prefix: &str) -> Option<Decimal> {
    let (mantissa, exponent) = match prefix.find(['e', 'E']) {
        Some(at) => (&prefix[..at], prefix[at + 1..].parse::<i32>().ok()?),
        None => (prefix, 0),
    };

    let (negative, digits) = match mantissa.as_bytes().first() {
        Some(b'-') => (true, &mantissa[1..]),
        Some(b'+') => (false, &mantissa[1..]),
        _ => (false, mantissa),
    };

    // FromStr wants digits on both sides of the point
    let mut normalized = String::with_capacity(digits.len() + 2);
    if digits.starts_with('.') {
        normalized.push('0');
    }
    normalized.push_str(digits.trim_end_matches('.'));

    let mut value = Decimal::from_str(&normalized).ok()?;
    for _ in 0..exponent.unsigned_abs() {
        if value.is_zero() {
            break;
        }
        value = if exponent > 0 {
            value.checked_mul(Decimal::TEN)?
        } else {
            value.checked_div(Decimal::TEN)?
        };
    }

    Some(if negative { -value } else { value })
}

/// Serde helper: reads a form field that may arrive as a JSON string, a JSON
/// number, or `null`, and keeps it as text.
///
/// ```rust
/// use gst_core::form::text_field;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Row {
///     #[serde(deserialize_with = "text_field")]
///     qty: String,
/// }
///
/// let row: Row = serde_json::from_str(r#"{"qty": 2.5}"#).unwrap();
/// assert_eq!(row.qty, "2.5");
/// let row: Row = serde_json::from_str(r#"{"qty": null}"#).unwrap();
/// assert_eq!(row.qty, "");
/// ```
pub fn text_field<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(String::new()),
        serde_json::Value::String(text) => Ok(text),
        serde_json::Value::Number(number) => Ok(number.to_string()),
        serde_json::Value::Bool(flag) => Ok(flag.to_string()),
        other => Err(D::Error::custom(format!(
            "expected text or number, found {other}"
        ))),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
