//! # Invoice Summary
//!
//! The figures printed under the item table of a sale invoice, worked out
//! from the request body that was submitted.
//!
//! ```text
//! ┌──────────────────────────────┬──────────────────────────────────────────┐
//! │ Taxable amount   Σ(total−tax)│ Sub total            Σ line totals       │
//! │ CGST             ⌈GST / 2⌉   │ Round off            as entered          │
//! │ SGST             GST − CGST  │ Total                sub total + round off│
//! │                              │ Received / Balance                       │
//! │                              │ Amount in words                          │
//! └──────────────────────────────┴──────────────────────────────────────────┘
//! ```

use serde::Serialize;

use crate::invoice::SaleRequest;
use crate::money::Money;
use crate::payment::balance_due;

/// Footer and tax breakdown of a printed sale invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceSummary {
    pub total_quantity: i64,
    /// Shown as "You Saved".
    pub total_discount: Money,
    pub total_gst: Money,
    pub total_amount: Money,
    pub taxable_amount: Money,
    pub cgst: Money,
    pub sgst: Money,
    pub round_off: Money,
    pub invoice_amount: Money,
    pub received: Money,
    pub balance: Money,
    /// e.g. "One Hundred Six and Twenty Paise Rupees only"
    pub amount_in_words: String,
}

impl InvoiceSummary {
    pub fn from_sale(request: &SaleRequest) -> Self {
        let items = &request.items;

        let total_quantity = items
            .iter()
            .fold(0i64, |acc, item| acc.saturating_add(item.quantity));
        let total_discount = Money::total(items.iter().map(|item| item.discount_amount));
        let total_gst = Money::total(items.iter().map(|item| item.tax_amount));
        let total_amount = Money::total(items.iter().map(|item| item.total_amount));

        let (cgst, sgst) = split_gst(total_gst);
        let invoice_amount = total_amount
            .checked_add(request.round_off)
            .unwrap_or_default();

        InvoiceSummary {
            total_quantity,
            total_discount,
            total_gst,
            total_amount,
            taxable_amount: total_amount.checked_sub(total_gst).unwrap_or_default(),
            cgst,
            sgst,
            round_off: request.round_off,
            invoice_amount,
            received: request.received_amount,
            balance: balance_due(invoice_amount, request.received_amount),
            amount_in_words: format!("{} Rupees only", amount_in_words(invoice_amount)),
        }
    }
}

/// Splits intra-state GST into CGST and SGST.
///
/// CGST gets the half rounded away from zero, SGST the rest, so the two
/// always add back up to `gst`.
///
/// ```rust
/// use gst_core::summary::split_gst;
/// use gst_core::Money;
///
/// let (cgst, sgst) = split_gst(Money::from_paise(1621));
/// assert_eq!((cgst.paise(), sgst.paise()), (811, 810));
/// ```
pub fn split_gst(gst: Money) -> (Money, Money) {
    let paise = gst.paise();
    let cgst = Money::from_paise(paise / 2 + paise % 2);
    (cgst, gst - cgst)
}

// =============================================================================
// Amount in Words
// =============================================================================

const ONES: [&str; 10] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine",
];
const TEENS: [&str; 10] = [
    "Ten", "Eleven", "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen",
    "Eighteen", "Nineteen",
];
const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

/// Spells out an amount with Indian place names.
///
/// Paise are appended as "and N Paise" when non-zero. The caller adds the
/// currency suffix.
///
/// ```rust
/// use gst_core::summary::amount_in_words;
/// use gst_core::Money;
///
/// assert_eq!(amount_in_words(Money::from_paise(11_800)), "One Hundred Eighteen");
/// assert_eq!(
///     amount_in_words(Money::from_paise(12_345_650)),
///     "One Lakh Twenty Three Thousand Four Hundred Fifty Six and Fifty Paise"
/// );
/// ```
pub fn amount_in_words(amount: Money) -> String {
    let paise = amount.paise().unsigned_abs();
    let mut words = spell(paise / 100);

    let fraction = paise % 100;
    if fraction > 0 {
        words.push_str(" and ");
        words.push_str(&spell(fraction));
        words.push_str(" Paise");
    }

    if amount.is_negative() {
        words.insert_str(0, "Minus ");
    }
    words
}

fn spell(n: u64) -> String {
    // indices below are all < 10
    let digit = |d: u64| d as usize;

    match n {
        0 => "Zero".to_string(),
        1..=9 => ONES[digit(n)].to_string(),
        10..=19 => TEENS[digit(n - 10)].to_string(),
        20..=99 => with_rest(TENS[digit(n / 10)].to_string(), n % 10),
        100..=999 => with_rest(format!("{} Hundred", ONES[digit(n / 100)]), n % 100),
        1_000..=99_999 => with_rest(format!("{} Thousand", spell(n / 1_000)), n % 1_000),
        100_000..=9_999_999 => with_rest(format!("{} Lakh", spell(n / 100_000)), n % 100_000),
        _ => with_rest(
            format!("{} Crore", spell(n / 10_000_000)),
            n % 10_000_000,
        ),
    }
}

fn with_rest(mut head: String, rest: u64) -> String {
    if rest > 0 {
        head.push(' ');
        head.push_str(&spell(rest));
    }
    head
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoice::SaleItemRequest;
    use crate::types::{PaymentType, Rate, SaleType};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn item(quantity: i64, discount: i64, tax: i64, total: i64) -> SaleItemRequest {
        SaleItemRequest {
            item_id: 1,
            quantity,
            unit: "NONE".to_string(),
            price: dec!(100),
            discount_percentage: Rate::zero(),
            discount_amount: Money::from_paise(discount),
            tax_percentage: Rate::whole(18),
            tax_amount: Money::from_paise(tax),
            total_amount: Money::from_paise(total),
            item_name: "Notebook A5".to_string(),
            hsn_code: String::new(),
        }
    }

    fn request(items: Vec<SaleItemRequest>, round_off: i64, received: i64) -> SaleRequest {
        SaleRequest {
            invoice_number: None,
            invoice_date: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
            party_id: None,
            billing_name: String::new(),
            billing_address: String::new(),
            phone_number: String::new(),
            sale_type: SaleType::Credit,
            payment_type: PaymentType::Cash,
            bank_account_id: None,
            round_off: Money::from_paise(round_off),
            total_amount: Money::zero(),
            received_amount: Money::from_paise(received),
            description: String::new(),
            attachment_url: None,
            items,
        }
    }

    #[test]
    fn test_summary_from_sale() {
        let sale = request(
            vec![item(1, 1000, 1620, 10_620), item(3, 0, 5400, 35_400)],
            -20,
            20_000,
        );
        let summary = InvoiceSummary::from_sale(&sale);

        assert_eq!(summary.total_quantity, 4);
        assert_eq!(summary.total_discount.paise(), 1000);
        assert_eq!(summary.total_gst.paise(), 7020);
        assert_eq!(summary.total_amount.paise(), 46_020);
        assert_eq!(summary.taxable_amount.paise(), 39_000);
        assert_eq!(summary.cgst.paise(), 3510);
        assert_eq!(summary.sgst.paise(), 3510);
        assert_eq!(summary.invoice_amount.paise(), 46_000);
        assert_eq!(summary.balance.paise(), 26_000);
        assert_eq!(
            summary.amount_in_words,
            "Four Hundred Sixty Rupees only"
        );
    }

    #[test]
    fn test_empty_sale_summary() {
        let summary = InvoiceSummary::from_sale(&request(Vec::new(), 0, 0));
        assert_eq!(summary.invoice_amount, Money::zero());
        assert_eq!(summary.amount_in_words, "Zero Rupees only");
    }

    #[test]
    fn test_overflowing_summary_collapses_to_zero() {
        let huge = 5_000_000_000_000_000_000;
        let sale = request(vec![item(1, huge, 0, huge), item(1, huge, 0, huge)], 0, 0);
        let summary = InvoiceSummary::from_sale(&sale);

        assert_eq!(summary.total_discount, Money::zero());
        assert_eq!(summary.total_amount, Money::zero());
        assert_eq!(summary.invoice_amount, Money::zero());
        assert_eq!(summary.amount_in_words, "Zero Rupees only");

        // one line fits, but adding the round-off does not
        let sale = request(vec![item(1, 0, 0, i64::MAX)], 1, 0);
        assert_eq!(InvoiceSummary::from_sale(&sale).invoice_amount, Money::zero());
    }

    #[test]
    fn test_split_gst_odd_paise() {
        let (cgst, sgst) = split_gst(Money::from_paise(1621));
        assert_eq!(cgst + sgst, Money::from_paise(1621));

        let (cgst, sgst) = split_gst(Money::from_paise(-1621));
        assert_eq!(cgst.paise(), -811);
        assert_eq!(sgst.paise(), -810);
    }

    #[test]
    fn test_amount_in_words() {
        let words = |paise| amount_in_words(Money::from_paise(paise));

        assert_eq!(words(0), "Zero");
        assert_eq!(words(700), "Seven");
        assert_eq!(words(1300), "Thirteen");
        assert_eq!(words(4000), "Forty");
        assert_eq!(words(10_620), "One Hundred Six and Twenty Paise");
        assert_eq!(words(100_000), "One Thousand");
        assert_eq!(words(2_500_000), "Twenty Five Thousand");
        assert_eq!(words(10_000_000), "One Lakh");
        assert_eq!(words(1_000_000_000), "One Crore");
        assert_eq!(
            words(1_234_567_805),
            "One Crore Twenty Three Lakh Forty Five Thousand Six Hundred Seventy Eight and Five Paise"
        );
        assert_eq!(words(5), "Zero and Five Paise");
        assert_eq!(words(-5050), "Minus Fifty and Fifty Paise");
    }
}
