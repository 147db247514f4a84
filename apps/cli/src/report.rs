//! Logs the figures behind a request body.
//!
//! Everything here goes to the tracing subscriber (stderr), so stdout only
//! ever carries the JSON body.

use gst_core::line::LineItem;
use gst_core::{
    InvoiceSummary, InvoiceTotals, TableFooter, ValidationError, DISCOUNT_PRESETS, GST_SLABS,
    UNIT_OPTIONS,
};
use tracing::{info, warn};

/// One event per row that counts towards the total.
pub fn log_lines(lines: &[LineItem]) {
    for (index, line) in lines.iter().enumerate().filter(|(_, line)| line.is_valid()) {
        let amounts = line.amounts();
        info!(
            row = index + 1,
            item = line.item_name(),
            qty = %line.quantity_or_zero(),
            price = %line.unit_price_or_zero(),
            mode = line.price_mode.as_str(),
            discount = %amounts.discount_amount,
            tax = %amounts.tax_amount,
            total = %amounts.line_total,
            "Line"
        );
    }
}

pub fn log_totals(totals: &InvoiceTotals, footer: &TableFooter) {
    info!(
        quantity = %footer.total_quantity,
        line_total = %footer.total_amount,
        "Table footer"
    );
    info!(
        subtotal = %totals.subtotal,
        discount = %totals.total_discount,
        tax = %totals.total_tax,
        round_off = %totals.round_off,
        grand_total = %totals.grand_total,
        "Totals"
    );
}

pub fn log_summary(summary: &InvoiceSummary) {
    info!(
        taxable = %summary.taxable_amount,
        cgst = %summary.cgst,
        sgst = %summary.sgst,
        received = %summary.received,
        balance = %summary.balance,
        words = %summary.amount_in_words,
        "Invoice summary"
    );
}

pub fn log_warnings(warnings: &[ValidationError]) {
    for warning in warnings {
        warn!(%warning, "Check this field");
    }
}

/// The selector options, one group per line.
pub fn options_table() -> String {
    let percents = |values: &[u32]| {
        values
            .iter()
            .map(|v| format!("{v}%"))
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        "GST slabs: {}\nDiscount presets: {}\nUnits: {}",
        percents(&GST_SLABS),
        percents(&DISCOUNT_PRESETS),
        UNIT_OPTIONS.join(", ")
    )
}
