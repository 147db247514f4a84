//! Fills in what the form would have filled in before a draft is priced.

use gst_core::line::LineItemForm;
use gst_core::payment::suggest_round_off;
use gst_core::totals::InvoiceTotals;
use tracing::debug;

use crate::config::CliConfig;

/// Gives every row with a blank unit the configured default unit.
pub fn fill_units(items: &mut [LineItemForm], config: &CliConfig) {
    for row in items.iter_mut().filter(|row| row.unit.trim().is_empty()) {
        row.unit = config.default_unit.clone();
    }
}

/// Fills a blank round-off with the whole-rupee suggestion for `totals`.
///
/// Returns whether the field was filled. A typed round-off, even `0`, is
/// left alone.
pub fn fill_round_off(round_off: &mut String, totals: &InvoiceTotals, config: &CliConfig) -> bool {
    if !config.auto_round_off || !round_off.trim().is_empty() {
        return false;
    }

    let suggested = suggest_round_off(totals.grand_total);
    debug!(grand_total = %totals.grand_total, %suggested, "Auto round-off");
    *round_off = suggested.to_decimal().to_string();
    true
}
