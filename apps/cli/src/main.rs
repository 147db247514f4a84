//! # gst-billing
//!
//! Prices a sale or purchase draft and prints the request body the billing
//! backend expects.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  args ──► Command       settings ──► CliConfig                          │
//! │              │                           │                              │
//! │              ▼                           ▼                              │
//! │  draft.json ──► fill units / round-off ──► gst-core ──► request JSON   │
//! │                                               │             (stdout)    │
//! │                                               ▼                         │
//! │                               lines, totals, warnings (stderr)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Log Levels
//! - `RUST_LOG=debug` - Show debug messages
//! - `RUST_LOG=gst_core=trace` - Trace the core crate only
//! - Default: `log_filter` from the settings

mod cli;
mod config;
mod prepare;
mod report;

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use gst_core::invoice::{ensure_no_warnings, PurchaseRequest, SaleRequest};
use gst_core::{InvoiceSummary, PurchaseDraft, SaleDraft, TableFooter};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::cli::{Command, USAGE};
use crate::config::CliConfig;

fn main() -> ExitCode {
    let command = match Command::parse(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(err) => {
            eprintln!("{err}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    let config = match CliConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config);

    match run(command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Initializes the tracing subscriber. Logs go to stderr.
fn init_tracing(config: &CliConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Command, config: &CliConfig) -> Result<()> {
    match command {
        Command::Sale { draft, date } => {
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            run_sale(&draft, date, config)
        }
        Command::Purchase { draft } => run_purchase(&draft, config),
        Command::Slabs => {
            println!("{}", report::options_table());
            Ok(())
        }
        Command::Help => {
            println!("{USAGE}");
            Ok(())
        }
    }
}

fn run_sale(path: &Path, date: NaiveDate, config: &CliConfig) -> Result<()> {
    write_json(&sale_request(path, date, config)?, config)
}

fn run_purchase(path: &Path, config: &CliConfig) -> Result<()> {
    write_json(&purchase_request(path, config)?, config)
}

/// Reads, prices and checks a sale draft, logging as it goes.
fn sale_request(path: &Path, date: NaiveDate, config: &CliConfig) -> Result<SaleRequest> {
    let mut draft: SaleDraft = read_draft(path)?;
    prepare::fill_units(&mut draft.items, config);
    let totals = draft.totals();
    prepare::fill_round_off(&mut draft.round_off, &totals, config);

    let lines = draft.lines();
    report::log_lines(&lines);
    report::log_totals(&draft.totals(), &TableFooter::from_lines(&lines));

    let warnings = draft.warnings(config.max_round_off);
    report::log_warnings(&warnings);
    if config.strict {
        ensure_no_warnings(warnings).context("Strict mode: fix the warnings first")?;
    }

    let request = draft
        .to_request(date)
        .with_context(|| format!("Cannot build sale from {}", path.display()))?;
    report::log_summary(&InvoiceSummary::from_sale(&request));

    Ok(request)
}

fn purchase_request(path: &Path, config: &CliConfig) -> Result<PurchaseRequest> {
    let mut draft: PurchaseDraft = read_draft(path)?;
    prepare::fill_units(&mut draft.items, config);
    let totals = draft.totals();
    prepare::fill_round_off(&mut draft.round_off, &totals, config);

    let lines = draft.lines();
    report::log_lines(&lines);
    report::log_totals(&draft.totals(), &TableFooter::from_lines(&lines));

    let warnings = draft.warnings(config.max_round_off);
    report::log_warnings(&warnings);
    if config.strict {
        ensure_no_warnings(warnings).context("Strict mode: fix the warnings first")?;
    }

    draft
        .to_request()
        .with_context(|| format!("Cannot build purchase from {}", path.display()))
}

fn read_draft<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Cannot read draft {}", path.display()))?;
    let draft = serde_json::from_str(&text)
        .with_context(|| format!("Draft {} is not valid JSON", path.display()))?;

    info!(path = %path.display(), "Draft loaded");
    Ok(draft)
}

fn write_json<T: Serialize>(body: &T, config: &CliConfig) -> Result<()> {
    let json = if config.pretty_json {
        serde_json::to_string_pretty(body)
    } else {
        serde_json::to_string(body)
    }
    .context("Cannot serialize request body")?;

    println!("{json}");
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use gst_core::Money;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SALE: &str = r#"{
        "billingName": "Walk-in",
        "phoneNo": "98765 43210",
        "items": [
            {
                "item": { "id": 7, "name": "Notebook A5" },
                "qty": "1",
                "price": "99.60",
                "priceType": "WITHOUT_TAX"
            }
        ]
    }"#;

    fn draft_file(body: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn test_sale_request_from_draft() {
        let file = draft_file(SALE);
        let request = sale_request(file.path(), date(), &CliConfig::default()).unwrap();

        assert_eq!(request.invoice_date, date());
        assert_eq!(request.items.len(), 1);
        assert_eq!(request.items[0].unit, "NONE");
        assert_eq!(request.total_amount, Money::from_paise(9960));
        assert_eq!(request.received_amount, Money::from_paise(9960));
    }

    #[test]
    fn test_missing_draft_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");

        let err = sale_request(&path, date(), &CliConfig::default()).unwrap_err();
        assert!(format!("{err:#}").starts_with("Cannot read draft"));
    }

    #[test]
    fn test_invalid_json_fails() {
        let file = draft_file("{ \"items\": [ ");

        let err = sale_request(file.path(), date(), &CliConfig::default()).unwrap_err();
        assert!(err.to_string().contains("is not valid JSON"));

        let err = purchase_request(file.path(), &CliConfig::default()).unwrap_err();
        assert!(err.to_string().contains("is not valid JSON"));
    }

    #[test]
    fn test_strict_mode_rejects_warnings() {
        let file = draft_file(&SALE.replace("98765 43210", "12345"));

        // advisory only by default
        assert!(sale_request(file.path(), date(), &CliConfig::default()).is_ok());

        let strict = CliConfig {
            strict: true,
            ..Default::default()
        };
        let err = sale_request(file.path(), date(), &strict).unwrap_err();
        assert_eq!(err.to_string(), "Strict mode: fix the warnings first");
    }

    #[test]
    fn test_auto_round_off_reaches_whole_rupee() {
        let file = draft_file(SALE);
        let config = CliConfig {
            auto_round_off: true,
            ..Default::default()
        };
        let request = sale_request(file.path(), date(), &config).unwrap();

        assert_eq!(request.round_off, Money::from_paise(40));
        assert_eq!(request.total_amount, Money::from_paise(10_000));
    }

    #[test]
    fn test_purchase_request_from_draft() {
        let file = draft_file(
            r#"{
                "billNumber": "PB-17",
                "billDate": "15/06/2024",
                "party": { "id": 3, "name": "Sharma Traders" },
                "items": [
                    { "item": { "id": 7, "name": "Notebook A5" }, "qty": "10", "price": "45" }
                ]
            }"#,
        );
        let config = CliConfig {
            auto_round_off: true,
            ..Default::default()
        };
        let request = purchase_request(file.path(), &config).unwrap();

        assert_eq!(request.bill_number.as_deref(), Some("PB-17"));
        assert_eq!(request.party_id, 3);
        assert_eq!(request.round_off, Money::zero());
        assert_eq!(request.items.len(), 1);
    }
}
