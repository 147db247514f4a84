//! # Sale & Purchase Requests
//!
//! Drafts hold what the invoice screens hold; requests are the JSON bodies
//! the billing backend accepts.
//!
//! ## Draft → Request
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  SaleDraft ──► lines() ──► filter valid ──► SaleItemRequest per line    │
//! │      │                                                                  │
//! │      ├──► totals() ──► totalAmount, receivedAmount                      │
//! │      └──► party / billing fallbacks ──► SaleRequest ──► POST /sales     │
//! │                                                                         │
//! │  PurchaseDraft ──► ... ──► PurchaseRequest ──► POST /purchases          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format Rules
//! - Field names are camelCase and must not change: the backend binds them
//!   by name.
//! - Every number is a JSON number (never a string). Currency values are
//!   rounded to paise first.
//! - Sale lines carry an integer `quantity`; purchase lines a decimal one.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};
use tracing::debug;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::form::{parse_number, text_field};
use crate::line::{LineItem, LineItemForm};
use crate::money::Money;
use crate::payment::settled_amount;
use crate::totals::{aggregate, InvoiceTotals};
use crate::types::{BankAccountRef, PartyRef, PaymentType, Rate, SaleType};
use crate::validation::{
    validate_document_number, validate_non_negative, validate_percent, validate_phone,
    validate_round_off,
};

/// Date format of the bill date field on the purchase screen.
pub const BILL_DATE_FORMAT: &str = "%d/%m/%Y";

// =============================================================================
// Sale
// =============================================================================

/// A sale invoice as entered on the sale screen.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SaleDraft {
    /// Blank lets the backend assign the next number.
    pub invoice_number: String,
    pub party: Option<PartyRef>,
    pub billing_name: String,
    pub billing_address: String,
    pub phone_no: String,
    pub sale_type: SaleType,
    pub payment_type: PaymentType,
    pub bank_account: Option<BankAccountRef>,
    #[serde(deserialize_with = "text_field")]
    pub round_off: String,
    /// Only read for credit sales; cash sales are received in full.
    #[serde(deserialize_with = "text_field")]
    pub received_amount: String,
    pub items: Vec<LineItemForm>,
}

/// Body of `POST /sales`.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SaleRequest {
    pub invoice_number: Option<String>,
    #[ts(type = "string")]
    pub invoice_date: NaiveDate,
    pub party_id: Option<i64>,
    pub billing_name: String,
    pub billing_address: String,
    pub phone_number: String,
    pub sale_type: SaleType,
    #[ts(type = "string")]
    pub payment_type: PaymentType,
    pub bank_account_id: Option<i64>,
    #[ts(type = "number")]
    pub round_off: Money,
    #[ts(type = "number")]
    pub total_amount: Money,
    #[ts(type = "number")]
    pub received_amount: Money,
    pub description: String,
    pub attachment_url: Option<String>,
    pub items: Vec<SaleItemRequest>,
}

/// One line of a sale request.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SaleItemRequest {
    pub item_id: i64,
    pub quantity: i64,
    pub unit: String,
    #[ts(type = "number")]
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[ts(type = "number")]
    pub discount_percentage: Rate,
    #[ts(type = "number")]
    pub discount_amount: Money,
    #[ts(type = "number")]
    pub tax_percentage: Rate,
    #[ts(type = "number")]
    pub tax_amount: Money,
    #[ts(type = "number")]
    pub total_amount: Money,
    pub item_name: String,
    pub hsn_code: String,
}

impl SaleItemRequest {
    fn from_line(line: &LineItem) -> Option<Self> {
        let item = line.item.as_ref()?;
        let amounts = line.amounts();

        Some(SaleItemRequest {
            item_id: item.id,
            quantity: line.whole_quantity.unwrap_or_default(),
            unit: line.unit.clone(),
            price: line.unit_price_or_zero(),
            discount_percentage: line.discount,
            discount_amount: amounts.discount_amount,
            tax_percentage: line.tax,
            tax_amount: amounts.tax_amount,
            total_amount: amounts.line_total,
            item_name: item.name.clone(),
            hsn_code: item.hsn_code.clone().unwrap_or_default(),
        })
    }
}

impl SaleDraft {
    /// Typed view of every row, valid or not.
    pub fn lines(&self) -> Vec<LineItem> {
        self.items.iter().map(LineItem::from_form).collect()
    }

    /// Manual round-off, blank as zero.
    pub fn round_off_value(&self) -> Decimal {
        parse_number(&self.round_off).unwrap_or_default()
    }

    pub fn totals(&self) -> InvoiceTotals {
        aggregate(&self.lines(), self.round_off_value())
    }

    /// What the customer pays now.
    ///
    /// Cash sales are received in full; credit sales use the entered amount.
    pub fn received(&self, totals: &InvoiceTotals) -> Money {
        match self.sale_type {
            SaleType::Cash => totals.grand_total,
            SaleType::Credit => settled_amount(parse_number(&self.received_amount)),
        }
    }

    /// Advisory findings for the header and every valid line.
    pub fn warnings(&self, max_round_off: Decimal) -> Vec<ValidationError> {
        let mut warnings = Vec::new();
        if let Err(err) = validate_document_number("invoiceNumber", &self.invoice_number) {
            warnings.push(err);
        }
        let phone = self.phone_no.trim();
        if let Err(err) = validate_phone("phoneNumber", phone) {
            warnings.push(err);
        }
        if let Err(err) = validate_round_off(self.round_off_value(), max_round_off) {
            warnings.push(err);
        }
        warnings.extend(line_warnings(&self.lines()));
        warnings
    }

    /// Builds the `POST /sales` body dated `invoice_date`.
    ///
    /// ## Errors
    /// - [`CoreError::PartyRequired`] for a credit sale without a customer
    /// - [`CoreError::NoValidItems`] when no line is complete
    pub fn to_request(&self, invoice_date: NaiveDate) -> CoreResult<SaleRequest> {
        if self.sale_type == SaleType::Credit && self.party.is_none() {
            return Err(CoreError::PartyRequired {
                document: "credit sale",
            });
        }

        let lines = self.lines();
        let items: Vec<_> = lines
            .iter()
            .filter(|line| line.is_valid())
            .filter_map(SaleItemRequest::from_line)
            .collect();
        if items.is_empty() {
            return Err(CoreError::NoValidItems);
        }

        let totals = aggregate(&lines, self.round_off_value());
        let party = self.party.as_ref();

        let request = SaleRequest {
            invoice_number: non_blank(&self.invoice_number),
            invoice_date,
            party_id: party.map(|p| p.id),
            billing_name: or_party(&self.billing_name, party.map(|p| Some(p.name.clone()))),
            billing_address: or_party(&self.billing_address, party.map(|p| p.address.clone())),
            phone_number: or_party(&self.phone_no, party.map(|p| p.phone.clone())),
            sale_type: self.sale_type,
            payment_type: self.payment_type.clone(),
            bank_account_id: self.bank_account.as_ref().map(|b| b.id),
            round_off: totals.round_off,
            total_amount: totals.grand_total,
            received_amount: self.received(&totals),
            description: String::new(),
            attachment_url: None,
            items,
        };

        debug!(
            items = request.items.len(),
            total = %request.total_amount,
            sale_type = ?request.sale_type,
            "Built sale request"
        );

        Ok(request)
    }
}

// =============================================================================
// Purchase
// =============================================================================

/// A purchase bill as entered on the purchase screen.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PurchaseDraft {
    pub bill_number: String,
    /// `DD/MM/YYYY`, as the date picker shows it.
    pub bill_date: String,
    pub state_of_supply: String,
    pub party: Option<PartyRef>,
    pub phone_no: String,
    pub payment_type: PaymentType,
    #[serde(deserialize_with = "text_field")]
    pub round_off: String,
    #[serde(deserialize_with = "text_field")]
    pub paid_amount: String,
    pub items: Vec<LineItemForm>,
}

/// Body of `POST /purchases`.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRequest {
    pub bill_number: Option<String>,
    #[ts(type = "string")]
    #[serde(serialize_with = "serialize_js_timestamp")]
    pub bill_date: DateTime<Utc>,
    pub state_of_supply: Option<String>,
    pub party_id: i64,
    pub phone_no: Option<String>,
    #[ts(type = "string")]
    pub payment_type: PaymentType,
    #[ts(type = "number")]
    pub round_off: Money,
    #[ts(type = "number")]
    pub paid_amount: Money,
    pub description: Option<String>,
    pub items: Vec<PurchaseItemRequest>,
}

/// One line of a purchase request.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseItemRequest {
    pub item_id: i64,
    pub item_name: String,
    #[ts(type = "number")]
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
    pub unit: String,
    #[ts(type = "number")]
    #[serde(with = "rust_decimal::serde::float")]
    pub price_per_unit: Decimal,
    #[ts(type = "number")]
    pub discount_percent: Rate,
    #[ts(type = "number")]
    pub discount_amount: Money,
    #[ts(type = "number")]
    pub tax_percent: Rate,
    #[ts(type = "number")]
    pub tax_amount: Money,
}

impl PurchaseItemRequest {
    fn from_line(line: &LineItem) -> Option<Self> {
        let item = line.item.as_ref()?;
        let amounts = line.amounts();

        Some(PurchaseItemRequest {
            item_id: item.id,
            item_name: item.name.clone(),
            quantity: line.quantity_or_zero(),
            unit: line.unit.clone(),
            price_per_unit: line.unit_price_or_zero(),
            discount_percent: line.discount,
            discount_amount: amounts.discount_amount,
            tax_percent: line.tax,
            tax_amount: amounts.tax_amount,
        })
    }
}

impl PurchaseDraft {
    /// Typed view of every row, valid or not.
    pub fn lines(&self) -> Vec<LineItem> {
        self.items.iter().map(LineItem::from_form).collect()
    }

    /// Manual round-off, blank as zero.
    pub fn round_off_value(&self) -> Decimal {
        parse_number(&self.round_off).unwrap_or_default()
    }

    pub fn totals(&self) -> InvoiceTotals {
        aggregate(&self.lines(), self.round_off_value())
    }

    /// Amount paid to the supplier now, blank as zero.
    pub fn paid(&self) -> Money {
        settled_amount(parse_number(&self.paid_amount))
    }

    /// Reads the bill date as midnight UTC of the entered day.
    pub fn bill_date_utc(&self) -> CoreResult<DateTime<Utc>> {
        let value = self.bill_date.trim();
        NaiveDate::parse_from_str(value, BILL_DATE_FORMAT)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|midnight| midnight.and_utc())
            .ok_or_else(|| CoreError::InvalidDate {
                field: "billDate",
                value: value.to_string(),
                expected: "DD/MM/YYYY",
            })
    }

    /// Advisory findings for the header and every valid line.
    pub fn warnings(&self, max_round_off: Decimal) -> Vec<ValidationError> {
        let mut warnings = Vec::new();
        if let Err(err) = validate_document_number("billNumber", &self.bill_number) {
            warnings.push(err);
        }
        if let Err(err) = validate_phone("phoneNo", self.phone_no.trim()) {
            warnings.push(err);
        }
        if let Err(err) = validate_round_off(self.round_off_value(), max_round_off) {
            warnings.push(err);
        }
        warnings.extend(line_warnings(&self.lines()));
        warnings
    }

    /// Builds the `POST /purchases` body.
    ///
    /// ## Errors
    /// - [`CoreError::PartyRequired`] without a supplier
    /// - [`CoreError::NoValidItems`] when no line is complete
    /// - [`CoreError::InvalidDate`] when the bill date is not `DD/MM/YYYY`
    pub fn to_request(&self) -> CoreResult<PurchaseRequest> {
        let party = self.party.as_ref().ok_or(CoreError::PartyRequired {
            document: "purchase bill",
        })?;

        let lines = self.lines();
        let items: Vec<_> = lines
            .iter()
            .filter(|line| line.is_valid())
            .filter_map(PurchaseItemRequest::from_line)
            .collect();
        if items.is_empty() {
            return Err(CoreError::NoValidItems);
        }

        let request = PurchaseRequest {
            bill_number: non_blank(&self.bill_number),
            bill_date: self.bill_date_utc()?,
            state_of_supply: non_blank(&self.state_of_supply),
            party_id: party.id,
            phone_no: non_blank(&self.phone_no),
            payment_type: self.payment_type.clone(),
            round_off: Money::from_decimal(self.round_off_value()),
            paid_amount: self.paid(),
            description: None,
            items,
        };

        debug!(
            items = request.items.len(),
            party_id = request.party_id,
            "Built purchase request"
        );

        Ok(request)
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Advisory findings for the valid lines, labelled by 1-based row number.
fn line_warnings(lines: &[LineItem]) -> Vec<ValidationError> {
    let mut warnings = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        if !line.is_valid() {
            continue;
        }
        let row = index + 1;
        let checks = [
            validate_non_negative(&format!("items[{row}].qty"), line.quantity_or_zero()),
            validate_non_negative(&format!("items[{row}].price"), line.unit_price_or_zero()),
            validate_percent(
                &format!("items[{row}].discountPercent"),
                line.discount.percent(),
            ),
            validate_percent(&format!("items[{row}].taxPercent"), line.tax.percent()),
        ];
        warnings.extend(checks.into_iter().filter_map(Result::err));
    }

    warnings
}

/// Turns advisory findings into a hard error, for callers that refuse to
/// submit anything questionable.
pub fn ensure_no_warnings(warnings: Vec<ValidationError>) -> CoreResult<()> {
    match warnings.into_iter().next() {
        Some(first) => Err(CoreError::Validation(first)),
        None => Ok(()),
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// The entered value, else the party's value, else empty.
fn or_party(entered: &str, from_party: Option<Option<String>>) -> String {
    non_blank(entered)
        .or_else(|| from_party.flatten())
        .unwrap_or_default()
}

/// `2024-06-15T00:00:00.000Z`, the shape `Date.prototype.toISOString` gives.
fn serialize_js_timestamp<S: Serializer>(
    value: &DateTime<Utc>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&value.format("%Y-%m-%dT%H:%M:%S%.3fZ"))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ItemRef;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn line(id: i64, name: &str, qty: &str, price: &str, disc: &str, tax: &str) -> LineItemForm {
        LineItemForm {
            item: Some(ItemRef {
                id,
                name: name.to_string(),
                hsn_code: Some("4820".to_string()),
            }),
            qty: qty.to_string(),
            unit: "BOX (Box)".to_string(),
            price: price.to_string(),
            price_type: "WITHOUT_TAX".to_string(),
            discount_percent: disc.to_string(),
            tax_percent: tax.to_string(),
        }
    }

    fn customer() -> PartyRef {
        PartyRef {
            id: 12,
            name: "Sharma Traders".to_string(),
            address: Some("14 MG Road, Pune".to_string()),
            phone: Some("9822012345".to_string()),
        }
    }

    fn invoice_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn test_cash_sale_request_shape() {
        let draft = SaleDraft {
            items: vec![line(3, "Notebook A5", "1", "100", "10", "18"), LineItemForm::default()],
            ..Default::default()
        };

        let request = draft.to_request(invoice_date()).unwrap();
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value,
            json!({
                "invoiceNumber": null,
                "invoiceDate": "2024-06-15",
                "partyId": null,
                "billingName": "",
                "billingAddress": "",
                "phoneNumber": "",
                "saleType": "Cash",
                "paymentType": "Cash",
                "bankAccountId": null,
                "roundOff": 0.0,
                "totalAmount": 106.2,
                "receivedAmount": 106.2,
                "description": "",
                "attachmentUrl": null,
                "items": [{
                    "itemId": 3,
                    "quantity": 1,
                    "unit": "BOX (Box)",
                    "price": 100.0,
                    "discountPercentage": 10.0,
                    "discountAmount": 10.0,
                    "taxPercentage": 18.0,
                    "taxAmount": 16.2,
                    "totalAmount": 106.2,
                    "itemName": "Notebook A5",
                    "hsnCode": "4820"
                }]
            })
        );
    }

    #[test]
    fn test_credit_sale_uses_party_and_received_amount() {
        let draft = SaleDraft {
            invoice_number: " INV-0042 ".to_string(),
            party: Some(customer()),
            billing_name: "Sharma Traders (Branch)".to_string(),
            sale_type: SaleType::Credit,
            payment_type: PaymentType::Bank("HDFC Current".to_string()),
            bank_account: Some(BankAccountRef {
                id: 2,
                name: "HDFC Current".to_string(),
            }),
            round_off: "-0.2".to_string(),
            received_amount: "50".to_string(),
            items: vec![line(3, "Notebook A5", "1", "100", "10", "18")],
            ..Default::default()
        };

        let request = draft.to_request(invoice_date()).unwrap();
        assert_eq!(request.invoice_number.as_deref(), Some("INV-0042"));
        assert_eq!(request.party_id, Some(12));
        assert_eq!(request.billing_name, "Sharma Traders (Branch)");
        assert_eq!(request.billing_address, "14 MG Road, Pune");
        assert_eq!(request.phone_number, "9822012345");
        assert_eq!(request.bank_account_id, Some(2));
        assert_eq!(request.round_off, Money::from_paise(-20));
        assert_eq!(request.total_amount, Money::from_paise(10_600));
        assert_eq!(request.received_amount, Money::from_paise(5000));

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["paymentType"], json!("HDFC Current"));
        assert_eq!(value["saleType"], json!("Credit"));
    }

    #[test]
    fn test_credit_sale_without_party_is_rejected() {
        let draft = SaleDraft {
            sale_type: SaleType::Credit,
            items: vec![line(3, "Notebook A5", "1", "100", "", "")],
            ..Default::default()
        };
        assert!(matches!(
            draft.to_request(invoice_date()),
            Err(CoreError::PartyRequired { .. })
        ));
    }

    #[test]
    fn test_sale_without_complete_lines_is_rejected() {
        let draft = SaleDraft {
            items: vec![line(3, "Notebook A5", "2", "", "", "18")],
            ..Default::default()
        };
        assert!(matches!(
            draft.to_request(invoice_date()),
            Err(CoreError::NoValidItems)
        ));
    }

    #[test]
    fn test_sale_quantity_is_truncated() {
        let draft = SaleDraft {
            items: vec![line(3, "Notebook A5", "2.75", "10", "", "")],
            ..Default::default()
        };
        let request = draft.to_request(invoice_date()).unwrap();
        assert_eq!(request.items[0].quantity, 2);
        // amounts still use the decimal quantity
        assert_eq!(request.items[0].total_amount, Money::from_paise(2750));
    }

    #[test]
    fn test_purchase_request_shape() {
        let draft = PurchaseDraft {
            bill_number: String::new(),
            bill_date: "15/06/2024".to_string(),
            party: Some(customer()),
            payment_type: PaymentType::Cheque,
            round_off: "0.5".to_string(),
            paid_amount: "".to_string(),
            items: vec![line(8, "Printer Paper", "2.5", "240", "", "12")],
            ..Default::default()
        };

        let value = serde_json::to_value(draft.to_request().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "billNumber": null,
                "billDate": "2024-06-15T00:00:00.000Z",
                "stateOfSupply": null,
                "partyId": 12,
                "phoneNo": null,
                "paymentType": "Cheque",
                "roundOff": 0.5,
                "paidAmount": 0.0,
                "description": null,
                "items": [{
                    "itemId": 8,
                    "itemName": "Printer Paper",
                    "quantity": 2.5,
                    "unit": "BOX (Box)",
                    "pricePerUnit": 240.0,
                    "discountPercent": 0.0,
                    "discountAmount": 0.0,
                    "taxPercent": 12.0,
                    "taxAmount": 72.0
                }]
            })
        );
    }

    #[test]
    fn test_purchase_requires_party_and_date() {
        let mut draft = PurchaseDraft {
            bill_date: "15/06/2024".to_string(),
            items: vec![line(8, "Printer Paper", "1", "240", "", "12")],
            ..Default::default()
        };
        assert!(matches!(
            draft.to_request(),
            Err(CoreError::PartyRequired { .. })
        ));

        draft.party = Some(customer());
        draft.bill_date = "2024-06-15".to_string();
        assert!(matches!(
            draft.to_request(),
            Err(CoreError::InvalidDate { .. })
        ));

        draft.bill_date = "31/02/2024".to_string();
        assert!(draft.to_request().is_err());
    }

    #[test]
    fn test_warnings_are_advisory() {
        let draft = SaleDraft {
            phone_no: "12345".to_string(),
            round_off: "25".to_string(),
            items: vec![
                line(1, "Pen", "-1", "10", "", "118"),
                // incomplete rows are not checked
                line(2, "Pencil", "1", "", "", "500"),
            ],
            ..Default::default()
        };

        let warnings = draft.warnings(dec!(1));
        assert_eq!(warnings.len(), 4);
        assert!(warnings.iter().any(|w| matches!(
            w,
            ValidationError::Negative { field, .. } if field == "items[1].qty"
        )));
        assert!(warnings.iter().any(|w| matches!(
            w,
            ValidationError::OutOfRange { field, .. } if field == "items[1].taxPercent"
        )));

        // the request is still built
        assert!(draft.to_request(invoice_date()).is_ok());
        assert!(matches!(
            ensure_no_warnings(warnings),
            Err(CoreError::Validation(ValidationError::InvalidFormat { .. }))
        ));
        assert!(ensure_no_warnings(Vec::new()).is_ok());
    }

    #[test]
    fn test_draft_deserializes_from_form_json() {
        let json = r#"{
            "saleType": "Credit",
            "paymentType": "Cash",
            "party": {"id": 12, "name": "Sharma Traders"},
            "roundOff": 0.4,
            "receivedAmount": "",
            "items": [
                {"item": {"id": 3, "name": "Notebook A5"}, "qty": "1", "price": "99.6"}
            ]
        }"#;
        let draft: SaleDraft = serde_json::from_str(json).unwrap();
        assert_eq!(draft.sale_type, SaleType::Credit);
        assert_eq!(draft.round_off, "0.4");
        assert_eq!(draft.totals().grand_total, Money::from_paise(10_000));

        let request = draft.to_request(invoice_date()).unwrap();
        assert_eq!(request.received_amount, Money::zero());
        assert_eq!(request.billing_name, "Sharma Traders");
    }
}
