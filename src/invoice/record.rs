use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Contact details for one party on the invoice.
///
/// Every field is optional in the transport format and defaults to the empty
/// string, so a partially extracted record still renders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartyInfo {
    /// Party name.
    #[serde(default)]
    pub name: String,
    /// Phone number.
    #[serde(default)]
    pub phone: String,
    /// Postal address, single line.
    #[serde(default)]
    pub address: String,
    /// Email address.
    #[serde(default)]
    pub email: String,
}

/// Invoice and due dates as ISO-8601 strings. Unvalidated by design: the
/// extraction prompt asks for `yyyy-mm-dd` and the renderer prints verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceDates {
    /// Issue date.
    #[serde(default)]
    pub invoice_date: String,
    /// Payment due date.
    #[serde(default)]
    pub due_date: String,
}

fn zero() -> Value {
    Value::from(0)
}

fn one() -> Value {
    Value::from(1)
}

/// One billable line on the invoice.
///
/// The numeric leaves stay as raw JSON values: upstream is a language model,
/// and a single non-numeric field must not poison the rest of the record.
/// Coercion happens at the point of use ([`coerce_f64`], [`coerce_i64`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceItem {
    /// What was billed.
    #[serde(default)]
    pub description: String,
    /// Price per unit.
    #[serde(default = "zero")]
    pub unit_price: Value,
    /// Number of units, defaults to 1.
    #[serde(default = "one")]
    pub quantity: Value,
    /// Tax as a fraction of the line total, defaults to 0.
    #[serde(default = "zero")]
    pub tax: Value,
}

impl Default for InvoiceItem {
    fn default() -> Self {
        Self {
            description: String::new(),
            unit_price: zero(),
            quantity: one(),
            tax: zero(),
        }
    }
}

/// Line item in the legacy transport shape: a flat amount with the tax rate
/// held once at the top level of the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyLineItem {
    /// What was billed.
    #[serde(default)]
    pub description: String,
    /// Flat line amount.
    #[serde(default = "zero")]
    pub amount: Value,
}

/// The structured representation of one invoice.
///
/// Constructed fresh from model output for every request, normalized once,
/// aggregated once, then consumed read-only by the renderer. Unknown keys
/// survive a round trip through the flattened `extra` map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    /// Issuing party.
    #[serde(default)]
    pub vendor_info: PartyInfo,
    /// Billed party.
    #[serde(default)]
    pub customer_info: PartyInfo,
    /// Issue and due dates.
    #[serde(default)]
    pub invoice_info: InvoiceDates,
    /// Opaque invoice identifier.
    #[serde(default)]
    pub invoice_number: String,
    /// Billable lines in display order.
    #[serde(default)]
    pub items: Vec<InvoiceItem>,
    /// Legacy line items; consumed by [`normalize_legacy`](Self::normalize_legacy).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_items: Option<Vec<LegacyLineItem>>,
    /// Legacy top-level tax rate; consumed together with `line_items`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_rate: Option<Value>,
    /// Derived: sum of unit_price × quantity. Always recomputed.
    #[serde(default)]
    pub subtotal: f64,
    /// Derived: sum of line totals weighted by each item's tax fraction.
    #[serde(default)]
    pub tax: f64,
    /// Derived: subtotal + tax.
    #[serde(default)]
    pub total: f64,
    /// Keys outside the canonical shape, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl InvoiceRecord {
    /// Rewrite the legacy `line_items`/`tax_rate` shape into `items`.
    ///
    /// One-way, one-time migration: each legacy line becomes an item with
    /// `unit_price = amount`, `quantity = 1` and `tax = tax_rate`, and the
    /// legacy fields are consumed. When both shapes arrive, the legacy one
    /// wins and `items` is rebuilt, never merged. Calling this on an
    /// already-normalized record is a no-op.
    /// Issue date for display. Falls back to a top-level `date` key when
    /// `invoice_info` carries none, so flat-shaped records still print theirs.
    pub fn display_invoice_date(&self) -> &str {
        if !self.invoice_info.invoice_date.is_empty() {
            return &self.invoice_info.invoice_date;
        }
        self.extra.get("date").and_then(Value::as_str).unwrap_or("")
    }

    /// Due date for display, with the same top-level `due_date` fallback.
    pub fn display_due_date(&self) -> &str {
        if !self.invoice_info.due_date.is_empty() {
            return &self.invoice_info.due_date;
        }
        self.extra
            .get("due_date")
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    pub fn normalize_legacy(&mut self) {
        let Some(line_items) = self.line_items.take() else {
            return;
        };
        let tax = self.tax_rate.take().unwrap_or_else(zero);
        self.items = line_items
            .into_iter()
            .map(|li| InvoiceItem {
                description: li.description,
                unit_price: li.amount,
                quantity: one(),
                tax: tax.clone(),
            })
            .collect();
    }
}

/// Coerce a JSON value to a float. Accepts numbers and numeric strings.
pub fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Coerce a JSON value to an integer. Accepts integers, floats (truncated)
/// and integral strings.
pub fn coerce_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_defaults_missing_groups() {
        let record: InvoiceRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(record.vendor_info, PartyInfo::default());
        assert_eq!(record.customer_info, PartyInfo::default());
        assert_eq!(record.invoice_number, "");
        assert!(record.items.is_empty());
        assert_eq!(record.subtotal, 0.0);
    }

    #[test]
    fn test_item_defaults() {
        let item: InvoiceItem = serde_json::from_value(json!({"description": "Widget"})).unwrap();
        assert_eq!(coerce_f64(&item.unit_price), Some(0.0));
        assert_eq!(coerce_i64(&item.quantity), Some(1));
        assert_eq!(coerce_f64(&item.tax), Some(0.0));
    }

    #[test]
    fn test_normalize_legacy_shape() {
        let mut record: InvoiceRecord = serde_json::from_value(json!({
            "line_items": [{"description": "Widget", "amount": 10}],
            "tax_rate": 0.1
        }))
        .unwrap();

        record.normalize_legacy();

        assert!(record.line_items.is_none());
        assert!(record.tax_rate.is_none());
        assert_eq!(record.items.len(), 1);
        let item = &record.items[0];
        assert_eq!(item.description, "Widget");
        assert_eq!(coerce_f64(&item.unit_price), Some(10.0));
        assert_eq!(coerce_i64(&item.quantity), Some(1));
        assert_eq!(coerce_f64(&item.tax), Some(0.1));
    }

    #[test]
    fn test_normalize_is_noop_after_first_application() {
        let mut record: InvoiceRecord = serde_json::from_value(json!({
            "line_items": [{"description": "Widget", "amount": 10}],
            "tax_rate": 0.1
        }))
        .unwrap();

        record.normalize_legacy();
        let first = record.clone();
        record.normalize_legacy();
        assert_eq!(record, first);
    }

    #[test]
    fn test_legacy_wins_over_supplied_items() {
        let mut record: InvoiceRecord = serde_json::from_value(json!({
            "items": [{"description": "Stale", "unit_price": 99}],
            "line_items": [{"description": "Fresh", "amount": 10}]
        }))
        .unwrap();

        record.normalize_legacy();

        assert_eq!(record.items.len(), 1);
        assert_eq!(record.items[0].description, "Fresh");
    }

    #[test]
    fn test_display_dates_fall_back_to_flat_keys() {
        let record: InvoiceRecord = serde_json::from_value(json!({
            "date": "2026-08-01",
            "due_date": "2026-09-01"
        }))
        .unwrap();
        assert_eq!(record.display_invoice_date(), "2026-08-01");
        assert_eq!(record.display_due_date(), "2026-09-01");
    }

    #[test]
    fn test_display_dates_prefer_nested_shape() {
        let record: InvoiceRecord = serde_json::from_value(json!({
            "invoice_info": {"invoice_date": "2026-08-01", "due_date": "2026-09-01"},
            "date": "1999-01-01",
            "due_date": "1999-02-01"
        }))
        .unwrap();
        assert_eq!(record.display_invoice_date(), "2026-08-01");
        assert_eq!(record.display_due_date(), "2026-09-01");
    }

    #[test]
    fn test_display_dates_empty_when_absent() {
        let record: InvoiceRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(record.display_invoice_date(), "");
        assert_eq!(record.display_due_date(), "");
    }

    #[test]
    fn test_unknown_keys_survive_round_trip() {
        let record: InvoiceRecord =
            serde_json::from_value(json!({"notes": "net 30", "invoice_number": "42"})).unwrap();
        let out = serde_json::to_value(&record).unwrap();
        assert_eq!(out["notes"], "net 30");
        assert_eq!(out["invoice_number"], "42");
    }

    #[test]
    fn test_coerce_f64() {
        assert_eq!(coerce_f64(&json!(2.5)), Some(2.5));
        assert_eq!(coerce_f64(&json!("2.5")), Some(2.5));
        assert_eq!(coerce_f64(&json!(" 10 ")), Some(10.0));
        assert_eq!(coerce_f64(&json!("abc")), None);
        assert_eq!(coerce_f64(&json!(null)), None);
        assert_eq!(coerce_f64(&json!([1])), None);
    }

    #[test]
    fn test_coerce_i64() {
        assert_eq!(coerce_i64(&json!(3)), Some(3));
        assert_eq!(coerce_i64(&json!(2.9)), Some(2));
        assert_eq!(coerce_i64(&json!("4")), Some(4));
        assert_eq!(coerce_i64(&json!("4.5")), None);
        assert_eq!(coerce_i64(&json!(null)), None);
    }
}
