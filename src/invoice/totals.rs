use crate::invoice::record::{coerce_f64, coerce_i64, InvoiceRecord};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Record substituted when totals input cannot be parsed.
///
/// Callers pattern-match on the exact default values (`"N/A"`, `"Unknown"`,
/// zeroed aggregates), so they are part of the contract and must not change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegradedRecord {
    /// Human-readable description of what went wrong.
    pub error: String,
    /// Always `"N/A"`.
    pub invoice_number: String,
    /// Always `"Unknown"`.
    pub client: String,
    /// Always empty.
    pub items: Vec<Value>,
    /// Always 0.
    pub subtotal: f64,
    /// Always 0.
    pub tax: f64,
    /// Always 0.
    pub total: f64,
}

impl DegradedRecord {
    /// Build a degraded record carrying the given error message.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            invoice_number: "N/A".to_string(),
            client: "Unknown".to_string(),
            items: Vec::new(),
            subtotal: 0.0,
            tax: 0.0,
            total: 0.0,
        }
    }
}

/// Outcome of a totals computation: either a record with fresh aggregates,
/// or the degraded substitute for unparseable input.
#[derive(Debug, Clone, PartialEq)]
pub enum TotalsOutcome {
    /// Input parsed; aggregates were recomputed from `items`.
    Computed(InvoiceRecord),
    /// Input could not be parsed; defaults substituted.
    Degraded(DegradedRecord),
}

impl TotalsOutcome {
    /// Whether this outcome is the degraded substitute.
    pub fn is_degraded(&self) -> bool {
        matches!(self, TotalsOutcome::Degraded(_))
    }

    /// Serialize the outcome to the JSON transport form.
    pub fn into_json(self) -> String {
        match self {
            TotalsOutcome::Computed(record) => {
                serde_json::to_string(&record).unwrap_or_default()
            }
            TotalsOutcome::Degraded(degraded) => {
                serde_json::to_string(&degraded).unwrap_or_default()
            }
        }
    }
}

/// Strip an optional markdown code fence from a payload.
///
/// Language models routinely wrap structured output in a fenced block with a
/// `json` language tag; unfenced payloads pass through untouched, so the
/// operation is idempotent.
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    if !trimmed.starts_with("```") {
        return trimmed;
    }
    let inner = trimmed.trim_matches('`');
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.trim()
}

/// Recompute `subtotal`, `tax` and `total` from `items`, overwriting any
/// supplied values.
///
/// An item with any non-numeric field is skipped entirely, excluded from both
/// subtotal and tax. The drop is not recorded beyond a debug log line.
pub fn apply_totals(record: &mut InvoiceRecord) {
    let mut subtotal = 0.0;
    let mut tax_total = 0.0;

    for item in &record.items {
        let (Some(unit_price), Some(quantity), Some(tax)) = (
            coerce_f64(&item.unit_price),
            coerce_i64(&item.quantity),
            coerce_f64(&item.tax),
        ) else {
            tracing::debug!(description = %item.description, "skipping item with non-numeric fields");
            continue;
        };

        let line_total = unit_price * quantity as f64;
        subtotal += line_total;
        tax_total += line_total * tax;
    }

    record.subtotal = subtotal;
    record.tax = tax_total;
    record.total = subtotal + tax_total;
}

/// Parse a candidate record, normalize the legacy shape, and recompute the
/// aggregates.
///
/// Parse failure is not escalated: it degrades to [`TotalsOutcome::Degraded`]
/// and the calling model, not this crate, decides whether to retry.
pub fn compute_totals_outcome(raw_json: &str) -> TotalsOutcome {
    let payload = strip_code_fence(raw_json);
    let mut record: InvoiceRecord = match serde_json::from_str(payload) {
        Ok(record) => record,
        Err(e) => {
            tracing::warn!(error = %e, "totals input is not valid JSON, degrading to defaults");
            return TotalsOutcome::Degraded(DegradedRecord::new(format!(
                "Invalid JSON input: {e}"
            )));
        }
    };

    record.normalize_legacy();
    apply_totals(&mut record);
    TotalsOutcome::Computed(record)
}

/// String-in/string-out form of the totals computation, the stable contract
/// between orchestration and the tool layer.
pub fn compute_totals(raw_json: &str) -> String {
    compute_totals_outcome(raw_json).into_json()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!([{"description": "Service", "unit_price": 100, "quantity": 2, "tax": 0.05}]), 200.0, 10.0, 210.0)]
    #[case(json!([]), 0.0, 0.0, 0.0)]
    #[case(json!([
        {"description": "A", "unit_price": 10.5, "quantity": 3, "tax": 0.1},
        {"description": "B", "unit_price": 4, "quantity": 1, "tax": 0.2}
    ]), 35.5, 3.95, 39.45)]
    #[case(json!([{"description": "Strings", "unit_price": "12.5", "quantity": "2", "tax": "0.1"}]), 25.0, 2.5, 27.5)]
    fn test_totals_arithmetic(
        #[case] items: serde_json::Value,
        #[case] subtotal: f64,
        #[case] tax: f64,
        #[case] total: f64,
    ) {
        let raw = json!({ "items": items }).to_string();
        let result: serde_json::Value =
            serde_json::from_str(&compute_totals(&raw)).unwrap();
        assert!((result["subtotal"].as_f64().unwrap() - subtotal).abs() < 1e-9);
        assert!((result["tax"].as_f64().unwrap() - tax).abs() < 1e-9);
        assert!((result["total"].as_f64().unwrap() - total).abs() < 1e-9);
    }

    #[test]
    fn test_supplied_aggregates_are_overwritten() {
        let raw = json!({
            "items": [{"description": "Service", "unit_price": 100, "quantity": 1, "tax": 0.0}],
            "subtotal": 9999.0,
            "tax": 123.0,
            "total": 10122.0
        })
        .to_string();

        let result: serde_json::Value = serde_json::from_str(&compute_totals(&raw)).unwrap();
        assert_eq!(result["subtotal"], 100.0);
        assert_eq!(result["tax"], 0.0);
        assert_eq!(result["total"], 100.0);
    }

    #[test]
    fn test_legacy_normalization_feeds_totals() {
        let raw = json!({
            "line_items": [{"description": "Widget", "amount": 10}],
            "tax_rate": 0.1
        })
        .to_string();

        let result: serde_json::Value = serde_json::from_str(&compute_totals(&raw)).unwrap();
        let items = result["items"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["description"], "Widget");
        assert_eq!(items[0]["unit_price"], 10);
        assert_eq!(items[0]["quantity"], 1);
        assert_eq!(items[0]["tax"], 0.1);
        assert!(result.get("line_items").is_none());
        assert!((result["subtotal"].as_f64().unwrap() - 10.0).abs() < 1e-9);
        assert!((result["tax"].as_f64().unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_malformed_input_degrades_to_defaults() {
        let result: serde_json::Value =
            serde_json::from_str(&compute_totals("this is not json")).unwrap();
        assert!(result["error"].as_str().unwrap().contains("Invalid JSON input"));
        assert_eq!(result["invoice_number"], "N/A");
        assert_eq!(result["client"], "Unknown");
        assert_eq!(result["items"].as_array().unwrap().len(), 0);
        assert_eq!(result["subtotal"], 0.0);
        assert_eq!(result["tax"], 0.0);
        assert_eq!(result["total"], 0.0);
    }

    #[test]
    fn test_bad_item_is_skipped_not_fatal() {
        let raw = json!({
            "items": [
                {"description": "Good", "unit_price": 50, "quantity": 2, "tax": 0.1},
                {"description": "Bad", "unit_price": "not a number", "quantity": 1, "tax": 0.1}
            ]
        })
        .to_string();

        let result: serde_json::Value = serde_json::from_str(&compute_totals(&raw)).unwrap();
        assert!((result["subtotal"].as_f64().unwrap() - 100.0).abs() < 1e-9);
        assert!((result["tax"].as_f64().unwrap() - 10.0).abs() < 1e-9);
        // The bad item stays in the list; it is only excluded from aggregates.
        assert_eq!(result["items"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_fence_stripping_is_idempotent() {
        let payload = json!({
            "items": [{"description": "Service", "unit_price": 100, "quantity": 2, "tax": 0.05}]
        })
        .to_string();
        let fenced = format!("```json\n{payload}\n```");

        assert_eq!(compute_totals(&fenced), compute_totals(&payload));
    }

    #[test]
    fn test_fence_without_language_tag() {
        let payload = json!({"items": []}).to_string();
        let fenced = format!("```\n{payload}\n```");
        assert_eq!(compute_totals(&fenced), compute_totals(&payload));
    }

    #[test]
    fn test_strip_code_fence_passthrough() {
        assert_eq!(strip_code_fence("  {\"a\": 1}  "), "{\"a\": 1}");
        assert_eq!(strip_code_fence("```json\n{}\n```"), "{}");
        assert_eq!(strip_code_fence("```{}```"), "{}");
    }

    #[test]
    fn test_outcome_discriminant() {
        assert!(compute_totals_outcome("{").is_degraded());
        assert!(!compute_totals_outcome("{}").is_degraded());
    }
}
