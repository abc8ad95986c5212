//! The invoice domain core.
//!
//! [`record`] holds the [`InvoiceRecord`](record::InvoiceRecord) data model
//! and the one-way normalization of the legacy `line_items` shape.
//! [`totals`] computes the derived aggregates with the degrade-to-default
//! policy for unparseable input.

/// Invoice data model and legacy-shape normalization.
pub mod record;
/// Totals computation and the degraded-record policy.
pub mod totals;

pub use record::{InvoiceDates, InvoiceItem, InvoiceRecord, LegacyLineItem, PartyInfo};
pub use totals::{compute_totals, DegradedRecord, TotalsOutcome};
