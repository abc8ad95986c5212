//! Fixed-layout, single-page invoice rendering.
//!
//! [`layout`] names every measurement of the hand-tuned US-letter template so
//! the geometry stays reproducible and testable independently of the drawing
//! backend. [`document`] does the actual drawing via `printpdf` with the
//! builtin Helvetica faces.
//!
//! There is no pagination: an item list that runs past the page bottom is an
//! accepted limitation, not handled.

/// Drawing routines for the invoice document.
pub mod document;
/// Named measurements of the single-page template.
pub mod layout;

pub use document::{format_currency, render_invoice};
pub use layout::{Layout, LETTER};
