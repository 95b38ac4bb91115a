//! NF-e extraction pipeline.
//!
//! Data flows strictly downward: raw bytes parse into a [`Document`], the
//! invoice-level and annotation fields build an
//! [`InvoiceContext`](crate::models::record::InvoiceContext), and every
//! `det` line item expands into one [`FuelRecord`]. No stage mutates the
//! output of a previous one.

pub mod batch;
pub mod document;
pub mod expander;
pub mod fields;
pub mod rules;

pub use batch::{BatchOutcome, DocumentDiagnostic, RawDocument, process_collection};
pub use document::{Document, Element};
pub use expander::expand;
pub use fields::extract_invoice_context;
pub use rules::{AnnotationInfo, parse_annotation};

use crate::error::ExtractionError;
use crate::models::record::FuelRecord;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Extract every fueling record from one raw NF-e document.
pub fn extract_records(raw: &[u8]) -> Result<Vec<FuelRecord>> {
    let doc = Document::parse(raw)?;
    let context = fields::extract_invoice_context(&doc);
    Ok(expander::expand(&doc, &context))
}
