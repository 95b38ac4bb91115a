//! Core library for fleet fueling extraction.
//!
//! This crate provides:
//! - NF-e XML document loading with document-level namespace resolution
//! - Invoice-level field extraction (number, emission date, issuer)
//! - Annotation rules recovering the vehicle plate and odometer reading
//! - Expansion of invoice line items into per-fueling records
//! - Batch aggregation with per-document failure isolation

pub mod error;
pub mod models;
pub mod nfe;

pub use error::{ExtractionError, FrotaError, Result};
pub use models::config::FrotaConfig;
pub use models::record::{FuelRecord, InvoiceContext};
pub use nfe::batch::{BatchOutcome, DocumentDiagnostic, RawDocument, process_collection};
pub use nfe::document::Document;
pub use nfe::extract_records;
pub use nfe::rules::{AnnotationInfo, parse_annotation};
