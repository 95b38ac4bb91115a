//! Batch aggregation over a collection of raw documents.

use tracing::{debug, warn};

use super::extract_records;
use crate::error::ExtractionError;
use crate::models::record::FuelRecord;

/// One raw invoice file handed to the aggregator.
#[derive(Debug, Clone)]
pub struct RawDocument {
    /// Display name carried into diagnostics (usually the file name).
    pub name: String,

    /// Raw file content.
    pub bytes: Vec<u8>,
}

impl RawDocument {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// A per-document failure recorded during batch processing.
#[derive(Debug)]
pub struct DocumentDiagnostic {
    /// Name of the document that failed.
    pub document: String,

    /// Why it contributed no records.
    pub error: ExtractionError,
}

/// Aggregated result of processing one collection of documents.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Records in document-iteration order, then line-item order within a
    /// document. The order carries no semantic meaning.
    pub records: Vec<FuelRecord>,

    /// Documents that failed and contributed no records.
    pub diagnostics: Vec<DocumentDiagnostic>,
}

/// Process every document independently and concatenate the results.
///
/// A malformed document is recorded as a diagnostic and contributes an
/// empty sub-sequence; it never aborts the batch.
pub fn process_collection<I>(documents: I) -> BatchOutcome
where
    I: IntoIterator<Item = RawDocument>,
{
    let mut outcome = BatchOutcome::default();

    for document in documents {
        match extract_records(&document.bytes) {
            Ok(records) => {
                debug!(
                    document = %document.name,
                    records = records.len(),
                    "document processed"
                );
                outcome.records.extend(records);
            }
            Err(error) => {
                warn!(document = %document.name, %error, "skipping document");
                outcome.diagnostics.push(DocumentDiagnostic {
                    document: document.name,
                    error,
                });
            }
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn invoice(number: u32, product: &str) -> String {
        format!(
            r#"<nfeProc xmlns="http://www.portalfiscal.inf.br/nfe">
              <ide><nNF>{number}</nNF></ide>
              <det><prod><xProd>{product}</xProd><qCom>1.0</qCom></prod></det>
            </nfeProc>"#
        )
    }

    fn doc(name: &str, xml: &str) -> RawDocument {
        RawDocument::new(name, xml.as_bytes().to_vec())
    }

    #[test]
    fn malformed_document_is_isolated() {
        let outcome = process_collection([
            doc("a.xml", &invoice(1, "DIESEL S10")),
            doc("broken.xml", "<infNFe><ide>"),
            doc("b.xml", &invoice(2, "ETANOL")),
        ]);

        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.records[0].invoice_id, Some(1));
        assert_eq!(outcome.records[1].invoice_id, Some(2));

        assert_eq!(outcome.diagnostics.len(), 1);
        assert_eq!(outcome.diagnostics[0].document, "broken.xml");
        assert!(matches!(
            outcome.diagnostics[0].error,
            ExtractionError::MalformedDocument(_)
        ));
    }

    #[test]
    fn concatenation_follows_input_order() {
        let outcome = process_collection([
            doc("second-batch.xml", &invoice(20, "ETANOL")),
            doc("first-batch.xml", &invoice(10, "DIESEL S10")),
        ]);

        let ids: Vec<_> = outcome.records.iter().map(|r| r.invoice_id).collect();
        assert_eq!(ids, vec![Some(20), Some(10)]);
    }

    #[test]
    fn empty_collection_yields_empty_batch() {
        let outcome = process_collection([]);
        assert!(outcome.records.is_empty());
        assert!(outcome.diagnostics.is_empty());
    }
}
