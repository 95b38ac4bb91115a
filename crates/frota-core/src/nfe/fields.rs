//! Invoice-level field extraction.

use tracing::debug;

use super::document::Document;
use super::rules::parse_annotation;
use crate::models::record::InvoiceContext;

/// Build the shared [`InvoiceContext`] for one parsed document.
///
/// Every field degrades to `None` when its element is missing. The
/// annotation block degrades to an empty text, which yields neither a
/// plate nor an odometer reading.
pub fn extract_invoice_context(doc: &Document) -> InvoiceContext {
    let ide = doc.find("ide");
    let invoice_id = ide
        .and_then(|node| doc.find_in(node, "nNF"))
        .and_then(|node| node.text())
        .and_then(parse_invoice_number);
    let invoice_date = ide
        .and_then(|node| doc.find_in(node, "dhEmi"))
        .and_then(|node| node.text())
        .map(str::to_owned);

    let issuer = doc
        .find("emit")
        .and_then(|node| doc.find_in(node, "xNome"))
        .and_then(|node| node.text())
        .map(str::to_owned);

    let info = parse_annotation(&annotation_text(doc));

    debug!(
        invoice_id,
        plate = info.plate.as_deref(),
        kilometers = info.kilometers,
        "extracted invoice context"
    );

    InvoiceContext {
        invoice_id,
        issuer,
        invoice_date,
        plate: info.plate,
        kilometers: info.kilometers,
    }
}

/// Free-text complement at `infAdic/infCpl`; absence yields an empty
/// string, not an absent value.
pub fn annotation_text(doc: &Document) -> String {
    doc.find("infAdic")
        .and_then(|node| doc.find_in(node, "infCpl"))
        .and_then(|node| node.text())
        .unwrap_or_default()
        .to_owned()
}

/// `nNF` parses as an identifier only when fully numeric.
fn parse_invoice_number(text: &str) -> Option<i64> {
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}
