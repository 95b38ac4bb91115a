//! Line-item expansion into fueling records.

use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::debug;

use super::document::{Document, Element};
use crate::models::record::{FuelRecord, InvoiceContext};

/// Produce one [`FuelRecord`] per `det` line item, in document order.
///
/// Per-item fields merge with the shared [`InvoiceContext`] unchanged; a
/// document without line items expands to an empty vector.
pub fn expand(doc: &Document, context: &InvoiceContext) -> Vec<FuelRecord> {
    let items = doc.find_all("det");
    debug!(line_items = items.len(), "expanding line items");

    items
        .into_iter()
        .map(|det| expand_item(doc, det, context))
        .collect()
}

fn expand_item(doc: &Document, det: &Element, context: &InvoiceContext) -> FuelRecord {
    let prod = doc.find_in(det, "prod");

    let fuel_type = prod
        .and_then(|node| doc.find_in(node, "xProd"))
        .and_then(|node| node.text())
        .map(str::to_owned);

    FuelRecord {
        invoice_id: context.invoice_id,
        issuer: context.issuer.clone(),
        invoice_date: context.invoice_date.clone(),
        date: context.invoice_date.clone(),
        plate: context.plate.clone(),
        kilometers: context.kilometers,
        fuel_type,
        quantity: numeric_field(doc, prod, "qCom"),
        unit_cost: numeric_field(doc, prod, "vUnCom"),
        total_cost: numeric_field(doc, prod, "vProd"),
    }
}

/// Decimal coercion for per-item fields; absent or malformed text degrades
/// to `None` without touching sibling fields.
fn numeric_field(doc: &Document, prod: Option<&Element>, name: &str) -> Option<Decimal> {
    prod.and_then(|node| doc.find_in(node, name))
        .and_then(|node| node.text())
        .and_then(|text| Decimal::from_str(text).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nfe::fields::extract_invoice_context;
    use pretty_assertions::assert_eq;

    const TWO_ITEMS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<nfeProc xmlns="http://www.portalfiscal.inf.br/nfe" versao="4.00">
  <NFe>
    <infNFe>
      <ide>
        <nNF>123</nNF>
        <dhEmi>2024-05-01T10:00:00-03:00</dhEmi>
      </ide>
      <emit>
        <xNome>Acme Fuels</xNome>
      </emit>
      <det nItem="1">
        <prod>
          <xProd>DIESEL S10</xProd>
          <qCom>10.0000</qCom>
          <vUnCom>5.0</vUnCom>
          <vProd>50.0</vProd>
        </prod>
      </det>
      <det nItem="2">
        <prod>
          <xProd>ARLA 32</xProd>
          <qCom>20.0000</qCom>
          <vUnCom>4.5</vUnCom>
          <vProd>90.0</vProd>
        </prod>
      </det>
      <infAdic>
        <infCpl>Placa: XYZ1A23 KM: 1000</infCpl>
      </infAdic>
    </infNFe>
  </NFe>
</nfeProc>"#;

    fn records_for(xml: &str) -> Vec<FuelRecord> {
        let doc = Document::parse(xml.as_bytes()).unwrap();
        let context = extract_invoice_context(&doc);
        expand(&doc, &context)
    }

    fn dec(s: &str) -> Option<Decimal> {
        Some(Decimal::from_str(s).unwrap())
    }

    #[test]
    fn one_record_per_line_item_with_shared_context() {
        let records = records_for(TWO_ITEMS);
        assert_eq!(records.len(), 2);

        for record in &records {
            assert_eq!(record.invoice_id, Some(123));
            assert_eq!(record.issuer.as_deref(), Some("Acme Fuels"));
            assert_eq!(
                record.invoice_date.as_deref(),
                Some("2024-05-01T10:00:00-03:00")
            );
            assert_eq!(record.date, record.invoice_date);
            assert_eq!(record.plate.as_deref(), Some("XYZ1A23"));
            assert_eq!(record.kilometers, Some(1000));
        }

        assert_eq!(records[0].fuel_type.as_deref(), Some("DIESEL S10"));
        assert_eq!(records[0].quantity, dec("10.0000"));
        assert_eq!(records[0].unit_cost, dec("5.0"));
        assert_eq!(records[0].total_cost, dec("50.0"));

        assert_eq!(records[1].fuel_type.as_deref(), Some("ARLA 32"));
        assert_eq!(records[1].quantity, dec("20.0000"));
        assert_eq!(records[1].unit_cost, dec("4.5"));
        assert_eq!(records[1].total_cost, dec("90.0"));
    }

    #[test]
    fn zero_line_items_expand_to_nothing() {
        let records = records_for("<nfeProc><ide><nNF>9</nNF></ide></nfeProc>");
        assert_eq!(records, vec![]);
    }

    #[test]
    fn malformed_numeric_text_degrades_without_touching_siblings() {
        let xml = r#"<nfeProc>
          <det><prod>
            <xProd>GASOLINA COMUM</xProd>
            <qCom>35.500</qCom>
            <vUnCom>N/A</vUnCom>
            <vProd>201.65</vProd>
          </prod></det>
        </nfeProc>"#;

        let records = records_for(xml);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].fuel_type.as_deref(), Some("GASOLINA COMUM"));
        assert_eq!(records[0].quantity, dec("35.500"));
        assert_eq!(records[0].unit_cost, None);
        assert_eq!(records[0].total_cost, dec("201.65"));
    }

    #[test]
    fn line_item_without_prod_block_yields_all_absent_item_fields() {
        let records = records_for("<nfeProc><det nItem=\"1\"></det></nfeProc>");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].fuel_type, None);
        assert_eq!(records[0].quantity, None);
        assert_eq!(records[0].unit_cost, None);
        assert_eq!(records[0].total_cost, None);
    }
}
