//! Fueling record models shared by the extraction pipeline and delivery.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Invoice-level fields shared by every record extracted from one document.
///
/// Built once per document and read-only afterwards; every line item from
/// the same invoice carries an identical copy of these fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvoiceContext {
    /// Invoice number (`nNF`), kept only when fully numeric.
    pub invoice_id: Option<i64>,

    /// Issuer legal name (`emit/xNome`).
    pub issuer: Option<String>,

    /// Emission timestamp (`dhEmi`), carried verbatim.
    pub invoice_date: Option<String>,

    /// Vehicle plate recovered from the free-text annotation.
    pub plate: Option<String>,

    /// Odometer reading recovered from the free-text annotation.
    pub kilometers: Option<i64>,
}

/// One fueling record: a single invoice line item merged with its
/// [`InvoiceContext`].
///
/// The serialized shape is the ingestion wire contract: camelCase field
/// names, `null` for absent values, and JSON numbers for the decimal
/// fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FuelRecord {
    pub invoice_id: Option<i64>,

    pub issuer: Option<String>,

    pub invoice_date: Option<String>,

    /// Duplicate of `invoice_date`; downstream consumers read either name.
    pub date: Option<String>,

    pub plate: Option<String>,

    pub kilometers: Option<i64>,

    /// Product description (`xProd`).
    pub fuel_type: Option<String>,

    #[serde(with = "rust_decimal::serde::float_option")]
    pub quantity: Option<Decimal>,

    #[serde(with = "rust_decimal::serde::float_option")]
    pub unit_cost: Option<Decimal>,

    #[serde(with = "rust_decimal::serde::float_option")]
    pub total_cost: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    #[test]
    fn wire_shape_uses_contract_names_and_nulls() {
        let record = FuelRecord {
            invoice_id: Some(123),
            issuer: Some("Acme Fuels".to_string()),
            invoice_date: Some("2024-05-01T10:00:00-03:00".to_string()),
            date: Some("2024-05-01T10:00:00-03:00".to_string()),
            plate: Some("XYZ1A23".to_string()),
            kilometers: Some(1000),
            fuel_type: Some("DIESEL S10".to_string()),
            quantity: Some(Decimal::from_str("10").unwrap()),
            unit_cost: None,
            total_cost: Some(Decimal::from_str("50.0").unwrap()),
        };

        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["invoiceId"], 123);
        assert_eq!(json["issuer"], "Acme Fuels");
        assert_eq!(json["invoiceDate"], json["date"]);
        assert_eq!(json["plate"], "XYZ1A23");
        assert_eq!(json["kilometers"], 1000);
        assert_eq!(json["fuelType"], "DIESEL S10");
        assert_eq!(json["quantity"], 10.0);
        assert_eq!(json["unitCost"], serde_json::Value::Null);
        assert_eq!(json["totalCost"], 50.0);
    }

    #[test]
    fn absent_numeric_fields_serialize_as_null_not_zero() {
        let record = FuelRecord {
            invoice_id: None,
            issuer: None,
            invoice_date: None,
            date: None,
            plate: None,
            kilometers: None,
            fuel_type: None,
            quantity: None,
            unit_cost: None,
            total_cost: None,
        };

        let json = serde_json::to_value(&record).unwrap();
        for field in [
            "invoiceId",
            "kilometers",
            "quantity",
            "unitCost",
            "totalCost",
        ] {
            assert_eq!(json[field], serde_json::Value::Null, "field {field}");
        }
    }
}
