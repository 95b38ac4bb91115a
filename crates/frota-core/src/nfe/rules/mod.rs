//! Rule-based extractors for the NF-e free-text annotation field.
//!
//! Fuel stations record the vehicle plate and odometer reading as free
//! text in the invoice's additional-information block; these rules recover
//! them by pattern matching.

pub mod odometer;
pub mod patterns;
pub mod plate;

pub use odometer::{OdometerExtractor, extract_kilometers};
pub use plate::{PlateExtractor, extract_plate};

/// Trait for annotation field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// Fields recovered from the free-text annotation (`infCpl`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationInfo {
    /// Vehicle plate, normalized to uppercase.
    pub plate: Option<String>,

    /// Odometer reading in kilometers.
    pub kilometers: Option<i64>,
}

/// Scan the annotation text for a vehicle plate and an odometer reading.
///
/// The two searches are independent: a text may yield a plate with no
/// odometer, an odometer with no plate, or neither. Empty text yields
/// neither.
pub fn parse_annotation(text: &str) -> AnnotationInfo {
    AnnotationInfo {
        plate: extract_plate(text),
        kilometers: extract_kilometers(text),
    }
}
