//! Vehicle plate extraction from annotation text.

use super::FieldExtractor;
use super::patterns::PLATE_PATTERN;

/// Plate field extractor.
///
/// Matches both the legacy format (`ABC1234`) and the Mercosul format
/// (`ABC1D23`); the marker and the plate itself are case-insensitive and
/// the captured plate is normalized to uppercase.
pub struct PlateExtractor;

impl PlateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PlateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for PlateExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<String> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<String> {
        PLATE_PATTERN
            .captures_iter(text)
            .map(|caps| caps[1].to_uppercase())
            .collect()
    }
}

/// Extract the first plate mentioned in the text.
pub fn extract_plate(text: &str) -> Option<String> {
    PlateExtractor::new().extract(text)
}
