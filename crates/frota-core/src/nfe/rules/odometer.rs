//! Odometer reading extraction from annotation text.

use super::FieldExtractor;
use super::patterns::ODOMETER_PATTERN;

/// Odometer field extractor.
pub struct OdometerExtractor;

impl OdometerExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for OdometerExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for OdometerExtractor {
    type Output = i64;

    // Only the first capture is converted; a first reading that fails
    // conversion leaves the field absent instead of falling through to a
    // later match.
    fn extract(&self, text: &str) -> Option<i64> {
        ODOMETER_PATTERN
            .captures(text)
            .and_then(|caps| parse_kilometers(&caps[1]))
    }

    fn extract_all(&self, text: &str) -> Vec<i64> {
        ODOMETER_PATTERN
            .captures_iter(text)
            .filter_map(|caps| parse_kilometers(&caps[1]))
            .collect()
    }
}

/// Extract the odometer reading at the first `KM` marker in the text.
pub fn extract_kilometers(text: &str) -> Option<i64> {
    OdometerExtractor::new().extract(text)
}

/// Convert a captured odometer token, accepting only a pure digit run.
fn parse_kilometers(capture: &str) -> Option<i64> {
    if capture.is_empty() || !capture.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    capture.parse().ok()
}
