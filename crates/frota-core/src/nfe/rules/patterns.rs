//! Compiled patterns for annotation extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // "Placa" marker followed by a legacy or Mercosul plate (LLL D L/D DD).
    pub static ref PLATE_PATTERN: Regex = Regex::new(
        r"(?i)Placa[:\-]?\s*([A-Z]{3}[0-9][A-Z0-9][0-9]{2})"
    ).unwrap();

    // "KM" marker followed by a digit run.
    pub static ref ODOMETER_PATTERN: Regex = Regex::new(
        r"(?i)KM[:\-]?\s*(\d+)"
    ).unwrap();
}
