//! Error types for the frota-core library.

use thiserror::Error;

/// Main error type for the frota library.
#[derive(Error, Debug)]
pub enum FrotaError {
    /// Document extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to reading an NF-e document.
///
/// Field absence is never an error: optional fields surface as `None`, and
/// malformed numeric text degrades to `None` at the parse site.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The input bytes are not well-formed XML.
    #[error("malformed document: {0}")]
    MalformedDocument(String),
}

/// Result type for the frota library.
pub type Result<T> = std::result::Result<T, FrotaError>;
