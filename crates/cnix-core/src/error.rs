//! Error types for the cnix-core library.
//!
//! Field extraction itself never fails. These errors only cover the edges
//! around it: decoding recorded OCR output and loading configuration.

use thiserror::Error;

/// Main error type for the cnix library.
#[derive(Error, Debug)]
pub enum CnixError {
    /// Recorded OCR output could not be decoded.
    #[error("OCR output error: {0}")]
    Ocr(#[from] OcrError),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to decoding OCR engine output.
#[derive(Error, Debug)]
pub enum OcrError {
    /// The input is not valid JSON or not a top-level array.
    #[error("failed to parse OCR output: {0}")]
    Parse(String),

    /// An element of the array has a shape no known engine produces.
    #[error("unsupported fragment shape at index {index}")]
    UnsupportedFragment { index: usize },
}

/// Result type for the cnix library.
pub type Result<T> = std::result::Result<T, CnixError>;
