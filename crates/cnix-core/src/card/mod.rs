//! Identity card field extraction.

mod parser;
pub mod rules;

pub use parser::CniParser;

use crate::models::identity::ExtractionResult;
use crate::ocr::OcrOutput;

/// Trait for identity card field extractors.
///
/// Extraction is best effort and infallible: fields that cannot be found are
/// left empty in the result.
pub trait IdentityExtractor {
    /// Extract card fields from OCR engine output.
    fn extract(&self, ocr_output: &OcrOutput) -> ExtractionResult;

    /// Extract card fields from bare fragments in emission order.
    fn extract_fragments<S: AsRef<str>>(&self, fragments: &[S]) -> ExtractionResult;
}
