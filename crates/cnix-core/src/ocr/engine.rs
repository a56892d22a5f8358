//! Seam for plugging an OCR engine in front of the field extractor.

use std::path::Path;

use tracing::info;

use crate::card::{CniParser, IdentityExtractor};
use crate::error::Result;
use crate::models::identity::ExtractionResult;

use super::OcrOutput;

/// An OCR engine: turns an image file into ordered text fragments.
///
/// Engines are handed to [`CardReader`] by the caller; nothing in this crate
/// holds one globally.
pub trait OcrEngine {
    /// Recognize text in an image.
    fn recognize(&self, image_path: &Path) -> Result<OcrOutput>;

    /// Engine name, for logs.
    fn name(&self) -> &str {
        "unknown"
    }
}

/// An OCR engine paired with the identity card parser.
pub struct CardReader<E: OcrEngine> {
    engine: E,
    parser: CniParser,
    min_confidence: f32,
}

impl<E: OcrEngine> CardReader<E> {
    /// Create a reader with the built-in label table.
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            parser: CniParser::new(),
            min_confidence: 0.0,
        }
    }

    /// Use a custom parser.
    pub fn with_parser(mut self, parser: CniParser) -> Self {
        self.parser = parser;
        self
    }

    /// Drop fragments below this confidence before extraction.
    pub fn with_min_confidence(mut self, min_confidence: f32) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    /// Run OCR on an image and extract the card fields.
    ///
    /// Only engine failures are errors; an unreadable card yields empty slots.
    pub fn read(&self, image_path: &Path) -> Result<ExtractionResult> {
        let mut output = self.engine.recognize(image_path)?;
        info!(
            "{} recognized {} fragments in {}",
            self.engine.name(),
            output.len(),
            image_path.display()
        );

        output.retain_confident(self.min_confidence);
        Ok(self.parser.extract(&output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CnixError, OcrError};
    use crate::ocr::TextBox;

    struct FixedEngine(Vec<TextBox>);

    impl OcrEngine for FixedEngine {
        fn recognize(&self, _image_path: &Path) -> Result<OcrOutput> {
            Ok(OcrOutput::new(self.0.clone()))
        }
    }

    struct FailingEngine;

    impl OcrEngine for FailingEngine {
        fn recognize(&self, _image_path: &Path) -> Result<OcrOutput> {
            Err(CnixError::Ocr(OcrError::Parse("engine crashed".to_string())))
        }
    }

    #[test]
    fn test_reader_filters_then_extracts() {
        let engine = FixedEngine(vec![
            TextBox::new("NOM/SURNAME").with_confidence(0.95),
            TextBox::new("M8ALLA7").with_confidence(0.1),
            TextBox::new("MBALLA").with_confidence(0.9),
        ]);

        let result = CardReader::new(engine)
            .with_min_confidence(0.5)
            .read(Path::new("card.png"))
            .unwrap();

        assert_eq!(result.surname, "MBALLA");
    }

    #[test]
    fn test_engine_failure_is_propagated() {
        let result = CardReader::new(FailingEngine).read(Path::new("card.png"));
        assert!(result.is_err());
    }
}
