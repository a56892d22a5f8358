//! OCR engine output, as consumed by the field extractor.
//!
//! The OCR engine itself is an external collaborator. This module only decodes
//! what engines emit (recorded as JSON or plain text) into an ordered list of
//! [`TextBox`]es. Geometry and confidence are kept on the boxes for filtering,
//! but extraction only ever sees the text, in emission order.

mod engine;

pub use engine::{CardReader, OcrEngine};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::OcrError;

/// One recognized text fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBox {
    /// Recognized text content.
    pub text: String,

    /// Recognition confidence (0.0 - 1.0), when the engine reports one.
    #[serde(default, alias = "score", skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,

    /// Polygon corners as `[x, y]` points, when the engine reports them.
    #[serde(default, alias = "box", skip_serializing_if = "Option::is_none")]
    pub bbox: Option<Vec<[f32; 2]>>,
}

impl TextBox {
    /// A fragment with text only.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            confidence: None,
            bbox: None,
        }
    }

    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(confidence);
        self
    }
}

/// Element shapes produced by common OCR engines.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawFragment {
    /// Bare string (EasyOCR with `detail=0`).
    Text(String),
    /// `[bbox, text, confidence]` (EasyOCR `readtext`).
    EasyOcr(Vec<[f32; 2]>, String, f32),
    /// `[bbox, [text, confidence]]` (PaddleOCR).
    Paddle(Vec<[f32; 2]>, (String, f32)),
    /// `{ "text": .., "confidence": .., "bbox": .. }`.
    Object(TextBox),
}

impl From<RawFragment> for TextBox {
    fn from(raw: RawFragment) -> Self {
        match raw {
            RawFragment::Text(text) => TextBox::new(text),
            RawFragment::EasyOcr(bbox, text, confidence) | RawFragment::Paddle(bbox, (text, confidence)) => {
                TextBox {
                    text,
                    confidence: Some(confidence),
                    bbox: Some(bbox),
                }
            }
            RawFragment::Object(text_box) => text_box,
        }
    }
}

/// How recorded OCR output is encoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// JSON when the input starts with `[`, plain text otherwise.
    #[default]
    Auto,
    /// Top-level JSON array of fragments.
    Json,
    /// One fragment per non-blank line.
    Text,
}

/// Ordered OCR output for one image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OcrOutput {
    /// Fragments in emission order.
    pub boxes: Vec<TextBox>,
}

impl OcrOutput {
    pub fn new(boxes: Vec<TextBox>) -> Self {
        Self { boxes }
    }

    /// Build from bare strings.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(texts.into_iter().map(TextBox::new).collect())
    }

    /// Decode input in the given format.
    pub fn parse(input: &str, format: InputFormat) -> Result<Self, OcrError> {
        match format {
            InputFormat::Json => Self::from_json_str(input),
            InputFormat::Text => Ok(Self::from_plain_text(input)),
            InputFormat::Auto => {
                if input.trim_start().starts_with('[') {
                    Self::from_json_str(input)
                } else {
                    Ok(Self::from_plain_text(input))
                }
            }
        }
    }

    /// Decode a JSON array of fragments.
    pub fn from_json_str(json: &str) -> Result<Self, OcrError> {
        let values: Vec<serde_json::Value> =
            serde_json::from_str(json).map_err(|e| OcrError::Parse(e.to_string()))?;

        let boxes = values
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                serde_json::from_value::<RawFragment>(value)
                    .map(TextBox::from)
                    .map_err(|_| OcrError::UnsupportedFragment { index })
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Decoded {} fragments from JSON", boxes.len());
        Ok(Self::new(boxes))
    }

    /// One fragment per non-blank line.
    pub fn from_plain_text(text: &str) -> Self {
        Self::from_texts(text.lines().filter(|line| !line.trim().is_empty()))
    }

    /// Drop fragments whose reported confidence is below `min_confidence`.
    ///
    /// Fragments without a confidence are kept.
    pub fn retain_confident(&mut self, min_confidence: f32) {
        if min_confidence <= 0.0 {
            return;
        }
        let before = self.boxes.len();
        self.boxes
            .retain(|b| b.confidence.is_none_or(|c| c >= min_confidence));
        debug!(
            "Dropped {} fragments below confidence {:.2}",
            before - self.boxes.len(),
            min_confidence
        );
    }

    /// Fragment texts in emission order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.boxes.iter().map(|b| b.text.as_str())
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_easyocr_triples() {
        let json = r#"[
            [[[10, 20], [200, 20], [200, 45], [10, 45]], "NOM/SURNAME", 0.91],
            [[[10, 50], [120, 50], [120, 80], [10, 80]], "MBALLA", 0.87]
        ]"#;

        let output = OcrOutput::from_json_str(json).unwrap();

        assert_eq!(output.texts().collect::<Vec<_>>(), vec!["NOM/SURNAME", "MBALLA"]);
        assert_eq!(output.boxes[1].confidence, Some(0.87));
        assert_eq!(output.boxes[0].bbox.as_ref().map(Vec::len), Some(4));
    }

    #[test]
    fn test_paddle_pairs_and_mixed_shapes() {
        let json = r#"[
            [[[0, 0], [1, 0], [1, 1], [0, 1]], ["SEXE/SEX", 0.8]],
            "F",
            {"text": "TAILLE/MERGHT", "score": 0.4},
            {"text": "1,83"}
        ]"#;

        let output = OcrOutput::from_json_str(json).unwrap();

        assert_eq!(
            output.texts().collect::<Vec<_>>(),
            vec!["SEXE/SEX", "F", "TAILLE/MERGHT", "1,83"]
        );
        assert_eq!(output.boxes[2].confidence, Some(0.4));
        assert_eq!(output.boxes[3].confidence, None);
    }

    #[test]
    fn test_unsupported_fragment_reports_index() {
        let err = OcrOutput::from_json_str(r#"["ok", 42]"#).unwrap_err();
        assert!(matches!(err, OcrError::UnsupportedFragment { index: 1 }));

        let err = OcrOutput::from_json_str(r#"{"text": "x"}"#).unwrap_err();
        assert!(matches!(err, OcrError::Parse(_)));
    }

    #[test]
    fn test_plain_text_and_auto_detection() {
        let output = OcrOutput::parse("NOM/SURNAME\n\n  MBALLA\n", InputFormat::Auto).unwrap();
        assert_eq!(output.texts().collect::<Vec<_>>(), vec!["NOM/SURNAME", "  MBALLA"]);

        let output = OcrOutput::parse(r#"  ["a", "b"]"#, InputFormat::Auto).unwrap();
        assert_eq!(output.len(), 2);

        let output = OcrOutput::parse(r#"["a", "b"]"#, InputFormat::Text).unwrap();
        assert_eq!(output.len(), 1);
    }

    #[test]
    fn test_empty_array() {
        let output = OcrOutput::from_json_str("[]").unwrap();
        assert!(output.is_empty());
    }

    #[test]
    fn test_retain_confident() {
        let mut output = OcrOutput::new(vec![
            TextBox::new("NOM/SURNAME").with_confidence(0.9),
            TextBox::new("M8ALLA").with_confidence(0.2),
            TextBox::new("MBALLA"),
        ]);

        output.retain_confident(0.0);
        assert_eq!(output.len(), 3);

        output.retain_confident(0.5);
        assert_eq!(output.texts().collect::<Vec<_>>(), vec!["NOM/SURNAME", "MBALLA"]);
    }
}
