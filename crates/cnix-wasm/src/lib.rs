//! WASM bindings for identity card field extraction.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js,
//! typically fed with the output of a browser-side OCR engine.

use wasm_bindgen::prelude::*;

use cnix_core::{CniParser, FieldKind, IdentityExtractor, OcrOutput, TextBox};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Extract card fields from an array of strings in OCR order.
#[wasm_bindgen]
pub fn extract_fields(fragments: JsValue) -> Result<JsValue, JsValue> {
    IdentityCardExtractor::new().extract(fragments)
}

/// Extract card fields from recorded OCR output (EasyOCR / PaddleOCR JSON).
#[wasm_bindgen]
pub fn extract_from_ocr_json(json: &str) -> Result<JsValue, JsValue> {
    IdentityCardExtractor::new().extract_json(json)
}

/// Identity card extractor class for browser use.
#[wasm_bindgen]
pub struct IdentityCardExtractor {
    parser: CniParser,
}

#[wasm_bindgen]
impl IdentityCardExtractor {
    /// Create an extractor with the built-in label table.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            parser: CniParser::new(),
        }
    }

    /// Add an OCR misreading of a field label, e.g. `("sex", "SEXF/SEX")`.
    #[wasm_bindgen(js_name = addAlias)]
    pub fn add_alias(&mut self, field: &str, alias: &str) -> Result<(), JsValue> {
        let kind = FieldKind::from_key(field)
            .ok_or_else(|| to_js_error(format!("unknown field: {}", field)))?;
        self.parser = self.parser.clone().with_alias(kind, alias);
        Ok(())
    }

    /// Extract card fields from an array of strings.
    #[wasm_bindgen]
    pub fn extract(&self, fragments: JsValue) -> Result<JsValue, JsValue> {
        let fragments: Vec<String> =
            serde_wasm_bindgen::from_value(fragments).map_err(to_js_error)?;
        let result = self.parser.extract_fragments(&fragments);

        serde_wasm_bindgen::to_value(&result).map_err(to_js_error)
    }

    /// Extract card fields from recorded OCR output JSON.
    #[wasm_bindgen(js_name = extractJson)]
    pub fn extract_json(&self, json: &str) -> Result<JsValue, JsValue> {
        let output = OcrOutput::from_json_str(json).map_err(to_js_error)?;
        let result = self.parser.extract(&output);

        serde_wasm_bindgen::to_value(&result).map_err(to_js_error)
    }

    /// The label table as a JS object.
    #[wasm_bindgen]
    pub fn labels(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.parser.rules()).map_err(to_js_error)
    }
}

impl Default for IdentityCardExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// OCR result built up fragment by fragment from browser-side OCR.
#[wasm_bindgen]
pub struct OcrResultJs {
    output: OcrOutput,
}

#[wasm_bindgen]
impl OcrResultJs {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            output: OcrOutput::default(),
        }
    }

    /// Append a recognized fragment, in emission order.
    #[wasm_bindgen(js_name = addFragment)]
    pub fn add_fragment(&mut self, text: &str, confidence: Option<f32>) {
        let mut text_box = TextBox::new(text);
        text_box.confidence = confidence;
        self.output.boxes.push(text_box);
    }

    /// Number of fragments added so far.
    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.output.len()
    }

    /// Extract card fields, dropping fragments below `min_confidence`.
    #[wasm_bindgen(js_name = extractFields)]
    pub fn extract_fields(&self, min_confidence: f32) -> Result<JsValue, JsValue> {
        let mut output = self.output.clone();
        output.retain_confident(min_confidence);
        let result = CniParser::new().extract(&output);

        serde_wasm_bindgen::to_value(&result).map_err(to_js_error)
    }
}

impl Default for OcrResultJs {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_version() {
        assert!(!version().is_empty());
    }

    #[wasm_bindgen_test]
    fn test_add_alias_rejects_unknown_field() {
        let mut extractor = IdentityCardExtractor::new();

        assert!(extractor.add_alias("sex", "SEXF/SEX").is_ok());
        assert!(extractor.add_alias("nationality", "NATIONALITE").is_err());
    }

    #[wasm_bindgen_test]
    fn test_ocr_result_fragments() {
        let mut ocr = OcrResultJs::new();
        ocr.add_fragment("SEXE/SEX", Some(0.9));
        ocr.add_fragment("f", None);

        assert_eq!(ocr.length(), 2);
        assert!(ocr.extract_fields(0.5).is_ok());
    }
}
