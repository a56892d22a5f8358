//! Core library for identity card OCR field extraction.
//!
//! This crate provides:
//! - Decoding of recorded OCR engine output (EasyOCR, PaddleOCR, plain text)
//! - A label-driven parser that turns ordered OCR fragments into card fields
//! - The seven-field identity record and its configuration
//!
//! ```
//! use cnix_core::{CniParser, IdentityExtractor};
//!
//! let result = CniParser::new().extract_fragments(&["SEXE/SEX", "Male", "f"]);
//! assert_eq!(result.sex, "F");
//! ```

pub mod card;
pub mod error;
pub mod models;
pub mod ocr;

pub use card::rules::{FieldRule, LabelPattern, RuleTable, ValueGrammar};
pub use card::{CniParser, IdentityExtractor};
pub use error::{CnixError, OcrError, Result};
pub use models::config::{CnixConfig, check_min_confidence};
pub use models::identity::{ExtractionResult, FieldKind};
pub use ocr::{CardReader, InputFormat, OcrEngine, OcrOutput, TextBox};
