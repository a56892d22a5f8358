//! Whole-fragment values: sex marker and bare uppercase words.

use super::FieldExtractor;

/// Sex extractor: the fragment must be exactly `F` or `M`, any case.
pub struct SexExtractor;

impl SexExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SexExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for SexExtractor {
    fn extract(&self, text: &str) -> Option<String> {
        let marker = text.trim().to_uppercase();
        match marker.as_str() {
            "F" | "M" => Some(marker),
            _ => None,
        }
    }
}

/// Bare uppercase word extractor, used for place of birth and profession.
///
/// Accepts a fragment made only of uppercase letters and longer than
/// `longer_than` characters. This also accepts any other uppercase text that
/// shows up between the label and the real value, e.g. a stray `REPUBLIQUE`.
pub struct UppercaseWordExtractor {
    longer_than: usize,
}

impl UppercaseWordExtractor {
    pub fn new(longer_than: usize) -> Self {
        Self { longer_than }
    }
}

impl FieldExtractor for UppercaseWordExtractor {
    fn extract(&self, text: &str) -> Option<String> {
        let text = text.trim();
        if is_uppercase_word(text) && text.chars().count() > self.longer_than {
            Some(text.to_string())
        } else {
            None
        }
    }
}

fn is_uppercase_word(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_alphabetic() && c.is_uppercase())
}
