//! Height extraction.

use super::FieldExtractor;
use super::patterns::HEIGHT_METRES;

/// Height extractor: first `d,dd` substring, returned verbatim.
pub struct HeightExtractor;

impl HeightExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HeightExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for HeightExtractor {
    fn extract(&self, text: &str) -> Option<String> {
        HEIGHT_METRES.find(text).map(|m| m.as_str().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_height() {
        let extractor = HeightExtractor::new();

        assert_eq!(extractor.extract("env. 1,83 m"), Some("1,83".to_string()));
        assert_eq!(extractor.extract("1,63"), Some("1,63".to_string()));
    }

    #[test]
    fn test_comma_is_required() {
        let extractor = HeightExtractor::new();

        assert_eq!(extractor.extract("1.83"), None);
        assert_eq!(extractor.extract("183 cm"), None);
        assert_eq!(extractor.extract("1,8"), None);
    }
}
