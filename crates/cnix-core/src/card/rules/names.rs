//! Surname and given-name cleanup.

use super::FieldExtractor;

/// Name extractor: keeps letters and whitespace, drops everything else.
pub struct NameExtractor;

impl NameExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NameExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for NameExtractor {
    fn extract(&self, text: &str) -> Option<String> {
        let cleaned = clean_name(text);
        if cleaned.is_empty() { None } else { Some(cleaned) }
    }
}

/// Strip digits, punctuation and symbols from a name, then trim.
///
/// Inner whitespace is kept as is, so `"ATANGANA  ONANA"` keeps both spaces.
pub fn clean_name(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphabetic() || c.is_whitespace())
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_name() {
        assert_eq!(clean_name("Jean-Paul123"), "JeanPaul");
        assert_eq!(clean_name("  MBALLA. "), "MBALLA");
        assert_eq!(clean_name("ATANGANA ONANA"), "ATANGANA ONANA");
        assert_eq!(clean_name("Zoé"), "Zoé");
    }

    #[test]
    fn test_rejects_digits_and_punctuation_only() {
        let extractor = NameExtractor::new();

        assert_eq!(extractor.extract("123456"), None);
        assert_eq!(extractor.extract("--/ ,."), None);
        assert_eq!(extractor.extract(""), None);
        assert_eq!(extractor.extract("MBALLA"), Some("MBALLA".to_string()));
    }
}
