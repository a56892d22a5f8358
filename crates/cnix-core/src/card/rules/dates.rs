//! Date of birth extraction.

use super::FieldExtractor;
use super::patterns::{DATE_DMY, DATE_SEPARATOR};

/// Date extractor.
///
/// Picks the first date-shaped substring of the fragment and rewrites every
/// separator to `.`. No calendar validation: `31.02.1990` is returned as is.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    fn extract(&self, text: &str) -> Option<String> {
        DATE_DMY
            .find(text)
            .map(|m| normalize_date(m.as_str()))
    }
}

/// Rewrite `,` and `/` separators to `.`.
pub fn normalize_date(date: &str) -> String {
    DATE_SEPARATOR.replace_all(date, ".").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_date_inside_text() {
        let extractor = DateExtractor::new();

        assert_eq!(
            extractor.extract("né le 12,05,1990 à Yaoundé"),
            Some("12.05.1990".to_string())
        );
    }

    #[test]
    fn test_mixed_separators() {
        let extractor = DateExtractor::new();

        assert_eq!(extractor.extract("1/5.1990"), Some("1.5.1990".to_string()));
        assert_eq!(extractor.extract("03/11/87"), Some("03.11.87".to_string()));
    }

    #[test]
    fn test_first_date_wins() {
        let extractor = DateExtractor::new();

        assert_eq!(
            extractor.extract("12.05.1990 - 01.01.2030"),
            Some("12.05.1990".to_string())
        );
    }

    #[test]
    fn test_year_is_two_or_four_digits() {
        let extractor = DateExtractor::new();

        assert_eq!(extractor.extract("12.05.199"), Some("12.05.19".to_string()));
        assert_eq!(extractor.extract("12.05.1"), None);
    }

    #[test]
    fn test_no_date() {
        let extractor = DateExtractor::new();

        assert_eq!(extractor.extract("DATE DE NAISSANCE"), None);
        assert_eq!(extractor.extract("12-05-1990"), None);
        assert_eq!(extractor.extract(""), None);
    }
}
