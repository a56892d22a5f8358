//! Label-driven field capture over OCR fragments.

use tracing::{debug, info, trace};

use crate::models::identity::{ExtractionResult, FieldKind};
use crate::ocr::OcrOutput;

use super::rules::RuleTable;
use super::IdentityExtractor;

/// Identity card parser.
///
/// Walks the fragments once, in order. A fragment containing a label moves the
/// cursor to that label's field and is never itself a value. Any other fragment
/// is offered to the cursor's field; the first one that satisfies the field's
/// grammar fills the slot, and the slot stays frozen after that. The cursor only
/// moves on the next label.
#[derive(Debug, Clone, Default)]
pub struct CniParser {
    rules: RuleTable,
}

/// Cursor and record for one extraction run.
#[derive(Debug, Default)]
struct ExtractionState {
    cursor: Option<FieldKind>,
    result: ExtractionResult,
}

impl ExtractionState {
    fn step(&mut self, rules: &RuleTable, index: usize, fragment: &str) {
        let text = fragment.trim();

        if let Some(kind) = rules.match_label(text) {
            debug!("Fragment {} is the {} label: {:?}", index, kind, text);
            self.cursor = Some(kind);
            return;
        }

        let Some(kind) = self.cursor else {
            return;
        };
        if self.result.is_filled(kind) {
            return;
        }
        let Some(rule) = rules.rule(kind) else {
            return;
        };

        match rule.grammar.capture(text) {
            Some(value) => {
                debug!("Captured {} = {:?} from fragment {}", kind, value, index);
                self.result.fill(kind, value);
            }
            None => trace!("Fragment {} rejected for {}: {:?}", index, kind, text),
        }
    }
}

impl CniParser {
    /// Create a parser with the built-in label table.
    pub fn new() -> Self {
        Self {
            rules: RuleTable::builtin(),
        }
    }

    /// Use a custom rule table.
    pub fn with_rules(mut self, rules: RuleTable) -> Self {
        self.rules = rules;
        self
    }

    /// Add an extra OCR rendering of a field label.
    pub fn with_alias(mut self, kind: FieldKind, alias: impl Into<String>) -> Self {
        self.rules.add_alias(kind, alias);
        self
    }

    /// The rule table in use.
    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Scan fragments in order and build the record.
    pub fn parse<'a, I>(&self, fragments: I) -> ExtractionResult
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut state = ExtractionState::default();
        let mut count = 0;

        for (index, fragment) in fragments.into_iter().enumerate() {
            state.step(&self.rules, index, fragment);
            count = index + 1;
        }

        info!(
            "Extracted {}/{} card fields from {} fragments",
            state.result.filled_count(),
            FieldKind::ALL.len(),
            count
        );

        state.result
    }
}

impl IdentityExtractor for CniParser {
    fn extract(&self, ocr_output: &OcrOutput) -> ExtractionResult {
        self.parse(ocr_output.texts())
    }

    fn extract_fragments<S: AsRef<str>>(&self, fragments: &[S]) -> ExtractionResult {
        self.parse(fragments.iter().map(|f| f.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn extract(fragments: &[&str]) -> ExtractionResult {
        CniParser::new().extract_fragments(fragments)
    }

    #[test]
    fn test_names_are_cleaned() {
        let result = extract(&["NOM/SURNAME", "MBALLA", "PRÉNOMS/GIVEN", "Jean-Paul123"]);

        assert_eq!(result.surname, "MBALLA");
        assert_eq!(result.given_names, "JeanPaul");
    }

    #[test]
    fn test_date_inside_sentence() {
        let result = extract(&["DATE DE NAISSANCE", "né le 12,05,1990 à Yaoundé"]);

        assert_eq!(result.date_of_birth, "12.05.1990");
    }

    #[test]
    fn test_slot_waits_for_first_match() {
        let result = extract(&["SEXE/SEX", "Male", "f"]);

        assert_eq!(result.sex, "F");
    }

    #[test]
    fn test_empty_input() {
        let empty: [&str; 0] = [];
        let result = extract(&empty);

        assert_eq!(result, ExtractionResult::default());
        assert!(result.is_empty());
    }

    #[test]
    fn test_height_inside_text() {
        let result = extract(&["TAILLE/MERGHT", "env. 1,83 m"]);

        assert_eq!(result.height, "1,83");
    }

    #[test]
    fn test_full_card() {
        let result = extract(&[
            "REPUBLIQUE DU CAMEROUN",
            "NoMSURNAME",
            "ATANGANA",
            "PREnOMSiGIVEN",
            "Marie Claire",
            "DATEPEaNCEDareofeth",
            "03/11/1987",
            "LIEU DE NAISSANCE",
            "EBOLOWA",
            "S8ssex",
            "F",
            "TailLE Hesser",
            "1,63",
            "PROFESSION/OCCUPATION",
            "COMMERCANTE",
        ]);

        assert_eq!(
            result,
            ExtractionResult {
                surname: "ATANGANA".to_string(),
                given_names: "Marie Claire".to_string(),
                date_of_birth: "03.11.1987".to_string(),
                place_of_birth: "EBOLOWA".to_string(),
                sex: "F".to_string(),
                height: "1,63".to_string(),
                profession: "COMMERCANTE".to_string(),
            }
        );
    }

    #[test]
    fn test_deterministic() {
        let fragments = [
            "NOM/SURNAME",
            "MBALLA",
            "SEXE/SEX",
            "M",
            "LIEU DE NAISSANCE",
            "DOUALA",
        ];
        let parser = CniParser::new();

        assert_eq!(
            parser.extract_fragments(&fragments),
            parser.extract_fragments(&fragments)
        );
    }

    #[test]
    fn test_slot_is_frozen_after_capture() {
        let result = extract(&["NOM/SURNAME", "MBALLA", "ESSOMBA", "NOM/SURNAME", "ONANA"]);

        assert_eq!(result.surname, "MBALLA");
    }

    #[test]
    fn test_value_before_label_is_ignored() {
        let result = extract(&["MBALLA", "NOM/SURNAME"]);
        assert_eq!(result.surname, "");

        let result = extract(&["1,83", "TAILLE/MERGHT"]);
        assert_eq!(result.height, "");
    }

    #[test]
    fn test_garbled_label_moves_cursor() {
        for (canonical, alias) in [
            ("NOM/SURNAME", "NoMSURNAME"),
            ("PRÉNOMS/GIVEN", "PREnOMSiGIVEN"),
        ] {
            assert_eq!(extract(&[canonical, "ONANA"]), extract(&[alias, "ONANA"]));
        }

        let result = extract(&["S8ssex", "M"]);
        assert_eq!(result.sex, "M");
    }

    #[test]
    fn test_digits_never_fill_names() {
        let result = extract(&["NOM/SURNAME", "123456", "PRÉNOMS/GIVEN", "0987", "42"]);

        assert_eq!(result.surname, "");
        assert_eq!(result.given_names, "");
    }

    #[test]
    fn test_label_fragment_is_never_a_value() {
        // The label fragment carries a date but only moves the cursor.
        let result = extract(&["DATE DE NAISSANCE 01.01.2000", "12.05.1990"]);

        assert_eq!(result.date_of_birth, "12.05.1990");
    }

    #[test]
    fn test_new_label_moves_cursor_away() {
        let result = extract(&["SEXE/SEX", "Male", "TAILLE/MERGHT", "M", "1,70"]);

        assert_eq!(result.sex, "");
        assert_eq!(result.height, "1,70");
    }

    #[test]
    fn test_fragments_are_trimmed() {
        let result = extract(&["  SEXE/SEX ", "  m  ", " LIEU DE NAISSANCE", "  BAFOUSSAM \t"]);

        assert_eq!(result.sex, "M");
        assert_eq!(result.place_of_birth, "BAFOUSSAM");
    }

    #[test]
    fn test_uppercase_heading_misfires_as_place() {
        // Known limitation: a stray uppercase word after the label is taken as the place.
        let result = extract(&["LIEU DE NAISSANCE", "AUTORITE", "YAOUNDE"]);

        assert_eq!(result.place_of_birth, "AUTORITE");
    }

    #[test]
    fn test_multi_word_uppercase_values_are_skipped() {
        // Spaces are not uppercase letters, so the cursor waits for a single word.
        let result = extract(&["PROFESSION/OCCUPATION", "SANS EMPLOI", "REPUBLIQUE"]);
        assert_eq!(result.profession, "REPUBLIQUE");

        let result = extract(&["LIEU DE NAISSANCE", "NKONG SAMBA"]);
        assert_eq!(result.place_of_birth, "");
    }

    #[test]
    fn test_fragments_without_cursor_are_ignored() {
        let result = extract(&["REPUBLIQUE DU CAMEROUN", "MBALLA", "1,83", "F"]);

        assert!(result.is_empty());
    }

    #[test]
    fn test_extra_alias() {
        let parser = CniParser::new().with_alias(FieldKind::Profession, "PROFESSI0N");
        let result = parser.extract_fragments(&["PROFESSI0N", "ENSEIGNANT"]);

        assert_eq!(result.profession, "ENSEIGNANT");
    }

    #[test]
    fn test_extract_from_ocr_output() {
        let output = OcrOutput::from_texts(["NOM/SURNAME", "MBALLA"]);
        let result = CniParser::new().extract(&output);

        assert_eq!(result.surname, "MBALLA");
    }
}
