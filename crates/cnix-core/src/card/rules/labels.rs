//! Section labels printed on the card and their known OCR misreadings.

use serde::{Deserialize, Serialize};

use crate::models::identity::FieldKind;

/// A section label: the canonical text plus garbled renderings seen in OCR output.
///
/// Matching is exact substring containment, case-sensitive. There is no fuzzy
/// matching; every misreading that should trigger the label must be listed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelPattern {
    /// Label as printed on the card.
    pub canonical: String,
    /// Known OCR misreadings of the label.
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl LabelPattern {
    pub fn new(canonical: impl Into<String>) -> Self {
        Self {
            canonical: canonical.into(),
            aliases: Vec::new(),
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.push_alias(alias);
        self
    }

    /// Add an alias. Empty and duplicate aliases are ignored, since an empty
    /// string would match every fragment.
    pub fn push_alias(&mut self, alias: impl Into<String>) {
        let alias = alias.into();
        if alias.is_empty() || alias == self.canonical || self.aliases.contains(&alias) {
            return;
        }
        self.aliases.push(alias);
    }

    /// All renderings, canonical first.
    pub fn variants(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.canonical.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    /// Whether the fragment contains any rendering of this label.
    pub fn matches(&self, fragment: &str) -> bool {
        self.variants().any(|variant| fragment.contains(variant))
    }
}

/// Built-in label for a field.
pub fn builtin_label(kind: FieldKind) -> LabelPattern {
    match kind {
        FieldKind::Surname => LabelPattern::new("NOM/SURNAME").with_alias("NoMSURNAME"),
        FieldKind::GivenNames => LabelPattern::new("PRÉNOMS/GIVEN").with_alias("PREnOMSiGIVEN"),
        FieldKind::DateOfBirth => {
            LabelPattern::new("DATE DE NAISSANCE").with_alias("DATEPEaNCEDareofeth")
        }
        FieldKind::PlaceOfBirth => LabelPattern::new("LIEU DE NAISSANCE").with_alias("LFuEE"),
        FieldKind::Sex => LabelPattern::new("SEXE/SEX").with_alias("S8ssex"),
        FieldKind::Height => LabelPattern::new("TAILLE/MERGHT").with_alias("TailLE Hesser"),
        FieldKind::Profession => {
            LabelPattern::new("PROFESSION/OCCUPATION").with_alias("PROFESSIONOCCUPATION")
        }
    }
}
