//! Identity card data model.

use serde::{Deserialize, Serialize};

/// A field printed on the identity card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Surname (nom).
    Surname,
    /// Given names (prénoms).
    GivenNames,
    /// Date of birth (date de naissance).
    DateOfBirth,
    /// Place of birth (lieu de naissance).
    PlaceOfBirth,
    /// Sex (sexe).
    Sex,
    /// Height (taille).
    Height,
    /// Profession / occupation.
    Profession,
}

impl FieldKind {
    /// Every field, in card order.
    pub const ALL: [FieldKind; 7] = [
        FieldKind::Surname,
        FieldKind::GivenNames,
        FieldKind::DateOfBirth,
        FieldKind::PlaceOfBirth,
        FieldKind::Sex,
        FieldKind::Height,
        FieldKind::Profession,
    ];

    /// Snake-case key used in serialized output.
    pub fn key(&self) -> &'static str {
        match self {
            FieldKind::Surname => "surname",
            FieldKind::GivenNames => "given_names",
            FieldKind::DateOfBirth => "date_of_birth",
            FieldKind::PlaceOfBirth => "place_of_birth",
            FieldKind::Sex => "sex",
            FieldKind::Height => "height",
            FieldKind::Profession => "profession",
        }
    }

    /// Parse a field from its snake-case key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key.trim())
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Fields extracted from one OCR run over an identity card.
///
/// Every slot is a plain string; an empty string means the field was not
/// found. The serialized shape is flat: seven named string slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionResult {
    /// Family name.
    pub surname: String,

    /// Given names, letters and spaces only.
    pub given_names: String,

    /// Date of birth normalized to `DD.MM.YYYY` separators.
    pub date_of_birth: String,

    /// Place of birth as printed.
    pub place_of_birth: String,

    /// `F` or `M`.
    pub sex: String,

    /// Height in metres with a comma separator, e.g. `1,83`.
    pub height: String,

    /// Profession as printed.
    pub profession: String,
}

impl ExtractionResult {
    /// Create a record with every slot empty.
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, kind: FieldKind) -> &String {
        match kind {
            FieldKind::Surname => &self.surname,
            FieldKind::GivenNames => &self.given_names,
            FieldKind::DateOfBirth => &self.date_of_birth,
            FieldKind::PlaceOfBirth => &self.place_of_birth,
            FieldKind::Sex => &self.sex,
            FieldKind::Height => &self.height,
            FieldKind::Profession => &self.profession,
        }
    }

    fn slot_mut(&mut self, kind: FieldKind) -> &mut String {
        match kind {
            FieldKind::Surname => &mut self.surname,
            FieldKind::GivenNames => &mut self.given_names,
            FieldKind::DateOfBirth => &mut self.date_of_birth,
            FieldKind::PlaceOfBirth => &mut self.place_of_birth,
            FieldKind::Sex => &mut self.sex,
            FieldKind::Height => &mut self.height,
            FieldKind::Profession => &mut self.profession,
        }
    }

    /// Get a captured value, or `None` if the slot is empty.
    pub fn get(&self, kind: FieldKind) -> Option<&str> {
        let value = self.slot(kind);
        if value.is_empty() { None } else { Some(value.as_str()) }
    }

    /// Whether a slot has been filled.
    pub fn is_filled(&self, kind: FieldKind) -> bool {
        !self.slot(kind).is_empty()
    }

    /// Fill a slot unless it already holds a value.
    ///
    /// Returns `true` when the value was written. Slots are write-once.
    pub(crate) fn fill(&mut self, kind: FieldKind, value: String) -> bool {
        let slot = self.slot_mut(kind);
        if !slot.is_empty() || value.is_empty() {
            return false;
        }
        *slot = value;
        true
    }

    /// Fields that were not found, in card order.
    pub fn missing_fields(&self) -> Vec<FieldKind> {
        FieldKind::ALL
            .into_iter()
            .filter(|kind| !self.is_filled(*kind))
            .collect()
    }

    /// Number of filled slots.
    pub fn filled_count(&self) -> usize {
        FieldKind::ALL.len() - self.missing_fields().len()
    }

    /// Whether nothing at all was extracted.
    pub fn is_empty(&self) -> bool {
        self.filled_count() == 0
    }

    /// Iterate over `(field, value)` pairs in card order, empty slots included.
    pub fn iter(&self) -> impl Iterator<Item = (FieldKind, &str)> {
        FieldKind::ALL
            .into_iter()
            .map(move |kind| (kind, self.slot(kind).as_str()))
    }
}
