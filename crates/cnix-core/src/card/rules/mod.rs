//! Rule table for identity card fields.
//!
//! Each field has one [`FieldRule`]: the label that moves the cursor to it and
//! the value grammar a fragment must satisfy to be captured. The scanning loop
//! in the parser only consults this table.

pub mod dates;
pub mod height;
pub mod labels;
pub mod names;
pub mod patterns;
pub mod tokens;

pub use dates::{normalize_date, DateExtractor};
pub use height::HeightExtractor;
pub use labels::{builtin_label, LabelPattern};
pub use names::{clean_name, NameExtractor};
pub use tokens::{SexExtractor, UppercaseWordExtractor};

use serde::{Deserialize, Serialize};

use crate::models::identity::FieldKind;

/// Trait for field value extractors.
pub trait FieldExtractor {
    /// Extract the field value from one fragment.
    fn extract(&self, text: &str) -> Option<String>;
}

/// Value grammar of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum ValueGrammar {
    /// Letters and whitespace only, non-empty after cleanup.
    Name,
    /// First `d[d]<sep>d[d]<sep>dd[dd]` substring, separators rewritten to `.`.
    Date,
    /// Fragment is exactly `F` or `M` once uppercased.
    Sex,
    /// First `d,dd` substring.
    Height,
    /// Fragment made only of uppercase letters, longer than `longer_than`.
    UppercaseWord { longer_than: usize },
}

impl ValueGrammar {
    /// Apply the grammar to a trimmed fragment.
    pub fn capture(&self, text: &str) -> Option<String> {
        match self {
            ValueGrammar::Name => NameExtractor::new().extract(text),
            ValueGrammar::Date => DateExtractor::new().extract(text),
            ValueGrammar::Sex => SexExtractor::new().extract(text),
            ValueGrammar::Height => HeightExtractor::new().extract(text),
            ValueGrammar::UppercaseWord { longer_than } => {
                UppercaseWordExtractor::new(*longer_than).extract(text)
            }
        }
    }

    /// Grammar used for a field on the card.
    pub fn for_field(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Surname | FieldKind::GivenNames => ValueGrammar::Name,
            FieldKind::DateOfBirth => ValueGrammar::Date,
            FieldKind::PlaceOfBirth => ValueGrammar::UppercaseWord { longer_than: 3 },
            FieldKind::Sex => ValueGrammar::Sex,
            FieldKind::Height => ValueGrammar::Height,
            FieldKind::Profession => ValueGrammar::UppercaseWord { longer_than: 2 },
        }
    }
}

/// Label and value grammar of one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRule {
    pub kind: FieldKind,
    pub label: LabelPattern,
    pub grammar: ValueGrammar,
}

impl FieldRule {
    /// Built-in rule for a field.
    pub fn builtin(kind: FieldKind) -> Self {
        Self {
            kind,
            label: builtin_label(kind),
            grammar: ValueGrammar::for_field(kind),
        }
    }
}

/// Ordered table of field rules.
///
/// Order matters when a fragment contains labels of several fields: the first
/// rule in the table wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTable {
    rules: Vec<FieldRule>,
}

impl RuleTable {
    /// Built-in table covering every field, in card order.
    pub fn builtin() -> Self {
        Self {
            rules: FieldKind::ALL.into_iter().map(FieldRule::builtin).collect(),
        }
    }

    /// Add an extra label rendering for a field.
    pub fn with_alias(mut self, kind: FieldKind, alias: impl Into<String>) -> Self {
        self.add_alias(kind, alias);
        self
    }

    /// Add an extra label rendering for a field.
    pub fn add_alias(&mut self, kind: FieldKind, alias: impl Into<String>) {
        if let Some(rule) = self.rules.iter_mut().find(|r| r.kind == kind) {
            rule.label.push_alias(alias);
        }
    }

    /// Field whose label appears in the fragment, if any.
    pub fn match_label(&self, fragment: &str) -> Option<FieldKind> {
        self.rules
            .iter()
            .find(|rule| rule.label.matches(fragment))
            .map(|rule| rule.kind)
    }

    /// Rule for a field.
    pub fn rule(&self, kind: FieldKind) -> Option<&FieldRule> {
        self.rules.iter().find(|r| r.kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldRule> {
        self.rules.iter()
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::builtin()
    }
}
