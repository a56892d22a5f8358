//! Configuration structures for the extraction pipeline.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::card::CniParser;
use crate::error::{CnixError, Result};
use crate::models::identity::FieldKind;
use crate::ocr::InputFormat;

/// Main configuration for cnix.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CnixConfig {
    /// How recorded OCR output is read.
    pub input: InputConfig,

    /// Label table configuration.
    pub labels: LabelConfig,
}

/// Input decoding configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    /// Encoding of recorded OCR output.
    pub format: InputFormat,

    /// Drop fragments whose reported confidence is below this (0.0 keeps all).
    pub min_confidence: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            format: InputFormat::Auto,
            min_confidence: 0.0,
        }
    }
}

/// Label table configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LabelConfig {
    /// Extra OCR renderings of field labels, appended to the built-in ones.
    pub extra_aliases: BTreeMap<FieldKind, Vec<String>>,
}

/// Check that a confidence threshold lies in `[0, 1]`. NaN is rejected.
pub fn check_min_confidence(value: f32) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(CnixError::Config(format!(
            "input.min_confidence must be between 0 and 1, got {}",
            value
        )))
    }
}

impl CnixConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        check_min_confidence(self.input.min_confidence)?;

        for (kind, aliases) in &self.labels.extra_aliases {
            if aliases.iter().any(|a| a.is_empty()) {
                return Err(CnixError::Config(format!(
                    "labels.extra_aliases.{} contains an empty alias",
                    kind
                )));
            }
        }

        Ok(())
    }

    /// Build a parser with the built-in labels plus the configured aliases.
    pub fn build_parser(&self) -> CniParser {
        let mut parser = CniParser::new();
        for (kind, aliases) in &self.labels.extra_aliases {
            for alias in aliases {
                parser = parser.with_alias(*kind, alias.clone());
            }
        }
        parser
    }
}
