//! Scenario and model selection.
//!
//! Section names follow a naming convention: a logical model base
//! name plus an optional probability-scenario suffix (`_positive`,
//! `_negative`, `_exclusion`, case-insensitive). This module resolves
//! which sections an invocation operates on, either from an explicit
//! caller-provided list or by deriving defaults from the document.

use crate::schema::{Document, MASTER_PROFILE_KEY, Section};
use std::collections::BTreeSet;
use std::fmt;

/// Error type for explicit model selection.
#[derive(Debug, thiserror::Error)]
pub enum SelectError {
    /// The caller named a model that is not in the configuration.
    #[error("model '{name}' not found in the configuration. Available models: {}", .available.join(", "))]
    UnknownModel { name: String, available: Vec<String> },
}

/// The three probability scenarios a model can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    Positive,
    Negative,
    Exclusion,
}

impl Scenario {
    /// All scenarios, in canonical order.
    pub const ALL: [Scenario; 3] = [Scenario::Positive, Scenario::Negative, Scenario::Exclusion];

    /// The section-name suffix for this scenario, without the
    /// leading underscore.
    pub fn as_str(&self) -> &'static str {
        match self {
            Scenario::Positive => "positive",
            Scenario::Negative => "negative",
            Scenario::Exclusion => "exclusion",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve which sections to operate on.
///
/// An explicit list is used verbatim, even when some names are absent
/// from the document (those are skipped downstream, not rejected).
/// The default selection is every section whose name does not begin
/// with the reserved master-template key.
pub fn selected_models(document: &Document, explicit: Option<&[String]>) -> Vec<String> {
    match explicit {
        Some(models) => models.to_vec(),
        None => document
            .keys()
            .filter(|name| !name.starts_with(MASTER_PROFILE_KEY))
            .cloned()
            .collect(),
    }
}

/// Derive the de-duplicated logical model base names.
///
/// Scenario suffixes are stripped case-insensitively; suffixed names
/// are lowercased so `Model_1_Positive` and `model_1_negative` fold
/// into one base. Unsuffixed names pass through unchanged.
pub fn base_model_names(document: &Document) -> Vec<String> {
    let bases: BTreeSet<String> = document
        .keys()
        .filter(|name| !name.starts_with(MASTER_PROFILE_KEY))
        .map(|name| {
            let lower = name.to_lowercase();
            for scenario in Scenario::ALL {
                let suffix = format!("_{scenario}");
                if let Some(base) = lower.strip_suffix(&suffix) {
                    return base.to_string();
                }
            }
            name.clone()
        })
        .collect();
    bases.into_iter().collect()
}

/// Look up the section for a base model and scenario.
///
/// Tries `{base}_{scenario}` first, then the capitalized-base
/// fallback for bases that were lowercased during derivation.
/// Returns the matching section key alongside the section so callers
/// can name output files after it.
pub fn scenario_section<'a>(
    document: &'a Document,
    base: &str,
    scenario: Scenario,
) -> Option<(&'a str, &'a Section)> {
    let candidates = [
        format!("{base}_{scenario}"),
        format!("{}_{scenario}", capitalize(base)),
    ];
    candidates.iter().find_map(|key| {
        document
            .get_key_value(key.as_str())
            .map(|(name, section)| (name.as_str(), section))
    })
}

/// Look up an explicitly named model, failing with the list of
/// available sections when it does not exist.
pub fn require_model<'a>(document: &'a Document, name: &str) -> Result<&'a Section, SelectError> {
    document.get(name).ok_or_else(|| SelectError::UnknownModel {
        name: name.to_string(),
        available: document.keys().cloned().collect(),
    })
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document_with(names: &[&str]) -> Document {
        names
            .iter()
            .map(|name| (name.to_string(), Section::new()))
            .collect()
    }

    #[test]
    fn test_selected_models_default_excludes_master_key() {
        let document = document_with(&["Model_1", "Model_2", "user_profile"]);
        assert_eq!(
            selected_models(&document, None),
            vec!["Model_1".to_string(), "Model_2".to_string()]
        );
    }

    #[test]
    fn test_selected_models_explicit_used_verbatim() {
        let document = document_with(&["Model_1"]);
        let explicit = vec!["Model_7".to_string()];
        assert_eq!(
            selected_models(&document, Some(&explicit)),
            vec!["Model_7".to_string()]
        );
    }

    #[test]
    fn test_base_model_names_strip_suffixes() {
        let document = document_with(&[
            "Model_1_positive",
            "Model_1_Negative",
            "Model_1_exclusion",
            "Model_2",
        ]);
        assert_eq!(
            base_model_names(&document),
            vec!["Model_2".to_string(), "model_1".to_string()]
        );
    }

    #[test]
    fn test_scenario_section_capitalized_fallback() {
        let document = document_with(&["Model_1_positive"]);
        // Base derivation lowercases, the lookup re-capitalizes.
        let (key, _) = scenario_section(&document, "model_1", Scenario::Positive).unwrap();
        assert_eq!(key, "Model_1_positive");
        assert!(scenario_section(&document, "model_1", Scenario::Negative).is_none());
    }

    #[test]
    fn test_require_model_lists_available() {
        let document = document_with(&["Model_1", "Model_2"]);
        let err = require_model(&document, "Model_9").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Model_9"));
        assert!(message.contains("Model_1, Model_2"));
    }

    #[test]
    fn test_scenario_display() {
        assert_eq!(Scenario::Positive.to_string(), "positive");
        assert_eq!(Scenario::Exclusion.to_string(), "exclusion");
    }
}
