//! Dictionary alignment validation.
//!
//! Keys are allowed to differ between languages (missing keys simply fall
//! back to the key at lookup time), so nothing here is enforced at runtime.
//! The report exists to help authors keep dictionaries aligned.

use crate::i18n::{Dictionary, Language};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Validation report containing errors and warnings about a set of dictionaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Problems that make a language unusable (e.g. an empty dictionary)
    pub errors: Vec<String>,

    /// Drift between languages (missing keys, placeholder mismatches, blank values)
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for dictionary alignment across languages.
pub struct DictionaryValidator;

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

impl DictionaryValidator {
    /// Compare every language's dictionary against the union of all keys.
    ///
    /// This function checks that:
    /// - no dictionary is empty (error)
    /// - every key exists in every language (warning per missing key)
    /// - no value is blank (warning)
    /// - `{placeholder}` names match across languages for the same key (warning)
    ///
    /// Findings are reported in a stable order: languages in the order given,
    /// keys sorted.
    pub fn validate(dictionaries: &[(Language, &Dictionary)]) -> ValidationReport {
        let mut report = ValidationReport::new();

        let all_keys: BTreeSet<&str> = dictionaries
            .iter()
            .flat_map(|(_, dict)| dict.keys())
            .collect();

        for (language, dict) in dictionaries {
            if dict.is_empty() {
                report
                    .errors
                    .push(format!("Dictionary for '{}' is empty", language));
                continue;
            }

            for key in &all_keys {
                match dict.get(key) {
                    None if dict.contains_key(key) => report
                        .warnings
                        .push(format!("Key '{}' has a blank value in '{}'", key, language)),
                    None => report
                        .warnings
                        .push(format!("Key '{}' is missing in '{}'", key, language)),
                    Some(value) if value.trim().is_empty() => report
                        .warnings
                        .push(format!("Key '{}' has a blank value in '{}'", key, language)),
                    Some(_) => {}
                }
            }
        }

        if let Some((reference_language, reference)) = dictionaries.first() {
            for (language, dict) in dictionaries.iter().skip(1) {
                for key in &all_keys {
                    let (Some(expected), Some(actual)) = (reference.get(key), dict.get(key)) else {
                        continue;
                    };

                    let expected_placeholders = Self::extract_placeholders(expected);
                    let actual_placeholders = Self::extract_placeholders(actual);
                    if expected_placeholders != actual_placeholders {
                        report.warnings.push(format!(
                            "Placeholder mismatch for '{}': '{}' has {:?}, '{}' has {:?}",
                            key,
                            reference_language,
                            expected_placeholders,
                            language,
                            actual_placeholders
                        ));
                    }
                }
            }
        }

        report
    }

    /// Extract `{name}` placeholders, sorted and deduplicated.
    fn extract_placeholders(text: &str) -> BTreeSet<String> {
        let regex = PLACEHOLDER_REGEX
            .get_or_init(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("valid regex"));

        regex
            .captures_iter(text)
            .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()))
            .collect()
    }
}
