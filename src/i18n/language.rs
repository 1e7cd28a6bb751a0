//! Language type: validated language representation.
//!
//! A `Language` can only be built from a registry entry, so holding one is
//! proof that the tag is supported and enabled.

use crate::i18n::{LanguageConfig, LanguageRegistry};
use anyhow::{bail, Result};
use serde::{Serialize, Serializer};
use std::fmt;

/// A validated language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    /// Language tag (e.g., "en", "ta")
    code: &'static str,
}

impl Language {
    /// English, the default language.
    pub const ENGLISH: Language = Language { code: "en" };

    /// Tamil.
    pub const TAMIL: Language = Language { code: "ta" };

    /// Create a Language from a language tag.
    ///
    /// # Arguments
    /// * `code` - The language tag (e.g., "en", "ta")
    ///
    /// # Returns
    /// * `Ok(Language)` if the code is known and the language is enabled
    /// * `Err` if the code is not found or the language is disabled
    pub fn from_code(code: &str) -> Result<Language> {
        let registry = LanguageRegistry::get();

        match registry.get_by_code(code) {
            Some(config) if config.enabled => Ok(Language { code: config.code }),
            Some(_) => bail!("Language '{}' is not enabled", code),
            None => bail!("Unknown language code: '{}'", code),
        }
    }

    /// The fixed fallback language used when nothing valid is persisted.
    pub fn default_language() -> Language {
        let config = LanguageRegistry::get().default_language();
        Language { code: config.code }
    }

    /// All enabled languages, in registry order.
    pub fn all() -> Vec<Language> {
        LanguageRegistry::get()
            .list_enabled()
            .into_iter()
            .map(|config| Language { code: config.code })
            .collect()
    }

    /// The language tag (e.g., "en", "ta").
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the full language configuration from the registry.
    ///
    /// # Panics
    /// Panics if the code is missing from the registry, which cannot happen
    /// for a `Language` built through `from_code` or the constants.
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_code(self.code)
            .expect("Language code should always be valid")
    }

    /// English name of the language.
    pub fn name(&self) -> &'static str {
        self.config().name
    }

    /// Name of the language in its own script.
    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    /// Whether this is the default language.
    pub fn is_default(&self) -> bool {
        self.config().is_default
    }

    /// The language the navigation toggle switches to.
    pub fn toggled(&self) -> Language {
        LanguageRegistry::get()
            .next_enabled(self.code)
            .map(|config| Language { code: config.code })
            .unwrap_or(*self)
    }

    /// Label for the toggle button: the short label of the language the
    /// toggle would switch to ("தமிழ்" while English is active, "EN" while
    /// Tamil is active).
    pub fn toggle_label(&self) -> &'static str {
        self.toggled().config().short_label
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::default_language()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

impl Serialize for Language {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code)
    }
}
