//! Language registry: Single source of truth for all supported languages.
//!
//! The set of languages is fixed at build time. The registry is a lazily
//! initialised, immutable `OnceLock` singleton; it holds no mutable state, so
//! sharing it process-wide is safe.

use std::sync::OnceLock;

/// Configuration for a supported language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// Short language tag (e.g., "en", "ta")
    pub code: &'static str,

    /// English name of the language (e.g., "English", "Tamil")
    pub name: &'static str,

    /// Native name of the language (e.g., "English", "தமிழ்")
    pub native_name: &'static str,

    /// Label shown on the language toggle while this language is active
    pub short_label: &'static str,

    /// Whether this is the default language (only one should be true)
    pub is_default: bool,

    /// Whether this language is enabled for use
    pub enabled: bool,
}

/// Global language registry singleton.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get a language configuration by its code.
    ///
    /// # Arguments
    /// * `code` - The language tag (e.g., "en", "ta")
    ///
    /// # Returns
    /// * `Some(&LanguageConfig)` if the language exists
    /// * `None` if the language is not found
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Get all enabled languages, in registry order.
    pub fn list_enabled(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().filter(|lang| lang.enabled).collect()
    }

    /// Get the default language configuration.
    ///
    /// # Panics
    /// Panics if zero or several languages are flagged as default. This is a
    /// build-time configuration error.
    pub fn default_language(&self) -> &LanguageConfig {
        let defaults: Vec<_> = self
            .languages
            .iter()
            .filter(|lang| lang.is_default)
            .collect();

        match defaults.len() {
            0 => panic!("No default language found in registry"),
            1 => defaults[0],
            _ => panic!("Multiple default languages found in registry"),
        }
    }

    /// Check if a language code is supported and enabled.
    pub fn is_enabled(&self, code: &str) -> bool {
        self.get_by_code(code)
            .map(|lang| lang.enabled)
            .unwrap_or(false)
    }

    /// The enabled language following `code` in registry order, wrapping
    /// around at the end.
    ///
    /// Returns `None` if `code` is not an enabled language.
    pub fn next_enabled(&self, code: &str) -> Option<&LanguageConfig> {
        let enabled = self.list_enabled();
        let position = enabled.iter().position(|lang| lang.code == code)?;
        Some(enabled[(position + 1) % enabled.len()])
    }
}

/// Supported languages: English (default) and Tamil.
fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "en",
            name: "English",
            native_name: "English",
            short_label: "EN",
            is_default: true,
            enabled: true,
        },
        LanguageConfig {
            code: "ta",
            name: "Tamil",
            native_name: "தமிழ்",
            short_label: "தமிழ்",
            is_default: false,
            enabled: true,
        },
    ]
}
