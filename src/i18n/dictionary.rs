//! Flat key → string dictionaries and their merge policy.

use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

/// Errors raised while obtaining a partial dictionary.
///
/// These never reach view code: the resolver logs them and substitutes an
/// empty partial.
#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("no '{topic}' dictionary for language '{language}'")]
    UnknownTopic { language: String, topic: String },

    #[error("failed to read dictionary file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("dictionary request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("dictionary endpoint returned {status} for {url}")]
    Status { status: u16, url: String },

    #[error("malformed dictionary JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("dictionary must be a JSON object, found {0}")]
    NotAnObject(&'static str),
}

/// A flat mapping from translation key to display string for one language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Dictionary {
    entries: HashMap<String, String>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dictionary from a static key/value table.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self {
            entries: pairs
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        }
    }

    /// Parse a flat JSON object.
    ///
    /// Non-string values are skipped rather than rejected so that a single
    /// stray entry does not discard the whole partial.
    pub fn from_json(text: &str) -> Result<Self, DictionaryError> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, DictionaryError> {
        let object = match value {
            serde_json::Value::Object(object) => object,
            serde_json::Value::Array(_) => return Err(DictionaryError::NotAnObject("array")),
            serde_json::Value::String(_) => return Err(DictionaryError::NotAnObject("string")),
            serde_json::Value::Number(_) => return Err(DictionaryError::NotAnObject("number")),
            serde_json::Value::Bool(_) => return Err(DictionaryError::NotAnObject("boolean")),
            serde_json::Value::Null => return Err(DictionaryError::NotAnObject("null")),
        };

        let mut entries = HashMap::with_capacity(object.len());
        for (key, value) in object {
            match value {
                serde_json::Value::String(text) => {
                    entries.insert(key, text);
                }
                other => debug!("Skipping non-string dictionary entry '{}': {}", key, other),
            }
        }

        Ok(Self { entries })
    }

    /// Look up a key. An empty value counts as absent, so callers falling
    /// back to the key never render blank text.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Merge `other` into `self`. Entries of `other` overwrite existing
    /// entries on key collision.
    pub fn merge(&mut self, other: Dictionary) {
        self.entries.extend(other.entries);
    }

    /// Merge partials in order; the last partial defining a key wins.
    pub fn merged<I>(partials: I) -> Dictionary
    where
        I: IntoIterator<Item = Dictionary>,
    {
        partials
            .into_iter()
            .fold(Dictionary::new(), |mut merged, partial| {
                merged.merge(partial);
                merged
            })
    }
}
