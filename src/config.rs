use crate::i18n::strings::DEFAULT_TOPICS;
use crate::i18n::{DictionarySource, DirectorySource, EmbeddedSource, HttpSource};
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;

/// Where partial dictionaries are loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictionaryLocation {
    /// Strings compiled into the binary
    Embedded,
    /// `{dir}/{lang}/{topic}.json`
    Directory(String),
    /// `{url}/{lang}/{topic}.json`
    Url(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub port: u16,

    // Preference storage
    pub database_path: String,

    // Content
    pub content_dir: String,

    // Dictionaries
    pub dictionaries: DictionaryLocation,
    pub dictionary_topics: Vec<String>,
    pub http_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let dictionaries = match (
            non_empty_var("DICTIONARY_URL"),
            non_empty_var("DICTIONARY_DIR"),
        ) {
            (Some(url), _) => DictionaryLocation::Url(url),
            (None, Some(dir)) => DictionaryLocation::Directory(dir),
            (None, None) => DictionaryLocation::Embedded,
        };

        let dictionary_topics = match non_empty_var("DICTIONARY_TOPICS") {
            Some(topics) => parse_topics(&topics),
            None => DEFAULT_TOPICS.iter().map(|t| t.to_string()).collect(),
        };
        if dictionary_topics.is_empty() {
            anyhow::bail!("DICTIONARY_TOPICS must name at least one topic");
        }

        Ok(Self {
            port: std::env::var("PORT")
                .ok()
                .map(|v| v.parse().context("PORT must be a valid port number"))
                .transpose()?
                .unwrap_or(8080),

            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "data/preferences.db".to_string()),

            content_dir: std::env::var("CONTENT_DIR").unwrap_or_else(|_| "content".to_string()),

            dictionaries,
            dictionary_topics,

            http_timeout_secs: std::env::var("HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        })
    }

    /// Build the dictionary source named by this configuration.
    pub fn dictionary_source(&self) -> Result<Arc<dyn DictionarySource>> {
        let source: Arc<dyn DictionarySource> = match &self.dictionaries {
            DictionaryLocation::Embedded => Arc::new(EmbeddedSource),
            DictionaryLocation::Directory(dir) => Arc::new(DirectorySource::new(dir)),
            DictionaryLocation::Url(url) => Arc::new(
                HttpSource::new(url.as_str(), Duration::from_secs(self.http_timeout_secs))
                    .context("Failed to build dictionary HTTP client")?,
            ),
        };
        Ok(source)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Split a comma-separated topic list, dropping blanks.
fn parse_topics(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|topic| !topic.is_empty())
        .map(str::to_string)
        .collect()
}
