//! Dictionary sources: where partial dictionaries are loaded from.
//!
//! A source is asked for one partial at a time, keyed by (language, topic).
//! Merging and failure handling belong to the resolver.

use crate::i18n::strings::builtin_partial;
use crate::i18n::{Dictionary, DictionaryError, Language};
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

/// Supplies partial dictionaries.
#[async_trait]
pub trait DictionarySource: Send + Sync {
    /// Human-readable source name for logs.
    fn name(&self) -> &str;

    /// Load the partial dictionary for `topic` in `language`.
    async fn load_partial(
        &self,
        language: Language,
        topic: &str,
    ) -> Result<Dictionary, DictionaryError>;
}

// ==================== Embedded ====================

/// Serves the strings compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedSource;

#[async_trait]
impl DictionarySource for EmbeddedSource {
    fn name(&self) -> &str {
        "embedded"
    }

    async fn load_partial(
        &self,
        language: Language,
        topic: &str,
    ) -> Result<Dictionary, DictionaryError> {
        builtin_partial(language, topic).ok_or_else(|| DictionaryError::UnknownTopic {
            language: language.code().to_string(),
            topic: topic.to_string(),
        })
    }
}

// ==================== Directory ====================

/// Reads `{root}/{lang}/{topic}.json`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn partial_path(&self, language: Language, topic: &str) -> PathBuf {
        self.root
            .join(language.code())
            .join(format!("{}.json", topic))
    }
}

#[async_trait]
impl DictionarySource for DirectorySource {
    fn name(&self) -> &str {
        "directory"
    }

    async fn load_partial(
        &self,
        language: Language,
        topic: &str,
    ) -> Result<Dictionary, DictionaryError> {
        let path = self.partial_path(language, topic);
        debug!("Reading dictionary partial {}", path.display());

        let text = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| DictionaryError::Io {
                path: path.display().to_string(),
                source,
            })?;

        Dictionary::from_json(&text)
    }
}

// ==================== HTTP ====================

/// Fetches `{base_url}/{lang}/{topic}.json`.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, DictionaryError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn partial_url(&self, language: Language, topic: &str) -> String {
        format!("{}/{}/{}.json", self.base_url, language.code(), topic)
    }
}

#[async_trait]
impl DictionarySource for HttpSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn load_partial(
        &self,
        language: Language,
        topic: &str,
    ) -> Result<Dictionary, DictionaryError> {
        let url = self.partial_url(language, topic);
        debug!("Fetching dictionary partial {}", url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DictionaryError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let value: serde_json::Value = response.json().await?;
        Dictionary::from_value(value)
    }
}
