//! Page content provider.
//!
//! Content is stored per collection and per language, mirroring the CMS
//! layout: `{root}/{collection}/{lang}.json` for pages and
//! `{root}/blog/{lang}/{slug}.json` for blog posts.

use crate::i18n::Language;
use crate::routes::Page;
use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("no document '{relative_path}' in collection '{collection}'")]
    NotFound {
        collection: String,
        relative_path: String,
    },

    #[error("invalid document path '{0}'")]
    InvalidPath(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed content document {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Supplies structured page documents.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    async fn query(
        &self,
        collection: &str,
        relative_path: &str,
    ) -> Result<serde_json::Value, ContentError>;
}

/// Fetch the document backing `page` in `language`.
///
/// Returns `Ok(None)` for pages with no backing document (`NotFound`).
pub async fn page_document(
    provider: &dyn ContentProvider,
    page: &Page,
    language: Language,
) -> Result<Option<serde_json::Value>, ContentError> {
    let (Some(collection), Some(relative_path)) =
        (page.collection(), page.document_path(language.code()))
    else {
        return Ok(None);
    };

    provider.query(collection, &relative_path).await.map(Some)
}

/// Reads JSON documents from a content directory.
#[derive(Debug, Clone)]
pub struct FileContentProvider {
    root: PathBuf,
}

impl FileContentProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Reject anything that could escape the content root.
    fn resolve(&self, collection: &str, relative_path: &str) -> Result<PathBuf, ContentError> {
        let is_plain = |part: &str| {
            !part.is_empty()
                && Path::new(part)
                    .components()
                    .all(|component| matches!(component, Component::Normal(_)))
        };

        if !is_plain(collection) || collection.contains('/') {
            return Err(ContentError::InvalidPath(collection.to_string()));
        }
        if !is_plain(relative_path) {
            return Err(ContentError::InvalidPath(relative_path.to_string()));
        }

        Ok(self.root.join(collection).join(relative_path))
    }
}

#[async_trait]
impl ContentProvider for FileContentProvider {
    async fn query(
        &self,
        collection: &str,
        relative_path: &str,
    ) -> Result<serde_json::Value, ContentError> {
        let path = self.resolve(collection, relative_path)?;
        debug!("Reading content document {}", path.display());

        let text = match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ContentError::NotFound {
                    collection: collection.to_string(),
                    relative_path: relative_path.to_string(),
                })
            }
            Err(source) => {
                return Err(ContentError::Io {
                    path: path.display().to_string(),
                    source,
                })
            }
        };

        serde_json::from_str(&text).map_err(|source| ContentError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}
