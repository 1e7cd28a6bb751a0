//! Internationalization (i18n) module for the bilingual site.
//!
//! All language-related logic, localized strings, and translation
//! infrastructure is contained here.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for all supported languages and their metadata
//! - `language`: Validated `Language` type
//! - `dictionary`: Flat key → string maps and the merge policy for partials
//! - `strings`: Built-in English/Tamil partial dictionaries
//! - `source`: Where partial dictionaries come from (embedded, directory, HTTP)
//! - `resolver`: Active language, merged dictionary, `translate` with fallback-to-key
//! - `validator`: Authoring report on dictionary alignment
//! - `metrics`: Lookup and load counters
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use uyirmai_site::i18n::{EmbeddedSource, Language, Resolver};
//! use uyirmai_site::store::MemoryStore;
//!
//! let resolver = Resolver::new(Arc::new(EmbeddedSource), Arc::new(MemoryStore::new()));
//! let t = resolver.ready().await;
//! assert_eq!(t.t("home"), "Home");
//!
//! resolver.set_language(Language::TAMIL).await;
//! ```

mod dictionary;
mod language;
mod metrics;
mod registry;
mod resolver;
mod source;
pub mod strings;
mod validator;

pub use dictionary::{Dictionary, DictionaryError};
pub use language::Language;
pub use metrics::{LookupMetrics, MetricsReport};
pub use registry::{LanguageConfig, LanguageRegistry};
pub use resolver::{Resolver, ResolverState, Translations};
pub use source::{DictionarySource, DirectorySource, EmbeddedSource, HttpSource};
pub use validator::{DictionaryValidator, ValidationReport};
