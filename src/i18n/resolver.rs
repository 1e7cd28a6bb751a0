//! Translation resolver: active language, merged dictionary, and lookups.
//!
//! The resolver is an explicitly constructed service. Clone it (it is an
//! `Arc` handle) and pass it to whatever needs translations.
//!
//! # State machine
//!
//! `Uninitialized → Loading(lang) → Ready(lang, dict)`, and on every switch
//! `Ready(..) → Loading(new) → Ready(new, dict)`. Each transition is published
//! on a `watch` channel.
//!
//! Every load is tagged with a generation number. Starting a load aborts the
//! previous one, and a load only commits if its generation is still the
//! newest, so the last `set_language` call always decides the final state.

use crate::i18n::strings::DEFAULT_TOPICS;
use crate::i18n::{Dictionary, DictionarySource, Language, LookupMetrics};
use crate::store::{PreferenceStore, LANGUAGE_KEY};
use anyhow::Result;
use futures::future::join_all;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Lifecycle of the active dictionary.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolverState {
    Uninitialized,
    Loading(Language),
    Ready {
        language: Language,
        dictionary: Arc<Dictionary>,
    },
}

impl ResolverState {
    pub fn is_ready(&self) -> bool {
        matches!(self, ResolverState::Ready { .. })
    }

    /// Ready with exactly this language.
    pub fn is_ready_in(&self, expected: Language) -> bool {
        matches!(self, ResolverState::Ready { language, .. } if *language == expected)
    }

    /// The active language, if one has been chosen.
    pub fn language(&self) -> Option<Language> {
        match self {
            ResolverState::Uninitialized => None,
            ResolverState::Loading(language) => Some(*language),
            ResolverState::Ready { language, .. } => Some(*language),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ResolverState::Uninitialized => "uninitialized",
            ResolverState::Loading(_) => "loading",
            ResolverState::Ready { .. } => "ready",
        }
    }
}

/// A consistent view of one language's merged dictionary.
///
/// Views render from a snapshot so a language switch never mixes strings
/// from two dictionaries in one render.
#[derive(Debug, Clone)]
pub struct Translations {
    language: Language,
    dictionary: Arc<Dictionary>,
    metrics: Option<Arc<LookupMetrics>>,
}

impl Translations {
    pub fn new(language: Language, dictionary: Dictionary) -> Self {
        Self {
            language,
            dictionary: Arc::new(dictionary),
            metrics: None,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Translate `key`, returning the key itself when it has no entry.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        match self.dictionary.get(key) {
            Some(value) => {
                if let Some(metrics) = &self.metrics {
                    metrics.record_hit();
                }
                value
            }
            None => {
                if let Some(metrics) = &self.metrics {
                    metrics.record_fallback();
                }
                key
            }
        }
    }
}

struct LoadSlot {
    generation: u64,
    handle: Option<JoinHandle<()>>,
}

struct Inner {
    source: Arc<dyn DictionarySource>,
    store: Arc<dyn PreferenceStore>,
    topics: Vec<String>,
    state: watch::Sender<ResolverState>,
    load: Mutex<LoadSlot>,
    // Orders store writes so the newest switch is persisted last.
    persist: tokio::sync::Mutex<()>,
    metrics: Arc<LookupMetrics>,
}

impl Inner {
    fn slot(&self) -> MutexGuard<'_, LoadSlot> {
        self.load.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fetch every topic concurrently and merge in topic order.
    ///
    /// A failed partial is logged and skipped, so its keys fall back to
    /// themselves. Failures are not retried.
    async fn load_dictionary(&self, language: Language) -> Dictionary {
        let results = join_all(
            self.topics
                .iter()
                .map(|topic| self.source.load_partial(language, topic)),
        )
        .await;

        let partials = self
            .topics
            .iter()
            .zip(results)
            .filter_map(|(topic, result)| match result {
                Ok(partial) => {
                    self.metrics.record_partial_load();
                    Some(partial)
                }
                Err(e) => {
                    warn!(
                        "Failed to load '{}' dictionary for {} from {} source, using keys as fallback: {}",
                        topic,
                        language,
                        self.source.name(),
                        e
                    );
                    self.metrics.record_load_failure();
                    None
                }
            });

        Dictionary::merged(partials)
    }

    /// Publish a finished load unless a newer load has started since.
    fn commit(&self, generation: u64, language: Language, dictionary: Dictionary) -> bool {
        let slot = self.slot();
        if slot.generation != generation {
            debug!(
                "Discarding {} dictionary from superseded load (generation {} < {})",
                language, generation, slot.generation
            );
            return false;
        }

        info!("✓ {} dictionary ready ({} keys)", language, dictionary.len());
        self.state.send_replace(ResolverState::Ready {
            language,
            dictionary: Arc::new(dictionary),
        });
        true
    }
}

/// Resolves translation keys for the active language.
#[derive(Clone)]
pub struct Resolver {
    inner: Arc<Inner>,
}

impl Resolver {
    /// Create a resolver using the default topic list.
    pub fn new(source: Arc<dyn DictionarySource>, store: Arc<dyn PreferenceStore>) -> Self {
        let topics = DEFAULT_TOPICS.iter().map(|topic| topic.to_string()).collect();
        Self::with_topics(source, store, topics)
    }

    /// Create a resolver merging `topics` in the given order. On key
    /// collision the topic listed last wins.
    pub fn with_topics(
        source: Arc<dyn DictionarySource>,
        store: Arc<dyn PreferenceStore>,
        topics: Vec<String>,
    ) -> Self {
        let (state, _) = watch::channel(ResolverState::Uninitialized);

        Self {
            inner: Arc::new(Inner {
                source,
                store,
                topics,
                state,
                load: Mutex::new(LoadSlot {
                    generation: 0,
                    handle: None,
                }),
                persist: tokio::sync::Mutex::new(()),
                metrics: Arc::new(LookupMetrics::new()),
            }),
        }
    }

    /// Read the persisted language.
    ///
    /// Falls back to the default language when nothing is stored, the stored
    /// tag is unsupported, or the store cannot be read. Never fails and has
    /// no side effect beyond the read.
    pub async fn initialize(&self) -> Language {
        let default = Language::default_language();

        match self.inner.store.get(LANGUAGE_KEY).await {
            Ok(Some(code)) => match Language::from_code(&code) {
                Ok(language) => language,
                Err(e) => {
                    warn!("Ignoring persisted language, using {}: {}", default, e);
                    default
                }
            },
            Ok(None) => default,
            Err(e) => {
                warn!("Failed to read persisted language, using {}: {}", default, e);
                default
            }
        }
    }

    /// Initial mount: read the persisted language and start loading its
    /// dictionary. Does not write to the store.
    pub async fn mount(&self) -> Language {
        let language = self.initialize().await;
        info!("Mounting resolver with language {}", language);
        self.begin_load(language);
        language
    }

    /// Switch the active language.
    ///
    /// Subscribers see `Loading(language)` immediately; the dictionary loads
    /// in the background. The choice is persisted; a failed write is logged
    /// and otherwise ignored. When switches overlap, only the newest one is
    /// written once the older writes have finished.
    pub async fn set_language(&self, language: Language) {
        info!("Switching language to {}", language);
        let generation = self.begin_load(language);

        let _guard = self.inner.persist.lock().await;
        if self.inner.slot().generation != generation {
            debug!("Skipping persist of superseded language {}", language);
            return;
        }

        if let Err(e) = self.inner.store.set(LANGUAGE_KEY, language.code()).await {
            warn!("Failed to persist language {}: {}", language, e);
        }
    }

    /// Switch to the language identified by `code`.
    ///
    /// Unsupported codes are rejected and leave the resolver untouched.
    pub async fn set_language_code(&self, code: &str) -> Result<Language> {
        let language = Language::from_code(code)?;
        self.set_language(language).await;
        Ok(language)
    }

    fn begin_load(&self, language: Language) -> u64 {
        let mut slot = self.inner.slot();
        slot.generation += 1;
        let generation = slot.generation;

        // Under the slot lock, Ready means the previous load already committed.
        let previous_committed = self.inner.state.borrow().is_ready();
        if let Some(previous) = slot.handle.take() {
            if !previous_committed && !previous.is_finished() {
                debug!("Cancelling superseded dictionary load");
                previous.abort();
                self.inner.metrics.record_superseded_load();
            }
        }

        self.inner.state.send_replace(ResolverState::Loading(language));

        let inner = Arc::clone(&self.inner);
        slot.handle = Some(tokio::spawn(async move {
            let dictionary = inner.load_dictionary(language).await;
            inner.commit(generation, language, dictionary);
        }));
        generation
    }

    /// Translate `key` in the active language.
    ///
    /// Total: returns the key unchanged when it has no entry or when no
    /// dictionary is ready yet.
    pub fn translate(&self, key: &str) -> String {
        let state = self.inner.state.borrow();
        let value = match &*state {
            ResolverState::Ready { dictionary, .. } => dictionary.get(key),
            _ => None,
        };

        match value {
            Some(value) => {
                self.inner.metrics.record_hit();
                value.to_string()
            }
            None => {
                self.inner.metrics.record_fallback();
                key.to_string()
            }
        }
    }

    /// The active language; `None` before mount.
    pub fn language(&self) -> Option<Language> {
        self.inner.state.borrow().language()
    }

    pub fn state(&self) -> ResolverState {
        self.inner.state.borrow().clone()
    }

    /// Receive every state transition.
    pub fn subscribe(&self) -> watch::Receiver<ResolverState> {
        self.inner.state.subscribe()
    }

    /// Wait until a dictionary is ready and return a snapshot of it.
    ///
    /// Mounts the resolver first if nothing has been loaded yet.
    pub async fn ready(&self) -> Translations {
        if matches!(*self.inner.state.borrow(), ResolverState::Uninitialized) {
            self.mount().await;
        }

        let mut receiver = self.subscribe();
        let state = match receiver.wait_for(ResolverState::is_ready).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        };

        match state {
            ResolverState::Ready {
                language,
                dictionary,
            } => Translations {
                language,
                dictionary,
                metrics: Some(Arc::clone(&self.inner.metrics)),
            },
            other => Translations::new(other.language().unwrap_or_default(), Dictionary::new()),
        }
    }

    pub fn metrics(&self) -> &LookupMetrics {
        &self.inner.metrics
    }

}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("source", &self.inner.source.name())
            .field("topics", &self.inner.topics)
            .field("state", &self.state().name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::DictionaryError;
    use crate::store::{MemoryStore, StoreError};
    use async_trait::async_trait;
    use proptest::prelude::*;
    use std::collections::HashMap;
    use std::time::Duration;
    use tokio::sync::Semaphore;

    // ==================== Test Sources ====================

    /// In-memory partials keyed by (language code, topic). Missing entries
    /// fail like an unreachable file would.
    #[derive(Default)]
    struct StaticSource {
        partials: HashMap<(&'static str, &'static str), Dictionary>,
        delays: HashMap<&'static str, Duration>,
    }

    impl StaticSource {
        fn with(mut self, lang: &'static str, topic: &'static str, pairs: &[(&str, &str)]) -> Self {
            self.partials.insert((lang, topic), Dictionary::from_pairs(pairs));
            self
        }

        fn delayed(mut self, topic: &'static str, delay: Duration) -> Self {
            self.delays.insert(topic, delay);
            self
        }
    }

    #[async_trait]
    impl DictionarySource for StaticSource {
        fn name(&self) -> &str {
            "static"
        }

        async fn load_partial(
            &self,
            language: Language,
            topic: &str,
        ) -> Result<Dictionary, DictionaryError> {
            if let Some(delay) = self.delays.get(topic) {
                tokio::time::sleep(*delay).await;
            }
            self.partials
                .iter()
                .find(|((lang, t), _)| *lang == language.code() && *t == topic)
                .map(|(_, dict)| dict.clone())
                .ok_or_else(|| DictionaryError::UnknownTopic {
                    language: language.code().to_string(),
                    topic: topic.to_string(),
                })
        }
    }

    /// Tamil loads block until the gate is opened.
    struct GatedSource {
        gate: Arc<Semaphore>,
    }

    #[async_trait]
    impl DictionarySource for GatedSource {
        fn name(&self) -> &str {
            "gated"
        }

        async fn load_partial(
            &self,
            language: Language,
            _topic: &str,
        ) -> Result<Dictionary, DictionaryError> {
            if language == Language::TAMIL {
                let _permit = self.gate.acquire().await;
                return Ok(Dictionary::from_pairs(&[("hello", "வணக்கம்")]));
            }
            Ok(Dictionary::from_pairs(&[("hello", "Hello")]))
        }
    }

    struct BrokenStore;

    #[async_trait]
    impl PreferenceStore for BrokenStore {
        async fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Unavailable("storage disabled".to_string()))
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("storage disabled".to_string()))
        }
    }

    /// Writes of "ta" stall, so a later switch can overtake them.
    #[derive(Default)]
    struct SlowTamilStore {
        inner: MemoryStore,
    }

    #[async_trait]
    impl PreferenceStore for SlowTamilStore {
        async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
            if value == "ta" {
                tokio::time::sleep(Duration::from_millis(100)).await;
            }
            self.inner.set(key, value).await
        }
    }

    // ==================== Helper Functions ====================

    fn hello_source() -> StaticSource {
        StaticSource::default()
            .with("en", "main", &[("hello", "Hello")])
            .with("ta", "main", &[("hello", "வணக்கம்")])
    }

    fn resolver_with(source: impl DictionarySource + 'static, store: Arc<dyn PreferenceStore>) -> Resolver {
        Resolver::with_topics(Arc::new(source), store, vec!["main".to_string()])
    }

    async fn wait_ready_in(resolver: &Resolver, language: Language) {
        let mut receiver = resolver.subscribe();
        tokio::time::timeout(
            Duration::from_secs(5),
            receiver.wait_for(|state| state.is_ready_in(language)),
        )
        .await
        .expect("timed out waiting for ready state")
        .expect("resolver dropped");
    }

    // ==================== initialize Tests ====================

    #[tokio::test]
    async fn test_initialize_defaults_to_english_when_nothing_persisted() {
        let resolver = resolver_with(hello_source(), Arc::new(MemoryStore::new()));
        assert_eq!(resolver.initialize().await, Language::ENGLISH);
    }

    #[tokio::test]
    async fn test_initialize_ignores_unsupported_persisted_language() {
        let store = Arc::new(MemoryStore::with_value(LANGUAGE_KEY, "fr"));
        let resolver = resolver_with(hello_source(), store);
        assert_eq!(resolver.initialize().await, Language::ENGLISH);
    }

    #[tokio::test]
    async fn test_initialize_reads_persisted_language() {
        let store = Arc::new(MemoryStore::with_value(LANGUAGE_KEY, "ta"));
        let resolver = resolver_with(hello_source(), store);
        assert_eq!(resolver.initialize().await, Language::TAMIL);
    }

    #[tokio::test]
    async fn test_initialize_treats_store_error_as_absent() {
        let resolver = resolver_with(hello_source(), Arc::new(BrokenStore));
        assert_eq!(resolver.initialize().await, Language::ENGLISH);
    }

    #[tokio::test]
    async fn test_initialize_has_no_side_effects() {
        let store = Arc::new(MemoryStore::new());
        let resolver = resolver_with(hello_source(), store.clone());

        resolver.initialize().await;

        assert!(store.get(LANGUAGE_KEY).await.unwrap().is_none());
        assert_eq!(resolver.state(), ResolverState::Uninitialized);
    }

    // ==================== Persistence Tests ====================

    #[tokio::test]
    async fn test_set_language_persists_across_sessions() {
        for language in Language::all() {
            let store: Arc<MemoryStore> = Arc::new(MemoryStore::new());

            let first_session = resolver_with(hello_source(), store.clone());
            first_session.mount().await;
            first_session.set_language(language).await;

            let second_session = resolver_with(hello_source(), store.clone());
            assert_eq!(second_session.initialize().await, language);
        }
    }

    #[tokio::test]
    async fn test_mount_does_not_persist() {
        let store = Arc::new(MemoryStore::new());
        let resolver = resolver_with(hello_source(), store.clone());

        resolver.mount().await;
        wait_ready_in(&resolver, Language::ENGLISH).await;

        assert!(store.get(LANGUAGE_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_language_survives_store_write_failure() {
        let resolver = resolver_with(hello_source(), Arc::new(BrokenStore));
        resolver.mount().await;

        resolver.set_language(Language::TAMIL).await;
        wait_ready_in(&resolver, Language::TAMIL).await;

        assert_eq!(resolver.translate("hello"), "வணக்கம்");
    }

    #[tokio::test]
    async fn test_overlapping_switches_persist_the_last_language() {
        let store = Arc::new(SlowTamilStore::default());
        let resolver = resolver_with(hello_source(), store.clone());
        resolver.ready().await;

        let tamil = {
            let resolver = resolver.clone();
            tokio::spawn(async move { resolver.set_language(Language::TAMIL).await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        let english = {
            let resolver = resolver.clone();
            tokio::spawn(async move { resolver.set_language(Language::ENGLISH).await })
        };
        tamil.await.expect("tamil switch panicked");
        english.await.expect("english switch panicked");
        wait_ready_in(&resolver, Language::ENGLISH).await;

        assert_eq!(store.get(LANGUAGE_KEY).await.unwrap().as_deref(), Some("en"));
        let next_session = resolver_with(hello_source(), store.clone());
        assert_eq!(next_session.initialize().await, Language::ENGLISH);
    }

    // ==================== translate Tests ====================

    #[tokio::test]
    async fn test_hello_scenario() {
        let resolver = resolver_with(hello_source(), Arc::new(MemoryStore::new()));

        assert_eq!(resolver.mount().await, Language::ENGLISH);
        wait_ready_in(&resolver, Language::ENGLISH).await;
        assert_eq!(resolver.translate("hello"), "Hello");

        resolver.set_language(Language::TAMIL).await;
        wait_ready_in(&resolver, Language::TAMIL).await;
        assert_eq!(resolver.translate("hello"), "வணக்கம்");
        assert_eq!(resolver.translate("missing"), "missing");
    }

    #[tokio::test]
    async fn test_translate_before_mount_returns_key() {
        let resolver = resolver_with(hello_source(), Arc::new(MemoryStore::new()));
        assert_eq!(resolver.translate("hello"), "hello");
        assert_eq!(resolver.language(), None);
    }

    #[tokio::test]
    async fn test_empty_value_falls_back_to_key() {
        let source =
            StaticSource::default().with("en", "main", &[("title", ""), ("hello", "Hello")]);
        let resolver = resolver_with(source, Arc::new(MemoryStore::new()));

        let translations = resolver.ready().await;

        assert_eq!(translations.t("title"), "title");
        assert_eq!(resolver.translate("title"), "title");
        assert_eq!(resolver.metrics().fallbacks(), 2);
        assert_eq!(resolver.metrics().hits(), 0);
    }

    #[tokio::test]
    async fn test_translate_records_metrics() {
        let resolver = resolver_with(hello_source(), Arc::new(MemoryStore::new()));
        resolver.ready().await;

        resolver.translate("hello");
        resolver.translate("missing");

        assert_eq!(resolver.metrics().hits(), 1);
        assert_eq!(resolver.metrics().fallbacks(), 1);
    }

    #[tokio::test]
    async fn test_ready_mounts_and_returns_snapshot() {
        let store = Arc::new(MemoryStore::with_value(LANGUAGE_KEY, "ta"));
        let resolver = resolver_with(hello_source(), store);

        let translations = resolver.ready().await;

        assert_eq!(translations.language(), Language::TAMIL);
        assert_eq!(translations.t("hello"), "வணக்கம்");
        assert_eq!(translations.t("missing"), "missing");
    }

    #[tokio::test]
    async fn test_snapshot_unaffected_by_later_switch() {
        let resolver = resolver_with(hello_source(), Arc::new(MemoryStore::new()));
        let english = resolver.ready().await;

        resolver.set_language(Language::TAMIL).await;
        wait_ready_in(&resolver, Language::TAMIL).await;

        assert_eq!(english.t("hello"), "Hello");
        assert_eq!(resolver.ready().await.t("hello"), "வணக்கம்");
    }

    #[tokio::test]
    async fn test_set_language_code_rejects_unsupported() {
        let resolver = resolver_with(hello_source(), Arc::new(MemoryStore::new()));
        resolver.ready().await;

        let result = resolver.set_language_code("fr").await;

        assert!(result.is_err());
        assert!(resolver.state().is_ready_in(Language::ENGLISH));
    }

    #[tokio::test]
    async fn test_set_language_code_accepts_supported() {
        let resolver = resolver_with(hello_source(), Arc::new(MemoryStore::new()));
        resolver.ready().await;

        let language = resolver.set_language_code("ta").await.expect("Should switch");
        assert_eq!(language, Language::TAMIL);
        assert_eq!(resolver.language(), Some(Language::TAMIL));
    }

    // ==================== Merge Tests ====================

    #[tokio::test]
    async fn test_later_topic_wins_on_collision() {
        let source = StaticSource::default()
            .with("en", "first", &[("title", "First"), ("only_first", "1")])
            .with("en", "second", &[("title", "Second")]);
        let resolver = Resolver::with_topics(
            Arc::new(source),
            Arc::new(MemoryStore::new()),
            vec!["first".to_string(), "second".to_string()],
        );

        let translations = resolver.ready().await;

        assert_eq!(translations.t("title"), "Second");
        assert_eq!(translations.t("only_first"), "1");
    }

    #[tokio::test]
    async fn test_merge_order_independent_of_completion_order() {
        // The first topic finishes last; topic order must still decide.
        let source = StaticSource::default()
            .with("en", "first", &[("title", "First")])
            .with("en", "second", &[("title", "Second")])
            .delayed("first", Duration::from_millis(50));
        let resolver = Resolver::with_topics(
            Arc::new(source),
            Arc::new(MemoryStore::new()),
            vec!["first".to_string(), "second".to_string()],
        );

        assert_eq!(resolver.ready().await.t("title"), "Second");
    }

    // ==================== Failure Tests ====================

    #[tokio::test]
    async fn test_failed_partial_falls_back_to_keys() {
        let source = StaticSource::default().with("en", "navigation", &[("home", "Home")]);
        let resolver = Resolver::with_topics(
            Arc::new(source),
            Arc::new(MemoryStore::new()),
            vec!["navigation".to_string(), "footer".to_string()],
        );

        let translations = resolver.ready().await;

        assert_eq!(translations.t("home"), "Home");
        assert_eq!(translations.t("followUs"), "followUs");
        assert_eq!(resolver.metrics().partial_loads(), 1);
        assert_eq!(resolver.metrics().load_failures(), 1);
    }

    #[tokio::test]
    async fn test_all_partials_failing_still_reaches_ready() {
        let resolver = resolver_with(StaticSource::default(), Arc::new(MemoryStore::new()));

        let translations = resolver.ready().await;

        assert!(translations.dictionary().is_empty());
        assert_eq!(translations.t("hello"), "hello");
        assert!(resolver.state().is_ready());
    }

    // ==================== Supersede Tests ====================

    #[tokio::test]
    async fn test_rapid_switch_back_ends_in_first_language() {
        let gate = Arc::new(Semaphore::new(0));
        let resolver = resolver_with(
            GatedSource { gate: gate.clone() },
            Arc::new(MemoryStore::new()),
        );
        resolver.ready().await;

        // en -> ta (blocked) -> en
        resolver.set_language(Language::TAMIL).await;
        assert_eq!(resolver.state(), ResolverState::Loading(Language::TAMIL));
        resolver.set_language(Language::ENGLISH).await;
        wait_ready_in(&resolver, Language::ENGLISH).await;

        // Let the stale Tamil load run if it were still alive.
        gate.add_permits(10);
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(resolver.state().is_ready_in(Language::ENGLISH));
        assert_eq!(resolver.translate("hello"), "Hello");
        assert_eq!(resolver.metrics().superseded_loads(), 1);
    }

    #[tokio::test]
    async fn test_stale_commit_is_discarded() {
        let resolver = resolver_with(hello_source(), Arc::new(MemoryStore::new()));
        resolver.ready().await;
        resolver.set_language(Language::TAMIL).await;
        wait_ready_in(&resolver, Language::TAMIL).await;

        let stale_generation = resolver.inner.slot().generation - 1;
        let committed = resolver.inner.commit(
            stale_generation,
            Language::ENGLISH,
            Dictionary::from_pairs(&[("hello", "Hello")]),
        );

        assert!(!committed);
        assert!(resolver.state().is_ready_in(Language::TAMIL));
    }

    // ==================== Subscription Tests ====================

    #[tokio::test]
    async fn test_subscribers_see_loading_then_ready() {
        let gate = Arc::new(Semaphore::new(0));
        let resolver = resolver_with(
            GatedSource { gate: gate.clone() },
            Arc::new(MemoryStore::new()),
        );
        resolver.ready().await;
        let mut receiver = resolver.subscribe();

        resolver.set_language(Language::TAMIL).await;
        receiver.changed().await.expect("resolver alive");
        assert_eq!(*receiver.borrow_and_update(), ResolverState::Loading(Language::TAMIL));

        gate.add_permits(1);
        receiver.changed().await.expect("resolver alive");
        assert!(receiver.borrow_and_update().is_ready_in(Language::TAMIL));
    }

    // ==================== State Tests ====================

    #[test]
    fn test_state_names_and_languages() {
        assert_eq!(ResolverState::Uninitialized.name(), "uninitialized");
        assert_eq!(ResolverState::Uninitialized.language(), None);

        let loading = ResolverState::Loading(Language::TAMIL);
        assert_eq!(loading.name(), "loading");
        assert_eq!(loading.language(), Some(Language::TAMIL));
        assert!(!loading.is_ready());

        let ready = ResolverState::Ready {
            language: Language::ENGLISH,
            dictionary: Arc::new(Dictionary::new()),
        };
        assert_eq!(ready.name(), "ready");
        assert!(ready.is_ready_in(Language::ENGLISH));
        assert!(!ready.is_ready_in(Language::TAMIL));
    }

    // ==================== Property Tests ====================

    proptest! {
        #[test]
        fn prop_missing_keys_fall_back_to_themselves(key in "\\PC*") {
            let translations = Translations::new(
                Language::ENGLISH,
                Dictionary::from_pairs(&[("hello", "Hello")]),
            );
            prop_assume!(key != "hello");

            prop_assert_eq!(translations.t(&key), key.as_str());
            prop_assert_eq!(translations.t(&key), translations.t(&key));
        }

        #[test]
        fn prop_present_keys_translate_to_value(key in "[a-zA-Z]{1,16}", value in "\\PC{0,32}") {
            let mut dictionary = Dictionary::new();
            dictionary.insert(key.clone(), value.clone());
            let expected = if value.is_empty() { key.as_str() } else { value.as_str() };
            for language in Language::all() {
                let translations = Translations::new(language, dictionary.clone());
                prop_assert_eq!(translations.t(&key), expected);
                prop_assert!(!translations.t(&key).is_empty());
            }
        }
    }
}
