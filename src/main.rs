use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;
use uyirmai_site::config::Config;
use uyirmai_site::content::FileContentProvider;
use uyirmai_site::db::Database;
use uyirmai_site::i18n::Resolver;
use uyirmai_site::server::{self, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("uyirmai_site=info".parse()?),
        )
        .init();

    info!("Starting Uyirmai site");

    // Load configuration from environment
    let config = Config::from_env()?;

    // Step 1: Open the preference store
    if let Some(parent) = std::path::Path::new(&config.database_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create database directory {}", parent.display())
            })?;
        }
    }
    let db = Database::new(&config.database_path).await?;

    // Step 2: Mount the resolver with the persisted language
    let source = config.dictionary_source()?;
    info!(
        "Loading dictionaries from {} source (topics: {})",
        source.name(),
        config.dictionary_topics.join(", ")
    );
    let resolver = Resolver::with_topics(source, Arc::new(db), config.dictionary_topics.clone());
    let language = resolver.mount().await;
    info!("Active language: {} ({})", language.name(), language.native_name());

    // Step 3: Serve
    let state = AppState {
        resolver,
        content: Arc::new(FileContentProvider::new(&config.content_dir)),
    };
    server::serve(state, config.port).await
}
