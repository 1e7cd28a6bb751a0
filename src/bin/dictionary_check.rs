//! Dictionary check binary - loads every language's dictionaries and reports
//! keys that have drifted between languages
//!
//! Usage:
//!   cargo run --bin dictionary-check               # Report; fail on errors
//!   cargo run --bin dictionary-check -- --strict   # Also fail on warnings
//!
//! Uses the same dictionary variables as the server:
//! - DICTIONARY_URL / DICTIONARY_DIR (embedded strings when neither is set)
//! - DICTIONARY_TOPICS (defaults to navigation,home,common,footer)
//! - HTTP_TIMEOUT_SECS (defaults to 10)

use anyhow::Result;
use tracing::{info, warn};
use uyirmai_site::config::Config;
use uyirmai_site::i18n::{Dictionary, DictionaryValidator, Language};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("dictionary_check=info".parse()?)
                .add_directive("uyirmai_site=info".parse()?),
        )
        .init();

    let strict = std::env::args().any(|arg| arg == "--strict");
    let config = Config::from_env()?;
    let source = config.dictionary_source()?;

    info!(
        "Checking {} topics from {} source",
        config.dictionary_topics.len(),
        source.name()
    );

    let mut load_errors = Vec::new();
    let mut dictionaries = Vec::new();

    for language in Language::all() {
        let mut partials = Vec::new();
        for topic in &config.dictionary_topics {
            match source.load_partial(language, topic).await {
                Ok(partial) => partials.push(partial),
                Err(e) => {
                    warn!("Failed to load '{}' for {}: {}", topic, language, e);
                    load_errors.push(format!("'{}' for '{}': {}", topic, language, e));
                }
            }
        }

        let dictionary = Dictionary::merged(partials);
        info!("{}: {} keys", language.name(), dictionary.len());
        dictionaries.push((language, dictionary));
    }

    let borrowed: Vec<(Language, &Dictionary)> = dictionaries
        .iter()
        .map(|(language, dictionary)| (*language, dictionary))
        .collect();
    let report = DictionaryValidator::validate(&borrowed);

    println!("\n{}", "=".repeat(60));
    println!("DICTIONARY CHECK");
    println!("{}\n", "=".repeat(60));

    for error in load_errors.iter().chain(report.errors.iter()) {
        println!("ERROR   {}", error);
    }
    for warning in &report.warnings {
        println!("WARNING {}", warning);
    }

    let error_count = load_errors.len() + report.errors.len();
    println!(
        "\n{} error(s), {} warning(s)",
        error_count,
        report.warnings.len()
    );

    if error_count > 0 || (strict && report.has_warnings()) {
        std::process::exit(1);
    }

    println!("✓ Dictionaries are aligned");
    Ok(())
}
