//! JSON HTTP surface over the resolver and the content provider.

use crate::content::{page_document, ContentError, ContentProvider};
use crate::feature::{feature_cards, FeatureCard};
use crate::i18n::{Language, MetricsReport, Resolver};
use crate::routes::{navigation, NavItem, Page};
use anyhow::{Context, Result};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

/// Shared state for HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Resolver,
    pub content: Arc<dyn ContentProvider>,
}

#[derive(Debug, Deserialize)]
struct LanguageRequest {
    language: String,
}

#[derive(Debug, Serialize)]
struct LanguageResponse {
    language: Language,
    name: &'static str,
    native_name: &'static str,
    state: &'static str,
    toggle_label: &'static str,
}

impl LanguageResponse {
    fn from_resolver(resolver: &Resolver) -> Self {
        let language = resolver.language().unwrap_or_default();
        Self {
            language,
            name: language.name(),
            native_name: language.native_name(),
            state: resolver.state().name(),
            toggle_label: language.toggle_label(),
        }
    }
}

#[derive(Debug, Serialize)]
struct PageResponse {
    language: Language,
    page: Page,
    title: String,
    navigation: Vec<NavItem>,
    content: Option<Value>,
    features: Vec<FeatureCard>,
}

type ApiError = (StatusCode, Json<Value>);

/// `GET /health`
async fn health() -> &'static str {
    "OK"
}

/// `GET /api/language`
async fn get_language(State(state): State<AppState>) -> Json<LanguageResponse> {
    Json(LanguageResponse::from_resolver(&state.resolver))
}

/// `PUT /api/language` — start a switch to the requested tag.
async fn put_language(
    State(state): State<AppState>,
    Json(request): Json<LanguageRequest>,
) -> Result<Json<LanguageResponse>, ApiError> {
    state
        .resolver
        .set_language_code(&request.language)
        .await
        .map_err(|e| {
            warn!("Rejected language switch: {}", e);
            (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": e.to_string()})),
            )
        })?;

    Ok(Json(LanguageResponse::from_resolver(&state.resolver)))
}

/// `POST /api/language/toggle`
async fn toggle_language(State(state): State<AppState>) -> Json<LanguageResponse> {
    let current = state.resolver.language().unwrap_or_default();
    state.resolver.set_language(current.toggled()).await;
    Json(LanguageResponse::from_resolver(&state.resolver))
}

/// `GET /api/translate/:key`
async fn translate(State(state): State<AppState>, Path(key): Path<String>) -> Json<Value> {
    let translations = state.resolver.ready().await;
    Json(json!({
        "key": key,
        "value": translations.t(&key),
        "language": translations.language(),
    }))
}

/// `GET /api/pages`
async fn home_page(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<PageResponse>), ApiError> {
    render_page(&state, "/").await
}

/// `GET /api/pages/*path`
async fn page(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Result<(StatusCode, Json<PageResponse>), ApiError> {
    let path = format!("/{}", path.trim_start_matches('/'));
    render_page(&state, &path).await
}

async fn render_page(
    state: &AppState,
    path: &str,
) -> Result<(StatusCode, Json<PageResponse>), ApiError> {
    let translations = state.resolver.ready().await;
    let language = translations.language();
    let page = Page::from_path(path);

    let content = match page_document(state.content.as_ref(), &page, language).await {
        Ok(document) => document,
        Err(ContentError::NotFound {
            collection,
            relative_path,
        }) => {
            debug!(
                "No '{}' document in '{}', rendering without content",
                relative_path, collection
            );
            None
        }
        Err(e) => {
            error!("Failed to load content for {}: {}", path, e);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": e.to_string()})),
            ));
        }
    };

    let status = if page == Page::NotFound {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    };

    let response = PageResponse {
        language,
        title: translations.t(page.title_key()).to_string(),
        navigation: navigation(&translations, path),
        features: content.as_ref().map(feature_cards).unwrap_or_default(),
        content,
        page,
    };

    Ok((status, Json(response)))
}

/// `GET /api/metrics`
async fn metrics(State(state): State<AppState>) -> Json<MetricsReport> {
    Json(state.resolver.metrics().report())
}

/// Build the axum router with shared state.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/language", get(get_language).put(put_language))
        .route("/api/language/toggle", post(toggle_language))
        .route("/api/translate/:key", get(translate))
        .route("/api/pages", get(home_page))
        .route("/api/pages/*path", get(page))
        .route("/api/metrics", get(metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind to `port` and serve until the process exits.
pub async fn serve(state: AppState, port: u16) -> Result<()> {
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Listening on {}", addr);

    axum::serve(listener, build_router(state))
        .await
        .context("Server error")?;

    Ok(())
}
