//! HTTP server mode
//!
//! Serves the links for the request's own URL, both as a `Link` header
//! and as a JSON body. The request URL is rebuilt from the configured
//! public base URL, since the server only sees the path and query.

use axum::{
    extract::{OriginalUri, Path, State},
    http::{header, HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use url::Url;

use crate::config::{AppConfig, PaginationSettings};
use crate::error::{Error, Result};
use crate::pagination::{Pagination, PaginationKind, PaginationStrategy};
use crate::problem::ProblemDetails;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to
    pub address: String,
    /// Public base URL of the server
    pub base_url: Url,
    /// Pagination settings
    pub pagination: PaginationSettings,
}

impl TryFrom<AppConfig> for ServerConfig {
    type Error = Error;

    fn try_from(config: AppConfig) -> Result<Self> {
        Ok(Self {
            base_url: config.base_url()?,
            address: config.address,
            pagination: config.pagination,
        })
    }
}

/// App state shared across handlers
///
/// Strategies hold no per-request state, so one instance of each serves
/// every request.
struct AppState {
    base_url: Url,
    default_kind: PaginationKind,
    page_number: PaginationStrategy,
    offset_limit: PaginationStrategy,
}

impl AppState {
    fn new(config: &ServerConfig) -> Result<Self> {
        config.pagination.validate()?;

        let mut base_url = config.base_url.clone();
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            base_url,
            default_kind: config.pagination.kind,
            page_number: config.pagination.strategy_of(PaginationKind::PageNumber)?,
            offset_limit: config.pagination.strategy_of(PaginationKind::OffsetLimit)?,
        })
    }

    fn strategy(&self, kind: PaginationKind) -> &PaginationStrategy {
        match kind {
            PaginationKind::PageNumber => &self.page_number,
            PaginationKind::OffsetLimit => &self.offset_limit,
        }
    }

    /// Rebuild the full request URL from the base URL and the request URI
    fn request_url(&self, uri: &Uri) -> Result<Url> {
        let relative = uri
            .path_and_query()
            .map_or("", |pq| pq.as_str())
            .trim_start_matches('/');
        Ok(self.base_url.join(relative)?)
    }
}

/// Build the router
pub fn router(config: &ServerConfig) -> Result<Router> {
    let state = AppState::new(config)?;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([header::LINK]);

    Ok(Router::new()
        .route("/health", get(health))
        .route("/links", get(default_links))
        .route("/links/:kind", get(kind_links))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state)))
}

/// Start the HTTP server
pub async fn serve(config: ServerConfig) -> Result<()> {
    let app = router(&config)?;

    tracing::info!("Starting HTTP server on http://{}", config.address);
    tracing::info!(base_url = %config.base_url, "Resolving request URLs against base URL");

    let listener = tokio::net::TcpListener::bind(&config.address)
        .await
        .map_err(|e| Error::config(format!("Failed to bind to {}: {e}", config.address)))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::config(format!("Server error: {e}")))?;

    Ok(())
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Links using the configured default strategy
async fn default_links(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
) -> Response {
    let kind = state.default_kind;
    respond(links_response(&state, kind, &uri), &uri)
}

/// Links using the strategy named in the path
async fn kind_links(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
    OriginalUri(uri): OriginalUri,
) -> Response {
    let result = kind
        .parse::<PaginationKind>()
        .and_then(|kind| links_response(&state, kind, &uri));
    respond(result, &uri)
}

fn links_response(state: &AppState, kind: PaginationKind, uri: &Uri) -> Result<Response> {
    let url = state.request_url(uri)?;
    let strategy = state.strategy(kind);

    let parsed = strategy.parse(&url)?;
    let links = strategy.links(&url, &parsed)?;
    tracing::debug!(%kind, %url, count = links.len(), "Computed links");

    let mut headers = HeaderMap::new();
    headers.insert(header::LINK, links.to_header_value()?);

    let body = json!({
        "kind": kind,
        "url": url,
        "state": parsed,
        "links": links,
    });
    Ok((StatusCode::OK, headers, Json(body)).into_response())
}

fn respond(result: Result<Response>, uri: &Uri) -> Response {
    match result {
        Ok(response) => response,
        Err(err) => {
            tracing::warn!(%uri, error = %err, "Failed to compute links");
            ProblemDetails::from_error(&err, uri.to_string()).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_base(base: &str) -> AppState {
        let config = ServerConfig {
            base_url: Url::parse(base).unwrap(),
            ..ServerConfig::try_from(AppConfig::default()).unwrap()
        };
        AppState::new(&config).unwrap()
    }

    #[test]
    fn test_request_url_from_origin() {
        let state = state_with_base("https://api.example.com");
        let uri: Uri = "/links/page?page=2".parse().unwrap();
        assert_eq!(
            state.request_url(&uri).unwrap().as_str(),
            "https://api.example.com/links/page?page=2"
        );
    }

    #[test]
    fn test_request_url_keeps_base_path() {
        let state = state_with_base("https://api.example.com/v1");
        let uri: Uri = "/links?offset=50".parse().unwrap();
        assert_eq!(
            state.request_url(&uri).unwrap().as_str(),
            "https://api.example.com/v1/links?offset=50"
        );
    }

    #[test]
    fn test_server_config_rejects_invalid_base_url() {
        let config = AppConfig {
            base_url: "not a url".to_string(),
            ..AppConfig::default()
        };
        let err = ServerConfig::try_from(config).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let mut config = ServerConfig::try_from(AppConfig::default()).unwrap();
        config.pagination.page_size = 0;
        assert!(router(&config).is_err());
    }
}
