//! JSON HTTP API over the search engine.
//!
//! Exposes the aggregation engine to the UI layer:
//!
//! - `GET /api/` — liveness + version
//! - `POST /api/search` — aggregated multi-source search
//! - `GET /api/sources` — registry listing in registration order
//! - `POST /api/sources/{name}/toggle` — flip a source's enabled flag
//! - `GET /api/suggestions?q=` — query expansions

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::info;

use crate::error::SearchError;
use crate::fetch::Fetcher;
use crate::orchestrator::SearchService;
use crate::registry::SourceDescriptor;
use crate::suggest;
use crate::types::{SearchRequest, SearchResponse};

/// Response from `GET /api/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiInfo {
    /// Service banner.
    pub message: String,
    /// Crate version.
    pub version: String,
}

/// Response from `GET /api/sources`.
#[derive(Debug, Clone, Serialize)]
pub struct SourcesResponse {
    /// Registry entries in registration order.
    pub sources: Vec<SourceDescriptor>,
}

/// Response from `POST /api/sources/{name}/toggle`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleResponse {
    /// The toggled slug.
    pub source: String,
    /// The new enabled state.
    pub enabled: bool,
}

/// Response from `GET /api/suggestions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionsResponse {
    /// Query expansions, in order.
    pub suggestions: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SuggestQuery {
    #[serde(default)]
    q: String,
}

/// Error payload returned for failed API calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable error message.
    pub error: String,
}

/// An API-level error: a status code plus a JSON error body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<SearchError> for ApiError {
    fn from(err: SearchError) -> Self {
        let status = match err {
            SearchError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            SearchError::UnknownSource(_) => StatusCode::NOT_FOUND,
            // Per-source failures are absorbed by the orchestrator; anything
            // else reaching here is a server-side fault.
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

/// Shared state for axum handlers.
struct AppState<F: Fetcher> {
    service: Arc<SearchService<F>>,
}

impl<F: Fetcher> Clone for AppState<F> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}

/// Build the API router over a search service.
pub fn router<F: Fetcher + 'static>(service: Arc<SearchService<F>>) -> Router {
    let state = AppState { service };
    Router::new()
        .route("/api/", get(handle_root))
        .route("/api/search", post(handle_search::<F>))
        .route("/api/sources", get(handle_sources::<F>))
        .route("/api/sources/{name}/toggle", post(handle_toggle::<F>))
        .route("/api/suggestions", get(handle_suggestions))
        .with_state(state)
}

/// HTTP server wrapping the router in a background task.
pub struct ApiServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl ApiServer {
    /// Bind `bind_addr` (use port 0 for auto-assign) and serve in a
    /// background tokio task.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the TCP listener cannot bind.
    pub async fn start<F: Fetcher + 'static>(
        service: Arc<SearchService<F>>,
        bind_addr: &str,
    ) -> Result<Self, SearchError> {
        let app = router(service);

        let listener = TcpListener::bind(bind_addr)
            .await
            .map_err(|e| SearchError::Config(format!("API server bind failed: {e}")))?;
        let addr = listener
            .local_addr()
            .map_err(|e| SearchError::Config(format!("failed to get local addr: {e}")))?;

        info!("API server listening on http://{addr}/api/");

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("API server error: {e}");
            }
        });

        Ok(Self { addr, handle })
    }

    /// Returns the address the server is listening on.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Returns the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Wait for the server task to finish (it normally never does).
    pub async fn join(self) {
        let _ = self.handle.await;
    }

    /// Abort the server task.
    pub fn shutdown(&self) {
        self.handle.abort();
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

/// `GET /api/` — liveness.
async fn handle_root() -> Json<ApiInfo> {
    Json(ApiInfo {
        message: "vidsearch API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `POST /api/search` — aggregated search.
async fn handle_search<F: Fetcher>(
    State(state): State<AppState<F>>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let response = state.service.search(&request).await?;
    Ok(Json(response))
}

/// `GET /api/sources` — registry listing.
async fn handle_sources<F: Fetcher>(State(state): State<AppState<F>>) -> Json<SourcesResponse> {
    Json(SourcesResponse {
        sources: state.service.registry().list(),
    })
}

/// `POST /api/sources/{name}/toggle` — flip one source's enabled flag.
async fn handle_toggle<F: Fetcher>(
    State(state): State<AppState<F>>,
    Path(name): Path<String>,
) -> Result<Json<ToggleResponse>, ApiError> {
    let enabled = state.service.registry().toggle(&name)?;
    Ok(Json(ToggleResponse {
        source: name,
        enabled,
    }))
}

/// `GET /api/suggestions?q=` — query expansions.
async fn handle_suggestions(Query(params): Query<SuggestQuery>) -> Json<SuggestionsResponse> {
    Json(SuggestionsResponse {
        suggestions: suggest::suggestions(&params.q),
    })
}
