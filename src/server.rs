//! HTTP host for the report.
//!
//! Every request resolves the results input and renders a fresh document on
//! a blocking worker. The only shared state is the immutable configuration.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::config::StudioConfig;
use crate::error::StudioError;
use crate::report::{render, Document, ReportInput};
use crate::surface::Surface;

/// Shared state injected into every handler
pub type SharedConfig = Arc<StudioConfig>;

/// Build the router for a configuration
pub fn build_router(config: StudioConfig) -> Router {
    let shared: SharedConfig = Arc::new(config);

    Router::new()
        .route("/", get(report_page))
        .route("/report.json", get(report_json))
        .route("/report.md", get(report_markdown))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}

/// Bind and serve until the process is stopped
pub async fn serve(config: StudioConfig, addr: SocketAddr) -> anyhow::Result<()> {
    let app = build_router(config);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Serving report on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

/// Render failure surfaced to the HTTP client
struct RenderError(String);

impl IntoResponse for RenderError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.0).into_response()
    }
}

impl From<StudioError> for RenderError {
    fn from(err: StudioError) -> Self {
        error!(error = %err, "report render failed");
        Self(err.to_string())
    }
}

/// Resolve input and render one document off the async runtime
async fn render_document(config: SharedConfig, surface: Surface) -> Result<String, RenderError> {
    tokio::task::spawn_blocking(move || -> Result<String, StudioError> {
        let input = ReportInput::resolve(&config);
        let doc: Document = render(&config, &input)?;
        surface.render(&doc)
    })
    .await
    .map_err(|e| RenderError(format!("render task failed: {e}")))?
    .map_err(RenderError::from)
}

async fn report_page(State(config): State<SharedConfig>) -> Result<Html<String>, RenderError> {
    render_document(config, Surface::Html).await.map(Html)
}

async fn report_json(State(config): State<SharedConfig>) -> Result<Response, RenderError> {
    let body = render_document(config, Surface::Json).await?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

async fn report_markdown(State(config): State<SharedConfig>) -> Result<Response, RenderError> {
    let body = render_document(config, Surface::Markdown).await?;
    Ok(([(header::CONTENT_TYPE, "text/markdown; charset=utf-8")], body).into_response())
}

async fn healthz() -> &'static str {
    "ok"
}
