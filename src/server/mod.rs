//! # Web form for the ABSA pipeline
//!
//! - `GET /`: HTML form (Polish review in, rendered markdown out)
//! - `POST /api/analyze`: `{"review": "..."}` → `{"markdown": "...", "aspects": [...]}`
//! - `GET /health`: health check

use crate::pipelines::absa::{render_outcome, AspectResult};
use crate::pipelines::runner::AbsaRunner;
use axum::extract::State;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

const INDEX_HTML: &str = include_str!("ui/index.html");

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Handle to the pipeline thread
    pub runner: AbsaRunner,
}

impl AppState {
    pub fn new(runner: AbsaRunner) -> Self {
        Self { runner }
    }
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// Review in Polish
    pub review: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    /// Result lines, the "no aspects" message or the error message
    pub markdown: String,
    /// Per-aspect results, empty when no aspect was found or the analysis failed
    pub aspects: Vec<AspectResult>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
}

/// GET /
pub async fn serve_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        module: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// POST /api/analyze
///
/// Always answers with the rendered outcome: analysis failures are reported in `markdown`.
pub async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Json<AnalyzeResponse> {
    let request_id = Uuid::new_v4();
    async move {
        info!("Analyzing review ({} characters)", request.review.chars().count());
        let outcome = state.runner.predict(request.review).await;
        let aspects = match &outcome {
            Ok(output) => output.aspects().to_vec(),
            Err(error) => {
                warn!("Analysis failed: {}", error);
                vec![]
            }
        };
        Json(AnalyzeResponse {
            markdown: render_outcome(&outcome),
            aspects,
        })
    }
    .instrument(info_span!("analyze", %request_id))
    .await
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(serve_index))
        .route("/health", get(health_check))
        .route("/api/analyze", post(analyze))
        .with_state(state)
}
