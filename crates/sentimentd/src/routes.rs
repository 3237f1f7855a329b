//! HTTP routes for sentimentd.
//!
//! Browser forms redirect back to `/` after every action. The `/v1` routes
//! serve the same state as JSON.

use crate::render;
use crate::state::SharedState;
use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Json, Router,
};
use sentiment_common::dashboard::RequestTicket;
use sentiment_common::export::export;
use chrono::{DateTime, Utc};
use sentiment_common::{
    AnalysisError, AnalysisResult, DashboardPhase, ExportFormat, SentimentSummary, VERSION,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

type ApiError = (StatusCode, String);

fn busy() -> ApiError {
    (
        StatusCode::CONFLICT,
        "An analysis is already in progress".to_string(),
    )
}

// ============================================================================
// Dashboard Routes
// ============================================================================

pub fn dashboard_routes() -> Router<SharedState> {
    Router::new()
        .route("/", get(index))
        .route("/analyze", post(analyze_form))
        .route("/upload", post(upload))
        .route("/clear", post(clear))
        .route("/export/:format", get(export_file))
}

async fn index(State(state): State<SharedState>) -> Html<String> {
    let dashboard = state.dashboard.read().await;
    let input = state.input.read().await;
    Html(render::page(&dashboard, &input))
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeForm {
    #[serde(default)]
    pub text: String,
}

/// Start an analysis in the background and go back to the dashboard
async fn analyze_form(
    State(state): State<SharedState>,
    Form(form): Form<AnalyzeForm>,
) -> Result<Redirect, ApiError> {
    let (ticket, lines) = {
        let mut dashboard = state.dashboard.write().await;
        let mut input = state.input.write().await;
        if dashboard.is_loading() {
            return Err(busy());
        }
        input.set_text(form.text);

        let Some(lines) = input.submission(false) else {
            info!("Nothing to analyze, ignoring submission");
            return Ok(Redirect::to("/"));
        };
        let ticket = dashboard.begin().ok_or_else(busy)?;
        (ticket, lines)
    };

    let task_state = state.clone();
    tokio::spawn(async move {
        // The dashboard holds the outcome, the page picks it up on refresh
        if let Err(e) = run_analysis(task_state, ticket, lines).await {
            debug!("Background analysis {} failed: {}", ticket.generation(), e);
        }
    });

    Ok(Redirect::to("/"))
}

/// Run one call, apply it if the ticket is still current and hand the
/// outcome back
pub async fn run_analysis(
    state: SharedState,
    ticket: RequestTicket,
    lines: Vec<String>,
) -> Result<Vec<AnalysisResult>, AnalysisError> {
    let request_id = Uuid::new_v4();
    info!(
        "[{}] Analysis {} started for {} texts",
        request_id,
        ticket.generation(),
        lines.len()
    );

    let outcome = state.analyzer.analyze_batch(&lines).await;
    apply_outcome(&state, ticket, outcome.clone(), request_id).await;
    outcome
}

async fn apply_outcome(
    state: &SharedState,
    ticket: RequestTicket,
    outcome: Result<Vec<AnalysisResult>, AnalysisError>,
    request_id: Uuid,
) {
    let applied = state.dashboard.write().await.resolve(ticket, outcome);
    if applied {
        info!("[{}] Analysis {} applied", request_id, ticket.generation());
    } else {
        warn!(
            "[{}] Analysis {} superseded, response discarded",
            request_id,
            ticket.generation()
        );
    }
}

/// Load an uploaded .txt/.csv into the text field
async fn upload(
    State(state): State<SharedState>,
    mut multipart: Multipart,
) -> Result<Redirect, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (e.status(), format!("Invalid upload: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let name = field.file_name().unwrap_or_default().to_string();
        if name.is_empty() {
            // Browser submitted the form without choosing a file
            return Ok(Redirect::to("/"));
        }
        let bytes = field
            .bytes()
            .await
            .map_err(|e| (e.status(), format!("Upload failed: {}", e)))?;

        let dashboard = state.dashboard.read().await;
        let mut input = state.input.write().await;
        if dashboard.is_loading() {
            return Err(busy());
        }
        let count = input
            .load_file(&name, &bytes)
            .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
        info!("Loaded {} lines from {}", count, name);
        return Ok(Redirect::to("/"));
    }

    Err((
        StatusCode::BAD_REQUEST,
        "Missing 'file' field".to_string(),
    ))
}

/// Reset text, file and results. An in-flight call keeps running but its
/// response is discarded.
async fn clear(State(state): State<SharedState>) -> Redirect {
    let mut dashboard = state.dashboard.write().await;
    let mut input = state.input.write().await;
    dashboard.clear();
    input.clear();
    info!("Dashboard cleared (generation {})", dashboard.generation());
    Redirect::to("/")
}

async fn export_file(
    State(state): State<SharedState>,
    Path(format): Path<String>,
) -> Result<Response, ApiError> {
    let format: ExportFormat = format
        .parse()
        .map_err(|e: sentiment_common::ExportError| (StatusCode::NOT_FOUND, e.to_string()))?;
    let results = state.dashboard.read().await.results().to_vec();

    let bytes = export(format, &results).map_err(|e| {
        error!("Export to {} failed: {}", format, e);
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;
    info!("Exported {} results as {}", results.len(), format);

    Ok((
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", format.file_name()),
            ),
        ],
        bytes,
    )
        .into_response())
}

// ============================================================================
// JSON API Routes
// ============================================================================

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        .route("/v1/analyze", post(analyze_json))
        .route("/v1/dashboard", get(dashboard_json))
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub texts: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Analyze inline and return the result list
async fn analyze_json(
    State(state): State<SharedState>,
    Json(req): Json<AnalyzeRequest>,
) -> Response {
    let lines: Vec<String> = req
        .texts
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();
    if lines.is_empty() {
        return Json(Vec::<AnalysisResult>::new()).into_response();
    }

    let ticket = {
        let mut dashboard = state.dashboard.write().await;
        let mut input = state.input.write().await;
        match dashboard.begin() {
            Some(ticket) => {
                input.set_text(lines.join("\n"));
                ticket
            }
            None => return busy().into_response(),
        }
    };

    match run_analysis(state, ticket, lines).await {
        Ok(results) => Json(results).into_response(),
        Err(e) => (
            StatusCode::BAD_GATEWAY,
            Json(ErrorResponse {
                error: e.user_message(),
            }),
        )
            .into_response(),
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardView {
    /// idle, loading or error
    pub phase: String,
    pub error: Option<String>,
    pub generation: u64,
    /// When the last call resolved, cleared with the results
    pub completed_at: Option<DateTime<Utc>>,
    pub text: String,
    pub summary: SentimentSummary,
    pub results: Vec<AnalysisResult>,
}

async fn dashboard_json(State(state): State<SharedState>) -> Json<DashboardView> {
    let dashboard = state.dashboard.read().await;
    let input = state.input.read().await;
    Json(DashboardView {
        phase: match dashboard.phase() {
            DashboardPhase::Idle => "idle",
            DashboardPhase::Loading => "loading",
            DashboardPhase::Error(_) => "error",
        }
        .to_string(),
        error: dashboard.error().map(str::to_string),
        generation: dashboard.generation(),
        completed_at: dashboard.completed_at(),
        text: input.text().to_string(),
        summary: dashboard.summary(),
        results: dashboard.results().to_vec(),
    })
}

// ============================================================================
// Health Routes
// ============================================================================

pub fn health_routes() -> Router<SharedState> {
    Router::new().route("/v1/health", get(health_check))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}

async fn health_check(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: VERSION.to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
    })
}
