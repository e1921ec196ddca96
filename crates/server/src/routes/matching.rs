use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use vibematcher::{render_results, run_smoke, SmokeReport};

/// Match request
#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub query: String,
    /// Defaults to the configured `matcher.default_top_n`.
    #[serde(default)]
    pub top_n: Option<usize>,
}

/// Match response
#[derive(Debug, Serialize, Deserialize)]
pub struct MatchResponse {
    pub query: String,
    pub total_matches: usize,
    pub matches: Vec<MatchResult>,
    /// The same results as console text.
    pub screen: String,
}

/// Single ranked item
#[derive(Debug, Serialize, Deserialize)]
pub struct MatchResult {
    pub rank: usize,
    pub name: String,
    pub description: String,
    pub vibes: Vec<String>,
    pub glyph: String,
    pub score: f32,
}

/// Rank the catalog against a vibe.
pub async fn match_vibe(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<MatchRequest>, JsonRejection>,
) -> ServerResult<impl IntoResponse> {
    let Json(request) = payload?;
    let matcher = state.matcher()?;

    if request.query.trim().is_empty() {
        return Err(ServerError::BadRequest("query must not be empty".into()));
    }
    let top_n = request
        .top_n
        .unwrap_or(state.app.matcher.default_top_n);

    // Embedding is CPU-bound (or blocks on the model worker).
    let response = tokio::task::spawn_blocking(move || -> ServerResult<MatchResponse> {
        let hits = matcher.find_matches(&request.query, top_n)?;
        let matches = hits
            .iter()
            .map(|hit| MatchResult {
                rank: hit.rank,
                name: hit.item.name.clone(),
                description: hit.item.description.clone(),
                vibes: hit.item.vibes.clone(),
                glyph: hit.glyph().to_string(),
                score: hit.score,
            })
            .collect::<Vec<_>>();
        Ok(MatchResponse {
            screen: render_results(&request.query, &hits),
            total_matches: matches.len(),
            matches,
            query: request.query,
        })
    })
    .await??;

    Ok(Json(response))
}

/// Smoke response: the structured report plus the rendered table.
#[derive(Debug, Serialize)]
pub struct SmokeResponse {
    pub passed: bool,
    pub passed_count: usize,
    pub total: usize,
    pub report: SmokeReport,
    pub table: String,
}

/// Run the configured smoke queries against the live matcher.
pub async fn run_smoke_queries(
    State(state): State<Arc<ServerState>>,
) -> ServerResult<impl IntoResponse> {
    let matcher = state.matcher()?;
    let app = Arc::clone(&state.app);

    let report = tokio::task::spawn_blocking(move || run_smoke(&matcher, &app.smoke)).await??;

    Ok(Json(SmokeResponse {
        passed: report.passed(),
        passed_count: report.passed_count(),
        total: report.outcomes.len(),
        table: report.render_table(),
        report,
    }))
}
