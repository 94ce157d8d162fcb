//! Axum route handlers for the pitch API.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::catalogue::brief::ParseFailure;
use crate::catalogue::record::ModelRecord;
use crate::catalogue::spec::FilterSpec;
use crate::errors::AppError;
use crate::pitch::generator::generate_pitch;
use crate::state::AppState;

const MAX_RESULTS_CAP: usize = 20;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PitchRequest {
    pub brief: String,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default = "default_agent_name")]
    pub agent_name: String,
}

fn default_max_results() -> usize {
    5
}

fn default_agent_name() -> String {
    "Athena".to_string()
}

#[derive(Debug, Serialize)]
pub struct RankedModel {
    pub score: f64,
    pub model: ModelRecord,
}

#[derive(Debug, Serialize)]
pub struct PitchResponse {
    /// The spec the AI extracted from the brief.
    pub spec: FilterSpec,
    /// How many models passed the filter before truncation to max_results.
    pub total_matched: usize,
    pub models: Vec<RankedModel>,
    pub pitch: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handler
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/pitch
///
/// Full pitch pipeline: parse brief → filter → rank → top N → email pitch.
///
/// A malformed AI response degrades to the empty spec with a diagnostic;
/// an unavailable AI service is an error here, since the pitch deliverable
/// is AI-generated by definition. A failed pitch call still returns the
/// ranked matches.
pub async fn handle_pitch(
    State(state): State<AppState>,
    Json(request): Json<PitchRequest>,
) -> Result<Json<PitchResponse>, AppError> {
    if request.brief.trim().is_empty() {
        return Err(AppError::Validation("brief cannot be empty".to_string()));
    }

    let mut diagnostics = Vec::new();

    let spec = match state.brief_parser.parse(&request.brief).await {
        Ok(spec) => spec,
        Err(ParseFailure::Malformed) => {
            diagnostics.push(
                "AI response could not be interpreted; matching without extracted filters"
                    .to_string(),
            );
            FilterSpec::default()
        }
        Err(failure @ ParseFailure::Unavailable(_)) => {
            return Err(AppError::Llm(failure.to_string()));
        }
    };

    let records = state.catalogue.records();
    let subset = state.engine.apply(records, &spec);
    let total_matched = subset.len();
    let ranked = state.engine.rank(subset, &spec, records);

    let top: Vec<RankedModel> = ranked
        .into_iter()
        .take(request.max_results.clamp(1, MAX_RESULTS_CAP))
        .map(|s| RankedModel {
            score: s.score,
            model: s.record.clone(),
        })
        .collect();

    let pitch = if top.is_empty() {
        diagnostics.push("No models matched the brief; no pitch generated".to_string());
        None
    } else {
        let selected: Vec<&ModelRecord> = top.iter().map(|m| &m.model).collect();
        match generate_pitch(&state.llm, &request.brief, &selected, &request.agent_name).await {
            Ok(text) => Some(text),
            Err(e) => {
                warn!("Pitch generation failed: {e}");
                diagnostics.push("Pitch generation failed; returning matches only".to_string());
                None
            }
        }
    };

    info!(
        "Pitch request matched {total_matched} models, returning {}",
        top.len()
    );

    Ok(Json(PitchResponse {
        spec,
        total_matched,
        models: top,
        pitch,
        diagnostics,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
