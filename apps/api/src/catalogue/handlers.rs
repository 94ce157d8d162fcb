//! Axum route handlers for the catalogue API.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalogue::brief::ParseFailure;
use crate::catalogue::division;
use crate::catalogue::record::ModelRecord;
use crate::catalogue::spec::FilterSpec;
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub division: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub total: usize,
    pub models: Vec<ModelRecord>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchRequest {
    /// Manual sidebar filters.
    pub filters: FilterSpec,
    /// Optional free-text query routed through the AI brief parser.
    pub query: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub total: usize,
    pub models: Vec<ModelRecord>,
    /// The effective merged spec the engine applied.
    pub spec: FilterSpec,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/models
///
/// Full catalogue, optionally narrowed to one division. Division aliases
/// ("development", "mainboard") are accepted.
pub async fn handle_list_models(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<ListResponse> {
    let records = state.catalogue.records();

    let models: Vec<ModelRecord> = match query
        .division
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
    {
        Some(term) => {
            let code = division::resolve(term)
                .map(str::to_string)
                .unwrap_or_else(|| term.to_lowercase());
            records
                .iter()
                .filter(|r| r.division.contains(&code))
                .cloned()
                .collect()
        }
        None => records.to_vec(),
    };

    Json(ListResponse {
        total: models.len(),
        models,
    })
}

/// GET /api/v1/models/:id
pub async fn handle_get_model(
    State(state): State<AppState>,
    Path(model_id): Path<String>,
) -> Result<Json<ModelRecord>, AppError> {
    state
        .catalogue
        .get(&model_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Model {model_id} not found")))
}

/// POST /api/v1/models/search
///
/// Unified filtering: manual filters plus an optional free-text query
/// translated by the AI boundary. AI failure degrades to manual-only
/// filtering with a diagnostic — it never fails the search.
pub async fn handle_search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    let mut diagnostics = Vec::new();

    let ai_spec = match request
        .query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
    {
        Some(query) => match state.brief_parser.parse(query).await {
            Ok(spec) => spec,
            Err(failure @ ParseFailure::Unavailable(_)) => {
                warn!("Brief parser unavailable: {failure}");
                diagnostics
                    .push("AI filter service unavailable; applied manual filters only".to_string());
                FilterSpec::default()
            }
            Err(ParseFailure::Malformed) => {
                diagnostics.push(
                    "AI response could not be interpreted; applied manual filters only".to_string(),
                );
                FilterSpec::default()
            }
        },
        None => FilterSpec::default(),
    };

    // Manual values take precedence on conflict.
    let spec = FilterSpec::merge(&request.filters, &ai_spec);
    let matched = state.engine.apply(state.catalogue.records(), &spec);
    let models: Vec<ModelRecord> = matched.into_iter().cloned().collect();

    Ok(Json(SearchResponse {
        total: models.len(),
        models,
        spec,
        diagnostics,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::catalogue::brief::StubBriefParser;
    use crate::catalogue::engine::FilterEngine;
    use crate::catalogue::loader::Catalogue;
    use crate::config::Config;
    use crate::llm_client::LlmClient;

    fn model(id: &str, division: &str, height_cm: i64, hair: &str, eye: &str) -> ModelRecord {
        ModelRecord {
            model_id: id.to_string(),
            name: format!("Model {id}"),
            division: division.to_string(),
            height_cm,
            hair_color: hair.to_string(),
            eye_color: eye.to_string(),
            bust: String::new(),
            waist: String::new(),
            hips: String::new(),
            shoes: String::new(),
            thumbnail: String::new(),
            images: vec![],
            profile_url: String::new(),
        }
    }

    fn fixture() -> Vec<ModelRecord> {
        vec![
            model("m1", "ima", 178, "blonde", "blue"),
            model("m2", "dev", 165, "dark brown", "green"),
            model("m3", "mai", 174, "chestnut", "brown"),
        ]
    }

    fn test_state(parser: StubBriefParser) -> AppState {
        AppState {
            catalogue: Arc::new(Catalogue::from_records(fixture())),
            llm: LlmClient::new("test-key".to_string()),
            brief_parser: Arc::new(parser),
            engine: FilterEngine::default(),
            config: Config {
                groq_api_key: "test-key".to_string(),
                catalogue_path: "unused".to_string(),
                port: 0,
                rust_log: "info".to_string(),
                height_tolerance_cm: 3,
            },
        }
    }

    #[tokio::test]
    async fn test_search_without_query_applies_manual_filters() {
        let state = test_state(StubBriefParser(Ok(FilterSpec::default())));
        let request = SearchRequest {
            filters: FilterSpec {
                eye_color: vec!["blue".to_string()],
                ..FilterSpec::default()
            },
            query: None,
        };

        let Json(response) = handle_search(State(state), Json(request)).await.unwrap();
        assert_eq!(response.total, 1);
        assert_eq!(response.models[0].model_id, "m1");
        assert!(response.diagnostics.is_empty());
    }

    #[tokio::test]
    async fn test_search_merges_ai_spec_with_manual_precedence() {
        let ai = FilterSpec {
            hair_color: vec!["blonde".to_string()],
            division: vec!["dev".to_string()],
            ..FilterSpec::default()
        };
        let state = test_state(StubBriefParser(Ok(ai)));
        let request = SearchRequest {
            filters: FilterSpec {
                hair_color: vec!["brunette".to_string()],
                ..FilterSpec::default()
            },
            query: Some("blonde models from development".to_string()),
        };

        let Json(response) = handle_search(State(state), Json(request)).await.unwrap();
        // Manual brunette wins over AI blonde; AI division carries over.
        assert_eq!(response.spec.hair_color, vec!["brunette"]);
        assert_eq!(response.spec.division, vec!["dev"]);
        assert_eq!(response.total, 1);
        assert_eq!(response.models[0].model_id, "m2");
    }

    #[tokio::test]
    async fn test_search_degrades_when_ai_unavailable() {
        let state = test_state(StubBriefParser(Err(ParseFailure::Unavailable(
            "timeout".to_string(),
        ))));
        let request = SearchRequest {
            filters: FilterSpec {
                division: vec!["mainboard".to_string()],
                ..FilterSpec::default()
            },
            query: Some("taller blondes".to_string()),
        };

        let Json(response) = handle_search(State(state), Json(request)).await.unwrap();
        assert_eq!(response.total, 1);
        assert_eq!(response.models[0].model_id, "m1");
        assert_eq!(response.diagnostics.len(), 1);
    }

    #[tokio::test]
    async fn test_search_malformed_ai_response_proceeds_with_manual_only() {
        let state = test_state(StubBriefParser(Err(ParseFailure::Malformed)));
        let request = SearchRequest {
            filters: FilterSpec::default(),
            query: Some("gibberish".to_string()),
        };

        let Json(response) = handle_search(State(state), Json(request)).await.unwrap();
        // Empty effective spec → identity on the catalogue.
        assert_eq!(response.total, 3);
        assert_eq!(response.diagnostics.len(), 1);
    }

    #[tokio::test]
    async fn test_list_models_by_division_alias() {
        let state = test_state(StubBriefParser(Ok(FilterSpec::default())));
        let Json(response) = handle_list_models(
            State(state),
            Query(ListQuery {
                division: Some("development".to_string()),
            }),
        )
        .await;
        assert_eq!(response.total, 1);
        assert_eq!(response.models[0].model_id, "m2");
    }

    #[tokio::test]
    async fn test_get_model_not_found() {
        let state = test_state(StubBriefParser(Ok(FilterSpec::default())));
        let result = handle_get_model(State(state), Path("nope".to_string())).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
