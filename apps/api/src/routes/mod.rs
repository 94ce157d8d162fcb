pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::catalogue::handlers as catalogue_handlers;
use crate::pitch::handlers as pitch_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Catalogue API
        .route("/api/v1/models", get(catalogue_handlers::handle_list_models))
        .route(
            "/api/v1/models/search",
            post(catalogue_handlers::handle_search),
        )
        .route(
            "/api/v1/models/:id",
            get(catalogue_handlers::handle_get_model),
        )
        // Pitch API
        .route("/api/v1/pitch", post(pitch_handlers::handle_pitch))
        .with_state(state)
}
