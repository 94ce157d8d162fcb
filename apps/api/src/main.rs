mod catalogue;
mod config;
mod errors;
mod llm_client;
mod pitch;
mod routes;
mod state;

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalogue::brief::{BriefParser, LlmBriefParser};
use crate::catalogue::engine::FilterEngine;
use crate::catalogue::loader::Catalogue;
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Elysium Catalogue API v{}", env!("CARGO_PKG_VERSION"));

    // Load the catalogue — fatal if the dataset is missing or empty;
    // no partial dataset is served.
    let catalogue = Catalogue::load(Path::new(&config.catalogue_path))?;
    info!("Catalogue ready: {} models", catalogue.len());

    // Initialize LLM client
    let llm = LlmClient::new(config.groq_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Initialize the brief parser boundary (swap with a stub in tests)
    let brief_parser: Arc<dyn BriefParser> = Arc::new(LlmBriefParser::new(llm.clone()));

    // Initialize the filter engine with the configured height tolerance
    let engine = FilterEngine::new(config.height_tolerance_cm);
    info!("Filter engine ready (tolerance: ±{}cm)", config.height_tolerance_cm);

    // Build app state
    let state = AppState {
        catalogue: Arc::new(catalogue),
        llm,
        brief_parser,
        engine,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
