use std::sync::Arc;

use crate::catalogue::brief::BriefParser;
use crate::catalogue::engine::FilterEngine;
use crate::catalogue::loader::Catalogue;
use crate::config::Config;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The immutable record table, loaded once at startup.
    pub catalogue: Arc<Catalogue>,
    pub llm: LlmClient,
    /// Pluggable brief parser. Default: LlmBriefParser over the Groq client.
    pub brief_parser: Arc<dyn BriefParser>,
    pub engine: FilterEngine,
    /// Kept for handlers that need runtime settings beyond the engine's.
    #[allow(dead_code)]
    pub config: Config,
}
