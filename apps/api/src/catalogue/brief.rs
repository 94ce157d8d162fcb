//! Brief parsing — the boundary that turns a free-text client brief into a
//! FilterSpec via the LLM.
//!
//! Pluggable, trait-based: `AppState` holds an `Arc<dyn BriefParser>`, so
//! handlers and tests never depend on the live LLM backend.

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

use crate::catalogue::prompts::{build_filter_extract_prompt, FILTER_EXTRACT_SYSTEM};
use crate::catalogue::spec::FilterSpec;
use crate::llm_client::{extract_json_object, LlmClient, LlmError};

/// Why a brief could not be parsed.
///
/// `Unavailable` covers transport, timeout, and authentication failures —
/// the caller falls back to manual filters only. `Malformed` means the
/// response carried no extractable JSON object — the caller proceeds with
/// an empty spec and surfaces a diagnostic. Neither is a crash.
#[derive(Debug, Error)]
pub enum ParseFailure {
    #[error("AI filter service unavailable: {0}")]
    Unavailable(String),

    #[error("AI response contained no usable filter object")]
    Malformed,
}

/// Parses a free-text brief into a FilterSpec.
#[async_trait]
pub trait BriefParser: Send + Sync {
    async fn parse(&self, text: &str) -> Result<FilterSpec, ParseFailure>;
}

/// The production parser: one LLM round-trip, then JSON extraction and
/// closed-key validation.
pub struct LlmBriefParser {
    llm: LlmClient,
}

impl LlmBriefParser {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl BriefParser for LlmBriefParser {
    async fn parse(&self, text: &str) -> Result<FilterSpec, ParseFailure> {
        let prompt = build_filter_extract_prompt(text);
        let response = self
            .llm
            .chat(FILTER_EXTRACT_SYSTEM, &prompt)
            .await
            .map_err(|e| match e {
                LlmError::EmptyContent => ParseFailure::Malformed,
                other => ParseFailure::Unavailable(other.to_string()),
            })?;

        let Some(value) = extract_json_object(&response) else {
            warn!(
                "No JSON object in AI response: {}",
                response.chars().take(100).collect::<String>()
            );
            return Err(ParseFailure::Malformed);
        };

        let spec = FilterSpec::from_llm_value(&value);
        debug!("Parsed brief into spec: {spec:?}");
        Ok(spec)
    }
}

/// Test double shared across handler tests; returns a canned result.
#[cfg(test)]
pub(crate) struct StubBriefParser(pub(crate) Result<FilterSpec, ParseFailure>);

#[cfg(test)]
#[async_trait]
impl BriefParser for StubBriefParser {
    async fn parse(&self, _text: &str) -> Result<FilterSpec, ParseFailure> {
        match &self.0 {
            Ok(spec) => Ok(spec.clone()),
            Err(ParseFailure::Malformed) => Err(ParseFailure::Malformed),
            Err(ParseFailure::Unavailable(msg)) => Err(ParseFailure::Unavailable(msg.clone())),
        }
    }
}
