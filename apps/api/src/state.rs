use std::sync::Arc;

use crate::llm_client::LanguageModel;
use crate::matchmaking::candidate::CandidateSource;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Upstream model. `LlmClient` in production; scripted in tests.
    pub llm: Arc<dyn LanguageModel>,
    /// Pluggable candidate strategy. Chosen via CANDIDATE_STRATEGY at startup.
    pub candidate_source: Arc<dyn CandidateSource>,
}
