//! Candidate acquisition: pluggable, trait-based source of the profile the user is matched against.
//!
//! `ProfileSynthesizer` invents a fresh candidate per request.
//! `CandidateSelector` asks the model to pick from the static catalog.
//!
//! `AppState` holds an `Arc<dyn CandidateSource>`, chosen at startup via `CANDIDATE_STRATEGY`.

use std::sync::Arc;

use anyhow::bail;
use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::config::CandidateStrategy;
use crate::errors::AppError;
use crate::llm_client::{GenerationRequest, LanguageModel};
use crate::matchmaking::catalog::CANDIDATE_CATALOG;
use crate::matchmaking::models::{CandidateProfile, CandidateRecord, UserProfile};
use crate::matchmaking::preview;
use crate::matchmaking::prompts::{
    candidate_selection_prompt, candidate_synthesis_prompt, CANDIDATE_SELECTION_SYSTEM,
    CANDIDATE_SYNTHESIS_SYSTEM, SELECTION_INFERENCE, SYNTHESIS_INFERENCE,
};

/// Produces a `CandidateProfile` for a `UserProfile`. Implement this to add a
/// strategy without touching the simulator, assembler, or handlers.
#[async_trait]
pub trait CandidateSource: Send + Sync {
    fn strategy(&self) -> CandidateStrategy;

    async fn acquire(
        &self,
        llm: &dyn LanguageModel,
        user: &UserProfile,
    ) -> Result<CandidateProfile, AppError>;
}

/// Builds the source for the configured strategy.
pub fn candidate_source_for(strategy: CandidateStrategy) -> anyhow::Result<Arc<dyn CandidateSource>> {
    Ok(match strategy {
        CandidateStrategy::Generate => Arc::new(ProfileSynthesizer),
        CandidateStrategy::Select => Arc::new(CandidateSelector::new(CANDIDATE_CATALOG)?),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// ProfileSynthesizer
// ────────────────────────────────────────────────────────────────────────────

pub struct ProfileSynthesizer;

#[async_trait]
impl CandidateSource for ProfileSynthesizer {
    fn strategy(&self) -> CandidateStrategy {
        CandidateStrategy::Generate
    }

    async fn acquire(
        &self,
        llm: &dyn LanguageModel,
        user: &UserProfile,
    ) -> Result<CandidateProfile, AppError> {
        let prompt = candidate_synthesis_prompt(user);
        debug!(
            prompt_length = prompt.len(),
            "Candidate synthesis prompt: {}",
            preview(&prompt, 300)
        );

        let reply = llm
            .generate(&GenerationRequest {
                system: CANDIDATE_SYNTHESIS_SYSTEM.to_string(),
                prompt,
                inference: SYNTHESIS_INFERENCE,
            })
            .await
            .map_err(|e| AppError::UpstreamModel(format!("Candidate synthesis failed: {e}")))?;

        let text = reply.trim();
        if text.is_empty() {
            return Err(AppError::UpstreamModel(
                "Candidate synthesis returned an empty profile".to_string(),
            ));
        }

        info!(candidate_length = text.len(), "Generated candidate profile");
        Ok(CandidateProfile::new(text))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// CandidateSelector
// ────────────────────────────────────────────────────────────────────────────

pub struct CandidateSelector {
    catalog: &'static [CandidateRecord],
}

impl CandidateSelector {
    pub fn new(catalog: &'static [CandidateRecord]) -> anyhow::Result<Self> {
        if catalog.is_empty() {
            bail!("candidate catalog must contain at least one record");
        }
        Ok(Self { catalog })
    }

    /// Catalog index picked by `reply`, or 0 when the reply is unusable.
    fn resolve(&self, reply: &str) -> usize {
        match parse_selection_index(reply, self.catalog.len()) {
            Some(index) => index,
            None => {
                warn!(
                    reply = preview(reply, 100),
                    catalog_size = self.catalog.len(),
                    "Candidate selection ambiguous; falling back to first catalog entry"
                );
                0
            }
        }
    }
}

#[async_trait]
impl CandidateSource for CandidateSelector {
    fn strategy(&self) -> CandidateStrategy {
        CandidateStrategy::Select
    }

    async fn acquire(
        &self,
        llm: &dyn LanguageModel,
        user: &UserProfile,
    ) -> Result<CandidateProfile, AppError> {
        let prompt = candidate_selection_prompt(user, self.catalog);
        debug!(prompt_length = prompt.len(), "Candidate selection prompt built");

        let reply = llm
            .generate(&GenerationRequest {
                system: CANDIDATE_SELECTION_SYSTEM.to_string(),
                prompt,
                inference: SELECTION_INFERENCE,
            })
            .await
            .map_err(|e| AppError::UpstreamModel(format!("Candidate selection failed: {e}")))?;

        let record = &self.catalog[self.resolve(&reply)];
        info!(candidate = record.label, "Selected catalog candidate");
        Ok(CandidateProfile::new(record.profile))
    }
}

/// Parses the first run of ASCII digits in `reply` as a 1-based index into a catalog
/// of `count` records. Returns the 0-based index, or `None` when there is no number
/// or it falls outside `1..=count`.
pub fn parse_selection_index(reply: &str, count: usize) -> Option<usize> {
    let start = reply.find(|c: char| c.is_ascii_digit())?;
    let digits = &reply[start..];
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    let number: usize = digits[..end].parse().ok()?;
    (1..=count).contains(&number).then(|| number - 1)
}
