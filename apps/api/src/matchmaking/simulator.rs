//! Compatibility Simulator: asks the model to narrate and score a first date.

use tracing::{debug, info};

use crate::errors::AppError;
use crate::llm_client::{GenerationRequest, LanguageModel};
use crate::matchmaking::models::{CandidateProfile, UserProfile};
use crate::matchmaking::preview;
use crate::matchmaking::prompts::{
    date_simulation_prompt, DATE_SIMULATION_SYSTEM, SIMULATION_INFERENCE,
};

/// Returns the model's raw reply. The reply is supposed to be JSON but is not
/// trusted; `assembler::assemble` does the parsing.
pub async fn simulate_date(
    llm: &dyn LanguageModel,
    user: &UserProfile,
    candidate: &CandidateProfile,
) -> Result<String, AppError> {
    let prompt = date_simulation_prompt(user, candidate.as_str());
    debug!(
        prompt_length = prompt.len(),
        candidate_length = candidate.as_str().len(),
        "Date simulation prompt: {}",
        preview(&prompt, 500)
    );

    let reply = llm
        .generate(&GenerationRequest {
            system: DATE_SIMULATION_SYSTEM.to_string(),
            prompt,
            inference: SIMULATION_INFERENCE,
        })
        .await
        .map_err(|e| AppError::UpstreamModel(format!("Date simulation failed: {e}")))?;

    info!(reply_length = reply.len(), "Date simulation reply received");
    Ok(reply)
}
