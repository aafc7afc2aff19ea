//! Simulation pipeline: orchestrates one request end to end.
//!
//! Flow: normalize → candidate source → simulate_date → assemble.
//!
//! Strictly sequential: the simulation prompt needs the candidate. No stage is
//! retried; the first failure ends the request.

use tracing::info;

use crate::errors::AppError;
use crate::llm_client::LanguageModel;
use crate::matchmaking::assembler::assemble;
use crate::matchmaking::candidate::CandidateSource;
use crate::matchmaking::models::{SimulationResult, UserProfile};
use crate::matchmaking::normalizer::{normalize, RawBody};
use crate::matchmaking::simulator::simulate_date;

/// Runs the full pipeline on a raw request body.
pub async fn run_simulation(
    llm: &dyn LanguageModel,
    source: &dyn CandidateSource,
    raw: RawBody,
) -> Result<SimulationResult, AppError> {
    let user = normalize(raw)?;
    simulate_for_profile(llm, source, &user).await
}

/// Runs the two model stages for an already validated profile.
pub async fn simulate_for_profile(
    llm: &dyn LanguageModel,
    source: &dyn CandidateSource,
    user: &UserProfile,
) -> Result<SimulationResult, AppError> {
    info!(strategy = %source.strategy(), "Acquiring candidate profile");
    let candidate = source.acquire(llm, user).await?;

    let reply = simulate_date(llm, user, &candidate).await?;

    let result = assemble(&reply, &candidate)?;
    info!(score = result.score, "Simulation complete");
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::scripted::ScriptedModel;
    use crate::matchmaking::candidate::{CandidateSelector, ProfileSynthesizer};
    use crate::matchmaking::catalog::CANDIDATE_CATALOG;
    use crate::matchmaking::prompts::DATE_SIMULATION_SYSTEM;
    use serde_json::json;

    const REQUEST: &str =
        r#"{"user_partner_profile": "I love hiking and jazz, I'm an engineer, I want kids someday."}"#;
    const CANDIDATE: &str = "Sam is a 31-year-old park ranger who plays saxophone.";

    fn simulation_reply() -> String {
        json!({
            "score": 88,
            "summary": "A sunset hike turned into a jam session.",
            "meta": {
                "compatibility_factors": {
                    "shared_interests": "hiking, jazz",
                    "humor_alignment": "Playful",
                    "lifestyle_match": "Outdoorsy",
                    "conversation_ease": "Easy"
                },
                "potential_concerns": ""
            }
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_generate_pipeline_end_to_end() {
        let llm = ScriptedModel::with_replies([CANDIDATE.to_string(), simulation_reply()]);

        let result = run_simulation(&llm, &ProfileSynthesizer, RawBody::Text(REQUEST.to_string()))
            .await
            .unwrap();

        assert!((1..=100).contains(&result.score));
        assert!(!result.summary.is_empty());
        assert_eq!(result.meta.candidate_profile, CANDIDATE);

        let calls = llm.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].system, DATE_SIMULATION_SYSTEM);
        assert!(calls[1].prompt.contains(CANDIDATE));
    }

    #[tokio::test]
    async fn test_select_pipeline_uses_catalog_profile() {
        let llm = ScriptedModel::with_replies(["2".to_string(), simulation_reply()]);
        let selector = CandidateSelector::new(CANDIDATE_CATALOG).unwrap();

        let result = run_simulation(&llm, &selector, RawBody::Text(REQUEST.to_string()))
            .await
            .unwrap();

        assert_eq!(result.meta.candidate_profile, CANDIDATE_CATALOG[1].profile);
        assert!(llm.calls()[1].prompt.contains(CANDIDATE_CATALOG[1].profile));
    }

    #[tokio::test]
    async fn test_malformed_input_makes_no_upstream_call() {
        let llm = ScriptedModel::with_replies([CANDIDATE.to_string(), simulation_reply()]);

        let err = run_simulation(&llm, &ProfileSynthesizer, RawBody::Text("{not json".to_string()))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::MalformedInput));
        assert!(llm.calls().is_empty());
    }

    #[tokio::test]
    async fn test_insufficient_input_makes_no_upstream_call() {
        let llm = ScriptedModel::with_replies([CANDIDATE.to_string(), simulation_reply()]);

        let err = run_simulation(&llm, &ProfileSynthesizer, RawBody::Text("{}".to_string()))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InsufficientProfile));
        assert!(llm.calls().is_empty());
    }

    #[tokio::test]
    async fn test_first_stage_failure_skips_simulation() {
        let llm = ScriptedModel::with_replies(Vec::<String>::new()).then_fail("quota");

        let err = run_simulation(&llm, &ProfileSynthesizer, RawBody::Text(REQUEST.to_string()))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::UpstreamModel(_)));
        assert_eq!(llm.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_unparseable_simulation_is_parse_error() {
        let llm = ScriptedModel::with_replies([CANDIDATE, "I'd rather not say."]);

        let err = run_simulation(&llm, &ProfileSynthesizer, RawBody::Text(REQUEST.to_string()))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::ResponseParse));
        assert_eq!(llm.calls().len(), 2);
    }
}
