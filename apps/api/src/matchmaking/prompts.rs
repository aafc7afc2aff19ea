// All LLM prompt text and sampling settings for the matchmaking module.

use crate::llm_client::InferenceConfig;
use crate::matchmaking::models::{CandidateRecord, UserProfile};

/// Candidate generation favours varied personas, so it samples hotter than the simulation.
pub const SYNTHESIS_INFERENCE: InferenceConfig = InferenceConfig {
    max_tokens: 300,
    temperature: 0.8,
};

/// Catalog selection is classification; the reply is a single index.
pub const SELECTION_INFERENCE: InferenceConfig = InferenceConfig {
    max_tokens: 10,
    temperature: 0.0,
};

pub const SIMULATION_INFERENCE: InferenceConfig = InferenceConfig {
    max_tokens: 1000,
    temperature: 0.7,
};

pub const CANDIDATE_SYNTHESIS_SYSTEM: &str = "You are a creative AI matchmaking engine. \
    Based on the provided user profile, write a realistic, 3-sentence dating profile for a potential candidate. \
    Give the candidate a distinct personality, career, and hobbies. \
    Do not include any introductory or conversational text; return strictly the profile text. \
    Use ALL of the information in the user profile to create a well-matched candidate.";

pub const CANDIDATE_SELECTION_SYSTEM: &str = "You are an AI matchmaking engine. \
    You will be given a user profile and a numbered list of candidate profiles. \
    Pick the single candidate who is the best match for the user. \
    Respond with ONLY the number of that candidate. \
    Do NOT include any other text, punctuation, or explanation.";

pub const DATE_SIMULATION_SYSTEM: &str = r#"You are an AI Date Simulator running a matchmaking simulation.
Your task is to take a user's ideal partner profile and a candidate's profile, and simulate a first date between them.
Analyze their compatibility, simulate their conversation and chemistry, and output the result.

Use ALL the information from both profiles to create a realistic date simulation.

You must respond strictly in JSON format with the following structure:
{
  "score": <integer from 1 to 100>,
  "summary": "<2-3 paragraph summary of the date>",
  "meta": {
    "compatibility_factors": {
      "shared_interests": "<comma-separated list of shared interests>",
      "humor_alignment": "<how well their humor styles match>",
      "lifestyle_match": "<lifestyle compatibility>",
      "conversation_ease": "<how easily they conversed>"
    },
    "potential_concerns": "<concerns or friction points, or empty string if none>"
  }
}

The compatibility_factors should be brief, descriptive strings. The summary should be detailed and engaging.
Base your analysis on the actual profile information provided."#;

pub fn candidate_synthesis_prompt(user: &UserProfile) -> String {
    format!(
        "User's Profile:\n{}\n\n\
        Based on this user profile, generate a realistic 3-sentence dating profile for a potential \
        candidate who would be compatible with this user. The candidate should have a distinct \
        personality, career, and hobbies that complement the user's profile.",
        user.as_str()
    )
}

/// Lists the catalog with 1-based indices, the numbering the model must answer with.
pub fn candidate_selection_prompt(user: &UserProfile, catalog: &[CandidateRecord]) -> String {
    let candidates = catalog
        .iter()
        .enumerate()
        .map(|(i, record)| format!("{}. {}\n{}", i + 1, record.label, record.profile))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "User's Profile:\n{}\n\n\
        Candidates:\n{}\n\n\
        Which candidate (1-{}) is the best match for this user? Respond with only the number.",
        user.as_str(),
        candidates,
        catalog.len()
    )
}

pub fn date_simulation_prompt(user: &UserProfile, candidate: &str) -> String {
    format!(
        "Here are the profiles for the date simulation:\n\n\
        User's Profile:\n{}\n\n\
        Candidate Profile:\n{}\n\n\
        Simulate the date and return the JSON response.",
        user.as_str(),
        candidate
    )
}
