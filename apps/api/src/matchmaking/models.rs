use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::AppError;

/// Free-text description of what the caller is looking for in a partner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile(String);

impl UserProfile {
    /// Minimum length, in characters, after trimming.
    pub const MIN_CHARS: usize = 10;

    /// Trims and validates raw profile text.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let trimmed = raw.trim();
        if trimmed.chars().count() < Self::MIN_CHARS {
            return Err(AppError::InsufficientProfile);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Free-text description of the hypothetical match, generated or picked from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateProfile(String);

impl CandidateProfile {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One entry of the static candidate catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateRecord {
    pub label: &'static str,
    pub profile: &'static str,
}

/// The canonical success payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// 1 – 100
    pub score: u8,
    pub summary: String,
    pub meta: SimulationMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationMeta {
    /// Factor name → description, e.g. `shared_interests`, `humor_alignment`,
    /// `lifestyle_match`, `conversation_ease`. Empty when the model omitted it.
    pub compatibility_factors: Map<String, Value>,
    pub potential_concerns: String,
    /// Always the profile the pipeline produced, never the model's echo of it.
    pub candidate_profile: String,
}
