use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

const DEFAULT_ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";

/// How the candidate profile for a simulation is obtained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CandidateStrategy {
    /// Ask the model to invent a fresh candidate for every request.
    #[default]
    Generate,
    /// Ask the model to pick the best entry of the static catalog.
    Select,
}

impl FromStr for CandidateStrategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "generate" => Ok(CandidateStrategy::Generate),
            "select" => Ok(CandidateStrategy::Select),
            other => bail!("CANDIDATE_STRATEGY must be 'generate' or 'select', got '{other}'"),
        }
    }
}

impl fmt::Display for CandidateStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CandidateStrategy::Generate => f.write_str("generate"),
            CandidateStrategy::Select => f.write_str("select"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub anthropic_api_url: String,
    pub candidate_strategy: CandidateStrategy,
    pub llm_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            anthropic_api_url: std::env::var("ANTHROPIC_API_URL")
                .unwrap_or_else(|_| DEFAULT_ANTHROPIC_API_URL.to_string()),
            candidate_strategy: match std::env::var("CANDIDATE_STRATEGY") {
                Ok(value) => value.parse()?,
                Err(_) => CandidateStrategy::default(),
            },
            llm_timeout_secs: std::env::var("LLM_TIMEOUT_SECS")
                .unwrap_or_else(|_| "120".to_string())
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
