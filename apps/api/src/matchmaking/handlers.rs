//! Axum route handlers for the Simulation API.
//!
//! Bodies are taken as raw bytes and decoded here, so malformed JSON surfaces as
//! `AppError::MalformedInput` instead of an extractor rejection.

use axum::{body::Bytes, extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::matchmaking::formatter::{format_profile_description, FormSubmission};
use crate::matchmaking::models::SimulationResult;
use crate::matchmaking::normalizer::{RawBody, PROFILE_FIELD};
use crate::matchmaking::pipeline::run_simulation;
use crate::state::AppState;

/// Gateway event envelope; `body` may be a string, inline JSON, or null.
#[derive(Debug, Deserialize)]
pub struct GatewayEvent {
    #[serde(default)]
    pub body: Option<Value>,
}

async fn simulate(state: &AppState, raw: RawBody) -> Result<Json<SimulationResult>, AppError> {
    let span = info_span!("simulation", request_id = %Uuid::new_v4());
    let result = run_simulation(state.llm.as_ref(), state.candidate_source.as_ref(), raw)
        .instrument(span)
        .await?;
    Ok(Json(result))
}

/// POST /api/v1/simulate
///
/// Body is the request object: `{"user_partner_profile": "..."}`.
pub async fn handle_simulate(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SimulationResult>, AppError> {
    simulate(&state, RawBody::from_bytes(&body)?).await
}

/// POST /api/v1/invoke
///
/// Body is a gateway event whose `body` member carries the request object.
pub async fn handle_invoke(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SimulationResult>, AppError> {
    let raw = if body.iter().all(u8::is_ascii_whitespace) {
        RawBody::Absent
    } else {
        let event: GatewayEvent = serde_json::from_slice(&body).map_err(|e| {
            info!("Rejected gateway event: {e}");
            AppError::MalformedInput
        })?;
        RawBody::from_gateway(event.body)
    };

    simulate(&state, raw).await
}

/// POST /api/v1/simulate/form
///
/// Body is `{form_data, voice_transcript}` from the sign-up flow; both are
/// flattened into profile text before the usual validation.
pub async fn handle_simulate_form(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SimulationResult>, AppError> {
    let submission: FormSubmission = if body.iter().all(u8::is_ascii_whitespace) {
        FormSubmission::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| {
            info!("Rejected form submission: {e}");
            AppError::MalformedInput
        })?
    };

    let description = format_profile_description(
        &submission.form_data.unwrap_or_default(),
        submission.voice_transcript.as_deref().unwrap_or_default(),
    );
    info!(
        description_length = description.chars().count(),
        "Formatted form submission"
    );

    simulate(&state, RawBody::Structured(json!({ PROFILE_FIELD: description }))).await
}
