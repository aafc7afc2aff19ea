//! Input Normalizer: turns a request body of unknown shape into a validated `UserProfile`.

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::matchmaking::models::UserProfile;
use crate::matchmaking::preview;

pub const PROFILE_FIELD: &str = "user_partner_profile";

/// A request body as it arrived, before any interpretation.
#[derive(Debug, Clone, PartialEq)]
pub enum RawBody {
    Absent,
    /// Text that should hold a JSON document.
    Text(String),
    /// Already-decoded JSON, e.g. from a gateway envelope.
    Structured(Value),
}

impl RawBody {
    /// JSON text must be UTF-8, so undecodable bytes are `MalformedInput`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AppError> {
        if bytes.is_empty() {
            return Ok(RawBody::Absent);
        }
        let text = std::str::from_utf8(bytes).map_err(|e| {
            warn!("Request body is not valid UTF-8: {e}");
            AppError::MalformedInput
        })?;
        Ok(RawBody::Text(text.to_string()))
    }

    /// Maps the `body` member of a gateway event: null/missing, a string, or inline JSON.
    pub fn from_gateway(body: Option<Value>) -> Self {
        match body {
            None | Some(Value::Null) => RawBody::Absent,
            Some(Value::String(text)) => RawBody::Text(text),
            Some(value) => RawBody::Structured(value),
        }
    }

    fn shape(&self) -> &'static str {
        match self {
            RawBody::Absent => "absent",
            RawBody::Text(_) => "text",
            RawBody::Structured(_) => "structured",
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Normalizes `raw` into a `UserProfile`.
///
/// Absent or blank bodies count as `{}`. Text must parse as JSON, otherwise
/// `MalformedInput`. A non-object body, or a `user_partner_profile` that is not a
/// string, counts as a missing profile and yields `InsufficientProfile`.
pub fn normalize(raw: RawBody) -> Result<UserProfile, AppError> {
    info!(body_shape = raw.shape(), "Normalizing request body");

    let body = match raw {
        RawBody::Absent => Value::Object(Map::new()),
        RawBody::Text(text) if text.trim().is_empty() => Value::Object(Map::new()),
        RawBody::Text(text) => serde_json::from_str(&text).map_err(|e| {
            warn!(
                "Failed to parse body as JSON: {e}; body received: {}",
                preview(&text, 500)
            );
            AppError::MalformedInput
        })?,
        RawBody::Structured(value) => value,
    };

    match body.as_object() {
        Some(object) => {
            let keys: Vec<&String> = object.keys().collect();
            info!(parsed_shape = "object", keys = ?keys, "Parsed request body");
        }
        None => info!(parsed_shape = json_kind(&body), "Parsed request body is not an object"),
    }

    let text = body
        .get(PROFILE_FIELD)
        .and_then(Value::as_str)
        .unwrap_or_default();

    info!(profile_length = text.chars().count(), "Extracted {PROFILE_FIELD}");
    debug!("{PROFILE_FIELD} preview: {}", preview(text, 200));

    UserProfile::parse(text).inspect_err(|_| {
        warn!(
            profile_length = text.trim().chars().count(),
            minimum = UserProfile::MIN_CHARS,
            "Profile validation failed"
        );
    })
}
