//! Response Assembler: best-effort repair of the simulator's free-text reply into a
//! `SimulationResult`.
//!
//! Repair is heuristic: code fences are removed and the text is cut down to the span
//! between the first `{` and the last `}`. Anything that still fails to parse is a
//! `ResponseParse` error. The model's own `candidate_profile`, if any, is discarded.

use serde_json::{Map, Value};
use tracing::{error, info, warn};

use crate::errors::AppError;
use crate::matchmaking::models::{CandidateProfile, SimulationMeta, SimulationResult};
use crate::matchmaking::preview;

const MIN_SCORE: i64 = 1;
const MAX_SCORE: i64 = 100;

/// Removes every ```` ```json ```` and ```` ``` ```` marker, wherever it appears.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// Slices `text` from the first `{` to the last `}` inclusive. Text without an
/// ordered brace pair is returned unchanged.
pub fn extract_json_object(text: &str) -> &str {
    match (text.find('{'), text.rfind('}')) {
        (Some(first), Some(last)) if last > first => &text[first..=last],
        _ => text,
    }
}

/// Parses the simulator reply and injects `candidate` into the metadata.
pub fn assemble(
    reply: &str,
    candidate: &CandidateProfile,
) -> Result<SimulationResult, AppError> {
    let cleaned = strip_code_fences(reply);
    let sliced = extract_json_object(&cleaned);

    let parsed: Value = serde_json::from_str(sliced).map_err(|e| {
        error!(
            "Failed to parse AI response as JSON: {e}. Raw reply: {}. Extracted: {}",
            preview(reply, 500),
            preview(sliced, 500)
        );
        AppError::ResponseParse
    })?;

    let Value::Object(mut root) = parsed else {
        error!(
            "AI response is JSON but not an object: {}",
            preview(sliced, 500)
        );
        return Err(AppError::ResponseParse);
    };

    let score = root.get("score").and_then(coerce_score).ok_or_else(|| {
        error!("AI response has no usable score: {:?}", root.get("score"));
        AppError::ResponseParse
    })?;

    let summary = match root.remove("summary") {
        Some(Value::String(summary)) if !summary.trim().is_empty() => summary,
        other => {
            error!("AI response has no usable summary: {other:?}");
            return Err(AppError::ResponseParse);
        }
    };

    let mut meta = match root.remove("meta") {
        Some(Value::Object(meta)) => meta,
        None | Some(Value::Null) => Map::new(),
        Some(other) => {
            warn!("Discarding non-object meta: {other}");
            Map::new()
        }
    };

    let compatibility_factors = match meta.remove("compatibility_factors") {
        Some(Value::Object(factors)) => factors,
        None | Some(Value::Null) => Map::new(),
        Some(other) => {
            warn!("Discarding non-object compatibility_factors: {other}");
            Map::new()
        }
    };

    let potential_concerns = match meta.remove("potential_concerns") {
        Some(Value::String(concerns)) => concerns,
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join("; "),
        None | Some(Value::Null) => String::new(),
        Some(other) => {
            warn!("Discarding non-text potential_concerns: {other}");
            String::new()
        }
    };

    if meta.contains_key("candidate_profile") {
        info!("Overwriting model-supplied candidate_profile");
    }

    Ok(SimulationResult {
        score,
        summary,
        meta: SimulationMeta {
            compatibility_factors,
            potential_concerns,
            candidate_profile: candidate.as_str().to_string(),
        },
    })
}

/// Accepts integers, floats (rounded), and numeric strings; clamps into 1–100.
fn coerce_score(value: &Value) -> Option<u8> {
    let raw = match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => i,
            None => round_finite(n.as_f64()?)?,
        },
        Value::String(s) => {
            let s = s.trim();
            match s.parse::<i64>() {
                Ok(i) => i,
                Err(_) => round_finite(s.parse::<f64>().ok()?)?,
            }
        }
        _ => return None,
    };

    let clamped = raw.clamp(MIN_SCORE, MAX_SCORE);
    if clamped != raw {
        warn!(raw_score = raw, clamped, "Score outside 1-100; clamped");
    }
    u8::try_from(clamped).ok()
}

fn round_finite(f: f64) -> Option<i64> {
    if !f.is_finite() {
        return None;
    }
    // Saturating cast; the result is clamped afterwards anyway.
    Some(f.round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn candidate() -> CandidateProfile {
        CandidateProfile::new("Sam is a 31-year-old baker who climbs on weekends.")
    }

    fn full_reply() -> Value {
        json!({
            "score": 82,
            "summary": "They bonded over sourdough and bouldering.",
            "meta": {
                "compatibility_factors": {
                    "shared_interests": "climbing, baking",
                    "humor_alignment": "Both love puns",
                    "lifestyle_match": "Early risers",
                    "conversation_ease": "Effortless"
                },
                "potential_concerns": "Different views on pets"
            }
        })
    }

    #[test]
    fn test_extract_is_noop_on_exact_json() {
        let text = full_reply().to_string();
        assert_eq!(extract_json_object(&text), text);
    }

    #[test]
    fn test_extract_drops_surrounding_prose() {
        let text = "Here you go: {\"score\": 5} Hope that helps!";
        assert_eq!(extract_json_object(text), "{\"score\": 5}");
    }

    #[test]
    fn test_extract_without_braces_returns_input() {
        assert_eq!(extract_json_object("no json here"), "no json here");
        assert_eq!(extract_json_object("} backwards {"), "} backwards {");
    }

    #[test]
    fn test_strip_code_fences_anywhere() {
        let text = "Sure! ```json\n{\"score\":80}\n```";
        assert_eq!(strip_code_fences(text), "Sure! \n{\"score\":80}");
    }

    #[test]
    fn test_assemble_full_reply() {
        let result = assemble(&full_reply().to_string(), &candidate()).unwrap();

        assert_eq!(result.score, 82);
        assert_eq!(result.summary, "They bonded over sourdough and bouldering.");
        assert_eq!(
            result.meta.compatibility_factors["humor_alignment"],
            "Both love puns"
        );
        assert_eq!(result.meta.potential_concerns, "Different views on pets");
        assert_eq!(result.meta.candidate_profile, candidate().as_str());
    }

    #[test]
    fn test_assemble_fenced_reply_with_prose() {
        let reply = format!("Sure! ```json\n{}\n```", full_reply());
        let result = assemble(&reply, &candidate()).unwrap();
        assert_eq!(result.score, 82);
    }

    #[test]
    fn test_assemble_handles_braces_inside_strings() {
        let reply = r#"Result below.
{"score": 64, "summary": "She drew a {heart} on the napkin; he wrote }{ back.", "meta": {"potential_concerns": "none {really}"}}
Let me know if you want another {take}"#;

        // The last `}` belongs to the trailing prose, so the slice is not valid JSON.
        assert!(matches!(
            assemble(reply, &candidate()),
            Err(AppError::ResponseParse)
        ));

        let reply = r#"Result: {"score": 64, "summary": "She drew a {heart}; he wrote }{ back.", "meta": {"potential_concerns": "none {really}"}} Enjoy!"#;
        let result = assemble(reply, &candidate()).unwrap();
        assert_eq!(result.summary, "She drew a {heart}; he wrote }{ back.");
        assert_eq!(result.meta.potential_concerns, "none {really}");
    }

    #[test]
    fn test_missing_meta_is_filled_with_defaults() {
        let reply = r#"{"score": 55, "summary": "A pleasant, if quiet, evening."}"#;

        let result = assemble(reply, &candidate()).unwrap();
        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(value["meta"]["compatibility_factors"], json!({}));
        assert_eq!(value["meta"]["potential_concerns"], "");
        assert_eq!(value["meta"]["candidate_profile"], candidate().as_str());
    }

    #[test]
    fn test_partial_meta_is_completed() {
        let reply = r#"{"score": 55, "summary": "Fine.", "meta": {"potential_concerns": null}}"#;
        let result = assemble(reply, &candidate()).unwrap();
        assert!(result.meta.compatibility_factors.is_empty());
        assert_eq!(result.meta.potential_concerns, "");

        let reply = r#"{"score": 55, "summary": "Fine.", "meta": "n/a"}"#;
        let result = assemble(reply, &candidate()).unwrap();
        assert!(result.meta.compatibility_factors.is_empty());
    }

    #[test]
    fn test_model_candidate_profile_is_overwritten() {
        let reply = r#"{"score": 70, "summary": "Nice.", "meta": {"candidate_profile": "Someone else entirely"}}"#;
        let result = assemble(reply, &candidate()).unwrap();
        assert_eq!(result.meta.candidate_profile, candidate().as_str());
    }

    #[test]
    fn test_concern_list_is_joined() {
        let reply = r#"{"score": 70, "summary": "Nice.", "meta": {"potential_concerns": ["distance", "schedules"]}}"#;
        let result = assemble(reply, &candidate()).unwrap();
        assert_eq!(result.meta.potential_concerns, "distance; schedules");
    }

    #[test]
    fn test_gibberish_is_parse_error() {
        assert!(matches!(
            assemble("asdkjh qwe ??? lorem", &candidate()),
            Err(AppError::ResponseParse)
        ));
        assert!(matches!(
            assemble("", &candidate()),
            Err(AppError::ResponseParse)
        ));
    }

    #[test]
    fn test_non_object_json_is_parse_error() {
        assert!(matches!(
            assemble("[1, 2, 3]", &candidate()),
            Err(AppError::ResponseParse)
        ));
    }

    #[test]
    fn test_score_is_coerced_and_clamped() {
        for (score, expected) in [
            (json!(500), 100),
            (json!(0), 1),
            (json!(-20), 1),
            (json!(77.6), 78),
            (json!("64"), 64),
            (json!(" 91.2 "), 91),
        ] {
            let reply = json!({ "score": score, "summary": "ok" }).to_string();
            let result = assemble(&reply, &candidate()).unwrap();
            assert_eq!(result.score, expected, "score {score}");
        }
    }

    #[test]
    fn test_missing_or_unusable_score_is_parse_error() {
        for reply in [
            json!({ "summary": "ok" }),
            json!({ "score": "high", "summary": "ok" }),
            json!({ "score": null, "summary": "ok" }),
        ] {
            assert!(matches!(
                assemble(&reply.to_string(), &candidate()),
                Err(AppError::ResponseParse)
            ));
        }
    }

    #[test]
    fn test_empty_summary_is_parse_error() {
        for reply in [
            json!({ "score": 50, "summary": "   " }),
            json!({ "score": 50 }),
            json!({ "score": 50, "summary": 12 }),
        ] {
            assert!(matches!(
                assemble(&reply.to_string(), &candidate()),
                Err(AppError::ResponseParse)
            ));
        }
    }
}
