//! Profile Formatter: flattens a sign-up form and voice transcript into profile prose.
//!
//! The output becomes the `user_partner_profile` text, so it goes through the same
//! normalizer validation as a direct request.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Sign-up form fields, keyed by the front-end's camelCase names.
/// Values may be strings or numbers; blank strings count as absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct FormData(Map<String, Value>);

impl FormData {
    fn field(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// Request body of the form submission endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormSubmission {
    #[serde(default)]
    pub form_data: Option<FormData>,
    #[serde(default)]
    pub voice_transcript: Option<String>,
}

/// Builds a natural-language profile description. Returns an empty string when
/// neither the transcript nor the form carries anything usable.
pub fn format_profile_description(form: &FormData, voice_transcript: &str) -> String {
    let mut parts: Vec<String> = Vec::new();

    // Spoken answers first; they read most naturally.
    let transcript = voice_transcript.trim();
    if !transcript.is_empty() {
        parts.push(transcript.to_string());
    }

    let mut basic_info: Vec<String> = Vec::new();
    if let Some(age) = form.field("age") {
        basic_info.push(format!("{age} years old"));
    }
    let location = form.field("location");
    if let Some(location) = &location {
        basic_info.push(format!("lives in {location}"));
    }
    if let Some(hometown) = form.field("hometown") {
        if location.as_deref() != Some(hometown.as_str()) {
            basic_info.push(format!("from {hometown}"));
        }
    }
    if let Some(height) = form.field("height") {
        basic_info.push(format!("{height} tall"));
    }

    let mut career_info: Vec<String> = Vec::new();
    if let Some(job_title) = form.field("jobTitle") {
        match form.field("employer") {
            Some(employer) => career_info.push(format!("Works as a {job_title} at {employer}")),
            None => career_info.push(format!("Works as a {job_title}")),
        }
    }
    if let Some(education) = form.field("education") {
        career_info.push(format!("Has a {education}"));
    }
    if let Some(looking_for) = form.field("lookingFor") {
        career_info.push(format!("Looking for {}", looking_for.to_lowercase()));
    }

    let mut lifestyle: Vec<String> = Vec::new();
    for (key, verb) in [
        ("drinking", "drinks"),
        ("smoking", "smokes"),
        ("marijuana", "uses marijuana"),
    ] {
        if let Some(value) = form.field(key).filter(|v| v != "No") {
            lifestyle.push(format!("{verb} {}", value.to_lowercase()));
        }
    }
    if let Some(politics) = form.field("politics") {
        lifestyle.push(format!("politically {}", politics.to_lowercase()));
    }

    let mut family_info: Vec<String> = Vec::new();
    if let Some(want_children) = form.field("wantChildren").filter(|v| v != "Not sure") {
        family_info.push(format!("wants children: {}", want_children.to_lowercase()));
    }
    if form.field("haveChildren").as_deref() == Some("Yes") {
        family_info.push("has children".to_string());
    }

    if let Some(religion) = form.field("religion").filter(|v| v != "Prefer not to say") {
        let religion = religion.to_lowercase();
        match form.field("religionImportance").as_deref() {
            Some("Very important") => basic_info.push(format!("very religious ({religion})")),
            Some("Somewhat important") => {
                basic_info.push(format!("somewhat religious ({religion})"))
            }
            _ => {}
        }
    }

    for (group, separator) in [
        (basic_info, ", "),
        (career_info, ". "),
        (lifestyle, ", "),
        (family_info, ", "),
    ] {
        if !group.is_empty() {
            parts.push(format!("{}.", group.join(separator)));
        }
    }

    parts.join(" ").trim().to_string()
}
