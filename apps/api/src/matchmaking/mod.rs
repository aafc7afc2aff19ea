// Date simulation engine.
// Implements: input normalization, candidate acquisition (generate or select),
// date simulation, and defensive assembly of the model's JSON reply.
// All LLM calls go through the `LanguageModel` trait; no direct HTTP calls here.

pub mod assembler;
pub mod candidate;
pub mod catalog;
pub mod formatter;
pub mod handlers;
pub mod models;
pub mod normalizer;
pub mod pipeline;
pub mod prompts;
pub mod simulator;

/// First `max_chars` characters of `text`, for log lines.
pub(crate) fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::preview;

    #[test]
    fn test_preview_respects_char_boundaries() {
        assert_eq!(preview("héllo world", 2), "hé");
        assert_eq!(preview("short", 200), "short");
        assert_eq!(preview("", 5), "");
    }
}
