//! Resume analysis operations built on the `generate_text` capability.
//!
//! Every operation follows the same shape: build a prompt, make one backend
//! call, recover JSON from the model output, and degrade to a defaulted
//! report when the output cannot be parsed. Backend failures propagate as
//! errors; malformed model output never does.

pub mod enhance;
pub mod feedback;
pub mod matching;
pub mod prompts;
pub mod report;
pub mod sections;

use serde::de::DeserializeOwned;

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

/// Recovers a JSON object from model output: tries the fenced/whole text
/// first, then the outermost `{ ... }` slice for prose-wrapped responses.
pub(crate) fn parse_json_object<T: DeserializeOwned>(text: &str) -> Option<T> {
    let text = strip_code_fences(text);
    if let Ok(parsed) = serde_json::from_str(text) {
        return Some(parsed);
    }

    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    serde_json::from_str(&text[start..=end]).ok()
}

/// Recovers a JSON array the same way, for list-shaped responses.
pub(crate) fn parse_json_array<T: DeserializeOwned>(text: &str) -> Option<Vec<T>> {
    let text = strip_code_fences(text);
    if let Ok(parsed) = serde_json::from_str(text) {
        return Some(parsed);
    }

    let start = text.find('[')?;
    let end = text.rfind(']')?;
    if end <= start {
        return None;
    }
    serde_json::from_str(&text[start..=end]).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_strip_code_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_code_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_code_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_code_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_code_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_code_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_parse_json_object_direct() {
        let parsed: Value = parse_json_object("{\"a\": 1}").unwrap();
        assert_eq!(parsed["a"], 1);
    }

    #[test]
    fn test_parse_json_object_wrapped_in_prose() {
        let parsed: Value =
            parse_json_object("Here is the analysis you asked for: {\"a\": 1}. Let me know!")
                .unwrap();
        assert_eq!(parsed["a"], 1);
    }

    #[test]
    fn test_parse_json_object_rejects_garbage() {
        assert!(parse_json_object::<Value>("no braces here").is_none());
        assert!(parse_json_object::<Value>("} backwards {").is_none());
    }

    #[test]
    fn test_parse_json_array_wrapped_in_prose() {
        let parsed: Vec<String> =
            parse_json_array("The keywords are: [\"rust\", \"tokio\"]").unwrap();
        assert_eq!(parsed, vec!["rust", "tokio"]);
    }
}
