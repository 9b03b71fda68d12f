//! Strip Markdown code fences from model replies

const FENCE: &str = "```";

/// Reply used when the model returns no text
pub const EMPTY_REPLY: &str = "{}";

/// Remove a surrounding Markdown code fence, if any
///
/// A language tag directly after the opening fence is dropped when it is
/// followed by whitespace or is `json`. Text without fences is only trimmed,
/// and an empty reply becomes `{}`.
pub fn strip_code_fences(text: &str) -> &str {
    let mut clean = text.trim();

    if let Some(rest) = clean.strip_prefix(FENCE) {
        clean = strip_language_tag(rest);
    }
    if let Some(rest) = clean.strip_suffix(FENCE) {
        clean = rest;
    }

    let clean = clean.trim();
    if clean.is_empty() { EMPTY_REPLY } else { clean }
}

fn strip_language_tag(text: &str) -> &str {
    let tag_len = text
        .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '+' | '.' | '-')))
        .unwrap_or(text.len());
    if tag_len == 0 {
        return text;
    }

    let (tag, rest) = text.split_at(tag_len);
    if tag.eq_ignore_ascii_case("json") || rest.starts_with(char::is_whitespace) {
        rest
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    const BODY: &str = r#"{"candidates":[{"symbol":"TCS","reason":"breakout"}]}"#;

    fn parsed(text: &str) -> Value {
        serde_json::from_str(strip_code_fences(text)).unwrap()
    }

    #[test]
    fn test_unfenced_text_is_trimmed() {
        assert_eq!(strip_code_fences(&format!("  {BODY}\n")), BODY);
    }

    #[test]
    fn test_fenced_variants_match_unwrapped() {
        let expected: Value = serde_json::from_str(BODY).unwrap();
        let variants = [
            format!("```json\n{BODY}\n```"),
            format!("```JSON\n{BODY}\n```"),
            format!("```\n{BODY}\n```"),
            format!("```{BODY}```"),
            format!("```javascript\n{BODY}\n```"),
            format!("```json{BODY}```"),
            format!("\n\n  ```json\n{BODY}\n```  \n"),
        ];
        for text in &variants {
            assert_eq!(parsed(text), expected, "variant: {text:?}");
        }
    }

    #[test]
    fn test_only_trailing_fence() {
        assert_eq!(strip_code_fences(&format!("{BODY}\n```")), BODY);
    }

    #[test]
    fn test_empty_reply_becomes_empty_object() {
        assert_eq!(strip_code_fences(""), "{}");
        assert_eq!(strip_code_fences("   \n"), "{}");
        assert_eq!(strip_code_fences("```json\n```"), "{}");
    }

    #[test]
    fn test_tag_like_prefix_without_whitespace_is_kept() {
        // an unknown tag glued to the body is left for the JSON parser to reject
        assert_eq!(strip_code_fences("```abc{}```"), "abc{}");
    }
}
