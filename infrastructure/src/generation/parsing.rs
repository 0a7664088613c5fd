//! Opinion response parsing
//!
//! Extracts a structured opinion from free-form model output. Models are
//! asked to answer with a JSON object, but they do not always comply, so
//! parsing is best-effort: no JSON means the whole text is the opinion and
//! the confidence falls back to a configured default.

use aida_application::ports::generation::GeneratedOpinion;
use aida_domain::{Confidence, SourceCitation};

/// Parse model output into a structured opinion.
///
/// Accepted JSON shape (all fields optional except `opinion`):
/// `{"opinion": "...", "reasoning": "...", "confidence": 85,
///   "sources": [{"title": "...", "url": "..."}]}`
pub fn parse_opinion(text: &str, default_confidence: Confidence) -> GeneratedOpinion {
    if let Some(start) = text.find('{')
        && let Some(end) = text[start..].rfind('}')
    {
        let json_str = &text[start..start + end + 1];
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(json_str)
            && let Some(opinion) = value.get("opinion").and_then(|v| v.as_str())
        {
            let reasoning = value
                .get("reasoning")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string();
            let confidence = value
                .get("confidence")
                .and_then(|v| v.as_u64())
                .map(|c| Confidence::new(c.min(100) as u8))
                .unwrap_or(default_confidence);
            let sources = value
                .get("sources")
                .and_then(|v| v.as_array())
                .map(|entries| entries.iter().filter_map(parse_source).collect())
                .unwrap_or_default();

            return GeneratedOpinion {
                opinion: opinion.to_string(),
                reasoning,
                confidence,
                sources,
            };
        }
    }

    GeneratedOpinion::plain(text.trim(), default_confidence)
}

fn parse_source(value: &serde_json::Value) -> Option<SourceCitation> {
    let title = value.get("title").and_then(|v| v.as_str())?;
    let mut citation = SourceCitation::new(title);
    if let Some(url) = value.get("url").and_then(|v| v.as_str()) {
        citation = citation.with_url(url);
    }
    Some(citation)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default() -> Confidence {
        Confidence::new(75)
    }

    #[test]
    fn test_structured_response() {
        let text = r#"Here is my assessment:
{"opinion": "Likely migraine.", "reasoning": "Pattern matches.", "confidence": 82,
 "sources": [{"title": "ICHD-3", "url": "https://ichd-3.test"}, {"title": "Local registry"}]}"#;
        let parsed = parse_opinion(text, default());
        assert_eq!(parsed.opinion, "Likely migraine.");
        assert_eq!(parsed.reasoning, "Pattern matches.");
        assert_eq!(parsed.confidence.value(), 82);
        assert_eq!(parsed.sources.len(), 2);
        assert_eq!(parsed.sources[0].url.as_deref(), Some("https://ichd-3.test"));
        assert!(parsed.sources[1].url.is_none());
    }

    #[test]
    fn test_plain_text_falls_back() {
        let parsed = parse_opinion("  Just plain prose, no JSON.  ", default());
        assert_eq!(parsed.opinion, "Just plain prose, no JSON.");
        assert_eq!(parsed.reasoning, "");
        assert_eq!(parsed.confidence.value(), 75);
        assert!(parsed.sources.is_empty());
    }

    #[test]
    fn test_json_without_opinion_falls_back() {
        let text = r#"{"score": 7}"#;
        let parsed = parse_opinion(text, default());
        assert_eq!(parsed.opinion, text);
        assert_eq!(parsed.confidence.value(), 75);
    }

    #[test]
    fn test_confidence_clamped() {
        let text = r#"{"opinion": "x", "confidence": 400}"#;
        let parsed = parse_opinion(text, default());
        assert_eq!(parsed.confidence.value(), 100);
    }
}
