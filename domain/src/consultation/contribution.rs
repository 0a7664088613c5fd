//! Agent contribution value objects
//!
//! One specialist's persisted opinion for a consultation, plus the clamped
//! confidence score it carries. Contributions are immutable once created;
//! a later contribution from the same agent supersedes the earlier one for
//! consensus purposes (see [`super::consensus`]).

use crate::agent::kind::AgentKind;
use crate::consultation::entities::ConsultationId;
use serde::{Deserialize, Serialize};

/// Confidence score clamped to 0-100 (Value Object)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Confidence(u8);

impl Confidence {
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    /// Zero confidence, used by fallback contributions
    pub fn zero() -> Self {
        Self(0)
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl From<u8> for Confidence {
    fn from(value: u8) -> Self {
        Self::new(value)
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// A cited source backing an opinion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCitation {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl SourceCitation {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// One specialist agent's opinion for a consultation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentContribution {
    pub consultation_id: ConsultationId,
    pub agent: AgentKind,
    pub opinion: String,
    pub reasoning: String,
    pub confidence: Confidence,
    #[serde(default)]
    pub sources: Vec<SourceCitation>,
}

impl AgentContribution {
    pub fn new(
        consultation_id: ConsultationId,
        agent: AgentKind,
        opinion: impl Into<String>,
        reasoning: impl Into<String>,
        confidence: Confidence,
    ) -> Self {
        Self {
            consultation_id,
            agent,
            opinion: opinion.into(),
            reasoning: reasoning.into(),
            confidence,
            sources: Vec::new(),
        }
    }

    pub fn with_sources(mut self, sources: Vec<SourceCitation>) -> Self {
        self.sources = sources;
        self
    }

    /// The degraded placeholder substituted when generation fails for an
    /// agent: zero confidence, no sources, apology text.
    pub fn fallback(consultation_id: ConsultationId, agent: AgentKind) -> Self {
        let name = agent.profile().display_name;
        Self {
            consultation_id,
            agent,
            opinion: format!("An error occurred while {name} was processing this consultation."),
            reasoning: "The specialist could not be reached or did not respond in time."
                .to_string(),
            confidence: Confidence::zero(),
            sources: Vec::new(),
        }
    }

    /// Whether this is a degraded fallback rather than a real opinion
    pub fn is_fallback(&self) -> bool {
        self.confidence.value() == 0 && self.sources.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_clamped() {
        assert_eq!(Confidence::new(85).value(), 85);
        assert_eq!(Confidence::new(150).value(), 100);
        assert_eq!(Confidence::zero().value(), 0);
        assert_eq!(Confidence::from(200u8).value(), 100);
    }

    #[test]
    fn test_confidence_display() {
        assert_eq!(Confidence::new(72).to_string(), "72%");
    }

    #[test]
    fn test_fallback_contribution() {
        let fallback =
            AgentContribution::fallback(ConsultationId::new("c-1"), AgentKind::Cardiology);
        assert_eq!(fallback.confidence, Confidence::zero());
        assert!(fallback.sources.is_empty());
        assert!(fallback.opinion.contains("error occurred"));
        assert!(fallback.opinion.contains("Cardiology AI"));
        assert!(fallback.is_fallback());
    }

    #[test]
    fn test_citation_builder() {
        let citation = SourceCitation::new("AHA hypertension guideline")
            .with_url("https://example.test/guideline");
        assert_eq!(citation.title, "AHA hypertension guideline");
        assert!(citation.url.is_some());
    }

    #[test]
    fn test_contribution_serde_skips_empty_url() {
        let contribution = AgentContribution::new(
            ConsultationId::new("c-1"),
            AgentKind::General,
            "Rest and hydration.",
            "Symptoms are consistent with a viral infection.",
            Confidence::new(70),
        )
        .with_sources(vec![SourceCitation::new("UpToDate: viral URI")]);

        let json = serde_json::to_value(&contribution).unwrap();
        assert_eq!(json["agent"], "general");
        assert_eq!(json["confidence"], 70);
        assert!(json["sources"][0].get("url").is_none());
    }
}
