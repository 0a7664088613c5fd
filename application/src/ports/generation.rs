//! Text-generation port
//!
//! Defines the interface for the generative-AI collaborator. The orchestrator
//! only ever uses the per-specialty call shape: one prompt, one specialty
//! hint, one structured opinion back. Aggregation stays on our side, so there
//! is exactly one definition of the consensus level.

use aida_domain::{Confidence, SourceCitation};
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during a generation call
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Provider rejected the request: {0}")]
    Rejected(String),

    #[error("Response could not be interpreted: {0}")]
    MalformedResponse(String),

    #[error("Generation timed out")]
    Timeout,

    #[error("Other generation error: {0}")]
    Other(String),
}

/// One structured opinion returned by the provider
#[derive(Debug, Clone)]
pub struct GeneratedOpinion {
    pub opinion: String,
    pub reasoning: String,
    pub confidence: Confidence,
    pub sources: Vec<SourceCitation>,
}

impl GeneratedOpinion {
    /// Plain-text result with no structured fields: the whole text is the
    /// opinion, reasoning is empty, confidence takes the given default.
    pub fn plain(text: impl Into<String>, default_confidence: Confidence) -> Self {
        Self {
            opinion: text.into(),
            reasoning: String::new(),
            confidence: default_confidence,
            sources: Vec::new(),
        }
    }
}

/// Gateway to the text-generation provider
#[async_trait]
pub trait OpinionGenerator: Send + Sync {
    /// Generate one specialist opinion.
    ///
    /// `system` is the role preamble naming the specialty; `prompt` carries
    /// the patient identity and the clinical question; `specialty_hint` is
    /// the plain specialty label for providers that accept one out-of-band.
    async fn generate(
        &self,
        system: &str,
        prompt: &str,
        specialty_hint: &str,
    ) -> Result<GeneratedOpinion, GenerationError>;
}
