//! Consultation query value object
//!
//! The effective query string sent to every specialist agent. It is derived
//! from whichever input the user actually provided: free text, a symptom
//! list, or an explicit request for a whole-patient overview.

use crate::core::error::DomainError;
use crate::patient::PatientRef;
use serde::{Deserialize, Serialize};

/// What the user submitted to open a consultation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsultationRequest {
    /// A free-text clinical question
    FreeText(String),
    /// A list of observed symptoms, no free text
    Symptoms(Vec<String>),
    /// An explicit request to analyze the patient as a whole
    PatientOverview,
}

impl ConsultationRequest {
    /// Symptom strings carried by this request (empty unless `Symptoms`)
    pub fn symptoms(&self) -> &[String] {
        match self {
            ConsultationRequest::Symptoms(list) => list,
            _ => &[],
        }
    }
}

/// The effective, non-empty query string for a consultation (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsultationQuery {
    content: String,
}

impl ConsultationQuery {
    /// Derive the effective query from a request.
    ///
    /// - free text is used verbatim (trimmed);
    /// - symptoms become `"Patient with the following symptoms: ..."`;
    /// - a patient overview becomes `"Analyze patient {name} ({id})"`.
    ///
    /// An empty free text or an empty symptom list is rejected before any
    /// side effect can occur.
    pub fn derive(request: &ConsultationRequest, patient: &PatientRef) -> Result<Self, DomainError> {
        let content = match request {
            ConsultationRequest::FreeText(text) => {
                let text = text.trim();
                if text.is_empty() {
                    return Err(DomainError::EmptyRequest);
                }
                text.to_string()
            }
            ConsultationRequest::Symptoms(list) => {
                let list: Vec<&str> = list
                    .iter()
                    .map(|s| s.trim())
                    .filter(|s| !s.is_empty())
                    .collect();
                if list.is_empty() {
                    return Err(DomainError::EmptyRequest);
                }
                format!("Patient with the following symptoms: {}", list.join(", "))
            }
            ConsultationRequest::PatientOverview => {
                format!("Analyze patient {} ({})", patient.display_name, patient.id)
            }
        };

        Ok(Self { content })
    }

    /// Get the query content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for ConsultationQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}
