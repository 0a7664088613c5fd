//! Consultation domain entities

use crate::agent::kind::AgentKind;
use crate::core::query::ConsultationQuery;
use crate::patient::PatientRef;
use serde::{Deserialize, Serialize};

/// Identifier of a consultation record, assigned by the store
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConsultationId(String);

impl ConsultationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ConsultationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ConsultationId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Lifecycle status of a consultation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConsultationStatus {
    InProgress,
    Completed,
}

impl ConsultationStatus {
    pub fn is_completed(&self) -> bool {
        matches!(self, ConsultationStatus::Completed)
    }
}

impl std::fmt::Display for ConsultationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConsultationStatus::InProgress => write!(f, "in-progress"),
            ConsultationStatus::Completed => write!(f, "completed"),
        }
    }
}

/// One clinical Q&A session tied to a patient (Entity)
///
/// Created `InProgress` when the user submits a first query; finalized
/// `Completed` with a consensus level and recommendation once aggregation
/// finishes. The core never deletes consultations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Consultation {
    pub id: ConsultationId,
    pub patient: PatientRef,
    pub query: ConsultationQuery,
    pub status: ConsultationStatus,
    /// Symptom strings carried over from the request, in submitted order
    #[serde(default)]
    pub symptoms: Vec<String>,
    /// Aggregate confidence score (0-100), set on completion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consensus_level: Option<u8>,
    /// Final recommendation text, set on completion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_recommendation: Option<String>,
}

impl Consultation {
    /// A freshly opened, in-progress consultation
    pub fn open(
        id: ConsultationId,
        patient: PatientRef,
        query: ConsultationQuery,
        symptoms: Vec<String>,
    ) -> Self {
        Self {
            id,
            patient,
            query,
            status: ConsultationStatus::InProgress,
            symptoms,
            consensus_level: None,
            final_recommendation: None,
        }
    }

    /// Mark the consultation completed with its consensus outcome.
    /// Last write wins; calling twice overwrites the previous outcome.
    pub fn complete(&mut self, consensus_level: u8, recommendation: impl Into<String>) {
        self.status = ConsultationStatus::Completed;
        self.consensus_level = Some(consensus_level.min(100));
        self.final_recommendation = Some(recommendation.into());
    }
}

/// Who produced a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

/// A single turn in the conversational record (Entity, append-only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsultationMessage {
    pub consultation_id: ConsultationId,
    pub sender: Sender,
    pub content: String,
    /// Specialty tag for AI replies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<AgentKind>,
}

impl ConsultationMessage {
    pub fn user(consultation_id: ConsultationId, content: impl Into<String>) -> Self {
        Self {
            consultation_id,
            sender: Sender::User,
            content: content.into(),
            agent: None,
        }
    }

    pub fn ai(
        consultation_id: ConsultationId,
        agent: AgentKind,
        content: impl Into<String>,
    ) -> Self {
        Self {
            consultation_id,
            sender: Sender::Ai,
            content: content.into(),
            agent: Some(agent),
        }
    }
}

/// An uploaded file associated with a consultation
///
/// `is_image` only drives presentation filtering (thumbnail grid vs.
/// document list); enforcement of size or content is the storage
/// service's responsibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: String,
    pub consultation_id: ConsultationId,
    pub file_name: String,
    pub file_path: String,
    pub mime_type: String,
    pub file_size: u64,
    pub is_image: bool,
}

impl FileRecord {
    /// Whether a MIME type counts as an image for presentation purposes
    pub fn mime_is_image(mime_type: &str) -> bool {
        mime_type.starts_with("image/")
    }
}
