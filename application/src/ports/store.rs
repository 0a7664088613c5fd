//! Consultation store port
//!
//! Defines the interface for the persistence collaborator: create/read/update
//! of consultation records, messages, contributions, and file attachments.
//! The store owns durable state; the orchestrator only sequences writes.

use aida_domain::{
    AgentContribution, Consultation, ConsultationId, ConsultationMessage, ConsultationQuery,
    FileRecord, PatientRef,
};
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// The referenced consultation does not exist. This is a hard
    /// referential failure, never degraded to a warning.
    #[error("Consultation not found: {0}")]
    NotFound(ConsultationId),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request rejected by store: {0}")]
    Rejected(String),

    #[error("Other store error: {0}")]
    Other(String),
}

impl StoreError {
    /// Whether this error means the record simply does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

/// Fields for creating a consultation record
#[derive(Debug, Clone)]
pub struct NewConsultation {
    /// The authenticated user opening the consultation
    pub user_id: String,
    pub patient: PatientRef,
    pub query: ConsultationQuery,
    pub symptoms: Vec<String>,
}

/// Persistence collaborator for consultations
///
/// Referential existence is the store's to enforce: message, contribution,
/// and file writes against an unknown consultation id must fail with
/// [`StoreError::NotFound`], never silently no-op.
#[async_trait]
pub trait ConsultationStore: Send + Sync {
    /// Create a consultation record with status in-progress
    async fn create_consultation(&self, fields: NewConsultation)
    -> Result<Consultation, StoreError>;

    /// Apply the completion outcome to an existing record
    async fn complete_consultation(
        &self,
        id: &ConsultationId,
        consensus_level: u8,
        recommendation: &str,
    ) -> Result<(), StoreError>;

    async fn get_consultation(&self, id: &ConsultationId) -> Result<Consultation, StoreError>;

    /// All consultations belonging to a user, newest first
    async fn list_consultations(&self, user_id: &str) -> Result<Vec<Consultation>, StoreError>;

    async fn add_message(&self, message: ConsultationMessage) -> Result<(), StoreError>;

    async fn list_messages(
        &self,
        id: &ConsultationId,
    ) -> Result<Vec<ConsultationMessage>, StoreError>;

    async fn add_contribution(&self, contribution: AgentContribution) -> Result<(), StoreError>;

    async fn list_contributions(
        &self,
        id: &ConsultationId,
    ) -> Result<Vec<AgentContribution>, StoreError>;

    /// Register an uploaded file against an existing consultation
    async fn upload_file(
        &self,
        id: &ConsultationId,
        file_name: &str,
        mime_type: &str,
        content: &[u8],
    ) -> Result<FileRecord, StoreError>;

    /// Files attached to a consultation
    async fn list_files(&self, id: &ConsultationId) -> Result<Vec<FileRecord>, StoreError>;
}
