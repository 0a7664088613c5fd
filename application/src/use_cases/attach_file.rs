//! Attach File use case
//!
//! Associates an uploaded file with an existing consultation. Files cannot
//! be attached before the consultation record exists; size and content
//! enforcement belong to the storage service, not to this flow.

use crate::ports::store::{ConsultationStore, StoreError};
use crate::use_cases::run_consultation::ConsultError;
use aida_domain::{ConsultationId, FileRecord};
use std::sync::Arc;
use tracing::info;

/// Input for attaching one file
#[derive(Debug, Clone)]
pub struct AttachFileInput {
    pub consultation_id: ConsultationId,
    pub file_name: String,
    pub mime_type: String,
    pub content: Vec<u8>,
}

/// Use case for attaching files to a consultation
pub struct AttachFileUseCase<S: ConsultationStore + 'static> {
    store: Arc<S>,
}

impl<S: ConsultationStore + 'static> AttachFileUseCase<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Upload the file against an existing consultation.
    ///
    /// The consultation is looked up first so that a missing record fails
    /// with a not-found error rather than producing an orphan upload.
    pub async fn execute(&self, input: AttachFileInput) -> Result<FileRecord, ConsultError> {
        self.store.get_consultation(&input.consultation_id).await?;

        let record = self
            .store
            .upload_file(
                &input.consultation_id,
                &input.file_name,
                &input.mime_type,
                &input.content,
            )
            .await?;

        info!(
            consultation = %input.consultation_id,
            file = %record.file_name,
            is_image = record.is_image,
            "File attached"
        );

        Ok(record)
    }

    /// Files already attached, for presentation filtering
    pub async fn list(&self, id: &ConsultationId) -> Result<Vec<FileRecord>, StoreError> {
        self.store.list_files(id).await
    }
}
