//! In-memory consultation store
//!
//! Backs the offline mode and tests. Enforces the same referential
//! integrity as the hosted backend: message, contribution, and file writes
//! against an unknown consultation id fail with `NotFound`.

use aida_application::ports::store::{ConsultationStore, NewConsultation, StoreError};
use aida_domain::{
    AgentContribution, Consultation, ConsultationId, ConsultationMessage, FileRecord,
};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct MemoryState {
    consultations: HashMap<String, Consultation>,
    owners: HashMap<String, String>,
    messages: Vec<ConsultationMessage>,
    contributions: Vec<AgentContribution>,
    files: Vec<FileRecord>,
    next_id: u64,
}

impl MemoryState {
    fn require(&self, id: &ConsultationId) -> Result<(), StoreError> {
        if self.consultations.contains_key(id.as_str()) {
            Ok(())
        } else {
            Err(StoreError::NotFound(id.clone()))
        }
    }
}

/// In-memory implementation of [`ConsultationStore`]
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConsultationStore for MemoryStore {
    async fn create_consultation(
        &self,
        fields: NewConsultation,
    ) -> Result<Consultation, StoreError> {
        let mut state = self.state.write().await;
        state.next_id += 1;
        let id = ConsultationId::new(format!("consult-{:06}", state.next_id));
        let consultation =
            Consultation::open(id.clone(), fields.patient, fields.query, fields.symptoms);
        state
            .owners
            .insert(id.as_str().to_string(), fields.user_id);
        state
            .consultations
            .insert(id.as_str().to_string(), consultation.clone());
        Ok(consultation)
    }

    async fn complete_consultation(
        &self,
        id: &ConsultationId,
        consensus_level: u8,
        recommendation: &str,
    ) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        let record = state
            .consultations
            .get_mut(id.as_str())
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        record.complete(consensus_level, recommendation);
        Ok(())
    }

    async fn get_consultation(&self, id: &ConsultationId) -> Result<Consultation, StoreError> {
        let state = self.state.read().await;
        state
            .consultations
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    async fn list_consultations(&self, user_id: &str) -> Result<Vec<Consultation>, StoreError> {
        let state = self.state.read().await;
        let mut owned: Vec<Consultation> = state
            .consultations
            .values()
            .filter(|c| state.owners.get(c.id.as_str()).is_some_and(|o| o == user_id))
            .cloned()
            .collect();
        // Newest first; ids are monotonic
        owned.sort_by(|a, b| b.id.as_str().cmp(a.id.as_str()));
        Ok(owned)
    }

    async fn add_message(&self, message: ConsultationMessage) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        state.require(&message.consultation_id)?;
        state.messages.push(message);
        Ok(())
    }

    async fn list_messages(
        &self,
        id: &ConsultationId,
    ) -> Result<Vec<ConsultationMessage>, StoreError> {
        let state = self.state.read().await;
        state.require(id)?;
        Ok(state
            .messages
            .iter()
            .filter(|m| m.consultation_id == *id)
            .cloned()
            .collect())
    }

    async fn add_contribution(&self, contribution: AgentContribution) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        state.require(&contribution.consultation_id)?;
        state.contributions.push(contribution);
        Ok(())
    }

    async fn list_contributions(
        &self,
        id: &ConsultationId,
    ) -> Result<Vec<AgentContribution>, StoreError> {
        let state = self.state.read().await;
        state.require(id)?;
        Ok(state
            .contributions
            .iter()
            .filter(|c| c.consultation_id == *id)
            .cloned()
            .collect())
    }

    async fn upload_file(
        &self,
        id: &ConsultationId,
        file_name: &str,
        mime_type: &str,
        content: &[u8],
    ) -> Result<FileRecord, StoreError> {
        let mut state = self.state.write().await;
        state.require(id)?;
        state.next_id += 1;
        let record = FileRecord {
            id: format!("file-{:06}", state.next_id),
            consultation_id: id.clone(),
            file_name: file_name.to_string(),
            file_path: format!("memory://{}/{}", id, file_name),
            mime_type: mime_type.to_string(),
            file_size: content.len() as u64,
            is_image: FileRecord::mime_is_image(mime_type),
        };
        state.files.push(record.clone());
        Ok(record)
    }

    async fn list_files(&self, id: &ConsultationId) -> Result<Vec<FileRecord>, StoreError> {
        let state = self.state.read().await;
        state.require(id)?;
        Ok(state
            .files
            .iter()
            .filter(|f| f.consultation_id == *id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aida_domain::{
        AgentKind, ConsultationQuery, ConsultationRequest, PatientRef, Sender,
    };

    fn new_fields(user: &str) -> NewConsultation {
        let patient = PatientRef::new("p-1", "Ada");
        let query = ConsultationQuery::derive(
            &ConsultationRequest::FreeText("Why the headaches?".into()),
            &patient,
        )
        .unwrap();
        NewConsultation {
            user_id: user.to_string(),
            patient,
            query,
            symptoms: vec![],
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let store = MemoryStore::new();
        let created = store.create_consultation(new_fields("u-1")).await.unwrap();
        let fetched = store.get_consultation(&created.id).await.unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.patient.display_name, "Ada");
    }

    #[tokio::test]
    async fn test_referential_integrity() {
        let store = MemoryStore::new();
        let unknown = ConsultationId::new("consult-999999");

        let message = ConsultationMessage::user(unknown.clone(), "hello");
        assert!(store.add_message(message).await.unwrap_err().is_not_found());

        let upload = store.upload_file(&unknown, "scan.png", "image/png", b"...").await;
        assert!(upload.unwrap_err().is_not_found());

        assert!(
            store
                .get_consultation(&unknown)
                .await
                .unwrap_err()
                .is_not_found()
        );
    }

    #[tokio::test]
    async fn test_messages_scoped_to_consultation() {
        let store = MemoryStore::new();
        let a = store.create_consultation(new_fields("u-1")).await.unwrap();
        let b = store.create_consultation(new_fields("u-1")).await.unwrap();

        store
            .add_message(ConsultationMessage::user(a.id.clone(), "for a"))
            .await
            .unwrap();
        store
            .add_message(ConsultationMessage::ai(
                b.id.clone(),
                AgentKind::Central,
                "for b",
            ))
            .await
            .unwrap();

        let messages = store.list_messages(&a.id).await.unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender, Sender::User);
    }

    #[tokio::test]
    async fn test_list_consultations_by_owner_newest_first() {
        let store = MemoryStore::new();
        let first = store.create_consultation(new_fields("u-1")).await.unwrap();
        let second = store.create_consultation(new_fields("u-1")).await.unwrap();
        store.create_consultation(new_fields("u-2")).await.unwrap();

        let listed = store.list_consultations("u-1").await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[1].id, first.id);
    }

    #[tokio::test]
    async fn test_upload_flags_images() {
        let store = MemoryStore::new();
        let c = store.create_consultation(new_fields("u-1")).await.unwrap();

        let image = store
            .upload_file(&c.id, "scan.png", "image/png", b"png-bytes")
            .await
            .unwrap();
        assert!(image.is_image);
        assert_eq!(image.file_size, 9);

        let document = store
            .upload_file(&c.id, "report.pdf", "application/pdf", b"pdf")
            .await
            .unwrap();
        assert!(!document.is_image);

        assert_eq!(store.list_files(&c.id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_complete_updates_record() {
        let store = MemoryStore::new();
        let c = store.create_consultation(new_fields("u-1")).await.unwrap();
        store
            .complete_consultation(&c.id, 83, "See a cardiologist.")
            .await
            .unwrap();
        let fetched = store.get_consultation(&c.id).await.unwrap();
        assert!(fetched.status.is_completed());
        assert_eq!(fetched.consensus_level, Some(83));
    }
}
