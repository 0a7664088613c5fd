//! HTTP consultation store
//!
//! REST adapter for the hosted backend. One resource path per collection,
//! bearer-token auth, JSON bodies. The backend enforces referential
//! existence; this adapter maps its 404s to `StoreError::NotFound` so the
//! orchestrator sees the same taxonomy as with the in-memory store.

use aida_application::ports::store::{ConsultationStore, NewConsultation, StoreError};
use aida_domain::{
    AgentContribution, Consultation, ConsultationId, ConsultationMessage, FileRecord,
};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde_json::json;
use std::time::Duration;

/// REST implementation of [`ConsultationStore`]
pub struct HttpStore {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HttpStore {
    /// Create a store client against `base_url` (no trailing slash needed).
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| StoreError::Other(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.bearer_auth(&self.api_key)
    }

    async fn send_json<B: Serialize>(
        &self,
        builder: RequestBuilder,
        body: &B,
        id: Option<&ConsultationId>,
    ) -> Result<Response, StoreError> {
        let response = self
            .authed(builder)
            .json(body)
            .send()
            .await
            .map_err(|e| StoreError::ConnectionError(e.to_string()))?;
        Self::check_status(response, id).await
    }

    async fn check_status(
        response: Response,
        id: Option<&ConsultationId>,
    ) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::NOT_FOUND
            && let Some(id) = id
        {
            return Err(StoreError::NotFound(id.clone()));
        }
        let body = response.text().await.unwrap_or_default();
        Err(StoreError::Rejected(format!("{status}: {body}")))
    }

    async fn get_checked(
        &self,
        path: &str,
        id: Option<&ConsultationId>,
    ) -> Result<Response, StoreError> {
        let response = self
            .authed(self.client.get(self.url(path)))
            .send()
            .await
            .map_err(|e| StoreError::ConnectionError(e.to_string()))?;
        Self::check_status(response, id).await
    }

    async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, StoreError> {
        response
            .json::<T>()
            .await
            .map_err(|e| StoreError::Other(format!("malformed store response: {e}")))
    }
}

#[async_trait]
impl ConsultationStore for HttpStore {
    async fn create_consultation(
        &self,
        fields: NewConsultation,
    ) -> Result<Consultation, StoreError> {
        let body = json!({
            "user_id": fields.user_id,
            "patient": fields.patient,
            "query": fields.query,
            "symptoms": fields.symptoms,
            "status": "in-progress",
        });
        let response = self
            .send_json(self.client.post(self.url("/consultations")), &body, None)
            .await?;
        Self::decode(response).await
    }

    async fn complete_consultation(
        &self,
        id: &ConsultationId,
        consensus_level: u8,
        recommendation: &str,
    ) -> Result<(), StoreError> {
        let body = json!({
            "status": "completed",
            "consensus_level": consensus_level,
            "final_recommendation": recommendation,
        });
        let path = format!("/consultations/{id}");
        self.send_json(self.client.patch(self.url(&path)), &body, Some(id))
            .await?;
        Ok(())
    }

    async fn get_consultation(&self, id: &ConsultationId) -> Result<Consultation, StoreError> {
        let path = format!("/consultations/{id}");
        let response = self.get_checked(&path, Some(id)).await?;
        Self::decode(response).await
    }

    async fn list_consultations(&self, user_id: &str) -> Result<Vec<Consultation>, StoreError> {
        let path = format!("/consultations?user_id={user_id}&order=created_at.desc");
        let response = self.get_checked(&path, None).await?;
        Self::decode(response).await
    }

    async fn add_message(&self, message: ConsultationMessage) -> Result<(), StoreError> {
        let path = format!("/consultations/{}/messages", message.consultation_id);
        let id = message.consultation_id.clone();
        self.send_json(self.client.post(self.url(&path)), &message, Some(&id))
            .await?;
        Ok(())
    }

    async fn list_messages(
        &self,
        id: &ConsultationId,
    ) -> Result<Vec<ConsultationMessage>, StoreError> {
        let path = format!("/consultations/{id}/messages");
        let response = self.get_checked(&path, Some(id)).await?;
        Self::decode(response).await
    }

    async fn add_contribution(&self, contribution: AgentContribution) -> Result<(), StoreError> {
        let path = format!("/consultations/{}/contributions", contribution.consultation_id);
        let id = contribution.consultation_id.clone();
        self.send_json(self.client.post(self.url(&path)), &contribution, Some(&id))
            .await?;
        Ok(())
    }

    async fn list_contributions(
        &self,
        id: &ConsultationId,
    ) -> Result<Vec<AgentContribution>, StoreError> {
        let path = format!("/consultations/{id}/contributions");
        let response = self.get_checked(&path, Some(id)).await?;
        Self::decode(response).await
    }

    async fn upload_file(
        &self,
        id: &ConsultationId,
        file_name: &str,
        mime_type: &str,
        content: &[u8],
    ) -> Result<FileRecord, StoreError> {
        let path = format!("/consultations/{id}/files?name={file_name}");
        let response = self
            .authed(self.client.post(self.url(&path)))
            .header(reqwest::header::CONTENT_TYPE, mime_type)
            .body(content.to_vec())
            .send()
            .await
            .map_err(|e| StoreError::ConnectionError(e.to_string()))?;
        let response = Self::check_status(response, Some(id)).await?;
        Self::decode(response).await
    }

    async fn list_files(&self, id: &ConsultationId) -> Result<Vec<FileRecord>, StoreError> {
        let path = format!("/consultations/{id}/files");
        let response = self.get_checked(&path, Some(id)).await?;
        Self::decode(response).await
    }
}
