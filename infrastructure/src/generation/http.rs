//! HTTP opinion generator
//!
//! One adapter for all three provider shapes. The request body and auth
//! header vary per [`ProviderConfig`] variant; the response is reduced to
//! its text and handed to the opinion parser.

use super::parsing::parse_opinion;
use super::provider::{AuthMode, ProviderConfig};
use aida_application::ports::generation::{GeneratedOpinion, GenerationError, OpinionGenerator};
use aida_domain::Confidence;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde_json::{Value, json};
use std::time::Duration;

/// Reqwest-based implementation of [`OpinionGenerator`]
pub struct HttpOpinionGenerator {
    client: Client,
    config: ProviderConfig,
    api_key: String,
    default_confidence: Confidence,
}

impl HttpOpinionGenerator {
    pub fn new(
        config: ProviderConfig,
        api_key: impl Into<String>,
    ) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| GenerationError::Other(e.to_string()))?;
        Ok(Self {
            client,
            config,
            api_key: api_key.into(),
            default_confidence: Confidence::new(75),
        })
    }

    pub fn with_default_confidence(mut self, confidence: Confidence) -> Self {
        self.default_confidence = confidence;
        self
    }

    fn build_request(&self, system: &str, prompt: &str, specialty_hint: &str) -> RequestBuilder {
        let endpoint = self.config.endpoint();
        match &self.config {
            ProviderConfig::OpenAi { model, .. } => self
                .client
                .post(endpoint)
                .bearer_auth(&self.api_key)
                .json(&json!({
                    "model": model,
                    "messages": [
                        {"role": "system", "content": system},
                        {"role": "user", "content": prompt},
                    ],
                })),
            ProviderConfig::Azure { .. } => self
                .client
                .post(endpoint)
                .header("api-key", &self.api_key)
                .json(&json!({
                    "messages": [
                        {"role": "system", "content": system},
                        {"role": "user", "content": prompt},
                    ],
                })),
            ProviderConfig::Custom {
                prompt_template,
                auth,
                ..
            } => {
                let rendered = prompt_template
                    .replace("{system}", system)
                    .replace("{prompt}", prompt)
                    .replace("{specialty}", specialty_hint);
                let builder = match auth {
                    AuthMode::Bearer => self.client.post(endpoint).bearer_auth(&self.api_key),
                    AuthMode::ApiKeyHeader => self
                        .client
                        .post(endpoint)
                        .header("X-Api-Key", &self.api_key),
                    AuthMode::QueryParam => self
                        .client
                        .post(endpoint)
                        .query(&[("api_key", self.api_key.as_str())]),
                };
                builder.json(&json!({ "prompt": rendered }))
            }
        }
    }

    fn extract_text(&self, body: &Value) -> Result<String, GenerationError> {
        let path: &str = match &self.config {
            ProviderConfig::OpenAi { .. } | ProviderConfig::Azure { .. } => {
                return body
                    .pointer("/choices/0/message/content")
                    .and_then(|v| v.as_str())
                    .map(str::to_string)
                    .ok_or_else(|| {
                        GenerationError::MalformedResponse(
                            "missing choices[0].message.content".into(),
                        )
                    });
            }
            ProviderConfig::Custom { response_path, .. } => response_path,
        };

        let mut cursor = body;
        for segment in path.split('.') {
            cursor = cursor.get(segment).ok_or_else(|| {
                GenerationError::MalformedResponse(format!("missing field {segment} in response"))
            })?;
        }
        cursor
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| GenerationError::MalformedResponse(format!("{path} is not text")))
    }
}

#[async_trait]
impl OpinionGenerator for HttpOpinionGenerator {
    async fn generate(
        &self,
        system: &str,
        prompt: &str,
        specialty_hint: &str,
    ) -> Result<GeneratedOpinion, GenerationError> {
        let response = self
            .build_request(system, prompt, specialty_hint)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::Timeout
                } else {
                    GenerationError::ConnectionError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Rejected(format!("{status}: {body}")));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;
        let text = self.extract_text(&body)?;

        Ok(parse_opinion(&text, self.default_confidence))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn custom_generator(response_path: &str) -> HttpOpinionGenerator {
        HttpOpinionGenerator::new(
            ProviderConfig::Custom {
                endpoint: "https://gen.example.test/v1".into(),
                prompt_template: "{system}\n{prompt}".into(),
                response_path: response_path.into(),
                auth: AuthMode::Bearer,
            },
            "test-key",
        )
        .unwrap()
    }

    #[test]
    fn test_extract_text_openai_shape() {
        let generator = HttpOpinionGenerator::new(
            ProviderConfig::OpenAi {
                model: "gpt-4.1".into(),
                base_url: None,
            },
            "k",
        )
        .unwrap();

        let body = json!({
            "choices": [{"message": {"content": "the opinion"}}]
        });
        assert_eq!(generator.extract_text(&body).unwrap(), "the opinion");

        let empty = json!({"choices": []});
        assert!(matches!(
            generator.extract_text(&empty),
            Err(GenerationError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_extract_text_custom_path() {
        let generator = custom_generator("result.text");
        let body = json!({"result": {"text": "custom opinion"}});
        assert_eq!(generator.extract_text(&body).unwrap(), "custom opinion");
    }

    #[test]
    fn test_extract_text_custom_missing_segment() {
        let generator = custom_generator("result.text");
        let body = json!({"result": {"other": 1}});
        assert!(matches!(
            generator.extract_text(&body),
            Err(GenerationError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_extract_text_custom_non_string() {
        let generator = custom_generator("result");
        let body = json!({"result": {"nested": true}});
        assert!(matches!(
            generator.extract_text(&body),
            Err(GenerationError::MalformedResponse(_))
        ));
    }
}
