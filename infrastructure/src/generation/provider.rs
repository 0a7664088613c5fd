//! Provider configuration
//!
//! One tagged union per provider shape instead of a free-form key/value
//! bag: a provider's required fields travel with its variant, so invalid
//! combinations cannot be represented at all.

use serde::{Deserialize, Serialize};

/// How a custom endpoint authenticates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    /// `Authorization: Bearer <key>`
    #[default]
    Bearer,
    /// `X-Api-Key: <key>`
    ApiKeyHeader,
    /// `?api_key=<key>` query parameter
    QueryParam,
}

/// Text-generation provider configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "lowercase")]
pub enum ProviderConfig {
    /// OpenAI-compatible chat completions
    OpenAi {
        model: String,
        /// Override for self-hosted OpenAI-compatible servers
        #[serde(default, skip_serializing_if = "Option::is_none")]
        base_url: Option<String>,
    },
    /// Azure OpenAI deployment
    Azure {
        resource: String,
        deployment: String,
        api_version: String,
    },
    /// Arbitrary JSON endpoint with a prompt template and a response path
    Custom {
        endpoint: String,
        /// Template with `{system}`, `{prompt}` and `{specialty}` markers
        prompt_template: String,
        /// Dot-separated path to the text field in the response JSON
        response_path: String,
        #[serde(default)]
        auth: AuthMode,
    },
}

impl ProviderConfig {
    /// The URL generation requests are sent to
    pub fn endpoint(&self) -> String {
        match self {
            ProviderConfig::OpenAi { base_url, .. } => format!(
                "{}/chat/completions",
                base_url
                    .as_deref()
                    .unwrap_or("https://api.openai.com/v1")
                    .trim_end_matches('/')
            ),
            ProviderConfig::Azure {
                resource,
                deployment,
                api_version,
            } => format!(
                "https://{resource}.openai.azure.com/openai/deployments/{deployment}/chat/completions?api-version={api_version}"
            ),
            ProviderConfig::Custom { endpoint, .. } => endpoint.clone(),
        }
    }

    /// Short label for logs
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderConfig::OpenAi { .. } => "openai",
            ProviderConfig::Azure { .. } => "azure",
            ProviderConfig::Custom { .. } => "custom",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openai_endpoint_default_and_override() {
        let config = ProviderConfig::OpenAi {
            model: "gpt-4.1".into(),
            base_url: None,
        };
        assert_eq!(
            config.endpoint(),
            "https://api.openai.com/v1/chat/completions"
        );

        let config = ProviderConfig::OpenAi {
            model: "local".into(),
            base_url: Some("http://localhost:8080/v1/".into()),
        };
        assert_eq!(config.endpoint(), "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn test_azure_endpoint() {
        let config = ProviderConfig::Azure {
            resource: "aida-eu".into(),
            deployment: "gpt-4".into(),
            api_version: "2024-06-01".into(),
        };
        assert!(config.endpoint().starts_with("https://aida-eu.openai.azure.com/"));
        assert!(config.endpoint().contains("api-version=2024-06-01"));
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
provider = "azure"
resource = "aida-eu"
deployment = "gpt-4"
api_version = "2024-06-01"
"#;
        let config: ProviderConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.kind(), "azure");
    }

    #[test]
    fn test_missing_fields_rejected() {
        // An azure block without a deployment cannot deserialize
        let toml_str = r#"
provider = "azure"
resource = "aida-eu"
api_version = "2024-06-01"
"#;
        assert!(toml::from_str::<ProviderConfig>(toml_str).is_err());
    }

    #[test]
    fn test_custom_auth_default() {
        let toml_str = r#"
provider = "custom"
endpoint = "https://gen.example.test/v1"
prompt_template = "{system}\n{prompt}"
response_path = "result.text"
"#;
        let config: ProviderConfig = toml::from_str(toml_str).unwrap();
        let ProviderConfig::Custom { auth, .. } = config else {
            panic!("expected custom provider");
        };
        assert_eq!(auth, AuthMode::Bearer);
    }
}
