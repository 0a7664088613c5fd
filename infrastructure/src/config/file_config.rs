//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

use crate::generation::provider::ProviderConfig;
use aida_application::config::BehaviorConfig;
use aida_domain::{AgentKind, SubscriptionTier};
use serde::{Deserialize, Serialize};

/// Which store adapter to wire up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreMode {
    /// In-memory store; nothing survives the process
    #[default]
    Memory,
    /// REST client against the hosted backend
    Http,
}

/// Raw behavior configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBehaviorConfig {
    /// Per-agent generation timeout in seconds
    pub generation_timeout_secs: u64,
    /// Caller's subscription tier
    pub tier: SubscriptionTier,
    /// Free-tier cap on simultaneously selected agents
    pub max_free_agents: usize,
    /// Confidence assigned to unstructured provider responses
    pub default_confidence: u8,
}

impl Default for FileBehaviorConfig {
    fn default() -> Self {
        let defaults = BehaviorConfig::default();
        Self {
            generation_timeout_secs: defaults.generation_timeout_secs,
            tier: defaults.tier,
            max_free_agents: defaults.max_free_agents,
            default_confidence: defaults.default_confidence,
        }
    }
}

impl FileBehaviorConfig {
    /// Convert into the application-layer config
    pub fn to_behavior(&self) -> BehaviorConfig {
        BehaviorConfig {
            generation_timeout_secs: self.generation_timeout_secs,
            tier: self.tier,
            max_free_agents: self.max_free_agents,
            default_confidence: self.default_confidence,
        }
    }
}

/// Raw store configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStoreConfig {
    pub mode: StoreMode,
    /// Backend base URL, required in http mode
    pub base_url: Option<String>,
    /// Backend API key, required in http mode
    pub api_key: Option<String>,
}

/// Raw audit configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAuditConfig {
    pub enabled: bool,
    /// Path of the JSONL audit file; a default under the data dir when unset
    pub path: Option<String>,
}

/// Complete configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub behavior: FileBehaviorConfig,
    pub store: FileStoreConfig,
    pub audit: FileAuditConfig,
    /// Generation provider; required unless running with a scripted generator
    pub provider: Option<ProviderConfig>,
    /// Provider API key (can also come from AIDA_API_KEY via env merge)
    pub api_key: Option<String>,
    /// Agent identifiers queried when the CLI gets no --agent flags
    pub agents: Vec<String>,
}

impl FileConfig {
    /// Default agent roster, parsed; falls back to the domain default
    pub fn default_agents(&self) -> Vec<AgentKind> {
        if self.agents.is_empty() {
            return AgentKind::default_selection();
        }
        self.agents
            .iter()
            .map(|s| s.parse().expect("AgentKind::from_str is infallible"))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FileConfig::default();
        assert_eq!(config.behavior.generation_timeout_secs, 30);
        assert_eq!(config.behavior.max_free_agents, 3);
        assert_eq!(config.store.mode, StoreMode::Memory);
        assert!(!config.audit.enabled);
        assert!(config.provider.is_none());
        assert_eq!(
            config.default_agents(),
            vec![AgentKind::Central, AgentKind::General]
        );
    }

    #[test]
    fn test_parse_full_file() {
        let toml_str = r#"
agents = ["central", "cardiology", "oncology"]

[behavior]
generation_timeout_secs = 10
tier = "premium"

[store]
mode = "http"
base_url = "https://api.example.test"
api_key = "store-key"

[audit]
enabled = true
path = "/tmp/aida-audit.jsonl"

[provider]
provider = "openai"
model = "gpt-4.1"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.behavior.generation_timeout_secs, 10);
        assert!(config.behavior.tier.is_premium());
        // Unset keys keep their defaults
        assert_eq!(config.behavior.max_free_agents, 3);
        assert_eq!(config.store.mode, StoreMode::Http);
        assert!(config.audit.enabled);
        assert_eq!(
            config.default_agents(),
            vec![
                AgentKind::Central,
                AgentKind::Cardiology,
                AgentKind::Custom("oncology".into())
            ]
        );
        assert!(matches!(
            config.provider,
            Some(ProviderConfig::OpenAi { .. })
        ));
    }
}
