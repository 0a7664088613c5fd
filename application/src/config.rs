//! Application behavior configuration

use aida_domain::{SelectionPolicy, SubscriptionTier};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Behavior knobs for the consultation orchestrator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehaviorConfig {
    /// Per-agent generation timeout in seconds; expiry degrades that agent
    /// to a fallback contribution rather than failing the consultation
    pub generation_timeout_secs: u64,
    /// Caller's subscription tier
    pub tier: SubscriptionTier,
    /// Free-tier cap on simultaneously selected agents
    pub max_free_agents: usize,
    /// Confidence assigned when the provider returns unstructured text
    pub default_confidence: u8,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            generation_timeout_secs: 30,
            tier: SubscriptionTier::Free,
            max_free_agents: 3,
            default_confidence: 75,
        }
    }
}

impl BehaviorConfig {
    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }

    /// The selection policy this configuration implies
    pub fn selection_policy(&self) -> SelectionPolicy {
        SelectionPolicy::new(self.tier, self.max_free_agents)
    }
}
