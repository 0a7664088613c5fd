//! Agent selection policy: subscription-tier gating.
//!
//! [`SelectionPolicy`] captures the static rules that govern which agents a
//! caller may have selected at once. The policy is pure: given the current
//! selection, the tier, and a target agent, it answers allow or deny and
//! never mutates anything itself.

use super::kind::AgentKind;
use serde::{Deserialize, Serialize};

/// Subscription tier of the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    #[default]
    Free,
    Premium,
}

impl SubscriptionTier {
    pub fn is_premium(&self) -> bool {
        matches!(self, SubscriptionTier::Premium)
    }
}

/// A selectable agent as presented to the user (selection-time concept).
///
/// The premium flag starts from the kind's profile default but can be
/// overridden by external configuration, so it travels with the descriptor
/// rather than being re-derived at every check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub kind: AgentKind,
    pub display_name: String,
    pub is_premium: bool,
}

impl Agent {
    /// Build an agent from its kind, taking profile defaults
    pub fn from_kind(kind: AgentKind) -> Self {
        let profile = kind.profile();
        Self {
            kind,
            display_name: profile.display_name,
            is_premium: profile.premium_default,
        }
    }

    /// Override the premium flag (external configuration)
    pub fn with_premium(mut self, is_premium: bool) -> Self {
        self.is_premium = is_premium;
        self
    }
}

/// Outcome of evaluating a selection toggle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionDecision {
    /// The toggle is permitted
    Allow,
    /// The agent is premium-gated and the caller is on the free tier
    DenyPremium(AgentKind),
    /// Selecting would exceed the free-tier quota
    DenyQuota { max_free_agents: usize },
}

impl SelectionDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, SelectionDecision::Allow)
    }
}

/// Selection policy for the static tier constraints.
///
/// Deselecting is always allowed. Selecting is blocked when the agent is
/// premium-gated for a free-tier caller, or when the free-tier quota of
/// simultaneously selected agents would be exceeded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionPolicy {
    /// Caller's subscription tier
    pub tier: SubscriptionTier,
    /// Maximum simultaneous selections on the free tier
    pub max_free_agents: usize,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            tier: SubscriptionTier::Free,
            max_free_agents: 3,
        }
    }
}

impl SelectionPolicy {
    pub fn new(tier: SubscriptionTier, max_free_agents: usize) -> Self {
        Self {
            tier,
            max_free_agents,
        }
    }

    /// Evaluate selecting `target` on top of `current` selections.
    pub fn review_select(&self, current: &[Agent], target: &Agent) -> SelectionDecision {
        if self.tier.is_premium() {
            return SelectionDecision::Allow;
        }

        if target.is_premium {
            return SelectionDecision::DenyPremium(target.kind.clone());
        }

        if current.len() >= self.max_free_agents {
            return SelectionDecision::DenyQuota {
                max_free_agents: self.max_free_agents,
            };
        }

        SelectionDecision::Allow
    }

    /// Deselecting never fails, regardless of tier or quota state.
    pub fn review_deselect(&self, _current: &[Agent], _target: &Agent) -> SelectionDecision {
        SelectionDecision::Allow
    }

    /// Apply a toggle to a selection, returning the new selection or the
    /// denial. The input selection is never modified on deny.
    pub fn toggle(
        &self,
        current: &[Agent],
        target: &Agent,
    ) -> Result<Vec<Agent>, SelectionDecision> {
        if current.iter().any(|a| a.kind == target.kind) {
            let next = current
                .iter()
                .filter(|a| a.kind != target.kind)
                .cloned()
                .collect();
            return Ok(next);
        }

        match self.review_select(current, target) {
            SelectionDecision::Allow => {
                let mut next = current.to_vec();
                next.push(target.clone());
                Ok(next)
            }
            deny => Err(deny),
        }
    }
}
