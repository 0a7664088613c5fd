//! Consensus aggregation
//!
//! Turns a set of agent contributions into a single 0-100 consensus level
//! and a final recommendation. This is a pure function of its input: the
//! same contributions always produce the same consensus.
//!
//! Rules:
//! - duplicates from the same agent supersede each other (last wins),
//!   they are never summed;
//! - the level is the arithmetic mean of the surviving confidences,
//!   rounded half-up; no contributions means level 0;
//! - the recommendation comes from the `central` agent when it contributed,
//!   otherwise from the first contribution holding the highest confidence.

use super::contribution::AgentContribution;
use serde::{Deserialize, Serialize};

/// Placeholder recommendation when no contribution is available
pub const NO_RECOMMENDATION: &str = "No specialist opinions were collected for this consultation.";

/// Aggregated outcome of a consultation's contributions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consensus {
    /// Agreement/confidence score across contributions (0-100)
    pub level: u8,
    /// Final recommendation text
    pub recommendation: String,
}

impl Consensus {
    /// Aggregate contributions into a consensus.
    pub fn from_contributions(contributions: &[AgentContribution]) -> Self {
        let surviving = supersede_duplicates(contributions);

        if surviving.is_empty() {
            return Self {
                level: 0,
                recommendation: NO_RECOMMENDATION.to_string(),
            };
        }

        let sum: u32 = surviving.iter().map(|c| c.confidence.value() as u32).sum();
        let n = surviving.len() as u32;
        // Integer mean, rounded half-up
        let level = ((sum * 2 + n) / (2 * n)) as u8;

        let recommendation = surviving
            .iter()
            .find(|c| c.agent.is_central())
            .or_else(|| first_highest_confidence(&surviving))
            .map(|c| c.opinion.clone())
            .unwrap_or_else(|| NO_RECOMMENDATION.to_string());

        Self {
            level,
            recommendation,
        }
    }
}

/// The first contribution carrying the highest confidence. Ties go to the
/// earlier one, so the outcome does not depend on iteration quirks.
fn first_highest_confidence<'a>(
    contributions: &'a [&'a AgentContribution],
) -> Option<&'a &'a AgentContribution> {
    let mut best: Option<&&AgentContribution> = None;
    for candidate in contributions {
        match best {
            Some(current) if candidate.confidence <= current.confidence => {}
            _ => best = Some(candidate),
        }
    }
    best
}

/// Keep one contribution per agent: the last one submitted, at the position
/// the agent first appeared. Duplicates supersede, they do not stack.
fn supersede_duplicates(contributions: &[AgentContribution]) -> Vec<&AgentContribution> {
    let mut order: Vec<&AgentContribution> = Vec::new();

    for contribution in contributions {
        if let Some(slot) = order.iter_mut().find(|c| c.agent == contribution.agent) {
            *slot = contribution;
        } else {
            order.push(contribution);
        }
    }

    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::kind::AgentKind;
    use crate::consultation::contribution::Confidence;
    use crate::consultation::entities::ConsultationId;

    fn contribution(agent: AgentKind, confidence: u8, opinion: &str) -> AgentContribution {
        AgentContribution::new(
            ConsultationId::new("c-1"),
            agent,
            opinion,
            "reasoning",
            Confidence::new(confidence),
        )
    }

    #[test]
    fn test_level_is_rounded_mean() {
        // Mean of 85, 90, 70, 85 is 82.5 -> 83 with round half-up
        let contributions = vec![
            contribution(AgentKind::Central, 85, "central view"),
            contribution(AgentKind::Cardiology, 90, "cardio view"),
            contribution(AgentKind::Neurology, 70, "neuro view"),
            contribution(AgentKind::General, 85, "general view"),
        ];
        let consensus = Consensus::from_contributions(&contributions);
        assert_eq!(consensus.level, 83);
    }

    #[test]
    fn test_exact_mean_unchanged() {
        let contributions = vec![
            contribution(AgentKind::Cardiology, 80, "a"),
            contribution(AgentKind::Neurology, 90, "b"),
        ];
        assert_eq!(Consensus::from_contributions(&contributions).level, 85);
    }

    #[test]
    fn test_empty_input_is_placeholder() {
        let consensus = Consensus::from_contributions(&[]);
        assert_eq!(consensus.level, 0);
        assert_eq!(consensus.recommendation, NO_RECOMMENDATION);
    }

    #[test]
    fn test_central_supplies_recommendation() {
        let contributions = vec![
            contribution(AgentKind::Cardiology, 95, "cardio wins on confidence"),
            contribution(AgentKind::Central, 60, "central wins on role"),
        ];
        let consensus = Consensus::from_contributions(&contributions);
        assert_eq!(consensus.recommendation, "central wins on role");
    }

    #[test]
    fn test_highest_confidence_without_central() {
        let contributions = vec![
            contribution(AgentKind::General, 70, "general"),
            contribution(AgentKind::Cardiology, 92, "cardio"),
            contribution(AgentKind::Neurology, 81, "neuro"),
        ];
        let consensus = Consensus::from_contributions(&contributions);
        assert_eq!(consensus.recommendation, "cardio");
    }

    #[test]
    fn test_tie_break_is_first_highest() {
        let contributions = vec![
            contribution(AgentKind::General, 88, "first of the tied"),
            contribution(AgentKind::Cardiology, 88, "second of the tied"),
        ];
        let consensus = Consensus::from_contributions(&contributions);
        assert_eq!(consensus.recommendation, "first of the tied");
    }

    #[test]
    fn test_duplicates_supersede_not_sum() {
        let contributions = vec![
            contribution(AgentKind::Cardiology, 40, "early draft"),
            contribution(AgentKind::General, 80, "general"),
            contribution(AgentKind::Cardiology, 90, "final cardio"),
        ];
        let consensus = Consensus::from_contributions(&contributions);
        // Two agents survive: cardiology (90, superseded) and general (80)
        assert_eq!(consensus.level, 85);
        assert_eq!(consensus.recommendation, "final cardio");
    }

    #[test]
    fn test_all_fallbacks_yield_zero_level() {
        let fallbacks = vec![
            AgentContribution::fallback(ConsultationId::new("c-1"), AgentKind::Central),
            AgentContribution::fallback(ConsultationId::new("c-1"), AgentKind::Cardiology),
        ];
        let consensus = Consensus::from_contributions(&fallbacks);
        assert_eq!(consensus.level, 0);
        // Central fallback still supplies the recommendation text
        assert!(consensus.recommendation.contains("error occurred"));
    }

    #[test]
    fn test_determinism() {
        let contributions = vec![
            contribution(AgentKind::General, 70, "a"),
            contribution(AgentKind::Cardiology, 90, "b"),
        ];
        let first = Consensus::from_contributions(&contributions);
        let second = Consensus::from_contributions(&contributions);
        assert_eq!(first, second);
    }
}
