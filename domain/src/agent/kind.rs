//! Agent kind value object
//!
//! Every specialty an agent can represent lives in this one enum, and every
//! piece of per-specialty data (display name, prompt label, premium gating)
//! comes from the single [`AgentProfile`] table here. Nothing else in the
//! workspace is allowed to switch on specialty strings.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A specialist agent kind (Value Object)
///
/// The `Central` agent plays the orchestrator role: when it contributes, its
/// opinion becomes the final recommendation. `Custom` carries externally
/// configured specialties that are not part of the built-in roster.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AgentKind {
    Central,
    Cardiology,
    Neurology,
    Radiology,
    General,
    Custom(String),
}

/// Canonical per-specialty data, looked up via [`AgentKind::profile`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentProfile {
    /// Human-readable name shown in output
    pub display_name: String,
    /// Specialty label used when building the generation prompt
    pub specialty_label: String,
    /// Whether this agent is premium-gated by default
    pub premium_default: bool,
}

impl AgentKind {
    /// Get the string identifier for this agent kind
    pub fn as_str(&self) -> &str {
        match self {
            AgentKind::Central => "central",
            AgentKind::Cardiology => "cardiology",
            AgentKind::Neurology => "neurology",
            AgentKind::Radiology => "radiology",
            AgentKind::General => "general",
            AgentKind::Custom(s) => s,
        }
    }

    /// The canonical profile for this kind
    pub fn profile(&self) -> AgentProfile {
        let (display_name, specialty_label, premium_default) = match self {
            AgentKind::Central => ("AIDA Central", "general medical orchestration", false),
            AgentKind::Cardiology => ("Cardiology AI", "cardiology", true),
            AgentKind::Neurology => ("Neurology AI", "neurology", true),
            AgentKind::Radiology => ("Radiology AI", "radiology", true),
            AgentKind::General => ("General Medicine AI", "general medicine", false),
            AgentKind::Custom(name) => {
                return AgentProfile {
                    display_name: name.clone(),
                    specialty_label: name.clone(),
                    premium_default: true,
                };
            }
        };
        AgentProfile {
            display_name: display_name.to_string(),
            specialty_label: specialty_label.to_string(),
            premium_default,
        }
    }

    /// Whether this is the orchestrator-role agent
    pub fn is_central(&self) -> bool {
        matches!(self, AgentKind::Central)
    }

    /// The built-in roster, in canonical display order
    pub fn builtin() -> Vec<AgentKind> {
        vec![
            AgentKind::Central,
            AgentKind::Cardiology,
            AgentKind::Neurology,
            AgentKind::Radiology,
            AgentKind::General,
        ]
    }

    /// Default agents queried when the caller does not pick any
    pub fn default_selection() -> Vec<AgentKind> {
        vec![AgentKind::Central, AgentKind::General]
    }
}

impl std::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AgentKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "central" => AgentKind::Central,
            "cardiology" => AgentKind::Cardiology,
            "neurology" => AgentKind::Neurology,
            "radiology" => AgentKind::Radiology,
            "general" => AgentKind::General,
            other => AgentKind::Custom(other.to_string()),
        })
    }
}

impl Serialize for AgentKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AgentKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(s.parse().expect("AgentKind::from_str is infallible"))
    }
}
