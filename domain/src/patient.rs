//! Patient and session identity value objects

use serde::{Deserialize, Serialize};

/// Reference to a patient: id plus display name (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientRef {
    pub id: String,
    pub display_name: String,
}

impl PatientRef {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }
}

impl std::fmt::Display for PatientRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.display_name, self.id)
    }
}

/// The authenticated user behind a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: String,
    pub email: String,
}

impl UserIdentity {
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
        }
    }
}

/// Explicit session state passed into the orchestrator at call time.
///
/// There is deliberately no global "current user"; whoever drives the
/// orchestrator supplies the session, which makes the unauthenticated path
/// testable without any UI plumbing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    user: Option<UserIdentity>,
}

impl SessionContext {
    /// A session with an authenticated user
    pub fn authenticated(user: UserIdentity) -> Self {
        Self { user: Some(user) }
    }

    /// A session with nobody signed in
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    /// Current user, if any
    pub fn user(&self) -> Option<&UserIdentity> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patient_display() {
        let p = PatientRef::new("p-1", "Grace Hopper");
        assert_eq!(p.to_string(), "Grace Hopper (p-1)");
    }

    #[test]
    fn test_session_context() {
        let anon = SessionContext::anonymous();
        assert!(!anon.is_authenticated());
        assert!(anon.user().is_none());

        let session =
            SessionContext::authenticated(UserIdentity::new("u-1", "dr.house@clinic.test"));
        assert!(session.is_authenticated());
        assert_eq!(session.user().unwrap().id, "u-1");
    }

    #[test]
    fn test_default_is_anonymous() {
        assert_eq!(SessionContext::default(), SessionContext::anonymous());
    }
}
