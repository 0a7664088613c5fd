//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// Both variants are request-validation failures and are raised before any
/// side effect occurs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Query text and symptom list are both empty")]
    EmptyRequest,

    #[error("No agents selected for consultation")]
    NoAgentsSelected,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            DomainError::EmptyRequest.to_string(),
            "Query text and symptom list are both empty"
        );
        assert_eq!(
            DomainError::NoAgentsSelected.to_string(),
            "No agents selected for consultation"
        );
    }
}
