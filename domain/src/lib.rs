//! Domain layer for aida-consult
//!
//! This crate contains the core business logic, entities, and value objects
//! for clinical AI consultations. It has no dependencies on infrastructure
//! or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Consultation
//!
//! A consultation is one clinical Q&A session tied to a patient reference.
//! It is opened `InProgress`, accumulates messages and per-specialty agent
//! contributions, and is finalized `Completed` with a consensus score and a
//! final recommendation.
//!
//! ## Agents
//!
//! An agent is a named medical specialty (cardiology, neurology, ...) used
//! to scope one generation request. The `central` agent plays the
//! orchestrator role and, when present, supplies the final recommendation.

pub mod agent;
pub mod consultation;
pub mod core;
pub mod patient;
pub mod prompt;

// Re-export commonly used types
pub use agent::{
    kind::{AgentKind, AgentProfile},
    selection::{Agent, SelectionDecision, SelectionPolicy, SubscriptionTier},
};
pub use consultation::{
    consensus::Consensus,
    contribution::{AgentContribution, Confidence, SourceCitation},
    entities::{
        Consultation, ConsultationId, ConsultationMessage, ConsultationStatus, FileRecord, Sender,
    },
};
pub use core::{
    error::DomainError,
    query::{ConsultationQuery, ConsultationRequest},
};
pub use patient::{PatientRef, SessionContext, UserIdentity};
pub use prompt::PromptTemplate;
