//! Application layer for aida-consult
//!
//! This crate contains use cases, port definitions, and application
//! configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::BehaviorConfig;
pub use ports::{
    audit::{AuditEvent, AuditLogger, NoAudit},
    generation::{GeneratedOpinion, GenerationError, OpinionGenerator},
    progress::{ConsultationPhase, ConsultationProgress, NoProgress},
    store::{ConsultationStore, NewConsultation, StoreError},
};
pub use use_cases::attach_file::{AttachFileInput, AttachFileUseCase};
pub use use_cases::run_consultation::{
    ConsultError, ConsultationHandle, ConsultationOutcome, RunConsultationInput,
    RunConsultationUseCase, TurnOutcome,
};
