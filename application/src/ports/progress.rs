//! Progress notification port
//!
//! Defines the interface for reporting progress during a consultation run.

use aida_domain::AgentKind;

/// Phases of one consultation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsultationPhase {
    /// Opening the record and persisting the user's turn
    Intake,
    /// Fan-out of specialist generation calls
    Analysis,
    /// Aggregation and finalization
    Consensus,
}

impl ConsultationPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsultationPhase::Intake => "intake",
            ConsultationPhase::Analysis => "analysis",
            ConsultationPhase::Consensus => "consensus",
        }
    }
}

/// Callback for progress updates during consultation execution
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console, progress bars, etc.)
pub trait ConsultationProgress: Send + Sync {
    /// Called when a phase starts
    fn on_phase_start(&self, phase: ConsultationPhase, total_tasks: usize);

    /// Called when one agent's generation completes within the analysis phase
    fn on_agent_complete(&self, agent: &AgentKind, success: bool);

    /// Called when a phase completes
    fn on_phase_complete(&self, phase: ConsultationPhase);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ConsultationProgress for NoProgress {
    fn on_phase_start(&self, _phase: ConsultationPhase, _total_tasks: usize) {}
    fn on_agent_complete(&self, _agent: &AgentKind, _success: bool) {}
    fn on_phase_complete(&self, _phase: ConsultationPhase) {}
}
