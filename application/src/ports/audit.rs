//! Port for structured consultation audit logging.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the
//! consultation lifecycle in a machine-readable format (JSONL).

use serde_json::Value;

/// A structured audit event.
///
/// Each event has a type string and a JSON payload with event-specific
/// fields; implementations attach the timestamp when writing.
pub struct AuditEvent {
    /// Event type identifier (e.g., "consultation_started", "agent_completed").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl AuditEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for recording consultation lifecycle events.
///
/// The `log` method is synchronous and non-fallible; a failed audit write
/// must never disrupt the orchestration flow.
pub trait AuditLogger: Send + Sync {
    fn log(&self, event: AuditEvent);
}

/// No-op implementation for tests and when auditing is disabled.
pub struct NoAudit;

impl AuditLogger for NoAudit {
    fn log(&self, _event: AuditEvent) {}
}
