//! Run Consultation use case
//!
//! Drives one consultation from a user query to a completed,
//! consensus-scored recommendation: open the record, persist the user's
//! turn, fan out one generation call per selected agent, aggregate the
//! contributions, and finalize the record.

use crate::config::BehaviorConfig;
use crate::ports::audit::{AuditEvent, AuditLogger, NoAudit};
use crate::ports::generation::{GenerationError, OpinionGenerator};
use crate::ports::progress::{ConsultationPhase, ConsultationProgress, NoProgress};
use crate::ports::store::{ConsultationStore, NewConsultation, StoreError};
use aida_domain::{
    AgentContribution, AgentKind, Consensus, Consultation, ConsultationId, ConsultationMessage,
    ConsultationQuery, ConsultationRequest, DomainError, PatientRef, PromptTemplate,
    SessionContext,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Errors that can escape the consultation flow
///
/// Per-agent generation failures never appear here: they degrade to
/// fallback contributions inside the analysis phase.
#[derive(Error, Debug)]
pub enum ConsultError {
    #[error("No user is signed in")]
    Unauthenticated,

    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] DomainError),

    #[error("Consultation not found: {0}")]
    ConsultationNotFound(ConsultationId),

    #[error("Store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for ConsultError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ConsultError::ConsultationNotFound(id),
            other => ConsultError::Store(other),
        }
    }
}

/// Handle to an opened consultation, carried between operations
#[derive(Debug, Clone)]
pub struct ConsultationHandle {
    pub id: ConsultationId,
    pub patient: PatientRef,
    pub query: ConsultationQuery,
}

/// Whether a conversational turn reached durable storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The message was persisted
    Persisted,
    /// Persistence failed; the conversation continues from memory
    Unsaved,
}

/// Input for the full consultation flow
#[derive(Debug, Clone)]
pub struct RunConsultationInput {
    pub session: SessionContext,
    pub patient: PatientRef,
    pub request: ConsultationRequest,
    pub agents: Vec<AgentKind>,
}

impl RunConsultationInput {
    pub fn new(
        session: SessionContext,
        patient: PatientRef,
        request: ConsultationRequest,
        agents: Vec<AgentKind>,
    ) -> Self {
        Self {
            session,
            patient,
            request,
            agents,
        }
    }
}

/// Result of a completed consultation run
#[derive(Debug, Clone)]
pub struct ConsultationOutcome {
    pub consultation: Consultation,
    pub contributions: Vec<AgentContribution>,
    pub consensus: Consensus,
}

/// Use case for running a consultation
pub struct RunConsultationUseCase<S, G>
where
    S: ConsultationStore + 'static,
    G: OpinionGenerator + 'static,
{
    store: Arc<S>,
    generator: Arc<G>,
    audit: Arc<dyn AuditLogger>,
    behavior: BehaviorConfig,
}

impl<S, G> RunConsultationUseCase<S, G>
where
    S: ConsultationStore + 'static,
    G: OpinionGenerator + 'static,
{
    pub fn new(store: Arc<S>, generator: Arc<G>) -> Self {
        Self {
            store,
            generator,
            audit: Arc::new(NoAudit),
            behavior: BehaviorConfig::default(),
        }
    }

    pub fn with_audit(mut self, audit: Arc<dyn AuditLogger>) -> Self {
        self.audit = audit;
        self
    }

    pub fn with_behavior(mut self, behavior: BehaviorConfig) -> Self {
        self.behavior = behavior;
        self
    }

    /// Open a consultation record.
    ///
    /// Rejects before any side effect when nobody is signed in, when the
    /// request is empty, or when no agents are selected. On success exactly
    /// one store write has happened and the record is in-progress.
    pub async fn start(
        &self,
        session: &SessionContext,
        patient: PatientRef,
        request: &ConsultationRequest,
        agents: &[AgentKind],
    ) -> Result<ConsultationHandle, ConsultError> {
        let Some(user) = session.user() else {
            return Err(ConsultError::Unauthenticated);
        };

        if agents.is_empty() {
            return Err(ConsultError::InvalidRequest(DomainError::NoAgentsSelected));
        }

        let query = ConsultationQuery::derive(request, &patient)?;

        let consultation = self
            .store
            .create_consultation(NewConsultation {
                user_id: user.id.clone(),
                patient: patient.clone(),
                query: query.clone(),
                symptoms: request.symptoms().to_vec(),
            })
            .await?;

        info!(
            consultation = %consultation.id,
            patient = %patient.id,
            "Consultation opened"
        );
        self.audit.log(AuditEvent::new(
            "consultation_started",
            json!({
                "consultation_id": consultation.id.as_str(),
                "patient_id": patient.id,
                "query": query.content(),
                "agents": agents.iter().map(|a| a.as_str().to_string()).collect::<Vec<_>>(),
            }),
        ));

        Ok(ConsultationHandle {
            id: consultation.id,
            patient,
            query,
        })
    }

    /// Append the user's turn to the conversational record.
    ///
    /// An unknown consultation id is a hard error; any other persistence
    /// failure degrades to [`TurnOutcome::Unsaved`] with a warning so the
    /// visible conversation keeps flowing.
    pub async fn record_user_turn(
        &self,
        handle: &ConsultationHandle,
        text: &str,
    ) -> Result<TurnOutcome, ConsultError> {
        let message = ConsultationMessage::user(handle.id.clone(), text);

        match self.store.add_message(message).await {
            Ok(()) => {
                self.audit.log(AuditEvent::new(
                    "user_turn_recorded",
                    json!({ "consultation_id": handle.id.as_str() }),
                ));
                Ok(TurnOutcome::Persisted)
            }
            Err(StoreError::NotFound(id)) => Err(ConsultError::ConsultationNotFound(id)),
            Err(e) => {
                warn!(consultation = %handle.id, "User turn not saved: {}", e);
                Ok(TurnOutcome::Unsaved)
            }
        }
    }

    /// Fan out one generation call per agent and persist the results.
    ///
    /// Calls run concurrently, each under the configured timeout. A failing
    /// or timed-out agent yields the fixed fallback contribution and never
    /// blocks the others. Contributions come back in the order agents were
    /// requested; order does not imply ranking.
    pub async fn collect_opinions(
        &self,
        handle: &ConsultationHandle,
        agents: &[AgentKind],
        progress: &dyn ConsultationProgress,
    ) -> Result<Vec<AgentContribution>, ConsultError> {
        progress.on_phase_start(ConsultationPhase::Analysis, agents.len());

        let mut join_set = JoinSet::new();

        for (index, agent) in agents.iter().cloned().enumerate() {
            let generator = Arc::clone(&self.generator);
            let system = PromptTemplate::specialty_system(&agent);
            let prompt = PromptTemplate::specialty_query(&agent, &handle.patient, &handle.query);
            let hint = agent.profile().specialty_label;
            let timeout = self.behavior.generation_timeout();

            join_set.spawn(async move {
                let result =
                    match tokio::time::timeout(timeout, generator.generate(&system, &prompt, &hint))
                        .await
                    {
                        Ok(result) => result,
                        Err(_) => Err(GenerationError::Timeout),
                    };
                (index, agent, result)
            });
        }

        // Reassemble in requested order regardless of completion order
        let mut slots: Vec<Option<AgentContribution>> = vec![None; agents.len()];

        while let Some(joined) = join_set.join_next().await {
            let Ok((index, agent, result)) = joined else {
                warn!("Agent task join error: {:?}", joined.err());
                continue;
            };

            let contribution = match result {
                Ok(generated) => {
                    info!(agent = %agent, "Agent responded");
                    progress.on_agent_complete(&agent, true);
                    AgentContribution::new(
                        handle.id.clone(),
                        agent,
                        generated.opinion,
                        generated.reasoning,
                        generated.confidence,
                    )
                    .with_sources(generated.sources)
                }
                Err(e) => {
                    warn!(agent = %agent, "Agent failed: {}", e);
                    progress.on_agent_complete(&agent, false);
                    AgentContribution::fallback(handle.id.clone(), agent)
                }
            };

            slots[index] = Some(contribution);
        }

        let contributions: Vec<AgentContribution> = slots.into_iter().flatten().collect();

        // Persist each contribution and its AI message only after its own
        // generation has resolved. Not-found is referential and hard; any
        // other store failure degrades to a warning.
        for contribution in &contributions {
            self.persist_contribution(handle, contribution).await?;
        }

        progress.on_phase_complete(ConsultationPhase::Analysis);
        Ok(contributions)
    }

    async fn persist_contribution(
        &self,
        handle: &ConsultationHandle,
        contribution: &AgentContribution,
    ) -> Result<(), ConsultError> {
        if let Err(e) = self.store.add_contribution(contribution.clone()).await {
            if e.is_not_found() {
                return Err(e.into());
            }
            warn!(
                consultation = %handle.id,
                agent = %contribution.agent,
                "Contribution not saved: {}", e
            );
        }

        let message = ConsultationMessage::ai(
            handle.id.clone(),
            contribution.agent.clone(),
            contribution.opinion.clone(),
        );
        if let Err(e) = self.store.add_message(message).await {
            if e.is_not_found() {
                return Err(e.into());
            }
            warn!(
                consultation = %handle.id,
                agent = %contribution.agent,
                "AI message not saved: {}", e
            );
        }

        self.audit.log(AuditEvent::new(
            "agent_completed",
            json!({
                "consultation_id": handle.id.as_str(),
                "agent": contribution.agent.as_str(),
                "confidence": contribution.confidence.value(),
                "fallback": contribution.is_fallback(),
            }),
        ));

        Ok(())
    }

    /// Apply the consensus outcome: status completed, level, recommendation.
    ///
    /// Idempotent last-write-wins; calling twice overwrites but is not
    /// expected behavior.
    pub async fn finalize(
        &self,
        handle: &ConsultationHandle,
        consensus: &Consensus,
    ) -> Result<(), ConsultError> {
        self.store
            .complete_consultation(&handle.id, consensus.level, &consensus.recommendation)
            .await?;

        info!(
            consultation = %handle.id,
            level = consensus.level,
            "Consultation completed"
        );
        self.audit.log(AuditEvent::new(
            "consultation_finalized",
            json!({
                "consultation_id": handle.id.as_str(),
                "consensus_level": consensus.level,
            }),
        ));

        Ok(())
    }

    /// The full flow: start, record the user's turn, collect opinions,
    /// compute consensus, finalize.
    pub async fn execute(
        &self,
        input: RunConsultationInput,
    ) -> Result<ConsultationOutcome, ConsultError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the full flow with progress callbacks.
    pub async fn execute_with_progress(
        &self,
        input: RunConsultationInput,
        progress: &dyn ConsultationProgress,
    ) -> Result<ConsultationOutcome, ConsultError> {
        progress.on_phase_start(ConsultationPhase::Intake, 1);
        let handle = self
            .start(&input.session, input.patient, &input.request, &input.agents)
            .await?;

        if let TurnOutcome::Unsaved = self
            .record_user_turn(&handle, handle.query.content())
            .await?
        {
            debug!(consultation = %handle.id, "Continuing with unsaved user turn");
        }
        progress.on_phase_complete(ConsultationPhase::Intake);

        let contributions = self
            .collect_opinions(&handle, &input.agents, progress)
            .await?;

        progress.on_phase_start(ConsultationPhase::Consensus, 1);
        let consensus = Consensus::from_contributions(&contributions);
        self.finalize(&handle, &consensus).await?;
        progress.on_phase_complete(ConsultationPhase::Consensus);

        let consultation = self.store.get_consultation(&handle.id).await?;

        Ok(ConsultationOutcome {
            consultation,
            contributions,
            consensus,
        })
    }
}
