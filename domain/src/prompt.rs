//! Prompt templates for specialist consultations

use crate::agent::kind::AgentKind;
use crate::core::query::ConsultationQuery;
use crate::patient::PatientRef;

/// Templates for generating the per-specialty prompts
pub struct PromptTemplate;

impl PromptTemplate {
    /// System preamble naming the specialty the agent represents
    pub fn specialty_system(agent: &AgentKind) -> String {
        let profile = agent.profile();
        format!(
            r#"You are {}, a medical AI assistant specialized in {}.
Answer as a professional, concise specialist. Stay within your specialty.
When relevant, list potential diagnoses and concrete recommendations.
State your confidence in your assessment as an integer from 0 to 100."#,
            profile.display_name, profile.specialty_label
        )
    }

    /// User prompt carrying the patient identity and the clinical question
    pub fn specialty_query(
        agent: &AgentKind,
        patient: &PatientRef,
        query: &ConsultationQuery,
    ) -> String {
        format!(
            r#"Patient: {} (id {})

Clinical question:
{}

Respond as a {} specialist. Be professional and concise, focus on your
specialty, and include potential diagnoses and recommendations where
appropriate."#,
            patient.display_name,
            patient.id,
            query.content(),
            agent.profile().specialty_label
        )
    }
}
