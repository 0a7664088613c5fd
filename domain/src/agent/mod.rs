//! Specialist agent concepts: identity and selection policy

pub mod kind;
pub mod selection;
