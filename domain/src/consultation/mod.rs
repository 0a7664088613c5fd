//! Consultation entities, contributions, and consensus aggregation

pub mod consensus;
pub mod contribution;
pub mod entities;
