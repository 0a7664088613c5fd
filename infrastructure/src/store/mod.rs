//! Consultation store adapters

pub mod http;
pub mod memory;
