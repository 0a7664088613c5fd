//! Text-generation adapters

pub mod http;
pub mod parsing;
pub mod provider;
