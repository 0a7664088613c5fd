//! Ports: interfaces the application layer consumes.
//!
//! Implementations (adapters) live in the infrastructure layer.

pub mod audit;
pub mod generation;
pub mod progress;
pub mod store;
