//! Infrastructure layer for aida-consult
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod audit;
pub mod config;
pub mod generation;
pub mod store;

// Re-export commonly used types
pub use audit::JsonlAuditLogger;
pub use config::{ConfigLoader, FileBehaviorConfig, FileConfig, FileStoreConfig, StoreMode};
pub use generation::{
    http::HttpOpinionGenerator,
    provider::{AuthMode, ProviderConfig},
};
pub use store::{http::HttpStore, memory::MemoryStore};
