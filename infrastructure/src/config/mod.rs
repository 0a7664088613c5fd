//! Configuration file loading

pub mod file_config;
pub mod loader;

pub use file_config::{FileAuditConfig, FileBehaviorConfig, FileConfig, FileStoreConfig, StoreMode};
pub use loader::ConfigLoader;
