//! Registry node: hosts one `HousingRegistry` for concurrent callers.
//!
//! The node:
//! - Serializes every mutation behind a single writer lock
//! - Serves reads concurrently from committed state
//! - Broadcasts registry events to subscribers
//! - Optionally persists a snapshot on every committed write
//! - Loads its configuration from TOML and initializes logging

pub mod config;
pub mod error;
pub mod logging;
pub mod persistence;
pub mod service;

pub use config::NodeConfig;
pub use error::NodeError;
pub use logging::{init_logging, LogFormat};
pub use service::RegistryService;
