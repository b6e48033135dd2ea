//! Node configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::logging::LogFormat;
use crate::NodeError;

/// Configuration for a registry node.
///
/// Can be loaded from a TOML file via [`NodeConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Owner identity for a freshly created registry. Ignored when a snapshot
    /// already exists, except that a non-empty value must match its owner.
    #[serde(default)]
    pub owner: String,

    /// Data directory holding the registry snapshot.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Snapshot file name inside `data_dir`.
    #[serde(default = "default_snapshot_file")]
    pub snapshot_file: String,

    /// Write the snapshot as part of every committed mutation.
    #[serde(default = "default_true")]
    pub persist_on_write: bool,

    /// Buffered events per subscriber before slow subscribers start lagging.
    #[serde(default = "default_event_channel_capacity")]
    pub event_channel_capacity: usize,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_data_dir() -> PathBuf {
    PathBuf::from("./hqa_data")
}

fn default_snapshot_file() -> String {
    "registry.snapshot".to_string()
}

fn default_true() -> bool {
    true
}

fn default_event_channel_capacity() -> usize {
    1024
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl NodeConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, NodeError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            NodeError::Config(format!("{}: {e}", path.as_ref().display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, NodeError> {
        let config: Self = toml::from_str(s).map_err(|e| NodeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, NodeError> {
        toml::to_string_pretty(self).map_err(|e| NodeError::Config(e.to_string()))
    }

    /// Reject values no node can run with.
    pub fn validate(&self) -> Result<(), NodeError> {
        if self.snapshot_file.trim().is_empty() {
            return Err(NodeError::Config("snapshot_file must not be empty".into()));
        }
        if self.event_channel_capacity == 0 {
            return Err(NodeError::Config(
                "event_channel_capacity must be at least 1".into(),
            ));
        }
        self.parsed_log_format()?;
        Ok(())
    }

    /// Full path of the snapshot file.
    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join(&self.snapshot_file)
    }

    pub fn parsed_log_format(&self) -> Result<LogFormat, NodeError> {
        self.log_format.parse()
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            owner: String::new(),
            data_dir: default_data_dir(),
            snapshot_file: default_snapshot_file(),
            persist_on_write: default_true(),
            event_channel_capacity: default_event_channel_capacity(),
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = NodeConfig::default();
        let toml_str = config.to_toml_string().unwrap();
        let parsed = NodeConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed.snapshot_path(), config.snapshot_path());
        assert_eq!(parsed.event_channel_capacity, config.event_channel_capacity);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = NodeConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.owner, "");
        assert_eq!(config.snapshot_path(), PathBuf::from("./hqa_data/registry.snapshot"));
        assert!(config.persist_on_write);
        assert_eq!(config.event_channel_capacity, 1024);
        assert_eq!(config.log_format, "human");
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            owner = "0x00000000000000000000000000000000000000aa"
            data_dir = "/var/lib/hqa"
            persist_on_write = false
        "#;
        let config = NodeConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.owner, "0x00000000000000000000000000000000000000aa");
        assert_eq!(config.snapshot_path(), PathBuf::from("/var/lib/hqa/registry.snapshot"));
        assert!(!config.persist_on_write);
        assert_eq!(config.log_level, "info"); // default
    }

    #[test]
    fn bad_values_rejected() {
        assert!(matches!(
            NodeConfig::from_toml_str("event_channel_capacity = 0"),
            Err(NodeError::Config(_))
        ));
        assert!(matches!(
            NodeConfig::from_toml_str("log_format = \"xml\""),
            Err(NodeError::Config(_))
        ));
        assert!(matches!(
            NodeConfig::from_toml_str("snapshot_file = \"\""),
            Err(NodeError::Config(_))
        ));
    }

    #[test]
    fn missing_file_returns_config_error() {
        let result = NodeConfig::from_toml_file("/nonexistent/hqa.toml");
        assert!(matches!(result, Err(NodeError::Config(_))));
    }
}
