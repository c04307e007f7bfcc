//! Daemon configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use cellgate_ledger::config::{DEFAULT_MAX_BATCH_SIZE, DEFAULT_PAGE_SIZE, DEFAULT_REQUEST_TIMEOUT};
use cellgate_ledger::EngineConfig;
use cellgate_types::{NetworkId, OperationType};
use cellgate_utils::LogFormat;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid TOML configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Configuration for the daemon.
///
/// Loaded from a TOML file via [`DaemonConfig::from_toml_file`]; every field
/// has a default so an empty file is valid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// HTTP port the API listens on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Network name. `Mainnet` (any case) selects the main network, anything
    /// else a test network.
    #[serde(default = "default_network")]
    pub network: String,

    /// Base URL of the node. `/rpc` and `/indexer` are appended unless the
    /// explicit URLs below are set.
    #[serde(default = "default_rich_node_rpc")]
    pub rich_node_rpc: String,

    #[serde(default)]
    pub rpc_url: Option<String>,

    #[serde(default)]
    pub indexer_url: Option<String>,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Log filter: "trace", "debug", "info", "warn", "error" or a full
    /// `EnvFilter` directive.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,

    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Label of the credit side of ordinary transactions.
    #[serde(default = "default_credit_operation")]
    pub credit_operation: OperationType,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_port() -> u16 {
    8080
}

fn default_network() -> String {
    NetworkId::Testnet.as_str().to_string()
}

fn default_rich_node_rpc() -> String {
    "http://127.0.0.1:8114".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT.as_secs()
}

fn default_max_batch_size() -> usize {
    DEFAULT_MAX_BATCH_SIZE
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_credit_operation() -> OperationType {
    OperationType::Transfer
}

// ── Impl ───────────────────────────────────────────────────────────────

impl DaemonConfig {
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn network_id(&self) -> NetworkId {
        NetworkId::from_name(&self.network)
    }

    pub fn node_rpc_url(&self) -> String {
        self.rpc_url
            .clone()
            .unwrap_or_else(|| format!("{}/rpc", self.rich_node_rpc.trim_end_matches('/')))
    }

    pub fn node_indexer_url(&self) -> String {
        self.indexer_url
            .clone()
            .unwrap_or_else(|| format!("{}/indexer", self.rich_node_rpc.trim_end_matches('/')))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Engine settings derived from this configuration. Validation happens
    /// when the engine is constructed.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            max_batch_size: self.max_batch_size,
            page_size: self.page_size,
            credit_operation: self.credit_operation,
            request_timeout: self.request_timeout(),
            ..EngineConfig::new(self.network_id())
        }
    }
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            network: default_network(),
            rich_node_rpc: default_rich_node_rpc(),
            rpc_url: None,
            indexer_url: None,
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            request_timeout_secs: default_request_timeout_secs(),
            max_batch_size: default_max_batch_size(),
            page_size: default_page_size(),
            credit_operation: default_credit_operation(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_toml_uses_defaults() {
        let config = DaemonConfig::from_toml_str("").unwrap();
        assert_eq!(config, DaemonConfig::default());
        assert_eq!(config.port, 8080);
        assert_eq!(config.network_id(), NetworkId::Testnet);
        assert_eq!(config.engine_config(), EngineConfig::new(NetworkId::Testnet));
    }

    #[test]
    fn node_urls_derive_from_base() {
        let config = DaemonConfig::from_toml_str(r#"rich_node_rpc = "http://node:8114/""#).unwrap();
        assert_eq!(config.node_rpc_url(), "http://node:8114/rpc");
        assert_eq!(config.node_indexer_url(), "http://node:8114/indexer");
    }

    #[test]
    fn explicit_urls_win() {
        let toml = r#"
            rich_node_rpc = "http://node:8114"
            indexer_url = "http://indexer:8116"
        "#;
        let config = DaemonConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.node_rpc_url(), "http://node:8114/rpc");
        assert_eq!(config.node_indexer_url(), "http://indexer:8116");
    }

    #[test]
    fn engine_settings_carry_over() {
        let toml = r#"
            network = "mainnet"
            max_batch_size = 50
            page_size = 10
            request_timeout_secs = 5
            credit_operation = "Receive"
            log_format = "json"
        "#;
        let config = DaemonConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.log_format, LogFormat::Json);

        let engine = config.engine_config();
        assert_eq!(engine.network, NetworkId::Mainnet);
        assert_eq!(engine.max_batch_size, 50);
        assert_eq!(engine.page_size, 10);
        assert_eq!(engine.request_timeout, Duration::from_secs(5));
        assert_eq!(engine.credit_operation, OperationType::Receive);
    }

    #[test]
    fn unknown_credit_label_rejected() {
        let err = DaemonConfig::from_toml_str(r#"credit_operation = "Gift""#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port = 9090\nnetwork = \"Mainnet\"").unwrap();
        let config = DaemonConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(config.network_id(), NetworkId::Mainnet);
    }

    #[test]
    fn missing_file_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = DaemonConfig::from_toml_file(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
