//! Portal configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use marketgate_guard::{paths, FallbackPolicy};

use crate::{LogFormat, PortalError};

/// Configuration for the seller portal.
///
/// Can be loaded from a TOML file via [`PortalConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PortalConfig {
    /// Directory holding the LMDB environment.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Maximum size of the LMDB memory map, in bytes.
    #[serde(default = "default_map_size")]
    pub lmdb_map_size: usize,

    /// Maximum number of named LMDB databases.
    #[serde(default = "default_max_dbs")]
    pub lmdb_max_dbs: u32,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Access for dashboard paths no route rule matches:
    /// "allow_all" or "deny_all".
    #[serde(default)]
    pub unmatched_route_policy: FallbackPolicy,

    /// Where anonymous visitors are sent.
    #[serde(default = "default_login_path")]
    pub login_path: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_data_dir() -> PathBuf {
    PathBuf::from("./marketgate_data")
}

fn default_map_size() -> usize {
    64 * 1024 * 1024
}

fn default_max_dbs() -> u32 {
    4
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_login_path() -> String {
    paths::LOGIN.to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl PortalConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, PortalError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| PortalError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, PortalError> {
        let config: Self = toml::from_str(s).map_err(|e| PortalError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("PortalConfig is always serializable to TOML")
    }

    fn validate(&self) -> Result<(), PortalError> {
        if !self.login_path.starts_with('/') {
            return Err(PortalError::Config(format!(
                "login_path must be absolute, got {:?}",
                self.login_path
            )));
        }
        if self.lmdb_max_dbs < 2 {
            return Err(PortalError::Config(
                "lmdb_max_dbs must be at least 2".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            lmdb_map_size: default_map_size(),
            lmdb_max_dbs: default_max_dbs(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            unmatched_route_policy: FallbackPolicy::default(),
            login_path: default_login_path(),
        }
    }
}
