//! Client configuration.
//!
//! Reads `~/.natsume/panel.toml`. Every key is optional:
//!
//! ```toml
//! server_addr = "http://127.0.0.1:2333"
//! session_dir = "/home/op/.natsume"
//! timeout_secs = 10
//! strict_schema = true
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use natsume_types::UnknownFields;

use crate::error::{Error, Result};
use crate::{DEFAULT_SERVER_ADDR, DEFAULT_TIMEOUT_SECS};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Address of the Natsume service, without trailing slash
    pub server_addr: String,

    /// Directory holding the persisted session, defaults to the
    /// config home
    pub session_dir: Option<PathBuf>,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Reject response fields the schemas do not declare
    pub strict_schema: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_addr: DEFAULT_SERVER_ADDR.to_string(),
            session_dir: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            strict_schema: true,
        }
    }
}

impl ClientConfig {
    /// Default config file path: ~/.natsume/panel.toml
    pub fn default_path() -> PathBuf {
        home_dir().join("panel.toml")
    }

    /// Load config from disk, or return default if file doesn't exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: ClientConfig = toml::from_str(&content).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validated()
    }

    /// Override the service address
    pub fn with_server(mut self, addr: impl Into<String>) -> Self {
        self.server_addr = addr.into();
        self
    }

    /// Normalize and range-check values
    pub fn validated(mut self) -> Result<Self> {
        self.server_addr = self.server_addr.trim().trim_end_matches('/').to_string();

        if self.server_addr.is_empty() {
            return Err(Error::InvalidConfig("server_addr must not be empty".into()));
        }
        if self.timeout_secs == 0 {
            return Err(Error::InvalidConfig("timeout_secs must be at least 1".into()));
        }

        Ok(self)
    }

    pub fn session_dir(&self) -> PathBuf {
        self.session_dir.clone().unwrap_or_else(home_dir)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn unknown_fields(&self) -> UnknownFields {
        if self.strict_schema {
            UnknownFields::Reject
        } else {
            UnknownFields::Ignore
        }
    }
}

/// Return the Natsume config directory (~/.natsume)
fn home_dir() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".natsume")
}
