//! Client configuration
//!
//! `ClientConfig` is what a caller (or the CLI) fills in before building a
//! client. It can be read from YAML or JSON.

use crate::auth::Credentials;
use crate::error::{Error, Result};
use crate::http::{EndpointTable, HttpConnectionConfig};
use crate::records::UsernameSource;
use crate::types::BackoffType;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

// ============================================================================
// Top-Level Client Config
// ============================================================================

/// Complete client configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Application id used to pick the district token
    pub app_id: String,

    /// Vendor key
    pub vendor_key: String,

    /// Vendor secret
    pub vendor_secret: String,

    /// Student username source (default: sis_id, then email, then district username)
    #[serde(default)]
    pub username_source: Option<UsernameSource>,

    /// Whether sections reflect shared-class membership
    #[serde(default)]
    pub shared_classes: bool,

    /// Identifier of the sync run, attached to log output
    #[serde(default)]
    pub sync_id: Option<String>,

    /// Place every endpoint under this base URL instead of the defaults
    #[serde(default)]
    pub base_url: Option<String>,

    /// HTTP transport settings
    #[serde(default)]
    pub http: HttpConfig,
}

impl ClientConfig {
    /// Create a config with credentials and defaults for everything else
    pub fn new(
        app_id: impl Into<String>,
        vendor_key: impl Into<String>,
        vendor_secret: impl Into<String>,
    ) -> Self {
        Self {
            app_id: app_id.into(),
            vendor_key: vendor_key.into(),
            vendor_secret: vendor_secret.into(),
            ..Default::default()
        }
    }

    /// Parse YAML config
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse JSON config
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load config from a file; `.json` files are JSON, anything else YAML
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    /// Check that credentials are present and the base URL parses
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("app_id", &self.app_id),
            ("vendor_key", &self.vendor_key),
            ("vendor_secret", &self.vendor_secret),
        ] {
            if value.trim().is_empty() {
                return Err(Error::missing_field(field));
            }
        }
        if let Some(base) = &self.base_url {
            Url::parse(base)?;
        }
        Ok(())
    }

    /// Credentials from this config
    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.app_id, &self.vendor_key, &self.vendor_secret)
    }

    /// Endpoint table from this config
    pub fn endpoints(&self) -> EndpointTable {
        match &self.base_url {
            Some(base) => EndpointTable::with_base(base),
            None => EndpointTable::clever(),
        }
    }
}

// ============================================================================
// HTTP Config
// ============================================================================

/// HTTP transport settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Maximum retries for retryable failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Backoff type
    #[serde(default)]
    pub backoff: BackoffType,

    /// Initial backoff in milliseconds
    #[serde(default = "default_initial_backoff")]
    pub initial_backoff_ms: u64,

    /// Maximum backoff in milliseconds
    #[serde(default = "default_max_backoff")]
    pub max_backoff_ms: u64,

    /// Override the user agent
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            max_retries: default_max_retries(),
            backoff: BackoffType::default(),
            initial_backoff_ms: default_initial_backoff(),
            max_backoff_ms: default_max_backoff(),
            user_agent: None,
        }
    }
}

impl HttpConfig {
    /// Convert into the transport's config
    pub fn to_connection_config(&self) -> HttpConnectionConfig {
        let mut builder = HttpConnectionConfig::builder()
            .timeout(Duration::from_secs(self.timeout_seconds))
            .max_retries(self.max_retries)
            .backoff(
                self.backoff,
                Duration::from_millis(self.initial_backoff_ms),
                Duration::from_millis(self.max_backoff_ms),
            );
        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent);
        }
        builder.build()
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_initial_backoff() -> u64 {
    100
}

fn default_max_backoff() -> u64 {
    60_000
}
