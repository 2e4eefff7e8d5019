//! Operator configuration.
//!
//! Configuration is loaded from the environment once at startup and is
//! read-only afterwards. Invalid configuration is fatal: the process
//! never reaches the serving phase with a configuration it could not
//! validate.

use std::net::{AddrParseError, SocketAddr};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The listen address is not a valid socket address.
    #[error("invalid listen address {addr:?}: {source}")]
    InvalidListenAddr {
        /// The rejected value.
        addr: String,
        /// The parse failure.
        #[source]
        source: AddrParseError,
    },

    /// The namespace is not a valid RFC 1123 label.
    #[error("invalid namespace {0:?}: must be a lowercase RFC 1123 label")]
    InvalidNamespace(String),

    /// A numeric environment variable could not be parsed.
    #[error("invalid value {value:?} for {var}")]
    InvalidValue {
        /// The environment variable name.
        var: &'static str,
        /// The rejected value.
        value: String,
    },
}

/// Configuration for the operator process.
#[derive(Debug, Clone, Deserialize)]
pub struct OperatorConfig {
    /// Listen address for the management API (e.g., "0.0.0.0:8080").
    #[serde(default = "OperatorConfig::default_listen_addr")]
    pub listen_addr: String,

    /// Namespace all Service operations are scoped to.
    #[serde(default = "OperatorConfig::default_namespace")]
    pub namespace: String,

    /// Directory for the bookkeeping store.
    #[serde(default = "OperatorConfig::default_data_dir")]
    pub data_dir: String,

    /// Maximum request body size in bytes.
    #[serde(default = "OperatorConfig::default_max_body")]
    pub max_body_bytes: usize,

    /// Request timeout in seconds.
    #[serde(default = "OperatorConfig::default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl OperatorConfig {
    fn default_listen_addr() -> String {
        "0.0.0.0:8080".to_string()
    }

    fn default_namespace() -> String {
        "strata-clusters".to_string()
    }

    fn default_data_dir() -> String {
        "/data/stratadb".to_string()
    }

    const fn default_max_body() -> usize {
        1024 * 1024 // 1 MB
    }

    const fn default_request_timeout() -> u64 {
        30
    }

    /// Load configuration from environment variables and validate it.
    ///
    /// Supported environment variables:
    /// - `LISTEN_ADDR`: listen address for the management API
    /// - `STRATA_NAMESPACE`: namespace for all Service operations
    /// - `DATA_DIR`: directory for the bookkeeping store
    /// - `MAX_BODY_BYTES`: maximum request body size
    /// - `REQUEST_TIMEOUT_SECONDS`: request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if any value is present but invalid. Callers
    /// must treat that as fatal.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("LISTEN_ADDR") {
            config.listen_addr = val;
        }
        if let Ok(val) = std::env::var("STRATA_NAMESPACE") {
            config.namespace = val;
        }
        if let Ok(val) = std::env::var("DATA_DIR") {
            config.data_dir = val;
        }
        if let Ok(val) = std::env::var("MAX_BODY_BYTES") {
            config.max_body_bytes = val.parse().map_err(|_| ConfigError::InvalidValue {
                var: "MAX_BODY_BYTES",
                value: val.clone(),
            })?;
        }
        if let Ok(val) = std::env::var("REQUEST_TIMEOUT_SECONDS") {
            config.request_timeout_seconds =
                val.parse().map_err(|_| ConfigError::InvalidValue {
                    var: "REQUEST_TIMEOUT_SECONDS",
                    value: val.clone(),
                })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the listen address does not parse or the
    /// namespace is not a valid RFC 1123 label.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.listen_addr
            .parse::<SocketAddr>()
            .map_err(|source| ConfigError::InvalidListenAddr {
                addr: self.listen_addr.clone(),
                source,
            })?;

        if !is_rfc1123_label(&self.namespace) {
            return Err(ConfigError::InvalidNamespace(self.namespace.clone()));
        }

        Ok(())
    }

    /// Get the request timeout as a `Duration`.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl Default for OperatorConfig {
    fn default() -> Self {
        Self {
            listen_addr: Self::default_listen_addr(),
            namespace: Self::default_namespace(),
            data_dir: Self::default_data_dir(),
            max_body_bytes: Self::default_max_body(),
            request_timeout_seconds: Self::default_request_timeout(),
        }
    }
}

/// Whether `name` is a valid RFC 1123 DNS label.
fn is_rfc1123_label(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= 63
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        && !name.starts_with('-')
        && !name.ends_with('-')
}
