//! Configuration types for the HTTP service
//!
//! Configuration is read once at start-up and never changes afterwards.
//!
//! Sources, later overriding earlier:
//!
//! 1. `config/proxy.yaml`, if present
//! 2. The YAML file named by `TF_DISCORD_PROXY_CONFIG_FILE`, if set
//! 3. Environment variables prefixed `TF_DISCORD_PROXY_`, e.g.
//!    `TF_DISCORD_PROXY_WEBHOOK_URL`, `TF_DISCORD_PROXY_AUTH_TOKEN`,
//!    `TF_DISCORD_PROXY_PORT`

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Prefix of every configuration environment variable.
pub const ENV_PREFIX: &str = "TF_DISCORD_PROXY";

/// Environment variable naming an explicit configuration file.
pub const CONFIG_FILE_ENV: &str = "TF_DISCORD_PROXY_CONFIG_FILE";

const DEFAULT_CONFIG_FILE: &str = "config/proxy";

/// Proxy configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Destination Discord webhook URL. Required.
    #[serde(default)]
    pub webhook_url: String,

    /// Shared secret for `X-TFE-Notification-Signature` verification.
    /// Unset or empty disables verification.
    #[serde(default)]
    pub auth_token: Option<String>,

    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Emit log lines as JSON
    #[serde(default)]
    pub log_json: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl ProxyConfig {
    /// Create a configuration for `webhook_url` with every other setting at
    /// its default.
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            auth_token: None,
            host: default_host(),
            port: default_port(),
            log_json: false,
        }
    }

    /// Set the shared secret.
    pub fn with_auth_token(mut self, auth_token: impl Into<String>) -> Self {
        self.auth_token = Some(auth_token.into());
        self
    }

    /// Load and validate configuration from files and the environment.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::Load`] when a source cannot be read or a value has the
    ///   wrong type.
    /// * [`ConfigError::Missing`] / [`ConfigError::Invalid`] from
    ///   [`validate`](Self::validate).
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder().add_source(
            config::File::with_name(DEFAULT_CONFIG_FILE)
                .required(false)
                .format(config::FileFormat::Yaml),
        );

        if let Ok(explicit_path) = std::env::var(CONFIG_FILE_ENV) {
            if !explicit_path.is_empty() {
                info!(path = %explicit_path, "Loading configuration from explicit path");
                builder = builder.add_source(
                    config::File::with_name(&explicit_path)
                        .required(true)
                        .format(config::FileFormat::Yaml),
                );
            }
        }

        let settings = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()?;

        let proxy_config: ProxyConfig = settings.try_deserialize()?;
        proxy_config.validate()?;
        Ok(proxy_config)
    }

    /// Check the configuration is usable.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::Missing`] if the webhook URL is empty.
    /// * [`ConfigError::Invalid`] if the webhook URL is not an absolute
    ///   `http`/`https` URL or the port is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.webhook_url.trim().is_empty() {
            return Err(ConfigError::Missing {
                key: format!("{ENV_PREFIX}_WEBHOOK_URL"),
            });
        }

        let url = url::Url::parse(&self.webhook_url).map_err(|e| ConfigError::Invalid {
            message: format!("webhook_url is not a valid URL: {e}"),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid {
                message: format!("webhook_url must use http or https, got '{}'", url.scheme()),
            });
        }

        if self.port == 0 {
            return Err(ConfigError::Invalid {
                message: "port must be non-zero".to_string(),
            });
        }

        Ok(())
    }

    /// The shared secret, if signature verification is enabled.
    pub fn secret(&self) -> Option<&str> {
        self.auth_token.as_deref().filter(|s| !s.is_empty())
    }

    /// Address to bind, as `host:port`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// The webhook URL carries the Discord token, so both it and the secret are
// kept out of logs.
impl std::fmt::Debug for ProxyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProxyConfig")
            .field("webhook_url", &"<REDACTED>")
            .field("auth_token", &self.secret().map(|_| "<REDACTED>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("log_json", &self.log_json)
            .finish()
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
