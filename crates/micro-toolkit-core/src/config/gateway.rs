//! Gateway connection settings

use std::time::Duration;

use reqwest::Url;

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Default number of retries for transient failures
pub const DEFAULT_RETRY_COUNT: u32 = 3;
/// Default delay between retries
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Connection settings for an MCP gateway.
///
/// Built with [`GatewayConfig::new`] and the `with_*` methods. Once handed
/// to a client the settings can no longer change.
///
/// ```
/// use std::time::Duration;
/// use micro_toolkit_core::GatewayConfig;
///
/// let config = GatewayConfig::new("http://localhost:3000")
///     .with_auth_token("secret")
///     .with_timeout(Duration::from_secs(10));
///
/// assert_eq!(config.retry_count(), 3);
/// assert!(config.verify_ssl());
/// ```
#[derive(Clone, PartialEq)]
pub struct GatewayConfig {
    gateway_url: String,
    auth_token: Option<String>,
    timeout: Duration,
    retry_count: u32,
    retry_delay: Duration,
    verify_ssl: bool,
}

impl GatewayConfig {
    /// Create settings for a gateway URL with all defaults applied
    pub fn new(gateway_url: impl Into<String>) -> Self {
        Self {
            gateway_url: gateway_url.into(),
            auth_token: None,
            timeout: DEFAULT_TIMEOUT,
            retry_count: DEFAULT_RETRY_COUNT,
            retry_delay: DEFAULT_RETRY_DELAY,
            verify_ssl: true,
        }
    }

    /// Set the bearer token sent with every request
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry_count(mut self, retry_count: u32) -> Self {
        self.retry_count = retry_count;
        self
    }

    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    /// Enable or disable TLS certificate verification
    pub fn with_verify_ssl(mut self, verify_ssl: bool) -> Self {
        self.verify_ssl = verify_ssl;
        self
    }

    pub fn gateway_url(&self) -> &str {
        &self.gateway_url
    }

    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn retry_count(&self) -> u32 {
        self.retry_count
    }

    pub fn retry_delay(&self) -> Duration {
        self.retry_delay
    }

    pub fn verify_ssl(&self) -> bool {
        self.verify_ssl
    }

    /// Check the settings before a client is built from them
    pub fn validate(&self) -> ConfigResult<()> {
        let url = self.gateway_url.trim();
        if url.is_empty() {
            return Err(ConfigError::MissingValue("gateway_url".to_string()));
        }

        let parsed = Url::parse(url).map_err(|e| ConfigError::InvalidUrl {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                url: url.to_string(),
                message: "scheme must be http or https".to_string(),
            });
        }

        if self.timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                key: "timeout".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }

        if matches!(self.auth_token.as_deref(), Some(t) if t.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                key: "auth_token".to_string(),
                message: "must not be empty when provided".to_string(),
            });
        }

        Ok(())
    }

    /// Join an API path onto the gateway URL
    pub(crate) fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.gateway_url.trim().trim_end_matches('/'), path)
    }
}

// Keeps the credential out of debug output
impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("gateway_url", &self.gateway_url)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("retry_count", &self.retry_count)
            .field("retry_delay", &self.retry_delay)
            .field("verify_ssl", &self.verify_ssl)
            .finish()
    }
}

/// Errors that can occur while building gateway settings
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required setting: {0}")]
    MissingValue(String),

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Invalid gateway URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
