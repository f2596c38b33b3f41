//! HTTP session shared by every gateway request

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, Method, RequestBuilder};

use crate::config::{ConfigError, ConfigResult, GatewayConfig};

/// A reusable HTTP client bound to one gateway.
///
/// Default headers (bearer credential, `Accept`) and the request timeout are
/// baked in at construction, so every request made through the session
/// carries them.
#[derive(Debug, Clone)]
pub struct Session {
    http: Client,
    config: GatewayConfig,
}

impl Session {
    /// Build a session. Validates the settings; performs no network I/O.
    pub fn new(config: GatewayConfig) -> ConfigResult<Self> {
        config.validate()?;

        let http = Client::builder()
            .default_headers(default_headers(&config)?)
            .timeout(config.timeout())
            .danger_accept_invalid_certs(!config.verify_ssl())
            .user_agent(format!("micro-toolkit/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Full URL for an API path
    pub fn url(&self, path: &str) -> String {
        self.config.endpoint_url(path)
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.url(path))
    }
}

/// Headers attached to every request of a session
pub fn default_headers(config: &GatewayConfig) -> ConfigResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    if let Some(token) = config.auth_token() {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token.trim())).map_err(|e| {
            ConfigError::InvalidValue {
                key: "auth_token".to_string(),
                message: e.to_string(),
            }
        })?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    Ok(headers)
}
