//! File and environment based gateway settings
//!
//! The user-level file lives at `~/.config/micro-toolkit/gateway.yaml`
//! (platform config dir). Environment variables use the `MICRO_GATEWAY_`
//! prefix.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::gateway::{ConfigError, ConfigResult, GatewayConfig};

pub const ENV_GATEWAY_URL: &str = "MICRO_GATEWAY_URL";
pub const ENV_AUTH_TOKEN: &str = "MICRO_GATEWAY_TOKEN";
pub const ENV_TIMEOUT: &str = "MICRO_GATEWAY_TIMEOUT";
pub const ENV_RETRY_COUNT: &str = "MICRO_GATEWAY_RETRY_COUNT";
pub const ENV_RETRY_DELAY: &str = "MICRO_GATEWAY_RETRY_DELAY";
pub const ENV_VERIFY_SSL: &str = "MICRO_GATEWAY_VERIFY_SSL";

/// Configuration file structure
///
/// ```yaml
/// gateway_url: https://gateway.internal:3000
/// auth_token: my-token
/// timeout_secs: 10
/// retry_count: 2
/// retry_delay_secs: 0.5
/// verify_ssl: true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ConfigFile {
    pub gateway_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_count: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_delay_secs: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verify_ssl: Option<bool>,
}

impl ConfigFile {
    /// Default user-level path (`<config_dir>/micro-toolkit/gateway.yaml`)
    pub fn user_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".config"));
        config_dir.join("micro-toolkit").join("gateway.yaml")
    }

    /// Read and parse a YAML config file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load a config file, letting `MICRO_GATEWAY_TOKEN` override the stored token
    pub fn load_with_env(path: impl AsRef<Path>) -> ConfigResult<GatewayConfig> {
        let mut file = Self::load(path)?;
        if let Some(token) = non_empty_env(ENV_AUTH_TOKEN) {
            file.auth_token = Some(token);
        }
        file.into_config()
    }

    /// Convert into validated-on-use settings, applying defaults for omitted fields
    pub fn into_config(self) -> ConfigResult<GatewayConfig> {
        let mut config = GatewayConfig::new(self.gateway_url);

        if let Some(token) = self.auth_token {
            config = config.with_auth_token(token);
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(seconds("timeout_secs", secs)?);
        }
        if let Some(count) = self.retry_count {
            config = config.with_retry_count(count);
        }
        if let Some(secs) = self.retry_delay_secs {
            config = config.with_retry_delay(seconds("retry_delay_secs", secs)?);
        }
        if let Some(verify) = self.verify_ssl {
            config = config.with_verify_ssl(verify);
        }

        Ok(config)
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

impl GatewayConfig {
    /// Build settings from `MICRO_GATEWAY_*` environment variables
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup (environment, secrets map, ...)
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let url = get(ENV_GATEWAY_URL).ok_or_else(|| ConfigError::MissingValue(ENV_GATEWAY_URL.to_string()))?;
        let mut config = GatewayConfig::new(url.trim());

        if let Some(token) = get(ENV_AUTH_TOKEN) {
            config = config.with_auth_token(token);
        }
        if let Some(raw) = get(ENV_TIMEOUT) {
            config = config.with_timeout(seconds(ENV_TIMEOUT, parse_value(ENV_TIMEOUT, &raw)?)?);
        }
        if let Some(raw) = get(ENV_RETRY_COUNT) {
            config = config.with_retry_count(parse_value(ENV_RETRY_COUNT, &raw)?);
        }
        if let Some(raw) = get(ENV_RETRY_DELAY) {
            config = config.with_retry_delay(seconds(ENV_RETRY_DELAY, parse_value(ENV_RETRY_DELAY, &raw)?)?);
        }
        if let Some(raw) = get(ENV_VERIFY_SSL) {
            config = config.with_verify_ssl(parse_bool(ENV_VERIFY_SSL, &raw)?);
        }

        Ok(config)
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_value<T>(key: &str, raw: &str) -> ConfigResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("'{}': {}", raw, e),
    })
}

fn parse_bool(key: &str, raw: &str) -> ConfigResult<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("'{}' is not a boolean", other),
        }),
    }
}

fn seconds(key: &str, secs: f64) -> ConfigResult<Duration> {
    Duration::try_from_secs_f64(secs).map_err(|e| ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("{}: {}", secs, e),
    })
}
