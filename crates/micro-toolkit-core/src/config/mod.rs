//! Gateway configuration
//!
//! Settings can come from three places:
//! - Code: `GatewayConfig::new(url).with_*(...)`
//! - Environment: `GatewayConfig::from_env()` (`MICRO_GATEWAY_*`)
//! - YAML file: `ConfigFile::load(path)?.into_config()`

mod gateway;
mod file;

pub use gateway::{
    GatewayConfig, ConfigError, ConfigResult,
    DEFAULT_TIMEOUT, DEFAULT_RETRY_COUNT, DEFAULT_RETRY_DELAY,
};
pub use file::{
    ConfigFile,
    ENV_GATEWAY_URL, ENV_AUTH_TOKEN, ENV_TIMEOUT, ENV_RETRY_COUNT, ENV_RETRY_DELAY, ENV_VERIFY_SSL,
};
