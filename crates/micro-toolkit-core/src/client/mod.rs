//! HTTP client for the MCP gateway
//!
//! - `Session`: reqwest client with the bearer credential and timeout baked in
//! - `RetryPolicy`: fixed-delay retries for transient transport failures
//! - `GatewayClient`: discovery, invocation, health, error classification

mod session;
mod retry;
mod gateway;

pub use session::{Session, default_headers};
pub use retry::RetryPolicy;
pub use gateway::GatewayClient;
