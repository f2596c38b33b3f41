//! Micro Toolkit Core
//!
//! Client for an MCP gateway that exposes service endpoints as tools.
//! It discovers the tools, caches the list, filters it, and executes calls
//! over HTTP with a bearer credential, timeouts, retries and typed errors.
//!
//! ## Tool discovery and invocation
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use micro_toolkit_core::{GatewayClient, GatewayConfig, ToolFilter};
//!
//! let config = GatewayConfig::new("http://localhost:3000").with_auth_token(token);
//! let client = Arc::new(GatewayClient::new(config)?);
//!
//! // First access fetches GET /mcp/tools, later calls use the cache
//! let tools = client.get_tools(&ToolFilter::new().with_service("users")).await?;
//!
//! // String in, string out, for tool-calling frameworks
//! let result = tools[0].run(r#"{"id": "user-123"}"#).await?;
//!
//! // Pick up services registered since the first fetch
//! client.refresh().await?;
//! ```
//!
//! ## Errors
//!
//! Every failure is a [`GatewayError`] whose [`ErrorKind`] tells the caller
//! what to do: re-authenticate (`Auth`), retry later (`Connection`), or fix
//! the input (`Tool`).

pub mod types;
pub mod error;
pub mod logging;
pub mod config;
pub mod client;
pub mod tools;
pub mod blocking;

// Re-export commonly used types
pub use types::{ToolDescriptor, RegistrySnapshot, HealthStatus};

pub use error::{GatewayError, GatewayResult, ErrorKind};

pub use logging::{Logger, NoOpLogger, TracingLogger};

pub use config::{GatewayConfig, ConfigFile, ConfigError, ConfigResult};

pub use client::{GatewayClient, RetryPolicy};

pub use tools::{InvocableTool, ToolFilter};

pub use blocking::{BlockingGatewayClient, BlockingTool};
