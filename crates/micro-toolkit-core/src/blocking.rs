//! Blocking facade over [`GatewayClient`]
//!
//! For callers without an async runtime (CLIs, scripting bindings). Each
//! method drives the async client to completion on a private
//! current-thread runtime.
//!
//! Do not use these types from inside an async runtime; blocking there
//! panics. Use [`GatewayClient`] directly instead.

use std::sync::Arc;

use serde_json::Value;
use tokio::runtime::{Builder, Runtime};

use crate::client::GatewayClient;
use crate::config::{ConfigResult, GatewayConfig};
use crate::error::GatewayResult;
use crate::logging::SharedLogger;
use crate::tools::{InvocableTool, ToolFilter};
use crate::types::{HealthStatus, RegistrySnapshot};

/// Synchronous gateway client
pub struct BlockingGatewayClient {
    inner: Arc<GatewayClient>,
    runtime: Arc<Runtime>,
}

impl BlockingGatewayClient {
    pub fn new(config: GatewayConfig) -> ConfigResult<Self> {
        Self::from_client(GatewayClient::new(config)?)
    }

    pub fn with_logger(config: GatewayConfig, logger: SharedLogger) -> ConfigResult<Self> {
        Self::from_client(GatewayClient::with_logger(config, logger)?)
    }

    pub fn from_gateway(gateway_url: impl Into<String>, auth_token: Option<&str>) -> ConfigResult<Self> {
        Self::from_client(GatewayClient::from_gateway(gateway_url, auth_token)?)
    }

    fn from_client(client: GatewayClient) -> ConfigResult<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(Self {
            inner: Arc::new(client),
            runtime: Arc::new(runtime),
        })
    }

    /// The async client behind this facade
    pub fn inner(&self) -> &Arc<GatewayClient> {
        &self.inner
    }

    pub fn config(&self) -> &GatewayConfig {
        self.inner.config()
    }

    pub fn refresh(&self) -> GatewayResult<Arc<RegistrySnapshot>> {
        self.runtime.block_on(self.inner.refresh())
    }

    pub fn list_tools(&self) -> GatewayResult<Arc<RegistrySnapshot>> {
        self.runtime.block_on(self.inner.list_tools())
    }

    pub fn get_tools(&self, filter: &ToolFilter) -> GatewayResult<Vec<BlockingTool>> {
        let tools = self.runtime.block_on(self.inner.get_tools(filter))?;
        Ok(tools.into_iter().map(|tool| self.wrap(tool)).collect())
    }

    pub fn get_tool(&self, name: &str) -> GatewayResult<Option<BlockingTool>> {
        let tool = self.runtime.block_on(self.inner.get_tool(name))?;
        Ok(tool.map(|tool| self.wrap(tool)))
    }

    pub fn call_tool(&self, name: &str, arguments: &str) -> GatewayResult<String> {
        self.runtime.block_on(self.inner.call_tool(name, arguments))
    }

    pub fn invoke(&self, name: &str, arguments: &Value) -> GatewayResult<Value> {
        self.runtime.block_on(self.inner.invoke(name, arguments))
    }

    pub fn health(&self) -> GatewayResult<HealthStatus> {
        self.runtime.block_on(self.inner.health())
    }

    fn wrap(&self, tool: InvocableTool) -> BlockingTool {
        BlockingTool {
            tool,
            runtime: Arc::clone(&self.runtime),
        }
    }
}

impl std::fmt::Debug for BlockingGatewayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockingGatewayClient")
            .field("inner", &self.inner)
            .finish()
    }
}

/// Synchronous counterpart of [`InvocableTool`]
#[derive(Clone)]
pub struct BlockingTool {
    tool: InvocableTool,
    runtime: Arc<Runtime>,
}

impl BlockingTool {
    pub fn name(&self) -> &str {
        self.tool.name()
    }

    pub fn description(&self) -> String {
        self.tool.description()
    }

    pub fn as_async(&self) -> &InvocableTool {
        &self.tool
    }

    /// Execute with JSON text in, JSON text out
    pub fn run(&self, input: &str) -> GatewayResult<String> {
        self.runtime.block_on(self.tool.run(input))
    }

    pub fn invoke(&self, arguments: &Value) -> GatewayResult<Value> {
        self.runtime.block_on(self.tool.invoke(arguments))
    }
}

impl std::fmt::Debug for BlockingTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(&self.tool, f)
    }
}
