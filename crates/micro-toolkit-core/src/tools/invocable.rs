//! Invocable tool: a descriptor bound to the client that can execute it

use std::sync::Arc;

use serde_json::Value;

use crate::client::GatewayClient;
use crate::error::GatewayResult;
use crate::types::ToolDescriptor;

/// A discovered tool ready to be handed to a tool-calling framework.
///
/// Holds only a shared handle to the descriptor and to the owning client;
/// cloning it is cheap and never copies the descriptor.
#[derive(Clone)]
pub struct InvocableTool {
    descriptor: Arc<ToolDescriptor>,
    client: Arc<GatewayClient>,
}

impl InvocableTool {
    pub fn new(descriptor: Arc<ToolDescriptor>, client: Arc<GatewayClient>) -> Self {
        Self { descriptor, client }
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    /// Description for the caller, with the example appended when present
    pub fn description(&self) -> String {
        extended_description(&self.descriptor)
    }

    pub fn descriptor(&self) -> &Arc<ToolDescriptor> {
        &self.descriptor
    }

    pub fn client(&self) -> &Arc<GatewayClient> {
        &self.client
    }

    /// Execute with structured arguments
    pub async fn invoke(&self, arguments: &Value) -> GatewayResult<Value> {
        self.client.invoke(&self.descriptor.name, arguments).await
    }

    /// Execute with JSON text in, JSON text out
    pub async fn run(&self, input: &str) -> GatewayResult<String> {
        self.client.call_tool(&self.descriptor.name, input).await
    }
}

impl std::fmt::Debug for InvocableTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvocableTool")
            .field("name", &self.descriptor.name)
            .field("service", &self.descriptor.service)
            .field("endpoint", &self.descriptor.endpoint)
            .finish()
    }
}

/// `description`, plus `"\n\nExample input: <example>"` when an example exists
pub fn extended_description(tool: &ToolDescriptor) -> String {
    match tool.example.as_deref() {
        Some(example) if !example.is_empty() => {
            format!("{}\n\nExample input: {}", tool.description, example)
        }
        _ => tool.description.clone(),
    }
}
