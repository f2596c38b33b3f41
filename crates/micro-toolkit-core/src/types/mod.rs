//! Core types shared by the client, cache and selector

mod tool;
mod snapshot;
mod gateway;

pub use tool::ToolDescriptor;
pub use snapshot::{RegistrySnapshot, DuplicateToolName};
pub use gateway::{HealthStatus, TOOLS_PATH, CALL_PATH, HEALTH_PATH, TRACE_ID_HEADER};
pub(crate) use gateway::{ToolListResponse, CallToolRequest};
