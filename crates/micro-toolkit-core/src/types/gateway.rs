//! Gateway wire payloads

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::tool::ToolDescriptor;

/// Discovery endpoint path
pub const TOOLS_PATH: &str = "/mcp/tools";
/// Invocation endpoint path
pub const CALL_PATH: &str = "/mcp/call";
/// Health endpoint path
pub const HEALTH_PATH: &str = "/health";
/// Response header carrying the gateway's trace id for a call
pub const TRACE_ID_HEADER: &str = "Mcp-Trace-Id";

/// Response body of `GET /mcp/tools`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ToolListResponse {
    #[serde(default)]
    pub tools: Vec<ToolDescriptor>,
    #[serde(default)]
    pub count: Option<usize>,
}

/// Request body of `POST /mcp/call`
#[derive(Debug, Serialize)]
pub(crate) struct CallToolRequest<'a> {
    pub name: &'a str,
    pub arguments: &'a Value,
}

/// Response body of `GET /health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Gateway status, "ok" when healthy
    pub status: String,
    /// Number of tools the gateway currently exposes
    #[serde(default)]
    pub tools: usize,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_list_count_optional() {
        let body = json!({ "tools": [] });
        let list: ToolListResponse = serde_json::from_value(body).unwrap();
        assert!(list.tools.is_empty());
        assert_eq!(list.count, None);
    }

    #[test]
    fn test_call_request_shape() {
        let arguments = json!({ "id": "user-123" });
        let body = serde_json::to_value(CallToolRequest {
            name: "users.Users.Get",
            arguments: &arguments,
        })
        .unwrap();

        assert_eq!(body, json!({ "name": "users.Users.Get", "arguments": { "id": "user-123" } }));
    }

    #[test]
    fn test_health_status() {
        let health: HealthStatus = serde_json::from_value(json!({ "status": "ok", "tools": 4 })).unwrap();
        assert!(health.is_ok());
        assert_eq!(health.tools, 4);

        let degraded: HealthStatus = serde_json::from_value(json!({ "status": "degraded" })).unwrap();
        assert!(!degraded.is_ok());
    }
}
