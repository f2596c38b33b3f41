//! Gateway client: discovery, invocation and error classification

use std::error::Error as StdError;
use std::sync::Arc;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::retry::RetryPolicy;
use super::session::Session;
use crate::config::{ConfigResult, GatewayConfig};
use crate::error::{GatewayError, GatewayResult};
use crate::logging::{SharedLogger, TracingLogger};
use crate::tools::{InvocableTool, SnapshotCache, ToolFilter};
use crate::types::{
    CallToolRequest, HealthStatus, RegistrySnapshot, ToolDescriptor, ToolListResponse,
    CALL_PATH, HEALTH_PATH, TOOLS_PATH, TRACE_ID_HEADER,
};

/// Raw 2xx answer from the gateway
struct GatewayResponse {
    body: Vec<u8>,
    trace_id: Option<String>,
}

/// Client for an MCP gateway.
///
/// Tools are discovered lazily on first access and cached until
/// [`refresh`](Self::refresh) is called. Each call is independent: one HTTP
/// exchange (plus retries for transient transport failures).
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use micro_toolkit_core::{GatewayClient, ToolFilter};
///
/// let client = Arc::new(GatewayClient::from_gateway("http://localhost:3000", None)?);
///
/// let users = client.get_tools(&ToolFilter::new().with_service("users")).await?;
/// for tool in &users {
///     println!("{}: {}", tool.name(), tool.description());
/// }
///
/// let result = client.call_tool("users.Users.Get", r#"{"id": "user-123"}"#).await?;
/// ```
pub struct GatewayClient {
    session: Session,
    retry: RetryPolicy,
    cache: SnapshotCache,
    logger: SharedLogger,
}

impl GatewayClient {
    /// Create a client that logs through `tracing`
    pub fn new(config: GatewayConfig) -> ConfigResult<Self> {
        Self::with_logger(config, Arc::new(TracingLogger::new()))
    }

    /// Create a client with a custom logger
    pub fn with_logger(config: GatewayConfig, logger: SharedLogger) -> ConfigResult<Self> {
        let retry = RetryPolicy::from_config(&config);
        let session = Session::new(config)?;

        logger.debug(&format!(
            "[GatewayClient] Created client for {} (authenticated: {})",
            session.config().gateway_url(),
            session.config().auth_token().is_some()
        ));

        Ok(Self {
            session,
            retry,
            cache: SnapshotCache::new(),
            logger,
        })
    }

    /// Create a client from a gateway URL and optional bearer token, with defaults
    pub fn from_gateway(gateway_url: impl Into<String>, auth_token: Option<&str>) -> ConfigResult<Self> {
        let mut config = GatewayConfig::new(gateway_url);
        if let Some(token) = auth_token {
            config = config.with_auth_token(token);
        }
        Self::new(config)
    }

    pub fn config(&self) -> &GatewayConfig {
        self.session.config()
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    // ==================== DISCOVERY ====================

    /// Fetch the tool list and replace the cached snapshot.
    ///
    /// On failure the previous snapshot (if any) stays in place.
    pub async fn refresh(&self) -> GatewayResult<Arc<RegistrySnapshot>> {
        let response = self.execute(Method::GET, TOOLS_PATH, None).await?;

        let list: ToolListResponse = parse_body(&response.body).map_err(|e| {
            GatewayError::InvalidResponse(format!("malformed tool list: {}", e))
        })?;

        if let Some(count) = list.count {
            if count != list.tools.len() {
                self.logger.warn(&format!(
                    "[GatewayClient] Gateway reported {} tools but sent {}",
                    count,
                    list.tools.len()
                ));
            }
        }

        let snapshot = RegistrySnapshot::new(list.tools)
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        self.logger.info(&format!(
            "[GatewayClient] Discovered {} tools from {}",
            snapshot.count(),
            self.config().gateway_url()
        ));

        Ok(self.cache.install(snapshot))
    }

    /// Cached snapshot, fetched on first access only
    pub async fn list_tools(&self) -> GatewayResult<Arc<RegistrySnapshot>> {
        match self.cache.current() {
            Some(snapshot) => Ok(snapshot),
            None => self.refresh().await,
        }
    }

    /// Cached snapshot without triggering discovery
    pub fn cached_tools(&self) -> Option<Arc<RegistrySnapshot>> {
        self.cache.current()
    }

    /// Descriptors matching `filter`, in discovery order
    pub async fn select_tools(&self, filter: &ToolFilter) -> GatewayResult<Vec<Arc<ToolDescriptor>>> {
        let snapshot = self.list_tools().await?;
        Ok(filter.select(snapshot.tools()))
    }

    /// Invocable tools matching `filter`, in discovery order
    pub async fn get_tools(self: &Arc<Self>, filter: &ToolFilter) -> GatewayResult<Vec<InvocableTool>> {
        let selected = self.select_tools(filter).await?;
        Ok(selected
            .into_iter()
            .map(|descriptor| InvocableTool::new(descriptor, Arc::clone(self)))
            .collect())
    }

    /// Look up one tool by name in the cached snapshot
    pub async fn get_tool(self: &Arc<Self>, name: &str) -> GatewayResult<Option<InvocableTool>> {
        let snapshot = self.list_tools().await?;
        Ok(snapshot
            .get(name)
            .map(|descriptor| InvocableTool::new(Arc::clone(descriptor), Arc::clone(self))))
    }

    // ==================== INVOCATION ====================

    /// Call a tool with JSON text arguments and get the JSON text result.
    ///
    /// Arguments that are not valid JSON fail with a Tool-kind error before
    /// any request is sent.
    pub async fn call_tool(&self, name: &str, arguments: &str) -> GatewayResult<String> {
        let arguments: Value = serde_json::from_str(arguments).map_err(GatewayError::InvalidArguments)?;
        let result = self.invoke(name, &arguments).await?;
        serde_json::to_string(&result).map_err(|e| GatewayError::ToolFailed(e.to_string()))
    }

    /// Call a tool with structured arguments
    pub async fn invoke(&self, name: &str, arguments: &Value) -> GatewayResult<Value> {
        self.logger.info(&format!("[GatewayClient] Calling tool: {}", name));

        let body = serde_json::to_value(CallToolRequest { name, arguments })
            .map_err(GatewayError::InvalidArguments)?;
        let response = self.execute(Method::POST, CALL_PATH, Some(&body)).await?;

        if let Some(ref trace_id) = response.trace_id {
            self.logger.debug(&format!(
                "[GatewayClient] Tool {} completed (trace id {})",
                name, trace_id
            ));
        }

        let result: Value = parse_body(&response.body).map_err(|e| {
            GatewayError::ToolFailed(format!("{} returned a non-JSON result: {}", name, e))
        })?;

        if let Some(message) = remote_failure(&result) {
            self.logger.warn(&format!("[GatewayClient] Tool {} reported failure: {}", name, message));
            return Err(GatewayError::ToolFailed(message));
        }

        Ok(result)
    }

    // ==================== HEALTH ====================

    /// Query the gateway health endpoint
    pub async fn health(&self) -> GatewayResult<HealthStatus> {
        let response = self.execute(Method::GET, HEALTH_PATH, None).await?;
        parse_body(&response.body)
            .map_err(|e| GatewayError::InvalidResponse(format!("malformed health status: {}", e)))
    }

    // ==================== TRANSPORT ====================

    /// Perform one logical request, retrying transient transport failures
    async fn execute(&self, method: Method, path: &str, body: Option<&Value>) -> GatewayResult<GatewayResponse> {
        let label = format!("{} {}", method, path);
        self.retry
            .run(self.logger.as_ref(), &label, || self.attempt(method.clone(), path, body))
            .await
    }

    /// One HTTP exchange with status classification
    async fn attempt(&self, method: Method, path: &str, body: Option<&Value>) -> GatewayResult<GatewayResponse> {
        let url = self.session.url(path);
        self.logger.debug(&format!("[GatewayClient] {} {}", method, url));

        let mut request = self.session.request(method, path);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| transport_error(&url, &e))?;
        let status = response.status();

        match status {
            StatusCode::UNAUTHORIZED => return Err(GatewayError::Unauthorized),
            StatusCode::FORBIDDEN => return Err(GatewayError::Forbidden),
            s if !s.is_success() => {
                let text = match response.text().await {
                    Ok(text) => text.trim().to_string(),
                    Err(e) => format!("<unreadable body: {}>", describe(&e)),
                };
                return Err(GatewayError::status(s.as_u16(), text));
            }
            _ => {}
        }

        let trace_id = response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        // Past this point the call reached the gateway, so failures are final
        let body = response.bytes().await.map_err(|e| {
            GatewayError::InvalidResponse(format!("failed to read response from {}: {}", url, describe(&e)))
        })?;

        Ok(GatewayResponse {
            body: body.to_vec(),
            trace_id,
        })
    }
}

impl std::fmt::Debug for GatewayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayClient")
            .field("config", self.config())
            .field("retry", &self.retry)
            .field("cached_tools", &self.cache.current().map(|s| s.count()))
            .finish()
    }
}

fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, serde_json::Error> {
    serde_json::from_slice(body)
}

/// Map a reqwest failure to a Connection-kind error
fn transport_error(url: &str, err: &reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        GatewayError::timeout(url, describe(err))
    } else {
        GatewayError::connect(url, describe(err))
    }
}

/// Render an error with its source chain ("a: b: c")
fn describe(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

/// The gateway's failure envelope: an object holding `error` and at most a
/// `trace_id` besides. Any other 2xx body is a result and passes through.
fn remote_failure(result: &Value) -> Option<String> {
    let object = result.as_object()?;
    if object.keys().any(|key| key != "error" && key != "trace_id") {
        return None;
    }
    match object.get("error")? {
        Value::Null => None,
        Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;
    use serde_json::json;

    fn offline_client() -> GatewayClient {
        let config = GatewayConfig::new("http://127.0.0.1:9").with_retry_count(0);
        GatewayClient::with_logger(config, Arc::new(NoOpLogger)).unwrap()
    }

    #[test]
    fn test_from_gateway_defaults() {
        let client = GatewayClient::from_gateway("http://localhost:3000", None).unwrap();
        assert_eq!(client.config().gateway_url(), "http://localhost:3000");
        assert_eq!(client.config().auth_token(), None);
        assert_eq!(client.retry_policy(), RetryPolicy::default());
        assert!(client.cached_tools().is_none());
    }

    #[test]
    fn test_from_gateway_with_auth() {
        let client = GatewayClient::from_gateway("http://localhost:3000", Some("test-token")).unwrap();
        assert_eq!(client.config().auth_token(), Some("test-token"));
    }

    #[test]
    fn test_from_gateway_rejects_empty_url() {
        assert!(GatewayClient::from_gateway("", None).is_err());
    }

    #[tokio::test]
    async fn test_malformed_arguments_fail_before_network() {
        // The gateway address is unreachable, so reaching the network would
        // produce a Connection error instead.
        let client = offline_client();

        let err = client.call_tool("users.Users.Get", "{not json").await.unwrap_err();
        assert!(err.is_tool());
        assert!(matches!(err, GatewayError::InvalidArguments(_)));

        let err = client.call_tool("users.Users.Get", "").await.unwrap_err();
        assert!(err.is_tool());
    }

    #[test]
    fn test_remote_failure_detection() {
        assert_eq!(
            remote_failure(&json!({ "error": "user not found" })),
            Some("user not found".to_string())
        );
        assert_eq!(
            remote_failure(&json!({ "error": { "code": 404, "detail": "missing" } })),
            Some(r#"{"code":404,"detail":"missing"}"#.to_string())
        );
        assert_eq!(
            remote_failure(&json!({ "error": "rpc timeout", "trace_id": "abc-123" })),
            Some("rpc timeout".to_string())
        );
        assert_eq!(remote_failure(&json!({ "result": {}, "error": "ignored" })), None);
        assert_eq!(remote_failure(&json!({ "error": "none", "user": { "id": "x" } })), None);
        assert_eq!(remote_failure(&json!({ "trace_id": "abc-123" })), None);
        assert_eq!(remote_failure(&json!({ "error": null, "user": {} })), None);
        assert_eq!(remote_failure(&json!({ "user": { "id": "user-123" } })), None);
        assert_eq!(remote_failure(&json!([1, 2, 3])), None);
    }

    #[test]
    fn test_describe_source_chain() {
        #[derive(Debug)]
        struct Inner;
        impl std::fmt::Display for Inner {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("connection refused")
            }
        }
        impl StdError for Inner {}

        #[derive(Debug)]
        struct Outer(Inner);
        impl std::fmt::Display for Outer {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("error sending request")
            }
        }
        impl StdError for Outer {
            fn source(&self) -> Option<&(dyn StdError + 'static)> {
                Some(&self.0)
            }
        }

        assert_eq!(describe(&Outer(Inner)), "error sending request: connection refused");
    }
}
