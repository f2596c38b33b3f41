//! Gateway error types
//!
//! Every failure surfaced by the client belongs to one of three kinds:
//! - **Connection**: the gateway could not be reached or answered with an
//!   unexpected status
//! - **Auth**: the gateway rejected the credential (401) or its scope (403)
//! - **Tool**: the invocation itself failed (bad arguments, remote failure)

use std::fmt;

use thiserror::Error;

/// Coarse classification of a [`GatewayError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Network, timeout or unexpected-status failure; retry later
    Connection,
    /// Credential rejected; re-authenticate
    Auth,
    /// Invocation failed; fix the input
    Tool,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Connection => "connection",
            ErrorKind::Auth => "auth",
            ErrorKind::Tool => "tool",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while talking to the gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The request could not be delivered (DNS, TCP, TLS, reset)
    #[error("Failed to connect to MCP gateway at {url}: {message}")]
    Connect { url: String, message: String },

    /// The request did not complete within the configured timeout
    #[error("Request to MCP gateway at {url} timed out: {message}")]
    Timeout { url: String, message: String },

    /// The gateway answered with a status other than 2xx, 401 or 403
    #[error("MCP gateway returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The gateway answered 2xx with a payload we cannot use
    #[error("Invalid response from MCP gateway: {0}")]
    InvalidResponse(String),

    #[error("Authentication failed")]
    Unauthorized,

    #[error("Forbidden: insufficient permissions")]
    Forbidden,

    /// Tool arguments are not valid JSON
    #[error("Invalid JSON arguments: {0}")]
    InvalidArguments(#[source] serde_json::Error),

    /// The remote operation reported a failure
    #[error("Tool execution failed: {0}")]
    ToolFailed(String),
}

impl GatewayError {
    pub fn connect(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Connect {
            url: url.into(),
            message: message.into(),
        }
    }

    pub fn timeout(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Timeout {
            url: url.into(),
            message: message.into(),
        }
    }

    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            GatewayError::Connect { .. }
            | GatewayError::Timeout { .. }
            | GatewayError::Status { .. }
            | GatewayError::InvalidResponse(_) => ErrorKind::Connection,
            GatewayError::Unauthorized | GatewayError::Forbidden => ErrorKind::Auth,
            GatewayError::InvalidArguments(_) | GatewayError::ToolFailed(_) => ErrorKind::Tool,
        }
    }

    pub fn is_connection(&self) -> bool {
        self.kind() == ErrorKind::Connection
    }

    pub fn is_auth(&self) -> bool {
        self.kind() == ErrorKind::Auth
    }

    pub fn is_tool(&self) -> bool {
        self.kind() == ErrorKind::Tool
    }

    /// Whether retrying the same request may succeed.
    ///
    /// Only transport-level failures qualify. A status code is a definitive
    /// answer from the gateway and is never retried.
    pub fn is_transient(&self) -> bool {
        matches!(self, GatewayError::Connect { .. } | GatewayError::Timeout { .. })
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;
