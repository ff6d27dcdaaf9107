//! Error types for the Crossref MCP server.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.
//! The `Display` text of a [`ClientError`] is what callers see in the `message`
//! field of an error envelope, so it carries no extra prefix.

/// Errors from the HTTP client layer.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// Upstream answered with a non-2xx status.
    #[error("API request failed with status {status}")]
    Status {
        /// HTTP status code
        status: u16,
    },

    /// HTTP transport error (connection, DNS, TLS, timeout, etc.)
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not the expected JSON.
    #[error("{0}")]
    Parse(#[from] serde_json::Error),

    /// DOI has a `.` or `..` path segment, which URL normalization would
    /// resolve into a different identifier.
    #[error("Invalid DOI: {doi}")]
    InvalidDoi {
        /// DOI as looked up
        doi: String,
    },

    /// Any other failure to reach the upstream, described verbatim.
    #[error("{0}")]
    Transport(String),
}

impl ClientError {
    /// Create a status error.
    #[must_use]
    pub const fn status(status: u16) -> Self {
        Self::Status { status }
    }

    /// Create a transport error from a plain description.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Create an invalid-DOI error.
    #[must_use]
    pub fn invalid_doi(doi: impl Into<String>) -> Self {
        Self::InvalidDoi { doi: doi.into() }
    }
}

/// Errors from MCP tool execution.
///
/// Upstream failures never appear here; they are reported inside the
/// envelope. These are host-level faults only.
#[derive(thiserror::Error, Debug)]
pub enum ToolError {
    /// Arguments did not match the tool's input schema.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(#[source] serde_json::Error),

    /// Envelope could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ToolError {
    /// JSON-RPC error code for this fault.
    #[must_use]
    pub const fn code(&self) -> i32 {
        match self {
            Self::InvalidArguments(_) => -32602,
            Self::Serialization(_) => -32000,
        }
    }
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for tool operations.
pub type ToolResult<T> = Result<T, ToolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_template() {
        assert_eq!(ClientError::status(404).to_string(), "API request failed with status 404");
        assert!(matches!(ClientError::status(503), ClientError::Status { status: 503 }));
    }

    #[test]
    fn test_transport_message_is_verbatim() {
        let err = ClientError::transport("Network error");
        assert_eq!(err.to_string(), "Network error");
    }

    #[test]
    fn test_parse_error_describes_failure() {
        let source = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err = ClientError::from(source);
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_tool_error_codes() {
        let bad = serde_json::from_str::<u32>("\"x\"").unwrap_err();
        assert_eq!(ToolError::InvalidArguments(bad).code(), -32602);
    }
}
