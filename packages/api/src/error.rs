use serde::Deserialize;
use thiserror::Error;

/// Errors returned by the network layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request could not complete (connection refused, DNS, timeout, ...).
    #[error("network error: {0}")]
    Network(String),

    /// The identity endpoint answered with a non-2xx status.
    #[error("not authenticated (status {status})")]
    NotAuthenticated { status: u16 },

    /// Any other non-2xx response from an API call.
    #[error("request failed with status {status}")]
    Status {
        status: u16,
        message: Option<String>,
        code: Option<String>,
    },

    /// The response body did not match the expected shape.
    #[error("invalid response body: {0}")]
    Decode(String),

    /// Client configuration could not be loaded.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Error body shapes the gateway produces (`detail` comes from the Python services).
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    detail: Option<serde_json::Value>,
    code: Option<String>,
}

impl ApiError {
    /// Build an [`ApiError::Status`] from a status code and raw response body.
    pub fn from_status_body(status: u16, body: &str) -> Self {
        let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
        let message = parsed.message.or_else(|| match parsed.detail {
            Some(serde_json::Value::String(s)) => Some(s),
            Some(other) => Some(other.to_string()),
            None => None,
        });
        ApiError::Status {
            status,
            message,
            code: parsed.code,
        }
    }

    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotAuthenticated { status } | ApiError::Status { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    /// True for 401/403, the statuses that end a session.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }

    /// Human-readable message for display next to a failed action.
    pub fn message(&self) -> String {
        match self {
            ApiError::Network(_) => "Unable to reach the server.".to_string(),
            ApiError::NotAuthenticated { .. } => "You are not signed in.".to_string(),
            ApiError::Status {
                message: Some(message),
                ..
            } => message.clone(),
            ApiError::Status { status, .. } => format!("Request failed ({status})."),
            ApiError::Decode(_) => "The server sent an unexpected response.".to_string(),
            ApiError::Config(detail) => format!("Client misconfigured: {detail}"),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else if e.is_builder() {
            ApiError::Config(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

impl From<config::ConfigError> for ApiError {
    fn from(e: config::ConfigError) -> Self {
        ApiError::Config(e.to_string())
    }
}
