//! The single error type surfaced by every client operation.
//!
//! # Design
//! There is no per-resource error taxonomy. Transport failures, non-2xx
//! statuses and undecodable bodies all become a `RequestError` carrying a
//! human-readable message and, when a response was received, its HTTP status.
//! The message is shown to the user as-is; the service already localizes it.

use serde::Deserialize;
use thiserror::Error;

/// Error returned by every `RequestExecutor` call and resource operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RequestError {
    pub message: String,
    /// `None` when the request never produced a response (connection
    /// refused, timeout, local file read failure).
    pub status: Option<u16>,
}

impl RequestError {
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: Some(status),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }

    /// A 2xx response whose content the client cannot act on.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(401)
    }

    pub fn is_not_found(&self) -> bool {
        self.status == Some(404)
    }
}

pub type Result<T> = std::result::Result<T, RequestError>;

/// Error envelope returned by the service on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
    #[serde(default)]
    message: Option<String>,
}

/// Extract the human-readable message from an error response body.
///
/// Accepts `{"detail": "..."}`, validation-style
/// `{"detail": [{"msg": "..."}, ...]}` and `{"message": "..."}`. Returns
/// `None` for anything else, including bodies that are not JSON at all.
pub fn decode_error_message(body: &[u8]) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
    let from_detail = match parsed.detail {
        Some(serde_json::Value::String(detail)) => Some(detail),
        Some(serde_json::Value::Array(items)) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    };
    from_detail
        .or(parsed.message)
        .filter(|message| !message.is_empty())
}
