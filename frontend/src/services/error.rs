//! Error type surfaced by every API call.
//!
//! There is a single kind of failure: either the backend answered with a
//! non-2xx status (or an unreadable 2xx body), or no response arrived at all.
//! The backend's error body is carried along untouched so the error handler
//! can pick a user-facing message out of it.

use serde_json::Value;
use thiserror::Error;

/// Shown when neither the body nor the transport says anything useful.
pub const FALLBACK_ERROR_MESSAGE: &str = "Something went wrong.";

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub url: String,
    /// HTTP status, `None` when the request never got a response.
    pub status: Option<u16>,
    pub status_text: String,
    pub message: String,
    pub body: Option<Value>,
}

impl ApiError {
    /// Error for a response outside the 2xx range.
    pub fn from_response(
        url: impl Into<String>,
        status: u16,
        status_text: impl Into<String>,
        body: Option<Value>,
    ) -> Self {
        let status_text = status_text.into();
        let message = match describe_status(status) {
            Some(description) => description.to_string(),
            None => format!(
                "Generic Error: status: {}; status text: {}; body: {}",
                status,
                if status_text.is_empty() { "undefined" } else { &status_text },
                body.as_ref()
                    .and_then(|body| serde_json::to_string_pretty(body).ok())
                    .unwrap_or_else(|| "undefined".to_string()),
            ),
        };

        Self {
            url: url.into(),
            status: Some(status),
            status_text,
            message,
            body,
        }
    }

    /// Error for a request that failed before any response arrived.
    pub fn network(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status: None,
            status_text: String::new(),
            message: message.into(),
            body: None,
        }
    }

    /// Error for a 2xx response whose body could not be decoded.
    pub fn invalid_body(
        url: impl Into<String>,
        status: u16,
        status_text: impl Into<String>,
        source: serde_json::Error,
    ) -> Self {
        Self {
            url: url.into(),
            status: Some(status),
            status_text: status_text.into(),
            message: format!("Invalid response body: {}", source),
            body: None,
        }
    }

    /// Text to show the user.
    ///
    /// Backend errors carry a `detail` field: either a plain string, or a
    /// list of validation errors each with a `msg`.
    pub fn detail_message(&self) -> String {
        let detail = self.body.as_ref().and_then(|body| body.get("detail"));

        match detail {
            Some(Value::String(detail)) if !detail.is_empty() => detail.clone(),
            Some(Value::Array(items)) if !items.is_empty() => items[0]
                .get("msg")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string()),
            Some(other @ (Value::Object(_) | Value::Number(_) | Value::Bool(true))) => {
                other.to_string()
            }
            _ if self.status.is_none() && !self.message.is_empty() => self.message.clone(),
            _ => FALLBACK_ERROR_MESSAGE.to_string(),
        }
    }
}

fn describe_status(status: u16) -> Option<&'static str> {
    match status {
        400 => Some("Bad Request"),
        401 => Some("Unauthorized"),
        402 => Some("Payment Required"),
        403 => Some("Forbidden"),
        404 => Some("Not Found"),
        500 => Some("Internal Server Error"),
        502 => Some("Bad Gateway"),
        503 => Some("Service Unavailable"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_known_status_message() {
        let err = ApiError::from_response("/x", 404, "Not Found", None);
        assert_eq!(err.status, Some(404));
        assert_eq!(err.to_string(), "Not Found");
    }

    #[test]
    fn test_unknown_status_message() {
        let err = ApiError::from_response("/x", 418, "I'm a teapot", Some(json!({"detail": "no"})));
        assert_eq!(
            err.to_string(),
            "Generic Error: status: 418; status text: I'm a teapot; body: {\n  \"detail\": \"no\"\n}"
        );
    }

    #[test]
    fn test_detail_string() {
        let err = ApiError::from_response(
            "/x",
            404,
            "Not Found",
            Some(json!({"detail": "Google credentials not found"})),
        );
        assert_eq!(err.detail_message(), "Google credentials not found");
    }

    #[test]
    fn test_detail_validation_list() {
        let err = ApiError::from_response(
            "/x",
            422,
            "Unprocessable Entity",
            Some(json!({"detail": [{"loc": ["query"], "msg": "field required"}]})),
        );
        assert_eq!(err.detail_message(), "field required");
    }

    #[test]
    fn test_detail_fallback() {
        let err = ApiError::from_response("/x", 500, "", Some(json!("oops")));
        assert_eq!(err.detail_message(), FALLBACK_ERROR_MESSAGE);

        let err = ApiError::from_response("/x", 500, "", Some(json!({"detail": []})));
        assert_eq!(err.detail_message(), FALLBACK_ERROR_MESSAGE);
    }

    #[test]
    fn test_network_error_uses_transport_message() {
        let err = ApiError::network("/x", "Failed to fetch");
        assert_eq!(err.status, None);
        assert_eq!(err.detail_message(), "Failed to fetch");
    }
}
