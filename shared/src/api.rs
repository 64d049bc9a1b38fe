use serde::{Deserialize, Serialize};

// ============================================================================
// Endpoints
// ============================================================================

/// Stores the current user's Google OAuth credentials.
pub const CREDENTIALS_PATH: &str = "/api/v1/google/credentials";

/// Lists the current user's Google Calendar events for the next hour.
pub const EVENTS_NEXT_HOUR_PATH: &str = "/api/v1/google/events/next-hour";

// ============================================================================
// Response Types
// ============================================================================

/// Generic acknowledgement returned by mutating endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Calendar events for the next hour, exactly as the backend returned them.
///
/// The backend currently answers with `{"events": [...]}`, but the shape is
/// not part of the contract and is never interpreted by the frontend.
pub type EventsResult = serde_json::Value;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_from_backend_body() {
        let message: Message = serde_json::from_str(r#"{"message":"Credentials saved"}"#).unwrap();
        assert_eq!(message, Message::new("Credentials saved"));
    }

    #[test]
    fn test_message_ignores_unknown_fields() {
        let message: Message =
            serde_json::from_str(r#"{"message":"ok","request_id":"abc"}"#).unwrap();
        assert_eq!(message.message, "ok");
    }

    #[test]
    fn test_endpoints_are_versioned_google_routes() {
        assert!(CREDENTIALS_PATH.starts_with("/api/v1/google/"));
        assert!(EVENTS_NEXT_HOUR_PATH.starts_with("/api/v1/google/"));
    }
}
