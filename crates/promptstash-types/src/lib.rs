//! Shared wire types for the Prompt Save HTTP API.
//!
//! Both the server (promptstash-server) and the desktop client
//! (promptstash-client) speak these types, so the two sides cannot drift
//! apart.  The `openapi` feature adds [`utoipa::ToSchema`] derives for the
//! server's Swagger documentation without pulling utoipa into the client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A saved prompt, as returned by `GET /api/prompts` and `POST /api/prompts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Prompt {
    /// Server-assigned id, unique and monotonically increasing.
    pub id: i64,
    /// The prompt text exactly as submitted, whitespace included.
    pub content: String,
    /// Creation timestamp (RFC 3339), assigned server-side at insertion.
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /api/prompts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreatePromptRequest {
    pub content: String,
}

/// Body of `GET /api/status`.
///
/// Carried with HTTP 200 when the database answered the probe and with
/// HTTP 500 when it did not, so the body is meaningful on both status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct StatusResponse {
    #[serde(rename = "dbConnected")]
    pub db_connected: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_response_uses_camel_case_wire_key() {
        let json = serde_json::to_value(StatusResponse { db_connected: true })
            .expect("serialize status");
        assert_eq!(json, serde_json::json!({ "dbConnected": true }));

        let parsed: StatusResponse = serde_json::from_str(r#"{"dbConnected":false}"#)
            .expect("parse status");
        assert!(!parsed.db_connected);
    }

    #[test]
    fn prompt_round_trips_through_json() {
        let prompt = Prompt {
            id: 7,
            content: "Buy milk".to_owned(),
            created_at: "2024-05-01T10:00:00Z".parse().expect("timestamp"),
        };
        let json = serde_json::to_string(&prompt).expect("serialize prompt");
        let back: Prompt = serde_json::from_str(&json).expect("parse prompt");
        assert_eq!(back, prompt);
    }

    #[test]
    fn prompt_wire_shape_is_flat() {
        let prompt = Prompt {
            id: 1,
            content: "hello".to_owned(),
            created_at: "2024-05-01T10:00:00Z".parse().expect("timestamp"),
        };
        let json = serde_json::to_value(&prompt).expect("serialize prompt");
        assert_eq!(json["id"], 1);
        assert_eq!(json["content"], "hello");
        assert!(json["created_at"].is_string());
    }

    #[test]
    fn create_request_carries_content_verbatim() {
        let req: CreatePromptRequest =
            serde_json::from_str(r#"{"content":"  padded  "}"#).expect("parse request");
        assert_eq!(req.content, "  padded  ");
    }
}
