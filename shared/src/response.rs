//! API Response types
//!
//! Every endpoint of the reward service answers with the same envelope:
//!
//! ```json
//! {
//!     "success": true,
//!     "message": "Category created",
//!     "data": [ ... ]
//! }
//! ```
//!
//! `message` and `data` are both optional. On failure `success` is `false`
//! and `message` carries the text shown to the admin.

use serde::{Deserialize, Serialize};

use crate::error::ErrorCode;

/// Unified API response structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the server applied the request
    pub success: bool,
    /// Human-readable message (optional on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Response data (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Structured error code, only present on failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response carrying data
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            code: None,
        }
    }

    /// Create an error response
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
            code: Some(code),
        }
    }
}

impl ApiResponse<()> {
    /// Successful response without payload
    pub fn done() -> Self {
        Self {
            success: true,
            message: None,
            data: None,
            code: None,
        }
    }

    /// Successful response without payload, with a message
    pub fn done_with_message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
            code: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_success_envelope() {
        let resp: ApiResponse<serde_json::Value> =
            serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(resp.success);
        assert!(resp.message.is_none());
        assert!(resp.data.is_none());
    }

    #[test]
    fn test_failure_surfaces_message() {
        let resp: ApiResponse<()> =
            serde_json::from_str(r#"{"success":false,"message":"Category exists"}"#).unwrap();
        assert!(!resp.success);
        assert_eq!(resp.message.as_deref(), Some("Category exists"));
    }

    #[test]
    fn test_done_skips_empty_fields() {
        let json = serde_json::to_string(&ApiResponse::done()).unwrap();
        assert_eq!(json, r#"{"success":true}"#);
    }
}
