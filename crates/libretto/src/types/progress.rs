//! Progress and Cancellation Notification Types
//!
//! Payloads of `notifications/progress` and `notifications/cancelled`.

use serde::{Deserialize, Serialize};

use super::jsonrpc::RequestId;

/// Progress token identifying a request for progress tracking.
///
/// Either a string or an integer, chosen by the requester.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum ProgressToken {
    String(String),
    Integer(i64),
}

impl std::fmt::Display for ProgressToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProgressToken::String(s) => write!(f, "{}", s),
            ProgressToken::Integer(i) => write!(f, "{}", i),
        }
    }
}

/// `notifications/progress` parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct ProgressParams {
    /// Token from the original request's `_meta.progressToken`.
    pub progress_token: ProgressToken,

    /// Progress so far; absolute when `total` is set, otherwise 0.0 to 1.0.
    pub progress: f64,

    #[serde(default, skip_serializing_if = "crate::codec::omit_none")]
    pub total: Option<f64>,

    #[serde(default, skip_serializing_if = "crate::codec::omit_none")]
    pub message: Option<String>,
}

impl ProgressParams {
    pub fn new(token: ProgressToken, progress: f64) -> Self {
        Self {
            progress_token: token,
            progress,
            total: None,
            message: None,
        }
    }

    pub fn with_total(mut self, total: f64) -> Self {
        self.total = Some(total);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// `notifications/cancelled` parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct CancelledParams {
    /// Id of the request being cancelled.
    pub request_id: RequestId,

    #[serde(default, skip_serializing_if = "crate::codec::omit_none")]
    pub reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_progress_token_forms() {
        let token: ProgressToken = serde_json::from_value(json!("tok-123")).unwrap();
        assert_eq!(token, ProgressToken::String("tok-123".to_string()));

        let token: ProgressToken = serde_json::from_value(json!(42)).unwrap();
        assert_eq!(token, ProgressToken::Integer(42));
    }

    #[test]
    fn test_progress_params() {
        let params = ProgressParams::new(ProgressToken::Integer(1), 50.0)
            .with_total(100.0)
            .with_message("Generating...");

        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["progressToken"], 1);
        assert_eq!(json["progress"], 50.0);
        assert_eq!(json["total"], 100.0);
        assert_eq!(json["message"], "Generating...");
    }

    #[test]
    fn test_cancelled_params() {
        let params: CancelledParams =
            serde_json::from_value(json!({ "requestId": "req-9", "reason": "user" })).unwrap();
        assert_eq!(params.request_id, RequestId::String("req-9".to_string()));
        assert_eq!(params.reason.as_deref(), Some("user"));
    }
}
