use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Transport-level failure taxonomy for generation requests.
#[derive(Debug, Error)]
pub enum GenApiError {
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("rate limited: {0}")]
    RateLimited(String),

    #[error("HTTP {status} {message}")]
    Status { status: StatusCode, message: String },

    #[error("stream failed: {0}")]
    StreamFailed(String),

    #[error("request was cancelled")]
    Cancelled,
}

/// Extract a human-readable message from a non-success response body.
///
/// Accepts `{"error": "<text>"}` and `{"error": {"message": "<text>"}}`
/// shapes; anything else falls back to the raw body or the status reason.
pub fn parse_error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        let message = value
            .get("error")
            .and_then(|error| {
                error
                    .as_str()
                    .or_else(|| error.get("message").and_then(Value::as_str))
            })
            .map(str::trim)
            .filter(|message| !message.is_empty());

        if let Some(message) = message {
            return message.to_string();
        }
    }

    if body.trim().is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        body.trim().to_string()
    }
}
