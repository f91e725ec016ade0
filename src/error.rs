use gen_api::GenApiError;
use thiserror::Error;

/// Session-scoped failure taxonomy surfaced at the dispatcher boundary.
///
/// None of these are fatal to the process: rejected starts leave existing
/// state untouched, and failures of an accepted session surface as one
/// error message in the transcript plus a terminal event, after which the
/// dispatcher is available again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// A generation session is already in flight.
    #[error("a generation session is already active")]
    Busy,

    /// Connectivity is known to be down; the request was never dispatched.
    #[error("no connectivity, request not sent")]
    Offline,

    /// The service answered HTTP 429.
    #[error("the service is rate limiting requests: {0}")]
    RateLimited(String),

    /// Any other non-success HTTP status.
    #[error("the service rejected the request with HTTP {status}: {message}")]
    Server { status: u16, message: String },

    /// Transport-level failure before a terminal frame.
    #[error("network failure: {0}")]
    Network(String),

    /// An explicit `error` frame inside the stream.
    #[error("the service reported a generation failure: {0}")]
    Protocol(String),

    /// Cooperative abort; classification, not an error outcome.
    #[error("the session was cancelled")]
    Cancelled,
}

impl From<GenApiError> for SessionError {
    fn from(error: GenApiError) -> Self {
        match error {
            GenApiError::RateLimited(message) => Self::RateLimited(message),
            GenApiError::Status { status, message } => Self::Server {
                status: status.as_u16(),
                message,
            },
            GenApiError::StreamFailed(message) => Self::Protocol(message),
            GenApiError::Cancelled => Self::Cancelled,
            GenApiError::Request(error) => Self::Network(error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use gen_api::GenApiError;

    use super::SessionError;

    #[test]
    fn transport_errors_map_to_session_taxonomy() {
        assert_eq!(
            SessionError::from(GenApiError::RateLimited("slow down".to_string())),
            SessionError::RateLimited("slow down".to_string())
        );
        assert_eq!(
            SessionError::from(GenApiError::Status {
                status: gen_api::StatusCode::BAD_GATEWAY,
                message: "bad upstream".to_string(),
            }),
            SessionError::Server {
                status: 502,
                message: "bad upstream".to_string(),
            }
        );
        assert_eq!(
            SessionError::from(GenApiError::StreamFailed("mid-stream".to_string())),
            SessionError::Protocol("mid-stream".to_string())
        );
        assert_eq!(
            SessionError::from(GenApiError::Cancelled),
            SessionError::Cancelled
        );
    }
}
