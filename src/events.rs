use crate::error::SessionError;

/// Lifecycle notifications emitted by [`crate::SessionDispatcher`].
///
/// Every accepted session emits `Started` followed by zero or more `Delta`s
/// and then exactly one terminal event. Events carry the session id so late
/// observers can discard notifications from a superseded session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The request was accepted and dispatched.
    Started { session_id: String },
    /// One content fragment arrived, already appended to the transcript.
    Delta { session_id: String, content: String },
    /// The stream finished with a terminal `done` frame or end-of-data.
    Completed { session_id: String },
    /// The session was cooperatively aborted; partial output is kept.
    Cancelled { session_id: String },
    /// The session failed; the transcript carries one error message.
    Failed {
        session_id: String,
        error: SessionError,
    },
}

impl SessionEvent {
    #[must_use]
    pub fn session_id(&self) -> &str {
        match self {
            Self::Started { session_id }
            | Self::Delta { session_id, .. }
            | Self::Completed { session_id }
            | Self::Cancelled { session_id }
            | Self::Failed { session_id, .. } => session_id,
        }
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Completed { .. } | Self::Cancelled { .. } | Self::Failed { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::SessionEvent;
    use crate::error::SessionError;

    #[test]
    fn terminal_classification() {
        let id = "s-1".to_string();
        assert!(!SessionEvent::Started {
            session_id: id.clone()
        }
        .is_terminal());
        assert!(!SessionEvent::Delta {
            session_id: id.clone(),
            content: "x".to_string()
        }
        .is_terminal());
        assert!(SessionEvent::Completed {
            session_id: id.clone()
        }
        .is_terminal());
        assert!(SessionEvent::Cancelled {
            session_id: id.clone()
        }
        .is_terminal());
        assert!(SessionEvent::Failed {
            session_id: id,
            error: SessionError::Offline
        }
        .is_terminal());
    }
}
