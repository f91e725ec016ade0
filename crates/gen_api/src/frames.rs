use serde::Deserialize;

/// One decoded unit of the incremental-delivery protocol.
///
/// Frames are transient: they are applied to the caller's accumulator in
/// arrival order and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// Incremental text to append to the response being reconstructed.
    ContentDelta(String),
    /// Terminal success marker.
    Done,
    /// Terminal failure reported by the service inside the stream.
    Error(String),
}

impl Frame {
    /// Returns true when this frame terminates the stream.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Error(_))
    }

    /// Decode one payload string into a frame.
    ///
    /// A payload carrying several fields maps with precedence
    /// `error` > `done` > `content`. Malformed JSON and payloads with no
    /// recognized field yield `None`.
    #[must_use]
    pub fn from_payload(payload: &str) -> Option<Self> {
        let parsed: FramePayload = serde_json::from_str(payload).ok()?;

        if let Some(message) = parsed.error {
            return Some(Self::Error(message));
        }
        if parsed.done == Some(true) {
            return Some(Self::Done);
        }
        parsed.content.map(Self::ContentDelta)
    }
}

#[derive(Debug, Deserialize)]
struct FramePayload {
    content: Option<String>,
    done: Option<bool>,
    error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::Frame;

    #[test]
    fn payload_maps_content_done_and_error() {
        assert_eq!(
            Frame::from_payload(r#"{"content":"fn main"}"#),
            Some(Frame::ContentDelta("fn main".to_string()))
        );
        assert_eq!(Frame::from_payload(r#"{"done":true}"#), Some(Frame::Done));
        assert_eq!(
            Frame::from_payload(r#"{"error":"model overloaded"}"#),
            Some(Frame::Error("model overloaded".to_string()))
        );
    }

    #[test]
    fn error_takes_precedence_over_other_fields() {
        let frame = Frame::from_payload(r#"{"content":"x","done":true,"error":"boom"}"#);
        assert_eq!(frame, Some(Frame::Error("boom".to_string())));
    }

    #[test]
    fn done_false_is_not_terminal() {
        assert_eq!(Frame::from_payload(r#"{"done":false}"#), None);
        assert_eq!(
            Frame::from_payload(r#"{"done":false,"content":"x"}"#),
            Some(Frame::ContentDelta("x".to_string()))
        );
    }

    #[test]
    fn malformed_and_unrecognized_payloads_yield_none() {
        assert_eq!(Frame::from_payload("not-json"), None);
        assert_eq!(Frame::from_payload(r#"{"other":1}"#), None);
    }

    #[test]
    fn terminal_detection_matches_frame_kind() {
        assert!(!Frame::ContentDelta("x".to_string()).is_terminal());
        assert!(Frame::Done.is_terminal());
        assert!(Frame::Error("x".to_string()).is_terminal());
    }
}
