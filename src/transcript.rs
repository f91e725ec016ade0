//! Ordered conversation log for the current run of the application.
//!
//! The transcript is in-memory only; completed exchanges are persisted
//! separately by `local_store::HistoryStore`. Rendering collaborators read
//! snapshots via [`TranscriptStore::messages`] and never mutate entries.

use std::sync::{Mutex, MutexGuard};

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use uuid::Uuid;

/// Who authored a transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Ai,
    Error,
}

/// One transcript entry.
///
/// `streaming` is true only for the in-progress response placeholder;
/// `prompt` is carried only on [`Role::Error`] messages so a failed
/// exchange can be resubmitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub language: Option<String>,
    pub model: Option<String>,
    pub streaming: bool,
    pub prompt: Option<String>,
    pub timestamp: String,
}

impl Message {
    #[must_use]
    pub fn user(prompt: impl Into<String>) -> Self {
        Self::new(Role::User, prompt.into(), None, None, false, None)
    }

    /// Empty response placeholder that deltas accumulate into.
    #[must_use]
    pub fn streaming_ai(language: impl Into<String>, model: impl Into<String>) -> Self {
        Self::new(
            Role::Ai,
            String::new(),
            Some(language.into()),
            Some(model.into()),
            true,
            None,
        )
    }

    /// Failure notice carrying the prompt that produced it.
    #[must_use]
    pub fn error(content: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self::new(
            Role::Error,
            content.into(),
            None,
            None,
            false,
            Some(prompt.into()),
        )
    }

    fn new(
        role: Role,
        content: String,
        language: Option<String>,
        model: Option<String>,
        streaming: bool,
        prompt: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content,
            language,
            model,
            streaming,
            prompt,
            timestamp: now_rfc3339(),
        }
    }
}

/// Append-ordered message log with interior mutability.
#[derive(Default)]
pub struct TranscriptStore {
    messages: Mutex<Vec<Message>>,
}

impl TranscriptStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, message: Message) {
        self.lock().push(message);
    }

    /// Mutate the most recent message in place. No-op on an empty
    /// transcript. Reserved for the owning session.
    pub(crate) fn replace_last(&self, mutate: impl FnOnce(&mut Message)) {
        if let Some(last) = self.lock().last_mut() {
            mutate(last);
        }
    }

    /// Extend the trailing streaming placeholder with one content fragment.
    ///
    /// Fragments arriving after the placeholder was finalized or removed
    /// are dropped.
    pub fn append_delta(&self, content: &str) {
        self.replace_last(|last| {
            if last.streaming {
                last.content.push_str(content);
            }
        });
    }

    /// Mark the trailing streaming placeholder as settled, keeping whatever
    /// content it accumulated.
    pub fn finish_streaming(&self) {
        self.replace_last(|last| last.streaming = false);
    }

    pub(crate) fn pop_last(&self) -> Option<Message> {
        self.lock().pop()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Replace the transcript with the exchange stored in one history entry.
    pub fn load_pair(&self, entry: &local_store::HistoryEntry) {
        let user = Message::user(entry.prompt.clone());
        let mut ai = Message::streaming_ai(entry.language.clone(), entry.model.clone());
        ai.content = entry.code.clone();
        ai.streaming = false;
        ai.timestamp = entry.timestamp.clone();

        let mut messages = self.lock();
        messages.clear();
        messages.push(user);
        messages.push(ai);
    }

    /// Remove the most recent error message and yield its prompt for
    /// resubmission. Returns `None` when no failed exchange is pending.
    pub fn take_retry_prompt(&self) -> Option<String> {
        let mut messages = self.lock();
        let index = messages
            .iter()
            .rposition(|message| message.role == Role::Error && message.prompt.is_some())?;
        messages.remove(index).prompt
    }

    /// Snapshot in append order for rendering collaborators.
    #[must_use]
    pub fn messages(&self) -> Vec<Message> {
        self.lock().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Message>> {
        match self.messages.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default()
}
