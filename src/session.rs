//! Single-session generation state machine.
//!
//! The dispatcher owns at most one in-flight generation attempt. A start
//! request is either rejected up front (busy, offline) with no visible
//! side effects, or accepted and driven to exactly one terminal outcome on
//! the caller's thread. Cancellation is cooperative: any thread may raise
//! the shared signal, and a raised signal always classifies the outcome as
//! cancelled, even when a transport failure surfaces in the same window.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use gen_api::{CancellationSignal, GenerateRequest};
use local_store::HistoryStore;
use uuid::Uuid;

use crate::error::SessionError;
use crate::events::SessionEvent;
use crate::transcript::{Message, TranscriptStore};
use crate::transport::{GenerateTransport, StreamSignal};

/// Where the dispatcher currently is in the session lifecycle.
///
/// Terminal states persist until the next accepted session so observers
/// can read how the previous attempt ended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Idle,
    /// Request accepted, response not yet open.
    Sending,
    /// Response open, deltas may be arriving.
    Streaming,
    Completed,
    Cancelled,
    Failed,
}

impl SessionState {
    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, Self::Sending | Self::Streaming)
    }

    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::Failed)
    }
}

/// How an accepted session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    Completed,
    Cancelled,
    Failed(SessionError),
}

struct ActiveSession {
    id: String,
    cancel: CancellationSignal,
}

/// One-at-a-time session coordinator over a [`GenerateTransport`].
pub struct SessionDispatcher {
    transport: Arc<dyn GenerateTransport>,
    transcript: TranscriptStore,
    history: HistoryStore,
    online: AtomicBool,
    state: Mutex<SessionState>,
    active: Mutex<Option<ActiveSession>>,
}

impl SessionDispatcher {
    #[must_use]
    pub fn new(transport: Arc<dyn GenerateTransport>, history: HistoryStore) -> Self {
        Self {
            transport,
            transcript: TranscriptStore::new(),
            history,
            online: AtomicBool::new(true),
            state: Mutex::new(SessionState::Idle),
            active: Mutex::new(None),
        }
    }

    /// Run one generation attempt to its terminal outcome.
    ///
    /// Rejections (`Busy`, `Offline`) return `Err` and leave the transcript,
    /// history, and any in-flight session untouched. Accepted sessions
    /// always return `Ok` with the outcome; failures of the attempt itself
    /// are reported inside [`SessionOutcome::Failed`], with one error
    /// message appended to the transcript in place of the response.
    pub fn start_session(
        &self,
        prompt: &str,
        language: &str,
        model: &str,
        on_event: &mut dyn FnMut(SessionEvent),
    ) -> Result<SessionOutcome, SessionError> {
        let session_id = Uuid::new_v4().to_string();
        let cancel: CancellationSignal = Arc::new(AtomicBool::new(false));

        {
            let mut active = lock_unpoisoned(&self.active);
            if active.is_some() {
                return Err(SessionError::Busy);
            }
            if !self.online.load(Ordering::Acquire) {
                return Err(SessionError::Offline);
            }
            *active = Some(ActiveSession {
                id: session_id.clone(),
                cancel: Arc::clone(&cancel),
            });
        }

        tracing::info!(session_id = %session_id, language, model, "generation session started");
        self.set_state(SessionState::Sending);
        self.transcript.append(Message::user(prompt));
        // The placeholder shares the session id so event observers can
        // correlate deltas with the message they landed in.
        let mut placeholder = Message::streaming_ai(language, model);
        placeholder.id = session_id.clone();
        self.transcript.append(placeholder);
        on_event(SessionEvent::Started {
            session_id: session_id.clone(),
        });

        let request = GenerateRequest::new(prompt, language, model);
        let result = {
            let mut observe = |signal: StreamSignal| match signal {
                StreamSignal::Opened => {
                    self.set_state(SessionState::Streaming);
                }
                StreamSignal::Delta(content) => {
                    self.transcript.append_delta(&content);
                    on_event(SessionEvent::Delta {
                        session_id: session_id.clone(),
                        content,
                    });
                }
            };
            self.transport.stream(&request, &cancel, &mut observe)
        };

        lock_unpoisoned(&self.active).take();

        // A raised signal outranks whatever else the transport reported.
        let result = if cancel.load(Ordering::Acquire) {
            Err(SessionError::Cancelled)
        } else {
            result
        };

        let outcome = match result {
            Ok(()) => {
                self.transcript.finish_streaming();
                let code = self
                    .transcript
                    .messages()
                    .last()
                    .map(|message| message.content.clone())
                    .unwrap_or_default();
                if let Err(error) = self.history.add(prompt, code, language, model) {
                    tracing::warn!(error = %error, "completed exchange not recorded to history");
                }
                self.set_state(SessionState::Completed);
                tracing::info!(session_id = %session_id, "generation session completed");
                on_event(SessionEvent::Completed {
                    session_id: session_id.clone(),
                });
                SessionOutcome::Completed
            }
            Err(SessionError::Cancelled) => {
                self.transcript.finish_streaming();
                self.set_state(SessionState::Cancelled);
                tracing::info!(session_id = %session_id, "generation session cancelled");
                on_event(SessionEvent::Cancelled {
                    session_id: session_id.clone(),
                });
                SessionOutcome::Cancelled
            }
            Err(error) => {
                if self
                    .transcript
                    .messages()
                    .last()
                    .is_some_and(|message| message.streaming)
                {
                    self.transcript.pop_last();
                }
                self.transcript.append(Message::error(error.to_string(), prompt));
                self.set_state(SessionState::Failed);
                tracing::warn!(session_id = %session_id, error = %error, "generation session failed");
                on_event(SessionEvent::Failed {
                    session_id: session_id.clone(),
                    error: error.clone(),
                });
                SessionOutcome::Failed(error)
            }
        };

        Ok(outcome)
    }

    /// Raise the cancellation signal of the in-flight session.
    ///
    /// Returns false when no session is active; the signal of an already
    /// settled session is never reachable here, so late calls are no-ops.
    pub fn cancel_session(&self) -> bool {
        let active = lock_unpoisoned(&self.active);
        match active.as_ref() {
            Some(session) => {
                session.cancel.store(true, Ordering::Release);
                tracing::debug!(session_id = %session.id, "cancellation requested");
                true
            }
            None => false,
        }
    }

    /// Remove the pending error message, if any, and return its prompt so
    /// the caller can resubmit it through [`Self::start_session`].
    pub fn take_retry_prompt(&self) -> Option<String> {
        self.transcript.take_retry_prompt()
    }

    /// Record connectivity as reported by the environment. Offline rejects
    /// new sessions; an in-flight session is left to the transport.
    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::Release);
    }

    #[must_use]
    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        *lock_unpoisoned(&self.state)
    }

    #[must_use]
    pub fn transcript(&self) -> &TranscriptStore {
        &self.transcript
    }

    #[must_use]
    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    fn set_state(&self, state: SessionState) {
        *lock_unpoisoned(&self.state) = state;
    }
}

fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

#[cfg(test)]
mod tests {
    use super::SessionState;

    #[test]
    fn state_classification() {
        assert!(!SessionState::Idle.is_active());
        assert!(SessionState::Sending.is_active());
        assert!(SessionState::Streaming.is_active());
        assert!(SessionState::Completed.is_terminal());
        assert!(SessionState::Cancelled.is_terminal());
        assert!(SessionState::Failed.is_terminal());
        assert!(!SessionState::Idle.is_terminal());
    }
}
