//! Client core for a streaming code-generation service.
//!
//! The core owns one generation attempt at a time: it posts the prompt,
//! consumes the service's newline-delimited `data: <json>` frame stream,
//! reconstructs the response text in arrival order inside a transcript,
//! and records completed exchanges into a bounded persisted history. UI
//! concerns (rendering, clipboard, theming, layout) are external
//! collaborators that observe [`SessionEvent`]s and read store snapshots;
//! nothing in this crate draws anything.
//!
//! Transport is abstracted behind [`GenerateTransport`] so tests drive the
//! state machine with scripted fakes; [`HttpTransport`] adapts the real
//! `gen_api` client.

pub mod catalog;
pub mod error;
pub mod events;
pub mod session;
pub mod transcript;
pub mod transport;

pub use error::SessionError;
pub use events::SessionEvent;
pub use session::{SessionDispatcher, SessionOutcome, SessionState};
pub use transcript::{Message, Role, TranscriptStore};
pub use transport::{GenerateTransport, HttpTransport, StreamSignal};

pub use gen_api::{CancellationSignal, GenApiConfig, GenerateRequest};
pub use local_store::{
    store_root, FileStore, HistoryEntry, HistoryStore, KeyValueStore, MemoryStore, Settings,
    SettingsStore, SettingsUpdate,
};
