//! Local persistence for the generation client.
//!
//! A minimal key-value capability ([`KeyValueStore`]) backs the two stores
//! the client core owns: a bounded newest-first history of completed
//! prompt/response exchanges and write-through user settings. Each store
//! owns a disjoint key; corrupt or missing persisted state is never fatal.

mod error;
mod history;
mod kv;
mod paths;
mod settings;

pub use error::StoreError;
pub use history::{HistoryEntry, HistoryStore, HISTORY_CAPACITY, HISTORY_KEY};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use paths::{sanitize_key_for_filename, store_root};
pub use settings::{
    Settings, SettingsStore, SettingsUpdate, DEFAULT_DARK_MODE, DEFAULT_LANGUAGE, DEFAULT_MODEL,
    SETTINGS_KEY,
};
