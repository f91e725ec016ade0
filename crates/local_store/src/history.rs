use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::StoreError;
use crate::kv::{lock_unpoisoned, KeyValueStore};

/// Fixed key holding the serialized history log.
pub const HISTORY_KEY: &str = "codegen.history";

/// Maximum retained exchanges; the oldest entries are evicted first.
pub const HISTORY_CAPACITY: usize = 50;

/// Immutable record of one completed prompt/response exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub prompt: String,
    pub code: String,
    pub language: String,
    pub model: String,
    pub timestamp: String,
}

/// Bounded newest-first log of completed exchanges.
///
/// The full list is persisted under [`HISTORY_KEY`] on every mutation;
/// missing or corrupt persisted state loads as an empty log.
pub struct HistoryStore {
    kv: Arc<dyn KeyValueStore>,
    entries: Mutex<Vec<HistoryEntry>>,
}

impl HistoryStore {
    /// Load persisted history, tolerating missing or corrupt data.
    pub fn load(kv: Arc<dyn KeyValueStore>) -> Self {
        let entries = match kv.get(HISTORY_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
                Ok(mut entries) => {
                    entries.truncate(HISTORY_CAPACITY);
                    entries
                }
                Err(error) => {
                    tracing::warn!(error = %error, "discarding corrupt history log");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(error) => {
                tracing::warn!(error = %error, "history log unreadable; starting empty");
                Vec::new()
            }
        };

        Self {
            kv,
            entries: Mutex::new(entries),
        }
    }

    /// Record one completed exchange, evicting the oldest entries beyond
    /// capacity, and persist the full list.
    pub fn add(
        &self,
        prompt: impl Into<String>,
        code: impl Into<String>,
        language: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<HistoryEntry, StoreError> {
        let entry = HistoryEntry {
            id: Uuid::new_v4().to_string(),
            prompt: prompt.into(),
            code: code.into(),
            language: language.into(),
            model: model.into(),
            timestamp: now_rfc3339(),
        };

        let snapshot = {
            let mut entries = lock_unpoisoned(&self.entries);
            entries.insert(0, entry.clone());
            entries.truncate(HISTORY_CAPACITY);
            entries.clone()
        };
        self.persist(&snapshot)?;

        Ok(entry)
    }

    /// Delete the entry with the given id, preserving the order of the rest.
    ///
    /// Returns false when no entry matched.
    pub fn remove(&self, id: &str) -> Result<bool, StoreError> {
        let (removed, snapshot) = {
            let mut entries = lock_unpoisoned(&self.entries);
            let before = entries.len();
            entries.retain(|entry| entry.id != id);
            (entries.len() != before, entries.clone())
        };

        if removed {
            self.persist(&snapshot)?;
        }

        Ok(removed)
    }

    /// Empty the log and drop the persisted key.
    pub fn clear(&self) -> Result<(), StoreError> {
        lock_unpoisoned(&self.entries).clear();
        self.kv.remove(HISTORY_KEY)
    }

    /// Newest-first snapshot for rendering collaborators.
    #[must_use]
    pub fn entries(&self) -> Vec<HistoryEntry> {
        lock_unpoisoned(&self.entries).clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        lock_unpoisoned(&self.entries).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Serialize the full log for the external download collaborator.
    pub fn export(&self) -> Result<Vec<u8>, StoreError> {
        let entries = lock_unpoisoned(&self.entries);
        serde_json::to_vec_pretty(&*entries)
            .map_err(|source| StoreError::serialize(HISTORY_KEY, source))
    }

    fn persist(&self, entries: &[HistoryEntry]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(entries)
            .map_err(|source| StoreError::serialize(HISTORY_KEY, source))?;
        self.kv.set(HISTORY_KEY, &raw)
    }
}

pub(crate) fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default()
}
