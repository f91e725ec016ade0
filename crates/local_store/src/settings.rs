use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StoreError;
use crate::kv::{lock_unpoisoned, KeyValueStore};

/// Fixed key holding the serialized settings object.
pub const SETTINGS_KEY: &str = "codegen.settings";

pub const DEFAULT_LANGUAGE: &str = "auto";
pub const DEFAULT_MODEL: &str = "mixtral-8x7b-32768";
pub const DEFAULT_DARK_MODE: bool = true;

/// Persisted user preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub language: String,
    pub model: String,
    pub dark_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            dark_mode: DEFAULT_DARK_MODE,
        }
    }
}

/// Partial update merged into the current settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsUpdate {
    pub language: Option<String>,
    pub model: Option<String>,
    pub dark_mode: Option<bool>,
}

impl SettingsUpdate {
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    #[must_use]
    pub fn dark_mode(mut self, dark_mode: bool) -> Self {
        self.dark_mode = Some(dark_mode);
        self
    }
}

/// Write-through settings store over the key-value capability.
pub struct SettingsStore {
    kv: Arc<dyn KeyValueStore>,
    current: Mutex<Settings>,
}

impl SettingsStore {
    /// Load persisted settings; each absent or invalid field falls back to
    /// its default independently.
    pub fn load(kv: Arc<dyn KeyValueStore>) -> Self {
        let current = match kv.get(SETTINGS_KEY) {
            Ok(Some(raw)) => parse_with_fallbacks(&raw),
            Ok(None) => Settings::default(),
            Err(error) => {
                tracing::warn!(error = %error, "settings unreadable; using defaults");
                Settings::default()
            }
        };

        Self {
            kv,
            current: Mutex::new(current),
        }
    }

    #[must_use]
    pub fn current(&self) -> Settings {
        lock_unpoisoned(&self.current).clone()
    }

    /// Merge a partial update and persist the full object immediately.
    pub fn set(&self, update: SettingsUpdate) -> Result<Settings, StoreError> {
        let merged = {
            let mut current = lock_unpoisoned(&self.current);
            if let Some(language) = update.language {
                current.language = language;
            }
            if let Some(model) = update.model {
                current.model = model;
            }
            if let Some(dark_mode) = update.dark_mode {
                current.dark_mode = dark_mode;
            }
            current.clone()
        };

        let raw = serde_json::to_string(&merged)
            .map_err(|source| StoreError::serialize(SETTINGS_KEY, source))?;
        self.kv.set(SETTINGS_KEY, &raw)?;

        Ok(merged)
    }
}

fn parse_with_fallbacks(raw: &str) -> Settings {
    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(error) => {
            tracing::warn!(error = %error, "discarding corrupt settings object");
            return Settings::default();
        }
    };

    Settings {
        language: value
            .get("language")
            .and_then(Value::as_str)
            .filter(|language| !language.is_empty())
            .map_or_else(|| DEFAULT_LANGUAGE.to_string(), ToString::to_string),
        model: value
            .get("model")
            .and_then(Value::as_str)
            .filter(|model| !model.is_empty())
            .map_or_else(|| DEFAULT_MODEL.to_string(), ToString::to_string),
        dark_mode: value
            .get("darkMode")
            .and_then(Value::as_bool)
            .unwrap_or(DEFAULT_DARK_MODE),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_with_fallbacks, Settings, DEFAULT_LANGUAGE, DEFAULT_MODEL};

    #[test]
    fn settings_serialize_with_wire_field_names() {
        let value = serde_json::to_value(Settings::default()).expect("settings should serialize");
        assert_eq!(value["language"], "auto");
        assert_eq!(value["model"], DEFAULT_MODEL);
        assert_eq!(value["darkMode"], true);
    }

    #[test]
    fn invalid_fields_fall_back_independently() {
        let settings = parse_with_fallbacks(r#"{"language":"python","model":7,"darkMode":"yes"}"#);
        assert_eq!(settings.language, "python");
        assert_eq!(settings.model, DEFAULT_MODEL);
        assert!(settings.dark_mode);
    }

    #[test]
    fn corrupt_object_falls_back_entirely() {
        let settings = parse_with_fallbacks("{not-json");
        assert_eq!(settings.language, DEFAULT_LANGUAGE);
        assert_eq!(settings.model, DEFAULT_MODEL);
        assert!(settings.dark_mode);
    }
}
