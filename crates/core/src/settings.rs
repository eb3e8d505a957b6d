//! Persisted plugin settings.
//!
//! The host stores settings as an opaque JSON blob. Loading merges the
//! stored fields over defaults, so data written by an older version
//! (or a first run with nothing stored) always yields a complete
//! settings value. Malformed data degrades to defaults rather than
//! failing activation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use datepill_host_api::{HostError, SettingsStore};

use crate::style::PillColors;

/// Token format shown in settings UI for the date portion.
pub const DEFAULT_DATE_FORMAT: &str = "YYYY-MM-DD";
/// Token format shown in settings UI for the time portion.
pub const DEFAULT_TIME_FORMAT: &str = "HH:mm";
/// Default color of the text inside pills.
pub const DEFAULT_TEXT_COLOR: &str = "#ffffff";

/// Errors from loading or saving settings through the host store.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error(transparent)]
    Host(#[from] HostError),
    #[error("settings serialization: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The settings shape consumed by the settings-panel collaborator and
/// persisted through the host's key-value store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PillSettings {
    pub date_format: String,
    pub time_format: String,
    pub pill_colors: PillColors,
    pub pill_text_color: String,
}

impl Default for PillSettings {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            pill_colors: PillColors::default(),
            pill_text_color: DEFAULT_TEXT_COLOR.to_string(),
        }
    }
}

impl PillSettings {
    /// Load from the host store, merging stored fields over defaults.
    pub fn load(store: &dyn SettingsStore) -> Result<Self, SettingsError> {
        let Some(value) = store.load()? else {
            tracing::debug!("no stored settings, using defaults");
            return Ok(Self::default());
        };
        match serde_json::from_value(value) {
            Ok(settings) => Ok(settings),
            Err(err) => {
                tracing::warn!("stored settings malformed, using defaults: {err}");
                Ok(Self::default())
            }
        }
    }

    /// Persist to the host store.
    pub fn save(&self, store: &dyn SettingsStore) -> Result<(), SettingsError> {
        let value = serde_json::to_value(self)?;
        store.save(&value)?;
        tracing::debug!("settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use datepill_host_api::MemorySettingsStore;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn empty_store_yields_defaults() {
        let store = MemorySettingsStore::new();
        let settings = PillSettings::load(&store).unwrap();
        assert_eq!(settings, PillSettings::default());
    }

    #[test]
    fn partial_data_keeps_defaults_for_missing_fields() {
        let store = MemorySettingsStore::with_data(json!({
            "pillColors": { "overdue": "#ff0000" }
        }));
        let settings = PillSettings::load(&store).unwrap();

        assert_eq!(settings.pill_colors.overdue, "#ff0000");
        assert_eq!(settings.pill_colors.today, PillColors::DEFAULT_TODAY);
        assert_eq!(settings.pill_text_color, DEFAULT_TEXT_COLOR);
        assert_eq!(settings.date_format, DEFAULT_DATE_FORMAT);
    }

    #[test]
    fn malformed_data_degrades_to_defaults() {
        let store = MemorySettingsStore::with_data(json!({ "pillColors": "red" }));
        let settings = PillSettings::load(&store).unwrap();
        assert_eq!(settings, PillSettings::default());
    }

    #[test]
    fn save_then_load_round_trips() {
        let store = MemorySettingsStore::new();
        let mut settings = PillSettings::default();
        settings.pill_colors.this_week = "#123456".to_string();
        settings.pill_text_color = "#000000".to_string();
        settings.save(&store).unwrap();

        let loaded = PillSettings::load(&store).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn persisted_shape_is_camel_case() {
        let store = MemorySettingsStore::new();
        PillSettings::default().save(&store).unwrap();
        let raw = store.load().unwrap().unwrap();

        assert_eq!(raw["dateFormat"], "YYYY-MM-DD");
        assert_eq!(raw["timeFormat"], "HH:mm");
        assert_eq!(raw["pillTextColor"], "#ffffff");
        assert_eq!(raw["pillColors"]["thisWeek"], "#692ec2");
    }
}
