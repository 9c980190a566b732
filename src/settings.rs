//! App settings and saved menu, persisted through the [`Storage`] boundary.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storage::Storage;

const SETTINGS_KEY: &str = "nav_settings";
const MENU_KEY: &str = "christmas_menu";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    pub high_contrast: bool,
    pub font_size_multiplier: f32,
    pub voice_enabled: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            high_contrast: false,
            font_size_multiplier: 1.0,
            voice_enabled: true,
        }
    }
}

/// Loads settings, falling back to defaults when the key is missing or the
/// stored JSON does not parse.
pub fn get_settings(store: &dyn Storage) -> AppSettings {
    match store.get(SETTINGS_KEY) {
        None => AppSettings::default(),
        Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            log::warn!("Failed to parse stored settings: {e}");
            AppSettings::default()
        }),
    }
}

pub fn save_settings(store: &mut dyn Storage, settings: &AppSettings) -> Result<(), SettingsError> {
    store.set(SETTINGS_KEY, serde_json::to_string(settings)?);
    Ok(())
}

/// Recipe ids the user has put on the menu. Same warn-and-default policy as
/// settings.
pub fn get_saved_menu(store: &dyn Storage) -> Vec<String> {
    match store.get(MENU_KEY) {
        None => Vec::new(),
        Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            log::warn!("Failed to parse stored menu: {e}");
            Vec::new()
        }),
    }
}

pub fn save_menu(store: &mut dyn Storage, menu: &[String]) -> Result<(), SettingsError> {
    store.set(MENU_KEY, serde_json::to_string(menu)?);
    Ok(())
}
