use thiserror::Error;

use crate::assistant::AssistantError;
use crate::recipe::CatalogError;
use crate::scaling::ScalingError;
use crate::settings::SettingsError;
use crate::speech::SpeechError;

/// Unified core errors.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Catalog: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Scaling: {0}")]
    Scaling(#[from] ScalingError),

    #[error("Speech: {0}")]
    Speech(#[from] SpeechError),

    #[error("Assistant: {0}")]
    Assistant(#[from] AssistantError),

    #[error("Settings: {0}")]
    Settings(#[from] SettingsError),

    #[error("No active cooking session")]
    NoActiveSession,
}

impl serde::Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
