//! User settings stored by the backend

use serde::{Deserialize, Serialize};

use crate::units::{DisplayUnits, DistanceUnit, ElevationUnit};

/// Prefix the backend uses when echoing stored API keys
pub const MASKED_KEY_PREFIX: &str = "***";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub id: String,

    #[serde(default)]
    pub distance_unit: DistanceUnit,

    #[serde(default = "default_pace_format")]
    pub pace_format: String,

    #[serde(default)]
    pub elevation_unit: ElevationUnit,

    /// Masked as `***xxxx` by the backend
    #[serde(default)]
    pub openai_api_key: Option<String>,

    #[serde(default)]
    pub openrouter_api_key: Option<String>,

    #[serde(default)]
    pub style_preferences: Option<serde_json::Value>,

    pub created_at: String,

    #[serde(default)]
    pub updated_at: Option<String>,
}

fn default_pace_format() -> String {
    "mm:ss".to_string()
}

impl Settings {
    pub fn display_units(&self) -> DisplayUnits {
        DisplayUnits::new(self.distance_unit, self.elevation_unit)
    }
}

/// Settings update body; unset fields keep their stored values
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_unit: Option<DistanceUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pace_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation_unit: Option<ElevationUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openai_api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openrouter_api_key: Option<String>,
}

pub fn is_masked_key(key: &str) -> bool {
    key.starts_with(MASKED_KEY_PREFIX)
}

impl SettingsUpdate {
    /// Drop API keys that are still the masked echo of a stored key
    pub fn without_masked_keys(mut self) -> Self {
        self.openai_api_key = self.openai_api_key.filter(|k| !is_masked_key(k));
        self.openrouter_api_key = self.openrouter_api_key.filter(|k| !is_masked_key(k));
        self
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
