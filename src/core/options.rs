//! Generation settings that apply when no annotation says otherwise.

use serde::{Deserialize, Serialize};

use crate::core::model::EmissionMode;

/// Run-wide defaults. Config files use `#[serde(default)]` so they only name
/// the fields that differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateOptions {
    pub default_mode: EmissionMode,
    /// Factory name for constructor-like callables.
    pub default_factory_name: String,
    pub holder_suffix: String,
    pub builder_suffix: String,
    /// Name of the leading receiver parameter on instance-function overloads.
    pub receiver_name: String,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            default_mode: EmissionMode::Overloads,
            default_factory_name: "create".to_string(),
            holder_suffix: "Defaults".to_string(),
            builder_suffix: "Builder".to_string(),
            receiver_name: "receiver".to_string(),
        }
    }
}

impl GenerateOptions {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
