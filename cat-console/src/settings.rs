//! Console settings
//!
//! Persisted as JSON under the XDG config directory. Engine timing lives
//! inside the same file, so poll cadences and inhibit windows can be tuned
//! without rebuilding.

use std::path::PathBuf;

use cat_engine::EngineConfig;
use serde::{Deserialize, Serialize};

/// Saved console configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleSettings {
    /// Serial port path, e.g. /dev/ttyUSB0
    pub port: Option<String>,
    /// Engine timing, including the baud rate and poll cadences
    pub engine: EngineConfig,
}

impl ConsoleSettings {
    /// Get the XDG config directory for cathode
    /// Uses $XDG_CONFIG_HOME/cathode, falls back to ~/.config/cathode
    fn config_dir() -> Option<PathBuf> {
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_config);
            if path.is_absolute() {
                return Some(path.join("cathode"));
            }
        }

        dirs::home_dir().map(|h| h.join(".config").join("cathode"))
    }

    /// Get the settings file path
    fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.json"))
    }

    /// Load settings from disk
    pub fn load() -> Self {
        Self::settings_path()
            .and_then(|path| std::fs::read_to_string(path).ok())
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<(), String> {
        let path =
            Self::settings_path().ok_or_else(|| "Could not determine settings path".to_string())?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create settings directory: {}", e))?;
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize settings: {}", e))?;

        std::fs::write(&path, json).map_err(|e| format!("Failed to write settings: {}", e))?;

        Ok(())
    }
}
