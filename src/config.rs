//! Settings persistence
//!
//! Stores user preferences in `~/.config/keychord/config.yaml`

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::keymap::{KeymapError, DEFAULT_CHORD_TIMEOUT, DEFAULT_PRESET};
use crate::kill_ring::DEFAULT_KILL_RING_SIZE;

/// Settings that persist across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Name of the built-in preset to load
    pub selected_preset: String,
    /// Inactivity window between the keys of a chord
    pub chord_timeout_ms: u64,
    pub kill_ring_max_size: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            selected_preset: DEFAULT_PRESET.to_string(),
            chord_timeout_ms: DEFAULT_CHORD_TIMEOUT.as_millis() as u64,
            kill_ring_max_size: DEFAULT_KILL_RING_SIZE,
        }
    }
}

impl Settings {
    /// Load settings from the config directory, or defaults if missing or invalid
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(settings) => {
                tracing::info!("Loaded config from {}", path.display());
                settings
            }
            Err(e) => {
                tracing::warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Load and validate settings from an explicit path
    pub fn load_from(path: &Path) -> Result<Self, KeymapError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            KeymapError::Io(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let settings: Settings = serde_yaml::from_str(&content).map_err(|e| {
            KeymapError::Parse(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to the config directory
    pub fn save(&self) -> Result<(), KeymapError> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| KeymapError::Io("No config directory available".to_string()))?;
        self.save_to(&path)
    }

    /// Save settings to an explicit path, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), KeymapError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                KeymapError::Io(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| KeymapError::Parse(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content).map_err(|e| {
            KeymapError::Io(format!("Failed to write config to {}: {}", path.display(), e))
        })?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    pub fn validate(&self) -> Result<(), KeymapError> {
        if self.chord_timeout_ms == 0 {
            return Err(KeymapError::InvalidTimeout(Duration::ZERO));
        }
        if self.kill_ring_max_size == 0 {
            return Err(KeymapError::Parse(
                "kill_ring_max_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn chord_timeout(&self) -> Duration {
        Duration::from_millis(self.chord_timeout_ms)
    }
}
