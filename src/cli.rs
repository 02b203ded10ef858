//! Command-line argument parsing
//!
//! Flags override values from the settings file.

use clap::Parser;
use std::path::PathBuf;

use crate::config::Settings;

/// Emacs-style chorded hotkeys in a window
#[derive(Parser, Debug, Default)]
#[command(name = "keychord", version, about = "Emacs-style chorded hotkeys")]
pub struct CliArgs {
    /// Settings file to use instead of the one in the config directory
    #[arg(short = 'c', long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Chord timeout in milliseconds
    #[arg(short = 't', long, value_name = "MS")]
    pub timeout: Option<u64>,

    /// Built-in preset to load
    #[arg(short = 'p', long, value_name = "NAME")]
    pub preset: Option<String>,

    /// Print the path of the newest log file and exit
    #[arg(long)]
    pub log_path: bool,
}

impl CliArgs {
    /// Resolve the effective settings
    ///
    /// An explicit `--config` must load cleanly; the default location falls
    /// back to defaults.
    pub fn into_settings(self) -> Result<Settings, String> {
        let base = match &self.config {
            Some(path) => Settings::load_from(path).map_err(|e| e.to_string())?,
            None => Settings::load(),
        };
        self.apply(base)
    }

    /// Apply flag overrides on top of `settings`
    pub fn apply(self, mut settings: Settings) -> Result<Settings, String> {
        if let Some(timeout) = self.timeout {
            settings.chord_timeout_ms = timeout;
        }
        if let Some(preset) = self.preset {
            settings.selected_preset = preset;
        }

        settings.validate().map_err(|e| e.to_string())?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_keeps_settings() {
        let settings = CliArgs::default().apply(Settings::default()).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_timeout_override() {
        let args = CliArgs::parse_from(["keychord", "--timeout", "1500"]);
        let settings = args.apply(Settings::default()).unwrap();
        assert_eq!(settings.chord_timeout_ms, 1500);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let args = CliArgs::parse_from(["keychord", "-t", "0"]);
        assert!(args.apply(Settings::default()).is_err());
    }

    #[test]
    fn test_preset_override() {
        let args = CliArgs::parse_from(["keychord", "--preset", "custom"]);
        let settings = args.apply(Settings::default()).unwrap();
        assert_eq!(settings.selected_preset, "custom");
    }

    #[test]
    fn test_log_path_flag() {
        assert!(!CliArgs::parse_from(["keychord"]).log_path);
        assert!(CliArgs::parse_from(["keychord", "--log-path"]).log_path);
    }

    #[test]
    fn test_explicit_config_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let args = CliArgs {
            config: Some(dir.path().join("missing.yaml")),
            ..CliArgs::default()
        };
        assert!(args.into_settings().is_err());
    }
}
