//! Configuration paths for keychord
//!
//! All config files live under:
//! - Unix/macOS: `~/.config/keychord/`
//! - Windows: `%APPDATA%\keychord\`

use std::{
    env, fs,
    path::{Path, PathBuf},
};

const APP_DIR: &str = "keychord";

/// Prefix of the daily-rotated log files (`keychord.log.YYYY-MM-DD`)
pub const LOG_FILE_PREFIX: &str = "keychord.log";

/// Base config directory
///
/// Unix/macOS:
///   - If XDG_CONFIG_HOME is set: `$XDG_CONFIG_HOME/keychord`
///   - Else: `~/.config/keychord`
///
/// Windows:
///   - `%APPDATA%\keychord`
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join(APP_DIR))
    }

    #[cfg(not(target_os = "windows"))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .map(|config| config.join(APP_DIR))
    }
}

/// `~/.config/keychord/config.yaml`
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

/// `~/.config/keychord/logs/`
pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

/// Newest log file in `logs_dir`, falling back to the undated name
pub fn log_file() -> Option<PathBuf> {
    let logs_dir = logs_dir()?;
    Some(newest_log_in(&logs_dir).unwrap_or_else(|| logs_dir.join(LOG_FILE_PREFIX)))
}

/// YYYY-MM-DD suffixes sort naturally, so the greatest name is the newest
fn newest_log_in(dir: &Path) -> Option<PathBuf> {
    fs::read_dir(dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(LOG_FILE_PREFIX))
        })
        .max()
}

fn ensure_dir(path: &Path) -> Result<(), String> {
    fs::create_dir_all(path)
        .map_err(|e| format!("Failed to create directory {}: {}", path.display(), e))
}

/// Ensure the base config dir exists, returning it
pub fn ensure_config_dir() -> Result<PathBuf, String> {
    let dir = config_dir().ok_or_else(|| "No config directory available".to_string())?;
    ensure_dir(&dir)?;
    Ok(dir)
}

/// Ensure logs dir exists, returning it
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let logs = ensure_config_dir()?.join("logs");
    ensure_dir(&logs)?;
    Ok(logs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_log_in() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "keychord.log.2026-01-05",
            "keychord.log.2026-01-07",
            "other.log.2026-02-01",
        ] {
            fs::write(dir.path().join(name), "").unwrap();
        }

        assert_eq!(
            newest_log_in(dir.path()),
            Some(dir.path().join("keychord.log.2026-01-07"))
        );
    }

    #[test]
    fn test_newest_log_in_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(newest_log_in(&dir.path().join("nope")), None);
    }
}
