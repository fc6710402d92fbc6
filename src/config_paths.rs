//! Centralized configuration paths for tree-icons
//!
//! All config files live under:
//! - Unix/macOS: `~/.config/tree-icons/`
//! - Windows: `%APPDATA%\tree-icons\`

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::config::ConfigError;

const APP_DIR: &str = "tree-icons";

/// File name prefix of the daily rolling log; the appender adds a date suffix
pub const LOG_FILE_PREFIX: &str = "tree-icons.log";

/// Base config directory for tree-icons
///
/// Unix/macOS:
///   - If XDG_CONFIG_HOME is set: `$XDG_CONFIG_HOME/tree-icons`
///   - Else: `~/.config/tree-icons`
///
/// Windows:
///   - `%APPDATA%\tree-icons`
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

/// `~/.config/tree-icons/icons.yaml`
pub fn icons_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("icons.yaml"))
}

/// `~/.config/tree-icons/logs/`
pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

fn ensure_dir(path: &Path) -> Result<(), ConfigError> {
    fs::create_dir_all(path).map_err(|e| {
        ConfigError::IoError(format!("Failed to create directory {}: {}", path.display(), e))
    })
}

/// Ensure the base config dir exists, returning it
pub fn ensure_config_dir() -> Result<PathBuf, ConfigError> {
    let dir = config_dir()
        .ok_or_else(|| ConfigError::IoError("No config directory available".to_string()))?;
    ensure_dir(&dir)?;
    Ok(dir)
}

/// Ensure logs dir exists, returning it
pub fn ensure_logs_dir() -> Result<PathBuf, ConfigError> {
    let logs = ensure_config_dir()?.join("logs");
    ensure_dir(&logs)?;
    Ok(logs)
}
