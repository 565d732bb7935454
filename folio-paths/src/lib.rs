//! XDG Base Directory paths for folio.
//!
//! XDG paths are used on every platform, matching other terminal tools,
//! rather than platform-native locations.

use std::path::PathBuf;

const APP_DIR: &str = "folio";

/// Get the folio config directory.
///
/// Returns `$XDG_CONFIG_HOME/folio` if set, otherwise `~/.config/folio`.
/// The user-level `config.toml` lives here.
///
/// # Examples
///
/// ```
/// use folio_paths::config_dir;
///
/// let config = config_dir();
/// let file = config.join("config.toml");
/// ```
pub fn config_dir() -> PathBuf {
    resolve("XDG_CONFIG_HOME", ".config", |key| std::env::var(key).ok())
}

/// Get the folio state directory.
///
/// Returns `$XDG_STATE_HOME/folio` if set, otherwise `~/.local/state/folio`.
/// Log files are written here so they never mix with the terminal UI.
pub fn state_dir() -> PathBuf {
    resolve("XDG_STATE_HOME", ".local/state", |key| {
        std::env::var(key).ok()
    })
}

/// Path of the log file inside [`state_dir`].
pub fn log_file() -> PathBuf {
    state_dir().join("folio.log")
}

fn resolve(env_key: &str, home_fallback: &str, var: impl Fn(&str) -> Option<String>) -> PathBuf {
    if let Some(base) = var(env_key).filter(|v| !v.is_empty()) {
        PathBuf::from(base).join(APP_DIR)
    } else if let Some(home) = dirs::home_dir() {
        home.join(home_fallback).join(APP_DIR)
    } else {
        PathBuf::from(home_fallback).join(APP_DIR)
    }
}
