//! Platform path helpers for locating configuration.

use std::path::PathBuf;

/// Name of the configuration file inside [`config_dir`].
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Returns the touchflow configuration directory.
///
/// Resolves to `<platform config dir>/touchflow`, e.g.
/// `~/.config/touchflow` on Linux. `None` when the platform has no notion of
/// a per-user config directory.
#[must_use]
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("touchflow"))
}

/// Returns the default configuration file path, if it exists.
#[must_use]
pub fn default_config_file() -> Option<PathBuf> {
    config_dir()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .filter(|path| path.is_file())
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading `~`, or platforms without a home directory, are
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use touchflow::infrastructure::expand_tilde;
/// use std::path::PathBuf;
///
/// assert_eq!(expand_tilde("/absolute/path"), PathBuf::from("/absolute/path"));
/// assert_eq!(expand_tilde("relative/path"), PathBuf::from("relative/path"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    if path == "~" {
        return dirs::home_dir().unwrap_or_else(|| PathBuf::from(path));
    }

    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }

    PathBuf::from(path)
}
