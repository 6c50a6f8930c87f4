//! Path utilities for configuration and data locations.
//!
//! Locations follow the XDG layout under the user's home directory and can be
//! overridden through environment variables:
//!
//! | Purpose | Override | Default |
//! |---|---|---|
//! | Config file | `LIBRIS_CONFIG` | `~/.config/libris/config.toml` |
//! | Data (logs) | `LIBRIS_DATA_DIR` | `~/.local/share/libris` |

use std::env;
use std::path::PathBuf;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "LIBRIS_CONFIG";
/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "LIBRIS_DATA_DIR";

fn home_dir() -> PathBuf {
    env::var_os("HOME").map_or_else(|| PathBuf::from("."), PathBuf::from)
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Returns the data directory used for log files.
///
/// # Examples
///
/// ```
/// use libris::infrastructure::data_dir;
///
/// assert!(data_dir().ends_with("libris") || std::env::var_os("LIBRIS_DATA_DIR").is_some());
/// ```
#[must_use]
pub fn data_dir() -> PathBuf {
    non_empty_var(DATA_DIR_ENV).map_or_else(
        || home_dir().join(".local").join("share").join("libris"),
        |dir| PathBuf::from(expand_tilde(&dir)),
    )
}

/// Returns the location of the TOML configuration file.
///
/// The file may not exist; callers treat a missing file as "no overrides".
#[must_use]
pub fn config_path() -> PathBuf {
    non_empty_var(CONFIG_ENV).map_or_else(
        || home_dir().join(".config").join("libris").join("config.toml"),
        |path| PathBuf::from(expand_tilde(&path)),
    )
}

/// Expands a leading `~` to the user's home directory.
///
/// # Examples
///
/// ```
/// use libris::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// assert!(!expand_tilde("~/notes").starts_with('~'));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    let home = home_dir();
    if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest).to_string_lossy().into_owned()
    } else if path == "~" {
        home.to_string_lossy().into_owned()
    } else {
        path.to_string()
    }
}
