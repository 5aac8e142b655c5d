// SPDX-License-Identifier: MPL-2.0
//! Centralized path management for application directories.
//!
//! This module provides a single source of truth for the directories the
//! bootstrap needs: the read-only share path holding bundled translations,
//! the per-user data directory holding `Debug.log`, and the config
//! directory holding `settings.toml`.
//!
//! # Path Resolution Order
//!
//! Data and config directories are resolved in the following priority order:
//! 1. **Explicit override** - parameter to `_with_override()` functions (for tests)
//! 2. **Environment variables** (`IQPUZZLE_DATA_DIR`, `IQPUZZLE_CONFIG_DIR`)
//! 3. **Platform default** - via `dirs` crate, with the lower-cased
//!    application name appended
//!
//! Platform lookups go through the [`PathProvider`] trait so the bootstrap
//! can be exercised against scratch directories.

use std::fs;
use std::path::{Path, PathBuf};

/// Application name used for directory naming.
pub const APP_DIR_NAME: &str = "iqpuzzle";

/// Environment variable to override the data directory.
pub const ENV_DATA_DIR: &str = "IQPUZZLE_DATA_DIR";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "IQPUZZLE_CONFIG_DIR";

/// Source of platform directories used during startup.
pub trait PathProvider {
    /// Candidate per-user data directories, most preferred first.
    /// An empty list means the platform could not supply one.
    fn data_locations(&self) -> Vec<PathBuf>;

    /// Directory containing the running executable.
    fn application_dir(&self) -> PathBuf;
}

/// [`PathProvider`] backed by the real platform directories.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemPaths;

impl PathProvider for SystemPaths {
    fn data_locations(&self) -> Vec<PathBuf> {
        get_app_data_dir().into_iter().collect()
    }

    fn application_dir(&self) -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Returns the application data directory path.
///
/// # Resolution Order
///
/// 1. `IQPUZZLE_DATA_DIR` environment variable (if set and non-empty)
/// 2. Platform-specific data directory:
///    - Linux: `~/.local/share/iqpuzzle/`
///    - macOS: `~/Library/Application Support/iqpuzzle/`
///    - Windows: `C:\Users\<User>\AppData\Roaming\iqpuzzle\`
///
/// Returns `None` if the data directory cannot be determined.
pub fn get_app_data_dir() -> Option<PathBuf> {
    get_app_data_dir_with_override(None)
}

/// Returns the application data directory path with an optional override.
///
/// The override takes highest priority.
pub fn get_app_data_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    resolve_dir(override_path, ENV_DATA_DIR, dirs::data_dir)
}

/// Returns the application config directory path.
///
/// # Resolution Order
///
/// 1. `IQPUZZLE_CONFIG_DIR` environment variable (if set and non-empty)
/// 2. Platform-specific config directory (`~/.config/iqpuzzle/` on Linux)
pub fn get_app_config_dir() -> Option<PathBuf> {
    get_app_config_dir_with_override(None)
}

/// Returns the application config directory path with an optional override.
pub fn get_app_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    resolve_dir(override_path, ENV_CONFIG_DIR, dirs::config_dir)
}

fn resolve_dir(
    override_path: Option<PathBuf>,
    env_var: &str,
    platform_dir: fn() -> Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }

    if let Ok(env_path) = std::env::var(env_var) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }

    platform_dir().map(|mut path| {
        path.push(APP_DIR_NAME);
        path
    })
}

/// Returns the directory holding bundled assets such as `lang/`.
///
/// Installed builds keep them in `<exe dir>/../share/games/iqpuzzle`.
/// When that directory is missing, or `debug` is set, the executable's
/// own directory is used.
pub fn resolve_share_path(application_dir: &Path, debug: bool) -> PathBuf {
    let installed = application_dir
        .join("..")
        .join("share")
        .join("games")
        .join(APP_DIR_NAME);

    if !debug && installed.is_dir() {
        installed
    } else {
        application_dir.to_path_buf()
    }
}

/// Resolves the per-user data directory and creates it if absent.
///
/// Falls back to the application directory when the provider has no
/// data location. Creation failures are logged; the path is returned
/// regardless and later writes into it will fail.
pub fn resolve_data_dir(provider: &dyn PathProvider) -> PathBuf {
    let dir = match provider.data_locations().into_iter().next() {
        Some(dir) => dir,
        None => {
            log::error!("Error while getting data standard path.");
            provider.application_dir()
        }
    };

    if !dir.exists() {
        if let Err(err) = fs::create_dir_all(&dir) {
            log::warn!("Couldn't create data directory {}: {}", dir.display(), err);
        }
    }

    dir
}
