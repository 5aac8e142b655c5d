// SPDX-License-Identifier: MPL-2.0
//! This module handles the persisted user settings, stored in a
//! `settings.toml` file inside the config directory.
//!
//! Only one key is persisted: `GuiLanguage`, either `"auto"` or a language
//! tag such as `"de"`. The locale resolver reads it through the
//! [`SettingsStore`] trait so it can run against an in-memory [`Settings`]
//! in tests and against a [`SettingsFile`] in the application.
//!
//! # Examples
//!
//! ```no_run
//! use iqpuzzle::config::{self, Settings, SettingsStore};
//! use std::path::PathBuf;
//!
//! let path = PathBuf::from("./temp_config_dir/settings.toml");
//! let mut settings = Settings::default();
//! settings.set_gui_language("fr").expect("in-memory store never fails");
//! config::save_to_path(&settings, &path).expect("Failed to save to path");
//!
//! let loaded = config::load_from_path(&path).expect("Failed to load from path");
//! assert_eq!(loaded.gui_language(), Some("fr".to_string()));
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// UI language: `"auto"` or a language tag (e.g. "en", "de").
    #[serde(
        rename = "GuiLanguage",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub gui_language: Option<String>,
}

/// Read/write access to the persisted `GuiLanguage` setting.
pub trait SettingsStore {
    /// Returns the stored value, `None` when the key is unset.
    fn gui_language(&self) -> Option<String>;

    /// Stores a new value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn set_gui_language(&mut self, language: &str) -> Result<()>;
}

impl SettingsStore for Settings {
    fn gui_language(&self) -> Option<String> {
        self.gui_language.clone()
    }

    fn set_gui_language(&mut self, language: &str) -> Result<()> {
        self.gui_language = Some(language.to_string());
        Ok(())
    }
}

/// Settings backed by a TOML file; every write is saved immediately.
#[derive(Debug, Clone)]
pub struct SettingsFile {
    path: PathBuf,
    settings: Settings,
}

impl SettingsFile {
    /// Opens the settings file at `path`. A missing or unreadable file
    /// yields default settings; the file is only created on first write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let settings = if path.exists() {
            load_from_path(&path).unwrap_or_else(|err| {
                log::warn!("Failed to read settings {}: {}", path.display(), err);
                Settings::default()
            })
        } else {
            Settings::default()
        };
        Self { path, settings }
    }

    /// Opens the settings file in the platform config directory.
    ///
    /// Returns `None` if no config directory can be determined.
    pub fn open_default() -> Option<Self> {
        get_default_config_path().map(Self::open)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

impl SettingsStore for SettingsFile {
    fn gui_language(&self) -> Option<String> {
        self.settings.gui_language()
    }

    fn set_gui_language(&mut self, language: &str) -> Result<()> {
        self.settings.set_gui_language(language)?;
        save_to_path(&self.settings, &self.path)
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    paths::get_app_config_dir().map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load_from_path(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(settings: &Settings, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(settings)?;
    fs::write(path, content)?;
    Ok(())
}
