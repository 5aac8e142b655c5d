// SPDX-License-Identifier: MPL-2.0
//! Default values shared by the settings store, the locale resolver and
//! the debug log.

/// Settings value meaning "follow the environment / system locale".
pub const GUI_LANGUAGE_AUTO: &str = "auto";

/// Language used when a configured translation is missing.
pub const DEFAULT_LANGUAGE: &str = "en";

/// File name of the debug log inside the user data directory.
pub const DEBUG_LOG_FILE: &str = "Debug.log";
