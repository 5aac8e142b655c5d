// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for the application.
//!
//! This module decides which UI language to use and loads the matching
//! translation catalogs.
//!
//! # Features
//!
//! - Language selection from the persisted `GuiLanguage` setting, the
//!   `LANG` environment variable, or the system locale
//! - Self-healing settings: a configured language without an application
//!   catalog is reset to English
//! - Two catalogs per language (toolkit strings and application strings),
//!   see [`catalog`]

pub mod catalog;

use crate::config::{SettingsStore, DEFAULT_LANGUAGE, GUI_LANGUAGE_AUTO};
use std::path::{Path, PathBuf};
use unic_langid::LanguageIdentifier;

/// Prefix of the application catalog files in `<share>/lang`.
pub const APP_CATALOG_PREFIX: &str = "iqpuzzle";

/// Prefix of the toolkit catalog files.
pub const TOOLKIT_CATALOG_PREFIX: &str = "qt";

/// File extension of catalog files.
pub const CATALOG_EXTENSION: &str = "ftl";

/// Name reported for the POSIX `C` locale and for unparsable locale strings.
const C_LOCALE: &str = "C";

/// Returns the language tag the UI should use.
///
/// `GuiLanguage = "auto"` (or unset) follows `LANG` on unix and the system
/// locale elsewhere. A concrete tag is kept only while
/// `<share>/lang/iqpuzzle_<tag>.ftl` exists; otherwise the setting is
/// rewritten to `"en"`.
pub fn resolve_language(share_path: &Path, settings: &mut dyn SettingsStore) -> String {
    resolve_language_with_env(share_path, settings, env_lang())
}

/// [`resolve_language`] with the value of `LANG` supplied by the caller.
pub fn resolve_language_with_env(
    share_path: &Path,
    settings: &mut dyn SettingsStore,
    env_lang: Option<String>,
) -> String {
    let configured = settings
        .gui_language()
        .unwrap_or_else(|| GUI_LANGUAGE_AUTO.to_string());

    if configured == GUI_LANGUAGE_AUTO {
        if let Some(lang) = env_lang.filter(|lang| !lang.is_empty()) {
            return canonical_locale_name(&lang);
        }
        return system_locale_name();
    }

    if !catalog_path(share_path, APP_CATALOG_PREFIX, &configured).exists() {
        log::warn!(
            "No translation found for configured language {:?}, falling back to {}",
            configured,
            DEFAULT_LANGUAGE
        );
        if let Err(err) = settings.set_gui_language(DEFAULT_LANGUAGE) {
            log::warn!("Failed to persist language setting: {}", err);
        }
        return DEFAULT_LANGUAGE.to_string();
    }

    configured
}

/// Converts a POSIX or BCP 47 locale string into `language[_REGION]`.
///
/// The codeset (`.UTF-8`) and modifier (`@euro`) are dropped, as is any
/// script subtag: `de_DE.UTF-8` becomes `de_DE`, `en-us` becomes `en_US`.
/// `C`, `POSIX` and unparsable input yield `"C"`.
pub fn canonical_locale_name(raw: &str) -> String {
    let base = raw.split(['.', '@']).next().unwrap_or_default().trim();
    if base.is_empty() || base == C_LOCALE || base == "POSIX" {
        return C_LOCALE.to_string();
    }

    match base.parse::<LanguageIdentifier>() {
        Ok(id) if id.language.as_str() != "und" => match id.region {
            Some(region) => format!("{}_{}", id.language, region),
            None => id.language.to_string(),
        },
        _ => C_LOCALE.to_string(),
    }
}

/// Name of the operating system's locale, `"en"` if it reports none.
pub fn system_locale_name() -> String {
    sys_locale::get_locale()
        .map(|locale| canonical_locale_name(&locale))
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string())
}

/// Path of `<share>/lang/<prefix>_<lang>.ftl`.
pub fn catalog_path(share_path: &Path, prefix: &str, lang: &str) -> PathBuf {
    share_path
        .join("lang")
        .join(format!("{}.{}", catalog_name(prefix, lang), CATALOG_EXTENSION))
}

/// Catalog base name, e.g. `qt_de` or `iqpuzzle_de`.
pub fn catalog_name(prefix: &str, lang: &str) -> String {
    format!("{}_{}", prefix, lang)
}

/// Tags to look catalogs up under, most specific first: `de_DE` then `de`.
pub fn catalog_tags(lang: &str) -> Vec<&str> {
    match lang.split_once('_') {
        Some((language, _)) if !language.is_empty() => vec![lang, language],
        _ => vec![lang],
    }
}

#[cfg(unix)]
fn env_lang() -> Option<String> {
    std::env::var("LANG").ok()
}

#[cfg(not(unix))]
fn env_lang() -> Option<String> {
    None
}
