// SPDX-License-Identifier: MPL-2.0
//! Translation catalogs and the translator that the UI reads strings from.
//!
//! Each language has two Fluent catalogs: `qt_<lang>` with toolkit-level
//! strings (buttons, dialogs) and `iqpuzzle_<lang>` with application
//! strings. Toolkit catalogs ship inside the binary and may be overridden
//! from `<share>/lang`; application catalogs only live in `<share>/lang`.

use super::{
    catalog_name, catalog_path, catalog_tags, APP_CATALOG_PREFIX, CATALOG_EXTENSION,
    TOOLKIT_CATALOG_PREFIX,
};
use crate::error::{Error, Result};
use fluent_bundle::{FluentBundle, FluentResource};
use rust_embed::RustEmbed;
use std::fs;
use std::path::Path;
use unic_langid::LanguageIdentifier;

#[derive(RustEmbed)]
#[folder = "assets/i18n/"]
struct ToolkitAsset;

/// A locale-specific mapping from message keys to localized strings.
pub trait TranslationCatalog {
    /// Catalog base name, e.g. `iqpuzzle_de`.
    fn name(&self) -> &str;

    /// Returns the translation of `key`, if this catalog has one.
    fn lookup(&self, key: &str) -> Option<String>;
}

/// [`TranslationCatalog`] backed by a Fluent resource.
pub struct FluentCatalog {
    name: String,
    bundle: FluentBundle<FluentResource>,
}

impl FluentCatalog {
    /// Parses `source` as Fluent syntax for the given language tag.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Translation`] if the source has syntax errors or
    /// defines a message twice.
    pub fn from_source(name: &str, lang: &str, source: String) -> Result<Self> {
        let locale = lang.parse::<LanguageIdentifier>().unwrap_or_default();
        let resource = FluentResource::try_new(source).map_err(|(_, errors)| {
            Error::Translation(format!("{}: {} syntax error(s)", name, errors.len()))
        })?;

        let mut bundle = FluentBundle::new(vec![locale]);
        bundle.set_use_isolating(false);
        bundle.add_resource(resource).map_err(|errors| {
            Error::Translation(format!("{}: {} duplicate message(s)", name, errors.len()))
        })?;

        Ok(Self {
            name: name.to_string(),
            bundle,
        })
    }

    /// Loads `<share>/lang/<prefix>_<lang>.ftl`, falling back to
    /// `<prefix>_<language>.ftl` when `lang` carries a region.
    pub fn load(prefix: &str, lang: &str, share_path: &Path) -> Result<Self> {
        let mut last_err = None;
        for tag in catalog_tags(lang) {
            let path = catalog_path(share_path, prefix, tag);
            match fs::read_to_string(&path) {
                Ok(source) => return Self::from_source(&catalog_name(prefix, tag), tag, source),
                Err(err) => last_err = Some(err),
            }
        }
        Err(last_err.map_or_else(
            || Error::Translation(format!("{}: not found", catalog_name(prefix, lang))),
            Error::from,
        ))
    }

    /// Loads the toolkit catalog for `lang` shipped inside the binary, with
    /// the same region fallback as [`FluentCatalog::load`].
    pub fn load_embedded_toolkit(lang: &str) -> Result<Self> {
        for tag in catalog_tags(lang) {
            let name = catalog_name(TOOLKIT_CATALOG_PREFIX, tag);
            if let Some(file) = ToolkitAsset::get(&format!("{}.{}", name, CATALOG_EXTENSION)) {
                let source = String::from_utf8_lossy(file.data.as_ref()).to_string();
                return Self::from_source(&name, tag, source);
            }
        }
        Err(Error::Translation(format!(
            "{}: not bundled",
            catalog_name(TOOLKIT_CATALOG_PREFIX, lang)
        )))
    }
}

impl TranslationCatalog for FluentCatalog {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookup(&self, key: &str) -> Option<String> {
        let msg = self.bundle.get_message(key)?;
        let pattern = msg.value()?;
        let mut errors = vec![];
        let value = self.bundle.format_pattern(pattern, None, &mut errors);
        if errors.is_empty() {
            Some(value.to_string())
        } else {
            None
        }
    }
}

/// The set of catalogs installed in the running application.
///
/// Lookups search the most recently installed catalog first and fall back
/// to the key itself, so untranslated text shows up in the source language.
#[derive(Default)]
pub struct Translator {
    catalogs: Vec<Box<dyn TranslationCatalog>>,
}

impl Translator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn install(&mut self, catalog: impl TranslationCatalog + 'static) {
        log::debug!("Installed translation catalog {}", catalog.name());
        self.catalogs.push(Box::new(catalog));
    }

    pub fn tr(&self, key: &str) -> String {
        self.catalogs
            .iter()
            .rev()
            .find_map(|catalog| catalog.lookup(key))
            .unwrap_or_else(|| key.to_string())
    }

    /// Names of the installed catalogs, in installation order.
    pub fn catalog_names(&self) -> Vec<&str> {
        self.catalogs.iter().map(|catalog| catalog.name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty()
    }
}

/// Loads the toolkit and application catalogs for `lang` into `translator`.
///
/// Failures are logged as warnings and skipped. Returns the number of
/// catalogs installed.
pub fn load_translations(translator: &mut Translator, lang: &str, share_path: &Path) -> usize {
    let mut installed = 0;

    let toolkit = FluentCatalog::load_embedded_toolkit(lang)
        .or_else(|_| FluentCatalog::load(TOOLKIT_CATALOG_PREFIX, lang, share_path));
    match toolkit {
        Ok(catalog) => {
            translator.install(catalog);
            installed += 1;
        }
        Err(err) => log::warn!(
            "Could not load toolkit translations: {} ({})",
            catalog_name(TOOLKIT_CATALOG_PREFIX, lang),
            err
        ),
    }

    match FluentCatalog::load(APP_CATALOG_PREFIX, lang, share_path) {
        Ok(catalog) => {
            translator.install(catalog);
            installed += 1;
        }
        Err(err) => log::warn!(
            "Could not load application translation: {} ({})",
            catalog_name(APP_CATALOG_PREFIX, lang),
            err
        ),
    }

    installed
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_catalog(share: &Path, prefix: &str, lang: &str, source: &str) {
        let path = catalog_path(share, prefix, lang);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, source).unwrap();
    }

    #[test]
    fn catalog_translates_known_keys_only() {
        let catalog =
            FluentCatalog::from_source("iqpuzzle_de", "de", "quit = Beenden\n".to_string())
                .expect("valid catalog");

        assert_eq!(catalog.name(), "iqpuzzle_de");
        assert_eq!(catalog.lookup("quit"), Some("Beenden".to_string()));
        assert_eq!(catalog.lookup("missing"), None);
    }

    #[test]
    fn malformed_catalog_is_rejected() {
        let result = FluentCatalog::from_source("broken", "en", "= no key\n".to_string());
        assert!(matches!(result, Err(Error::Translation(_))));
    }

    #[test]
    fn translator_prefers_latest_catalog_and_falls_back_to_key() {
        let mut translator = Translator::new();
        translator.install(
            FluentCatalog::from_source("qt_de", "de", "quit = Schließen\nok = OK\n".to_string())
                .unwrap(),
        );
        translator.install(
            FluentCatalog::from_source("iqpuzzle_de", "de", "quit = Beenden\n".to_string())
                .unwrap(),
        );

        assert_eq!(translator.tr("quit"), "Beenden");
        assert_eq!(translator.tr("ok"), "OK");
        assert_eq!(translator.tr("untranslated"), "untranslated");
        assert_eq!(translator.catalog_names(), vec!["qt_de", "iqpuzzle_de"]);
    }

    #[test]
    fn bundled_toolkit_catalog_is_available() {
        let catalog = FluentCatalog::load_embedded_toolkit("de").expect("qt_de is bundled");
        assert_eq!(catalog.name(), "qt_de");
        assert!(catalog.lookup("quit").is_some());
    }

    #[test]
    fn loads_both_catalogs_from_share_path() {
        let share = tempdir().unwrap();
        write_catalog(share.path(), APP_CATALOG_PREFIX, "de", "window-title = iQPuzzle\n");

        let mut translator = Translator::new();
        let installed = load_translations(&mut translator, "de", share.path());

        assert_eq!(installed, 2);
        assert_eq!(translator.catalog_names(), vec!["qt_de", "iqpuzzle_de"]);
    }

    #[test]
    fn regional_tag_loads_language_catalogs() {
        let share = tempdir().unwrap();
        write_catalog(share.path(), APP_CATALOG_PREFIX, "de", "welcome = Willkommen\n");

        let mut translator = Translator::new();
        let installed = load_translations(&mut translator, "de_DE", share.path());

        assert_eq!(installed, 2);
        assert_eq!(translator.catalog_names(), vec!["qt_de", "iqpuzzle_de"]);
    }

    #[test]
    fn exact_regional_catalog_wins_over_language() {
        let share = tempdir().unwrap();
        write_catalog(share.path(), APP_CATALOG_PREFIX, "de", "welcome = Willkommen\n");
        write_catalog(share.path(), APP_CATALOG_PREFIX, "de_AT", "welcome = Servus\n");

        let catalog = FluentCatalog::load(APP_CATALOG_PREFIX, "de_AT", share.path()).unwrap();

        assert_eq!(catalog.name(), "iqpuzzle_de_AT");
        assert_eq!(catalog.lookup("welcome"), Some("Servus".to_string()));
    }

    #[test]
    fn toolkit_catalog_falls_back_to_share_path() {
        let share = tempdir().unwrap();
        write_catalog(share.path(), TOOLKIT_CATALOG_PREFIX, "eo", "quit = Eliri\n");

        let mut translator = Translator::new();
        let installed = load_translations(&mut translator, "eo", share.path());

        assert_eq!(installed, 1);
        assert_eq!(translator.tr("quit"), "Eliri");
    }

    #[test]
    fn missing_or_corrupt_catalogs_are_skipped() {
        let share = tempdir().unwrap();
        write_catalog(share.path(), APP_CATALOG_PREFIX, "xx", "= broken\n");

        let mut translator = Translator::new();
        let installed = load_translations(&mut translator, "xx", share.path());

        assert_eq!(installed, 0);
        assert!(translator.is_empty());
        assert_eq!(translator.tr("quit"), "quit");
    }
}
