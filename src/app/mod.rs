// SPDX-License-Identifier: MPL-2.0
//! Application startup.
//!
//! [`run`] performs the startup sequence in order: share path, UI
//! language, translations, user data directory, debug log. It then shows
//! the main window and returns the event loop's exit code once the
//! window closes. [`bootstrap`] holds every step before the window so it
//! can be driven without a display.

mod message;
pub mod paths;
pub mod window;

pub use message::{Flags, Message};

use crate::config::{Settings, SettingsFile, SettingsStore, DEBUG_LOG_FILE};
use crate::i18n::{self, catalog};
use crate::logging;
use paths::{PathProvider, SystemPaths};
use std::path::PathBuf;
use window::PuzzleWindow;

/// Display name of the application.
pub const APP_NAME: &str = "iQPuzzle";

/// Application version, taken from the package manifest.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Everything startup resolved before the main window is created.
pub struct Bootstrap {
    pub share_path: PathBuf,
    pub language: String,
    pub translator: catalog::Translator,
    pub data_dir: PathBuf,
    pub log_path: PathBuf,
}

/// Runs every startup step up to and including the debug log.
///
/// The `log` facade is routed first, so problems found before the debug
/// log opens still reach stderr. Failures are replaced by defaults; this
/// never fails.
pub fn bootstrap(
    flags: &Flags,
    provider: &dyn PathProvider,
    settings: &mut dyn SettingsStore,
) -> Bootstrap {
    logging::install();

    let share_path = paths::resolve_share_path(&provider.application_dir(), flags.debug);

    let language = match &flags.lang {
        Some(lang) => lang.clone(),
        None => i18n::resolve_language(&share_path, settings),
    };

    let mut translator = catalog::Translator::new();
    catalog::load_translations(&mut translator, &language, &share_path);

    let data_dir = paths::resolve_data_dir(provider);

    let log_path = data_dir.join(DEBUG_LOG_FILE);
    // A failed setup has already warned on stderr.
    let _ = logging::setup(&log_path, APP_NAME, APP_VERSION);
    log::debug!("Share path: {}", share_path.display());
    log::debug!("UI language: {}", language);

    Bootstrap {
        share_path,
        language,
        translator,
        data_dir,
        log_path,
    }
}

/// Entry point used by `main.rs`: starts up, runs the window, tears down.
///
/// Returns the process exit code.
pub fn run(flags: Flags) -> u8 {
    let boot = match SettingsFile::open_default() {
        Some(mut settings) => bootstrap(&flags, &SystemPaths, &mut settings),
        None => {
            eprintln!("No config directory available; settings will not be saved");
            bootstrap(&flags, &SystemPaths, &mut Settings::default())
        }
    };

    let main_window = PuzzleWindow::new(boot.translator, boot.data_dir);
    let code = match window::run(main_window) {
        Ok(()) => 0,
        Err(err) => {
            log::error!("Event loop terminated with an error: {}", err);
            1
        }
    };

    logging::shutdown();
    code
}
