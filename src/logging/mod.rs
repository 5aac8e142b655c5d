// SPDX-License-Identifier: MPL-2.0
//! Process-wide debug log.
//!
//! Every part of the application logs through the `log` facade
//! (`log::debug!`, `log::warn!`, `log::error!`). [`install`] hooks the
//! facade up at startup; until [`setup`] opens `Debug.log` (and again after
//! [`shutdown`] closes it) records go to stderr. Unrecoverable conditions go
//! through [`fatal!`], which writes a `Fatal` line and aborts the process.
//!
//! Only records targeted at this crate are kept below `Warn`, so debug
//! chatter from the GUI stack stays out of the log.
//!
//! # Example
//!
//! ```no_run
//! use iqpuzzle::logging;
//! use std::path::Path;
//!
//! logging::setup(Path::new("/tmp/Debug.log"), "iQPuzzle", "1.0.0")
//!     .expect("log file should open");
//! log::warn!("Could not load application translation: iqpuzzle_de");
//! logging::shutdown();
//! ```

pub mod record;
pub mod sink;

pub use record::{LogRecord, Severity, SourceLocation};
pub use sink::{DebugLog, FatalError};

use crate::error::Result;
use std::path::Path;
use std::sync::{Arc, Once, PoisonError, RwLock};

/// Compiler that built this binary, recorded by the build script.
pub const RUSTC_VERSION: &str = env!("IQPUZZLE_RUSTC_VERSION");

/// Version of the `iced` toolkit linked into this binary, from `Cargo.lock`.
pub const TOOLKIT_VERSION: &str = env!("IQPUZZLE_ICED_VERSION");

/// Log target prefix of this crate's own records.
pub const LOG_TARGET: &str = "iqpuzzle";

/// The sink receiving records, `None` before [`setup`] and after [`shutdown`].
static ACTIVE: RwLock<Option<Arc<DebugLog>>> = RwLock::new(None);

static INSTALL: Once = Once::new();

static BRIDGE: Bridge = Bridge;

/// Forwards records from the `log` facade to the active sink.
struct Bridge;

impl log::Log for Bridge {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= log::Level::Warn || is_own_target(metadata.target())
    }

    fn log(&self, record: &log::Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        // The facade has no fatal level, so this never signals.
        let _ = emit(&LogRecord::from_log(record));
    }

    fn flush(&self) {
        if let Some(sink) = active() {
            sink.flush();
        }
    }
}

fn is_own_target(target: &str) -> bool {
    target
        .strip_prefix(LOG_TARGET)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
}

fn active() -> Option<Arc<DebugLog>> {
    ACTIVE
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

fn replace_active(sink: Option<Arc<DebugLog>>) -> Option<Arc<DebugLog>> {
    let mut active = ACTIVE.write().unwrap_or_else(PoisonError::into_inner);
    std::mem::replace(&mut *active, sink)
}

/// Routes the `log` facade through this module. Idempotent.
///
/// Records emitted before [`setup`] are written to stderr.
pub fn install() {
    INSTALL.call_once(|| {
        if log::set_logger(&BRIDGE).is_err() {
            eprintln!("Another logger is already installed; debug log disabled");
        }
    });
    log::set_max_level(log::LevelFilter::Debug);
}

/// Opens a fresh log file at `path` and makes it the process-wide sink.
///
/// Any previous sink is closed first and any existing file at `path` is
/// deleted. On success two header lines are written: application
/// name/version and toolkit/compiler version.
///
/// # Errors
///
/// Returns an error if the file cannot be created. No sink is active
/// afterwards and records go to stderr until the next successful `setup`.
pub fn setup(path: &Path, app_name: &str, app_version: &str) -> Result<()> {
    install();

    if let Some(previous) = replace_active(None) {
        previous.close();
    }

    let sink = match DebugLog::create(path) {
        Ok(sink) => sink,
        Err(err) => {
            log::warn!("Couldn't create logging file {}: {}", path.display(), err);
            return Err(err);
        }
    };

    replace_active(Some(Arc::new(sink)));

    log::debug!("{} {}", app_name, app_version);
    log::debug!("Compiled with iced {} ({})", TOOLKIT_VERSION, RUSTC_VERSION);
    Ok(())
}

/// Path of the active log file, if any.
pub fn log_path() -> Option<std::path::PathBuf> {
    active().map(|sink| sink.path().to_path_buf())
}

/// Writes `record` to the active sink, or to stderr when there is none.
///
/// # Errors
///
/// Returns [`FatalError`] for fatal records, whether or not a sink is
/// active. The log file is closed by then.
pub fn emit(record: &LogRecord) -> std::result::Result<(), FatalError> {
    match active() {
        Some(sink) => {
            let result = sink.emit(record);
            if result.is_err() {
                replace_active(None);
            }
            result
        }
        None => {
            eprintln!("{}", record);
            if record.severity == Severity::Fatal {
                Err(FatalError::new(record.message.clone()))
            } else {
                Ok(())
            }
        }
    }
}

/// Writes a fatal record and aborts the process.
///
/// Nothing else is cleaned up; see [`fatal!`] for the usual entry point.
pub fn fatal(record: LogRecord) -> ! {
    let record = LogRecord {
        severity: Severity::Fatal,
        ..record
    };
    let _ = emit(&record);
    std::process::abort()
}

/// Closes the active log file. Later records go to stderr.
pub fn shutdown() {
    if let Some(sink) = replace_active(None) {
        sink.close();
    }
}

/// Logs a `Fatal` record with the caller's location, then aborts.
///
/// ```no_run
/// iqpuzzle::fatal!("Board file {} is corrupted", "board1.conf");
/// ```
#[macro_export]
macro_rules! fatal {
    ($($arg:tt)+) => {
        $crate::logging::fatal(
            $crate::logging::LogRecord::new(
                $crate::logging::Severity::Fatal,
                format!($($arg)+),
            )
            .with_location($crate::logging::SourceLocation::new(
                file!(),
                line!(),
                module_path!(),
            )),
        )
    };
}
