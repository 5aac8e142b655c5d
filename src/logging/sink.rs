// SPDX-License-Identifier: MPL-2.0
//! File sink for the debug log.

use super::record::{LogRecord, Severity};
use crate::error::Result;
use std::fmt;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Raised by the sink after a [`Severity::Fatal`] record has been written
/// and the file closed. The receiver is expected to terminate the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FatalError {
    message: String,
}

impl FatalError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for FatalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fatal: {}", self.message)
    }
}

impl std::error::Error for FatalError {}

/// Appends formatted records to a single file, flushing after each line.
///
/// Writes are serialized through a mutex so records from several threads
/// never interleave. Once closed, further records are dropped.
pub struct DebugLog {
    path: PathBuf,
    file: Mutex<Option<File>>,
}

impl DebugLog {
    /// Deletes any existing file at `path` and opens a fresh one.
    pub fn create(path: &Path) -> Result<Self> {
        if path.exists() {
            fs::remove_file(path)?;
        }
        let file = File::create(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            file: Mutex::new(Some(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_open(&self) -> bool {
        self.file
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Writes one record.
    ///
    /// # Errors
    ///
    /// Returns [`FatalError`] for a fatal record, after the line is flushed
    /// and the file closed. Write failures are otherwise ignored.
    pub fn emit(&self, record: &LogRecord) -> std::result::Result<(), FatalError> {
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(handle) = file.as_mut() {
            let line = format!("{}\n", record);
            let _ = handle
                .write_all(line.as_bytes())
                .and_then(|()| handle.flush());
        }

        if record.severity == Severity::Fatal {
            if let Some(handle) = file.take() {
                let _ = handle.sync_all();
            }
            return Err(FatalError::new(record.message.clone()));
        }

        Ok(())
    }

    pub fn flush(&self) {
        if let Some(handle) = self
            .file
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_mut()
        {
            let _ = handle.flush();
        }
    }

    /// Closes the file; later records are dropped.
    pub fn close(&self) {
        self.file
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }
}

impl fmt::Debug for DebugLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebugLog")
            .field("path", &self.path)
            .field("open", &self.is_open())
            .finish()
    }
}
