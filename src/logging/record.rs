// SPDX-License-Identifier: MPL-2.0
//! Log records as written to the debug log.

use chrono::{Local, NaiveTime};
use std::fmt;

/// Ordinal log level: `Debug < Warning < Critical < Fatal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Debug,
    Warning,
    Critical,
    /// Terminates the process once written.
    Fatal,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Debug => "Debug",
            Severity::Warning => "Warning",
            Severity::Critical => "Critical",
            Severity::Fatal => "Fatal",
        }
    }

    /// Whether lines of this severity carry the source location.
    pub fn shows_location(self) -> bool {
        self >= Severity::Warning
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<log::Level> for Severity {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Severity::Critical,
            log::Level::Warn => Severity::Warning,
            log::Level::Info | log::Level::Debug | log::Level::Trace => Severity::Debug,
        }
    }
}

/// Where a record was raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
    pub function: String,
}

impl SourceLocation {
    pub fn new(file: impl Into<String>, line: u32, function: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line,
            function: function.into(),
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}:{}, {})", self.file, self.line, self.function)
    }
}

/// A single entry for the debug log.
///
/// Formats as `HH:MM:SS <Severity>: <message>`, followed by
/// ` (<file>:<line>, <function>)` for warnings and above when a location
/// is known.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub timestamp: NaiveTime,
    pub severity: Severity,
    pub message: String,
    pub location: Option<SourceLocation>,
}

impl LogRecord {
    /// Creates a record stamped with the current local time.
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now().time(),
            severity,
            message: message.into(),
            location: None,
        }
    }

    #[must_use]
    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    #[must_use]
    pub fn at(mut self, timestamp: NaiveTime) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Converts a record from the `log` facade.
    ///
    /// The module path stands in for the function name.
    pub fn from_log(record: &log::Record<'_>) -> Self {
        let entry = Self::new(record.level().into(), record.args().to_string());
        match (record.file(), record.line()) {
            (Some(file), Some(line)) => entry.with_location(SourceLocation::new(
                file,
                line,
                record.module_path().unwrap_or_default(),
            )),
            _ => entry,
        }
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {}",
            self.timestamp.format("%H:%M:%S"),
            self.severity,
            self.message
        )?;
        match &self.location {
            Some(location) if self.severity.shows_location() => write!(f, " {}", location),
            _ => Ok(()),
        }
    }
}
