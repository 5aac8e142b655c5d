// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

/// Messages consumed by the main window's update loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// The user asked to leave the game.
    Quit,
}

/// Runtime flags parsed from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flags {
    /// `--debug`: read bundled assets from the executable's directory
    /// instead of the installed share directory.
    pub debug: bool,
    /// `--lang <tag>`: use this language for one run without touching the
    /// persisted setting.
    pub lang: Option<String>,
}
