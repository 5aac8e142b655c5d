// SPDX-License-Identifier: MPL-2.0
//! `iqpuzzle` is a pentomino puzzle game built with the Iced GUI framework.
//!
//! This crate holds the application startup: UI language selection,
//! Fluent translation catalogs, user directories and the debug log.

#![doc(html_root_url = "https://docs.rs/iqpuzzle/1.0.0")]

pub mod app;
pub mod config;
pub mod error;
pub mod i18n;
pub mod logging;
