// SPDX-License-Identifier: MPL-2.0
//! Build script recording the compiler and toolkit versions.
//!
//! The debug log writes them as a header line so bug reports carry the
//! toolchain and GUI toolkit the binary was built with.

use std::fs;
use std::path::Path;
use std::process::Command;

fn main() {
    let rustc = std::env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());
    let version = Command::new(rustc)
        .arg("--version")
        .output()
        .ok()
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|version| version.trim().to_string())
        .filter(|version| !version.is_empty())
        .unwrap_or_else(|| "rustc (unknown version)".to_string());

    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let lock_path = Path::new(&manifest_dir).join("Cargo.lock");
    let iced = fs::read_to_string(&lock_path)
        .ok()
        .and_then(|lock| locked_version(&lock, "iced"))
        .unwrap_or_else(|| "(unknown version)".to_string());

    println!("cargo:rustc-env=IQPUZZLE_RUSTC_VERSION={version}");
    println!("cargo:rustc-env=IQPUZZLE_ICED_VERSION={iced}");
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=Cargo.lock");
}

/// Finds `version = "..."` of the `[[package]]` entry named `name`.
fn locked_version(lock: &str, name: &str) -> Option<String> {
    let wanted = format!("name = \"{name}\"");
    let mut lines = lock.lines().map(str::trim);
    while let Some(line) = lines.next() {
        if line == wanted {
            let version = lines.next()?.strip_prefix("version = \"")?;
            return Some(version.trim_end_matches('"').to_string());
        }
    }
    None
}
