//! Build script: records which toolchain compiled this crate.
//!
//! Exports `MKVERSION_COMPILER` as `rustc-<release>`, or `unknown` when the
//! compiler cannot be queried.

use std::process::Command;

fn main() {
    let rustc = std::env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());
    let compiler = Command::new(&rustc)
        .arg("--version")
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .and_then(|s| identity(&s))
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=MKVERSION_COMPILER={compiler}");
    println!("cargo:rerun-if-env-changed=RUSTC");
    println!("cargo:rerun-if-changed=build.rs");
}

/// `rustc 1.80.0 (051478957 2024-07-21)` -> `rustc-1.80.0`
fn identity(version_line: &str) -> Option<String> {
    let mut words = version_line.split_whitespace();
    let name = words.next()?;
    let release = words.next()?;
    if !release.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    Some(format!("{name}-{release}"))
}
