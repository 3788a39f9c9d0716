//! Build stamp
//!
//! `build.rs` bumps a counter and records the compile time. Both show up in
//! the startup banner, the page footer and `report.json`.

use serde::Serialize;

/// Build counter from `build.rs`; 0 when missing or unreadable
pub const BUILD_NUMBER: u64 = parse_build_number(option_env!("FOODLOG_BUILD_NUMBER"));

/// Compile time, ISO 8601 UTC
pub const BUILD_TIMESTAMP: &str = match option_env!("FOODLOG_BUILD_TIMESTAMP") {
    Some(s) => s,
    None => "unknown",
};

const fn parse_build_number(raw: Option<&str>) -> u64 {
    let bytes = match raw {
        Some(s) => s.as_bytes(),
        None => return 0,
    };
    let mut n: u64 = 0;
    let mut i = 0;
    while i < bytes.len() {
        if !bytes[i].is_ascii_digit() {
            return 0;
        }
        n = n * 10 + (bytes[i] - b'0') as u64;
        i += 1;
    }
    n
}

/// Which build produced a report
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub build: u64,
    pub compiled_at: &'static str,
}

impl BuildInfo {
    pub const CURRENT: BuildInfo = BuildInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        build: BUILD_NUMBER,
        compiled_at: BUILD_TIMESTAMP,
    };

    /// Short form for the page footer, e.g. "foodlog 1.0.0 (build 7)"
    pub fn footer_line(&self) -> String {
        format!("{} {} (build {})", self.name, self.version, self.build)
    }

    pub fn banner(&self) -> String {
        let rule = "=".repeat(47);
        format!(
            "{rule}\n  Food Log Renderer\n  Version: {} | Build: {}\n  Compiled: {}\n{rule}\n",
            self.version,
            self.build,
            self.compiled_at,
            rule = rule
        )
    }
}

/// Print the startup banner to stderr
pub fn print_startup_banner() {
    eprint!("{}", BuildInfo::CURRENT.banner());
}
