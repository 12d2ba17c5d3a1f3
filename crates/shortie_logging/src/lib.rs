#![deny(missing_docs)]
//! Shared logging utilities for the Shortie workspace.
//!
//! This crate provides the `shortie_*` logging macros used across the codebase,
//! a redaction helper for secret identifiers and a minimal test initializer for
//! the global logger.

/// Re-export so the macros resolve `log` from any calling crate.
#[doc(hidden)]
pub use log;

/// Number of leading characters of a secret kept visible by [`redact`].
pub const REDACT_VISIBLE_CHARS: usize = 4;

/// Masks a secret identifier (stats key, secret link) for log output.
///
/// Keeps the first [`REDACT_VISIBLE_CHARS`] characters and replaces the rest
/// with `***`. Secrets that are not longer than the visible prefix are fully
/// masked.
pub fn redact(secret: &str) -> String {
    let visible: String = secret.chars().take(REDACT_VISIBLE_CHARS).collect();
    if visible.len() == secret.len() {
        return "***".to_string();
    }
    format!("{visible}***")
}

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! shortie_trace {
    ($($arg:tt)*) => {{
        $crate::log::trace!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! shortie_info {
    ($($arg:tt)*) => {{
        $crate::log::info!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! shortie_debug {
    ($($arg:tt)*) => {{
        $crate::log::debug!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! shortie_warn {
    ($($arg:tt)*) => {{
        $crate::log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! shortie_error {
    ($($arg:tt)*) => {{
        $crate::log::error!($($arg)*);
    }};
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
