//! Logging utilities with colored output.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` macro for output shown only with `--verbose`
//!
//! Only command reports (`check`, `route`, `init`) go to stdout. Everything
//! else, `debug!` output included, goes to stderr so that `rigg emit` keeps
//! stdout clean for the JSON document.
//!
//! # Example
//!
//! ```ignore
//! log!("check"; "{} rules", count);
//! log!("warning"; "unknown fields in {}:", path.display());
//! ```

use crossterm::{
    execute,
    terminal::{Clear, ClearType},
};
use owo_colors::{OwoColorize, Stream};
use std::{
    io::{Write, stderr, stdout},
    sync::atomic::{AtomicBool, Ordering},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
///
/// # Usage
/// ```ignore
/// debug!("module"; "debug info: {}", value);
/// ```
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix
#[inline]
pub fn log(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();
    let prefix = colorize_prefix(module, &module_lower);

    if is_report(&module_lower) {
        let mut out = stdout().lock();
        execute!(out, Clear(ClearType::UntilNewLine)).ok();
        writeln!(out, "{prefix} {message}").ok();
        out.flush().ok();
    } else {
        let mut out = stderr().lock();
        execute!(out, Clear(ClearType::UntilNewLine)).ok();
        writeln!(out, "{prefix} {message}").ok();
        out.flush().ok();
    }
}

/// Modules whose messages are command output and belong on stdout.
#[inline]
fn is_report(module_lower: &str) -> bool {
    matches!(module_lower, "check" | "route" | "init")
}

/// Apply color to a module prefix based on module type.
///
/// Honors `--color` through the `owo-colors` override.
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    let prefix = format!("[{module}]");
    let stream = if is_report(module_lower) {
        Stream::Stdout
    } else {
        Stream::Stderr
    };
    match module_lower {
        "check" => prefix
            .if_supports_color(stream, |p| p.bright_green().bold().to_string())
            .to_string(),
        "route" => prefix
            .if_supports_color(stream, |p| p.bright_blue().bold().to_string())
            .to_string(),
        "error" => prefix
            .if_supports_color(stream, |p| p.bright_red().bold().to_string())
            .to_string(),
        "hint" => prefix
            .if_supports_color(stream, |p| p.bright_cyan().bold().to_string())
            .to_string(),
        _ => prefix
            .if_supports_color(stream, |p| p.bright_yellow().bold().to_string())
            .to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_reports_use_stdout() {
        assert!(is_report("check"));
        assert!(is_report("route"));
        assert!(is_report("init"));
        assert!(!is_report("warning"));
        assert!(!is_report("error"));
    }

    #[test]
    fn test_verbose_modules_use_stderr() {
        // debug! lines from config loading and emit must not mix with JSON
        assert!(!is_report("config"));
        assert!(!is_report("emit"));
    }

    #[test]
    fn test_prefix_keeps_module_name() {
        assert!(colorize_prefix("route", "route").contains("[route]"));
        assert!(colorize_prefix("Config", "config").contains("[Config]"));
    }
}
