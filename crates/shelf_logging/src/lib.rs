#![deny(missing_docs)]
//! Shared logging utilities for the shelf workspace.
//!
//! This crate provides the `shelf_*` logging macros used across the codebase,
//! a per-thread request id that prefixes their output, and a minimal test
//! initializer for the global logger.
//!
//! The id is thread-local: any thread that logs on behalf of a request,
//! including engine worker tasks, must record it first.

use std::cell::Cell;

#[doc(hidden)]
pub use log;

thread_local! {
    /// Request id currently being handled on this thread (0 = none).
    static CURRENT_REQUEST: Cell<u64> = const { Cell::new(0) };
}

/// Records the request id handled by the current thread.
/// The event loop calls this whenever a new lookup is submitted.
pub fn set_current_request(request_id: u64) {
    CURRENT_REQUEST.with(|v| v.set(request_id));
}

/// Returns the request id recorded for the current thread, or 0.
pub fn current_request() -> u64 {
    CURRENT_REQUEST.with(|v| v.get())
}

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! shelf_trace {
    ($($arg:tt)*) => {{
        $crate::log::trace!("[req {}] {}", $crate::current_request(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! shelf_debug {
    ($($arg:tt)*) => {{
        $crate::log::debug!("[req {}] {}", $crate::current_request(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! shelf_info {
    ($($arg:tt)*) => {{
        $crate::log::info!("[req {}] {}", $crate::current_request(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! shelf_warn {
    ($($arg:tt)*) => {{
        $crate::log::warn!("[req {}] {}", $crate::current_request(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! shelf_error {
    ($($arg:tt)*) => {{
        $crate::log::error!("[req {}] {}", $crate::current_request(), format_args!($($arg)*));
    }};
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Another test may have won the race to install the logger.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_request_is_per_thread() {
        set_current_request(7);
        assert_eq!(current_request(), 7);
        let other = std::thread::spawn(current_request).join().unwrap();
        assert_eq!(other, 0);
    }
}
