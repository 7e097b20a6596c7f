#![deny(missing_docs)]
//! Shared logging utilities for the portfolio chat workspace.
//!
//! This crate provides the `engine_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger. Every line is tagged
//! with the chat turn that is active on the current thread, so the log of one
//! streamed answer can be followed from request to last frame.

use std::cell::Cell;

thread_local! {
    /// Thread-local storage for the chat turn currently being driven.
    static CURRENT_TURN: Cell<u64> = const { Cell::new(0) };
}

/// Sets the active chat turn for the current thread.
/// The session runner calls this whenever it starts driving a new turn.
pub fn set_current_turn(turn: u64) {
    CURRENT_TURN.with(|v| v.set(turn));
}

/// Retrieves the active chat turn for the current thread.
/// Returns 0 before the first turn (startup, health probe).
pub fn current_turn() -> u64 {
    CURRENT_TURN.with(|v| v.get())
}

/// Logs a trace-level message tagged with the current turn.
#[macro_export]
macro_rules! engine_trace {
    ($($arg:tt)*) => {{
        log::trace!("[turn {}] {}", $crate::current_turn(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message tagged with the current turn.
#[macro_export]
macro_rules! engine_info {
    ($($arg:tt)*) => {{
        log::info!("[turn {}] {}", $crate::current_turn(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message tagged with the current turn.
#[macro_export]
macro_rules! engine_debug {
    ($($arg:tt)*) => {{
        log::debug!("[turn {}] {}", $crate::current_turn(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message tagged with the current turn.
#[macro_export]
macro_rules! engine_warn {
    ($($arg:tt)*) => {{
        log::warn!("[turn {}] {}", $crate::current_turn(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message tagged with the current turn.
#[macro_export]
macro_rules! engine_error {
    ($($arg:tt)*) => {{
        log::error!("[turn {}] {}", $crate::current_turn(), format_args!($($arg)*));
    }};
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Trace in debug builds so dropped frames show up while a test fails.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Trace
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
