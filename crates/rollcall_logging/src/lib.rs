#![deny(missing_docs)]
//! Logging for the roll call workspace.
//!
//! The `rollcall_*` macros forward to `log` and prefix every line with the
//! poll tick the popup is on, so engine output lines up with the ticks that
//! caused it. Before the first tick no prefix is written.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static POLL_TICK: AtomicU64 = AtomicU64::new(0);

/// Records the poll tick the popup loop is currently handling.
pub fn set_poll_tick(tick: u64) {
    POLL_TICK.store(tick, Ordering::Relaxed);
}

/// The last recorded poll tick, or 0 before polling starts.
pub fn get_poll_tick() -> u64 {
    POLL_TICK.load(Ordering::Relaxed)
}

/// Writes `[tick N] ` for the current poll tick, or nothing before the first.
#[doc(hidden)]
pub struct TickPrefix;

impl fmt::Display for TickPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match get_poll_tick() {
            0 => Ok(()),
            tick => write!(f, "[tick {tick}] "),
        }
    }
}

/// Logs a trace-level message tagged with the poll tick.
#[macro_export]
macro_rules! rollcall_trace {
    ($($arg:tt)*) => {{
        log::trace!("{}{}", $crate::TickPrefix, format_args!($($arg)*));
    }};
}

/// Logs an info-level message tagged with the poll tick.
#[macro_export]
macro_rules! rollcall_info {
    ($($arg:tt)*) => {{
        log::info!("{}{}", $crate::TickPrefix, format_args!($($arg)*));
    }};
}

/// Logs a debug-level message tagged with the poll tick.
#[macro_export]
macro_rules! rollcall_debug {
    ($($arg:tt)*) => {{
        log::debug!("{}{}", $crate::TickPrefix, format_args!($($arg)*));
    }};
}

/// Logs a warn-level message tagged with the poll tick.
#[macro_export]
macro_rules! rollcall_warn {
    ($($arg:tt)*) => {{
        log::warn!("{}{}", $crate::TickPrefix, format_args!($($arg)*));
    }};
}

/// Logs an error-level message tagged with the poll tick.
#[macro_export]
macro_rules! rollcall_error {
    ($($arg:tt)*) => {{
        log::error!("{}{}", $crate::TickPrefix, format_args!($($arg)*));
    }};
}

/// Terminal logger for tests. A no-op when a logger is already installed.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    let _ = TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto);
}
