//! Stderr diagnostics that survive the TUI.
//!
//! While the terminal UI owns the screen, anything printed to stderr would
//! corrupt the display, so messages are collected and flushed once the
//! terminal is restored.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

static BUFFER: Mutex<Option<Vec<String>>> = Mutex::new(None);
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Enable or disable `verbose_eprintln!` output
pub fn set_verbose(enabled: bool) {
    VERBOSE.store(enabled, Ordering::Relaxed);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

/// Start buffering. While active, `warn()` stores messages instead of
/// printing them.
pub fn activate() {
    if let Ok(mut guard) = BUFFER.lock() {
        *guard = Some(Vec::new());
    }
}

/// Stop buffering and return everything collected.
pub fn drain() -> Vec<String> {
    BUFFER
        .lock()
        .ok()
        .and_then(|mut guard| guard.take())
        .unwrap_or_default()
}

/// Write a message to stderr, or store it if buffering is active.
pub fn warn(msg: String) {
    let mut guard = match BUFFER.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    if let Some(buf) = guard.as_mut() {
        buf.push(msg);
    } else {
        drop(guard);
        eprintln!("{}", msg);
    }
}

/// Like `eprintln!`, but routed through the buffer when it is active.
#[macro_export]
macro_rules! buffered_eprintln {
    ($($arg:tt)*) => {
        $crate::stderr_buffer::warn(format!($($arg)*))
    };
}

/// `buffered_eprintln!` that only fires with `--verbose`.
#[macro_export]
macro_rules! verbose_eprintln {
    ($($arg:tt)*) => {
        if $crate::stderr_buffer::is_verbose() {
            $crate::stderr_buffer::warn(format!($($arg)*))
        }
    };
}
