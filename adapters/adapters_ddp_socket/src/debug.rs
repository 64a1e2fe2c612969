//! Debug Output Module
//!
//! Provides gated debug output for the socket shim. Output is suppressed
//! unless explicitly enabled, so the shim stays silent in normal operation.

use std::sync::atomic::{AtomicBool, Ordering};

static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

/// Debug output controls
pub struct DebugUtils;

impl DebugUtils {
    /// Enable debug output
    ///
    /// When enabled, the shim prints one line per socket lifecycle event.
    pub fn enable() {
        DEBUG_ENABLED.store(true, Ordering::Release);
    }

    /// Disable debug output
    pub fn disable() {
        DEBUG_ENABLED.store(false, Ordering::Release);
    }

    /// Check if debug output is enabled
    pub fn is_enabled() -> bool {
        DEBUG_ENABLED.load(Ordering::Acquire)
    }
}

/// Print a line of debug output when enabled
pub fn debug_output(msg: &str) {
    if DebugUtils::is_enabled() {
        eprintln!("ddp: {}", msg);
    }
}
