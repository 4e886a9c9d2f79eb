//! Opt-in diagnostic output.
//!
//! Enable with `set_verbose(true)` (the CLI wires this to `--verbose`),
//! then use the `verbose!()` macro anywhere in the crate. Messages go to
//! stderr so they never mix with transcript output on stdout.

use std::sync::atomic::{AtomicBool, Ordering};

static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Enable or disable diagnostic output for the whole process.
pub fn set_verbose(enabled: bool) {
    VERBOSE.store(enabled, Ordering::SeqCst);
}

/// Check whether diagnostic output is enabled.
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

/// Log a formatted message when diagnostics are enabled.
#[macro_export]
macro_rules! verbose {
    ($($arg:tt)*) => {
        if $crate::verbose::is_verbose() {
            eprintln!("[lectoscribe] {}", format!($($arg)*));
        }
    };
}
