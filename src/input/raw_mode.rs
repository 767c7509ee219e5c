//! Terminal Raw Mode Controller
//!
//! Owns the switch into and out of raw (non-canonical, no-echo) terminal
//! mode. The terminal device is process-wide state, so at most one guard
//! may be live at a time; the original settings are restored exactly once
//! per acquisition, on every exit path.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

/// Whether a raw-mode guard is currently live in this process.
static RAW_MODE_ACTIVE: AtomicBool = AtomicBool::new(false);

/// RAII handle over the terminal's raw mode.
///
/// Created by [`RawModeGuard::acquire`], which captures the current terminal
/// attributes and switches the device to raw mode. Dropping the guard (or
/// calling [`RawModeGuard::release`] explicitly) restores the captured
/// attributes. Release is idempotent.
#[derive(Debug)]
pub struct RawModeGuard {
    released: bool,
}

impl RawModeGuard {
    /// Switch the terminal into raw mode.
    ///
    /// Fails if another guard is already live (re-entrant acquisition is
    /// not supported) or if the device query fails, which usually means
    /// stdin is not a terminal and the caller should fall back to a
    /// non-interactive read.
    pub fn acquire() -> io::Result<Self> {
        if RAW_MODE_ACTIVE.swap(true, Ordering::SeqCst) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                "raw mode is already held by another editing session",
            ));
        }
        if let Err(e) = enable_raw_mode() {
            RAW_MODE_ACTIVE.store(false, Ordering::SeqCst);
            return Err(io::Error::new(io::ErrorKind::Other, e));
        }
        Ok(Self { released: false })
    }

    /// Restore the terminal to its original mode.
    ///
    /// Safe to call more than once; only the first call touches the device.
    /// A restore failure is reported but the guard is still marked released
    /// so the process can proceed to exit rather than hang.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        RAW_MODE_ACTIVE.store(false, Ordering::SeqCst);
        if let Err(e) = disable_raw_mode() {
            eprintln!("warning: failed to restore terminal mode: {}", e);
        }
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        self.release();
    }
}

/// Best-effort restore for teardown paths that do not own the guard.
///
/// Used by the abort coordinator, which may run while a guard is still
/// live somewhere up the stack. Harmless when the terminal is already in
/// its normal mode.
pub fn force_restore() {
    RAW_MODE_ACTIVE.store(false, Ordering::SeqCst);
    let _ = disable_raw_mode();
}
