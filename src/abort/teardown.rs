//! Cancellation Teardown
//!
//! Both cancellation triggers, ESC in an editing session with
//! `exit_on_escape` and SIGINT/SIGTERM delivered at any point, converge
//! on one ordered sequence: restore the terminal, remove the pending
//! project directory if it is safe to do so, print a colored message,
//! terminate with a non-zero status. Every step is best-effort; a failure
//! in one never skips the rest.
//!
//! Signal handlers themselves only set a flag. None of the teardown work
//! (allocation, locking, formatted output) is async-signal-safe, so it
//! runs in normal context: blocking terminal reads return `EINTR` once
//! the flag is set, and the workflow polls [`exit_if_interrupted`]
//! between its blocking steps.

use std::fs;
use std::path::PathBuf;
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};

use crossterm::style::Stylize;

use super::pending::{is_safe_to_remove, pending_path};
use crate::input::raw_mode;

/// Exit status for ESC-driven cancellation.
pub const ESCAPE_EXIT_CODE: i32 = 1;
/// Exit status for signal-driven cancellation (128 + SIGINT).
pub const SIGNAL_EXIT_CODE: i32 = 130;

/// Run the full teardown sequence and terminate the process.
pub fn cancel_and_exit(message: &str, code: i32) -> ! {
    raw_mode::force_restore();
    if let Some(removed) = cleanup_pending() {
        println!("\r\n{} {}", "Removed".dark_grey(), removed.display());
    }
    println!("\r\n{}", message.red());
    process::exit(code);
}

/// Remove the pending project directory if one is recorded, it still
/// exists, and the safety predicate allows it. Returns the removed path.
pub(crate) fn cleanup_pending() -> Option<PathBuf> {
    let path = pending_path()?;
    if !path.exists() || !is_safe_to_remove(&path) {
        return None;
    }
    match fs::remove_dir_all(&path) {
        Ok(()) => Some(path),
        Err(e) => {
            eprintln!(
                "\r\nwarning: could not remove {}: {}",
                path.display(),
                e
            );
            None
        }
    }
}

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Install SIGINT/SIGTERM handlers that request cancellation.
///
/// The handlers do nothing but set [`INTERRUPTED`]; a store to an atomic
/// is the one thing a handler can safely do here. `sa_flags` stays zero
/// so the kernel does not restart interrupted syscalls: a blocking
/// terminal read returns `EINTR` instead of resuming, which is how the
/// editing session notices the request. Interruption while raw mode is
/// off and a prompt is active is covered separately, by `inquire`'s own
/// Ctrl-C reporting.
pub fn install_signal_handlers() {
    unsafe {
        let mut sa: libc::sigaction = std::mem::zeroed();
        sa.sa_sigaction = handle_signal as libc::sighandler_t;
        sa.sa_flags = 0;
        libc::sigaction(libc::SIGINT, &sa, std::ptr::null_mut());
        libc::sigaction(libc::SIGTERM, &sa, std::ptr::null_mut());
    }
}

extern "C" fn handle_signal(_sig: libc::c_int) {
    INTERRUPTED.store(true, Ordering::SeqCst);
}

/// Whether a SIGINT/SIGTERM has arrived since the handlers were installed.
pub fn interrupt_requested() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

/// Run the signal teardown if an interrupt has been requested. Called by
/// the workflow between blocking steps, where a signal cannot surface as
/// an `EINTR` read error.
pub fn exit_if_interrupted() {
    if interrupt_requested() {
        cancel_and_exit("Interrupted.", SIGNAL_EXIT_CODE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abort::pending::{clear_pending, set_pending};
    use std::sync::Mutex;

    /// The pending registry is process-wide; serialize the tests that
    /// touch it.
    static REGISTRY_GUARD: Mutex<()> = Mutex::new(());

    #[test]
    fn test_cleanup_removes_safe_pending_directory() {
        let _guard = REGISTRY_GUARD.lock().unwrap();
        let root = tempfile::tempdir().unwrap();
        let project = root.path().join("myapp");
        fs::create_dir(&project).unwrap();
        fs::write(project.join(".gitignore"), "target/\n").unwrap();

        set_pending(project.clone());
        let removed = cleanup_pending();
        clear_pending();

        assert_eq!(removed, Some(project.clone()));
        assert!(!project.exists());
    }

    #[test]
    fn test_cleanup_skips_missing_directory() {
        let _guard = REGISTRY_GUARD.lock().unwrap();
        let root = tempfile::tempdir().unwrap();
        let project = root.path().join("never-created");

        set_pending(project.clone());
        let removed = cleanup_pending();
        clear_pending();

        assert_eq!(removed, None);
    }

    #[test]
    fn test_cleanup_refuses_unsafe_path() {
        let _guard = REGISTRY_GUARD.lock().unwrap();
        // Home exists but must never be deleted, even if the registry is
        // (incorrectly) pointed at it.
        let home = dirs::home_dir().expect("home dir resolvable in tests");

        set_pending(home.clone());
        let removed = cleanup_pending();
        clear_pending();

        assert_eq!(removed, None);
        assert!(home.exists());
    }

    #[test]
    fn test_cleanup_with_nothing_pending() {
        let _guard = REGISTRY_GUARD.lock().unwrap();
        clear_pending();
        assert_eq!(cleanup_pending(), None);
    }

    #[test]
    fn test_signal_handler_sets_interrupt_flag() {
        install_signal_handlers();
        INTERRUPTED.store(false, Ordering::SeqCst);
        assert!(!interrupt_requested());

        // With the handler installed, raising SIGINT must not kill the
        // process; it only records the request.
        unsafe {
            libc::raise(libc::SIGINT);
        }

        assert!(interrupt_requested());
        INTERRUPTED.store(false, Ordering::SeqCst);
    }
}
