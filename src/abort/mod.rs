//! Abort & Cleanup Coordinator
//!
//! Intercepts cancellation — the ESC key during an editing session, or an
//! interrupt/terminate signal at any point — and unwinds safely: terminal
//! mode restored, a just-created but unpopulated project directory removed
//! only when a safety predicate allows it, a clear message printed, and a
//! non-zero exit.
//!
//! ## Module Structure
//!
//! - `pending` - Process-wide pending-directory state and the deletion
//!   safety predicate
//! - `teardown` - The ordered teardown sequence and the flag-setting POSIX
//!   signal handlers

pub mod pending;
pub mod teardown;

pub use pending::{clear_pending, is_safe_to_remove, set_pending};
pub use teardown::{
    cancel_and_exit, exit_if_interrupted, install_signal_handlers, interrupt_requested,
    ESCAPE_EXIT_CODE, SIGNAL_EXIT_CODE,
};
