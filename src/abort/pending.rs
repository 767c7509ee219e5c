//! Pending Project State
//!
//! Process-wide record of the one project directory that has been created
//! but not yet populated. The scaffolding workflow sets it right after
//! `mkdir` succeeds and clears it once setup completes; the teardown path
//! only ever reads it. A deletion safety predicate guards the read side
//! against an upstream logic error computing an overly-broad path.

use std::path::{Component, Path, PathBuf};
use std::sync::Mutex;

static PENDING: Mutex<Option<PathBuf>> = Mutex::new(None);

/// Directory names under the home directory that must never be deleted,
/// even if the computed project path somehow equals one of them.
const PROTECTED_HOME_CHILDREN: &[&str] = &[
    "Desktop",
    "Documents",
    "Downloads",
    "Music",
    "Pictures",
    "Videos",
];

/// Record `path` as the directory to remove if the process is cancelled
/// before setup completes.
pub fn set_pending(path: PathBuf) {
    if let Ok(mut pending) = PENDING.lock() {
        *pending = Some(path);
    }
}

/// Mark setup complete: cancellation no longer removes anything.
pub fn clear_pending() {
    if let Ok(mut pending) = PENDING.lock() {
        *pending = None;
    }
}

/// The currently pending directory, if any.
///
/// Uses `try_lock` so the teardown path never blocks on a lock the
/// interrupted workflow still holds. A held lock reads as "nothing
/// pending"; skipping deletion is the conservative outcome.
pub(crate) fn pending_path() -> Option<PathBuf> {
    PENDING.try_lock().ok().and_then(|pending| pending.clone())
}

/// Whether `path` may be recursively deleted during teardown.
///
/// Rejects relative paths, paths with `..` or `.` components, the home
/// directory itself, its well-known personal children (Desktop,
/// Documents, ...), and any ancestor of the home directory (the
/// filesystem root included).
pub fn is_safe_to_remove(path: &Path) -> bool {
    match dirs::home_dir() {
        Some(home) => is_safe_to_remove_with_home(path, &home),
        // Without a resolvable home directory the predicate cannot vouch
        // for anything; refuse deletion outright.
        None => false,
    }
}

/// Predicate body with the home directory injected, for direct unit tests.
fn is_safe_to_remove_with_home(path: &Path, home: &Path) -> bool {
    if !path.is_absolute() {
        return false;
    }
    // A `..` (or stray `.`) component can resolve inside the protected set
    // while defeating the component-wise comparisons below:
    // `/home/user/projects/..` is neither equal to home nor a prefix of it,
    // yet names exactly the home directory.
    if path
        .components()
        .any(|c| matches!(c, Component::ParentDir | Component::CurDir))
    {
        return false;
    }
    if path == home || home.starts_with(path) {
        return false;
    }
    for child in PROTECTED_HOME_CHILDREN {
        if path == home.join(child) {
            return false;
        }
    }
    true
}
