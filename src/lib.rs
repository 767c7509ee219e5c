//! mkproj - Interactive project scaffolding with a hand-rolled line editor
//!
//! This library provides the interactive input subsystem behind the
//! `mkproj` binary: a raw-mode terminal line editor, the abort coordinator
//! that keeps cancellation safe, and the thin scaffolding workflow on top.
//!
//! # Features
//!
//! - **Line editing**: cursor movement, Backspace/Delete, Home/End,
//!   kill-to-end and kill-line, with minimal redraw
//! - **Byte-level key decoding**: bounded-lookahead ESC disambiguation so
//!   a bare Escape and an arrow-key sequence are told apart reliably
//! - **Safe cancellation**: ESC, SIGINT and SIGTERM all restore the
//!   terminal and remove a half-created project directory only when a
//!   safety predicate allows it
//! - **Scaffolding workflow**: project name prompt, kind selection,
//!   `.gitignore` generation, optional git init
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use mkproj::input::edit_line;
//!
//! // Ask a question; Esc cancels just this prompt.
//! let (answer, cancelled) = edit_line("Add a git remote? ", "N", false)?;
//! if !cancelled {
//!     println!("answer: {}", answer);
//! }
//! # Ok::<(), std::io::Error>(())
//! ```

pub mod abort;
pub mod input;
pub mod scaffold;

// Re-export commonly used types for convenience
pub use input::{edit_line, EditOutcome, EditSession, Key, LineBuffer};
pub use scaffold::{ProjectKind, ScaffoldConfig};
