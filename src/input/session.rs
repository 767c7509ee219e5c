//! Editing Session
//!
//! Ties the raw-mode controller, key decoder and line buffer together:
//! show a prompt, loop decode → apply → redraw until Enter or ESC, and
//! always release the terminal on the way out. One session holds the
//! terminal at a time; the guard enforces that.

use std::io::{self, IsTerminal, Write};
use std::time::Duration;

use super::buffer::LineBuffer;
use super::keys::{ByteSource, Key, KeyDecoder, TtyByteSource};
use super::raw_mode::RawModeGuard;
use crate::abort;

/// Result of one prompt, surfaced to the caller.
///
/// Process-terminating cancellation (ESC with `exit_on_escape`, Ctrl-C)
/// never returns at all — the abort coordinator exits first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// User pressed Enter; the default was substituted if the line was empty.
    Submitted(String),
    /// User pressed ESC on a prompt where escape only cancels the prompt.
    Cancelled,
}

/// How the inner edit loop ended. Terminal-mode release happens between
/// this and any process exit, so the loop itself never terminates the
/// process (which also keeps it testable).
#[derive(Debug, PartialEq, Eq)]
enum LoopEnd {
    Submitted(String),
    CancelledPrompt,
    EscapeAbort,
    Interrupted,
}

/// One interactive line prompt.
#[derive(Debug, Clone)]
pub struct EditSession {
    prompt: String,
    default: String,
    exit_on_escape: bool,
    decoder: KeyDecoder,
}

impl EditSession {
    /// Create a session. `default` is returned when the user submits an
    /// empty line; `exit_on_escape` decides whether ESC aborts the whole
    /// process or only this prompt.
    pub fn new(prompt: &str, default: &str, exit_on_escape: bool) -> Self {
        Self {
            prompt: prompt.to_string(),
            default: default.to_string(),
            exit_on_escape,
            decoder: KeyDecoder::new(),
        }
    }

    /// Override the ESC lookahead timeout (for slow terminals).
    pub fn with_esc_timeout(mut self, esc_timeout: Duration) -> Self {
        self.decoder = KeyDecoder::with_esc_timeout(esc_timeout);
        self
    }

    /// Run the prompt against the controlling terminal.
    ///
    /// Fails without entering raw mode when stdin is not a terminal, so
    /// the caller can fall back to a non-interactive read.
    pub fn run(&self) -> io::Result<EditOutcome> {
        if !io::stdin().is_terminal() {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "stdin is not a terminal",
            ));
        }
        let mut guard = RawModeGuard::acquire()?;
        let mut source = TtyByteSource::new();
        let mut out = io::stdout();
        let end = self.run_loop(&mut source, &mut out);
        // Restore the terminal before returning or exiting, on every path.
        guard.release();
        match end? {
            LoopEnd::Submitted(value) => Ok(EditOutcome::Submitted(value)),
            LoopEnd::CancelledPrompt => Ok(EditOutcome::Cancelled),
            LoopEnd::EscapeAbort => {
                abort::cancel_and_exit("Escape pressed.", abort::ESCAPE_EXIT_CODE)
            }
            LoopEnd::Interrupted => {
                abort::cancel_and_exit("Interrupted.", abort::SIGNAL_EXIT_CODE)
            }
        }
    }

    /// The decode → apply → redraw loop, generic over input and output so
    /// tests can drive it with scripted bytes and a captured writer.
    fn run_loop<S: ByteSource, W: Write>(
        &self,
        source: &mut S,
        out: &mut W,
    ) -> io::Result<LoopEnd> {
        let mut buffer = LineBuffer::new();
        let mut decoder = self.decoder;
        let _ = self.redraw(out, &buffer);
        loop {
            let key = match decoder.next_key(source) {
                Ok(key) => key,
                // A signal landing in the blocking read surfaces as EINTR;
                // it asks for the same teardown as Ctrl-C.
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {
                    return Ok(LoopEnd::Interrupted)
                }
                Err(e) => return Err(e),
            };
            match key {
                Key::Enter => {
                    let _ = write!(out, "\r\n");
                    let _ = out.flush();
                    return Ok(LoopEnd::Submitted(buffer.submit(&self.default)));
                }
                Key::Escape => {
                    if self.exit_on_escape {
                        return Ok(LoopEnd::EscapeAbort);
                    }
                    // Clear the partial input before handing back.
                    let _ = write!(out, "\r\x1B[K");
                    let _ = out.flush();
                    return Ok(LoopEnd::CancelledPrompt);
                }
                Key::Interrupt => return Ok(LoopEnd::Interrupted),
                Key::Printable(ch) => buffer.insert(ch),
                Key::Backspace => buffer.backspace(),
                Key::Delete => buffer.delete(),
                Key::MoveLeft => buffer.move_left(),
                Key::MoveRight => buffer.move_right(),
                Key::Home => buffer.home(),
                Key::End => buffer.end(),
                Key::KillToEnd => buffer.kill_to_end(),
                Key::KillLine => buffer.kill_line(),
            }
            // Redraw is best-effort; a failed write is not fatal.
            let _ = self.redraw(out, &buffer);
        }
    }

    /// Minimal redraw: return to column 0, reprint prompt and buffer with
    /// a clear-to-end-of-line, then step the cursor back to its offset.
    fn redraw<W: Write>(&self, out: &mut W, buffer: &LineBuffer) -> io::Result<()> {
        write!(out, "\r{}\x1B[K{}", self.prompt, buffer.text())?;
        let after_cursor = buffer.len() - buffer.cursor();
        if after_cursor > 0 {
            write!(out, "\x1B[{}D", after_cursor)?;
        }
        out.flush()
    }
}

/// Caller contract for the scaffolding workflow: returns the submitted
/// value and whether the prompt was cancelled locally.
///
/// Pass `exit_on_escape = true` for prompts the workflow cannot continue
/// without (the project name); `false` for optional sub-prompts where ESC
/// just means "no further input".
pub fn edit_line(prompt: &str, default: &str, exit_on_escape: bool) -> io::Result<(String, bool)> {
    match EditSession::new(prompt, default, exit_on_escape).run()? {
        EditOutcome::Submitted(value) => Ok((value, false)),
        EditOutcome::Cancelled => Ok((String::new(), true)),
    }
}
