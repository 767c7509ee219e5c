//! Interactive Line-Editing Input Subsystem
//!
//! A hand-rolled terminal line editor working directly on raw terminal
//! input: raw-mode acquisition, byte-level key decoding with bounded ESC
//! lookahead, clamped line-buffer editing, and minimal-redraw output.
//!
//! ## Module Structure
//!
//! - `raw_mode` - Raw terminal mode acquisition and guaranteed release
//! - `keys` - Byte-stream to key-event decoding
//! - `buffer` - Line buffer and cursor state
//! - `session` - The prompt loop and the `edit_line` caller contract

pub mod buffer;
pub mod keys;
pub mod raw_mode;
pub mod session;

// Re-export main types for convenience
pub use buffer::LineBuffer;
pub use keys::{ByteSource, Key, KeyDecoder, TtyByteSource, DEFAULT_ESC_TIMEOUT};
pub use raw_mode::RawModeGuard;
pub use session::{edit_line, EditOutcome, EditSession};
