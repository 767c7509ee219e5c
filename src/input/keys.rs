//! Key Decoder
//!
//! Turns a raw terminal byte stream into discrete key events. Byte `0x1B`
//! is ambiguous: it is both the Escape key and the first byte of an
//! arrow/function-key sequence. The decoder resolves this with a bounded
//! lookahead — if no follow-up byte arrives within a short timeout, the
//! byte was a bare ESC.

use std::io;
use std::time::Duration;

/// Default timeout for disambiguating bare ESC from an escape sequence.
///
/// Long enough to catch a terminal's burst-written sequence, short enough
/// not to register as lag. Overridable via [`KeyDecoder::with_esc_timeout`]
/// for slow links (remote SSH sessions can exceed this).
pub const DEFAULT_ESC_TIMEOUT: Duration = Duration::from_millis(25);

/// One logical keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Printable character, including multi-byte UTF-8 input.
    Printable(char),
    /// Enter/Return (`\r` or `\n`).
    Enter,
    /// Backspace (0x7F or 0x08): delete the character left of the cursor.
    Backspace,
    /// Delete (Ctrl-D or `ESC [ 3 ~`): delete the character at the cursor.
    Delete,
    /// Left arrow.
    MoveLeft,
    /// Right arrow.
    MoveRight,
    /// Home (Ctrl-A or `ESC [ H`).
    Home,
    /// End (Ctrl-E or `ESC [ F`).
    End,
    /// Ctrl-K: truncate from the cursor to the end of the line.
    KillToEnd,
    /// Ctrl-U: remove everything before the cursor.
    KillLine,
    /// Bare ESC key.
    Escape,
    /// Ctrl-C (0x03 arrives as a plain byte in raw mode).
    Interrupt,
}

/// Blocking byte supplier with an optional timed read.
///
/// Abstracts the terminal away from the decoder so tests can drive it with
/// scripted bytes.
pub trait ByteSource {
    /// Read one byte, blocking until input arrives.
    fn read_byte(&mut self) -> io::Result<u8>;

    /// Read one byte, giving up after `timeout`. `Ok(None)` means the
    /// timeout elapsed with no input.
    fn read_byte_timeout(&mut self, timeout: Duration) -> io::Result<Option<u8>>;
}

/// Byte source reading the controlling terminal.
///
/// Reads fd 0 directly with `libc::read`, bypassing `std::io::stdin()`:
/// its internal BufReader keeps its own buffer, which would fall out of
/// sync with the `libc::poll` used for the timed lookahead read.
#[derive(Debug, Default)]
pub struct TtyByteSource;

impl TtyByteSource {
    pub fn new() -> Self {
        Self
    }
}

impl ByteSource for TtyByteSource {
    fn read_byte(&mut self) -> io::Result<u8> {
        let mut byte = 0u8;
        loop {
            let n = unsafe {
                libc::read(
                    libc::STDIN_FILENO,
                    &mut byte as *mut u8 as *mut libc::c_void,
                    1,
                )
            };
            if n == 1 {
                return Ok(byte);
            }
            if n == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "end of input on terminal",
                ));
            }
            let err = io::Error::last_os_error();
            if err.kind() != io::ErrorKind::Interrupted {
                return Err(err);
            }
            // EINTR from an abort signal surfaces to the caller; any other
            // interruption just retries the read.
            if crate::abort::interrupt_requested() {
                return Err(err);
            }
        }
    }

    fn read_byte_timeout(&mut self, timeout: Duration) -> io::Result<Option<u8>> {
        let mut pollfd = libc::pollfd {
            fd: libc::STDIN_FILENO,
            events: libc::POLLIN,
            revents: 0,
        };
        let millis = timeout.as_millis().min(i32::MAX as u128) as libc::c_int;
        let ready = unsafe { libc::poll(&mut pollfd, 1, millis) };
        if ready < 0 {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::Interrupted {
                if crate::abort::interrupt_requested() {
                    return Err(err);
                }
                // Any other signal landing mid-lookahead reads the same
                // as a timeout.
                return Ok(None);
            }
            return Err(err);
        }
        if ready == 0 || (pollfd.revents & libc::POLLIN) == 0 {
            return Ok(None);
        }
        self.read_byte().map(Some)
    }
}

/// Decoder from raw bytes to [`Key`] events.
///
/// Carries the configured ESC lookahead timeout plus at most one byte of
/// lookahead read past the end of an escape sequence; each call to
/// [`KeyDecoder::next_key`] otherwise consumes the minimum bytes for one
/// keystroke.
#[derive(Debug, Clone, Copy)]
pub struct KeyDecoder {
    esc_timeout: Duration,
    pending: Option<u8>,
}

impl Default for KeyDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyDecoder {
    /// Create a decoder with the default ESC lookahead timeout.
    pub fn new() -> Self {
        Self {
            esc_timeout: DEFAULT_ESC_TIMEOUT,
            pending: None,
        }
    }

    /// Create a decoder with a custom ESC lookahead timeout.
    pub fn with_esc_timeout(esc_timeout: Duration) -> Self {
        Self {
            esc_timeout,
            pending: None,
        }
    }

    /// Decode exactly one key event, blocking until a recognizable
    /// keystroke arrives. Control bytes outside the recognized set are
    /// discarded and reading continues.
    pub fn next_key<S: ByteSource>(&mut self, source: &mut S) -> io::Result<Key> {
        loop {
            let byte = match self.pending.take() {
                Some(byte) => byte,
                None => source.read_byte()?,
            };
            let key = match byte {
                b'\r' | b'\n' => Key::Enter,
                0x7F | 0x08 => Key::Backspace,
                0x01 => Key::Home,
                0x03 => Key::Interrupt,
                0x04 => Key::Delete,
                0x05 => Key::End,
                0x0B => Key::KillToEnd,
                0x15 => Key::KillLine,
                0x1B => self.decode_escape(source)?,
                0x20..=0x7E => Key::Printable(byte as char),
                0x80..=0xFF => match read_utf8_char(source, byte)? {
                    Some(ch) => Key::Printable(ch),
                    // Invalid UTF-8 start byte: drop it and keep reading.
                    None => continue,
                },
                _ => continue,
            };
            return Ok(key);
        }
    }

    /// Resolve a leading ESC byte: bounded lookahead for up to two more
    /// bytes. Timeout at any point, or an unrecognized follow-up, decodes
    /// as a bare `Escape` — never an error.
    fn decode_escape<S: ByteSource>(&mut self, source: &mut S) -> io::Result<Key> {
        let key = match source.read_byte_timeout(self.esc_timeout)? {
            None => Key::Escape,
            Some(b'[') => match source.read_byte_timeout(self.esc_timeout)? {
                Some(b'D') => Key::MoveLeft,
                Some(b'C') => Key::MoveRight,
                Some(b'H') => Key::Home,
                Some(b'F') => Key::End,
                Some(b'3') => {
                    // Consume the trailing '~' of ESC [ 3 ~ if present;
                    // anything else belongs to the next keystroke.
                    match source.read_byte_timeout(self.esc_timeout)? {
                        Some(b'~') | None => {}
                        Some(other) => self.pending = Some(other),
                    }
                    Key::Delete
                }
                _ => Key::Escape,
            },
            // SS3 forms sent in application-cursor mode.
            Some(b'O') => match source.read_byte_timeout(self.esc_timeout)? {
                Some(b'D') => Key::MoveLeft,
                Some(b'C') => Key::MoveRight,
                Some(b'H') => Key::Home,
                Some(b'F') => Key::End,
                _ => Key::Escape,
            },
            Some(_) => Key::Escape,
        };
        Ok(key)
    }
}

/// Assemble a multi-byte UTF-8 character whose first byte was `first`.
///
/// The continuation bytes of a keystroke arrive in the same burst, so the
/// follow-up reads block. Returns `None` for invalid sequences.
fn read_utf8_char<S: ByteSource>(source: &mut S, first: u8) -> io::Result<Option<char>> {
    let len = match first {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => return Ok(None),
    };
    let mut buf = [first, 0, 0, 0];
    for slot in buf.iter_mut().take(len).skip(1) {
        *slot = source.read_byte()?;
    }
    Ok(std::str::from_utf8(&buf[..len])
        .ok()
        .and_then(|s| s.chars().next()))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// One step of scripted terminal input.
    #[derive(Debug, Clone, Copy)]
    pub(crate) enum Step {
        Byte(u8),
        /// The next timed read observes a timeout.
        Timeout,
        /// The next read fails with `EINTR`, as after a caught signal.
        Interrupt,
    }

    /// Byte source fed from a script (for testing without a terminal).
    #[derive(Debug, Default)]
    pub(crate) struct ScriptedSource {
        steps: VecDeque<Step>,
    }

    impl ScriptedSource {
        pub(crate) fn from_bytes(bytes: &[u8]) -> Self {
            Self {
                steps: bytes.iter().copied().map(Step::Byte).collect(),
            }
        }

        pub(crate) fn from_steps(steps: &[Step]) -> Self {
            Self {
                steps: steps.iter().copied().collect(),
            }
        }
    }

    impl ByteSource for ScriptedSource {
        fn read_byte(&mut self) -> io::Result<u8> {
            loop {
                match self.steps.pop_front() {
                    Some(Step::Byte(b)) => return Ok(b),
                    Some(Step::Timeout) => continue,
                    Some(Step::Interrupt) => {
                        return Err(io::Error::from(io::ErrorKind::Interrupted))
                    }
                    None => {
                        return Err(io::Error::new(
                            io::ErrorKind::UnexpectedEof,
                            "script exhausted",
                        ))
                    }
                }
            }
        }

        fn read_byte_timeout(&mut self, _timeout: Duration) -> io::Result<Option<u8>> {
            match self.steps.pop_front() {
                Some(Step::Byte(b)) => Ok(Some(b)),
                Some(Step::Interrupt) => Err(io::Error::from(io::ErrorKind::Interrupted)),
                Some(Step::Timeout) | None => Ok(None),
            }
        }
    }

    fn decode_all(bytes: &[u8]) -> Vec<Key> {
        let mut decoder = KeyDecoder::new();
        let mut source = ScriptedSource::from_bytes(bytes);
        let mut keys = Vec::new();
        while let Ok(key) = decoder.next_key(&mut source) {
            keys.push(key);
        }
        keys
    }

    #[test]
    fn test_printable_chars() {
        assert_eq!(
            decode_all(b"hi"),
            vec![Key::Printable('h'), Key::Printable('i')]
        );
        assert_eq!(decode_all(b" "), vec![Key::Printable(' ')]);
        assert_eq!(decode_all(b"~"), vec![Key::Printable('~')]);
    }

    #[test]
    fn test_enter_both_forms() {
        assert_eq!(decode_all(b"\r"), vec![Key::Enter]);
        assert_eq!(decode_all(b"\n"), vec![Key::Enter]);
    }

    #[test]
    fn test_backspace_both_forms() {
        assert_eq!(decode_all(&[0x7F]), vec![Key::Backspace]);
        assert_eq!(decode_all(&[0x08]), vec![Key::Backspace]);
    }

    #[test]
    fn test_control_key_mappings() {
        assert_eq!(decode_all(&[0x01]), vec![Key::Home]);
        assert_eq!(decode_all(&[0x05]), vec![Key::End]);
        assert_eq!(decode_all(&[0x0B]), vec![Key::KillToEnd]);
        assert_eq!(decode_all(&[0x15]), vec![Key::KillLine]);
        assert_eq!(decode_all(&[0x04]), vec![Key::Delete]);
        assert_eq!(decode_all(&[0x03]), vec![Key::Interrupt]);
    }

    #[test]
    fn test_unrecognized_control_bytes_discarded() {
        // Ctrl-B and Ctrl-G are not bound; the next real key comes through.
        assert_eq!(decode_all(&[0x02, 0x07, b'a']), vec![Key::Printable('a')]);
    }

    #[test]
    fn test_csi_arrows_home_end() {
        assert_eq!(decode_all(b"\x1b[D"), vec![Key::MoveLeft]);
        assert_eq!(decode_all(b"\x1b[C"), vec![Key::MoveRight]);
        assert_eq!(decode_all(b"\x1b[H"), vec![Key::Home]);
        assert_eq!(decode_all(b"\x1b[F"), vec![Key::End]);
    }

    #[test]
    fn test_csi_delete_consumes_tilde() {
        assert_eq!(
            decode_all(b"\x1b[3~x"),
            vec![Key::Delete, Key::Printable('x')]
        );
    }

    #[test]
    fn test_csi_delete_without_tilde_keeps_followup_byte() {
        // A byte other than '~' after ESC [ 3 is the start of the next
        // keystroke, not part of the Delete sequence.
        assert_eq!(
            decode_all(b"\x1b[3x"),
            vec![Key::Delete, Key::Printable('x')]
        );
        assert_eq!(decode_all(b"\x1b[3\r"), vec![Key::Delete, Key::Enter]);
    }

    #[test]
    fn test_ss3_arrows() {
        assert_eq!(decode_all(b"\x1bOD"), vec![Key::MoveLeft]);
        assert_eq!(decode_all(b"\x1bOC"), vec![Key::MoveRight]);
        assert_eq!(decode_all(b"\x1bOH"), vec![Key::Home]);
        assert_eq!(decode_all(b"\x1bOF"), vec![Key::End]);
    }

    #[test]
    fn test_bare_escape_on_timeout() {
        let mut decoder = KeyDecoder::new();
        let mut source = ScriptedSource::from_steps(&[Step::Byte(0x1B), Step::Timeout]);
        assert_eq!(decoder.next_key(&mut source).unwrap(), Key::Escape);
    }

    #[test]
    fn test_escape_then_incomplete_csi_is_escape() {
        // ESC [ with the final byte never arriving.
        let mut decoder = KeyDecoder::new();
        let mut source =
            ScriptedSource::from_steps(&[Step::Byte(0x1B), Step::Byte(b'['), Step::Timeout]);
        assert_eq!(decoder.next_key(&mut source).unwrap(), Key::Escape);
    }

    #[test]
    fn test_escape_then_unrecognized_followup_is_escape() {
        // The lookahead byte is consumed either way; only Escape comes out.
        assert_eq!(decode_all(b"\x1bq"), vec![Key::Escape]);
    }

    #[test]
    fn test_utf8_multibyte_char() {
        // 'é' is 0xC3 0xA9.
        assert_eq!(
            decode_all("é".as_bytes()),
            vec![Key::Printable('é')]
        );
        // '你' is three bytes.
        assert_eq!(
            decode_all("你".as_bytes()),
            vec![Key::Printable('你')]
        );
    }

    #[test]
    fn test_invalid_utf8_start_byte_discarded() {
        assert_eq!(decode_all(&[0xFF, b'a']), vec![Key::Printable('a')]);
    }
}
