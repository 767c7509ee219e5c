//! Line Buffer Editor
//!
//! Single-line edit state: an ordered sequence of characters plus a cursor
//! offset. The cursor is always a valid insertion index — every operation
//! clamps by construction, so out-of-range edits are no-ops, never errors.

/// In-progress input line with cursor management.
///
/// Characters are stored individually so the cursor stays a character
/// index even under multi-byte UTF-8 input.
#[derive(Debug, Clone, Default)]
pub struct LineBuffer {
    chars: Vec<char>,
    cursor: usize,
}

impl LineBuffer {
    /// Create an empty buffer with the cursor at 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current buffer contents.
    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    /// Cursor offset, in characters. Always `0 ..= len()`.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of characters in the buffer.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Whether the buffer holds no characters.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Splice a character in at the cursor; the cursor advances past it.
    pub fn insert(&mut self, ch: char) {
        self.chars.insert(self.cursor, ch);
        self.cursor += 1;
    }

    /// Remove the character left of the cursor. No-op at offset 0.
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.chars.remove(self.cursor);
        }
    }

    /// Remove the character at the cursor. No-op at the end of the line.
    pub fn delete(&mut self) {
        if self.cursor < self.chars.len() {
            self.chars.remove(self.cursor);
        }
    }

    /// Move the cursor one character left, clamped at 0.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move the cursor one character right, clamped at the end.
    pub fn move_right(&mut self) {
        if self.cursor < self.chars.len() {
            self.cursor += 1;
        }
    }

    /// Move the cursor to the start of the line.
    pub fn home(&mut self) {
        self.cursor = 0;
    }

    /// Move the cursor past the last character.
    pub fn end(&mut self) {
        self.cursor = self.chars.len();
    }

    /// Truncate the buffer from the cursor to the end of the line.
    pub fn kill_to_end(&mut self) {
        self.chars.truncate(self.cursor);
    }

    /// Remove everything before the cursor; the cursor moves to 0.
    pub fn kill_line(&mut self) {
        self.chars.drain(..self.cursor);
        self.cursor = 0;
    }

    /// Finalize the edit: the buffer contents, or `default` if the user
    /// submitted an empty line. This is the only place default
    /// substitution happens.
    pub fn submit(self, default: &str) -> String {
        if self.chars.is_empty() {
            default.to_string()
        } else {
            self.text()
        }
    }
}
