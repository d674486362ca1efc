use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::util::unicode;

/// What a key did to a [`TextInput`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// The text changed
    Changed,
    /// Only the cursor moved
    Moved,
    /// The user asked to submit (Enter)
    Submit,
    /// The key means nothing to a single-line field, or the field is read-only
    Ignored,
}

/// A single-line text field with a grapheme-aligned cursor.
///
/// Keys are only accepted while the field is editable. Focus is tracked
/// separately so the owner can drive it imperatively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInput {
    buffer: String,
    /// Byte offset into `buffer`, always on a grapheme boundary
    cursor: usize,
    editable: bool,
    focused: bool,
}

impl TextInput {
    pub fn new(text: impl Into<String>) -> Self {
        let buffer = text.into();
        let cursor = buffer.len();
        TextInput {
            buffer,
            cursor,
            editable: false,
            focused: false,
        }
    }

    pub fn value(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Cursor position in terminal cells from the start of the text
    pub fn cursor_col(&self) -> usize {
        unicode::byte_offset_to_display_col(&self.buffer, self.cursor)
    }

    pub fn is_editable(&self) -> bool {
        self.editable
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn set_editable(&mut self, editable: bool) {
        self.editable = editable;
    }

    /// Replace the text and put the cursor at its end
    pub fn set_value(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
        self.cursor = self.buffer.len();
    }

    pub fn focus(&mut self) {
        self.focused = true;
        self.cursor = self.buffer.len();
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// Insert text at the cursor. Newlines are flattened to spaces.
    pub fn insert_str(&mut self, text: &str) -> InputOutcome {
        if !self.editable || text.is_empty() {
            return InputOutcome::Ignored;
        }
        let clean = text.replace("\r\n", " ").replace(['\n', '\r'], " ");
        self.buffer.insert_str(self.cursor, &clean);
        self.cursor += clean.len();
        InputOutcome::Changed
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> InputOutcome {
        if !self.editable {
            return InputOutcome::Ignored;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Enter => InputOutcome::Submit,
            // Start / end of line: Home, End, Ctrl+A, Ctrl+E
            KeyCode::Home => self.move_to(0),
            KeyCode::End => self.move_to(self.buffer.len()),
            KeyCode::Char('a') if ctrl => self.move_to(0),
            KeyCode::Char('e') if ctrl => self.move_to(self.buffer.len()),
            // Kill to start of line
            KeyCode::Char('u') if ctrl => {
                if self.cursor == 0 {
                    return InputOutcome::Moved;
                }
                self.buffer.drain(..self.cursor);
                self.cursor = 0;
                InputOutcome::Changed
            }
            // Delete word backward
            KeyCode::Char('w') if ctrl => self.delete_back_to(unicode::word_boundary_left(
                &self.buffer,
                self.cursor,
            )),
            KeyCode::Backspace if alt || ctrl => self.delete_back_to(unicode::word_boundary_left(
                &self.buffer,
                self.cursor,
            )),
            KeyCode::Left if alt || ctrl => {
                self.move_to(unicode::word_boundary_left(&self.buffer, self.cursor))
            }
            KeyCode::Right if alt || ctrl => {
                self.move_to(unicode::word_boundary_right(&self.buffer, self.cursor))
            }
            KeyCode::Left => match unicode::prev_grapheme_boundary(&self.buffer, self.cursor) {
                Some(prev) => self.move_to(prev),
                None => InputOutcome::Moved,
            },
            KeyCode::Right => match unicode::next_grapheme_boundary(&self.buffer, self.cursor) {
                Some(next) => self.move_to(next),
                None => InputOutcome::Moved,
            },
            KeyCode::Backspace => match unicode::prev_grapheme_boundary(&self.buffer, self.cursor)
            {
                Some(prev) => self.delete_back_to(prev),
                None => InputOutcome::Moved,
            },
            KeyCode::Delete => match unicode::next_grapheme_boundary(&self.buffer, self.cursor) {
                Some(next) => {
                    self.buffer.drain(self.cursor..next);
                    InputOutcome::Changed
                }
                None => InputOutcome::Moved,
            },
            KeyCode::Char(c) if !ctrl && !alt => {
                self.buffer.insert(self.cursor, c);
                self.cursor += c.len_utf8();
                InputOutcome::Changed
            }
            _ => InputOutcome::Ignored,
        }
    }

    fn move_to(&mut self, offset: usize) -> InputOutcome {
        self.cursor = offset.min(self.buffer.len());
        InputOutcome::Moved
    }

    fn delete_back_to(&mut self, start: usize) -> InputOutcome {
        if start >= self.cursor {
            return InputOutcome::Moved;
        }
        self.buffer.drain(start..self.cursor);
        self.cursor = start;
        InputOutcome::Changed
    }
}
