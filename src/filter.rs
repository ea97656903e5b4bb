use unicode_width::UnicodeWidthStr;

/// Text and cursor of the filter being typed, plus the selection to restore
/// when the session is cancelled.
///
/// `cursor` counts characters, never bytes, and stays within
/// `0..=text.chars().count()`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub text: String,
    pub cursor: usize,
    pub prev_selection: String,
}

impl FilterState {
    /// Whether a non-empty filter is narrowing the listing.
    pub fn is_active(&self) -> bool {
        !self.text.is_empty()
    }

    /// Number of characters in the filter text.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Terminal column of the cursor relative to the start of the text.
    pub fn cursor_column(&self) -> usize {
        self.text[..self.byte_offset(self.cursor)].width()
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    /// Place the cursor after the last character.
    pub fn cursor_to_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Insert `c` at the cursor and advance past it.
    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor (backspace).
    pub fn delete_char(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let at = self.byte_offset(self.cursor - 1);
        self.text.remove(at);
        self.cursor -= 1;
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    /// Drop the filter text; the remembered selection is kept.
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }
}
