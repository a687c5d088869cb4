use crate::model::{EntryOutcome, TextEntry};
use crate::util::unicode::{display_col, next_grapheme_boundary, prev_grapheme_boundary};

/// Single-line text input shown in the bottom row.
///
/// Also serves as the text-entry collaborator for edit-in-place: the list
/// asks it for replacement text once the user has confirmed or cancelled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Prompt {
    buffer: String,
    /// Byte offset, always on a grapheme boundary
    cursor: usize,
    confirmed: bool,
}

impl Prompt {
    /// Empty prompt with the cursor at the start.
    pub fn new() -> Self {
        Prompt::default()
    }

    /// Prompt prefilled with `text`, cursor at the end.
    pub fn with_text(text: &str) -> Self {
        Prompt {
            buffer: text.to_string(),
            cursor: text.len(),
            confirmed: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Display column of the cursor.
    pub fn cursor_col(&self) -> usize {
        display_col(&self.buffer, self.cursor)
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
        self.confirmed = false;
    }

    pub fn insert(&mut self, c: char) {
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = prev_grapheme_boundary(&self.buffer, self.cursor) {
            self.buffer.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if let Some(next) = next_grapheme_boundary(&self.buffer, self.cursor) {
            self.buffer.replace_range(self.cursor..next, "");
        }
    }

    pub fn left(&mut self) {
        if let Some(prev) = prev_grapheme_boundary(&self.buffer, self.cursor) {
            self.cursor = prev;
        }
    }

    pub fn right(&mut self) {
        if let Some(next) = next_grapheme_boundary(&self.buffer, self.cursor) {
            self.cursor = next;
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.buffer.len();
    }

    /// Delete the word before the cursor (Ctrl+W).
    pub fn delete_word(&mut self) {
        let head = &self.buffer[..self.cursor];
        let start = head
            .trim_end()
            .rfind(char::is_whitespace)
            .map_or(0, |i| i + 1);
        self.buffer.replace_range(start..self.cursor, "");
        self.cursor = start;
    }

    /// Mark the current text as the user's answer.
    pub fn confirm(&mut self) {
        self.confirmed = true;
    }

    /// Mark the prompt as dismissed.
    pub fn cancel(&mut self) {
        self.confirmed = false;
    }

    /// Trimmed text, or `None` when blank.
    pub fn submission(&self) -> Option<&str> {
        let text = self.buffer.trim();
        (!text.is_empty()).then_some(text)
    }
}

impl TextEntry for Prompt {
    fn request(&mut self, _current: &str) -> EntryOutcome {
        if self.confirmed {
            EntryOutcome::Confirmed(self.buffer.clone())
        } else {
            EntryOutcome::Cancelled
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_and_cursor_movement() {
        let mut p = Prompt::new();
        for c in "milk".chars() {
            p.insert(c);
        }
        p.left();
        p.left();
        p.insert('-');
        assert_eq!(p.text(), "mi-lk");
        assert_eq!(p.cursor(), 3);
        p.home();
        p.delete();
        assert_eq!(p.text(), "i-lk");
        p.end();
        p.backspace();
        assert_eq!(p.text(), "i-l");
        p.right(); // already at end
        assert_eq!(p.cursor(), 3);
    }

    #[test]
    fn backspace_removes_whole_grapheme() {
        let mut p = Prompt::with_text("cafe\u{301}");
        p.backspace();
        assert_eq!(p.text(), "caf");
        assert_eq!(p.cursor_col(), 3);
    }

    #[test]
    fn delete_word_stops_at_whitespace() {
        let mut p = Prompt::with_text("buy oat milk  ");
        p.delete_word();
        assert_eq!(p.text(), "buy oat ");
        p.delete_word();
        assert_eq!(p.text(), "buy ");
        p.delete_word();
        assert_eq!(p.text(), "");
    }

    #[test]
    fn submission_trims_and_rejects_blank() {
        assert_eq!(Prompt::with_text("  walk dog ").submission(), Some("walk dog"));
        assert_eq!(Prompt::with_text("   ").submission(), None);
    }

    #[test]
    fn answers_text_entry_requests() {
        let mut p = Prompt::with_text("new text");
        assert_eq!(p.request("old"), EntryOutcome::Cancelled);
        p.confirm();
        assert_eq!(
            p.request("old"),
            EntryOutcome::Confirmed("new text".to_string())
        );
        p.cancel();
        assert_eq!(p.request("old"), EntryOutcome::Cancelled);
    }
}
