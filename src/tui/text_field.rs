use crate::util::unicode;

/// Editing keystrokes delivered to a focused text field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    Char(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    /// Delete the word before the caret (Ctrl+W)
    DeleteWord,
    /// Delete everything before the caret (Ctrl+U)
    DeleteToStart,
}

/// Single-line, grapheme-aware text buffer with a caret.
/// The caret is a byte offset that always sits on a grapheme boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    value: String,
    caret: usize,
    /// Maximum length in graphemes
    max_len: Option<usize>,
    digits_only: bool,
}

impl TextField {
    pub fn new() -> Self {
        TextField::default()
    }

    /// A field pre-filled with `value`, caret at the end
    pub fn with_value(value: &str) -> Self {
        TextField {
            value: value.to_string(),
            caret: value.len(),
            max_len: None,
            digits_only: false,
        }
    }

    /// A numeric field of at most `max_len` digits
    pub fn numeric(value: &str, max_len: usize) -> Self {
        TextField {
            value: value.to_string(),
            caret: value.len(),
            max_len: Some(max_len),
            digits_only: true,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Display width of the text before the caret
    pub fn caret_column(&self) -> usize {
        unicode::display_width(&self.value[..self.caret])
    }

    /// Apply one keystroke. Returns true if the value changed.
    pub fn apply(&mut self, key: EditKey) -> bool {
        match key {
            EditKey::Char(c) => self.insert(c),
            EditKey::Backspace => match unicode::prev_grapheme_boundary(&self.value, self.caret) {
                Some(start) => {
                    self.value.replace_range(start..self.caret, "");
                    self.caret = start;
                    true
                }
                None => false,
            },
            EditKey::Delete => match unicode::next_grapheme_boundary(&self.value, self.caret) {
                Some(end) => {
                    self.value.replace_range(self.caret..end, "");
                    true
                }
                None => false,
            },
            EditKey::Left => {
                if let Some(pos) = unicode::prev_grapheme_boundary(&self.value, self.caret) {
                    self.caret = pos;
                }
                false
            }
            EditKey::Right => {
                if let Some(pos) = unicode::next_grapheme_boundary(&self.value, self.caret) {
                    self.caret = pos;
                }
                false
            }
            EditKey::Home => {
                self.caret = 0;
                false
            }
            EditKey::End => {
                self.caret = self.value.len();
                false
            }
            EditKey::DeleteWord => {
                let start = unicode::word_boundary_left(&self.value, self.caret);
                if start == self.caret {
                    return false;
                }
                self.value.replace_range(start..self.caret, "");
                self.caret = start;
                true
            }
            EditKey::DeleteToStart => {
                if self.caret == 0 {
                    return false;
                }
                self.value.replace_range(..self.caret, "");
                self.caret = 0;
                true
            }
        }
    }

    fn insert(&mut self, c: char) -> bool {
        if c.is_control() || (self.digits_only && !c.is_ascii_digit()) {
            return false;
        }
        if let Some(max) = self.max_len
            && unicode::grapheme_count(&self.value) >= max
        {
            return false;
        }
        self.value.insert(self.caret, c);
        self.caret += c.len_utf8();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> TextField {
        let mut field = TextField::new();
        for c in text.chars() {
            field.apply(EditKey::Char(c));
        }
        field
    }

    #[test]
    fn typing_and_backspace() {
        let mut field = typed("milk");
        assert_eq!(field.value(), "milk");
        assert!(field.apply(EditKey::Backspace));
        assert_eq!(field.value(), "mil");
        assert_eq!(field.caret(), 3);
    }

    #[test]
    fn insert_in_middle() {
        let mut field = typed("bt");
        field.apply(EditKey::Left);
        field.apply(EditKey::Char('u'));
        assert_eq!(field.value(), "but");
        assert_eq!(field.caret(), 2);
    }

    #[test]
    fn backspace_removes_whole_grapheme() {
        let mut field = TextField::with_value("cafe\u{301}");
        field.apply(EditKey::Backspace);
        assert_eq!(field.value(), "caf");
    }

    #[test]
    fn home_end_and_delete() {
        let mut field = TextField::with_value("abc");
        field.apply(EditKey::Home);
        assert!(field.apply(EditKey::Delete));
        assert_eq!(field.value(), "bc");
        field.apply(EditKey::End);
        assert!(!field.apply(EditKey::Delete));
    }

    #[test]
    fn delete_word_and_line() {
        let mut field = TextField::with_value("buy some milk");
        field.apply(EditKey::DeleteWord);
        assert_eq!(field.value(), "buy some ");
        field.apply(EditKey::DeleteToStart);
        assert_eq!(field.value(), "");
    }

    #[test]
    fn numeric_field_limits() {
        let mut field = TextField::numeric("1", 2);
        assert!(!field.apply(EditKey::Char('x')));
        assert!(field.apply(EditKey::Char('2')));
        assert!(!field.apply(EditKey::Char('3')));
        assert_eq!(field.value(), "12");
    }

    #[test]
    fn caret_column_counts_cells() {
        let field = TextField::with_value("日本");
        assert_eq!(field.caret_column(), 4);
    }
}
