use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// A partially typed shorthand directly before the caret, e.g. `:piz`.
static PARTIAL_SHORTHAND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":\S*$").expect("partial shorthand pattern is valid"));

/// Something a picked emoji can be written into.
pub trait TextTarget {
    /// Insert `text` at the current selection and leave the caret after it.
    fn insert(&mut self, text: &str);

    fn text(&self) -> &str;

    /// Caret position as a char index.
    fn caret(&self) -> usize;
}

/// Convert char index to byte offset, clamping to the end of `text`.
fn char_to_byte(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map(|(b, _)| b)
        .unwrap_or(text.len())
}

/// Single-line or multi-line plain text input with a selection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlainTextField {
    text: String,
    /// Char indices, `start <= end <= text.chars().count()`.
    selection: Range<usize>,
}

impl PlainTextField {
    /// Field with the caret at the end of `text`.
    pub fn new(text: &str) -> Self {
        let len = text.chars().count();
        Self {
            text: text.to_string(),
            selection: len..len,
        }
    }

    pub fn with_selection(text: &str, start: usize, end: usize) -> Self {
        let len = text.chars().count();
        let (start, end) = (start.min(len), end.min(len));
        Self {
            text: text.to_string(),
            selection: start.min(end)..start.max(end),
        }
    }

    pub fn selection(&self) -> Range<usize> {
        self.selection.clone()
    }
}

impl TextTarget for PlainTextField {
    /// Replaces the selection. A half-typed `:shorthand` right before the
    /// selection is removed first so the inserted one replaces it.
    fn insert(&mut self, text: &str) {
        let start = char_to_byte(&self.text, self.selection.start);
        let end = char_to_byte(&self.text, self.selection.end);

        let before = PARTIAL_SHORTHAND.replace(&self.text[..start], "");
        let caret = before.chars().count() + text.chars().count();

        let mut updated = String::with_capacity(before.len() + text.len() + self.text.len() - end);
        updated.push_str(&before);
        updated.push_str(text);
        updated.push_str(&self.text[end..]);

        self.text = updated;
        self.selection = caret..caret;
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn caret(&self) -> usize {
        self.selection.end
    }
}

/// Rich-text style region: text goes in at the caret as typed input would.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditableRegion {
    text: String,
    caret: usize,
}

impl EditableRegion {
    pub fn new(text: &str, caret: usize) -> Self {
        Self {
            text: text.to_string(),
            caret: caret.min(text.chars().count()),
        }
    }
}

impl TextTarget for EditableRegion {
    fn insert(&mut self, text: &str) {
        let at = char_to_byte(&self.text, self.caret);
        self.text.insert_str(at, text);
        self.caret += text.chars().count();
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn caret(&self) -> usize {
        self.caret
    }
}
