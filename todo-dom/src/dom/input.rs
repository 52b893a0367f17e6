//! Form input state

use super::NodeId;

/// Handle to an `<input>` element.
///
/// Only the [`Document`](super::Document) hands these out, after checking the
/// element really is an input, so code holding one never has to test the
/// element kind again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputId(NodeId);

impl InputId {
    pub(crate) fn new(node: NodeId) -> Self {
        Self(node)
    }

    pub fn node(&self) -> NodeId {
        self.0
    }
}

impl From<InputId> for NodeId {
    fn from(input: InputId) -> Self {
        input.0
    }
}

/// Live state of a text or checkbox input. Offsets count characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    value: String,
    checked: bool,
    selection_start: usize,
    selection_end: usize,
}

impl InputState {
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the value. Like a browser, this collapses the cursor to the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        let end = self.char_len();
        self.selection_start = end;
        self.selection_end = end;
    }

    pub fn checked(&self) -> bool {
        self.checked
    }

    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    pub fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn selection(&self) -> (usize, usize) {
        (self.selection_start, self.selection_end)
    }

    /// Select a range; both ends are clamped to the value length.
    pub fn set_selection(&mut self, start: usize, end: usize) {
        let len = self.char_len();
        let (start, end) = (start.min(len), end.min(len));
        self.selection_start = start.min(end);
        self.selection_end = end.max(start);
    }

    /// Collapse the selection to a single cursor position
    pub fn set_cursor(&mut self, position: usize) {
        self.set_selection(position, position);
    }

    /// Cursor position, or `None` while a range is selected
    pub fn cursor(&self) -> Option<usize> {
        (self.selection_start == self.selection_end).then_some(self.selection_end)
    }

    /// Type text at the cursor, replacing any selected range
    pub fn insert_text(&mut self, text: &str) {
        let start = byte_offset(&self.value, self.selection_start);
        let end = byte_offset(&self.value, self.selection_end);
        self.value.replace_range(start..end, text);
        let cursor = self.selection_start + text.chars().count();
        self.selection_start = cursor;
        self.selection_end = cursor;
    }
}

fn byte_offset(s: &str, chars: usize) -> usize {
    s.char_indices().nth(chars).map(|(i, _)| i).unwrap_or(s.len())
}
