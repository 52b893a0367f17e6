//! Event system for Todo DOM

use crate::dom::NodeId;

/// The kinds of events a listener can be registered for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    // Mouse events
    Click,
    DoubleClick,

    // Focus events
    Focus,
    Blur,

    // Keyboard events
    KeyPress,
    KeyDown,
    KeyUp,

    // Text entry
    Input,
}

impl EventKind {
    /// The DOM event type name (`"dblclick"`, `"keydown"`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Click => "click",
            EventKind::DoubleClick => "dblclick",
            EventKind::Focus => "focus",
            EventKind::Blur => "blur",
            EventKind::KeyPress => "keypress",
            EventKind::KeyDown => "keydown",
            EventKind::KeyUp => "keyup",
            EventKind::Input => "input",
        }
    }

    pub fn is_keyboard(&self) -> bool {
        matches!(self, EventKind::KeyPress | EventKind::KeyDown | EventKind::KeyUp)
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single event delivered to a node of the document
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub kind: EventKind,
    pub target: NodeId,
    /// Set for keyboard events only
    pub key: Option<Key>,
}

impl Event {
    pub fn new(kind: EventKind, target: NodeId) -> Self {
        Self { kind, target, key: None }
    }

    pub fn click(target: NodeId) -> Self {
        Self::new(EventKind::Click, target)
    }

    pub fn double_click(target: NodeId) -> Self {
        Self::new(EventKind::DoubleClick, target)
    }

    pub fn focus(target: NodeId) -> Self {
        Self::new(EventKind::Focus, target)
    }

    pub fn blur(target: NodeId) -> Self {
        Self::new(EventKind::Blur, target)
    }

    pub fn key_press(target: NodeId, key: Key) -> Self {
        Self { kind: EventKind::KeyPress, target, key: Some(key) }
    }

    pub fn key_down(target: NodeId, key: Key) -> Self {
        Self { kind: EventKind::KeyDown, target, key: Some(key) }
    }

    pub fn key_up(target: NodeId, key: Key) -> Self {
        Self { kind: EventKind::KeyUp, target, key: Some(key) }
    }
}

/// Logical keyboard keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    // Special keys
    Escape, Tab, Shift, Control, Alt, Meta,
    Space, Enter, Backspace, Delete,

    // Navigation
    Up, Down, Left, Right,
    Home, End,

    /// A printable character
    Char(char),

    Unknown,
}

impl Key {
    /// Map a legacy `keyCode` to a key.
    pub fn from_code(code: u32) -> Self {
        match code {
            8 => Key::Backspace,
            9 => Key::Tab,
            13 => Key::Enter,
            16 => Key::Shift,
            17 => Key::Control,
            18 => Key::Alt,
            27 => Key::Escape,
            32 => Key::Space,
            35 => Key::End,
            36 => Key::Home,
            37 => Key::Left,
            38 => Key::Up,
            39 => Key::Right,
            40 => Key::Down,
            46 => Key::Delete,
            91 => Key::Meta,
            48..=57 | 65..=90 => char::from_u32(code)
                .map(|c| Key::Char(c.to_ascii_lowercase()))
                .unwrap_or(Key::Unknown),
            _ => Key::Unknown,
        }
    }

    /// The legacy `keyCode` for this key, if it has one.
    pub fn code(&self) -> Option<u32> {
        let code = match self {
            Key::Backspace => 8,
            Key::Tab => 9,
            Key::Enter => 13,
            Key::Shift => 16,
            Key::Control => 17,
            Key::Alt => 18,
            Key::Escape => 27,
            Key::Space => 32,
            Key::End => 35,
            Key::Home => 36,
            Key::Left => 37,
            Key::Up => 38,
            Key::Right => 39,
            Key::Down => 40,
            Key::Delete => 46,
            Key::Meta => 91,
            Key::Char(c) if c.is_ascii_alphanumeric() => c.to_ascii_uppercase() as u32,
            Key::Char(_) | Key::Unknown => return None,
        };
        Some(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_codes() {
        assert_eq!(Key::from_code(13), Key::Enter);
        assert_eq!(Key::from_code(27), Key::Escape);
        assert_eq!(Key::from_code(65), Key::Char('a'));
        assert_eq!(Key::from_code(500), Key::Unknown);
        assert_eq!(Key::Enter.code(), Some(13));
        assert_eq!(Key::Char('x').code(), Some(88));
        assert_eq!(Key::Char('!').code(), None);
    }

    #[test]
    fn test_event_kind_names() {
        assert_eq!(EventKind::DoubleClick.to_string(), "dblclick");
        assert!(EventKind::KeyDown.is_keyboard());
        assert!(!EventKind::Blur.is_keyboard());
    }
}
