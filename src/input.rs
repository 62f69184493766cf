//! Input handling - key reading and translation

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::indent::EditKey;

/// Key modifier flags
pub mod key_flags {
    pub const CONTROL: u32 = 0x1000_0000;
    pub const SHIFT: u32 = 0x2000_0000;
    pub const SPEC: u32 = 0x8000_0000;
}

/// Codes for special (non-character) keys
pub mod special {
    pub const HOME: u32 = 0x47;
    pub const UP: u32 = 0x48;
    pub const PAGE_UP: u32 = 0x49;
    pub const LEFT: u32 = 0x4b;
    pub const RIGHT: u32 = 0x4d;
    pub const END: u32 = 0x4f;
    pub const DOWN: u32 = 0x50;
    pub const PAGE_DOWN: u32 = 0x51;
    pub const DELETE: u32 = 0x53;
}

const BACKSPACE: u32 = 0x7f;

/// Represents a key input with modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key(pub u32);

impl Key {
    /// Create a key from a character
    pub fn char(ch: char) -> Self {
        Key(ch as u32)
    }

    /// Create a control key (C-x)
    pub fn ctrl(ch: char) -> Self {
        Key(key_flags::CONTROL | ch.to_ascii_lowercase() as u32)
    }

    /// Create a special key (arrows, Home, Delete, ...)
    pub fn special(code: u32) -> Self {
        Key(key_flags::SPEC | code)
    }

    /// Create a shifted special key
    pub fn shift_special(code: u32) -> Self {
        Key(key_flags::SPEC | key_flags::SHIFT | code)
    }

    pub fn tab() -> Self {
        Key::ctrl('i')
    }

    pub fn enter() -> Self {
        Key::ctrl('m')
    }

    pub fn backspace() -> Self {
        Key(BACKSPACE)
    }

    /// Get the raw key code
    pub fn code(&self) -> u32 {
        self.0
    }

    /// Check if this is a control key
    pub fn is_ctrl(&self) -> bool {
        self.0 & key_flags::CONTROL != 0
    }

    pub fn is_shift(&self) -> bool {
        self.0 & key_flags::SHIFT != 0
    }

    /// Check if this is a special key
    pub fn is_special(&self) -> bool {
        self.0 & key_flags::SPEC != 0
    }

    /// Get the base character (without modifiers)
    pub fn base_char(&self) -> Option<char> {
        char::from_u32(self.0 & 0x00FF_FFFF)
    }

    /// Check if this is a printable self-insert character
    pub fn is_self_insert(&self) -> bool {
        if self.0 & 0xF000_0000 != 0 {
            return false;
        }
        char::from_u32(self.0).is_some_and(|ch| ch >= ' ' && self.0 != BACKSPACE)
    }

    /// The editing key this is, if the indent engine should see it
    pub fn edit_key(&self) -> Option<EditKey> {
        if *self == Key::tab() {
            Some(EditKey::Tab)
        } else if *self == Key::enter() {
            Some(EditKey::Enter)
        } else if *self == Key::backspace() {
            Some(EditKey::Backspace)
        } else if self.is_self_insert() {
            self.base_char().map(EditKey::Char)
        } else {
            None
        }
    }

    /// Convert key to a human-readable string (e.g., "C-s", "S-Left")
    pub fn display_name(&self) -> String {
        let mut result = String::new();
        if self.is_ctrl() {
            result.push_str("C-");
        }
        if self.is_shift() {
            result.push_str("S-");
        }

        if self.is_special() {
            let name = match self.0 & 0xFF {
                special::HOME => "Home",
                special::UP => "Up",
                special::PAGE_UP => "PageUp",
                special::LEFT => "Left",
                special::RIGHT => "Right",
                special::END => "End",
                special::DOWN => "Down",
                special::PAGE_DOWN => "PageDown",
                special::DELETE => "Delete",
                code => return format!("{}special-0x{:02x}", result, code),
            };
            result.push_str(name);
            return result;
        }

        let base = self.0 & 0x00FF_FFFF;
        if base == BACKSPACE {
            result.push_str("Backspace");
        } else if base == 0x20 {
            result.push_str("SPC");
        } else if let Some(ch) = char::from_u32(base) {
            result.push(ch);
        } else {
            result.push_str(&format!("0x{:x}", base));
        }
        result
    }
}

/// Translate a crossterm KeyEvent to our Key representation
pub fn translate_key(event: KeyEvent) -> Option<Key> {
    let KeyEvent {
        code, modifiers, kind, ..
    } = event;

    // Only process key press events, ignore release and repeat
    if kind != KeyEventKind::Press {
        return None;
    }

    let ctrl = modifiers.contains(KeyModifiers::CONTROL);
    let shift = modifiers.contains(KeyModifiers::SHIFT);
    let nav = |code: u32| {
        if shift {
            Key::shift_special(code)
        } else {
            Key::special(code)
        }
    };

    match code {
        KeyCode::Char(ch) if ctrl => Some(Key::ctrl(ch)),
        KeyCode::Char(ch) => Some(Key::char(ch)),
        KeyCode::Enter => Some(Key::enter()),
        KeyCode::Tab => Some(Key::tab()),
        KeyCode::Backspace => Some(Key::backspace()),
        KeyCode::Delete => Some(Key::special(special::DELETE)),
        KeyCode::Home => Some(nav(special::HOME)),
        KeyCode::End => Some(nav(special::END)),
        KeyCode::PageUp => Some(nav(special::PAGE_UP)),
        KeyCode::PageDown => Some(nav(special::PAGE_DOWN)),
        KeyCode::Up => Some(nav(special::UP)),
        KeyCode::Down => Some(nav(special::DOWN)),
        KeyCode::Left => Some(nav(special::LEFT)),
        KeyCode::Right => Some(nav(special::RIGHT)),
        KeyCode::Esc => Some(Key::ctrl('[')),
        _ => None,
    }
}
