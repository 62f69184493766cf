//! Command dispatch system
//!
//! This module provides the key binding table and command implementations.
//! Commands are organized into submodules by category. Tab, Enter,
//! Backspace and printable keys never reach the table: the editor offers
//! them to the indent engine and inserts them itself.

mod navigation;
mod editing;
mod files;
mod misc;

use std::collections::HashMap;

use crate::editor::EditorState;
use crate::error::Result;
use crate::input::{special, Key};

/// Command result status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Success,
    Failure,
    Abort,
}

/// Command function signature
pub type CommandFn = fn(&mut EditorState) -> Result<CommandStatus>;

/// Key binding entry with command function and name
struct BindingEntry {
    function: CommandFn,
    name: &'static str,
}

/// Key binding table
pub struct KeyTable {
    bindings: HashMap<u32, BindingEntry>,
}

impl KeyTable {
    /// Create an empty key table
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Create key table with default bindings
    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        table.setup_defaults();
        table
    }

    /// Add a key binding with command name
    pub fn bind_named(&mut self, key: Key, cmd: CommandFn, name: &'static str) {
        self.bindings.insert(key.code(), BindingEntry { function: cmd, name });
    }

    /// Look up a command for a key
    pub fn lookup(&self, key: Key) -> Option<CommandFn> {
        self.bindings.get(&key.code()).map(|e| e.function)
    }

    /// Look up a command name for a key
    pub fn lookup_name(&self, key: Key) -> Option<&'static str> {
        self.bindings.get(&key.code()).map(|e| e.name)
    }

    /// Set up default key bindings
    fn setup_defaults(&mut self) {
        use navigation::*;
        use editing::*;
        use files::*;
        use misc::*;

        // Cursor movement
        self.bind_named(Key::special(special::RIGHT), forward_char, "forward-char");
        self.bind_named(Key::special(special::LEFT), backward_char, "backward-char");
        self.bind_named(Key::special(special::DOWN), next_line, "next-line");
        self.bind_named(Key::special(special::UP), previous_line, "previous-line");
        self.bind_named(Key::special(special::HOME), beginning_of_line, "beginning-of-line");
        self.bind_named(Key::special(special::END), end_of_line, "end-of-line");
        self.bind_named(Key::special(special::PAGE_DOWN), scroll_down, "scroll-down");
        self.bind_named(Key::special(special::PAGE_UP), scroll_up, "scroll-up");

        // Selection
        self.bind_named(Key::shift_special(special::RIGHT), select_forward_char, "select-forward-char");
        self.bind_named(Key::shift_special(special::LEFT), select_backward_char, "select-backward-char");
        self.bind_named(Key::shift_special(special::DOWN), select_next_line, "select-next-line");
        self.bind_named(Key::shift_special(special::UP), select_previous_line, "select-previous-line");
        self.bind_named(Key::shift_special(special::HOME), select_beginning_of_line, "select-beginning-of-line");
        self.bind_named(Key::shift_special(special::END), select_end_of_line, "select-end-of-line");
        self.bind_named(Key::shift_special(special::PAGE_DOWN), select_scroll_down, "select-scroll-down");
        self.bind_named(Key::shift_special(special::PAGE_UP), select_scroll_up, "select-scroll-up");
        self.bind_named(Key::ctrl('a'), select_all, "select-all");

        // Editing
        self.bind_named(Key::special(special::DELETE), delete_char_forward, "delete-char");
        self.bind_named(Key::ctrl('z'), undo, "undo");
        self.bind_named(Key::ctrl('y'), redo, "redo");

        // Files
        self.bind_named(Key::ctrl('o'), find_file, "find-file");
        self.bind_named(Key::ctrl('s'), save_buffer, "save-buffer");
        self.bind_named(Key::ctrl('w'), write_file, "write-file");

        // Display
        self.bind_named(Key::ctrl('t'), toggle_theme, "toggle-theme");
        self.bind_named(Key::ctrl('l'), toggle_line_numbers, "toggle-line-numbers");

        // Quit / abort
        self.bind_named(Key::ctrl('q'), quit, "quit");
        self.bind_named(Key::ctrl('g'), abort, "keyboard-quit");
        self.bind_named(Key::ctrl('['), abort, "keyboard-quit");
    }
}

impl Default for KeyTable {
    fn default() -> Self {
        Self::with_defaults()
    }
}
