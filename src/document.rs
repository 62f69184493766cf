//! The text document seam
//!
//! The highlighting and indentation engines never own text. They read and
//! mutate it through `TextDocument`: line access, a cursor with an optional
//! selection, positional insert/delete, and edit groups that make several
//! mutations undo as one step. `Buffer` is the in-memory implementation.

/// A position in a document: line index and byte offset within the line
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

/// A selection between an anchor and the cursor (`head`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub anchor: Position,
    pub head: Position,
}

impl Selection {
    pub fn new(anchor: Position, head: Position) -> Self {
        Self { anchor, head }
    }

    /// Earlier endpoint
    pub fn start(&self) -> Position {
        self.anchor.min(self.head)
    }

    /// Later endpoint
    pub fn end(&self) -> Position {
        self.anchor.max(self.head)
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }
}

/// Structural description of one mutation, for incremental re-highlighting
///
/// Old lines `first_line ..= first_line + removed` were replaced by new lines
/// `first_line ..= first_line + added`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineEdit {
    pub first_line: usize,
    pub removed: usize,
    pub added: usize,
}

/// Cursor, selection and line access over a mutable text document
pub trait TextDocument {
    /// Number of lines; never zero
    fn line_count(&self) -> usize;

    /// Text of a line without its newline; empty when out of range
    fn line(&self, idx: usize) -> &str;

    /// Cursor position
    fn cursor(&self) -> Position;

    /// Active non-empty selection, if any
    fn selection(&self) -> Option<Selection>;

    /// Move the cursor, dropping any selection
    fn set_cursor(&mut self, pos: Position);

    /// Select from `anchor` to `head`, leaving the cursor at `head`
    fn set_selection(&mut self, anchor: Position, head: Position);

    /// Insert text (may contain newlines) at a position; returns the end of
    /// the inserted text. Cursor and selection shift with the text.
    fn insert_at(&mut self, pos: Position, text: &str) -> Position;

    /// Delete text between two positions and return it
    fn delete_range(&mut self, start: Position, end: Position) -> String;

    /// Start an edit group; groups nest and only the outermost one commits
    fn begin_edit_group(&mut self);

    /// Finish an edit group
    fn end_edit_group(&mut self);

    /// Text of the cursor's line
    fn current_line(&self) -> &str {
        self.line(self.cursor().line)
    }

    fn has_selection(&self) -> bool {
        self.selection().is_some()
    }

    /// Character right after the cursor on the same line
    fn char_after_cursor(&self) -> Option<char> {
        let cursor = self.cursor();
        self.line(cursor.line).get(cursor.col..)?.chars().next()
    }

    /// Selected text with `\n` between lines
    fn selected_text(&self) -> Option<String> {
        let selection = self.selection()?;
        let (start, end) = (selection.start(), selection.end());
        if start.line == end.line {
            return Some(self.line(start.line)[start.col..end.col].to_string());
        }
        let mut text = self.line(start.line)[start.col..].to_string();
        for idx in start.line + 1..end.line {
            text.push('\n');
            text.push_str(self.line(idx));
        }
        text.push('\n');
        text.push_str(&self.line(end.line)[..end.col]);
        Some(text)
    }

    /// Delete the selection, leaving the cursor at its start
    fn remove_selected_text(&mut self) -> bool {
        match self.selection() {
            Some(selection) => {
                let start = selection.start();
                self.delete_range(start, selection.end());
                self.set_cursor(start);
                true
            }
            None => false,
        }
    }

    /// Replace the selection (if any) with text and leave the cursor after it
    fn insert_text(&mut self, text: &str) {
        self.begin_edit_group();
        self.remove_selected_text();
        let at = self.cursor();
        let end = self.insert_at(at, text);
        self.set_cursor(end);
        self.end_edit_group();
    }

    /// Step the cursor one character right within its line
    fn move_cursor_right(&mut self) {
        let cursor = self.cursor();
        if let Some(c) = self.char_after_cursor() {
            self.set_cursor(Position::new(cursor.line, cursor.col + c.len_utf8()));
        }
    }
}
