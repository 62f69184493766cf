//! Buffer representation - a collection of lines with associated metadata
//!
//! The buffer is the editor's `TextDocument`: it owns the text, the cursor
//! and selection, the undo history, and a queue of structural edits that
//! the highlighter drains after every command.

use std::mem;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::document::{LineEdit, Position, Selection, TextDocument};
use crate::error::{EditorError, Result};
use crate::history::{Change, History};
use crate::line::Line;

/// A buffer containing text and metadata
#[derive(Debug)]
pub struct Buffer {
    /// Lines of text; never empty
    lines: Vec<Line>,
    /// Buffer name (file name, or "*scratch*")
    name: String,
    /// Associated file path (None for unnamed buffers)
    filename: Option<PathBuf>,
    /// Whether buffer has unsaved changes
    modified: bool,
    cursor: Position,
    /// Selection anchor; the selection runs from here to the cursor
    anchor: Option<Position>,
    history: History,
    group_depth: usize,
    /// Structural edits not yet seen by the highlighter
    pending_edits: Vec<LineEdit>,
}

impl Buffer {
    /// Create a new empty buffer with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            lines: vec![Line::new()],
            name: name.into(),
            filename: None,
            modified: false,
            cursor: Position::default(),
            anchor: None,
            history: History::default(),
            group_depth: 0,
            pending_edits: Vec::new(),
        }
    }

    /// Create a buffer holding `text`, cursor at the start
    pub fn from_text(name: impl Into<String>, text: &str) -> Self {
        let mut buffer = Self::new(name);
        buffer.lines = text.split('\n').map(Line::from).collect();
        buffer
    }

    /// Create a buffer from file contents
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(EditorError::FileNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unnamed".to_string());

        let mut buffer = Self::from_text(name, &content);
        buffer.filename = Some(path.to_path_buf());
        debug!(path = %path.display(), lines = buffer.lines.len(), "loaded buffer");
        Ok(buffer)
    }

    /// Get buffer name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get filename if set
    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    /// Set the filename (and the buffer name with it)
    pub fn set_filename(&mut self, path: PathBuf) {
        if let Some(name) = path.file_name() {
            self.name = name.to_string_lossy().into_owned();
        }
        self.filename = Some(path);
    }

    /// Check if buffer is modified
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Mark buffer as modified
    pub fn set_modified(&mut self, modified: bool) {
        self.modified = modified;
    }

    /// Get a line by index
    pub fn line_ref(&self, idx: usize) -> Option<&Line> {
        self.lines.get(idx)
    }

    /// Whole text, lines joined with `\n`
    pub fn text(&self) -> String {
        self.lines.iter().map(Line::text).collect::<Vec<_>>().join("\n")
    }

    /// Structural edits since the last call
    pub fn take_edits(&mut self) -> Vec<LineEdit> {
        mem::take(&mut self.pending_edits)
    }

    /// Extend (or start) a selection from the current cursor to `head`
    pub fn extend_selection(&mut self, head: Position) {
        let anchor = self.anchor.unwrap_or(self.cursor);
        self.set_selection(anchor, head);
    }

    /// Select the whole buffer
    pub fn select_all(&mut self) {
        let last = self.lines.len() - 1;
        let end = Position::new(last, self.lines[last].len());
        self.set_selection(Position::default(), end);
    }

    /// Delete the character before the cursor, joining lines at column 0
    pub fn delete_backward(&mut self) -> bool {
        if self.remove_selected_text() {
            return true;
        }
        let cursor = self.cursor;
        let start = if let Some(col) = self.lines[cursor.line].prev_boundary(cursor.col) {
            Position::new(cursor.line, col)
        } else if cursor.line > 0 {
            Position::new(cursor.line - 1, self.lines[cursor.line - 1].len())
        } else {
            return false;
        };
        self.delete_range(start, cursor);
        true
    }

    /// Delete the character after the cursor, joining lines at end of line
    pub fn delete_forward(&mut self) -> bool {
        if self.remove_selected_text() {
            return true;
        }
        let cursor = self.cursor;
        let end = if let Some(col) = self.lines[cursor.line].next_boundary(cursor.col) {
            Position::new(cursor.line, col)
        } else if cursor.line + 1 < self.lines.len() {
            Position::new(cursor.line + 1, 0)
        } else {
            return false;
        };
        self.delete_range(cursor, end);
        true
    }

    /// Revert the last edit group. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(entry) = self.history.undo().cloned() else {
            return false;
        };
        for change in entry.changes.iter().rev() {
            match change {
                Change::Insert { at, text } => {
                    let end = end_of_text(*at, text);
                    self.raw_delete(*at, end);
                }
                Change::Delete { at, text } => {
                    self.raw_insert(*at, text);
                }
            }
        }
        self.set_cursor(entry.cursor_before);
        true
    }

    /// Reapply the last undone edit group
    pub fn redo(&mut self) -> bool {
        let Some(entry) = self.history.redo().cloned() else {
            return false;
        };
        for change in &entry.changes {
            match change {
                Change::Insert { at, text } => {
                    self.raw_insert(*at, text);
                }
                Change::Delete { at, text } => {
                    let end = end_of_text(*at, text);
                    self.raw_delete(*at, end);
                }
            }
        }
        self.set_cursor(entry.cursor_after);
        true
    }

    /// Write buffer to its file
    pub fn save(&mut self) -> Result<()> {
        let path = self.filename.clone().ok_or(EditorError::NoFileName)?;
        self.write_to(&path)?;
        self.modified = false;
        Ok(())
    }

    /// Write buffer to specific path
    pub fn write_to(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.text())?;
        Ok(())
    }

    fn clamp(&self, pos: Position) -> Position {
        let line = pos.line.min(self.lines.len() - 1);
        Position::new(line, self.lines[line].clamp_col(pos.col))
    }

    /// Insert without recording history
    fn raw_insert(&mut self, at: Position, text: &str) -> Position {
        let at = self.clamp(at);
        let mut pieces = text.split('\n');
        let first = pieces.next().unwrap_or_default();
        let rest: Vec<&str> = pieces.collect();

        let end = match rest.split_last() {
            None => {
                self.lines[at.line].insert_str(at.col, first);
                Position::new(at.line, at.col + first.len())
            }
            Some((last, middle)) => {
                let tail = self.lines[at.line].split_off(at.col);
                self.lines[at.line].append_str(first);
                let mut last_line = Line::from(*last);
                let end = Position::new(at.line + rest.len(), last_line.len());
                last_line.append_str(tail.text());
                let new_lines = middle
                    .iter()
                    .map(|s| Line::from(*s))
                    .chain(std::iter::once(last_line));
                self.lines.splice(at.line + 1..at.line + 1, new_lines);
                end
            }
        };

        self.pending_edits.push(LineEdit {
            first_line: at.line,
            removed: 0,
            added: rest.len(),
        });
        self.modified = true;
        match self.anchor {
            // The leading edge of a selection stays in front of text
            // inserted exactly there, so the selection grows to cover it
            Some(anchor) if anchor < self.cursor => {
                self.anchor = Some(shift_for_insert_after(anchor, at, end));
                self.cursor = shift_for_insert(self.cursor, at, end);
            }
            Some(anchor) => {
                self.cursor = shift_for_insert_after(self.cursor, at, end);
                self.anchor = Some(shift_for_insert(anchor, at, end));
            }
            None => self.cursor = shift_for_insert(self.cursor, at, end),
        }
        end
    }

    /// Delete without recording history
    fn raw_delete(&mut self, start: Position, end: Position) -> String {
        let (start, end) = (self.clamp(start), self.clamp(end));
        if end <= start {
            return String::new();
        }

        let deleted = if start.line == end.line {
            self.lines[start.line].delete_range(start.col, end.col)
        } else {
            let first_len = self.lines[start.line].len();
            let mut deleted = self.lines[start.line].delete_range(start.col, first_len);
            for line in &self.lines[start.line + 1..end.line] {
                deleted.push('\n');
                deleted.push_str(line.text());
            }
            let tail = self.lines[end.line].split_off(end.col);
            deleted.push('\n');
            deleted.push_str(self.lines[end.line].text());
            self.lines[start.line].append_str(tail.text());
            self.lines.drain(start.line + 1..=end.line);
            deleted
        };

        self.pending_edits.push(LineEdit {
            first_line: start.line,
            removed: end.line - start.line,
            added: 0,
        });
        self.modified = true;
        self.cursor = shift_for_delete(self.cursor, start, end);
        self.anchor = self.anchor.map(|a| shift_for_delete(a, start, end));
        deleted
    }

    /// Run a mutation inside an edit group of its own unless one is open
    fn recorded<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.begin_edit_group();
        let result = f(self);
        self.end_edit_group();
        result
    }
}

impl TextDocument for Buffer {
    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line(&self, idx: usize) -> &str {
        self.lines.get(idx).map(Line::text).unwrap_or_default()
    }

    fn cursor(&self) -> Position {
        self.cursor
    }

    fn selection(&self) -> Option<Selection> {
        self.anchor
            .filter(|anchor| *anchor != self.cursor)
            .map(|anchor| Selection::new(anchor, self.cursor))
    }

    fn set_cursor(&mut self, pos: Position) {
        self.cursor = self.clamp(pos);
        self.anchor = None;
    }

    fn set_selection(&mut self, anchor: Position, head: Position) {
        let anchor = self.clamp(anchor);
        self.cursor = self.clamp(head);
        self.anchor = (anchor != self.cursor).then_some(anchor);
    }

    fn insert_at(&mut self, pos: Position, text: &str) -> Position {
        if text.is_empty() {
            return self.clamp(pos);
        }
        self.recorded(|buffer| {
            let at = buffer.clamp(pos);
            let end = buffer.raw_insert(at, text);
            buffer.history.push(Change::Insert {
                at,
                text: text.to_string(),
            });
            end
        })
    }

    fn delete_range(&mut self, start: Position, end: Position) -> String {
        self.recorded(|buffer| {
            let start = buffer.clamp(start);
            let deleted = buffer.raw_delete(start, end);
            if !deleted.is_empty() {
                buffer.history.push(Change::Delete {
                    at: start,
                    text: deleted.clone(),
                });
            }
            deleted
        })
    }

    fn begin_edit_group(&mut self) {
        if self.group_depth == 0 {
            self.history.start_new_change(self.cursor);
        }
        self.group_depth += 1;
    }

    fn end_edit_group(&mut self) {
        self.group_depth = self.group_depth.saturating_sub(1);
        if self.group_depth == 0 {
            self.history.end_new_change(self.cursor);
        }
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new("*scratch*")
    }
}

/// Position just past `text` inserted at `at`
fn end_of_text(at: Position, text: &str) -> Position {
    match text.rfind('\n') {
        Some(idx) => Position::new(at.line + text.matches('\n').count(), text.len() - idx - 1),
        None => Position::new(at.line, at.col + text.len()),
    }
}

/// Where `p` ends up after text from `at` to `end` is inserted
fn shift_for_insert(p: Position, at: Position, end: Position) -> Position {
    if p < at {
        p
    } else if p.line == at.line {
        Position::new(end.line, end.col + (p.col - at.col))
    } else {
        Position::new(p.line + (end.line - at.line), p.col)
    }
}

/// Like `shift_for_insert`, but a point exactly at `at` stays put
fn shift_for_insert_after(p: Position, at: Position, end: Position) -> Position {
    if p == at {
        p
    } else {
        shift_for_insert(p, at, end)
    }
}

/// Where `p` ends up after the text from `start` to `end` is deleted
fn shift_for_delete(p: Position, start: Position, end: Position) -> Position {
    if p <= start {
        p
    } else if p <= end {
        start
    } else if p.line == end.line {
        Position::new(start.line, start.col + (p.col - end.col))
    } else {
        Position::new(p.line - (end.line - start.line), p.col)
    }
}
