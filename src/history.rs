//! Undo/redo history
//!
//! Every mutation is recorded as a `Change`. Changes between the start and
//! end of an edit group form one `Entry`, which undoes and redoes atomically.

use std::collections::VecDeque;

use crate::document::Position;

const MAX_ENTRIES: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// `text` was inserted at `at`
    Insert { at: Position, text: String },
    /// `text` was removed starting at `at`
    Delete { at: Position, text: String },
}

/// One undo step
#[derive(Debug, Clone)]
pub struct Entry {
    pub changes: Vec<Change>,
    pub cursor_before: Position,
    pub cursor_after: Position,
}

#[derive(Debug, Default)]
pub struct History {
    index: usize, // Always points *next* to the last entry that is currently applied
    entries: VecDeque<Entry>,
    ongoing: Option<Entry>,
}

impl History {
    pub fn start_new_change(&mut self, cursor: Position) {
        self.ongoing = Some(Entry {
            changes: Vec::new(),
            cursor_before: cursor,
            cursor_after: cursor,
        });
    }

    pub fn end_new_change(&mut self, cursor: Position) {
        debug_assert!(self.entries.len() <= MAX_ENTRIES);
        let Some(mut entry) = self.ongoing.take() else {
            return;
        };
        if entry.changes.is_empty() {
            return;
        }
        entry.cursor_after = cursor;

        // A new change after undo drops the redo tail
        self.entries.truncate(self.index);

        if self.entries.len() == MAX_ENTRIES {
            self.entries.pop_front();
            self.index = self.index.saturating_sub(1);
        }

        self.index += 1;
        self.entries.push_back(entry);
    }

    pub fn push(&mut self, change: Change) {
        if let Some(ongoing) = &mut self.ongoing {
            ongoing.changes.push(change);
        }
    }

    pub fn undo(&mut self) -> Option<&Entry> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(&self.entries[self.index])
    }

    pub fn redo(&mut self) -> Option<&Entry> {
        if self.index == self.entries.len() {
            return None;
        }
        self.index += 1;
        Some(&self.entries[self.index - 1])
    }
}
