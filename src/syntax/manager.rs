//! Syntax highlighting manager
//!
//! This module provides the SyntaxManager that owns the active rule table
//! and the per-line cache of spans and end states, and keeps that cache in
//! step with document edits.

use tracing::{debug, info, trace, warn};

use crate::document::{LineEdit, TextDocument};
use crate::language::LanguageMode;

use super::builtin;
use super::language::{resolve_spans, LanguageDefinition};
use super::rules::LineState;
use super::style::{Span, Theme};

/// Per-document highlighting cache
///
/// Both vectors always have one entry per document line once the manager
/// has seen the document.
#[derive(Debug, Default)]
pub struct HighlightCache {
    /// State at the end of each line
    pub line_states: Vec<LineState>,
    /// Cached spans per line (None = needs recomputation)
    pub line_spans: Vec<Option<Vec<Span>>>,
}

impl HighlightCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lines the cache describes
    pub fn len(&self) -> usize {
        self.line_states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.line_states.is_empty()
    }

    /// Invalidate entire cache
    pub fn invalidate_all(&mut self) {
        self.line_states.clear();
        self.line_spans.clear();
    }

    /// Replace the entries of the edited lines with dirty ones
    ///
    /// The last replacement line keeps the old end state of the last
    /// replaced line, so the recompute pass can tell whether the state
    /// leaving the edited range changed. Returns false when the edit does
    /// not fit the cache.
    fn splice(&mut self, edit: LineEdit) -> bool {
        let last_old = edit.first_line + edit.removed;
        if last_old >= self.line_states.len() {
            return false;
        }
        let tail_state = self.line_states[last_old];

        let mut states = vec![LineState::default(); edit.added + 1];
        states[edit.added] = tail_state;
        self.line_states.splice(edit.first_line..=last_old, states);
        self.line_spans
            .splice(edit.first_line..=last_old, std::iter::repeat_with(|| None).take(edit.added + 1));
        true
    }

    fn first_dirty(&self, from: usize) -> Option<usize> {
        (from..self.line_spans.len()).find(|&idx| self.line_spans[idx].is_none())
    }
}

/// Main syntax highlighting manager
pub struct SyntaxManager {
    mode: LanguageMode,
    theme: Theme,
    /// Rule table for the current mode (None in plain text mode)
    definition: Option<LanguageDefinition>,
    cache: HighlightCache,
}

impl SyntaxManager {
    /// Create a manager in plain text mode
    pub fn new(theme: Theme) -> Self {
        Self {
            mode: LanguageMode::None,
            theme,
            definition: None,
            cache: HighlightCache::new(),
        }
    }

    pub fn mode(&self) -> LanguageMode {
        self.mode
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Switch rule tables and re-highlight the whole document
    pub fn set_language<D: TextDocument + ?Sized>(&mut self, mode: LanguageMode, doc: &D) {
        info!(from = %self.mode, to = %mode, "language mode changed");
        self.mode = mode;
        self.definition = builtin::definition_for(mode);
        self.rehighlight(doc);
    }

    /// Swap the palette and re-highlight; patterns are unchanged
    pub fn update_theme<D: TextDocument + ?Sized>(&mut self, theme: Theme, doc: &D) {
        info!(theme = theme.name(), "theme changed");
        self.theme = theme;
        self.rehighlight(doc);
    }

    /// Recompute every line from the top; returns the number of lines scanned
    pub fn rehighlight<D: TextDocument + ?Sized>(&mut self, doc: &D) -> usize {
        self.cache.invalidate_all();
        let count = doc.line_count();
        self.cache.line_states = vec![LineState::default(); count];
        self.cache.line_spans = vec![None; count];
        self.recompute(doc, 0)
    }

    /// Bring the cache up to date after one edit
    pub fn apply_edit<D: TextDocument + ?Sized>(&mut self, doc: &D, edit: LineEdit) -> usize {
        self.apply_edits(doc, &[edit])
    }

    /// Bring the cache up to date after a sequence of edits
    ///
    /// Each edit is expressed against the document as it stood after the
    /// previous one; `doc` is the final state. Returns the number of lines
    /// whose highlighting was recomputed.
    pub fn apply_edits<D: TextDocument + ?Sized>(&mut self, doc: &D, edits: &[LineEdit]) -> usize {
        if edits.is_empty() {
            return 0;
        }
        let mut first = usize::MAX;
        for edit in edits {
            if !self.cache.splice(*edit) {
                warn!(?edit, cached = self.cache.len(), "edit outside highlight cache, rebuilding");
                return self.rehighlight(doc);
            }
            first = first.min(edit.first_line);
        }
        if self.cache.len() != doc.line_count() {
            warn!(
                cached = self.cache.len(),
                lines = doc.line_count(),
                "highlight cache out of step with document, rebuilding"
            );
            return self.rehighlight(doc);
        }
        let scanned = self.recompute(doc, first);
        trace!(first, scanned, "incremental re-highlight");
        scanned
    }

    /// Raw spans for a line, in application order
    pub fn line_spans(&self, idx: usize) -> &[Span] {
        self.cache
            .line_spans
            .get(idx)
            .and_then(|spans| spans.as_deref())
            .unwrap_or_default()
    }

    /// Non-overlapping styled runs for a line, ready to draw
    pub fn line_runs(&self, idx: usize, line_len: usize) -> Vec<Span> {
        resolve_spans(self.line_spans(idx), line_len)
    }

    /// Whether a line ends inside a block comment
    pub fn line_state(&self, idx: usize) -> LineState {
        self.cache.line_states.get(idx).copied().unwrap_or_default()
    }

    /// Walk forward from `from`, recomputing dirty lines and any clean line
    /// whose inherited state changed, until the state stabilizes
    fn recompute<D: TextDocument + ?Sized>(&mut self, doc: &D, from: usize) -> usize {
        let count = self.cache.len();
        let mut scanned = 0;
        let mut line = from;
        let mut carry_changed = false;

        while line < count {
            if !carry_changed && self.cache.line_spans[line].is_some() {
                match self.cache.first_dirty(line + 1) {
                    Some(next) => {
                        line = next;
                        continue;
                    }
                    None => break,
                }
            }

            let prev = if line == 0 {
                LineState::default()
            } else {
                self.cache.line_states[line - 1]
            };
            let (spans, end_state) = match &self.definition {
                Some(definition) => {
                    let result = definition.highlight_line(doc.line(line), prev, self.theme);
                    (result.spans, result.end_state)
                }
                None => (Vec::new(), LineState::default()),
            };

            carry_changed = self.cache.line_states[line] != end_state;
            self.cache.line_states[line] = end_state;
            self.cache.line_spans[line] = Some(spans);
            scanned += 1;
            line += 1;
        }

        debug!(from, scanned, "highlighted lines");
        scanned
    }
}

impl Default for SyntaxManager {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}
