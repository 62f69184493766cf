//! Smart indentation and delimiter auto-pairing
//!
//! The `IndentEngine` gets first refusal on Tab, Enter, Backspace and
//! printable keys. When it recognizes the context it edits the document
//! itself and reports `Consumed`; otherwise the host performs its default
//! handling. Every multi-step mutation runs inside one edit group so it
//! undoes as a single step.

mod pairs;

pub use pairs::{closing_for, is_closing, is_symmetric};

use tracing::trace;

use crate::document::{Position, TextDocument};
use crate::language::LanguageMode;
use crate::line::{indent_width, is_whitespace_prefix, leading_indent, INDENT_UNIT, INDENT_WIDTH};

/// The key classes the engine inspects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    Tab,
    Enter,
    Backspace,
    Char(char),
}

/// Whether the engine handled a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The engine edited the document; suppress default handling
    Consumed,
    /// Not recognized; the host handles the key
    Ignored,
}

impl KeyOutcome {
    pub fn is_consumed(&self) -> bool {
        matches!(self, KeyOutcome::Consumed)
    }
}

/// Key interception for indentation and pairing
///
/// Holds no per-document state; the language mode is passed on every call
/// so the engine always agrees with the highlighter.
#[derive(Debug, Clone)]
pub struct IndentEngine {
    enabled: bool,
}

impl IndentEngine {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Offer a key to the engine
    pub fn handle_key<D: TextDocument + ?Sized>(
        &self,
        mode: LanguageMode,
        doc: &mut D,
        key: EditKey,
    ) -> KeyOutcome {
        if !self.enabled {
            return KeyOutcome::Ignored;
        }
        let outcome = match key {
            EditKey::Tab => self.tab(doc),
            EditKey::Backspace => self.backspace(doc),
            EditKey::Enter if mode.is_code() => self.enter(mode, doc),
            EditKey::Char(c) if mode.is_code() => self.typed_char(mode, doc, c),
            _ => KeyOutcome::Ignored,
        };
        trace!(?key, %mode, ?outcome, "indent engine");
        outcome
    }

    /// Insert one unit, or indent every selected line by one unit
    fn tab<D: TextDocument + ?Sized>(&self, doc: &mut D) -> KeyOutcome {
        match doc.selection() {
            None => doc.insert_text(INDENT_UNIT),
            Some(selection) => {
                doc.begin_edit_group();
                for line in selection.start().line..=selection.end().line {
                    doc.insert_at(Position::new(line, 0), INDENT_UNIT);
                }
                doc.end_edit_group();
            }
        }
        KeyOutcome::Consumed
    }

    /// Delete back to the previous indentation stop inside leading whitespace
    fn backspace<D: TextDocument + ?Sized>(&self, doc: &mut D) -> KeyOutcome {
        let cursor = doc.cursor();
        if doc.has_selection() || cursor.col == 0 {
            return KeyOutcome::Ignored;
        }
        let line = doc.current_line();
        if !is_whitespace_prefix(line, cursor.col) {
            return KeyOutcome::Ignored;
        }

        let prefix = &line[..cursor.col];
        let mut width = indent_width(prefix);
        let target = (width - 1) / INDENT_WIDTH * INDENT_WIDTH;
        let mut start = cursor.col;
        for c in prefix.chars().rev() {
            if width <= target {
                break;
            }
            width -= if c == '\t' { INDENT_WIDTH } else { 1 };
            start -= c.len_utf8();
        }

        let start = Position::new(cursor.line, start);
        doc.begin_edit_group();
        doc.delete_range(start, cursor);
        doc.set_cursor(start);
        doc.end_edit_group();
        KeyOutcome::Consumed
    }

    /// New line carrying the current indentation, one unit deeper after a
    /// block opener, or a full block between adjacent braces
    fn enter<D: TextDocument + ?Sized>(&self, mode: LanguageMode, doc: &mut D) -> KeyOutcome {
        doc.begin_edit_group();
        doc.remove_selected_text();

        let cursor = doc.cursor();
        let line = doc.current_line();
        let indent = leading_indent(line).to_string();
        let (before, after) = line.split_at(cursor.col);

        if mode == LanguageMode::CLike && before.ends_with('{') && after.starts_with('}') {
            self.expand_block(doc, "", &indent);
        } else {
            let mut text = format!("\n{indent}");
            if mode.opens_block(line.trim()) {
                text.push_str(INDENT_UNIT);
            }
            doc.insert_text(&text);
        }

        doc.end_edit_group();
        KeyOutcome::Consumed
    }

    /// Auto-pair, wrap, skip-over and `{` block expansion
    fn typed_char<D: TextDocument + ?Sized>(&self, mode: LanguageMode, doc: &mut D, c: char) -> KeyOutcome {
        if let Some(close) = closing_for(c) {
            if let Some(selected) = doc.selected_text() {
                doc.insert_text(&format!("{c}{selected}{close}"));
                return KeyOutcome::Consumed;
            }
            if is_symmetric(c) && doc.char_after_cursor() == Some(c) {
                doc.move_cursor_right();
                return KeyOutcome::Consumed;
            }
            if c == '{' && mode == LanguageMode::CLike {
                let indent = leading_indent(doc.current_line()).to_string();
                doc.begin_edit_group();
                self.expand_block(doc, "{", &indent);
                doc.end_edit_group();
                return KeyOutcome::Consumed;
            }

            doc.begin_edit_group();
            doc.insert_text(&format!("{c}{close}"));
            let end = doc.cursor();
            doc.set_cursor(Position::new(end.line, end.col - close.len_utf8()));
            doc.end_edit_group();
            return KeyOutcome::Consumed;
        }

        if is_closing(c) && !doc.has_selection() && doc.char_after_cursor() == Some(c) {
            doc.move_cursor_right();
            return KeyOutcome::Consumed;
        }
        KeyOutcome::Ignored
    }

    /// Insert `lead`, then an indented empty line and a line closing the
    /// block; the cursor lands on the empty line
    fn expand_block<D: TextDocument + ?Sized>(&self, doc: &mut D, lead: &str, indent: &str) {
        let close = if lead.is_empty() { "" } else { "}" };
        let line = doc.cursor().line;
        doc.insert_text(&format!("{lead}\n{indent}{INDENT_UNIT}\n{indent}{close}"));
        doc.set_cursor(Position::new(line + 1, indent.len() + INDENT_UNIT.len()));
    }
}

impl Default for IndentEngine {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Buffer;

    const C: LanguageMode = LanguageMode::CLike;
    const PY: LanguageMode = LanguageMode::PythonLike;

    fn buffer_at(text: &str, line: usize, col: usize) -> Buffer {
        let mut buffer = Buffer::from_text("t", text);
        buffer.set_cursor(Position::new(line, col));
        buffer
    }

    /// One key press as the editor issues it, wrapped in an outer group
    fn press(buffer: &mut Buffer, mode: LanguageMode, key: EditKey) -> KeyOutcome {
        let engine = IndentEngine::default();
        buffer.begin_edit_group();
        let outcome = engine.handle_key(mode, buffer, key);
        buffer.end_edit_group();
        outcome
    }

    #[test]
    fn test_paren_pair_then_skip_over() {
        let mut buffer = buffer_at("f", 0, 1);
        assert_eq!(press(&mut buffer, C, EditKey::Char('(')), KeyOutcome::Consumed);
        assert_eq!(buffer.text(), "f()");
        assert_eq!(buffer.cursor(), Position::new(0, 2));

        assert_eq!(press(&mut buffer, C, EditKey::Char(')')), KeyOutcome::Consumed);
        assert_eq!(buffer.text(), "f()");
        assert_eq!(buffer.cursor(), Position::new(0, 3));
    }

    #[test]
    fn test_quote_skips_existing_quote() {
        let mut buffer = buffer_at(r#"s = "abc""#, 0, 8);
        assert!(press(&mut buffer, PY, EditKey::Char('"')).is_consumed());
        assert_eq!(buffer.text(), r#"s = "abc""#);
        assert_eq!(buffer.cursor(), Position::new(0, 9));
    }

    #[test]
    fn test_quote_inserts_pair() {
        let mut buffer = buffer_at("x = ", 0, 4);
        press(&mut buffer, PY, EditKey::Char('\''));
        assert_eq!(buffer.text(), "x = ''");
        assert_eq!(buffer.cursor(), Position::new(0, 5));
    }

    #[test]
    fn test_unmatched_closer_falls_through() {
        let mut buffer = buffer_at("a)", 0, 1);
        assert_eq!(press(&mut buffer, C, EditKey::Char(']')), KeyOutcome::Ignored);
        assert_eq!(press(&mut buffer, C, EditKey::Char('x')), KeyOutcome::Ignored);
        assert_eq!(buffer.text(), "a)");
    }

    #[test]
    fn test_wrap_selection() {
        let mut buffer = Buffer::from_text("t", "call value now");
        buffer.set_selection(Position::new(0, 5), Position::new(0, 10));
        assert!(press(&mut buffer, C, EditKey::Char('[')).is_consumed());
        assert_eq!(buffer.text(), "call [value] now");
        assert_eq!(buffer.cursor(), Position::new(0, 12));
        assert!(!buffer.has_selection());
    }

    #[test]
    fn test_python_block_opener_indents() {
        let mut buffer = buffer_at("    if x:", 0, 9);
        assert!(press(&mut buffer, PY, EditKey::Enter).is_consumed());
        assert_eq!(buffer.line(1), "        ");
        assert_eq!(buffer.cursor(), Position::new(1, 8));
    }

    #[test]
    fn test_python_enter_keeps_indent() {
        let mut buffer = buffer_at("  iffy:", 0, 7);
        press(&mut buffer, PY, EditKey::Enter);
        assert_eq!(buffer.line(1), "  ");

        let mut buffer = buffer_at("\telse:", 0, 6);
        press(&mut buffer, PY, EditKey::Enter);
        assert_eq!(buffer.line(1), "\t    ");
    }

    #[test]
    fn test_enter_between_braces_expands_block() {
        let mut buffer = buffer_at("  {}", 0, 3);
        let engine = IndentEngine::default();
        assert!(engine.handle_key(C, &mut buffer, EditKey::Enter).is_consumed());
        assert_eq!(buffer.text(), "  {\n      \n  }");
        assert_eq!(buffer.cursor(), Position::new(1, 6));

        assert!(buffer.undo());
        assert_eq!(buffer.text(), "  {}");
        assert_eq!(buffer.cursor(), Position::new(0, 3));
        assert!(!buffer.undo());
    }

    #[test]
    fn test_enter_after_open_brace() {
        let mut buffer = buffer_at("int main() {", 0, 12);
        press(&mut buffer, C, EditKey::Enter);
        assert_eq!(buffer.text(), "int main() {\n    ");
    }

    #[test]
    fn test_enter_replaces_selection() {
        let mut buffer = Buffer::from_text("t", "    a = bc;");
        buffer.set_selection(Position::new(0, 8), Position::new(0, 10));
        press(&mut buffer, C, EditKey::Enter);
        assert_eq!(buffer.text(), "    a = \n    ;");
    }

    #[test]
    fn test_typed_brace_expands_in_c_like() {
        let mut buffer = buffer_at("  if (x) ", 0, 9);
        let engine = IndentEngine::default();
        assert!(engine.handle_key(C, &mut buffer, EditKey::Char('{')).is_consumed());
        assert_eq!(buffer.text(), "  if (x) {\n      \n  }");
        assert_eq!(buffer.cursor(), Position::new(1, 6));

        assert!(buffer.undo());
        assert_eq!(buffer.text(), "  if (x) ");
        assert!(!buffer.undo());
    }

    #[test]
    fn test_typed_brace_pairs_in_python() {
        let mut buffer = buffer_at("d = ", 0, 4);
        press(&mut buffer, PY, EditKey::Char('{'));
        assert_eq!(buffer.text(), "d = {}");
        assert_eq!(buffer.cursor(), Position::new(0, 5));
    }

    #[test]
    fn test_backspace_removes_to_previous_stop() {
        let mut buffer = buffer_at("    x", 0, 4);
        assert!(press(&mut buffer, C, EditKey::Backspace).is_consumed());
        assert_eq!(buffer.text(), "x");
        assert_eq!(buffer.cursor(), Position::new(0, 0));

        let mut buffer = buffer_at("      x", 0, 6);
        press(&mut buffer, C, EditKey::Backspace);
        assert_eq!(buffer.text(), "    x");

        let mut buffer = buffer_at("\t  x", 0, 3);
        press(&mut buffer, LanguageMode::None, EditKey::Backspace);
        assert_eq!(buffer.text(), "\tx");
    }

    #[test]
    fn test_backspace_falls_through() {
        let mut buffer = buffer_at("  x = 1", 0, 4);
        assert_eq!(press(&mut buffer, C, EditKey::Backspace), KeyOutcome::Ignored);

        let mut buffer = buffer_at("    ", 0, 0);
        assert_eq!(press(&mut buffer, C, EditKey::Backspace), KeyOutcome::Ignored);

        let mut buffer = Buffer::from_text("t", "        ");
        buffer.set_selection(Position::new(0, 2), Position::new(0, 8));
        assert_eq!(press(&mut buffer, C, EditKey::Backspace), KeyOutcome::Ignored);
    }

    #[test]
    fn test_tab_inserts_unit() {
        let mut buffer = buffer_at("ab", 0, 1);
        assert!(press(&mut buffer, LanguageMode::None, EditKey::Tab).is_consumed());
        assert_eq!(buffer.text(), "a    b");
        assert_eq!(buffer.cursor(), Position::new(0, 5));
    }

    #[test]
    fn test_tab_indents_selected_lines_as_one_step() {
        let mut buffer = Buffer::from_text("t", "a\nb\nc\nd");
        buffer.set_selection(Position::new(0, 0), Position::new(2, 1));
        let engine = IndentEngine::default();
        assert!(engine.handle_key(PY, &mut buffer, EditKey::Tab).is_consumed());
        assert_eq!(buffer.text(), "    a\n    b\n    c\nd");
        // The selection keeps covering the new indentation of its first line
        assert_eq!(buffer.selected_text().as_deref(), Some("    a\n    b\n    c"));

        assert!(buffer.undo());
        assert_eq!(buffer.text(), "a\nb\nc\nd");
        assert!(!buffer.undo());
    }

    #[test]
    fn test_backspace_and_pair_undo_in_one_step() {
        let engine = IndentEngine::default();
        let mut buffer = buffer_at("      x", 0, 6);
        engine.handle_key(C, &mut buffer, EditKey::Backspace);
        assert!(buffer.undo());
        assert_eq!(buffer.text(), "      x");
        assert_eq!(buffer.cursor(), Position::new(0, 6));

        let mut buffer = buffer_at("f", 0, 1);
        engine.handle_key(C, &mut buffer, EditKey::Char('('));
        assert!(buffer.undo());
        assert_eq!(buffer.text(), "f");
        assert!(!buffer.undo());
    }

    #[test]
    fn test_plain_text_mode_passes_through() {
        let mut buffer = buffer_at("if x:", 0, 5);
        assert_eq!(press(&mut buffer, LanguageMode::None, EditKey::Enter), KeyOutcome::Ignored);
        assert_eq!(press(&mut buffer, LanguageMode::None, EditKey::Char('(')), KeyOutcome::Ignored);
        assert_eq!(buffer.text(), "if x:");
    }

    #[test]
    fn test_disabled_engine_ignores_everything() {
        let mut buffer = buffer_at("", 0, 0);
        let engine = IndentEngine::new(false);
        assert_eq!(engine.handle_key(C, &mut buffer, EditKey::Tab), KeyOutcome::Ignored);
        assert_eq!(buffer.text(), "");
    }
}
