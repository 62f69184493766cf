//! Display rendering
//!
//! Draws the visible lines with their highlighted runs, the selection, the
//! optional line-number gutter, the mode line and the minibuffer.

use crate::buffer::Buffer;
use crate::document::{Position, Selection, TextDocument};
use crate::error::Result;
use crate::line::{char_width, str_width};
use crate::syntax::{Span, Style, SyntaxManager, Theme};
use crate::terminal::Terminal;
use crate::window::Window;

/// A minibuffer prompt being edited
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptLine {
    pub label: String,
    pub input: String,
}

/// What to draw in one frame
pub struct Frame<'a> {
    pub buffer: &'a Buffer,
    pub syntax: &'a SyntaxManager,
    pub window: &'a Window,
    pub theme: Theme,
    pub prompt: Option<&'a PromptLine>,
}

/// Display state
pub struct Display {
    /// Message to show in minibuffer (bottom line)
    message: Option<String>,
    /// Whether to show line numbers
    pub show_line_numbers: bool,
}

impl Display {
    pub fn new(show_line_numbers: bool) -> Self {
        Self {
            message: None,
            show_line_numbers,
        }
    }

    /// Toggle line numbers on/off
    pub fn toggle_line_numbers(&mut self) {
        self.show_line_numbers = !self.show_line_numbers;
    }

    /// Set a message to display
    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
    }

    /// Clear the message
    pub fn clear_message(&mut self) {
        self.message = None;
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Render the editor display
    pub fn render(&mut self, terminal: &mut Terminal, frame: &Frame<'_>) -> Result<()> {
        let cols = terminal.cols() as usize;
        let rows = terminal.rows();

        terminal.set_cursor_visible(false)?;
        self.render_window(terminal, frame, cols)?;
        self.render_mode_line(terminal, frame, frame.window.height(), cols)?;
        self.render_minibuffer(terminal, frame.prompt, rows.saturating_sub(1), cols)?;
        self.position_cursor(terminal, frame, cols)?;

        terminal.set_cursor_visible(true)?;
        terminal.flush()?;
        Ok(())
    }

    /// Render the visible text rows
    fn render_window(&self, terminal: &mut Terminal, frame: &Frame<'_>, cols: usize) -> Result<()> {
        let buffer = frame.buffer;
        let theme = frame.theme;
        let lnum_width = line_number_width(self.show_line_numbers, buffer.line_count());
        let text_cols = cols.saturating_sub(lnum_width);
        let selection = buffer.selection();

        for row in 0..frame.window.height() {
            let line_idx = frame.window.top_line() + row as usize;
            terminal.move_cursor(row, 0)?;
            terminal.reset_attributes()?;

            if line_idx >= buffer.line_count() {
                terminal.set_colors(theme.gutter_foreground(), theme.background())?;
                if lnum_width > 0 {
                    terminal.write_str(&" ".repeat(lnum_width))?;
                }
                terminal.write_str("~")?;
                terminal.clear_to_eol()?;
                continue;
            }

            if lnum_width > 0 {
                terminal.set_colors(theme.gutter_foreground(), theme.gutter_background())?;
                terminal.write_str(&format!("{:>width$} ", line_idx + 1, width = lnum_width - 1))?;
            }

            let text = buffer.line(line_idx);
            let runs = frame.syntax.line_runs(line_idx, text.len());
            let selected = selection_on_line(selection, line_idx, text.len());
            let mut used = 0;
            for (start, end, style) in line_segments(text.len(), &runs, selected) {
                terminal.reset_attributes()?;
                terminal.set_colors(theme.foreground(), theme.background())?;
                terminal.apply_style(style, theme.foreground())?;
                let (piece, width) = expand_to_width(&text[start..end], text_cols - used);
                terminal.write_str(&piece)?;
                used += width;
                if used >= text_cols {
                    break;
                }
            }

            terminal.reset_attributes()?;
            terminal.set_colors(theme.foreground(), theme.background())?;
            terminal.clear_to_eol()?;
        }
        Ok(())
    }

    /// Render the mode line below the text rows
    fn render_mode_line(&self, terminal: &mut Terminal, frame: &Frame<'_>, row: u16, cols: usize) -> Result<()> {
        terminal.move_cursor(row, 0)?;
        terminal.reset_attributes()?;
        terminal.set_colors(frame.theme.foreground(), frame.theme.background())?;
        terminal.set_reverse(true)?;

        let text = mode_line_text(frame.buffer, frame.syntax, frame.theme);
        let width = str_width(&text);
        let padded = if width < cols {
            format!("{}{}", text, " ".repeat(cols - width))
        } else {
            truncate_to_width(&text, cols)
        };
        terminal.write_str(&padded)?;
        terminal.set_reverse(false)?;
        Ok(())
    }

    /// Render the minibuffer (message area or active prompt)
    fn render_minibuffer(
        &self,
        terminal: &mut Terminal,
        prompt: Option<&PromptLine>,
        row: u16,
        cols: usize,
    ) -> Result<()> {
        terminal.move_cursor(row, 0)?;
        terminal.reset_attributes()?;

        if let Some(prompt) = prompt {
            let line = format!("{}{}", prompt.label, prompt.input);
            terminal.write_str(&truncate_to_width(&line, cols))?;
        } else if let Some(ref msg) = self.message {
            terminal.write_str(&truncate_to_width(msg, cols))?;
        }

        terminal.clear_to_eol()?;
        Ok(())
    }

    /// Position the hardware cursor at the correct location
    fn position_cursor(&self, terminal: &mut Terminal, frame: &Frame<'_>, cols: usize) -> Result<()> {
        let last_col = cols.saturating_sub(1);
        if let Some(prompt) = frame.prompt {
            let col = str_width(&prompt.label) + str_width(&prompt.input);
            return terminal.move_cursor(terminal.rows().saturating_sub(1), col.min(last_col) as u16);
        }

        let buffer = frame.buffer;
        let cursor = buffer.cursor();
        let display_col = buffer
            .line_ref(cursor.line)
            .map(|line| line.byte_to_col(cursor.col))
            .unwrap_or(0);
        let lnum_width = line_number_width(self.show_line_numbers, buffer.line_count());
        let screen_row = cursor.line.saturating_sub(frame.window.top_line()) as u16;
        let screen_col = (lnum_width + display_col).min(last_col) as u16;
        terminal.move_cursor(screen_row, screen_col)
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Width of the line-number gutter including its separator column
pub fn line_number_width(show: bool, line_count: usize) -> usize {
    if !show {
        return 0;
    }
    let digits = line_count.max(1).to_string().len();
    digits.max(3) + 1
}

/// Byte range of a line covered by the selection
fn selection_on_line(selection: Option<Selection>, line_idx: usize, line_len: usize) -> Option<(usize, usize)> {
    let selection = selection?;
    let (start, end): (Position, Position) = (selection.start(), selection.end());
    if line_idx < start.line || line_idx > end.line {
        return None;
    }
    let from = if line_idx == start.line { start.col } else { 0 };
    let to = if line_idx == end.line { end.col } else { line_len };
    (from < to).then_some((from, to))
}

/// Cut a line into consecutive styled pieces covering every byte
///
/// Unstyled gaps get the default style; the selection is drawn reversed on
/// top of whatever highlighting it covers.
fn line_segments(line_len: usize, runs: &[Span], selected: Option<(usize, usize)>) -> Vec<(usize, usize, Style)> {
    let mut cuts = vec![0, line_len];
    for run in runs {
        cuts.push(run.start.min(line_len));
        cuts.push(run.end.min(line_len));
    }
    if let Some((from, to)) = selected {
        cuts.push(from.min(line_len));
        cuts.push(to.min(line_len));
    }
    cuts.sort_unstable();
    cuts.dedup();

    cuts.windows(2)
        .map(|pair| {
            let (start, end) = (pair[0], pair[1]);
            let mut style = runs
                .iter()
                .find(|run| run.contains(start))
                .map(|run| run.style)
                .unwrap_or_default();
            if selected.is_some_and(|(from, to)| start >= from && start < to) {
                style = style.with_reverse();
            }
            (start, end, style)
        })
        .collect()
}

/// Text ready for the terminal: tabs expanded, cut at `max_width` columns
fn expand_to_width(s: &str, max_width: usize) -> (String, usize) {
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = char_width(ch);
        if width + ch_width > max_width {
            break;
        }
        if ch == '\t' {
            result.push_str(&" ".repeat(ch_width));
        } else {
            result.push(ch);
        }
        width += ch_width;
    }
    (result, width)
}

/// Truncate a string to fit within a display width
fn truncate_to_width(s: &str, max_width: usize) -> String {
    expand_to_width(s, max_width).0
}

/// File name, modified flag, language mode, theme and cursor position
fn mode_line_text(buffer: &Buffer, syntax: &SyntaxManager, theme: Theme) -> String {
    let modified = if buffer.is_modified() { "**" } else { "--" };
    let cursor = buffer.cursor();
    let col = buffer
        .line_ref(cursor.line)
        .map(|line| line.byte_to_col(cursor.col))
        .unwrap_or(0);
    format!(
        "{} codepad: {}  ({}, {})  Ln {}, Col {}",
        modified,
        buffer.name(),
        syntax.mode().name(),
        theme.name(),
        cursor.line + 1,
        col + 1
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::LanguageMode;
    use crate::syntax::TokenType;

    #[test]
    fn test_line_number_width() {
        assert_eq!(line_number_width(false, 5000), 0);
        assert_eq!(line_number_width(true, 1), 4);
        assert_eq!(line_number_width(true, 999), 4);
        assert_eq!(line_number_width(true, 1000), 5);
        assert_eq!(line_number_width(true, 0), 4);
    }

    #[test]
    fn test_segments_cover_line() {
        let kw = TokenType::Keyword.style(Theme::Dark);
        let runs = vec![Span::new(0, 3, TokenType::Keyword, kw)];
        let segments = line_segments(6, &runs, None);
        assert_eq!(segments, vec![(0, 3, kw), (3, 6, Style::default())]);
    }

    #[test]
    fn test_selection_overlays_highlight() {
        let kw = TokenType::Keyword.style(Theme::Dark);
        let runs = vec![Span::new(0, 4, TokenType::Keyword, kw)];
        let segments = line_segments(8, &runs, Some((2, 6)));
        assert_eq!(
            segments,
            vec![
                (0, 2, kw),
                (2, 4, kw.with_reverse()),
                (4, 6, Style::reverse()),
                (6, 8, Style::default()),
            ]
        );
    }

    #[test]
    fn test_selection_on_line() {
        let sel = Some(Selection::new(Position::new(3, 2), Position::new(1, 4)));
        assert_eq!(selection_on_line(sel, 0, 10), None);
        assert_eq!(selection_on_line(sel, 1, 10), Some((4, 10)));
        assert_eq!(selection_on_line(sel, 2, 7), Some((0, 7)));
        assert_eq!(selection_on_line(sel, 3, 10), Some((0, 2)));
        assert_eq!(selection_on_line(None, 1, 10), None);
    }

    #[test]
    fn test_expand_tabs_and_truncate() {
        assert_eq!(expand_to_width("\tx", 10), ("    x".to_string(), 5));
        assert_eq!(expand_to_width("你好", 3), ("你".to_string(), 2));
        assert_eq!(truncate_to_width("hello", 3), "hel");
    }

    #[test]
    fn test_mode_line() {
        let mut buffer = Buffer::from_text("main.py", "x = 1");
        let mut syntax = SyntaxManager::new(Theme::Light);
        syntax.set_language(LanguageMode::PythonLike, &buffer);
        buffer.set_cursor(Position::new(0, 2));
        let text = mode_line_text(&buffer, &syntax, Theme::Light);
        assert_eq!(text, "-- codepad: main.py  (Python, light)  Ln 1, Col 3");

        buffer.insert_text("y");
        assert!(mode_line_text(&buffer, &syntax, Theme::Light).starts_with("** "));
    }
}
