//! Navigation commands - cursor movement, optionally extending the selection

use crate::buffer::Buffer;
use crate::document::{Position, TextDocument};
use crate::editor::EditorState;
use crate::error::Result;
use super::CommandStatus;

/// Position one character after `pos`, wrapping to the next line
fn forward_position(buffer: &Buffer, pos: Position) -> Option<Position> {
    let line = buffer.line_ref(pos.line)?;
    match line.next_boundary(pos.col) {
        Some(col) => Some(Position::new(pos.line, col)),
        None if pos.line + 1 < buffer.line_count() => Some(Position::new(pos.line + 1, 0)),
        None => None,
    }
}

/// Position one character before `pos`, wrapping to the previous line
fn backward_position(buffer: &Buffer, pos: Position) -> Option<Position> {
    let line = buffer.line_ref(pos.line)?;
    match line.prev_boundary(pos.col) {
        Some(col) => Some(Position::new(pos.line, col)),
        None if pos.line > 0 => Some(Position::new(pos.line - 1, buffer.line(pos.line - 1).len())),
        None => None,
    }
}

fn move_to(editor: &mut EditorState, target: Position, extend: bool) {
    if extend {
        editor.buffer.extend_selection(target);
    } else {
        editor.buffer.set_cursor(target);
    }
}

fn horizontal(editor: &mut EditorState, forward: bool, extend: bool) -> CommandStatus {
    editor.window.set_goal_col(None);

    // Without shift, an arrow collapses the selection to its edge
    if !extend {
        if let Some(selection) = editor.buffer.selection() {
            let edge = if forward { selection.end() } else { selection.start() };
            editor.buffer.set_cursor(edge);
            return CommandStatus::Success;
        }
    }

    let cursor = editor.buffer.cursor();
    let target = if forward {
        forward_position(&editor.buffer, cursor)
    } else {
        backward_position(&editor.buffer, cursor)
    };
    match target {
        Some(pos) => {
            move_to(editor, pos, extend);
            CommandStatus::Success
        }
        None => CommandStatus::Failure,
    }
}

/// Move `delta` lines up or down, keeping the goal column
fn vertical(editor: &mut EditorState, delta: isize, extend: bool) -> CommandStatus {
    let cursor = editor.buffer.cursor();
    let last = editor.buffer.line_count() as isize - 1;
    let target_line = (cursor.line as isize + delta).clamp(0, last) as usize;
    if target_line == cursor.line {
        return CommandStatus::Failure;
    }

    let goal = match editor.window.goal_col() {
        Some(goal) => goal,
        None => editor
            .buffer
            .line_ref(cursor.line)
            .map(|line| line.byte_to_col(cursor.col))
            .unwrap_or(0),
    };
    editor.window.set_goal_col(Some(goal));

    let col = editor
        .buffer
        .line_ref(target_line)
        .map(|line| line.col_to_byte(goal))
        .unwrap_or(0);
    move_to(editor, Position::new(target_line, col), extend);
    CommandStatus::Success
}

/// Move a page, scrolling the view along with the cursor
fn page(editor: &mut EditorState, down: bool, extend: bool) -> CommandStatus {
    let rows = editor.window.page_size();
    let top = editor.window.top_line();
    let new_top = if down {
        (top + rows).min(editor.buffer.line_count().saturating_sub(1))
    } else {
        top.saturating_sub(rows)
    };
    editor.window.set_top_line(new_top);
    let delta = rows as isize;
    vertical(editor, if down { delta } else { -delta }, extend)
}

fn line_edge(editor: &mut EditorState, end: bool, extend: bool) -> CommandStatus {
    editor.window.set_goal_col(None);
    let cursor = editor.buffer.cursor();
    let col = if end { editor.buffer.line(cursor.line).len() } else { 0 };
    move_to(editor, Position::new(cursor.line, col), extend);
    CommandStatus::Success
}

/// Move cursor forward one character
pub fn forward_char(editor: &mut EditorState) -> Result<CommandStatus> {
    Ok(horizontal(editor, true, false))
}

/// Move cursor backward one character
pub fn backward_char(editor: &mut EditorState) -> Result<CommandStatus> {
    Ok(horizontal(editor, false, false))
}

/// Move to next line
pub fn next_line(editor: &mut EditorState) -> Result<CommandStatus> {
    Ok(vertical(editor, 1, false))
}

/// Move to previous line
pub fn previous_line(editor: &mut EditorState) -> Result<CommandStatus> {
    Ok(vertical(editor, -1, false))
}

pub fn beginning_of_line(editor: &mut EditorState) -> Result<CommandStatus> {
    Ok(line_edge(editor, false, false))
}

pub fn end_of_line(editor: &mut EditorState) -> Result<CommandStatus> {
    Ok(line_edge(editor, true, false))
}

/// Page down
pub fn scroll_down(editor: &mut EditorState) -> Result<CommandStatus> {
    Ok(page(editor, true, false))
}

/// Page up
pub fn scroll_up(editor: &mut EditorState) -> Result<CommandStatus> {
    Ok(page(editor, false, false))
}

pub fn select_forward_char(editor: &mut EditorState) -> Result<CommandStatus> {
    Ok(horizontal(editor, true, true))
}

pub fn select_backward_char(editor: &mut EditorState) -> Result<CommandStatus> {
    Ok(horizontal(editor, false, true))
}

pub fn select_next_line(editor: &mut EditorState) -> Result<CommandStatus> {
    Ok(vertical(editor, 1, true))
}

pub fn select_previous_line(editor: &mut EditorState) -> Result<CommandStatus> {
    Ok(vertical(editor, -1, true))
}

pub fn select_beginning_of_line(editor: &mut EditorState) -> Result<CommandStatus> {
    Ok(line_edge(editor, false, true))
}

pub fn select_end_of_line(editor: &mut EditorState) -> Result<CommandStatus> {
    Ok(line_edge(editor, true, true))
}

pub fn select_scroll_down(editor: &mut EditorState) -> Result<CommandStatus> {
    Ok(page(editor, true, true))
}

pub fn select_scroll_up(editor: &mut EditorState) -> Result<CommandStatus> {
    Ok(page(editor, false, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn editor_with(text: &str) -> EditorState {
        let mut editor = EditorState::new(Config::default(), 10);
        editor.buffer = Buffer::from_text("t", text);
        editor
    }

    #[test]
    fn test_horizontal_wraps_lines() {
        let mut editor = editor_with("ab\ncd");
        editor.buffer.set_cursor(Position::new(0, 2));
        forward_char(&mut editor).unwrap();
        assert_eq!(editor.buffer.cursor(), Position::new(1, 0));
        backward_char(&mut editor).unwrap();
        assert_eq!(editor.buffer.cursor(), Position::new(0, 2));

        editor.buffer.set_cursor(Position::new(0, 0));
        assert_eq!(backward_char(&mut editor).unwrap(), CommandStatus::Failure);
    }

    #[test]
    fn test_vertical_keeps_goal_column() {
        let mut editor = editor_with("abcdef\nab\nabcdef");
        editor.buffer.set_cursor(Position::new(0, 5));
        next_line(&mut editor).unwrap();
        assert_eq!(editor.buffer.cursor(), Position::new(1, 2));
        next_line(&mut editor).unwrap();
        assert_eq!(editor.buffer.cursor(), Position::new(2, 5));
        assert_eq!(next_line(&mut editor).unwrap(), CommandStatus::Failure);
    }

    #[test]
    fn test_shift_arrows_extend_selection() {
        let mut editor = editor_with("hello\nworld");
        editor.buffer.set_cursor(Position::new(0, 1));
        select_forward_char(&mut editor).unwrap();
        select_forward_char(&mut editor).unwrap();
        assert_eq!(editor.buffer.selected_text().as_deref(), Some("el"));

        select_next_line(&mut editor).unwrap();
        assert_eq!(editor.buffer.selected_text().as_deref(), Some("ello\nwor"));

        // A plain arrow collapses to the selection edge
        backward_char(&mut editor).unwrap();
        assert!(!editor.buffer.has_selection());
        assert_eq!(editor.buffer.cursor(), Position::new(0, 1));
    }

    #[test]
    fn test_line_edges() {
        let mut editor = editor_with("    text");
        editor.buffer.set_cursor(Position::new(0, 6));
        end_of_line(&mut editor).unwrap();
        assert_eq!(editor.buffer.cursor(), Position::new(0, 8));
        select_beginning_of_line(&mut editor).unwrap();
        assert_eq!(editor.buffer.selected_text().as_deref(), Some("    text"));
    }

    #[test]
    fn test_page_moves() {
        let text = (0..50).map(|i| i.to_string()).collect::<Vec<_>>().join("\n");
        let mut editor = editor_with(&text);
        scroll_down(&mut editor).unwrap();
        let page = editor.window.page_size();
        assert_eq!(editor.buffer.cursor().line, page);
        assert_eq!(editor.window.top_line(), page);
        scroll_up(&mut editor).unwrap();
        assert_eq!(editor.buffer.cursor().line, 0);
    }
}
