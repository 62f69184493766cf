//! Miscellaneous commands

use crate::document::TextDocument;
use crate::editor::{EditorState, PromptAction};
use crate::error::Result;
use super::CommandStatus;

/// Switch between the light and dark palettes
pub fn toggle_theme(editor: &mut EditorState) -> Result<CommandStatus> {
    let next = editor.theme().toggled();
    editor.update_theme(next.is_dark());
    editor
        .display
        .set_message(format!("Theme: {}", editor.theme().name()));
    Ok(CommandStatus::Success)
}

/// Toggle the line-number gutter
pub fn toggle_line_numbers(editor: &mut EditorState) -> Result<CommandStatus> {
    editor.display.toggle_line_numbers();
    editor.config.show_line_numbers = editor.display.show_line_numbers;
    editor.save_config();
    let status = if editor.display.show_line_numbers {
        "Line numbers enabled"
    } else {
        "Line numbers disabled"
    };
    editor.display.set_message(status);
    Ok(CommandStatus::Success)
}

/// Quit the editor
pub fn quit(editor: &mut EditorState) -> Result<CommandStatus> {
    if editor.buffer.is_modified() {
        let msg = format!("Buffer {} modified; really quit? (y/n) ", editor.buffer.name());
        editor.start_prompt(&msg, PromptAction::ConfirmQuit);
        return Ok(CommandStatus::Success);
    }

    editor.quit();
    Ok(CommandStatus::Success)
}

/// Abort current operation, dropping any selection
pub fn abort(editor: &mut EditorState) -> Result<CommandStatus> {
    if editor.buffer.has_selection() {
        let cursor = editor.buffer.cursor();
        editor.buffer.set_cursor(cursor);
    }
    Ok(CommandStatus::Abort)
}
