//! Editing commands
//!
//! Typing, Tab, Enter and Backspace are handled by the editor itself so the
//! indent engine sees them first. What remains here are the bound editing
//! keys.

use crate::document::TextDocument;
use crate::editor::EditorState;
use crate::error::Result;
use super::CommandStatus;

/// Delete the character after the cursor, or the selection
pub fn delete_char_forward(editor: &mut EditorState) -> Result<CommandStatus> {
    if editor.buffer.delete_forward() {
        Ok(CommandStatus::Success)
    } else {
        Ok(CommandStatus::Failure)
    }
}

/// Undo the last edit group
pub fn undo(editor: &mut EditorState) -> Result<CommandStatus> {
    if editor.buffer.undo() {
        Ok(CommandStatus::Success)
    } else {
        editor.display.set_message("No further undo information");
        Ok(CommandStatus::Failure)
    }
}

/// Redo the last undone edit group
pub fn redo(editor: &mut EditorState) -> Result<CommandStatus> {
    if editor.buffer.redo() {
        Ok(CommandStatus::Success)
    } else {
        editor.display.set_message("No further redo information");
        Ok(CommandStatus::Failure)
    }
}

/// Select the whole buffer
pub fn select_all(editor: &mut EditorState) -> Result<CommandStatus> {
    editor.buffer.select_all();
    editor.window.set_goal_col(None);
    if editor.buffer.has_selection() {
        Ok(CommandStatus::Success)
    } else {
        Ok(CommandStatus::Failure)
    }
}
